//! Colour theme for the pcap-agent dashboard.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the dashboard works without any files on
//! disk. Pick one with [`Theme::by_name`] (driven by `ui.theme` in the
//! config) and pass it through the application as a shared reference.

use anyhow::anyhow;
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::collections::HashMap;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// TOML shape: three sections of named styles
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    bold: bool,
    dim: bool,
    italic: bool,
}

impl RawStyle {
    fn to_style(&self) -> Style {
        let modifiers = [
            (self.bold, Modifier::BOLD),
            (self.dim, Modifier::DIM),
            (self.italic, Modifier::ITALIC),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .fold(Modifier::empty(), |acc, (_, m)| acc | m);

        let mut style = Style::default().add_modifier(modifiers);
        if let Some(fg) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(bg);
        }
        style
    }
}

type Section = HashMap<String, RawStyle>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTheme {
    borders: Section,
    text: Section,
    charts: Section,
}

/// Every key must be present; a theme with holes is a broken theme.
fn pick(section: &Section, section_name: &str, key: &str) -> anyhow::Result<Style> {
    section
        .get(key)
        .map(RawStyle::to_style)
        .ok_or_else(|| anyhow!("theme is missing [{section_name}] {key}"))
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Dashboard colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border_focused: Style,
    pub border_unfocused: Style,

    pub title: Style,
    pub stat_label: Style,
    pub stat_value: Style,
    pub table_header: Style,
    pub alert: Style,
    /// Placeholder text ("no alerts", "report not requested").
    pub muted: Style,

    pub protocol_bar: Style,
    pub protocol_value: Style,
    pub talker_bar: Style,
    pub talker_value: Style,
}

impl Theme {
    /// The embedded default theme. Panics only if the bundled TOML is broken.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("bundled default theme is valid")
    }

    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC).expect("bundled gruvbox theme is valid")
    }

    /// Resolve a theme name from `ui.theme`; unknown names get the default.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            "default" => Self::load_default(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string. Extra keys are ignored, missing
    /// ones are an error.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        let b = |key: &str| pick(&raw.borders, "borders", key);
        let t = |key: &str| pick(&raw.text, "text", key);
        let c = |key: &str| pick(&raw.charts, "charts", key);

        Ok(Self {
            border_focused: b("focused")?,
            border_unfocused: b("unfocused")?,
            title: t("title")?,
            stat_label: t("stat_label")?,
            stat_value: t("stat_value")?,
            table_header: t("table_header")?,
            alert: t("alert")?,
            muted: t("muted")?,
            protocol_bar: c("protocol_bar")?,
            protocol_value: c("protocol_value")?,
            talker_bar: c("talker_bar")?,
            talker_value: c("talker_value")?,
        })
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

/// Colour from a theme file: anything ratatui's `Color::from_str` accepts
/// (`red`, `dark_gray`, `#rrggbb`, `42`) plus `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    match s.strip_prefix("indexed:") {
        Some(n) => n.parse().ok().map(Color::Indexed),
        None => s.parse().ok(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
