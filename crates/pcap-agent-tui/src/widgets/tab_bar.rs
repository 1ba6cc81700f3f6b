//! Tab bar widget: capture title plus the strip of panels.

use crate::app::Panel;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line strip at the top of the screen.
///
/// Keybinding hints (`q:quit  ?:help`) are right-aligned in the same row.
pub struct TabBar<'a> {
    title: &'a str,
    active: Panel,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(title: &'a str, active: Panel, theme: &'a Theme) -> Self {
        Self { title, active, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.title);
        let title_width = (title.chars().count() as u16).min(area.width);
        buf.set_string(area.x, area.y, &title, self.theme.title);

        let labels: Vec<Line> = Panel::ALL
            .iter()
            .enumerate()
            .map(|(i, panel)| Line::from(format!(" {}:{} ", i + 1, panel.label())))
            .collect();

        let tabs_area = Rect {
            x: area.x + title_width,
            width: area.width.saturating_sub(title_width),
            ..area
        };
        Tabs::new(labels)
            .select(self.active.index())
            .style(self.theme.muted)
            .highlight_style(self.theme.border_focused.add_modifier(Modifier::REVERSED))
            .divider("")
            .render(tabs_area, buf);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.muted);
    }
}
