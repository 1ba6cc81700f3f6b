//! Configuration types for pcap-agent.
//!
//! [`Config::load`] reads `~/.config/pcap-agent/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies `PCAP_AGENT__*`
//! environment overrides (e.g. `PCAP_AGENT__LLM__MODEL=llama3`).
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem or the environment (useful in tests).

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[parser]
url          = "http://localhost:8000/api/pcap/parse"
timeout_secs = 120

[llm]
enabled      = true
provider     = "openai"
url          = "https://api.openai.com/v1/chat/completions"
model        = "gpt-4o-mini"
api_key_env  = "OPENAI_API_KEY"
temperature  = 0.2
timeout_secs = 120

[ui]
theme = "default"
"#;

const ENV_PREFIX: &str = "PCAP_AGENT";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[parser]` section — where captures are uploaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_parser_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_parser_url() -> String { "http://localhost:8000/api/pcap/parse".to_string() }
fn default_timeout_secs() -> u64 { 120 }

impl Default for ParserConfig {
    fn default() -> Self {
        Self { url: default_parser_url(), timeout_secs: default_timeout_secs() }
    }
}

/// `[llm]` section — which chat endpoint writes the report.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub provider: LlmProvider,
    #[serde(default = "default_llm_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Inline key; takes precedence over `api_key_env` when set.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_enabled() -> bool { true }
fn default_llm_url() -> String { LlmProvider::OpenAi.default_url().to_string() }
fn default_model() -> String { "gpt-4o-mini".to_string() }
fn default_api_key_env() -> String { "OPENAI_API_KEY".to_string() }
fn default_temperature() -> f64 { 0.2 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_llm_enabled(),
            provider: LlmProvider::default(),
            url: default_llm_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            api_key: None,
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Switch provider. The endpoint follows along unless it was customised.
    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        if self.url == self.provider.default_url() {
            self.url = provider.default_url().to_string();
        }
        self.provider = provider;
        self
    }

    /// Inline key first, then the configured environment variable. Empty
    /// values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok().filter(|k| !k.is_empty()))
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self { theme: default_theme() }
    }
}

// ---------------------------------------------------------------------------
// LlmProvider
// ---------------------------------------------------------------------------

/// Wire dialect of the chat endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// `POST …/chat/completions`, answer in `choices[0].message.content`.
    #[default]
    #[serde(alias = "openai-compatible")]
    OpenAi,
    /// `POST …/api/chat` with `stream: false`, answer in `message.content`.
    Ollama,
}

impl LlmProvider {
    pub fn default_url(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "https://api.openai.com/v1/chat/completions",
            LlmProvider::Ollama => "http://localhost:11434/api/chat",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAi => write!(f, "openai"),
            LlmProvider::Ollama => write!(f, "ollama"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown LLM provider {0:?} (expected \"openai\" or \"ollama\")")]
pub struct UnknownProvider(pub String);

impl FromStr for LlmProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "openai-compatible" => Ok(LlmProvider::OpenAi),
            "ollama" => Ok(LlmProvider::Ollama),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/pcap-agent/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file (which must exist), plus environment
    /// overrides.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        tracing::debug!(path = %path.display(), provider = %cfg.llm.provider, "config loaded");
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The built-in defaults as written to a fresh config file.
    pub fn default_toml() -> &'static str {
        DEFAULT_CONFIG.trim_start()
    }
}

/// Renders the effective configuration as TOML. The inline API key is
/// masked.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[parser]")?;
        writeln!(f, "url          = {:?}", self.parser.url)?;
        writeln!(f, "timeout_secs = {}", self.parser.timeout_secs)?;
        writeln!(f)?;
        writeln!(f, "[llm]")?;
        writeln!(f, "enabled      = {}", self.llm.enabled)?;
        writeln!(f, "provider     = \"{}\"", self.llm.provider)?;
        writeln!(f, "url          = {:?}", self.llm.url)?;
        writeln!(f, "model        = {:?}", self.llm.model)?;
        writeln!(f, "api_key_env  = {:?}", self.llm.api_key_env)?;
        if self.llm.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            writeln!(f, "api_key      = \"********\"")?;
        }
        writeln!(f, "temperature  = {}", self.llm.temperature)?;
        writeln!(f, "timeout_secs = {}", self.llm.timeout_secs)?;
        writeln!(f)?;
        writeln!(f, "[ui]")?;
        write!(f, "theme = {:?}", self.ui.theme)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("pcap-agent")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
