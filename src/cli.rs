//! Command-line surface.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pcap_agent_core::config::{self, Config, LlmProvider};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "pcap-agent",
    version,
    about = "Upload a packet capture, get a traffic summary and an LLM-written report"
)]
pub struct Cli {
    /// Write debug logs to /tmp/pcap-agent-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use this config file instead of ~/.config/pcap-agent/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a capture to the parser service and write a report.
    Analyze(AnalyzeArgs),
    /// Print the LLM prompt for a saved parser response (`-` reads stdin).
    Prompt {
        #[arg(value_name = "RESPONSE.json")]
        input: String,
    },
    /// Open the dashboard for a saved parser response, without any network calls.
    View {
        #[arg(value_name = "RESPONSE.json")]
        response: PathBuf,
        /// Show this file as the report.
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Check that the parser service is up.
    Health,
    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, Copy, Subcommand, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Write the default config file if it does not exist.
    Init,
    /// Print the config file location.
    Path,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Tui,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Capture file (.pcap / .pcapng).
    pub file: PathBuf,

    /// Skip the LLM step; only summarise the capture.
    #[arg(long)]
    pub no_llm: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Override `parser.url`.
    #[arg(long, value_name = "URL")]
    pub parser_url: Option<String>,

    /// Override `llm.provider` (openai, ollama).
    #[arg(long)]
    pub provider: Option<LlmProvider>,

    /// Override `llm.url`.
    #[arg(long, value_name = "URL")]
    pub llm_url: Option<String>,

    /// Override `llm.model`.
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,
}

impl AnalyzeArgs {
    /// Layer command-line overrides on top of the loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.parser_url {
            config.parser.url = url.clone();
        }
        if let Some(provider) = self.provider {
            config.llm = config.llm.with_provider(provider);
        }
        if let Some(url) = &self.llm_url {
            config.llm.url = url.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if self.no_llm {
            config.llm.enabled = false;
        }
        config
    }
}

impl Cli {
    /// Config file in effect: `--config` or the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::config_path)
    }

    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("loading config from {}", path.display())),
            None => Config::load().context("loading config"),
        }
    }
}

/// Read a saved parser response from a file, or stdin when `input` is `-`.
pub fn read_response(input: &str) -> anyhow::Result<Value> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("{input} is not valid JSON"))
}

/// Write the default config to `path`. Refuses to overwrite.
pub fn init_config(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("writing {}", path.display()))
}

/// Title shown in the dashboard: the file name, or the whole path if it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
