use anyhow::Context;
use clap::Parser;
use pcap_agent::cli::{self, AnalyzeArgs, Cli, Command, ConfigAction, OutputFormat};
use pcap_agent::render;
use pcap_agent_core::build_prompt_from_value;
use pcap_agent_core::config::Config;
use pcap_agent_services::{Analysis, Analyzer, ParserClient};
use pcap_agent_tui::Dashboard;
use std::path::Path;

const DEBUG_LOG: &str = "/tmp/pcap-agent-debug.log";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;

    match &cli.command {
        Command::Analyze(args) => analyze(&cli, args),
        Command::Prompt { input } => {
            let raw = cli::read_response(input)?;
            println!("{}", build_prompt_from_value(&raw));
            Ok(())
        }
        Command::View { response, report } => {
            let config = cli.load_config()?;
            let raw = cli::read_response(&response.to_string_lossy())?;
            let mut analysis = Analysis::offline(raw);
            if let Some(path) = report {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading report {}", path.display()))?;
                analysis = analysis.with_report(text);
            }
            dashboard(&analysis, response, &config)
        }
        Command::Health => health(&cli),
        Command::Config { action } => config_command(&cli, *action),
    }
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("pcap-agent debug log started — tail -f {DEBUG_LOG}");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(filter("warn"))
            .init();
    }
    Ok(())
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("starting tokio runtime")
}

fn analyze(cli: &Cli, args: &AnalyzeArgs) -> anyhow::Result<()> {
    let config = args.apply(cli.load_config()?);
    let analyzer = Analyzer::new(&config)?;
    let rt = runtime()?;

    eprintln!("Uploading {} to {}", args.file.display(), analyzer.parser().url());
    let mut analysis = rt
        .block_on(analyzer.upload(&args.file))
        .with_context(|| format!("analysing {}", args.file.display()))?;

    // Statistics are still worth showing when the report fails.
    let report = if analyzer.llm_enabled() {
        eprintln!("Requesting report from {} ({})", config.llm.provider, config.llm.model);
        rt.block_on(analyzer.write_report(&mut analysis))
    } else {
        Ok(())
    };

    match args.output {
        OutputFormat::Text => print!("{}", render::text(&analysis)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Tui => dashboard(&analysis, &args.file, &config)?,
    }

    report.context("LLM report failed")
}

fn dashboard(analysis: &Analysis, source: &Path, config: &Config) -> anyhow::Result<()> {
    let dashboard = Dashboard {
        title: cli::display_name(source),
        charts: analysis.charts.clone(),
        prompt: analysis.prompt.clone(),
        report: analysis.report.clone(),
    };
    pcap_agent_tui::run(dashboard, &config.ui.theme)
}

fn health(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let parser = ParserClient::new(&config.parser)?;
    let ok = runtime()?.block_on(parser.health())?;
    if !ok {
        anyhow::bail!("parser service at {} is not healthy", parser.url());
    }
    println!("parser service at {}: ok", parser.url());
    Ok(())
}

fn config_command(cli: &Cli, action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => println!("{}", cli.load_config()?),
        ConfigAction::Init => {
            let path = cli.config_path();
            cli::init_config(&path)?;
            println!("wrote {}", path.display());
        }
        ConfigAction::Path => println!("{}", cli.config_path().display()),
    }
    Ok(())
}
