mod config;
mod input;
mod service;

use anyhow::{bail, Result};
use clap::Parser;
use config::Config;
use input::ScanInput;
use service::ScanService;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "skilltwin")]
#[command(author, version, about = "Detect skills in documents and assess career readiness", long_about = None)]
struct Args {
    /// Files to scan, `-` for stdin (stdin is read when nothing else is given)
    files: Vec<PathBuf>,

    /// Scan this text
    #[arg(short, long)]
    content: Option<String>,

    /// Career goal to assess readiness against, e.g. "backend developer"
    #[arg(short, long)]
    role: Option<String>,

    /// Additional configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref())?;

    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    skilltwin_logging::init_logging(&config.logging.level, config.logging.format.parse()?)?;

    let inputs = ScanInput::collect(&args.files, args.content.as_deref());
    let reports = ScanService::new(config).run(inputs, args.role).await?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{}", output);

    let failed = reports.iter().filter(|r| r.is_failure()).count();
    if failed > 0 {
        bail!("{} of {} inputs could not be scanned", failed, reports.len());
    }
    Ok(())
}
