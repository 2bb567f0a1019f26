use anyhow::Result;
use clap::{Parser, Subcommand};
use nkt::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record today's snapshot (the default)
    Update,
    /// Display the recorded history
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::History) => nkt::show::run(cli.config_path.as_deref()),
        Some(Commands::Update) | None => {
            // Cron contract: log failures, always exit cleanly.
            if let Err(e) = nkt::run_update(cli.config_path.as_deref()).await {
                tracing::error!(error = %e, "Update failed");
            }
            Ok(())
        }
    }
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = nkt::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
ticker: "^N225"
data_file: "data/nikkei_data.json"

providers:
  yahoo:
    base_url: "https://query1.finance.yahoo.com"
  investing:
    base_url: "https://www.investing.com"

valuation:
  eps: 2500
  bps: 27500
  dividend: 900
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
