use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use vantage_cli::cli::{
    handle_image_command, handle_map_command, handle_report_command, ImageCommands,
    ReportCommands,
};
use vantage_cli::config::{ApiKeys, Settings, VantagePaths};

#[derive(Parser)]
#[command(
    name = "vantage",
    version,
    about = "Location intelligence reports from the terminal",
    long_about = "Vantage turns scored candidate locations into printable \
                  location reports, renders storefront and floor plan imagery, \
                  and shows every candidate on an interactive map."
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "VANTAGE_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Location report commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Generated imagery commands
    #[command(subcommand, alias = "img")]
    Image(ImageCommands),

    /// Open the interactive map for an analysis file
    #[command(alias = "tui")]
    Map {
        /// Analysis file (JSON or YAML)
        file: PathBuf,
    },

    /// Show current configuration and paths
    Config,
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_deref()
        .unwrap_or("info")
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("hyper=off,rustls=off,{}", log_level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The map takes over the terminal, so it runs without log output
    if !matches!(cli.command, Some(Commands::Map { .. })) {
        setup_logging(&cli.log_level);
    }

    ApiKeys::init(ApiKeys::from_env());

    let paths = VantagePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        Some(Commands::Report(cmd)) => {
            runtime.block_on(handle_report_command(&paths, &settings, cmd))?;
        }
        Some(Commands::Image(cmd)) => {
            runtime.block_on(handle_image_command(ApiKeys::global(), cmd))?;
        }
        Some(Commands::Map { file }) => {
            handle_map_command(&paths, &settings, &file, runtime.handle().clone())?;
        }
        Some(Commands::Config) => {
            let keys = ApiKeys::global();
            println!("Vantage Configuration");
            println!("=====================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Reports directory: {}", settings.reports_dir(&paths).display());
            println!();
            println!("Settings:");
            println!("  Filename prefix: {}", settings.filename_prefix);
            println!("  Settle delay:    {} ms", settings.settle_delay_ms);
            println!("  Page margin:     {} in", settings.page_margin_in);
            println!("  Pixel scale:     {}x", settings.pixel_scale);
            println!("  Image quality:   {}", settings.image_quality);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!();
            println!("API keys:");
            println!("  Maps:   {}", configured(keys.maps_configured()));
            println!("  OpenAI: {}", configured(keys.openai_configured()));
        }
        None => {
            println!("Vantage - location intelligence reports");
            println!();
            println!("Run 'vantage --help' for usage information.");
            println!("Run 'vantage map <file>' to open the interactive map.");
        }
    }

    Ok(())
}

fn configured(set: bool) -> &'static str {
    if set {
        "configured"
    } else {
        "not set"
    }
}
