use clap::Parser;
use ffmedian::cli::{self, Cli, Commands};
use ffmedian::config::{AppConfig, LoggingConfig};
use ffmedian::error::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_from(&cli.config_dir)?;

    match &cli.command {
        Commands::Simulate(args) => {
            args.apply(&mut config);
            init_logging(&config.logging);
            cli::run_simulate(args, &config).await?;
        }
        Commands::Config(command) => {
            init_logging_simple();
            command.run(&config)?;
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,ffmedian={}", logging.level)));

    // Logs go to stderr so `--json` output stays parseable
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn init_logging_simple() {
    // Minimal logging for config commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .try_init();
}
