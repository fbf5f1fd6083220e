mod commands;
mod output;
mod progress;

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use discosweb_lib::{CancelFlag, Config, Statistic};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "discosweb")]
#[command(about = "Yearly launch statistics from the ESA DISCOSweb registry")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Path to a TOML config file (defaults to ./discosweb.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// File containing the API token
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count successful and failed launches per year
    Launches(commands::stats::YearRangeArgs),
    /// Count payloads placed by successful launches per year
    Payloads(commands::stats::YearRangeArgs),
    /// Sum stage propellant mass of successful launches per year
    Propellant(commands::stats::YearRangeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("discosweb=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let config = Config::load(cli.config.as_deref(), cli.token_file.as_deref())?;

    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if watch_interrupts(cancel, tokio::signal::ctrl_c).await {
                eprintln!("Interrupted twice, exiting.");
                std::process::exit(130);
            }
        });
    }

    let (statistic, args) = match &cli.command {
        Commands::Launches(args) => (Statistic::Launches, args),
        Commands::Payloads(args) => (Statistic::Payloads, args),
        Commands::Propellant(args) => (Statistic::Propellant, args),
    };
    commands::stats::run(statistic, args, &config, cancel, &format).await?;

    Ok(())
}

/// The first interrupt cancels the run at its next checkpoint. Returns `true`
/// on a second interrupt, `false` if signals can no longer be received.
async fn watch_interrupts<F, Fut>(cancel: CancelFlag, mut next_interrupt: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    while next_interrupt().await.is_ok() {
        if cancel.is_cancelled() {
            return true;
        }
        tracing::warn!("Interrupt received, stopping after the current request (ctrl-c again to quit now)");
        cancel.cancel();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn second_interrupt_forces_exit() {
        let cancel = CancelFlag::new();
        let seen = Cell::new(0);
        let forced = watch_interrupts(cancel.clone(), || {
            seen.set(seen.get() + 1);
            async { Ok(()) }
        })
        .await;
        assert!(forced);
        assert!(cancel.is_cancelled());
        assert_eq!(seen.get(), 2);
    }

    #[tokio::test]
    async fn lost_signal_handler_stops_watching() {
        let cancel = CancelFlag::new();
        let forced = watch_interrupts(cancel.clone(), || async {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no handler"))
        })
        .await;
        assert!(!forced);
        assert!(!cancel.is_cancelled());
    }
}
