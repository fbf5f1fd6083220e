//! The `launches`, `payloads` and `propellant` subcommands: one statistic per
//! year over an inclusive range of years.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use discosweb_lib::validation;
use discosweb_lib::{
    Aggregator, CancelFlag, Config, DiscosError, Governor, Statistic, SummarySink,
    ThrottledClient, YearlySummary,
};

use crate::output::{print_json, print_report_table, print_request_stats, FileSink, OutputFormat};
use crate::progress::ProgressReporter;

#[derive(Args)]
pub struct YearRangeArgs {
    /// First year to summarize
    #[arg(long)]
    pub start_year: i32,

    /// Last year to summarize (inclusive)
    #[arg(long)]
    pub end_year: i32,

    /// Append one line per finished year to this file
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn run(
    statistic: Statistic,
    args: &YearRangeArgs,
    config: &Config,
    cancel: CancelFlag,
    format: &OutputFormat,
) -> Result<()> {
    let years = validation::validate_year_range(args.start_year, args.end_year)?;

    let reporter = Arc::new(ProgressReporter::new(years.clone().count() as u64)?);
    let governor = Governor::new(reporter.clone(), cancel);
    let client = ThrottledClient::from_config(config, governor)?;

    let mut file_sink = args.out.as_deref().map(FileSink::append).transpose()?;
    let mut discarded: Vec<YearlySummary> = Vec::new();
    let sink: &mut dyn SummarySink = match file_sink.as_mut() {
        Some(file) => file,
        None => &mut discarded,
    };
    if let Some(path) = &args.out {
        tracing::info!("Appending yearly {} results to {}", statistic, path.display());
    }

    let result = Aggregator::new(&client).run(statistic, years, sink).await;
    let stats = client.governor().tracker().summary();

    match result {
        Ok(summaries) => {
            reporter.finish(summaries.len());
            match format {
                OutputFormat::Table => print_report_table(statistic, &summaries),
                OutputFormat::Json => print_json(&summaries),
            }
            print_request_stats(&stats);
            Ok(())
        }
        Err(DiscosError::Cancelled) => {
            reporter.abandon("interrupted");
            match &args.out {
                Some(path) => eprintln!(
                    "Interrupted. Years already finished remain in {}.",
                    path.display()
                ),
                None => eprintln!("Interrupted."),
            }
            print_request_stats(&stats);
            Err(DiscosError::Cancelled.into())
        }
        Err(e) => {
            reporter.abandon("failed");
            print_request_stats(&stats);
            Err(e.into())
        }
    }
}
