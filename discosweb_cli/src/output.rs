use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use discosweb_lib::{
    DiscosError, LaunchCounts, PayloadCounts, PropellantTotals, Statistic, SummarySink,
    TrackerSummary, YearlySummary,
};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct LaunchRow {
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: i32,
    #[tabled(rename = "Successful")]
    #[serde(rename = "Successful")]
    successful: u64,
    #[tabled(rename = "Failed")]
    #[serde(rename = "Failed")]
    failed: u64,
    #[tabled(rename = "Unknown")]
    #[serde(rename = "Unknown")]
    unknown: u64,
}

#[derive(Tabled, Serialize)]
struct PayloadRow {
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: i32,
    #[tabled(rename = "Payloads")]
    #[serde(rename = "Payloads")]
    payloads: u64,
    #[tabled(rename = "Launches")]
    #[serde(rename = "Launches")]
    launches: u64,
    #[tabled(rename = "Skipped")]
    #[serde(rename = "Skipped")]
    skipped: u64,
}

#[derive(Tabled, Serialize)]
struct PropellantRow {
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: i32,
    #[tabled(rename = "Fuel (kg)")]
    #[serde(rename = "Fuel (kg)")]
    fuel: String,
    #[tabled(rename = "Oxidiser (kg)")]
    #[serde(rename = "Oxidiser (kg)")]
    oxidiser: String,
    #[tabled(rename = "Solid (kg)")]
    #[serde(rename = "Solid (kg)")]
    solid: String,
    #[tabled(rename = "Total (kg)")]
    #[serde(rename = "Total (kg)")]
    total: String,
    #[tabled(rename = "Launches")]
    #[serde(rename = "Launches")]
    launches: u64,
    #[tabled(rename = "Stages")]
    #[serde(rename = "Stages")]
    stages: u64,
    #[tabled(rename = "Skipped")]
    #[serde(rename = "Skipped")]
    skipped: u64,
}

// -- Row builders --

fn build_launch_rows(counts: &[&LaunchCounts]) -> Vec<LaunchRow> {
    counts
        .iter()
        .map(|c| LaunchRow {
            year: c.year,
            successful: c.successful,
            failed: c.failed,
            unknown: c.unknown,
        })
        .collect()
}

fn build_payload_rows(counts: &[&PayloadCounts]) -> Vec<PayloadRow> {
    counts
        .iter()
        .map(|c| PayloadRow {
            year: c.year,
            payloads: c.payloads,
            launches: c.launches,
            skipped: c.skipped_launches,
        })
        .collect()
}

fn build_propellant_rows(totals: &[&PropellantTotals]) -> Vec<PropellantRow> {
    totals
        .iter()
        .map(|t| PropellantRow {
            year: t.year,
            fuel: format_mass(t.fuel),
            oxidiser: format_mass(t.oxidiser),
            solid: format_mass(t.solid),
            total: format_mass(t.total()),
            launches: t.launches,
            stages: t.stages,
            skipped: t.skipped_launches,
        })
        .collect()
}

/// Formats kilograms with thousands separators and one decimal.
pub fn format_mass(kg: f64) -> String {
    let fixed = format!("{:.1}", kg);
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));
    let (sign, digits) = match int.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int),
    };
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", sign, grouped, frac)
}

// -- Final report --

pub fn print_report_table(statistic: Statistic, summaries: &[YearlySummary]) {
    let table = match statistic {
        Statistic::Launches => {
            let counts: Vec<_> = summaries
                .iter()
                .filter_map(|s| match s {
                    YearlySummary::Launches(c) => Some(c),
                    _ => None,
                })
                .collect();
            Table::new(build_launch_rows(&counts))
        }
        Statistic::Payloads => {
            let counts: Vec<_> = summaries
                .iter()
                .filter_map(|s| match s {
                    YearlySummary::Payloads(c) => Some(c),
                    _ => None,
                })
                .collect();
            Table::new(build_payload_rows(&counts))
        }
        Statistic::Propellant => {
            let totals: Vec<_> = summaries
                .iter()
                .filter_map(|s| match s {
                    YearlySummary::Propellant(t) => Some(t),
                    _ => None,
                })
                .collect();
            Table::new(build_propellant_rows(&totals))
        }
    };
    println!("{}", table);
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

pub fn print_request_stats(stats: &TrackerSummary) {
    eprintln!("{}", request_stats_line(stats));
}

fn request_stats_line(stats: &TrackerSummary) -> String {
    let mut line = format!(
        "Requests: {} made, {} succeeded, {} throttled, {} rejected, {} failed; waited {}s",
        stats.requests_made,
        stats.requests_succeeded,
        stats.requests_throttled,
        stats.requests_rejected,
        stats.requests_failed,
        stats.wait_secs_slept
    );
    if stats.wait_secs_abandoned() > 0 {
        line.push_str(&format!(" ({}s of throttle wait cut short)", stats.wait_secs_abandoned()));
    }
    line
}

// -- Append-only sink --

/// The line appended to the output file for one finished year.
///
/// Propellant years are a headerless CSV row `year,fuel,oxidiser,solid,total`;
/// count statistics are the summary sentence.
pub fn sink_line(summary: &YearlySummary) -> io::Result<String> {
    match summary {
        YearlySummary::Propellant(t) => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(Vec::new());
            writer.write_record([
                t.year.to_string(),
                t.fuel.to_string(),
                t.oxidiser.to_string(),
                t.solid.to_string(),
                t.total().to_string(),
            ])?;
            let bytes = writer.into_inner().map_err(|e| e.into_error())?;
            let line = String::from_utf8(bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Ok(line.trim_end().to_string())
        }
        other => Ok(other.to_string()),
    }
}

/// Appends one line per finished year, flushed as soon as it is written.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl SummarySink for FileSink {
    fn write(&mut self, summary: &YearlySummary) -> Result<(), DiscosError> {
        let line = sink_line(summary)?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        Ok(())
    }
}
