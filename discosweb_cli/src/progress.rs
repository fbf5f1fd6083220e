//! Terminal progress for a statistics run.

use std::time::Duration;

use anyhow::Result;
use discosweb_lib::{ProgressObserver, Statistic, YearlySummary};
use indicatif::{ProgressBar, ProgressStyle};

/// One bar over the requested years. The message line shows the current
/// launch walk or the rate-limit countdown.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(years: u64) -> Result<Self> {
        let bar = ProgressBar::new(years);
        bar.set_style(ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} years {msg}",
        )?);
        Ok(Self { bar })
    }

    pub fn finish(&self, years_written: usize) {
        self.bar
            .finish_with_message(format!("done, {} years written", years_written));
    }

    pub fn abandon(&self, reason: &str) {
        self.bar.abandon_with_message(reason.to_string());
    }
}

impl ProgressObserver for ProgressReporter {
    fn throttled(&self, wait: Duration, context: &str) {
        self.bar
            .set_message(format!("rate limited at {}, waiting {}s", context, wait.as_secs()));
    }

    fn countdown(&self, remaining_secs: u64, context: &str) {
        self.bar
            .set_message(format!("rate limited at {}, resuming in {}s", context, remaining_secs));
    }

    fn resumed(&self, context: &str) {
        self.bar.set_message(format!("resuming {}", context));
    }

    fn page_fetched(&self, context: &str, _page: usize, records: usize) {
        self.bar.set_message(format!("{} ({} records)", context, records));
    }

    fn year_started(&self, year: i32, statistic: Statistic) {
        self.bar.set_message(format!("{} {}", statistic, year));
    }

    fn launch_walked(&self, year: i32, done: usize, total: usize) {
        self.bar
            .set_message(format!("{}: launch {}/{}", year, done, total));
    }

    fn year_finished(&self, summary: &YearlySummary) {
        self.bar.println(summary.to_string());
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discosweb_lib::LaunchCounts;

    #[test]
    fn test_year_finished_advances_bar() {
        let reporter = ProgressReporter::new(3).unwrap();
        reporter.bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        reporter.year_started(2020, Statistic::Launches);
        reporter.year_finished(&YearlySummary::Launches(LaunchCounts::new(2020)));
        assert_eq!(reporter.bar.position(), 1);
        reporter.countdown(4, "2021 launches page 1");
        assert_eq!(
            reporter.bar.message(),
            "rate limited at 2021 launches page 1, resuming in 4s"
        );
    }
}
