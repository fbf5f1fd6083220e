//! Yearly statistics over the launch registry.
//!
//! Years are processed strictly in order, one request at a time. Each
//! finalized year goes to the [`SummarySink`] before the next year starts,
//! so an interrupted run keeps everything finished so far.

use std::ops::RangeInclusive;
use std::sync::Arc;

use discosweb_api::types::{LaunchAttributes, LaunchOutcome, Record};
use discosweb_api::LaunchQuery;

use crate::client::ThrottledClient;
use crate::error::DiscosError;
use crate::observer::ProgressObserver;
use crate::summary::{LaunchCounts, PayloadCounts, PropellantTotals, Statistic, YearlySummary};
use crate::walker::GraphWalker;

/// Destination for finalized yearly summaries.
pub trait SummarySink {
    fn write(&mut self, summary: &YearlySummary) -> Result<(), DiscosError>;
}

impl SummarySink for Vec<YearlySummary> {
    fn write(&mut self, summary: &YearlySummary) -> Result<(), DiscosError> {
        self.push(summary.clone());
        Ok(())
    }
}

pub struct Aggregator<'a> {
    client: &'a ThrottledClient,
    walker: GraphWalker<'a>,
    observer: Arc<dyn ProgressObserver>,
}

impl<'a> Aggregator<'a> {
    /// Reports progress to the governor's observer.
    pub fn new(client: &'a ThrottledClient) -> Self {
        Self {
            client,
            walker: GraphWalker::new(client),
            observer: Arc::clone(client.governor().observer()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.walker = GraphWalker::new(self.client).with_page_size(page_size);
        self
    }

    /// Computes `statistic` for every year in `years`.
    ///
    /// A year whose launch listing is rejected by the server, or cannot be
    /// paged past a record without a sort value, is logged and left out; the
    /// returned vector holds only the years that were written.
    pub async fn run(
        &self,
        statistic: Statistic,
        years: RangeInclusive<i32>,
        sink: &mut dyn SummarySink,
    ) -> Result<Vec<YearlySummary>, DiscosError> {
        let mut written = Vec::new();
        for year in years {
            self.observer.year_started(year, statistic);
            let summary = match self.summarize_year(statistic, year).await {
                Ok(summary) => summary,
                Err(e) if e.is_skippable() => {
                    tracing::warn!("Skipping {}: launch listing failed: {}", year, e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            sink.write(&summary)?;
            self.observer.year_finished(&summary);
            tracing::info!("{}", summary);
            written.push(summary);
        }
        Ok(written)
    }

    /// Computes `statistic` for a single year.
    ///
    /// Skippable errors while walking one launch are absorbed and counted as
    /// skipped; one on the year's launch listing is returned.
    pub async fn summarize_year(
        &self,
        statistic: Statistic,
        year: i32,
    ) -> Result<YearlySummary, DiscosError> {
        let launches = self
            .walker
            .launches(LaunchQuery::default().with_year(year), &year.to_string())
            .await?;
        tracing::debug!("{} launches listed for {}", launches.len(), year);

        let counts = classify(year, &launches);
        let summary = match statistic {
            Statistic::Launches => YearlySummary::Launches(counts),
            Statistic::Payloads => YearlySummary::Payloads(self.payloads(year, &launches).await?),
            Statistic::Propellant => {
                YearlySummary::Propellant(self.propellant(year, &launches).await?)
            }
        };
        Ok(summary)
    }

    async fn payloads(
        &self,
        year: i32,
        launches: &[Record<LaunchAttributes>],
    ) -> Result<PayloadCounts, DiscosError> {
        let successful = successful(launches);
        let mut counts = PayloadCounts::new(year);
        for (i, launch) in successful.iter().enumerate() {
            match self.walker.payloads(&launch.id).await {
                Ok(payloads) => counts.add_launch(payloads.len()),
                Err(e) if e.is_skippable() => {
                    tracing::warn!("Skipping payloads of launch {}: {}", launch.id, e);
                    counts.skip_launch();
                }
                Err(e) => return Err(e),
            }
            self.observer.launch_walked(year, i + 1, successful.len());
        }
        Ok(counts)
    }

    async fn propellant(
        &self,
        year: i32,
        launches: &[Record<LaunchAttributes>],
    ) -> Result<PropellantTotals, DiscosError> {
        let successful = successful(launches);
        let mut totals = PropellantTotals::new(year);
        for (i, launch) in successful.iter().enumerate() {
            match self.walker.stages(&launch.id).await {
                Ok(stages) => totals.add_launch(stages.iter().map(|s| &s.attributes)),
                Err(e) if e.is_skippable() => {
                    tracing::warn!("Skipping stages of launch {}: {}", launch.id, e);
                    totals.skip_launch();
                }
                Err(e) => return Err(e),
            }
            self.observer.launch_walked(year, i + 1, successful.len());
        }
        Ok(totals)
    }
}

/// Tri-state tally of launch outcomes. Anything but a boolean `failure` is
/// flagged and kept out of both the successful and failed counts.
fn classify(year: i32, launches: &[Record<LaunchAttributes>]) -> LaunchCounts {
    let mut counts = LaunchCounts::new(year);
    for launch in launches {
        let outcome = launch.attributes.outcome();
        if outcome == LaunchOutcome::Unknown {
            tracing::warn!(
                "Launch {} has no usable failure flag ({}); counted as unknown",
                launch.id,
                launch.attributes.failure
            );
        }
        counts.record(outcome);
    }
    counts
}

fn successful(launches: &[Record<LaunchAttributes>]) -> Vec<&Record<LaunchAttributes>> {
    launches
        .iter()
        .filter(|l| l.attributes.outcome() == LaunchOutcome::Success)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn launch(id: &str, failure: serde_json::Value) -> Record<LaunchAttributes> {
        serde_json::from_value(json!({
            "id": id,
            "attributes": { "epoch": "2022-03-01T10:00:00+00:00", "failure": failure }
        }))
        .unwrap()
    }

    #[test]
    fn classify_is_tri_state() {
        let launches = vec![
            launch("1", json!(true)),
            launch("2", json!(false)),
            launch("3", json!(null)),
        ];
        let counts = classify(2022, &launches);
        assert_eq!(
            counts,
            LaunchCounts {
                year: 2022,
                successful: 1,
                failed: 1,
                unknown: 1,
            }
        );
    }

    #[test]
    fn only_successful_launches_are_walked() {
        let launches = vec![
            launch("1", json!(true)),
            launch("2", json!(false)),
            launch("3", json!("yes")),
            launch("4", json!(false)),
        ];
        let ids: Vec<_> = successful(&launches).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<YearlySummary> = Vec::new();
        sink.write(&YearlySummary::Launches(LaunchCounts::new(2020)))
            .unwrap();
        sink.write(&YearlySummary::Launches(LaunchCounts::new(2021)))
            .unwrap();
        let years: Vec<_> = sink.iter().map(YearlySummary::year).collect();
        assert_eq!(years, vec![2020, 2021]);
    }
}
