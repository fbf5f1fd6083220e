//! Per-year accumulators and the finalized [`YearlySummary`].

use std::fmt;
use std::str::FromStr;

use discosweb_api::types::{LaunchOutcome, StageAttributes};
use serde::{Deserialize, Serialize};

/// Which statistic a run computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Launches,
    Payloads,
    Propellant,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Launches => write!(f, "launches"),
            Statistic::Payloads => write!(f, "payloads"),
            Statistic::Propellant => write!(f, "propellant"),
        }
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "launches" => Ok(Statistic::Launches),
            "payloads" => Ok(Statistic::Payloads),
            "propellant" => Ok(Statistic::Propellant),
            other => Err(format!(
                "unknown statistic '{}'. Valid values: launches, payloads, propellant",
                other
            )),
        }
    }
}

/// Successful / failed launch counts for one year.
///
/// `unknown` counts launches whose `failure` flag is neither true nor false;
/// they are excluded from both other counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchCounts {
    pub year: i32,
    pub successful: u64,
    pub failed: u64,
    pub unknown: u64,
}

impl LaunchCounts {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: LaunchOutcome) {
        match outcome {
            LaunchOutcome::Success => self.successful += 1,
            LaunchOutcome::Failure => self.failed += 1,
            LaunchOutcome::Unknown => self.unknown += 1,
        }
    }
}

/// Payloads placed in orbit by the successful launches of one year.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadCounts {
    pub year: i32,
    /// Successful launches whose objects were walked.
    pub launches: u64,
    pub payloads: u64,
    /// Launches abandoned after a rejected request.
    pub skipped_launches: u64,
}

impl PayloadCounts {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    pub fn add_launch(&mut self, payloads: usize) {
        self.launches += 1;
        self.payloads += payloads as u64;
    }

    pub fn skip_launch(&mut self) {
        self.skipped_launches += 1;
    }
}

/// Propellant carried by the stages of one year's successful launches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropellantTotals {
    pub year: i32,
    pub fuel: f64,
    pub oxidiser: f64,
    pub solid: f64,
    pub launches: u64,
    pub stages: u64,
    pub skipped_launches: u64,
}

impl PropellantTotals {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// Adds one stage. Null masses contribute nothing.
    pub fn add_stage(&mut self, stage: &StageAttributes) {
        self.fuel += mass(stage.fuel_mass, "fuelMass");
        self.oxidiser += mass(stage.oxidiser_mass, "oxidiserMass");
        self.solid += mass(stage.solid_propellant_mass, "solidPropellantMass");
        self.stages += 1;
    }

    pub fn add_launch<'a>(&mut self, stages: impl IntoIterator<Item = &'a StageAttributes>) {
        for stage in stages {
            self.add_stage(stage);
        }
        self.launches += 1;
    }

    pub fn skip_launch(&mut self) {
        self.skipped_launches += 1;
    }

    pub fn total(&self) -> f64 {
        self.fuel + self.oxidiser + self.solid
    }
}

fn mass(value: Option<f64>, field: &str) -> f64 {
    match value {
        None => 0.0,
        Some(m) if m.is_finite() && m >= 0.0 => m,
        Some(m) => {
            tracing::warn!("Ignoring invalid {} value {}", field, m);
            0.0
        }
    }
}

/// The finalized statistic for one calendar year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "statistic", rename_all = "lowercase")]
pub enum YearlySummary {
    Launches(LaunchCounts),
    Payloads(PayloadCounts),
    Propellant(PropellantTotals),
}

impl YearlySummary {
    pub fn year(&self) -> i32 {
        match self {
            Self::Launches(c) => c.year,
            Self::Payloads(c) => c.year,
            Self::Propellant(t) => t.year,
        }
    }

    pub fn statistic(&self) -> Statistic {
        match self {
            Self::Launches(_) => Statistic::Launches,
            Self::Payloads(_) => Statistic::Payloads,
            Self::Propellant(_) => Statistic::Propellant,
        }
    }
}

/// Human-readable sentence for the year.
impl fmt::Display for YearlySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launches(c) => write!(
                f,
                "In {}, there were {} successful launches and {} unsuccessful launches.",
                c.year, c.successful, c.failed
            ),
            Self::Payloads(c) => write!(
                f,
                "In {}, {} payloads were launched on {} successful launches.",
                c.year, c.payloads, c.launches
            ),
            Self::Propellant(t) => write!(
                f,
                "In {}, {} successful launches carried {} kg of propellant ({} fuel, {} oxidiser, {} solid).",
                t.year,
                t.launches,
                t.total(),
                t.fuel,
                t.oxidiser,
                t.solid
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(fuel: Option<f64>, oxidiser: Option<f64>, solid: Option<f64>) -> StageAttributes {
        StageAttributes {
            fuel_mass: fuel,
            oxidiser_mass: oxidiser,
            solid_propellant_mass: solid,
            ..Default::default()
        }
    }

    #[test]
    fn null_masses_count_as_zero() {
        let stages = [
            stage(None, Some(5.0), None),
            stage(Some(2.0), None, Some(1.0)),
        ];
        let mut totals = PropellantTotals::new(2022);
        totals.add_launch(stages.iter());

        assert_eq!(totals.fuel, 2.0);
        assert_eq!(totals.oxidiser, 5.0);
        assert_eq!(totals.solid, 1.0);
        assert_eq!(totals.total(), 8.0);
        assert_eq!(totals.stages, 2);
        assert_eq!(totals.launches, 1);
    }

    #[test]
    fn negative_masses_never_decrease_totals() {
        let mut totals = PropellantTotals::new(2022);
        totals.add_stage(&stage(Some(10.0), None, None));
        totals.add_stage(&stage(Some(-4.0), Some(f64::NAN), None));
        assert_eq!(totals.fuel, 10.0);
        assert_eq!(totals.oxidiser, 0.0);
    }

    #[test]
    fn tri_state_outcomes() {
        let mut counts = LaunchCounts::new(2022);
        for outcome in [
            LaunchOutcome::Failure,
            LaunchOutcome::Success,
            LaunchOutcome::Unknown,
        ] {
            counts.record(outcome);
        }
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.successful, 1);
        assert_eq!(counts.unknown, 1);
    }

    #[test]
    fn launch_sentence() {
        let summary = YearlySummary::Launches(LaunchCounts {
            year: 2022,
            successful: 180,
            failed: 8,
            unknown: 0,
        });
        assert_eq!(
            summary.to_string(),
            "In 2022, there were 180 successful launches and 8 unsuccessful launches."
        );
        assert_eq!(summary.year(), 2022);
        assert_eq!(summary.statistic(), Statistic::Launches);
    }

    #[test]
    fn payload_sentence() {
        let mut counts = PayloadCounts::new(2021);
        counts.add_launch(3);
        counts.add_launch(0);
        counts.skip_launch();
        assert_eq!(
            YearlySummary::Payloads(counts).to_string(),
            "In 2021, 3 payloads were launched on 2 successful launches."
        );
    }

    #[test]
    fn summary_serializes_with_tag() {
        let summary = YearlySummary::Payloads(PayloadCounts::new(2020));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["statistic"], "payloads");
        assert_eq!(json["year"], 2020);
    }

    #[test]
    fn statistic_parses() {
        assert_eq!("Propellant".parse::<Statistic>(), Ok(Statistic::Propellant));
        assert!("fuel".parse::<Statistic>().is_err());
    }
}
