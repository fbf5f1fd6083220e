use serde::{Deserialize, Serialize};

use super::SortFields;

/// Attributes of a `launch` resource.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAttributes {
    #[serde(default)]
    pub epoch: Option<String>,

    #[serde(default)]
    pub flight_no: Option<String>,

    #[serde(default)]
    pub cospar_launch_no: Option<String>,

    /// Kept as raw JSON: the registry occasionally carries `null` or other
    /// non-boolean values here.
    #[serde(default)]
    pub failure: serde_json::Value,
}

/// Tri-state reading of [`LaunchAttributes::failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Success,
    Failure,
    Unknown,
}

impl LaunchAttributes {
    pub fn outcome(&self) -> LaunchOutcome {
        match self.failure {
            serde_json::Value::Bool(true) => LaunchOutcome::Failure,
            serde_json::Value::Bool(false) => LaunchOutcome::Success,
            _ => LaunchOutcome::Unknown,
        }
    }
}

impl SortFields for LaunchAttributes {
    fn epoch(&self) -> Option<&str> {
        self.epoch.as_deref()
    }
}
