use serde::{Deserialize, Serialize};

use super::SortFields;

/// Attributes of a `launch-vehicle` resource.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleAttributes {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub successful_launches: Option<i64>,

    #[serde(default)]
    pub failed_launches: Option<i64>,
}

impl SortFields for VehicleAttributes {}

/// Attributes of a launch-vehicle stage. Every mass is independently nullable.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StageAttributes {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub fuel_mass: Option<f64>,

    #[serde(default)]
    pub oxidiser_mass: Option<f64>,

    #[serde(default)]
    pub solid_propellant_mass: Option<f64>,

    #[serde(default)]
    pub dry_mass: Option<f64>,
}

impl SortFields for StageAttributes {}
