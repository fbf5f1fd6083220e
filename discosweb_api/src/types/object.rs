use std::fmt;

use serde::{Deserialize, Serialize};

use super::SortFields;

/// Attributes of an `object` resource (satellites, rocket bodies, debris).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAttributes {
    #[serde(default)]
    pub object_class: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub cospar_id: Option<String>,

    #[serde(default)]
    pub satno: Option<i64>,

    #[serde(default)]
    pub mass: Option<f64>,
}

impl SortFields for ObjectAttributes {}

/// Values of the `objectClass` attribute that the tool filters on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectClass {
    Payload,
    RocketBody,
    Other(String),
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectClass::Payload => write!(f, "Payload"),
            ObjectClass::RocketBody => write!(f, "Rocket Body"),
            ObjectClass::Other(class) => write!(f, "{}", class),
        }
    }
}
