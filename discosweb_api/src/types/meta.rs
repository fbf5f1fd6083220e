use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A single resource object as returned in a `data` array or member.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record<A> {
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    pub attributes: A,

    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl<A> Record<A> {
    /// Parses the string identifier as an unsigned integer.
    pub fn numeric_id(&self) -> Result<u64, Error> {
        self.id
            .parse::<u64>()
            .map_err(|_| Error::InvalidCursor(format!("non-numeric id {:?}", self.id)))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Relationship {
    #[serde(default)]
    pub links: Option<RelationshipLinks>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RelationshipLinks {
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub related: Option<String>,
}

/// One page of a collection endpoint: `{"data": [...]}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// A singular endpoint whose member may be absent: `{"data": null}`,
/// `{"data": []}` and `{"data": {...}}` are all accepted.
#[derive(Serialize, Deserialize, Debug)]
pub struct OptionalResponse<T> {
    #[serde(
        deserialize_with = "one_or_none",
        bound(deserialize = "T: serde::de::DeserializeOwned")
    )]
    pub data: Option<T>,
}

fn one_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    use serde::de::Error as _;

    let value = serde_json::Value::deserialize(deserializer)?;
    let member = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Array(mut items) => match items.len() {
            0 => return Ok(None),
            1 => items.remove(0),
            n => {
                return Err(D::Error::custom(format!(
                    "expected at most one member, got {}",
                    n
                )))
            }
        },
        other => other,
    };
    serde_json::from_value(member).map(Some).map_err(D::Error::custom)
}
