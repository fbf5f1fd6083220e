//! The small filter expression language accepted by the `filter` parameter.
//!
//! Comparisons are written `op(field,value)` and combined with `&`, e.g.
//! `ge(epoch,epoch:'2022-01-01')&lt(epoch,epoch:'2023-01-01')`.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Right-hand side of a comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Int(u64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::Str(s) => write!(f, "'{}'", s),
            FilterValue::Date(d) => write!(f, "epoch:'{}'", d.format("%Y-%m-%d")),
            FilterValue::DateTime(dt) => {
                write!(f, "epoch:'{}+00:00'", dt.format("%Y-%m-%dT%H:%M:%S"))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Ge(String, FilterValue),
    Lt(String, FilterValue),
    Eq(String, FilterValue),
    And(Vec<Filter>),
}

impl Filter {
    pub fn ge(field: &str, value: FilterValue) -> Self {
        Filter::Ge(field.to_string(), value)
    }

    pub fn lt(field: &str, value: FilterValue) -> Self {
        Filter::Lt(field.to_string(), value)
    }

    pub fn eq(field: &str, value: FilterValue) -> Self {
        Filter::Eq(field.to_string(), value)
    }

    /// Combines this filter with another using `&`, flattening nested conjunctions.
    pub fn and(self, other: Filter) -> Self {
        let mut parts = match self {
            Filter::And(parts) => parts,
            single => vec![single],
        };
        match other {
            Filter::And(more) => parts.extend(more),
            single => parts.push(single),
        }
        Filter::And(parts)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Ge(field, value) => write!(f, "ge({},{})", field, value),
            Filter::Lt(field, value) => write!(f, "lt({},{})", field, value),
            Filter::Eq(field, value) => write!(f, "eq({},{})", field, value),
            Filter::And(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, "&")?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}
