//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields,
//! [`SortKey`] and the pagination [`Cursor`].

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use url::Url;

use crate::types::{Record, SortFields};
use crate::Error;

use super::filter::{Filter, FilterValue};

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for filtering, sorting and cursor rewriting.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Returns the common query fields.
    fn common(&self) -> &QueryCommon;

    /// Adds a filter that every page of this query must satisfy.
    fn with_filter(mut self, filter: Filter) -> Self
    where
        Self: Sized,
    {
        self.get_common().filters.push(filter);
        self
    }

    /// Sets the inclusive lower bound on the sort field.
    fn with_lower_bound(mut self, value: FilterValue) -> Self
    where
        Self: Sized,
    {
        self.get_common().lower_bound = Some(value);
        self
    }

    /// Restarts the query at `cursor`, replacing any previous lower bound.
    /// The remaining filters are left untouched.
    fn with_cursor(self, cursor: Cursor) -> Self
    where
        Self: Sized,
    {
        self.with_lower_bound(cursor.into_value())
    }

    fn sort_key(&self) -> SortKey {
        self.common().sort
    }

    /// The current lower bound expressed as a cursor, if one is set.
    fn cursor(&self) -> Option<Cursor> {
        self.common()
            .lower_bound
            .as_ref()
            .and_then(Cursor::from_value)
    }
}

/// Field a query is sorted on (always ascending).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Epoch,
    Id,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Epoch => write!(f, "epoch"),
            SortKey::Id => write!(f, "id"),
        }
    }
}

/// Position from which the next page starts (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Cursor {
    Epoch(NaiveDateTime),
    Id(u64),
}

impl Cursor {
    /// Step added to the last epoch of a full page.
    pub const EPOCH_EPSILON_SECS: i64 = 1;

    /// Derives the cursor that starts strictly after `record`.
    ///
    /// Epochs are truncated to whole seconds before the epsilon is added, so
    /// two records within the same second of a page boundary cannot both be
    /// reached.
    pub fn after<A: SortFields>(sort: SortKey, record: &Record<A>) -> Result<Cursor, Error> {
        match sort {
            SortKey::Id => {
                let id = record.numeric_id()?;
                id.checked_add(1)
                    .map(Cursor::Id)
                    .ok_or_else(|| Error::InvalidCursor(format!("id {} overflows", id)))
            }
            SortKey::Epoch => {
                let epoch = parse_epoch(record.attributes.epoch().ok_or_else(|| {
                    Error::InvalidCursor(format!("record {} has no epoch", record.id))
                })?)?;
                Ok(Cursor::Epoch(
                    epoch + chrono::Duration::seconds(Self::EPOCH_EPSILON_SECS),
                ))
            }
        }
    }

    fn from_value(value: &FilterValue) -> Option<Cursor> {
        match value {
            FilterValue::Int(n) => Some(Cursor::Id(*n)),
            FilterValue::Date(d) => Some(Cursor::Epoch(d.and_time(NaiveTime::MIN))),
            FilterValue::DateTime(dt) => Some(Cursor::Epoch(*dt)),
            FilterValue::Str(_) => None,
        }
    }

    fn into_value(self) -> FilterValue {
        match self {
            Cursor::Epoch(dt) => FilterValue::DateTime(dt),
            Cursor::Id(n) => FilterValue::Int(n),
        }
    }
}

/// Parses the leading `YYYY-MM-DDTHH:MM:SS` of an epoch attribute,
/// ignoring fractional seconds and offset.
pub(crate) fn parse_epoch(raw: &str) -> Result<NaiveDateTime, Error> {
    let head = raw
        .get(..19)
        .ok_or_else(|| Error::InvalidCursor(format!("epoch too short: {:?}", raw)))?;
    NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| Error::InvalidCursor(format!("epoch {:?}: {}", raw, e)))
}

/// Fields shared by all query types.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryCommon {
    /// Ascending sort field; also the field the lower bound applies to.
    pub sort: SortKey,
    /// Inclusive lower bound on the sort field. Rewritten by cursors.
    pub lower_bound: Option<FilterValue>,
    /// Filters that stay fixed across pages.
    pub filters: Vec<Filter>,
}

impl QueryCommon {
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            sort,
            lower_bound: None,
            filters: Vec::new(),
        }
    }

    /// The complete filter expression, lower bound first.
    pub fn filter(&self) -> Option<Filter> {
        let bound = self
            .lower_bound
            .clone()
            .map(|value| Filter::Ge(self.sort.to_string(), value));
        bound
            .into_iter()
            .chain(self.filters.iter().cloned())
            .reduce(Filter::and)
    }

    /// Appends the `filter` and `sort` parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(filter) = self.filter() {
            url.query_pairs_mut()
                .append_pair("filter", &filter.to_string());
        }
        url.query_pairs_mut()
            .append_pair("sort", &self.sort.to_string());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LaunchAttributes;
    use chrono::NaiveDate;

    fn launch(id: &str, epoch: Option<&str>) -> Record<LaunchAttributes> {
        Record {
            id: id.to_string(),
            kind: Some("launch".to_string()),
            attributes: LaunchAttributes {
                epoch: epoch.map(str::to_string),
                ..Default::default()
            },
            relationships: Default::default(),
        }
    }

    #[test]
    fn epoch_cursor_adds_one_second() {
        let cursor = Cursor::after(
            SortKey::Epoch,
            &launch("7", Some("2022-03-01T23:59:59.250000+00:00")),
        )
        .unwrap();
        let expected = NaiveDate::from_ymd_opt(2022, 3, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(cursor, Cursor::Epoch(expected));
    }

    #[test]
    fn id_cursor_adds_one() {
        let cursor = Cursor::after(SortKey::Id, &launch("41", None)).unwrap();
        assert_eq!(cursor, Cursor::Id(42));
    }

    #[test]
    fn missing_epoch_is_an_error() {
        let err = Cursor::after(SortKey::Epoch, &launch("1", None)).unwrap_err();
        assert!(matches!(err, Error::InvalidCursor(_)));
    }

    #[test]
    fn non_numeric_id_is_an_error() {
        assert!(Cursor::after(SortKey::Id, &launch("abc", None)).is_err());
    }

    #[test]
    fn date_bound_reads_back_as_midnight_cursor() {
        let day = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let cursor = Cursor::from_value(&FilterValue::Date(day)).unwrap();
        assert_eq!(cursor, Cursor::Epoch(day.and_time(NaiveTime::MIN)));
        assert!(Cursor::from_value(&FilterValue::Str("x".into())).is_none());
    }
}
