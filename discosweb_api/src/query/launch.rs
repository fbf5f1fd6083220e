use chrono::NaiveDate;
use url::Url;

use super::common::{Query, QueryCommon, SortKey};
use super::filter::{Filter, FilterValue};

/// Query against `/launches`, sorted by epoch.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchQuery {
    pub common: QueryCommon,
}

impl Default for LaunchQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon::sorted_by(SortKey::Epoch),
        }
    }
}

impl Query for LaunchQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

impl LaunchQuery {
    /// Launches with `start <= epoch < end`.
    pub fn with_epoch_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.with_lower_bound(FilterValue::Date(start))
            .with_filter(Filter::lt("epoch", FilterValue::Date(end)))
    }

    /// Launches within one calendar year. Years outside chrono's range yield
    /// an unbounded query; callers validate years beforehand.
    pub fn with_year(self, year: i32) -> Self {
        match (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year + 1, 1, 1),
        ) {
            (Some(start), Some(end)) => self.with_epoch_range(start, end),
            _ => self,
        }
    }
}
