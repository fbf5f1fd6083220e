use url::Url;

use super::common::{Query, QueryCommon, SortKey};

/// Query against `/launch-vehicles/{id}/stages`, sorted by id.
#[derive(Clone, Debug, PartialEq)]
pub struct StageQuery {
    pub common: QueryCommon,
}

impl Default for StageQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon::sorted_by(SortKey::Id),
        }
    }
}

impl Query for StageQuery {
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
