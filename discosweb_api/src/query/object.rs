use url::Url;

use crate::types::ObjectClass;

use super::common::{Query, QueryCommon, SortKey};
use super::filter::{Filter, FilterValue};

/// Query against `/launches/{id}/objects`, sorted by id.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectQuery {
    pub common: QueryCommon,
}

impl Default for ObjectQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon::sorted_by(SortKey::Id),
        }
    }
}

impl Query for ObjectQuery {
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

impl ObjectQuery {
    pub fn with_object_class(self, class: &ObjectClass) -> Self {
        self.with_filter(Filter::eq(
            "objectClass",
            FilterValue::Str(class.to_string()),
        ))
    }
}
