mod common;
pub use self::common::{Cursor, Query, QueryCommon, SortKey};

mod filter;
pub use self::filter::{Filter, FilterValue};

mod launch;
pub use self::launch::LaunchQuery;

mod object;
pub use self::object::ObjectQuery;

mod stage;
pub use self::stage::StageQuery;
