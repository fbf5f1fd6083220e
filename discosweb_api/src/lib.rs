mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{
    Cursor, Filter, FilterValue, LaunchQuery, ObjectQuery, Query, QueryCommon, SortKey, StageQuery,
};
