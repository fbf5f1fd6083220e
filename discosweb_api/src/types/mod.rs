mod meta;
pub use self::meta::{ListResponse, OptionalResponse, Record, Relationship, RelationshipLinks};

mod launch;
pub use self::launch::{LaunchAttributes, LaunchOutcome};

mod object;
pub use self::object::{ObjectAttributes, ObjectClass};

mod vehicle;
pub use self::vehicle::{StageAttributes, VehicleAttributes};

mod rate_limit;
pub use self::rate_limit::RateLimitState;

/// Sort-key values an attribute type exposes for cursor derivation.
///
/// Identifier cursors come from [`Record::id`]; only time-ordered resources
/// need to override [`SortFields::epoch`].
pub trait SortFields {
    fn epoch(&self) -> Option<&str> {
        None
    }
}
