use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record kind that can be stored by a [Repository](super::Repository).
///
/// # Purpose
/// Binds a Rust type to the collection that holds it. The entity name is a
/// stable, registered identifier rather than the Rust type path, so moving or
/// renaming the type does not move its data.
///
/// # Characteristics
/// - Records map to documents through serde (`bson::to_document` / `bson::from_document`)
/// - Fields the record does not declare, like the store's `_id`, are ignored on read
/// - Two repositories for the same entity resolve to the same collection
///
/// # Usage
/// ```rust
/// use frota::repository::Entity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Driver {
///     code: i64,
///     name: String,
/// }
///
/// impl Entity for Driver {
///     fn entity_name() -> &'static str {
///         "Driver"
///     }
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Returns the registered name of the entity, used as its collection name.
    fn entity_name() -> &'static str;
}
