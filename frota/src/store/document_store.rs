use crate::errors::FrotaResult;
use crate::store::DocumentCollection;
use std::ops::Deref;
use std::sync::Arc;

/// Interface of a document database holding named collections.
///
/// # Purpose
/// Defines the contract every backing store follows. Repositories only ever
/// talk to a store through this trait, so the same repository code runs
/// against MongoDB and against the in-memory store used in tests.
///
/// # Implementations
/// - `InMemoryStore`: process-local storage for tests and tooling
/// - `MongoStore`: the `frota_mongodb_adapter` crate, backed by a MongoDB server
///
/// # Thread Safety
/// Implementers must be `Send + Sync` for safe use in concurrent contexts.
pub trait DocumentStoreProvider: Send + Sync {
    /// Name of the logical database this store reads and writes.
    fn database_name(&self) -> String;

    /// Opens a handle on a named collection.
    ///
    /// A collection that does not exist yet reads as empty and is created by
    /// its first insert.
    ///
    /// # Arguments
    /// * `name` - The collection name
    ///
    /// # Returns
    /// * `Ok(DocumentCollection)` for a valid name
    /// * `Err(FrotaError)` with `ValidationError` if the name is not acceptable
    fn collection(&self, name: &str) -> FrotaResult<DocumentCollection>;

    /// Lists the names of the collections present in the database.
    fn collection_names(&self) -> FrotaResult<Vec<String>>;

    /// Removes the whole database with every collection in it.
    fn drop_database(&self) -> FrotaResult<()>;
}

/// A cloneable handle to a document store.
///
/// Wraps any [DocumentStoreProvider] in an `Arc`, so cloning is cheap and the
/// same store can be shared by every repository built from it.
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<dyn DocumentStoreProvider>,
}

impl DocumentStore {
    /// Creates a new `DocumentStore` wrapping a provider implementation.
    pub fn new<T: DocumentStoreProvider + 'static>(inner: T) -> Self {
        DocumentStore { inner: Arc::new(inner) }
    }
}

impl Deref for DocumentStore {
    type Target = Arc<dyn DocumentStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, FrotaError};
    use crate::store::InMemoryStore;

    struct UnreachableStore;

    impl DocumentStoreProvider for UnreachableStore {
        fn database_name(&self) -> String {
            "nowhere".to_string()
        }

        fn collection(&self, _name: &str) -> FrotaResult<DocumentCollection> {
            Err(FrotaError::new("store unreachable", ErrorKind::ConnectionError))
        }

        fn collection_names(&self) -> FrotaResult<Vec<String>> {
            Err(FrotaError::new("store unreachable", ErrorKind::ConnectionError))
        }

        fn drop_database(&self) -> FrotaResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_store_delegates_to_provider() {
        let store = DocumentStore::new(UnreachableStore);
        assert_eq!(store.database_name(), "nowhere");
        let err = store.collection("Loan").err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::ConnectionError);
    }

    #[test]
    fn test_clones_share_the_same_provider() {
        let store = InMemoryStore::open_default();
        let other = store.clone();
        let collection = store.collection("Loan").unwrap();
        collection.insert_one(bson::doc! { "code": 1 }).unwrap();
        assert_eq!(other.collection("Loan").unwrap().count().unwrap(), 1);
    }
}
