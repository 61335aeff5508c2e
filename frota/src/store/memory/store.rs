use super::InMemoryCollection;
use crate::common::validate_collection_name;
use crate::config::StoreConfig;
use crate::errors::FrotaResult;
use crate::store::{DocumentCollection, DocumentStore, DocumentStoreProvider};
use bson::Document;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

pub(crate) type CollectionData = Arc<RwLock<Vec<Document>>>;

/// In-memory implementation of a document store.
///
/// # Purpose
/// `InMemoryStore` keeps every collection in process memory and evaluates
/// filters itself, following MongoDB's matching rules for the operators the
/// filter DSL supports. It backs unit tests and any tooling that needs a
/// store without a server.
///
/// # Characteristics
/// - **Thread-Safe**: collections live in a `DashMap`, each behind its own `RwLock`
/// - **Ordered**: documents are returned in insertion order
/// - **No Persistence**: all data is lost when the last handle is dropped
///
/// # Usage
/// ```rust
/// use frota::bson::doc;
/// use frota::config::StoreConfig;
/// use frota::store::InMemoryStore;
///
/// let store = InMemoryStore::open(&StoreConfig::default());
/// let loans = store.collection("Loan").unwrap();
/// loans.insert_one(doc! { "code": 1 }).unwrap();
/// assert_eq!(loans.count().unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    /// Creates an in-memory store for the database named in the configuration.
    ///
    /// Connection settings in the configuration are ignored.
    pub fn new(config: &StoreConfig) -> InMemoryStore {
        InMemoryStore {
            inner: Arc::new(InMemoryStoreInner::new(config.database())),
        }
    }

    /// Creates an in-memory store and wraps it as a [DocumentStore].
    pub fn open(config: &StoreConfig) -> DocumentStore {
        log::debug!("Opening in-memory store for database {}", config.database());
        DocumentStore::new(InMemoryStore::new(config))
    }

    /// Same as [InMemoryStore::open] with the default configuration.
    pub fn open_default() -> DocumentStore {
        InMemoryStore::open(&StoreConfig::default())
    }
}

impl DocumentStoreProvider for InMemoryStore {
    fn database_name(&self) -> String {
        self.inner.database.clone()
    }

    fn collection(&self, name: &str) -> FrotaResult<DocumentCollection> {
        validate_collection_name(name)?;
        Ok(DocumentCollection::new(InMemoryCollection::new(
            name,
            self.inner.collections.clone(),
        )))
    }

    fn collection_names(&self) -> FrotaResult<Vec<String>> {
        let mut names: Vec<String> = self
            .inner
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn drop_database(&self) -> FrotaResult<()> {
        log::debug!("Dropping in-memory database {}", self.inner.database);
        self.inner.collections.clear();
        Ok(())
    }
}

struct InMemoryStoreInner {
    database: String,
    collections: Arc<DashMap<String, CollectionData>>,
}

impl InMemoryStoreInner {
    fn new(database: &str) -> InMemoryStoreInner {
        InMemoryStoreInner {
            database: database.to_string(),
            collections: Arc::new(DashMap::new()),
        }
    }
}
