use super::Entity;
use crate::common::repository_name;
use crate::errors::{FrotaError, FrotaResult};
use crate::filter::{all, and, field, Filter};
use crate::store::{DocumentCollection, DocumentStore, WriteResult};
use bson::{Bson, Document};
use std::marker::PhantomData;

/// Typed CRUD and query access to the collection of one entity.
///
/// # Purpose
/// `Repository<T>` maps records of type `T` to documents of a single
/// collection and exposes the operations application code needs without any
/// per-entity query code. Every operation is one synchronous request to the
/// underlying [DocumentStore].
///
/// # Characteristics
/// - **Cheap to clone**: holds a store handle and a collection handle
/// - **Thread-Safe**: `Send + Sync`, safe to share across threads
/// - **Misses are not errors**: lookups return `None`, queries an empty `Vec`
///
/// # Usage
/// ```rust
/// use frota::repository::{Entity, Repository};
/// use frota::store::InMemoryStore;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
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
///
/// let store = InMemoryStore::open_default();
/// let drivers = Repository::<Driver>::new(&store).unwrap();
/// drivers.insert(&Driver { code: 1, name: "Ana".to_string() }).unwrap();
///
/// let found = drivers.find_by_key("code", 1).unwrap();
/// assert_eq!(found.map(|d| d.name), Some("Ana".to_string()));
/// ```
pub struct Repository<T: Entity> {
    store: DocumentStore,
    collection: DocumentCollection,
    collection_name: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            store: self.store.clone(),
            collection: self.collection.clone(),
            collection_name: self.collection_name.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    /// Opens the repository on the collection named after `T::entity_name()`.
    pub fn new(store: &DocumentStore) -> FrotaResult<Self> {
        let name = repository_name(T::entity_name(), None)?;
        Self::with_collection_name(store, &name)
    }

    /// Opens a keyed repository, stored in the collection `"{entity}+{key}"`.
    ///
    /// Keyed repositories of the same entity are independent of each other
    /// and of the unkeyed repository.
    pub fn keyed(store: &DocumentStore, key: &str) -> FrotaResult<Self> {
        let name = repository_name(T::entity_name(), Some(key))?;
        Self::with_collection_name(store, &name)
    }

    /// Opens the repository on an explicitly named collection.
    pub fn with_collection_name(store: &DocumentStore, name: &str) -> FrotaResult<Self> {
        let collection = store.collection(name)?;
        log::debug!(
            "Opened repository for {} on collection {} in database {}",
            T::entity_name(),
            name,
            store.database_name()
        );

        Ok(Repository {
            store: store.clone(),
            collection,
            collection_name: name.to_string(),
            _phantom: PhantomData,
        })
    }

    /// Name of the collection backing this repository.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// The store this repository was opened on.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Direct access to the underlying collection.
    pub fn document_collection(&self) -> &DocumentCollection {
        &self.collection
    }

    /// Stores a new record.
    ///
    /// # Returns
    /// * `Ok(WriteResult)` with one affected document
    /// * `Err(FrotaError)` with `ObjectMappingError` if the record cannot be
    ///   mapped, or `WriteError`/`ConnectionError` if the store rejected it
    pub fn insert(&self, record: &T) -> FrotaResult<WriteResult> {
        let document = self.to_document(record)?;
        log::debug!("Inserting into {}", self.collection_name);

        self.collection.insert_one(document).map_err(|err| {
            log::error!("Insert into {} failed: {}", self.collection_name, err);
            err
        })?;
        Ok(WriteResult::new(1))
    }

    /// Replaces the whole content of the first record whose `key` equals `value`.
    ///
    /// A miss is not an upsert and not an error: the collection is left as it
    /// was and the result reports zero affected documents.
    pub fn replace<V: Into<Bson>>(&self, key: &str, value: V, updated: &T) -> FrotaResult<WriteResult> {
        let filter = field(key).eq(value);
        let document = self.to_document(updated)?;
        log::debug!("Replacing in {} where {}", self.collection_name, filter);

        let matched = self.collection.replace_one(&filter, document).map_err(|err| {
            log::error!("Replace in {} failed: {}", self.collection_name, err);
            err
        })?;

        if matched == 0 {
            log::warn!("Replace in {} matched no record for {}", self.collection_name, filter);
        }
        Ok(WriteResult::new(matched))
    }

    /// Deletes the first record whose `key` equals `value`.
    ///
    /// Returns `true` if a record was removed.
    pub fn delete<V: Into<Bson>>(&self, key: &str, value: V) -> FrotaResult<bool> {
        let filter = field(key).eq(value);
        log::debug!("Deleting from {} where {}", self.collection_name, filter);

        let deleted = self.collection.delete_one(&filter).map_err(|err| {
            log::error!("Delete from {} failed: {}", self.collection_name, err);
            err
        })?;
        Ok(deleted > 0)
    }

    /// Returns the first record whose `key` equals `value`.
    ///
    /// Values compare with the store's type rules, so the string `"20"` does
    /// not match the number `20`.
    pub fn find_by_key<V: Into<Bson>>(&self, key: &str, value: V) -> FrotaResult<Option<T>> {
        self.find_one(field(key).eq(value))
    }

    /// Returns every record of the collection, in store order.
    pub fn list_all(&self) -> FrotaResult<Vec<T>> {
        self.find(all())
    }

    /// Returns the records matching every `(field, value)` equality predicate.
    ///
    /// Predicates are ANDed in the given order. An empty list matches every
    /// record.
    ///
    /// ```rust
    /// # use frota::repository::{Entity, Repository};
    /// # use frota::store::InMemoryStore;
    /// # use serde::{Deserialize, Serialize};
    /// # #[derive(Serialize, Deserialize)]
    /// # struct Driver { name: String, city: String }
    /// # impl Entity for Driver { fn entity_name() -> &'static str { "Driver" } }
    /// let drivers = Repository::<Driver>::new(&InMemoryStore::open_default()).unwrap();
    /// let found = drivers.filter([("name", "Ana"), ("city", "Natal")]).unwrap();
    /// assert!(found.is_empty());
    /// ```
    pub fn filter<I, K, V>(&self, predicates: I) -> FrotaResult<Vec<T>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Bson>,
    {
        let mut filters: Vec<Filter> = predicates
            .into_iter()
            .map(|(key, value)| field(key.as_ref()).eq(value))
            .collect();

        let filter = match filters.len() {
            0 => all(),
            1 => filters.remove(0),
            _ => and(filters),
        };
        self.find(filter)
    }

    /// Returns every record matching an arbitrary filter, in store order.
    pub fn find(&self, filter: Filter) -> FrotaResult<Vec<T>> {
        log::debug!("Finding in {} where {}", self.collection_name, filter);

        let documents = self.collection.find(&filter).map_err(|err| {
            log::error!("Find in {} failed: {}", self.collection_name, err);
            err
        })?;

        documents
            .into_iter()
            .map(|document| self.to_record(document))
            .collect()
    }

    /// Returns the first record matching an arbitrary filter.
    pub fn find_one(&self, filter: Filter) -> FrotaResult<Option<T>> {
        log::debug!("Finding one in {} where {}", self.collection_name, filter);

        let document = self.collection.find_one(&filter).map_err(|err| {
            log::error!("Find one in {} failed: {}", self.collection_name, err);
            err
        })?;

        document.map(|document| self.to_record(document)).transpose()
    }

    /// Number of records in the collection.
    pub fn size(&self) -> FrotaResult<u64> {
        self.collection.count().map_err(|err| {
            log::error!("Count of {} failed: {}", self.collection_name, err);
            err
        })
    }

    fn to_document(&self, record: &T) -> FrotaResult<Document> {
        bson::to_document(record).map_err(|err| {
            log::error!("Failed to map {} record to a document: {}", T::entity_name(), err);
            FrotaError::from(err)
        })
    }

    fn to_record(&self, document: Document) -> FrotaResult<T> {
        bson::from_document(document).map_err(|err| {
            log::error!(
                "Failed to map a document of {} to {}: {}",
                self.collection_name,
                T::entity_name(),
                err
            );
            FrotaError::from(err)
        })
    }
}
