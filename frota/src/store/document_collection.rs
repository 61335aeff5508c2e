use crate::errors::FrotaResult;
use crate::filter::Filter;
use bson::{Bson, Document};
use std::ops::Deref;
use std::sync::Arc;

/// Interface of a single named collection inside a document store.
///
/// Every operation is one synchronous request to the store. Write operations
/// touch at most one document and are not transactional.
pub trait DocumentCollectionProvider: Send + Sync {
    /// Name of the collection.
    fn name(&self) -> String;

    /// Returns every document matching the filter, in store order.
    fn find(&self, filter: &Filter) -> FrotaResult<Vec<Document>>;

    /// Returns the first document matching the filter, if any.
    fn find_one(&self, filter: &Filter) -> FrotaResult<Option<Document>>;

    /// Stores a new document.
    ///
    /// # Arguments
    /// * `document` - The document to store. An `_id` is generated when absent.
    ///
    /// # Returns
    /// * `Ok(Bson)` with the `_id` of the stored document
    /// * `Err(FrotaError)` with `WriteError` if the store rejected the document
    fn insert_one(&self, document: Document) -> FrotaResult<Bson>;

    /// Deletes the first document matching the filter.
    ///
    /// # Returns
    /// * `Ok(u64)` with the number of deleted documents, 0 or 1
    fn delete_one(&self, filter: &Filter) -> FrotaResult<u64>;

    /// Replaces the first document matching the filter, keeping its `_id`.
    ///
    /// A filter that matches nothing leaves the collection unchanged; no
    /// document is inserted.
    ///
    /// # Returns
    /// * `Ok(u64)` with the number of matched documents, 0 or 1
    fn replace_one(&self, filter: &Filter, replacement: Document) -> FrotaResult<u64>;

    /// Number of documents in the collection.
    fn count(&self) -> FrotaResult<u64>;
}

/// A cloneable handle to a collection, see [DocumentCollectionProvider].
#[derive(Clone)]
pub struct DocumentCollection {
    inner: Arc<dyn DocumentCollectionProvider>,
}

impl DocumentCollection {
    pub fn new<T: DocumentCollectionProvider + 'static>(inner: T) -> Self {
        DocumentCollection { inner: Arc::new(inner) }
    }
}

impl Deref for DocumentCollection {
    type Target = Arc<dyn DocumentCollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Outcome of a write: how many documents it affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteResult {
    affected: u64,
}

impl WriteResult {
    pub fn new(affected: u64) -> Self {
        WriteResult { affected }
    }

    /// Number of documents the write matched and changed.
    pub fn affected_count(&self) -> u64 {
        self.affected
    }

    /// Whether the write touched any document.
    pub fn is_affected(&self) -> bool {
        self.affected > 0
    }
}
