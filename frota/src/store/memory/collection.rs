use super::store::CollectionData;
use crate::common::{values_equal, DOC_ID};
use crate::errors::{ErrorKind, FrotaError, FrotaResult};
use crate::filter::Filter;
use crate::store::DocumentCollectionProvider;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// A collection of the [InMemoryStore](super::InMemoryStore).
///
/// The handle only stores the collection name; the documents are looked up
/// in the shared registry on every call, so a handle opened before the
/// collection exists (or after the database was dropped) stays valid.
pub(crate) struct InMemoryCollection {
    name: String,
    registry: Arc<DashMap<String, CollectionData>>,
}

impl InMemoryCollection {
    pub(crate) fn new(name: &str, registry: Arc<DashMap<String, CollectionData>>) -> Self {
        InMemoryCollection {
            name: name.to_string(),
            registry,
        }
    }

    fn existing(&self) -> Option<CollectionData> {
        self.registry.get(&self.name).map(|entry| entry.value().clone())
    }

    fn get_or_create(&self) -> CollectionData {
        self.registry
            .entry(self.name.clone())
            .or_insert_with(|| Arc::new(RwLock::new(Vec::new())))
            .value()
            .clone()
    }

    fn position(documents: &[Document], filter: &Filter) -> FrotaResult<Option<usize>> {
        for (index, document) in documents.iter().enumerate() {
            if filter.apply(document)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn write_error(&self, message: &str) -> FrotaError {
        FrotaError::new(
            &format!("{} in collection {}", message, self.name),
            ErrorKind::WriteError,
        )
    }
}

/// Returns a copy of the document with `_id` as its first field.
fn with_id_first(id: Bson, document: Document) -> Document {
    let mut result = Document::new();
    result.insert(DOC_ID, id);
    for (key, value) in document {
        if key != DOC_ID {
            result.insert(key, value);
        }
    }
    result
}

impl DocumentCollectionProvider for InMemoryCollection {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn find(&self, filter: &Filter) -> FrotaResult<Vec<Document>> {
        filter.validate()?;
        let data = match self.existing() {
            Some(data) => data,
            None => return Ok(Vec::new()),
        };

        let documents = data.read();
        let mut result = Vec::new();
        for document in documents.iter() {
            if filter.apply(document)? {
                result.push(document.clone());
            }
        }
        Ok(result)
    }

    fn find_one(&self, filter: &Filter) -> FrotaResult<Option<Document>> {
        filter.validate()?;
        let data = match self.existing() {
            Some(data) => data,
            None => return Ok(None),
        };

        let documents = data.read();
        let index = Self::position(&documents, filter)?;
        Ok(index.map(|i| documents[i].clone()))
    }

    fn insert_one(&self, document: Document) -> FrotaResult<Bson> {
        let id = match document.get(DOC_ID) {
            Some(id) => id.clone(),
            None => Bson::ObjectId(ObjectId::new()),
        };

        let data = self.get_or_create();
        let mut documents = data.write();
        let duplicate = documents
            .iter()
            .any(|it| it.get(DOC_ID).is_some_and(|existing| values_equal(existing, &id)));
        if duplicate {
            return Err(self.write_error(&format!("Duplicate _id {}", id)));
        }

        documents.push(with_id_first(id.clone(), document));
        Ok(id)
    }

    fn delete_one(&self, filter: &Filter) -> FrotaResult<u64> {
        filter.validate()?;
        let data = match self.existing() {
            Some(data) => data,
            None => return Ok(0),
        };

        let mut documents = data.write();
        match Self::position(&documents, filter)? {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn replace_one(&self, filter: &Filter, replacement: Document) -> FrotaResult<u64> {
        filter.validate()?;
        let data = match self.existing() {
            Some(data) => data,
            None => return Ok(0),
        };

        let mut documents = data.write();
        let index = match Self::position(&documents, filter)? {
            Some(index) => index,
            None => return Ok(0),
        };

        let original_id = documents[index].get(DOC_ID).cloned().unwrap_or(Bson::Null);
        if let Some(new_id) = replacement.get(DOC_ID) {
            if !values_equal(new_id, &original_id) {
                return Err(self.write_error("Replacement cannot change the _id"));
            }
        }

        documents[index] = with_id_first(original_id, replacement);
        Ok(1)
    }

    fn count(&self) -> FrotaResult<u64> {
        Ok(self
            .existing()
            .map(|data| data.read().len() as u64)
            .unwrap_or(0))
    }
}
