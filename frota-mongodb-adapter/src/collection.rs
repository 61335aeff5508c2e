use crate::error::MongoError;
use bson::{Bson, Document};
use frota::errors::FrotaResult;
use frota::filter::Filter;
use frota::store::DocumentCollectionProvider;
use mongodb::sync::Collection;

/// A MongoDB collection seen through the document-store seam.
///
/// Filters are rendered with `FilterProvider::to_query` and evaluated by the
/// server. Reads fail with `ConnectionError` or `BackendError`, writes with
/// `WriteError`.
pub(crate) struct MongoCollection {
    collection: Collection<Document>,
}

impl MongoCollection {
    pub(crate) fn new(collection: Collection<Document>) -> Self {
        MongoCollection { collection }
    }

    fn query(&self, filter: &Filter) -> FrotaResult<Document> {
        let query = filter.to_query()?;
        log::debug!("Query on {}: {}", self.collection.name(), query);
        Ok(query)
    }
}

impl DocumentCollectionProvider for MongoCollection {
    fn name(&self) -> String {
        self.collection.name().to_string()
    }

    fn find(&self, filter: &Filter) -> FrotaResult<Vec<Document>> {
        let query = self.query(filter)?;
        let cursor = self.collection.find(query).run().map_err(MongoError::read)?;

        let mut documents = Vec::new();
        for document in cursor {
            documents.push(document.map_err(MongoError::read)?);
        }
        Ok(documents)
    }

    fn find_one(&self, filter: &Filter) -> FrotaResult<Option<Document>> {
        let query = self.query(filter)?;
        Ok(self
            .collection
            .find_one(query)
            .run()
            .map_err(MongoError::read)?)
    }

    fn insert_one(&self, document: Document) -> FrotaResult<Bson> {
        let result = self
            .collection
            .insert_one(document)
            .run()
            .map_err(MongoError::Write)?;
        Ok(result.inserted_id)
    }

    fn delete_one(&self, filter: &Filter) -> FrotaResult<u64> {
        let query = self.query(filter)?;
        let result = self
            .collection
            .delete_one(query)
            .run()
            .map_err(MongoError::Write)?;
        Ok(result.deleted_count)
    }

    fn replace_one(&self, filter: &Filter, replacement: Document) -> FrotaResult<u64> {
        let query = self.query(filter)?;
        let result = self
            .collection
            .replace_one(query, replacement)
            .run()
            .map_err(MongoError::Write)?;
        Ok(result.matched_count)
    }

    fn count(&self) -> FrotaResult<u64> {
        Ok(self
            .collection
            .count_documents(Document::new())
            .run()
            .map_err(MongoError::read)?)
    }
}
