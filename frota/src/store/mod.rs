//! The document-store seam.
//!
//! Repositories reach their data through [DocumentStore] and
//! [DocumentCollection]. The core crate ships the [InMemoryStore]; the
//! `frota_mongodb_adapter` crate provides the MongoDB-backed store.

mod document_collection;
mod document_store;
pub mod memory;

pub use document_collection::*;
pub use document_store::*;
pub use memory::InMemoryStore;
