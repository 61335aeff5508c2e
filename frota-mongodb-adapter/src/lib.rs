//! MongoDB storage adapter for frota.
//!
//! [MongoStore] implements the `frota` document-store seam on top of the
//! synchronous `mongodb` driver, so every `Repository` and `LoanRepository`
//! can run against a MongoDB server:
//!
//! ```rust,ignore
//! use frota::config::StoreConfig;
//! use frota::repository::Repository;
//! use frota_mongodb_adapter::MongoStore;
//!
//! let config = StoreConfig::builder()
//!     .uri("mongodb://localhost:27017")
//!     .database("frota")
//!     .build()?;
//! let store = MongoStore::open(&config)?;
//! let vehicles = Repository::<frota::loan::Vehicle>::new(&store)?;
//! ```

mod collection;
mod error;
mod store;

pub use error::*;
pub use store::*;

#[cfg(test)]
mod tests {
    #[ctor::ctor]
    fn init() {
        colog::init();
    }
}
