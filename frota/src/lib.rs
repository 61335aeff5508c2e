//! # Frota - Typed Repositories over a Document Store
//!
//! Frota lets application code store, retrieve, filter, update and delete
//! typed records in a document database without writing per-entity query
//! code. A record type implements [repository::Entity], and a
//! [repository::Repository] gives it CRUD and filter operations over its own
//! collection. [loan::LoanRepository] adds the vehicle and period queries of
//! the fleet loan domain.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use frota::loan::{Loan, LoanRepository, Vehicle};
//! use frota::store::InMemoryStore;
//!
//! # fn main() -> frota::errors::FrotaResult<()> {
//! let store = InMemoryStore::open_default();
//! let loans = LoanRepository::new(&store)?;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
//! loans.insert(&Loan {
//!     code: 7,
//!     driver: "Ana".to_string(),
//!     vehicle: Vehicle::new("QWE-4R21", "Onix"),
//!     pickup_date: day(4),
//!     return_date: day(8),
//! })?;
//!
//! let march = loans.find_by_period("QWE-4R21", day(1), day(31))?;
//! assert_eq!(march.len(), 1);
//!
//! let same = loans.find_by_key("code", 7)?;
//! assert_eq!(same.map(|l| l.driver), Some("Ana".to_string()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Stores
//!
//! Repositories reach their data through a [store::DocumentStore]. The core
//! crate ships the [store::InMemoryStore]; the `frota_mongodb_adapter` crate
//! connects to MongoDB using a [config::StoreConfig].
//!
//! ## Module Organization
//!
//! - [`common`] - Field paths, value comparison, dates and naming helpers
//! - [`config`] - Connection configuration
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters
//! - [`loan`] - Vehicle loan records and their repository
//! - [`repository`] - Typed repositories
//! - [`store`] - Document store abstractions and the in-memory store

pub use bson;

pub mod common;
pub mod config;
pub mod errors;
pub mod filter;
pub mod loan;
pub mod repository;
pub mod store;
