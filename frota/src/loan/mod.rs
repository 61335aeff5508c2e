//! Vehicle loans.

#[allow(clippy::module_inception)]
mod loan;
mod loan_repository;

pub use loan::*;
pub use loan_repository::*;
