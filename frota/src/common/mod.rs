//! Helpers shared by filters, stores and repositories.

mod compare;
mod date_utils;
mod fields;
mod object_utils;

pub use compare::*;
pub use date_utils::*;
pub use fields::*;
pub use object_utils::*;
