//! Query filters.
//!
//! A [Filter] is built from [field] conditions combined with [and], or is the
//! match-everything [all] filter. Stores either evaluate a filter in process
//! with [FilterProvider::apply] or hand the server its rendered query from
//! [FilterProvider::to_query].
//!
//! ```rust
//! use frota::bson::doc;
//! use frota::filter::field;
//!
//! let filter = field("vehicle.plate").eq("XYZ-1")
//!     .and(field("pickup_code").lte(40));
//!
//! let matching = doc! { "vehicle": { "plate": "XYZ-1" }, "pickup_code": 12 };
//! assert!(filter.apply(&matching).unwrap());
//! ```

mod basic_filters;
#[allow(clippy::module_inception)]
mod filter;
mod fluent;
mod logical_filters;
mod range_filters;

pub(crate) use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub(crate) use logical_filters::*;
pub(crate) use range_filters::*;
