//! Typed repositories over document collections.

mod entity;
#[allow(clippy::module_inception)]
mod repository;

pub use entity::*;
pub use repository::*;
