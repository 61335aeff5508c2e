use crate::errors::{ErrorKind, FrotaError, FrotaResult};
use crate::common::validate_field_name;
use bson::Document;
use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use super::AllFilter;
use super::AndFilter;

/// Trait for implementing filters.
///
/// A `FilterProvider` has two faces: [FilterProvider::apply] evaluates the
/// condition against one document (used by stores that scan in process), and
/// [FilterProvider::to_query] renders it into a MongoDB query document (used
/// by stores that delegate evaluation to the server). Both must agree.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    fn apply(&self, entry: &Document) -> FrotaResult<bool>;

    /// Renders the filter as a MongoDB query document.
    fn to_query(&self) -> FrotaResult<Document>;

    /// Checks if this filter operates on a specific field.
    #[inline]
    fn has_field(&self) -> bool {
        false
    }

    /// Gets the field name this filter operates on.
    fn get_field_name(&self) -> FrotaResult<String> {
        log::error!("Filter {} does not have field name", self);
        Err(FrotaError::new(
            "Filter does not have field name",
            ErrorKind::FilterError,
        ))
    }

    /// Gets the operands of a logical filter.
    fn logical_filters(&self) -> FrotaResult<Vec<Filter>> {
        Err(FrotaError::new(
            "Filter is not a logical filter",
            ErrorKind::FilterError,
        ))
    }

    fn as_any(&self) -> &dyn Any;
}

/// A query filter for selecting documents from a collection.
///
/// Filters are built with [field](super::field), [and], and [all], are cheap
/// to clone, and live only for the duration of the query that uses them.
///
/// ```rust
/// use frota::filter::{and, field};
///
/// let filter = and(vec![
///     field("vehicle.plate").eq("XYZ-1"),
///     field("code").gte(10),
/// ]);
/// assert_eq!(
///     filter.to_string(),
///     "((vehicle.plate == \"XYZ-1\") && (code >= 10))"
/// );
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter { inner: Arc::new(inner) }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    /// Checks every field name in the filter tree.
    ///
    /// Stores call this before touching any data, so an invalid field fails
    /// the same way whether the collection is empty or not.
    pub fn validate(&self) -> FrotaResult<()> {
        if self.has_field() {
            return validate_field_name(&self.get_field_name()?);
        }
        if self.as_any().is::<AndFilter>() {
            for operand in self.logical_filters()? {
                operand.validate()?;
            }
        }
        Ok(())
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches all documents.
pub fn all() -> Filter {
    Filter::new(AllFilter {})
}

/// Combines multiple filters using logical AND.
///
/// The filters are evaluated in order. An empty list matches every document.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}
