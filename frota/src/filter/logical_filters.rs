use std::{any::Any, fmt::Display};

use bson::{Bson, Document};

use crate::errors::FrotaResult;

use super::{is_all_filter, Filter, FilterProvider};

/// Conjunction of filters, evaluated left to right with short-circuit.
pub(crate) struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    #[inline]
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.filters.iter().map(|it| it.to_string()).collect();
        write!(f, "({})", parts.join(" && "))
    }
}

impl FilterProvider for AndFilter {
    fn apply(&self, entry: &Document) -> FrotaResult<bool> {
        for filter in &self.filters {
            if !filter.apply(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn to_query(&self) -> FrotaResult<Document> {
        let mut clauses = Vec::with_capacity(self.filters.len());
        for filter in &self.filters {
            if is_all_filter(filter) {
                continue;
            }
            clauses.push(filter.to_query()?);
        }

        match clauses.len() {
            0 => Ok(Document::new()),
            1 => Ok(clauses.remove(0)),
            _ => {
                let mut query = Document::new();
                query.insert(
                    "$and",
                    clauses.into_iter().map(Bson::Document).collect::<Vec<_>>(),
                );
                Ok(query)
            }
        }
    }

    fn logical_filters(&self) -> FrotaResult<Vec<Filter>> {
        Ok(self.filters.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
