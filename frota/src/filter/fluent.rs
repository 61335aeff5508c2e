use bson::Bson;

use super::{ComparisonFilter, ComparisonMode, EqualsFilter, Filter};

/// Starts a filter on a field. Nested fields use dot notation.
///
/// ```rust
/// use frota::filter::field;
///
/// let filter = field("vehicle.plate").eq("XYZ-1");
/// assert!(filter.has_field());
/// ```
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// Builder half of a field filter, produced by [field].
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Field equals the value.
    pub fn eq<T: Into<Bson>>(self, value: T) -> Filter {
        Filter::new(EqualsFilter::new(self.field_name, value.into()))
    }

    /// Field is strictly greater than the value.
    pub fn gt<T: Into<Bson>>(self, value: T) -> Filter {
        self.compare(value.into(), ComparisonMode::Greater)
    }

    /// Field is greater than or equal to the value.
    pub fn gte<T: Into<Bson>>(self, value: T) -> Filter {
        self.compare(value.into(), ComparisonMode::GreaterEqual)
    }

    /// Field is strictly less than the value.
    pub fn lt<T: Into<Bson>>(self, value: T) -> Filter {
        self.compare(value.into(), ComparisonMode::Lesser)
    }

    /// Field is less than or equal to the value.
    pub fn lte<T: Into<Bson>>(self, value: T) -> Filter {
        self.compare(value.into(), ComparisonMode::LesserEqual)
    }

    fn compare(self, value: Bson, mode: ComparisonMode) -> Filter {
        Filter::new(ComparisonFilter::new(self.field_name, value, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_fluent_builds_field_filters() {
        let filter = field("code").gte(3);
        assert_eq!(filter.get_field_name().unwrap(), "code");
        assert_eq!(filter.to_query().unwrap(), doc! { "code": { "$gte": 3 } });
    }

    #[test]
    fn test_fluent_accepts_common_value_types() {
        assert!(field("name").eq("Ana").apply(&doc! { "name": "Ana" }).unwrap());
        assert!(field("code").eq(7_i64).apply(&doc! { "code": 7 }).unwrap());
        assert!(field("active").eq(true).apply(&doc! { "active": true }).unwrap());
        assert!(field("price").lt(9.99).apply(&doc! { "price": 5 }).unwrap());
    }
}
