use bson::Bson;
use std::cmp::Ordering;

/// Orders two BSON values the way the document store does for range predicates.
///
/// Only values of the same type class compare: numbers with numbers (int32,
/// int64 and double mix freely), strings with strings, datetimes with
/// datetimes, booleans, object ids and nulls with their own kind. Anything else
/// returns `None`, which range filters treat as "no match".
pub fn compare_values(left: &Bson, right: &Bson) -> Option<Ordering> {
    match (left, right) {
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::DateTime(a), Bson::DateTime(b)) => {
            Some(a.timestamp_millis().cmp(&b.timestamp_millis()))
        }
        (Bson::Boolean(a), Bson::Boolean(b)) => Some(a.cmp(b)),
        (Bson::ObjectId(a), Bson::ObjectId(b)) => Some(a.bytes().cmp(&b.bytes())),
        (Bson::Null, Bson::Null) => Some(Ordering::Equal),
        _ => compare_numbers(left, right),
    }
}

/// Equality under the same rules as [compare_values].
///
/// Embedded documents are equal when they hold the same keys in the same
/// order with equal values, and arrays when their elements are pairwise
/// equal. Numbers widen at every depth.
pub fn values_equal(left: &Bson, right: &Bson) -> bool {
    match (left, right) {
        (Bson::Document(a), Bson::Document(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|((ka, va), (kb, vb))| ka == kb && values_equal(va, vb))
        }
        (Bson::Array(a), Bson::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        _ => match compare_values(left, right) {
            Some(ordering) => ordering == Ordering::Equal,
            None => is_unordered(left) && is_unordered(right) && left == right,
        },
    }
}

fn compare_numbers(left: &Bson, right: &Bson) -> Option<Ordering> {
    match (as_integer(left), as_integer(right), left, right) {
        (Some(a), Some(b), _, _) => Some(a.cmp(&b)),
        (Some(a), None, _, Bson::Double(b)) => compare_integer_double(a, *b),
        (None, Some(b), Bson::Double(a), _) => {
            compare_integer_double(b, *a).map(Ordering::reverse)
        }
        (None, None, Bson::Double(a), Bson::Double(b)) => a.partial_cmp(b),
        _ => None,
    }
}

fn as_integer(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        _ => None,
    }
}

/// Compares without rounding the integer through `f64`, which loses
/// precision above 2^53.
fn compare_integer_double(integer: i64, double: f64) -> Option<Ordering> {
    // 2^63, the first double past i64::MAX
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if double.is_nan() {
        return None;
    }
    if double >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if double < -I64_BOUND {
        return Some(Ordering::Greater);
    }

    let whole = double.trunc();
    match integer.cmp(&(whole as i64)) {
        Ordering::Equal if double > whole => Some(Ordering::Less),
        Ordering::Equal if double < whole => Some(Ordering::Greater),
        ordering => Some(ordering),
    }
}

fn is_unordered(value: &Bson) -> bool {
    !matches!(
        value,
        Bson::Int32(_)
            | Bson::Int64(_)
            | Bson::Double(_)
            | Bson::String(_)
            | Bson::DateTime(_)
            | Bson::Boolean(_)
            | Bson::ObjectId(_)
            | Bson::Null
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId, DateTime};

    #[test]
    fn test_numbers_compare_across_widths() {
        assert_eq!(compare_values(&Bson::Int32(5), &Bson::Int64(5)), Some(Ordering::Equal));
        assert_eq!(compare_values(&Bson::Int64(4), &Bson::Int32(5)), Some(Ordering::Less));
        assert_eq!(compare_values(&Bson::Double(5.5), &Bson::Int32(5)), Some(Ordering::Greater));
        assert_eq!(compare_values(&Bson::Double(f64::NAN), &Bson::Int32(5)), None);
    }

    #[test]
    fn test_strings_and_dates() {
        assert_eq!(
            compare_values(&Bson::String("a".into()), &Bson::String("b".into())),
            Some(Ordering::Less)
        );
        let earlier = Bson::DateTime(DateTime::from_millis(1_000));
        let later = Bson::DateTime(DateTime::from_millis(2_000));
        assert_eq!(compare_values(&later, &earlier), Some(Ordering::Greater));
    }

    #[test]
    fn test_mixed_type_classes_do_not_compare() {
        assert_eq!(compare_values(&Bson::String("20".into()), &Bson::Int32(20)), None);
        assert_eq!(compare_values(&Bson::Null, &Bson::Int32(0)), None);
        assert_eq!(
            compare_values(&Bson::DateTime(DateTime::from_millis(0)), &Bson::Int64(0)),
            None
        );
    }

    #[test]
    fn test_values_equal() {
        assert!(values_equal(&Bson::Int32(20), &Bson::Int64(20)));
        assert!(values_equal(&Bson::Int32(20), &Bson::Double(20.0)));
        assert!(!values_equal(&Bson::String("20".into()), &Bson::Int32(20)));
        assert!(values_equal(&Bson::Null, &Bson::Null));

        let id = ObjectId::new();
        assert!(values_equal(&Bson::ObjectId(id), &Bson::ObjectId(id)));

        let a = Bson::Document(doc! { "plate": "XYZ-1" });
        let b = Bson::Document(doc! { "plate": "XYZ-1" });
        let c = Bson::Document(doc! { "plate": "XYZ-2" });
        assert!(values_equal(&a, &b));
        assert!(!values_equal(&a, &c));
        assert!(!values_equal(&a, &Bson::Null));
    }

    #[test]
    fn test_embedded_documents_compare_in_field_order() {
        let ordered = Bson::Document(doc! { "plate": "XYZ-1", "model": "Onix" });
        let swapped = Bson::Document(doc! { "model": "Onix", "plate": "XYZ-1" });
        assert!(values_equal(&ordered, &ordered.clone()));
        assert!(!values_equal(&ordered, &swapped));

        let shorter = Bson::Document(doc! { "plate": "XYZ-1" });
        assert!(!values_equal(&ordered, &shorter));
    }

    #[test]
    fn test_embedded_numbers_widen() {
        let wide = Bson::Document(doc! { "year": 2020_i64, "tags": [1_i64, 2.0] });
        let narrow = Bson::Document(doc! { "year": 2020_i32, "tags": [1_i32, 2_i32] });
        assert!(values_equal(&wide, &narrow));

        let arrays = (Bson::Array(vec![Bson::Int32(1)]), Bson::Array(vec![Bson::Double(1.5)]));
        assert!(!values_equal(&arrays.0, &arrays.1));
    }

    #[test]
    fn test_large_int64_against_double_is_exact() {
        let big = Bson::Int64(9_007_199_254_740_993);
        let near = Bson::Double(9_007_199_254_740_992.0);
        assert!(!values_equal(&big, &near));
        assert_eq!(compare_values(&big, &near), Some(Ordering::Greater));
        assert_eq!(compare_values(&near, &big), Some(Ordering::Less));

        assert!(values_equal(&Bson::Int64(1 << 60), &Bson::Double((1_i64 << 60) as f64)));
        assert_eq!(
            compare_values(&Bson::Int64(i64::MAX), &Bson::Double(9.3e18)),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_values(&Bson::Int64(-3), &Bson::Double(-2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_values(&Bson::Int64(-2), &Bson::Double(-2.5)),
            Some(Ordering::Greater)
        );
    }
}
