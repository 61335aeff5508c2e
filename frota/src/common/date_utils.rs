//! Calendar dates in the document store.
//!
//! Dates are UTC and date-only: a [NaiveDate] is stored as a BSON datetime at
//! 00:00:00 UTC of that day, so range predicates use the store's native
//! datetime ordering. Reading truncates any time-of-day back to the UTC date.

use bson::Bson;
use chrono::{NaiveDate, NaiveDateTime};

/// Converts a calendar date to the BSON datetime at midnight UTC.
pub fn date_to_bson(date: NaiveDate) -> bson::DateTime {
    bson::DateTime::from_chrono(NaiveDateTime::from(date).and_utc())
}

/// Converts a stored datetime back to its UTC calendar date.
pub fn bson_to_date(value: bson::DateTime) -> NaiveDate {
    value.to_chrono().date_naive()
}

/// Same as [date_to_bson], wrapped as a filter value.
pub fn date_value(date: NaiveDate) -> Bson {
    Bson::DateTime(date_to_bson(date))
}

/// Serde adapter for `NaiveDate` fields, for use with `#[serde(with = "...")]`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Booking {
///     #[serde(with = "frota::common::utc_date")]
///     day: NaiveDate,
/// }
/// ```
pub mod utc_date {
    use super::{bson_to_date, date_to_bson};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        date_to_bson(*date).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = bson::DateTime::deserialize(deserializer)?;
        Ok(bson_to_date(value))
    }
}
