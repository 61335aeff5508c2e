use crate::common::utc_date;
use crate::repository::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Field path of the plate of the vehicle embedded in a loan.
pub const VEHICLE_PLATE: &str = "vehicle.plate";
/// Field holding the pickup date of a loan.
pub const PICKUP_DATE: &str = "pickup_date";
/// Field holding the return date of a loan.
pub const RETURN_DATE: &str = "return_date";

/// A fleet vehicle, identified by its plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub plate: String,
    pub model: String,
}

impl Vehicle {
    pub fn new(plate: &str, model: &str) -> Self {
        Vehicle {
            plate: plate.to_string(),
            model: model.to_string(),
        }
    }
}

impl Entity for Vehicle {
    fn entity_name() -> &'static str {
        "Vehicle"
    }
}

/// A loan of a vehicle to a driver over a pickup/return date range.
///
/// The vehicle is embedded in the loan document, so loans are queried by
/// [VEHICLE_PLATE]. Dates are UTC calendar dates, stored as BSON datetimes at
/// midnight UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub code: i64,
    pub driver: String,
    pub vehicle: Vehicle,
    #[serde(with = "utc_date")]
    pub pickup_date: NaiveDate,
    #[serde(with = "utc_date")]
    pub return_date: NaiveDate,
}

impl Entity for Loan {
    fn entity_name() -> &'static str {
        "Loan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{date_value, resolve_field};
    use bson::Bson;

    #[test]
    fn test_loan_document_layout() {
        let pickup = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let ret = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let loan = Loan {
            code: 1,
            driver: "Ana".to_string(),
            vehicle: Vehicle::new("XYZ-1", "Uno"),
            pickup_date: pickup,
            return_date: ret,
        };

        let document = bson::to_document(&loan).unwrap();
        assert_eq!(resolve_field(&document, VEHICLE_PLATE), vec![&Bson::from("XYZ-1")]);
        assert_eq!(document.get(PICKUP_DATE), Some(&date_value(pickup)));
        assert_eq!(document.get(RETURN_DATE), Some(&date_value(ret)));

        let back: Loan = bson::from_document(document).unwrap();
        assert_eq!(back, loan);
    }
}
