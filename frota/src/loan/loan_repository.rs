use super::{Loan, PICKUP_DATE, RETURN_DATE, VEHICLE_PLATE};
use crate::common::date_value;
use crate::errors::FrotaResult;
use crate::filter::{and, field};
use crate::repository::Repository;
use crate::store::DocumentStore;
use chrono::NaiveDate;
use std::ops::Deref;

/// Repository of [Loan] records with vehicle and period queries.
///
/// Generic CRUD is reached through `Deref<Target = Repository<Loan>>`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use frota::loan::{Loan, LoanRepository, Vehicle};
/// use frota::store::InMemoryStore;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let loans = LoanRepository::new(&InMemoryStore::open_default()).unwrap();
/// loans.insert(&Loan {
///     code: 1,
///     driver: "Ana".to_string(),
///     vehicle: Vehicle::new("XYZ-1", "Uno"),
///     pickup_date: day(10),
///     return_date: day(20),
/// }).unwrap();
///
/// assert_eq!(loans.find_by_period("XYZ-1", day(1), day(31)).unwrap().len(), 1);
/// assert!(loans.find_by_period("XYZ-1", day(11), day(31)).unwrap().is_empty());
/// ```
#[derive(Clone)]
pub struct LoanRepository {
    repository: Repository<Loan>,
}

impl LoanRepository {
    /// Opens the loan repository on the `Loan` collection.
    pub fn new(store: &DocumentStore) -> FrotaResult<Self> {
        Ok(LoanRepository {
            repository: Repository::new(store)?,
        })
    }

    /// Opens a keyed loan repository, see [Repository::keyed].
    pub fn keyed(store: &DocumentStore, key: &str) -> FrotaResult<Self> {
        Ok(LoanRepository {
            repository: Repository::keyed(store, key)?,
        })
    }

    /// Returns the loans of a vehicle that lie within a period.
    ///
    /// A loan matches when its vehicle plate equals `plate`, its pickup date
    /// is on or after `pickup_from` and its return date is on or before
    /// `return_to`. Both bounds are inclusive.
    pub fn find_by_period(
        &self,
        plate: &str,
        pickup_from: NaiveDate,
        return_to: NaiveDate,
    ) -> FrotaResult<Vec<Loan>> {
        if pickup_from > return_to {
            log::warn!(
                "Loan period for {} starts after it ends ({} > {})",
                plate,
                pickup_from,
                return_to
            );
        }

        self.repository.find(and(vec![
            field(VEHICLE_PLATE).eq(plate),
            field(PICKUP_DATE).gte(date_value(pickup_from)),
            field(RETURN_DATE).lte(date_value(return_to)),
        ]))
    }

    /// Returns every loan of a vehicle.
    pub fn find_by_vehicle(&self, plate: &str) -> FrotaResult<Vec<Loan>> {
        self.repository.find(field(VEHICLE_PLATE).eq(plate))
    }
}

impl Deref for LoanRepository {
    type Target = Repository<Loan>;

    fn deref(&self) -> &Self::Target {
        &self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::Vehicle;
    use crate::store::InMemoryStore;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn loan(code: i64, plate: &str, pickup: NaiveDate, ret: NaiveDate) -> Loan {
        Loan {
            code,
            driver: format!("driver-{}", code),
            vehicle: Vehicle::new(plate, "Gol"),
            pickup_date: pickup,
            return_date: ret,
        }
    }

    fn repository() -> LoanRepository {
        LoanRepository::new(&InMemoryStore::open_default()).unwrap()
    }

    #[test]
    fn test_find_by_period_returns_only_loans_inside() {
        let loans = repository();
        let a = loan(1, "XYZ-1", day(1, 10), day(1, 20));
        let b = loan(2, "XYZ-1", day(2, 5), day(2, 15));
        loans.insert(&a).unwrap();
        loans.insert(&b).unwrap();

        assert_eq!(loans.find_by_period("XYZ-1", day(1, 1), day(1, 31)).unwrap(), vec![a]);
    }

    #[test]
    fn test_find_by_period_bounds_are_inclusive() {
        let loans = repository();
        let a = loan(1, "XYZ-1", day(1, 10), day(1, 20));
        loans.insert(&a).unwrap();

        assert_eq!(loans.find_by_period("XYZ-1", day(1, 10), day(1, 20)).unwrap(), vec![a]);
        assert!(loans.find_by_period("XYZ-1", day(1, 11), day(1, 20)).unwrap().is_empty());
        assert!(loans.find_by_period("XYZ-1", day(1, 10), day(1, 19)).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_period_filters_on_plate() {
        let loans = repository();
        loans.insert(&loan(1, "XYZ-1", day(1, 10), day(1, 20))).unwrap();
        loans.insert(&loan(2, "ABC-9", day(1, 10), day(1, 20))).unwrap();

        let found = loans.find_by_period("ABC-9", day(1, 1), day(1, 31)).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, 2);
        assert!(loans.find_by_period("NONE-0", day(1, 1), day(1, 31)).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_period_with_inverted_range_is_empty() {
        let loans = repository();
        loans.insert(&loan(1, "XYZ-1", day(1, 10), day(1, 20))).unwrap();
        assert!(loans.find_by_period("XYZ-1", day(1, 31), day(1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_vehicle() {
        let loans = repository();
        loans.insert(&loan(1, "XYZ-1", day(1, 10), day(1, 20))).unwrap();
        loans.insert(&loan(2, "XYZ-1", day(3, 1), day(3, 2))).unwrap();
        loans.insert(&loan(3, "ABC-9", day(1, 10), day(1, 20))).unwrap();

        let codes: Vec<i64> = loans.find_by_vehicle("XYZ-1").unwrap().iter().map(|l| l.code).collect();
        assert_eq!(codes, vec![1, 2]);
    }

    #[test]
    fn test_generic_operations_through_deref() {
        let loans = repository();
        assert_eq!(loans.collection_name(), "Loan");
        loans.insert(&loan(1, "XYZ-1", day(1, 10), day(1, 20))).unwrap();

        let mut updated = loan(1, "XYZ-1", day(1, 10), day(1, 25));
        updated.driver = "Bia".to_string();
        assert_eq!(loans.replace("code", 1, &updated).unwrap().affected_count(), 1);
        assert_eq!(loans.find_by_key("code", 1).unwrap(), Some(updated));
        assert!(loans.delete("code", 1).unwrap());
    }

    #[test]
    fn test_keyed_loan_repositories_are_isolated() {
        let store = InMemoryStore::open_default();
        let current = LoanRepository::new(&store).unwrap();
        let archive = LoanRepository::keyed(&store, "archive").unwrap();
        archive.insert(&loan(1, "XYZ-1", day(1, 10), day(1, 20))).unwrap();

        assert_eq!(archive.collection_name(), "Loan+archive");
        assert_eq!(archive.size().unwrap(), 1);
        assert_eq!(current.size().unwrap(), 0);
    }
}
