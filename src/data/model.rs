use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// YearMonth – calendar period used to bucket admissions
// ---------------------------------------------------------------------------

/// A calendar month (first-of-month granularity). Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single healthcare entry (one row of the source CSV).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub age: u32,
    pub gender: String,
    pub medical_condition: String,
    pub doctor: String,
    pub hospital: String,
    pub insurance_provider: String,
    pub billing_amount: f64,
    pub admission_date: NaiveDate,
    /// Derived from `admission_date`.
    pub admission_month: YearMonth,
}

impl Record {
    /// Build a record, deriving `admission_month` from the date.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        age: u32,
        gender: impl Into<String>,
        medical_condition: impl Into<String>,
        doctor: impl Into<String>,
        hospital: impl Into<String>,
        insurance_provider: impl Into<String>,
        billing_amount: f64,
        admission_date: NaiveDate,
    ) -> Self {
        Record {
            age,
            gender: gender.into(),
            medical_condition: medical_condition.into(),
            doctor: doctor.into(),
            hospital: hospital.into(),
            insurance_provider: insurance_provider.into(),
            billing_amount,
            admission_date,
            admission_month: YearMonth::of(admission_date),
        }
    }
}

// ---------------------------------------------------------------------------
// StoreSummary – scalars shown on the stat cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub total_records: usize,
    /// Mean billing amount rounded to 3 decimals (0.0 for an empty store).
    pub mean_billing: f64,
    pub num_doctors: usize,
    pub num_hospitals: usize,
    pub num_insurance_providers: usize,
    pub num_medical_conditions: usize,
}

impl StoreSummary {
    fn compute(records: &[Record]) -> Self {
        let total_records = records.len();
        let mean_billing = if total_records == 0 {
            0.0
        } else {
            let sum: f64 = records.iter().map(|r| r.billing_amount).sum();
            round3(sum / total_records as f64)
        };

        StoreSummary {
            total_records,
            mean_billing,
            num_doctors: count_distinct(records.iter().map(|r| r.doctor.as_str())),
            num_hospitals: count_distinct(records.iter().map(|r| r.hospital.as_str())),
            num_insurance_providers: count_distinct(
                records.iter().map(|r| r.insurance_provider.as_str()),
            ),
            num_medical_conditions: count_distinct(
                records.iter().map(|r| r.medical_condition.as_str()),
            ),
        }
    }

    /// Labelled values for the stat cards, in display order.
    pub fn stat_cards(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Patient Records", self.total_records.to_string()),
            ("Average Billing", self.mean_billing.to_string()),
            ("Total Number of Hospitals", self.num_hospitals.to_string()),
            ("Total Number of Doctors", self.num_doctors.to_string()),
            (
                "Total Number of Insurance Providers",
                self.num_insurance_providers.to_string(),
            ),
            (
                "Total Number of Medical Conditions",
                self.num_medical_conditions.to_string(),
            ),
        ]
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn count_distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.collect::<HashSet<_>>().len()
}

/// Distinct values in order of first appearance.
pub(crate) fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// RecordStore – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable in-memory table with scalars pre-computed at construction.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    summary: StoreSummary,
    genders: Vec<String>,
    conditions: Vec<String>,
}

impl RecordStore {
    /// Build the store and its derived values from loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let summary = StoreSummary::compute(&records);
        let genders = distinct_in_order(records.iter().map(|r| r.gender.as_str()));
        let conditions =
            distinct_in_order(records.iter().map(|r| r.medical_condition.as_str()));
        RecordStore {
            records,
            summary,
            genders,
            conditions,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn summary(&self) -> &StoreSummary {
        &self.summary
    }

    /// Distinct gender values, first-appearance order.
    pub fn genders(&self) -> &[String] {
        &self.genders
    }

    /// Distinct medical conditions, first-appearance order.
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// The three-record store used throughout the tests.
    pub fn three_record_store() -> RecordStore {
        RecordStore::from_records(vec![
            Record::new(34, "Female", "Diabetes", "Dr. A", "General", "Aetna", 500.0, date(2023, 1, 5)),
            Record::new(61, "Male", "Diabetes", "Dr. B", "General", "Cigna", 1500.0, date(2023, 1, 20)),
            Record::new(27, "Female", "Asthma", "Dr. A", "St. Mary", "Aetna", 300.0, date(2023, 2, 10)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_summary_scalars() {
        let store = three_record_store();
        let s = store.summary();
        assert_eq!(s.total_records, 3);
        assert_eq!(s.mean_billing, 766.667);
        assert_eq!(s.num_doctors, 2);
        assert_eq!(s.num_hospitals, 2);
        assert_eq!(s.num_insurance_providers, 2);
        assert_eq!(s.num_medical_conditions, 2);
    }

    #[test]
    fn test_distinct_options_keep_first_appearance_order() {
        let store = three_record_store();
        assert_eq!(store.genders(), ["Female", "Male"]);
        assert_eq!(store.conditions(), ["Diabetes", "Asthma"]);
    }

    #[test]
    fn test_year_month_derivation_and_label() {
        let r = Record::new(1, "F", "C", "D", "H", "I", 1.0, date(2024, 3, 31));
        assert_eq!(r.admission_month, YearMonth { year: 2024, month: 3 });
        assert_eq!(r.admission_month.to_string(), "2024-03");
    }

    #[test]
    fn test_stat_card_labels() {
        let cards = three_record_store().summary().stat_cards();
        assert_eq!(cards.len(), 6);
        assert!(cards.iter().any(|(l, v)| *l == "Total Number of Doctors" && v == "2"));
        assert!(cards.iter().all(|(l, _)| !l.contains("num_")));
        assert_eq!(cards[1].1, "766.667");
    }

    #[test]
    fn test_average_billing_card_is_not_zero_padded() {
        let store = RecordStore::from_records(vec![
            Record::new(30, "Male", "Flu", "D", "H", "I", 25539.3, date(2022, 1, 1)),
        ]);
        let cards = store.summary().stat_cards();
        assert_eq!(cards[1], ("Average Billing", "25539.3".to_string()));
    }

    #[test]
    fn test_empty_store_summary() {
        let store = RecordStore::from_records(Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.summary().mean_billing, 0.0);
        assert!(store.genders().is_empty());
    }
}
