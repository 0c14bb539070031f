use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use super::model::{Record, RecordStore};

/// Date format of the `Date of Admission` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns the loader requires; any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Age",
    "Gender",
    "Medical Condition",
    "Doctor",
    "Hospital",
    "Insurance Provider",
    "Billing Amount",
    "Date of Admission",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal startup error: the dataset could not be turned into a [`RecordStore`].
///
/// Row numbers are 1-based and count data rows (the header is not a row).
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("row {row}: age '{value}' is not a non-negative integer")]
    InvalidAge { row: usize, value: String },
    #[error("row {row}: billing amount '{value}' is not a number")]
    InvalidBilling { row: usize, value: String },
    #[error("row {row}: admission date '{value}' is not YYYY-MM-DD")]
    InvalidDate { row: usize, value: String },
    #[error("dataset contains no records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the healthcare dataset from a CSV file.
pub fn load_file(path: &Path) -> Result<RecordStore, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let store = load_reader(file)?;
    log::info!(
        "Loaded {} records from {} ({} genders, {} conditions)",
        store.len(),
        path.display(),
        store.genders().len(),
        store.conditions().len()
    );
    Ok(store)
}

/// Load the dataset from any CSV byte source.
///
/// Layout: header row with (at least) the [`REQUIRED_COLUMNS`]. Numeric and
/// date cells are parsed strictly; a single bad cell fails the whole load.
pub fn load_reader<R: Read>(source: R) -> Result<RecordStore, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result?;
        records.push(raw.into_record(i + 1)?);
    }

    if records.is_empty() {
        return Err(DataLoadError::Empty);
    }

    Ok(RecordStore::from_records(records))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// One CSV row as text; typed parsing happens in [`RawRecord::into_record`]
/// so errors can name the offending row and value.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Medical Condition")]
    medical_condition: String,
    #[serde(rename = "Doctor")]
    doctor: String,
    #[serde(rename = "Hospital")]
    hospital: String,
    #[serde(rename = "Insurance Provider")]
    insurance_provider: String,
    #[serde(rename = "Billing Amount")]
    billing_amount: String,
    #[serde(rename = "Date of Admission")]
    admission_date: String,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<Record, DataLoadError> {
        let age = self
            .age
            .parse::<u32>()
            .map_err(|_| DataLoadError::InvalidAge {
                row,
                value: self.age.clone(),
            })?;

        let billing_amount = self
            .billing_amount
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DataLoadError::InvalidBilling {
                row,
                value: self.billing_amount.clone(),
            })?;

        let admission_date = NaiveDate::parse_from_str(&self.admission_date, DATE_FORMAT)
            .map_err(|_| DataLoadError::InvalidDate {
                row,
                value: self.admission_date.clone(),
            })?;

        Ok(Record::new(
            age,
            self.gender,
            self.medical_condition,
            self.doctor,
            self.hospital,
            self.insurance_provider,
            billing_amount,
            admission_date,
        ))
    }
}
