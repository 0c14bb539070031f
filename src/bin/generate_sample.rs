//! Writes a synthetic healthcare dataset in the layout the dashboard loads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Parser;
use serde::Serialize;

const GENDERS: [&str; 2] = ["Male", "Female"];
const CONDITIONS: [&str; 6] = ["Arthritis", "Asthma", "Cancer", "Diabetes", "Hypertension", "Obesity"];
const INSURERS: [&str; 5] = ["Aetna", "Blue Cross", "Cigna", "Medicare", "UnitedHealthcare"];
const HOSPITALS: [&str; 8] = [
    "Mercy General", "St. Luke's", "Riverside Medical", "Lakeview Clinic",
    "Northgate Hospital", "Cedar Valley", "Harbor Health", "Summit Regional",
];
const SURNAMES: [&str; 10] = [
    "Nguyen", "Okafor", "Schmidt", "Patel", "Garcia", "Kowalski", "Haddad", "Tanaka", "Moreau", "Silva",
];

/// Deterministic splitmix64 generator so repeated runs produce the same file.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

#[derive(Parser, Debug)]
#[command(name = "generate-sample", about = "Write a deterministic sample dataset.")]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "healthcare_dataset.csv")]
    output: PathBuf,

    /// Number of records to generate.
    #[arg(default_value_t = 2_000)]
    rows: usize,

    /// PRNG seed; equal seeds give identical files.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Gender")]
    gender: &'static str,
    #[serde(rename = "Medical Condition")]
    medical_condition: &'static str,
    #[serde(rename = "Date of Admission")]
    admission_date: String,
    #[serde(rename = "Doctor")]
    doctor: String,
    #[serde(rename = "Hospital")]
    hospital: &'static str,
    #[serde(rename = "Insurance Provider")]
    insurance_provider: &'static str,
    #[serde(rename = "Billing Amount")]
    billing_amount: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let Args { output, rows, seed } = Args::parse();

    let mut rng = SampleRng(seed);
    let first_day = NaiveDate::from_ymd_opt(2019, 5, 1).context("invalid start date")?;
    let span_days = 5 * 365;

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;

    for i in 0..rows {
        let condition = rng.pick(&CONDITIONS);
        // Chronic conditions skew older and costlier.
        let (age_base, cost_base) = match condition {
            "Arthritis" | "Hypertension" => (45, 22_000.0),
            "Cancer" => (50, 30_000.0),
            _ => (18, 15_000.0),
        };
        let admitted = first_day + Duration::days(rng.below(span_days) as i64);

        let row = SampleRow {
            name: format!("Patient {i:05}"),
            age: age_base + rng.below(40) as u32,
            gender: rng.pick(&GENDERS),
            medical_condition: condition,
            admission_date: admitted.format("%Y-%m-%d").to_string(),
            doctor: format!("Dr. {}", rng.pick(&SURNAMES)),
            hospital: rng.pick(&HOSPITALS),
            insurance_provider: rng.pick(&INSURERS),
            billing_amount: format!("{:.2}", cost_base + rng.next_f64() * 28_000.0),
        };
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {rows} records to {}", output.display());
    println!("Wrote {rows} records to {}", output.display());
    Ok(())
}
