use serde::Serialize;

use super::filter::ChartType;
use super::model::RecordStore;

/// Slider step of the billing ceiling control.
pub const BILLING_STEP: f64 = 100.0;

/// Percentiles marked on the billing slider.
pub const TICK_QUANTILES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

// ---------------------------------------------------------------------------
// Billing slider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderTick {
    pub value: f64,
    pub label: String,
}

/// Range, default and tick marks of the billing ceiling slider. Derived from
/// the full store once; filters never move it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingSlider {
    pub min: f64,
    pub max: f64,
    /// Median billing amount.
    pub default: f64,
    pub step: f64,
    pub ticks: Vec<SliderTick>,
}

impl BillingSlider {
    /// `None` for an empty store.
    pub fn from_store(store: &RecordStore) -> Option<Self> {
        let mut amounts: Vec<f64> = store.records().iter().map(|r| r.billing_amount).collect();
        if amounts.is_empty() {
            return None;
        }
        amounts.sort_by(f64::total_cmp);

        let mut ticks: Vec<SliderTick> = Vec::with_capacity(TICK_QUANTILES.len());
        for q in TICK_QUANTILES {
            let whole = quantile(&amounts, q).trunc();
            if ticks.last().is_some_and(|t| t.value == whole) {
                continue;
            }
            ticks.push(SliderTick {
                value: whole,
                label: thousands(whole as i64),
            });
        }

        Some(BillingSlider {
            min: amounts[0],
            max: amounts[amounts.len() - 1],
            default: quantile(&amounts, 0.5),
            step: BILLING_STEP,
            ticks,
        })
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// `12345` → `"12,345"`.
fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// ControlSurface – everything the binder needs to build its widgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSurface {
    pub gender_options: Vec<String>,
    pub condition_options: Vec<String>,
    pub billing_slider: Option<BillingSlider>,
    pub chart_types: [ChartType; 2],
}

impl ControlSurface {
    pub fn from_store(store: &RecordStore) -> Self {
        ControlSurface {
            gender_options: store.genders().to_vec(),
            condition_options: store.conditions().to_vec(),
            billing_slider: BillingSlider::from_store(store),
            chart_types: ChartType::ALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::three_record_store;

    #[test]
    fn test_slider_from_example_store() {
        let store = three_record_store();
        let slider = BillingSlider::from_store(&store).unwrap();
        assert_eq!(slider.min, 300.0);
        assert_eq!(slider.max, 1500.0);
        assert_eq!(slider.default, 500.0);
        assert_eq!(slider.step, 100.0);
        // 300, 400, 500, 1000, 1500
        let values: Vec<f64> = slider.ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![300.0, 400.0, 500.0, 1000.0, 1500.0]);
        assert_eq!(slider.ticks[4].label, "1,500");
    }

    #[test]
    fn test_duplicate_ticks_collapse() {
        use crate::data::model::{fixtures::date, Record};
        let records = (0..4)
            .map(|i| Record::new(20, "Male", "Flu", "D", "H", "I", 1000.0 + i as f64 * 0.1, date(2022, 1, 1)))
            .collect();
        let store = RecordStore::from_records(records);
        let slider = BillingSlider::from_store(&store).unwrap();
        assert_eq!(slider.ticks.len(), 1);
        assert_eq!(slider.ticks[0].label, "1,000");
    }

    #[test]
    fn test_empty_store_has_no_slider() {
        assert!(BillingSlider::from_store(&RecordStore::from_records(Vec::new())).is_none());
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(52_764_276), "52,764,276");
        assert_eq!(thousands(-2008), "-2,008");
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_control_surface_options() {
        let controls = ControlSurface::from_store(&three_record_store());
        assert_eq!(controls.gender_options, vec!["Female", "Male"]);
        assert_eq!(controls.condition_options, vec!["Diabetes", "Asthma"]);
        assert_eq!(controls.chart_types, [ChartType::Line, ChartType::Bar]);
        assert!(controls.billing_slider.is_some());
    }
}
