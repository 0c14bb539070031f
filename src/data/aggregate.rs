use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::{ChartType, FilteredView};
use super::model::{distinct_in_order, YearMonth};

/// Bin count of the age histogram.
pub const AGE_BINS: usize = 10;
/// Bin count of the billing histogram.
pub const BILLING_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Aggregate – explicit "nothing to draw" marker
// ---------------------------------------------------------------------------

/// Result of an aggregator. `Empty` means the input view had no rows and is
/// distinct from a result whose counts happen to be zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Aggregate<T> {
    Empty,
    Ready(T),
}

impl<T> Aggregate<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Aggregate::Empty)
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Aggregate::Ready(v) => Some(v),
            Aggregate::Empty => None,
        }
    }

    /// `Empty` for an empty view, otherwise run `f`.
    fn from_view(view: &FilteredView<'_>, f: impl FnOnce() -> T) -> Self {
        if view.is_empty() {
            Aggregate::Empty
        } else {
            Aggregate::Ready(f())
        }
    }
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// `bins + 1` equal-width edges from the min to the max of `values`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinEdges {
    pub edges: Vec<f64>,
}

impl BinEdges {
    /// Returns `None` if `values` is empty.
    fn spanning(values: impl Iterator<Item = f64>, bins: usize) -> Option<Self> {
        let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
        // A constant column still gets a well-formed range.
        let max = if max > min { max } else { min + 1.0 };
        let width = (max - min) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| min + i as f64 * width).collect();
        edges.push(max);
        Some(BinEdges { edges })
    }

    pub fn bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Bin index of `v`; the last bin is closed so the maximum is counted.
    fn index_of(&self, v: f64) -> usize {
        let idx = ((v - self.edges[0]) / self.width()).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(self.bins() - 1)
        }
    }

    /// `(start, end)` of bin `i`.
    pub fn range(&self, i: usize) -> (f64, f64) {
        (self.edges[i], self.edges[i + 1])
    }

    pub fn width(&self) -> f64 {
        (self.edges[self.bins()] - self.edges[0]) / self.bins() as f64
    }

    fn count(&self, values: impl Iterator<Item = f64>) -> Vec<usize> {
        let mut counts = vec![0; self.bins()];
        for v in values {
            counts[self.index_of(v)] += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: BinEdges,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Age distribution
// ---------------------------------------------------------------------------

/// Counts for one gender over the shared bin edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderSeries {
    pub gender: String,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDistribution {
    pub edges: BinEdges,
    pub series: Vec<GenderSeries>,
}

/// Age histogram ([`AGE_BINS`] bins over the view's age range), split by
/// gender in first-appearance order.
pub fn age_distribution(view: &FilteredView<'_>) -> Aggregate<AgeDistribution> {
    Aggregate::from_view(view, || {
        let edges = BinEdges::spanning(view.iter().map(|r| r.age as f64), AGE_BINS)
            .unwrap_or_else(|| BinEdges { edges: vec![0.0, 1.0] });
        let genders = distinct_in_order(view.iter().map(|r| r.gender.as_str()));
        let series = genders
            .into_iter()
            .map(|gender| {
                let counts = edges.count(
                    view.iter()
                        .filter(|r| r.gender == gender)
                        .map(|r| r.age as f64),
                );
                GenderSeries { gender, counts }
            })
            .collect();
        AgeDistribution { edges, series }
    })
}

// ---------------------------------------------------------------------------
// Condition distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// Share of the view, in `0.0..=1.0`.
    pub fraction: f64,
}

/// Records per medical condition present in the view.
pub fn condition_distribution(view: &FilteredView<'_>) -> Aggregate<Vec<CategoryCount>> {
    Aggregate::from_view(view, || {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for r in view.iter() {
            *counts.entry(r.medical_condition.as_str()).or_default() += 1;
        }
        let total = view.len() as f64;
        distinct_in_order(view.iter().map(|r| r.medical_condition.as_str()))
            .into_iter()
            .map(|label| {
                let count = counts[label.as_str()];
                CategoryCount {
                    fraction: count as f64 / total,
                    label,
                    count,
                }
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Insurance comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsuranceRow {
    pub provider: String,
    pub condition: String,
    pub total_billing: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsuranceComparison {
    /// Bar groups, first-appearance order.
    pub providers: Vec<String>,
    /// Series within each group, first-appearance order.
    pub conditions: Vec<String>,
    /// One row per (provider, condition) pair present in the view, ordered by
    /// provider then condition.
    pub rows: Vec<InsuranceRow>,
}

impl InsuranceComparison {
    /// Billing total for a pair, `None` if the pair never occurs.
    pub fn total(&self, provider: &str, condition: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.provider == provider && r.condition == condition)
            .map(|r| r.total_billing)
    }
}

/// Sum of billing per (insurance provider, medical condition).
pub fn insurance_comparison(view: &FilteredView<'_>) -> Aggregate<InsuranceComparison> {
    Aggregate::from_view(view, || {
        let providers = distinct_in_order(view.iter().map(|r| r.insurance_provider.as_str()));
        let conditions = distinct_in_order(view.iter().map(|r| r.medical_condition.as_str()));

        let mut sums: HashMap<(&str, &str), f64> = HashMap::new();
        for r in view.iter() {
            *sums
                .entry((r.insurance_provider.as_str(), r.medical_condition.as_str()))
                .or_default() += r.billing_amount;
        }

        let mut rows = Vec::with_capacity(sums.len());
        for provider in &providers {
            for condition in &conditions {
                if let Some(total) = sums.get(&(provider.as_str(), condition.as_str())) {
                    rows.push(InsuranceRow {
                        provider: provider.clone(),
                        condition: condition.clone(),
                        total_billing: *total,
                    });
                }
            }
        }

        InsuranceComparison {
            providers,
            conditions,
            rows,
        }
    })
}

// ---------------------------------------------------------------------------
// Billing distribution
// ---------------------------------------------------------------------------

/// Billing histogram over [`BILLING_BINS`] bins. Any ceiling has already
/// been applied to `view` by the filter.
pub fn billing_distribution(view: &FilteredView<'_>) -> Aggregate<Histogram> {
    Aggregate::from_view(view, || {
        let edges = BinEdges::spanning(view.iter().map(|r| r.billing_amount), BILLING_BINS)
            .unwrap_or_else(|| BinEdges { edges: vec![0.0, 1.0] });
        let counts = edges.count(view.iter().map(|r| r.billing_amount));
        Histogram { edges, counts }
    })
}

// ---------------------------------------------------------------------------
// Admission trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    pub month: YearMonth,
    pub count: usize,
}

impl MonthCount {
    /// `YYYY-MM` axis label.
    pub fn label(&self) -> String {
        self.month.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissionTrends {
    /// Rendering hint carried through from the selection.
    pub chart_type: ChartType,
    /// Ascending by month, one entry per month present.
    pub points: Vec<MonthCount>,
}

/// Admissions per year-month of the (already gender/condition filtered)
/// view.
pub fn admission_trends(
    view: &FilteredView<'_>,
    chart_type: ChartType,
) -> Aggregate<AdmissionTrends> {
    Aggregate::from_view(view, || {
        let mut per_month: BTreeMap<YearMonth, usize> = BTreeMap::new();
        for r in view.iter() {
            *per_month.entry(r.admission_month).or_default() += 1;
        }
        AdmissionTrends {
            chart_type,
            points: per_month
                .into_iter()
                .map(|(month, count)| MonthCount { month, count })
                .collect(),
        }
    })
}
