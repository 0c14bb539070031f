use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use super::model::{Record, RecordStore};

// ---------------------------------------------------------------------------
// Selection – snapshot of the UI filter controls
// ---------------------------------------------------------------------------

/// How the admission-trend series is drawn. Never changes the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
}

impl ChartType {
    pub const ALL: [ChartType; 2] = [ChartType::Line, ChartType::Bar];

    /// Label used by the radio control.
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line Chart",
            ChartType::Bar => "Bar Chart",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Line => write!(f, "line"),
            ChartType::Bar => write!(f, "bar"),
        }
    }
}

/// Current filter/display parameters. `None` means "no filter on this
/// dimension".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub gender: Option<String>,
    pub medical_condition: Option<String>,
    /// Inclusive upper bound on billing amount.
    pub billing_ceiling: Option<f64>,
    pub chart_type: ChartType,
}

impl Selection {
    /// Selection with no filters and the default chart type.
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the gender filter. Blank strings clear it.
    pub fn with_gender(mut self, gender: Option<impl Into<String>>) -> Self {
        self.gender = normalize(gender);
        self
    }

    /// Set the medical-condition filter. Blank strings clear it.
    pub fn with_condition(mut self, condition: Option<impl Into<String>>) -> Self {
        self.medical_condition = normalize(condition);
        self
    }

    pub fn with_ceiling(mut self, ceiling: Option<f64>) -> Self {
        self.billing_ceiling = ceiling.filter(|c| !c.is_nan());
        self
    }

    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Whether no filter dimension is set.
    pub fn is_unfiltered(&self) -> bool {
        self.gender.is_none() && self.medical_condition.is_none() && self.billing_ceiling.is_none()
    }

    /// Conjunction of all present predicates.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(gender) = &self.gender {
            if record.gender != *gender {
                return false;
            }
        }
        if let Some(condition) = &self.medical_condition {
            if record.medical_condition != *condition {
                return false;
            }
        }
        if let Some(ceiling) = self.billing_ceiling {
            if record.billing_amount > ceiling {
                return false;
            }
        }
        true
    }
}

fn normalize(value: Option<impl Into<String>>) -> Option<String> {
    value
        .map(Into::into)
        .filter(|s: &String| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// FilteredView – rows of the store passing a Selection
// ---------------------------------------------------------------------------

/// Borrowed view over the store: matching row indices, in store order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    store: &'a RecordStore,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Every record of the store.
    pub fn full(store: &'a RecordStore) -> Self {
        FilteredView {
            store,
            indices: (0..store.len()).collect(),
        }
    }

    /// Apply a further selection on top of this view.
    pub fn narrow(&self, selection: &Selection) -> FilteredView<'a> {
        let records = self.store.records();
        FilteredView {
            store: self.store,
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| selection.matches(&records[i]))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.store.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Store row indices in the view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the view of `store` passing every present filter in `selection`.
pub fn apply<'a>(store: &'a RecordStore, selection: &Selection) -> FilteredView<'a> {
    if selection.is_unfiltered() {
        return FilteredView::full(store);
    }
    let view = FilteredView::full(store).narrow(selection);
    log::debug!(
        "filter {:?}: {} of {} records",
        selection,
        view.len(),
        store.len()
    );
    view
}
