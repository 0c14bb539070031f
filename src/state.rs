use healthcare_dashboard::data::controls::ControlSurface;
use healthcare_dashboard::data::filter::Selection;
use healthcare_dashboard::data::model::RecordStore;
use healthcare_dashboard::data::pipeline::{build_frame, DashboardFrame};

use crate::color::CategoryColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub store: RecordStore,

    /// Control options derived from the full store.
    pub controls: ControlSurface,

    /// Current values of the filter controls.
    pub selection: Selection,

    /// Chart inputs for `selection` (rebuilt on every change).
    pub frame: DashboardFrame,

    pub gender_colors: CategoryColors,
    pub condition_colors: CategoryColors,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        let controls = ControlSurface::from_store(&store);

        // The billing slider starts at the median, so the ceiling is active
        // from the first frame.
        let selection = Selection::all()
            .with_ceiling(controls.billing_slider.as_ref().map(|s| s.default));
        let frame = build_frame(&store, &selection);

        let gender_colors = CategoryColors::new(&controls.gender_options);
        let condition_colors = CategoryColors::new(&controls.condition_options);

        Self {
            store,
            controls,
            selection,
            frame,
            gender_colors,
            condition_colors,
        }
    }

    /// Apply edited control values; recompute only when something changed.
    pub fn update_selection(&mut self, selection: Selection) {
        if selection != self.selection {
            self.frame = build_frame(&self.store, &selection);
            self.selection = selection;
        }
    }
}
