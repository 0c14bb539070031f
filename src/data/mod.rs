/// Data layer: records, loading, filtering and chart aggregation.
///
/// Architecture:
/// ```text
///   healthcare_dataset.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → RecordStore (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordStore │  Vec<Record>, StoreSummary, gender/condition options
///   └─────────────┘
///        │                              ┌──────────┐
///        ├─────────────────────────────▶│ controls  │  slider bounds, options
///        ▼                              └──────────┘
///   ┌──────────┐
///   │  filter   │  Selection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  FilteredView → Aggregate<T> (Empty | Ready)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  per-chart scoped selections → DashboardFrame
///   └──────────┘
/// ```

pub mod aggregate;
pub mod controls;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
