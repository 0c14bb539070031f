//! Headless dashboard: prints the summary, control surface and every chart's
//! data for one selection as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use healthcare_dashboard::config::DataSource;
use healthcare_dashboard::data::controls::ControlSurface;
use healthcare_dashboard::data::filter::{ChartType, Selection};
use healthcare_dashboard::data::loader;
use healthcare_dashboard::data::model::StoreSummary;
use healthcare_dashboard::data::pipeline::{build_frame, DashboardFrame};

#[derive(Parser, Debug)]
#[command(
    name = "dashboard-report",
    version,
    about = "Print the dashboard's chart data for one selection as JSON."
)]
struct Args {
    #[command(flatten)]
    source: DataSource,

    /// Only patients of this gender.
    #[arg(long)]
    gender: Option<String>,

    /// Medical condition for the admission trends.
    #[arg(long)]
    condition: Option<String>,

    /// Inclusive billing ceiling for the billing histogram.
    #[arg(long)]
    ceiling: Option<f64>,

    /// How the admission trends are drawn.
    #[arg(long, value_enum, default_value_t = ChartType::Line)]
    chart: ChartType,
}

impl Args {
    fn selection(&self) -> Selection {
        Selection::all()
            .with_gender(self.gender.clone())
            .with_condition(self.condition.clone())
            .with_ceiling(self.ceiling)
            .with_chart_type(self.chart)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a StoreSummary,
    controls: ControlSurface,
    frame: DashboardFrame,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let data_path = &args.source.data_path;
    let store = loader::load_file(data_path)
        .with_context(|| format!("loading {}", data_path.display()))?;

    let report = Report {
        summary: store.summary(),
        controls: ControlSurface::from_store(&store),
        frame: build_frame(&store, &args.selection()),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing report")?
    );
    Ok(())
}
