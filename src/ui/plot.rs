use eframe::egui::{Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};
use healthcare_dashboard::data::aggregate::{
    AdmissionTrends, AgeDistribution, Aggregate, BinEdges, CategoryCount, Histogram,
    InsuranceComparison,
};
use healthcare_dashboard::data::filter::ChartType;
use healthcare_dashboard::data::pipeline::Chart;

use crate::color::CategoryColors;
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Central panel – one card per chart
// ---------------------------------------------------------------------------

pub fn charts(ui: &mut Ui, state: &AppState) {
    let frame = &state.frame;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            chart_card(ui, Chart::AgeDistribution, &frame.age_distribution, |ui, age| {
                age_plot(ui, age, &state.gender_colors)
            });
            chart_card(
                ui,
                Chart::ConditionDistribution,
                &frame.condition_distribution,
                |ui, shares| condition_plot(ui, shares, &state.condition_colors),
            );
            chart_card(
                ui,
                Chart::InsuranceComparison,
                &frame.insurance_comparison,
                |ui, cmp| insurance_plot(ui, cmp, &state.condition_colors),
            );
            chart_card(
                ui,
                Chart::BillingDistribution,
                &frame.billing_distribution,
                billing_plot,
            );
            chart_card(ui, Chart::AdmissionTrends, &frame.admission_trends, trends_plot);
        });
}

/// Title plus either the plot or a blank placeholder for `Empty`.
fn chart_card<T>(
    ui: &mut Ui,
    chart: Chart,
    result: &Aggregate<T>,
    draw: impl FnOnce(&mut Ui, &T),
) {
    ui.group(|ui: &mut Ui| {
        ui.heading(chart.title());
        match result {
            Aggregate::Ready(data) => draw(ui, data),
            Aggregate::Empty => {
                ui.allocate_ui([ui.available_width(), PLOT_HEIGHT].into(), |ui: &mut Ui| {
                    ui.centered_and_justified(|ui: &mut Ui| {
                        ui.weak("No records match the current filters");
                    });
                });
            }
        }
    });
    ui.add_space(8.0);
}

/// Axis formatter showing `labels[i]` at integer position `i`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

fn histogram_bars(edges: &BinEdges, counts: &[usize]) -> Vec<Bar> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let (start, end) = edges.range(i);
            Bar::new((start + end) / 2.0, count as f64).width(end - start)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn age_plot(ui: &mut Ui, age: &AgeDistribution, colors: &CategoryColors) {
    // Stacked: each gender sits on the ones drawn before it.
    let mut stacked: Vec<BarChart> = Vec::with_capacity(age.series.len());
    for series in &age.series {
        let chart = BarChart::new(histogram_bars(&age.edges, &series.counts))
            .name(&series.gender)
            .color(colors.color_for(&series.gender));
        let below: Vec<&BarChart> = stacked.iter().collect();
        stacked.push(chart.stack_on(&below));
    }

    Plot::new("age_distribution")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Age")
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            for chart in stacked {
                plot_ui.bar_chart(chart);
            }
        });
}

fn condition_plot(ui: &mut Ui, shares: &[CategoryCount], colors: &CategoryColors) {
    let labels: Vec<String> = shares.iter().map(|s| s.label.clone()).collect();
    Plot::new("condition_distribution")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .y_axis_label("Share of patients (%)")
        .x_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            for (i, share) in shares.iter().enumerate() {
                let bar = Bar::new(i as f64, share.fraction * 100.0)
                    .width(0.7)
                    .name(format!("{} ({})", share.label, share.count));
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(&share.label)
                        .color(colors.color_for(&share.label)),
                );
            }
        });
}

fn insurance_plot(ui: &mut Ui, cmp: &InsuranceComparison, colors: &CategoryColors) {
    let n = cmp.conditions.len().max(1) as f64;
    let width = 0.8 / n;
    let charts: Vec<BarChart> = cmp
        .conditions
        .iter()
        .enumerate()
        .map(|(c, condition)| {
            let offset = (c as f64 - (n - 1.0) / 2.0) * width;
            let bars = cmp
                .providers
                .iter()
                .enumerate()
                .filter_map(|(p, provider)| {
                    let total = cmp.total(provider, condition)?;
                    Some(Bar::new(p as f64 + offset, total).width(width))
                })
                .collect();
            BarChart::new(bars)
                .name(condition)
                .color(colors.color_for(condition))
        })
        .collect();

    Plot::new("insurance_comparison")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Insurance Provider")
        .y_axis_label("Billing Amount")
        .x_axis_formatter(category_axis(cmp.providers.clone()))
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn billing_plot(ui: &mut Ui, hist: &Histogram) {
    let chart = BarChart::new(histogram_bars(&hist.edges, &hist.counts))
        .name(format!("Billing Amount ({} records)", hist.total()))
        .color(Color32::from_rgb(99, 110, 250));

    Plot::new("billing_distribution")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Billing Amount")
        .y_axis_label("Count")
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn trends_plot(ui: &mut Ui, trends: &AdmissionTrends) {
    let labels: Vec<String> = trends.points.iter().map(|p| p.label()).collect();
    let color = Color32::from_rgb(99, 110, 250);

    let plot = Plot::new("admission_trends")
        .height(PLOT_HEIGHT)
        .x_axis_label("Year Month")
        .y_axis_label("Count")
        .x_axis_formatter(category_axis(labels));

    match trends.chart_type {
        ChartType::Line => {
            let points: PlotPoints = trends
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| [i as f64, p.count as f64])
                .collect();
            let line = Line::new(points).name("Count").color(color).width(1.5);
            plot.show(ui, |plot_ui| plot_ui.line(line));
        }
        ChartType::Bar => {
            let bars = trends
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| Bar::new(i as f64, p.count as f64).width(0.8))
                .collect();
            let chart = BarChart::new(bars).name("Count").color(color);
            plot.show(ui, |plot_ui| plot_ui.bar_chart(chart));
        }
    }
}
