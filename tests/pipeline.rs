use std::io::Write;

use healthcare_dashboard::data::aggregate::Aggregate;
use healthcare_dashboard::data::controls::ControlSurface;
use healthcare_dashboard::data::filter::{apply, ChartType, Selection};
use healthcare_dashboard::data::loader::{load_file, DataLoadError};
use healthcare_dashboard::data::pipeline::{build_frame, render_chart, Chart, ChartData};

const EXAMPLE_CSV: &str = "\
Name,Age,Gender,Blood Type,Medical Condition,Date of Admission,Doctor,Hospital,Insurance Provider,Billing Amount,Room Number
Ann Lee,34,Female,A+,Diabetes,2023-01-05,Dr. A,General,Aetna,500,101
Bo Park,61,Male,O-,Diabetes,2023-01-20,Dr. B,General,Cigna,1500,102
Cy Diaz,27,Female,B+,Asthma,2023-02-10,Dr. A,St. Mary,Aetna,300,103
";

fn write_csv(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_end_to_end_example() {
    let file = write_csv(EXAMPLE_CSV);
    let store = load_file(file.path()).unwrap();

    assert_eq!(store.summary().total_records, 3);
    assert_eq!(store.summary().mean_billing, 766.667);

    let female = Selection::all().with_gender(Some("Female"));
    assert_eq!(apply(&store, &female).len(), 2);

    let frame = build_frame(&store, &female);
    let conditions: Vec<(String, usize)> = frame
        .condition_distribution
        .as_ready()
        .unwrap()
        .iter()
        .map(|c| (c.label.clone(), c.count))
        .collect();
    assert_eq!(
        conditions,
        vec![("Diabetes".to_string(), 1), ("Asthma".to_string(), 1)]
    );

    let trends: Vec<(String, usize)> = frame
        .admission_trends
        .as_ready()
        .unwrap()
        .points
        .iter()
        .map(|p| (p.label(), p.count))
        .collect();
    assert_eq!(
        trends,
        vec![("2023-01".to_string(), 1), ("2023-02".to_string(), 1)]
    );

    let capped = apply(&store, &Selection::all().with_ceiling(Some(500.0)));
    let billed: Vec<f64> = capped.iter().map(|r| r.billing_amount).collect();
    assert_eq!(billed, vec![500.0, 300.0]);
}

#[test]
fn test_controls_from_loaded_file() {
    let file = write_csv(EXAMPLE_CSV);
    let store = load_file(file.path()).unwrap();
    let controls = ControlSurface::from_store(&store);
    let slider = controls.billing_slider.unwrap();
    assert_eq!((slider.min, slider.max, slider.default), (300.0, 1500.0, 500.0));
    assert_eq!(controls.gender_options, vec!["Female", "Male"]);
}

#[test]
fn test_trends_chart_type_is_a_hint() {
    let file = write_csv(EXAMPLE_CSV);
    let store = load_file(file.path()).unwrap();

    let line = render_chart(&store, &Selection::all(), Chart::AdmissionTrends);
    let bar = render_chart(
        &store,
        &Selection::all().with_chart_type(ChartType::Bar),
        Chart::AdmissionTrends,
    );
    match (line, bar) {
        (ChartData::AdmissionTrends(Aggregate::Ready(l)), ChartData::AdmissionTrends(Aggregate::Ready(b))) => {
            assert_eq!(l.points, b.points);
            assert_eq!(l.chart_type, ChartType::Line);
            assert_eq!(b.chart_type, ChartType::Bar);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_unparseable_date_is_fatal() {
    let file = write_csv(&EXAMPLE_CSV.replace("2023-02-10", "10 Feb 2023"));
    match load_file(file.path()) {
        Err(DataLoadError::InvalidDate { row, value }) => {
            assert_eq!(row, 3);
            assert_eq!(value, "10 Feb 2023");
        }
        other => panic!("expected InvalidDate, got {other:?}"),
    }
}

#[test]
fn test_ragged_row_is_fatal() {
    let file = write_csv(&format!("{EXAMPLE_CSV}Dee,40,Male\n"));
    assert!(matches!(load_file(file.path()), Err(DataLoadError::Csv(_))));
}
