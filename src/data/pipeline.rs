use serde::Serialize;

use super::aggregate::{
    admission_trends, age_distribution, billing_distribution, condition_distribution,
    insurance_comparison, AdmissionTrends, AgeDistribution, Aggregate, CategoryCount, Histogram,
    InsuranceComparison,
};
use super::filter::{apply, Selection};
use super::model::RecordStore;

/// The dashboard's charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chart {
    AgeDistribution,
    ConditionDistribution,
    InsuranceComparison,
    BillingDistribution,
    AdmissionTrends,
}

impl Chart {
    pub const ALL: [Chart; 5] = [
        Chart::AgeDistribution,
        Chart::ConditionDistribution,
        Chart::InsuranceComparison,
        Chart::BillingDistribution,
        Chart::AdmissionTrends,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Chart::AgeDistribution => "Patient Age Distribution",
            Chart::ConditionDistribution => "Patient Medical Condition Distribution",
            Chart::InsuranceComparison => "Insurance Provider Comparison",
            Chart::BillingDistribution => "Billing Amount Distribution",
            Chart::AdmissionTrends => "Trends in Admission",
        }
    }
}

impl Selection {
    /// Keep only the controls wired to `chart`: gender feeds every chart, the
    /// billing ceiling only the billing histogram, the condition dropdown only
    /// the admission trends.
    pub fn scoped_to(&self, chart: Chart) -> Selection {
        let mut scoped = Selection {
            gender: self.gender.clone(),
            medical_condition: None,
            billing_ceiling: None,
            chart_type: self.chart_type,
        };
        match chart {
            Chart::BillingDistribution => scoped.billing_ceiling = self.billing_ceiling,
            Chart::AdmissionTrends => scoped.medical_condition = self.medical_condition.clone(),
            Chart::AgeDistribution | Chart::ConditionDistribution | Chart::InsuranceComparison => {}
        }
        scoped
    }
}

/// One chart's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", content = "result", rename_all = "snake_case")]
pub enum ChartData {
    AgeDistribution(Aggregate<AgeDistribution>),
    ConditionDistribution(Aggregate<Vec<CategoryCount>>),
    InsuranceComparison(Aggregate<InsuranceComparison>),
    BillingDistribution(Aggregate<Histogram>),
    AdmissionTrends(Aggregate<AdmissionTrends>),
}

/// Filter with the chart's scoped selection, then aggregate.
pub fn render_chart(store: &RecordStore, selection: &Selection, chart: Chart) -> ChartData {
    let scoped = selection.scoped_to(chart);
    let view = apply(store, &scoped);
    match chart {
        Chart::AgeDistribution => ChartData::AgeDistribution(age_distribution(&view)),
        Chart::ConditionDistribution => {
            ChartData::ConditionDistribution(condition_distribution(&view))
        }
        Chart::InsuranceComparison => ChartData::InsuranceComparison(insurance_comparison(&view)),
        Chart::BillingDistribution => ChartData::BillingDistribution(billing_distribution(&view)),
        Chart::AdmissionTrends => {
            ChartData::AdmissionTrends(admission_trends(&view, scoped.chart_type))
        }
    }
}

/// Every chart's result for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFrame {
    pub selection: Selection,
    pub age_distribution: Aggregate<AgeDistribution>,
    pub condition_distribution: Aggregate<Vec<CategoryCount>>,
    pub insurance_comparison: Aggregate<InsuranceComparison>,
    pub billing_distribution: Aggregate<Histogram>,
    pub admission_trends: Aggregate<AdmissionTrends>,
}

/// Recompute all charts from scratch.
pub fn build_frame(store: &RecordStore, selection: &Selection) -> DashboardFrame {
    log::debug!("rebuilding dashboard for {selection:?}");

    // Age, condition and insurance charts share the gender-only view.
    let demographics = apply(store, &selection.scoped_to(Chart::AgeDistribution));
    let billing = apply(store, &selection.scoped_to(Chart::BillingDistribution));
    let admissions = apply(store, &selection.scoped_to(Chart::AdmissionTrends));

    DashboardFrame {
        selection: selection.clone(),
        age_distribution: age_distribution(&demographics),
        condition_distribution: condition_distribution(&demographics),
        insurance_comparison: insurance_comparison(&demographics),
        billing_distribution: billing_distribution(&billing),
        admission_trends: admission_trends(&admissions, selection.chart_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::ChartType;
    use crate::data::model::fixtures::three_record_store;

    fn full_selection() -> Selection {
        Selection::all()
            .with_gender(Some("Female"))
            .with_condition(Some("Asthma"))
            .with_ceiling(Some(400.0))
            .with_chart_type(ChartType::Bar)
    }

    #[test]
    fn test_scoping_matches_control_wiring() {
        let sel = full_selection();

        let age = sel.scoped_to(Chart::AgeDistribution);
        assert_eq!(age.gender.as_deref(), Some("Female"));
        assert!(age.medical_condition.is_none() && age.billing_ceiling.is_none());

        let billing = sel.scoped_to(Chart::BillingDistribution);
        assert_eq!(billing.billing_ceiling, Some(400.0));
        assert!(billing.medical_condition.is_none());

        let trends = sel.scoped_to(Chart::AdmissionTrends);
        assert_eq!(trends.medical_condition.as_deref(), Some("Asthma"));
        assert!(trends.billing_ceiling.is_none());
        assert_eq!(trends.chart_type, ChartType::Bar);
    }

    #[test]
    fn test_condition_filter_only_affects_trends() {
        let store = three_record_store();
        let frame = build_frame(&store, &Selection::all().with_condition(Some("Asthma")));

        let conditions = frame.condition_distribution.as_ready().unwrap();
        assert_eq!(conditions.len(), 2);

        let trends = frame.admission_trends.as_ready().unwrap();
        assert_eq!(trends.points.len(), 1);
        assert_eq!(trends.points[0].label(), "2023-02");
    }

    #[test]
    fn test_frame_matches_single_chart_rendering() {
        let store = three_record_store();
        let sel = full_selection();
        let frame = build_frame(&store, &sel);

        assert_eq!(
            render_chart(&store, &sel, Chart::BillingDistribution),
            ChartData::BillingDistribution(frame.billing_distribution.clone())
        );
        assert_eq!(
            render_chart(&store, &sel, Chart::AdmissionTrends),
            ChartData::AdmissionTrends(frame.admission_trends.clone())
        );
        assert_eq!(
            render_chart(&store, &sel, Chart::AgeDistribution),
            ChartData::AgeDistribution(frame.age_distribution.clone())
        );
    }

    fn is_blank(data: &ChartData) -> bool {
        match data {
            ChartData::AgeDistribution(a) => a.is_empty(),
            ChartData::ConditionDistribution(a) => a.is_empty(),
            ChartData::InsuranceComparison(a) => a.is_empty(),
            ChartData::BillingDistribution(a) => a.is_empty(),
            ChartData::AdmissionTrends(a) => a.is_empty(),
        }
    }

    #[test]
    fn test_empty_gender_blanks_every_chart() {
        let store = three_record_store();
        let sel = Selection::all().with_gender(Some("Unknown"));
        for chart in Chart::ALL {
            assert!(is_blank(&render_chart(&store, &sel, chart)), "{chart:?}");
        }
    }

    #[test]
    fn test_ceiling_below_every_bill_only_blanks_billing() {
        let store = three_record_store();
        let frame = build_frame(&store, &Selection::all().with_ceiling(Some(100.0)));
        assert!(frame.billing_distribution.is_empty());
        assert!(!frame.age_distribution.is_empty());
        assert!(!frame.admission_trends.is_empty());
    }

    #[test]
    fn test_frame_serializes_empty_sentinel() {
        let store = three_record_store();
        let frame = build_frame(&store, &Selection::all().with_ceiling(Some(0.0)));
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["billing_distribution"]["status"], "empty");
        assert_eq!(json["age_distribution"]["status"], "ready");
        assert_eq!(
            json["admission_trends"]["data"]["points"][0]["month"],
            "2023-01"
        );
    }
}
