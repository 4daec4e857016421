use proptest::prelude::*;
use trial_bias::{
    datasets::depression,
    metrics::{
        attrition::{
            attrition_by, describe_attrition, dropout_timeline, effectiveness_inflation,
            has_differential_attrition, hidden_population, sensitivity_analysis,
            DEFAULT_DIFFERENTIAL_THRESHOLD,
        },
        AttritionBiasResult, TrialPatient,
    },
};

fn with_dropout(group: &str, dropout_rate: f64) -> AttritionBiasResult {
    AttritionBiasResult {
        group: group.into(),
        total_patients: 100,
        completed_patients: 100,
        dropped_patients: 0,
        dropout_rate,
        remission_rate_completers: 0.0,
        remission_rate_itt: 0.0,
    }
}

fn patient(id: &str, income: &str, weeks: u32, completed: bool, remission: bool) -> TrialPatient {
    TrialPatient {
        patient_id: id.into(),
        age: 40,
        gender: "Female".into(),
        race: Some("White".into()),
        income_level: income.into(),
        treatment_arm: Some("Treatment".into()),
        weeks_in_study: Some(weeks),
        completed,
        remission,
    }
}

#[test]
fn inflation_matches_reference() {
    let inflation = effectiveness_inflation(66.5, 51.5);
    assert!((inflation.absolute_difference - 15.0).abs() < 1e-9);
    assert!((inflation.inflation_factor - 1.2913).abs() < 1e-4);
    assert!((inflation.relative_difference - 29.13).abs() < 1e-2);
}

#[test]
fn inflation_without_itt_baseline_is_neutral() {
    let inflation = effectiveness_inflation(40.0, 0.0);
    assert_eq!(inflation.absolute_difference, 40.0);
    assert_eq!(inflation.relative_difference, 0.0);
    assert_eq!(inflation.inflation_factor, 1.0);
}

#[test]
fn differential_attrition_respects_threshold() {
    let groups = vec![
        with_dropout("High", 0.0),
        with_dropout("Middle", 21.4),
        with_dropout("Low", 47.6),
    ];
    assert!(has_differential_attrition(&groups, 15.0));
    assert!(!has_differential_attrition(&groups, 50.0));
    assert!(!has_differential_attrition(&groups[2..], 0.0));
    assert!(!has_differential_attrition(&[], DEFAULT_DIFFERENTIAL_THRESHOLD));
}

#[test]
fn describes_attrition() {
    let similar = vec![with_dropout("A", 10.0), with_dropout("B", 12.0)];
    insta::assert_snapshot!(
        describe_attrition(&similar),
        @"Dropout rates are similar across groups. Attrition bias is minimal."
    );

    let skewed = vec![with_dropout("Urban", 10.0), with_dropout("Rural", 40.0)];
    insta::assert_snapshot!(
        describe_attrition(&skewed),
        @"Rural patients dropped out at 4.0x the rate of Urban patients (40.0% vs 10.0%). This differential attrition may bias study conclusions."
    );

    insta::assert_snapshot!(
        describe_attrition(&depression::attrition_bias()),
        @"Low Income patients dropped out at a significantly higher rate than High Income patients (47.6% vs 0.0%). This differential attrition may bias study conclusions."
    );
}

#[test]
fn depression_sample_rates() {
    let groups = depression::attrition_bias();
    let middle = &groups[1];
    assert_eq!(middle.dropped_patients, 15);
    assert!((middle.dropout_rate - 21.43).abs() < 0.01);
    assert!((middle.remission_rate_completers - 63.64).abs() < 0.01);
    assert!((middle.remission_rate_itt - 50.0).abs() < 1e-9);
    for group in &groups {
        assert_eq!(group.completed_patients + group.dropped_patients, group.total_patients);
        assert!(group.remission_rate_itt <= group.remission_rate_completers);
    }
}

#[test]
fn hidden_population_totals() {
    let hidden = hidden_population(&depression::attrition_bias());
    assert_eq!(hidden.total_dropped, u64::from(depression::DROPPED_PATIENTS));
    assert_eq!(hidden.total_patients, u64::from(depression::TOTAL_PATIENTS));
    assert!((hidden.percentage_hidden - 22.5).abs() < 1e-9);
    assert_eq!(hidden.most_affected_group.as_deref(), Some("Low Income"));

    let empty = hidden_population(&[]);
    assert_eq!(empty.percentage_hidden, 0.0);
    assert_eq!(empty.most_affected_group, None);
}

#[test]
fn sensitivity_bounds_reference_case() {
    let bounds = sensitivity_analysis(103, 155, 45);
    assert!((bounds.best_case - 74.0).abs() < 1e-9);
    assert!((bounds.worst_case - 51.5).abs() < 1e-9);
    assert!((bounds.mid_case - 66.45).abs() < 0.01);
}

#[test]
fn sensitivity_with_no_patients_is_zero() {
    let bounds = sensitivity_analysis(0, 0, 0);
    assert_eq!((bounds.worst_case, bounds.mid_case, bounds.best_case), (0.0, 0.0, 0.0));
}

#[test]
fn stratifies_patient_records() {
    let patients = vec![
        patient("P001", "High", 12, true, true),
        patient("P002", "Low", 3, false, false),
        patient("P003", "Low", 12, true, true),
        patient("P004", "Low", 5, false, true),
        patient("P005", "High", 12, true, false),
    ];
    let groups = attrition_by(&patients, |p| p.income_level.clone());
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].group, "High");
    assert_eq!(groups[0].dropout_rate, 0.0);
    assert_eq!(groups[0].remission_rate_completers, 50.0);

    let low = &groups[1];
    assert_eq!(low.dropped_patients, 2);
    assert_eq!(low.remission_rate_completers, 100.0);
    assert!((low.remission_rate_itt - 100.0 / 3.0).abs() < 1e-9);

    let timeline = dropout_timeline(&patients, 6);
    assert_eq!(timeline.len(), 6);
    assert_eq!(timeline[2].new_dropouts, 1);
    assert_eq!(timeline[4].cumulative, 2);
    assert_eq!(timeline[5].cumulative, 2);
}

#[test]
fn dropouts_without_a_recorded_week_stay_off_the_timeline() {
    let mut unplaced = patient("P010", "Low", 0, false, false);
    unplaced.weeks_in_study = None;
    let patients = vec![patient("P009", "Low", 2, false, false), unplaced];

    let timeline = dropout_timeline(&patients, 4);
    assert_eq!(timeline[1].new_dropouts, 1);
    assert_eq!(timeline[3].cumulative, 1);
    assert_eq!(attrition_by(&patients, |p| p.income_level.clone())[0].dropped_patients, 2);
}

#[test]
fn patient_records_without_optional_fields_deserialize() {
    let patient: TrialPatient = serde_json::from_str(
        r#"{"patientId":"P001","age":34,"gender":"Female","incomeLevel":"High","completed":true,"remission":true}"#,
    )
    .unwrap();
    assert_eq!(patient.race, None);
    assert_eq!(patient.weeks_in_study, None);
}

#[test]
fn hidden_population_totals_do_not_overflow() {
    let huge = AttritionBiasResult::from_counts("A", 3_000_000_000, 1_000_000_000, 0);
    let groups = vec![huge.clone(), AttritionBiasResult { group: "B".into(), ..huge }];

    let hidden = hidden_population(&groups);
    assert_eq!(hidden.total_patients, 6_000_000_000);
    assert_eq!(hidden.total_dropped, 4_000_000_000);
    assert!((hidden.percentage_hidden - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn bundled_timeline_ends_at_total_dropouts() {
    let last = depression::DROPOUT_TIMELINE.last().unwrap();
    assert_eq!(last.week, depression::STUDY_WEEKS);
    assert_eq!(last.cumulative, depression::DROPPED_PATIENTS);
}

proptest! {
    #[test]
    fn sensitivity_bounds_are_ordered(
        (completers, remitted) in (0u32..500).prop_flat_map(|c| (Just(c), 0..=c)),
        dropped in 0u32..500,
    ) {
        let bounds = sensitivity_analysis(remitted, completers, dropped);
        prop_assert!(bounds.worst_case <= bounds.mid_case);
        prop_assert!(bounds.mid_case <= bounds.best_case);
    }
}
