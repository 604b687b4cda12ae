use chart_lab::SessionState;
use chart_lab::aggregate::{
    DerivedViews, category_frequency, keyword_filtered_sum, threshold_subset,
};
use chart_lab::data::{DocumentData, DocumentRecord, TabularData, TabularRow};
use proptest::prelude::*;

fn tabular_strategy() -> impl Strategy<Value = TabularData> {
    proptest::collection::vec(
        (
            prop_oneof![
                Just("Sleep"),
                Just("Study"),
                Just("Food"),
                Just("sleep in"),
                Just("")
            ],
            prop_oneof![
                (-100.0f64..100.0).prop_map(|v| v.to_string()),
                Just("n/a".to_owned()),
                Just(String::new()),
            ],
        ),
        0..48,
    )
    .prop_map(|rows| {
        TabularData::from_rows(
            rows.into_iter()
                .map(|(category, value)| TabularRow::new(category, value))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn frequency_counts_every_categorized_row_once(data in tabular_strategy()) {
        let frequency = category_frequency(&data);
        let categorized = data.rows().iter().filter(|row| row.category().is_some()).count();
        prop_assert_eq!(frequency.iter().map(|entry| entry.count).sum::<usize>(), categorized);
        prop_assert!(frequency.windows(2).all(|pair| pair[0].count >= pair[1].count));
    }

    #[test]
    fn keyword_results_are_a_subset_of_the_unfiltered_sum(
        data in tabular_strategy(),
        keyword in "[a-zA-Z ]{0,4}",
    ) {
        let all = keyword_filtered_sum(&data, "");
        let filtered = keyword_filtered_sum(&data, &keyword);
        for entry in &filtered {
            let full = all.iter().find(|candidate| candidate.category == entry.category);
            prop_assert_eq!(full.map(|candidate| candidate.total), Some(entry.total));
            prop_assert!(entry.category.to_lowercase().contains(&keyword.to_lowercase()));
        }
    }

    #[test]
    fn threshold_subset_only_keeps_values_above(
        values in proptest::collection::vec(0.0f64..5.0, 0..32),
        threshold in 0.0f64..5.0,
    ) {
        let document = DocumentData::from_records(
            values
                .iter()
                .enumerate()
                .map(|(i, value)| DocumentRecord::new(format!("p{i}"), *value))
                .collect(),
        );
        let subset = threshold_subset(&document, threshold);
        prop_assert_eq!(
            subset.len(),
            values.iter().filter(|value| **value > threshold).count()
        );
        prop_assert!(subset.iter().all(|record| record.value.is_some_and(|v| v > threshold)));
    }

    #[test]
    fn derived_views_are_deterministic(data in tabular_strategy(), keyword in "[a-z]{0,3}") {
        let document = DocumentData::from_records(vec![DocumentRecord::new("A", 1.0)]);
        let mut session = SessionState::default();
        session.set_filter_keyword(keyword);
        prop_assert_eq!(
            DerivedViews::compute(&data, &document, &session),
            DerivedViews::compute(&data, &document, &session)
        );
    }
}
