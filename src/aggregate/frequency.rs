use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::TabularData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Counts rows per category, most frequent first.
///
/// Ties keep the order in which categories first appear. Rows without a
/// category are not counted.
#[must_use]
pub fn category_frequency(data: &TabularData) -> Vec<CategoryCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for category in data.rows().iter().filter_map(|row| row.category()) {
        *counts.entry(category).or_insert(0) += 1;
    }

    let mut frequency: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect();
    // Stable sort keeps first-appearance order among equal counts.
    frequency.sort_by(|a, b| b.count.cmp(&a.count));
    frequency
}
