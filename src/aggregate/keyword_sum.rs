use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::TabularData;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Case-insensitive substring test; an empty keyword matches every category.
#[must_use]
pub fn category_matches(category: &str, keyword: &str) -> bool {
    keyword.is_empty() || category.to_lowercase().contains(&keyword.to_lowercase())
}

/// Sums coerced `value`s per category for categories containing `keyword`.
///
/// Values that fail numeric coercion contribute nothing, but their category
/// still appears with whatever total the other rows provide. Output is
/// ordered by category name. Totals are not capped and may overflow to
/// infinity.
#[must_use]
pub fn keyword_filtered_sum(data: &TabularData, keyword: &str) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for row in data.rows() {
        let Some(category) = row.category() else {
            continue;
        };
        if !category_matches(category, keyword) {
            continue;
        }
        *totals.entry(category).or_insert(0.0) += row.numeric_value().unwrap_or(0.0);
    }

    totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
        })
        .collect()
}
