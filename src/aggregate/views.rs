use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::aggregate::{
    CategoryCount, CategoryTotal, category_frequency, keyword_filtered_sum, threshold_subset,
};
use crate::data::{DocumentData, DocumentRecord, TabularData};
use crate::session::SessionState;

/// The three views one render pass draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedViews {
    pub frequency: Vec<CategoryCount>,
    pub keyword_totals: Vec<CategoryTotal>,
    pub above_threshold: Vec<DocumentRecord>,
}

impl DerivedViews {
    #[must_use]
    pub fn compute(tabular: &TabularData, document: &DocumentData, session: &SessionState) -> Self {
        let views = Self {
            frequency: category_frequency(tabular),
            keyword_totals: keyword_filtered_sum(tabular, session.filter_keyword()),
            above_threshold: threshold_subset(document, session.usage_threshold()),
        };
        trace!(
            categories = views.frequency.len(),
            keyword_matches = views.keyword_totals.len(),
            above_threshold = views.above_threshold.len(),
            "computed derived views"
        );
        views
    }
}
