use crate::data::{DocumentData, DocumentRecord};

/// Records whose numeric value strictly exceeds `threshold`, in document order.
///
/// Records without a numeric value never qualify.
#[must_use]
pub fn threshold_subset(data: &DocumentData, threshold: f64) -> Vec<DocumentRecord> {
    data.records()
        .iter()
        .filter(|record| record.value.is_some_and(|value| value > threshold))
        .cloned()
        .collect()
}
