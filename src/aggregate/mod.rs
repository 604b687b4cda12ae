//! Derived views computed from the loaded sources and the session state.
//!
//! Every function here is pure: identical inputs always produce identical
//! outputs, and views are recomputed in full on every render.

mod frequency;
mod keyword_sum;
mod threshold;
mod views;

pub use frequency::{CategoryCount, category_frequency};
pub use keyword_sum::{CategoryTotal, category_matches, keyword_filtered_sum};
pub use threshold::threshold_subset;
pub use views::DerivedViews;
