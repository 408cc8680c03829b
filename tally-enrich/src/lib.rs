//! tally-enrich: the single-pass enrichment pipeline — normalizer,
//! classifier, anomaly detector — and the report aggregations.

pub mod anomaly;
pub mod classify;
pub mod normalize;
pub mod pipeline;
pub mod report;

#[cfg(test)]
pub(crate) mod testutil;

pub use classify::{OTHER_CATEGORY, categorize};
pub use normalize::normalize_description;
pub use pipeline::enrich;
pub use report::{
    CategoryMonthRow, MerchantMonthRow, RecurringRow, monthly_by_category, monthly_by_merchant,
    recurring_candidates, review_subset,
};
