//! Split tier results into "within budget" and "over budget".
//!
//! - within: `slips_needed > 0`, sorted by `slips_needed` ↑
//! - over:   `min_cost_for_one_slip > budget`, sorted by `min_cost_for_one_slip` ↑
//!
//! `slips_needed > 0 ⟺ tickets_used ≥ 1 ⟺ unit_price ≤ budget`, so every tier
//! lands in exactly one bucket. Sorts are stable: ties keep price-table order.

use alloc::vec::Vec;

use bolao_core::{Money, PriceTable, ProcessedResults, TierResult};

use super::tier_calculator::compute_tier_results;

/// Calculate every tier and split the rows by affordability.
pub fn process_results(budget: Money, quota_count: u32, prices: &PriceTable) -> ProcessedResults {
    split_results(compute_tier_results(budget, quota_count, prices), budget)
}

/// Same as [`process_results`] over the Mega-Sena table.
pub fn process_results_default(budget: Money, quota_count: u32) -> ProcessedResults {
    process_results(budget, quota_count, &PriceTable::mega_sena())
}

/// Split precomputed rows (e.g. from a cached calculation) against `budget`.
pub fn split_results(results: Vec<TierResult>, budget: Money) -> ProcessedResults {
    let (mut within_budget, mut over_budget): (Vec<_>, Vec<_>) = results
        .into_iter()
        .filter(|r| r.slips_needed > 0 || r.min_cost_for_one_slip > budget)
        .partition(|r| r.slips_needed > 0);

    within_budget.sort_by_key(|r| r.slips_needed);
    over_budget.sort_by_key(|r| r.min_cost_for_one_slip);

    ProcessedResults { within_budget, over_budget }
}
