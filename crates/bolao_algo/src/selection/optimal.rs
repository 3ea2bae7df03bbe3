//! Optimal / best-value selection over the within-budget rows.
//!
//! - optimal:    fewest slips; ties → most choices
//! - best value: most slips; ties → first encountered
//!
//! Deterministic for a given input order. No RNG.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use bolao_core::{Ticket, TierResult};

/// Pick the row with minimum `slips_needed`, preferring the highest `choices` on ties.
pub fn select_optimal(within_budget: &[TierResult]) -> Option<&TierResult> {
    within_budget.iter().reduce(|best, current| {
        match current.slips_needed.cmp(&best.slips_needed) {
            Ordering::Less => current,
            Ordering::Equal if current.choices > best.choices => current,
            _ => best,
        }
    })
}

/// Pick the row with maximum `slips_needed`; the first one wins ties.
pub fn select_best_value(within_budget: &[TierResult]) -> Option<&TierResult> {
    within_budget
        .iter()
        .reduce(|best, current| if current.slips_needed > best.slips_needed { current } else { best })
}

/// The tickets a row describes: `tickets_used` copies of its tier.
/// Allocates them all; callers bound `tickets_used` by `MAX_SELECTED_TICKETS` first.
pub fn build_tickets_for(result: &TierResult) -> Vec<Ticket> {
    vec![Ticket::new(result.choices, result.unit_price); result.tickets_used as usize]
}

/// `"<choices>-<tickets_used>-<quota_count>"`. Equal keys mean the optimum did not
/// move, so a caller can keep manual edits across recomputations.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct StabilityKey(String);

impl StabilityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn stability_key(result: &TierResult, quota_count: u32) -> StabilityKey {
    StabilityKey(format!("{}-{}-{}", result.choices, result.tickets_used, quota_count))
}
