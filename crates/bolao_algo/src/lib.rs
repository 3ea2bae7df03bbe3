// crates/bolao_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// Core entities and constants
pub use bolao_core::{
    Funding, Money, Pool, PriceTable, ProcessedResults, Slip, Ticket, Tier, TierGroup, TierResult,
    MAX_SELECTED_TICKETS, MAX_TICKETS_PER_SLIP, MIN_PRICE_PER_QUOTA,
};

// ----------------------------- Calculation (budget → tiers) --------------------------

pub mod calculation {
    // File modules (actual implementations)
    pub mod tier_calculator;
    pub mod result_processor;

    pub use tier_calculator::{compute_tier_result, compute_tier_results, compute_tier_results_default};
    pub use result_processor::{process_results, process_results_default, split_results};
}

// ----------------------------- Selection (tiers → tickets) ---------------------------

pub mod selection {
    pub mod optimal;

    pub use optimal::{build_tickets_for, select_best_value, select_optimal, stability_key, StabilityKey};
}

// ----------------------------- Distribution (tickets → slips → pool) -----------------

pub mod distribution {
    pub mod slips;
    pub mod pool;

    pub use pool::build_pool;
    pub use slips::distribute;
}

pub mod grouping;

// Convenience re-exports (pipeline imports these from crate root)
pub use calculation::{compute_tier_results, process_results};
pub use distribution::{build_pool, distribute};
pub use grouping::group_by_tier;
pub use selection::{build_tickets_for, select_best_value, select_optimal, stability_key, StabilityKey};
