//! Tier calculator: for one (budget, quota count) pair, how many tickets of
//! each tier the budget buys and whether the result clears the per-quota
//! minimum.
//!
//! Contract:
//! - One result per tier, in price-table order.
//! - tickets = floor(budget / price), 0 when price > budget (negative budgets too)
//! - slips   = ceil(tickets / MAX_TICKETS_PER_SLIP), 0 when tickets == 0
//! - cost    = tickets × price; remaining = budget − cost
//! - share   = cost / quotas (0 when quotas == 0); valid iff share ≥ MIN_PRICE_PER_QUOTA
//! - min cost for one slip = one ticket
//!
//! Degenerate inputs never fail; they produce zero rows.

use alloc::vec::Vec;

use bolao_core::{Money, PriceTable, Tier, TierResult, MAX_TICKETS_PER_SLIP, MIN_PRICE_PER_QUOTA};

/// Compute the result row for every tier of `prices`.
pub fn compute_tier_results(budget: Money, quota_count: u32, prices: &PriceTable) -> Vec<TierResult> {
    prices
        .tiers()
        .iter()
        .map(|tier| compute_tier_result(budget, quota_count, tier))
        .collect()
}

/// Same as [`compute_tier_results`] over the Mega-Sena table.
pub fn compute_tier_results_default(budget: Money, quota_count: u32) -> Vec<TierResult> {
    compute_tier_results(budget, quota_count, &PriceTable::mega_sena())
}

/// Single-tier calculation.
pub fn compute_tier_result(budget: Money, quota_count: u32, tier: &Tier) -> TierResult {
    let tickets_used = budget.fits(tier.unit_price);
    let slips_needed = tickets_used.div_ceil(MAX_TICKETS_PER_SLIP as u64);
    let total_cost = tier.unit_price.times(tickets_used);

    TierResult {
        choices: tier.choices,
        unit_price: tier.unit_price,
        slips_needed,
        tickets_used,
        total_cost,
        price_per_quota: total_cost.per_quota(quota_count),
        remaining_budget: budget - total_cost,
        is_valid: total_cost.share_at_least(quota_count, MIN_PRICE_PER_QUOTA),
        min_cost_for_one_slip: tier.unit_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn row(results: &[TierResult], choices: u8) -> TierResult {
        *results.iter().find(|r| r.choices == choices).expect("tier present")
    }

    #[test]
    fn budget_504_ten_quotas() {
        let results = compute_tier_results_default(Money::from_units(504), 10);
        assert_eq!(results.len(), 15);

        let nine = row(&results, 9);
        assert_eq!(nine.tickets_used, 1);
        assert_eq!(nine.slips_needed, 1);
        assert_eq!(nine.total_cost, Money::from_units(504));
        assert_eq!(nine.price_per_quota, Money::from_cents(5040));
        assert_eq!(nine.remaining_budget, Money::ZERO);
        assert!(nine.is_valid);

        let six = row(&results, 6);
        assert_eq!(six.tickets_used, 84);
        assert_eq!(six.slips_needed, 28);
        assert_eq!(six.min_cost_for_one_slip, Money::from_units(6));

        let ten = row(&results, 10);
        assert_eq!(ten.tickets_used, 0);
        assert_eq!(ten.slips_needed, 0);
        assert_eq!(ten.remaining_budget, Money::from_units(504));
        assert!(!ten.is_valid);
    }

    #[test]
    fn partial_last_slip_rounds_up() {
        // 1000 / 42 = 23 tickets → 8 slips (7 full + 1 with two tickets)
        let r = compute_tier_result(Money::from_units(1_000), 10, &Tier::new(7, Money::from_units(42)));
        assert_eq!(r.tickets_used, 23);
        assert_eq!(r.slips_needed, 8);
        assert_eq!(r.total_cost, Money::from_units(966));
        assert_eq!(r.remaining_budget, Money::from_units(34));
    }

    #[test]
    fn results_follow_table_order() {
        let table = PriceTable::new(vec![
            Tier::new(6, Money::from_units(10)),
            Tier::new(8, Money::from_units(30)),
        ])
        .unwrap();
        let results = compute_tier_results(Money::from_units(100), 10, &table);
        assert_eq!(results.iter().map(|r| r.choices).collect::<Vec<_>>(), vec![6, 8]);
        assert_eq!(results[0].unit_price, Money::from_units(10));
        assert_eq!(results[0].tickets_used, 10);
    }

    #[test]
    fn zero_budget_yields_zero_rows() {
        for r in compute_tier_results_default(Money::ZERO, 10) {
            assert_eq!(r.tickets_used, 0);
            assert_eq!(r.slips_needed, 0);
            assert_eq!(r.total_cost, Money::ZERO);
            assert_eq!(r.price_per_quota, Money::ZERO);
            assert!(!r.is_valid);
        }
    }

    #[test]
    fn zero_quotas_share_is_zero_and_invalid() {
        let r = compute_tier_result(Money::from_units(504), 0, &Tier::new(9, Money::from_units(504)));
        assert_eq!(r.tickets_used, 1);
        assert_eq!(r.price_per_quota, Money::ZERO);
        assert!(!r.is_valid);
    }

    #[test]
    fn negative_budget_propagates_to_remaining() {
        let r = compute_tier_result(Money::from_units(-10), 5, &Tier::new(6, Money::from_units(6)));
        assert_eq!(r.tickets_used, 0);
        assert_eq!(r.total_cost, Money::ZERO);
        assert_eq!(r.remaining_budget, Money::from_units(-10));
    }
}
