//! Domain entities. All derived values are recomputed from scratch; nothing
//! here is mutated after construction.

use alloc::vec::Vec;

use crate::money::Money;
use crate::MIN_PRICE_PER_QUOTA;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One purchased play. `unit_price` is expected to match the tier's price.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ticket {
    pub choices: u8,
    #[cfg_attr(feature = "serde", serde(rename = "price"))]
    pub unit_price: Money,
}

impl Ticket {
    pub const fn new(choices: u8, unit_price: Money) -> Self {
        Self { choices, unit_price }
    }
}

/// A betting slip ("volante"): 1..=MAX_TICKETS_PER_SLIP tickets of one tier.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slip {
    pub tickets: Vec<Ticket>,
    pub quota_count: u32,
    pub total_cost: Money,
    pub price_per_quota: Money,
    pub is_valid: bool,
}

impl Slip {
    /// Build a slip and derive its cost, per-quota share and validity.
    pub fn from_tickets(tickets: Vec<Ticket>, quota_count: u32) -> Self {
        let total_cost: Money = tickets.iter().map(|t| t.unit_price).sum();
        Self {
            price_per_quota: total_cost.per_quota(quota_count),
            is_valid: total_cost.share_at_least(quota_count, MIN_PRICE_PER_QUOTA),
            tickets,
            quota_count,
            total_cost,
        }
    }

    /// Tier of the slip (all tickets share it); `None` only for an empty slip.
    pub fn choices(&self) -> Option<u8> {
        self.tickets.first().map(|t| t.choices)
    }

    pub fn ticket_count(&self) -> usize {
        self.tickets.len()
    }
}

/// The whole collective purchase.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pool {
    pub slips: Vec<Slip>,
    pub total_cost: Money,
    pub total_tickets: usize,
    pub total_slips: usize,
    /// Shared quota count when every slip agrees on one.
    pub uniform_quota: Option<u32>,
}

impl Pool {
    pub fn all_valid(&self) -> bool {
        self.slips.iter().all(|s| s.is_valid)
    }
}

/// Per-tier calculation snapshot for one (budget, quota count) pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TierResult {
    pub choices: u8,
    pub unit_price: Money,
    pub slips_needed: u64,
    pub tickets_used: u64,
    pub total_cost: Money,
    pub price_per_quota: Money,
    pub remaining_budget: Money,
    pub is_valid: bool,
    pub min_cost_for_one_slip: Money,
}

/// Tier results split by affordability.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcessedResults {
    /// `slips_needed > 0`, fewest slips first.
    pub within_budget: Vec<TierResult>,
    /// Not even one ticket affordable, cheapest first.
    pub over_budget: Vec<TierResult>,
}

/// Count of selected tickets per tier (display summary).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TierGroup {
    pub choices: u8,
    pub unit_price: Money,
    pub count: usize,
}

/// How the pool is funded: a fixed share per participant, or a total budget.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "kind", content = "amount"))]
pub enum Funding {
    PerParticipant(Money),
    Total(Money),
}

impl Funding {
    /// Pooled budget for `participants` people.
    pub fn budget(self, participants: u32) -> Money {
        match self {
            Funding::PerParticipant(share) => share.times(u64::from(participants)),
            Funding::Total(total) => total,
        }
    }

    /// The amount as entered (share or total).
    pub fn amount(self) -> Money {
        match self {
            Funding::PerParticipant(m) | Funding::Total(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn six() -> Ticket {
        Ticket::new(6, Money::from_units(6))
    }

    #[test]
    fn slip_derives_cost_share_and_validity() {
        let s = Slip::from_tickets(vec![six(), six(), six()], 10);
        assert_eq!(s.total_cost, Money::from_units(18));
        assert_eq!(s.price_per_quota, Money::from_cents(180));
        assert!(!s.is_valid);
        assert_eq!(s.choices(), Some(6));

        let s = Slip::from_tickets(vec![Ticket::new(9, Money::from_units(504))], 10);
        assert_eq!(s.price_per_quota, Money::from_cents(5040));
        assert!(s.is_valid);
    }

    #[test]
    fn slip_exactly_at_minimum_is_valid() {
        let s = Slip::from_tickets(vec![Ticket::new(7, Money::from_units(42))], 3);
        assert_eq!(s.price_per_quota, Money::from_units(14));
        assert!(s.is_valid);
        let s = Slip::from_tickets(vec![six(), six()], 1);
        assert_eq!(s.price_per_quota, Money::from_units(12));
        assert!(s.is_valid);
    }

    #[test]
    fn slip_without_quotas_is_invalid() {
        let s = Slip::from_tickets(vec![six()], 0);
        assert_eq!(s.price_per_quota, Money::ZERO);
        assert!(!s.is_valid);
    }

    #[test]
    fn funding_budget() {
        let share = Funding::PerParticipant(Money::from_units(100));
        assert_eq!(share.budget(10), Money::from_units(1_000));
        assert_eq!(share.budget(0), Money::ZERO);
        let total = Funding::Total(Money::from_units(504));
        assert_eq!(total.budget(7), Money::from_units(504));
        assert_eq!(total.amount(), Money::from_units(504));
    }
}
