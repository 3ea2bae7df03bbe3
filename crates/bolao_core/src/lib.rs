//! bolao_core: Core types, domain constants, and integer-first money.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`bolao_algo`, `bolao_io`, `bolao_pipeline`, `bolao_report`, `bolao_cli`).
//!
//! - `Money`: signed centavo count, exact decimal parsing/printing
//! - `PriceTable`: ordered tier → unit price rows (Mega-Sena by default)
//! - Entities: `Ticket`, `Slip`, `Pool`, `TierResult`, `TierGroup`, `Funding`
//! - Domain constants: slip capacity and the per-quota minimum
//! - Integer ratio helpers (no floats anywhere)
//!
//! Serialization derives are gated behind `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidMoney,
        MoneyOverflow,
        EmptyPriceTable,
        UnorderedPriceTable { choices: u8 },
        DomainOutOfRange(&'static str),
        UnknownTier { choices: u8 },
        PriceMismatch { choices: u8 },
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidMoney => write!(f, "invalid money amount"),
                CoreError::MoneyOverflow => write!(f, "money amount out of range"),
                CoreError::EmptyPriceTable => write!(f, "empty price table"),
                CoreError::UnorderedPriceTable { choices } => {
                    write!(f, "price table not strictly ascending at {choices} choices")
                }
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::UnknownTier { choices } => write!(f, "no tier with {choices} choices"),
                CoreError::PriceMismatch { choices } => {
                    write!(f, "ticket price does not match the {choices}-choice tier")
                }
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod rounding {
    //! Integer-first ratio helpers.

    use core::cmp::Ordering;

    /// `num / den` rounded half-to-even. `den` must be positive.
    pub fn div_round_half_even(num: i128, den: i128) -> i128 {
        debug_assert!(den > 0);
        let q = num.div_euclid(den);
        let r = num.rem_euclid(den);
        // r in [0, den): compare 2r against den
        match (2 * r).cmp(&den) {
            Ordering::Less => q,
            Ordering::Greater => q + 1,
            Ordering::Equal => {
                if q % 2 == 0 { q } else { q + 1 }
            }
        }
    }

    /// Exact comparison of `a_num / a_den` against `b_num / b_den` (positive dens).
    pub fn cmp_ratio(a_num: i128, a_den: i128, b_num: i128, b_den: i128) -> Ordering {
        debug_assert!(a_den > 0 && b_den > 0);
        (a_num * b_den).cmp(&(b_num * a_den))
    }
}

pub mod money;
pub mod prices;
pub mod entities;

pub use entities::{Funding, Pool, ProcessedResults, Slip, Ticket, TierGroup, TierResult};
pub use errors::CoreError;
pub use money::Money;
pub use prices::{PriceTable, Tier};

/// A slip ("volante") holds at most this many tickets, all of one tier.
pub const MAX_TICKETS_PER_SLIP: usize = 3;

/// Minimum price per quota for a slip to be accepted (R$ 12,00).
pub const MIN_PRICE_PER_QUOTA: Money = Money::from_cents(1_200);

/// Upper bound on tickets held in one selection. Tier results may count more
/// (they are plain numbers); only materialized ticket lists are capped.
pub const MAX_SELECTED_TICKETS: u64 = 100_000;

/// Smallest number of choices a ticket can carry.
pub const MIN_CHOICES: u8 = 6;

#[cfg(test)]
mod tests {
    use super::rounding::*;
    use core::cmp::Ordering;

    #[test]
    fn half_even_rounding() {
        assert_eq!(div_round_half_even(600, 10), 60);
        assert_eq!(div_round_half_even(5, 2), 2);
        assert_eq!(div_round_half_even(7, 2), 4);
        assert_eq!(div_round_half_even(600, 7), 86); // 85.71
        assert_eq!(div_round_half_even(-5, 2), -2);
        assert_eq!(div_round_half_even(-7, 2), -4);
    }

    #[test]
    fn ratio_comparison_is_exact() {
        assert_eq!(cmp_ratio(1, 3, 333, 1000), Ordering::Greater);
        assert_eq!(cmp_ratio(12000, 1000, 12, 1), Ordering::Equal);
        assert_eq!(cmp_ratio(11999, 1000, 12, 1), Ordering::Less);
    }
}
