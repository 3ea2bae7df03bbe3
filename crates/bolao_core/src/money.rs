//! Integer money: a signed count of centavos.
//!
//! Amounts parse from and print as plain decimals with two places
//! (`"504.00"`, `"-1.50"`). There is no float constructor.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use crate::errors::CoreError;
use crate::rounding::{cmp_ratio, div_round_half_even};

const CENTS_PER_UNIT: i64 = 100;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Whole currency units (reais).
    pub const fn from_units(units: i64) -> Self {
        Money(units * CENTS_PER_UNIT)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `self × count`, saturating at the representable range.
    pub fn times(self, count: u64) -> Money {
        let wide = (self.0 as i128) * (count as i128);
        Money(wide.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// How many whole `unit`s fit in `self`. Zero when `unit` is larger than
    /// `self` (including every negative `self`) or when `unit` is not positive.
    pub fn fits(self, unit: Money) -> u64 {
        if unit.0 <= 0 || unit.0 > self.0 {
            return 0;
        }
        (self.0 / unit.0) as u64
    }

    /// Share of `self` per quota, rounded half-even to the centavo; zero for no quotas.
    pub fn per_quota(self, quotas: u32) -> Money {
        if quotas == 0 {
            return Money::ZERO;
        }
        Money(div_round_half_even(self.0 as i128, quotas as i128) as i64)
    }

    /// Exact test of `self / quotas ≥ min`, on the unrounded ratio.
    /// With no quotas the share is zero.
    pub fn share_at_least(self, quotas: u32, min: Money) -> bool {
        if quotas == 0 {
            return Money::ZERO >= min;
        }
        cmp_ratio(self.0 as i128, quotas as i128, min.0 as i128, 1).is_ge()
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Whole units and the centavo remainder of the absolute value.
    pub fn split_abs(self) -> (u64, u8) {
        let abs = self.0.unsigned_abs();
        (abs / CENTS_PER_UNIT as u64, (abs % CENTS_PER_UNIT as u64) as u8)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (units, cents) = self.split_abs();
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl FromStr for Money {
    type Err = CoreError;

    /// Accepts `[-]digits[.d[d]]`. At most two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty()
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || frac_part.len() > 2
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
            || (body.contains('.') && frac_part.is_empty())
        {
            return Err(CoreError::InvalidMoney);
        }

        let units: i64 = int_part.parse().map_err(|_| CoreError::MoneyOverflow)?;
        let mut cents: i64 = 0;
        for (i, b) in frac_part.bytes().enumerate() {
            let digit = (b - b'0') as i64;
            cents += if i == 0 { digit * 10 } else { digit };
        }
        let total = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|u| u.checked_add(cents))
            .ok_or(CoreError::MoneyOverflow)?;
        Ok(Money(if negative { -total } else { total }))
    }
}

#[cfg(feature = "serde")]
mod wire {
    use super::Money;
    use core::fmt;
    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Money {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    struct MoneyVisitor;

    impl<'de> Visitor<'de> for MoneyVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal string like \"12.50\" or an integer amount")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            v.parse().map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            v.checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            i64::try_from(v)
                .ok()
                .and_then(|v| v.checked_mul(100))
                .map(Money::from_cents)
                .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            Err(E::invalid_type(Unexpected::Float(v), &self))
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Money, D::Error> {
            d.deserialize_any(MoneyVisitor)
        }
    }
}
