//! Price table: one row per ticket tier, strictly ascending by `choices`.

use alloc::vec::Vec;

use crate::entities::Ticket;
use crate::errors::CoreError;
use crate::money::Money;
use crate::MIN_CHOICES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One price-table row.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tier {
    pub choices: u8,
    #[cfg_attr(feature = "serde", serde(rename = "price"))]
    pub unit_price: Money,
}

impl Tier {
    pub const fn new(choices: u8, unit_price: Money) -> Self {
        Self { choices, unit_price }
    }
}

/// Mega-Sena prices (whole reais), 6 to 20 choices.
pub const MEGA_SENA_PRICES: [Tier; 15] = [
    Tier::new(6, Money::from_units(6)),
    Tier::new(7, Money::from_units(42)),
    Tier::new(8, Money::from_units(168)),
    Tier::new(9, Money::from_units(504)),
    Tier::new(10, Money::from_units(1_260)),
    Tier::new(11, Money::from_units(2_772)),
    Tier::new(12, Money::from_units(5_544)),
    Tier::new(13, Money::from_units(10_296)),
    Tier::new(14, Money::from_units(18_018)),
    Tier::new(15, Money::from_units(30_030)),
    Tier::new(16, Money::from_units(48_048)),
    Tier::new(17, Money::from_units(74_256)),
    Tier::new(18, Money::from_units(111_384)),
    Tier::new(19, Money::from_units(162_792)),
    Tier::new(20, Money::from_units(232_560)),
];

/// Validated, ordered price table.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct PriceTable {
    tiers: Vec<Tier>,
}

impl PriceTable {
    /// Rows must be non-empty, `choices ≥ MIN_CHOICES`, strictly ascending, priced above zero.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, CoreError> {
        if tiers.is_empty() {
            return Err(CoreError::EmptyPriceTable);
        }
        let mut prev: Option<u8> = None;
        for t in &tiers {
            if t.choices < MIN_CHOICES {
                return Err(CoreError::DomainOutOfRange("choices"));
            }
            if !t.unit_price.is_positive() {
                return Err(CoreError::DomainOutOfRange("price"));
            }
            if prev.is_some_and(|p| t.choices <= p) {
                return Err(CoreError::UnorderedPriceTable { choices: t.choices });
            }
            prev = Some(t.choices);
        }
        Ok(Self { tiers })
    }

    pub fn mega_sena() -> Self {
        Self { tiers: MEGA_SENA_PRICES.to_vec() }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn tier(&self, choices: u8) -> Option<&Tier> {
        self.tiers
            .binary_search_by_key(&choices, |t| t.choices)
            .ok()
            .map(|i| &self.tiers[i])
    }

    pub fn price_for(&self, choices: u8) -> Option<Money> {
        self.tier(choices).map(|t| t.unit_price)
    }

    /// A ticket of `choices` at this table's price.
    pub fn ticket(&self, choices: u8) -> Result<Ticket, CoreError> {
        self.price_for(choices)
            .map(|unit_price| Ticket { choices, unit_price })
            .ok_or(CoreError::UnknownTier { choices })
    }

    /// Boundary check: the ticket's tier exists here and carries this table's price.
    pub fn check_ticket(&self, ticket: &Ticket) -> Result<(), CoreError> {
        match self.price_for(ticket.choices) {
            None => Err(CoreError::UnknownTier { choices: ticket.choices }),
            Some(p) if p != ticket.unit_price => Err(CoreError::PriceMismatch { choices: ticket.choices }),
            Some(_) => Ok(()),
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::mega_sena()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PriceTable {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let rows = Vec::<Tier>::deserialize(d)?;
        PriceTable::new(rows).map_err(serde::de::Error::custom)
    }
}
