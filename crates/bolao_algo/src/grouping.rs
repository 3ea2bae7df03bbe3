//! Display grouping: selected tickets counted per tier, ascending by `choices`.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use bolao_core::{Ticket, TierGroup};

/// One entry per distinct tier. The price shown is the first ticket's of that tier.
pub fn group_by_tier(tickets: &[Ticket]) -> Vec<TierGroup> {
    let mut groups: BTreeMap<u8, TierGroup> = BTreeMap::new();
    for t in tickets {
        groups
            .entry(t.choices)
            .and_modify(|g| g.count += 1)
            .or_insert(TierGroup { choices: t.choices, unit_price: t.unit_price, count: 1 });
    }
    groups.into_values().collect()
}
