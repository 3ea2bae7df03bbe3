//! Slip distribution: tickets → slips of at most `MAX_TICKETS_PER_SLIP`.
//!
//! Streaming partition, not an optimization:
//! - group by `choices` in first-seen order; keep insertion order inside a group
//! - cut each group into consecutive chunks (full chunks, then the remainder)
//! - one slip per chunk; output order = group order, then chunk order

use alloc::vec::Vec;

use bolao_core::{Slip, Ticket, MAX_TICKETS_PER_SLIP};

pub fn distribute(tickets: &[Ticket], quota_count: u32) -> Vec<Slip> {
    group_first_seen(tickets)
        .into_iter()
        .flat_map(|(_, group)| {
            group
                .chunks(MAX_TICKETS_PER_SLIP)
                .map(|chunk| Slip::from_tickets(chunk.to_vec(), quota_count))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Group tickets by tier, groups ordered by first appearance.
fn group_first_seen(tickets: &[Ticket]) -> Vec<(u8, Vec<Ticket>)> {
    let mut groups: Vec<(u8, Vec<Ticket>)> = Vec::new();
    for t in tickets {
        match groups.iter_mut().find(|(choices, _)| *choices == t.choices) {
            Some((_, group)) => group.push(*t),
            None => groups.push((t.choices, alloc::vec![*t])),
        }
    }
    groups
}
