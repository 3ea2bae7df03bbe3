//! Pool aggregation over distributed slips.

use bolao_core::{Money, Pool, Slip, Ticket};

use super::slips::distribute;

/// `None` for an empty selection; otherwise slips plus pool totals.
pub fn build_pool(tickets: &[Ticket], quota_count: u32) -> Option<Pool> {
    if tickets.is_empty() {
        return None;
    }

    let slips = distribute(tickets, quota_count);
    let total_cost: Money = slips.iter().map(|s| s.total_cost).sum();
    let uniform_quota = uniform_quota(&slips);

    Some(Pool {
        total_slips: slips.len(),
        total_tickets: tickets.len(),
        total_cost,
        uniform_quota,
        slips,
    })
}

/// The quota count shared by every slip, if there is exactly one.
fn uniform_quota(slips: &[Slip]) -> Option<u32> {
    let first = slips.first()?.quota_count;
    slips.iter().all(|s| s.quota_count == first).then_some(first)
}
