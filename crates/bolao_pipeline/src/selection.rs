//! crates/bolao_pipeline/src/selection.rs
//! Editable ticket selection and the auto-selection rule.
//!
//! The caller owns one `TicketSelection` and is its only writer. `sync` applies
//! the current optimum only when it actually moved (different stability key),
//! so manual edits survive recomputations that land on the same optimum.

use bolao_algo::{build_tickets_for, stability_key, StabilityKey};
use bolao_core::{CoreError, PriceTable, Ticket, TierResult, MAX_SELECTED_TICKETS};
use serde::{Deserialize, Serialize};

/// What `sync` did to the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Inputs invalid: selection emptied and the last key forgotten.
    Cleared,
    /// A new valid optimum replaced the selection.
    Replaced,
    /// Selection left as the user edited it.
    Kept,
    /// Valid optimum needs more than `MAX_SELECTED_TICKETS` tickets; selection untouched.
    Oversized,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketSelection {
    tickets: Vec<Ticket>,
    applied: Option<StabilityKey>,
}

impl TicketSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an explicit list (no optimum applied yet).
    pub fn from_tickets(tickets: Vec<Ticket>) -> Self {
        Self { tickets, applied: None }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Key of the optimum last written by `sync`, if any.
    pub fn applied_key(&self) -> Option<&StabilityKey> {
        self.applied.as_ref()
    }

    pub fn add(&mut self, ticket: Ticket) {
        self.tickets.push(ticket);
    }

    /// Append one ticket of `choices` at the table's price.
    pub fn add_tier(&mut self, table: &PriceTable, choices: u8) -> Result<(), CoreError> {
        let ticket = table.ticket(choices)?;
        self.tickets.push(ticket);
        Ok(())
    }

    /// Remove by position; out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<Ticket> {
        (index < self.tickets.len()).then(|| self.tickets.remove(index))
    }

    /// Remove the first ticket of `choices`, if there is one.
    pub fn remove_one_of_tier(&mut self, choices: u8) -> Option<Ticket> {
        let index = self.tickets.iter().position(|t| t.choices == choices)?;
        Some(self.tickets.remove(index))
    }

    pub fn clear(&mut self) {
        self.tickets.clear();
        self.applied = None;
    }

    pub fn sync(&mut self, inputs_valid: bool, optimal: Option<&TierResult>, quota_count: u32) -> SyncOutcome {
        if !inputs_valid {
            self.clear();
            return SyncOutcome::Cleared;
        }
        match optimal {
            Some(best) if best.is_valid && best.tickets_used > MAX_SELECTED_TICKETS => SyncOutcome::Oversized,
            Some(best) if best.is_valid => {
                let key = stability_key(best, quota_count);
                if self.applied.as_ref() == Some(&key) {
                    return SyncOutcome::Kept;
                }
                self.tickets = build_tickets_for(best);
                self.applied = Some(key);
                SyncOutcome::Replaced
            }
            _ => SyncOutcome::Kept,
        }
    }
}
