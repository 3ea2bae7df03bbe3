//! bolao_pipeline: deterministic pipeline surface
//! (inputs → tier results → split → optimum → ticket selection → pool → groups → plan doc).
//!
//! This crate stays I/O-free apart from the plan-file entry point; JSON, hashing
//! and loading go through `bolao_io`, arithmetic through `bolao_algo`.

use std::fmt;
use std::path::Path;

use bolao_algo::{build_pool, group_by_tier, process_results, select_best_value, select_optimal, stability_key};
use bolao_core::{Funding, Money, PriceTable, ProcessedResults, Ticket, MAX_SELECTED_TICKETS};
use bolao_io::loader::{self, LoadedPlan};

pub mod build_plan;
pub mod selection;

pub use build_plan::{build_plan_doc, InputsEcho, PlanDoc, SelectionBlock, SelectionSource};
pub use selection::{SyncOutcome, TicketSelection};

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Io(String),
    Config(String),
    Build(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(m) => write!(f, "io: {m}"),
            PipelineError::Config(m) => write!(f, "config: {m}"),
            PipelineError::Build(m) => write!(f, "build: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<bolao_io::IoError> for PipelineError {
    fn from(e: bolao_io::IoError) -> Self {
        use bolao_io::IoError;
        match e {
            IoError::Path(m) => PipelineError::Io(format!("path: {m}")),
            IoError::Json { pointer, msg } => PipelineError::Config(format!("json {pointer}: {msg}")),
            IoError::Config(m) => PipelineError::Config(m),
            IoError::Invalid(m) => PipelineError::Config(format!("invalid: {m}")),
            IoError::Hash(m) => PipelineError::Build(format!("hash: {m}")),
        }
    }
}

// ---------------------------------- Inputs ----------------------------------

/// Resolved inputs for one evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanInputs {
    pub participants: u32,
    pub funding: Funding,
    /// Overrides the quota count (defaults to `participants`).
    pub quotas: Option<u32>,
    pub table: PriceTable,
    /// Explicit selection; `None` means follow the optimum.
    pub tickets: Option<Vec<Ticket>>,
}

impl PlanInputs {
    pub fn new(participants: u32, funding: Funding) -> Self {
        Self { participants, funding, quotas: None, table: PriceTable::mega_sena(), tickets: None }
    }

    pub fn with_quotas(mut self, quotas: u32) -> Self {
        self.quotas = Some(quotas);
        self
    }

    pub fn with_table(mut self, table: PriceTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_tickets(mut self, tickets: Vec<Ticket>) -> Self {
        self.tickets = Some(tickets);
        self
    }

    pub fn budget(&self) -> Money {
        self.funding.budget(self.participants)
    }

    pub fn quota_count(&self) -> u32 {
        self.quotas.unwrap_or(self.participants)
    }

    /// At least one participant and a positive amount.
    pub fn is_valid(&self) -> bool {
        self.participants >= 1 && self.funding.amount().is_positive()
    }

    fn echo(&self) -> InputsEcho {
        InputsEcho {
            participants: self.participants,
            funding: self.funding,
            budget: self.budget(),
            quota_count: self.quota_count(),
            inputs_valid: self.is_valid(),
            prices: self.table.clone(),
        }
    }
}

impl From<LoadedPlan> for PlanInputs {
    fn from(p: LoadedPlan) -> Self {
        Self { participants: p.participants, funding: p.funding, quotas: p.quotas, table: p.table, tickets: p.tickets }
    }
}

// ---------------------------------- Session ----------------------------------

/// Inputs plus the caller-owned selection, re-evaluated after every change.
#[derive(Clone, Debug)]
pub struct PlanSession {
    inputs: PlanInputs,
    selection: TicketSelection,
}

impl PlanSession {
    pub fn new(inputs: PlanInputs) -> Self {
        let selection = match &inputs.tickets {
            Some(t) => TicketSelection::from_tickets(t.clone()),
            None => TicketSelection::new(),
        };
        Self { inputs, selection }
    }

    pub fn inputs(&self) -> &PlanInputs {
        &self.inputs
    }

    /// Replace the inputs. Explicit tickets, if given, replace the selection;
    /// otherwise the selection is kept for `evaluate` to sync.
    pub fn set_inputs(&mut self, inputs: PlanInputs) {
        if let Some(t) = &inputs.tickets {
            self.selection = TicketSelection::from_tickets(t.clone());
        }
        self.inputs = inputs;
    }

    pub fn selection(&self) -> &TicketSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut TicketSelection {
        &mut self.selection
    }

    /// Run every stage against the current inputs and selection.
    pub fn evaluate(&mut self) -> Result<PlanDoc, PipelineError> {
        let inputs = &self.inputs;
        let budget = inputs.budget();
        let quota_count = inputs.quota_count();
        let valid = inputs.is_valid();
        tracing::debug!(%budget, quota_count, valid, participants = inputs.participants, "plan inputs");

        // TIERS: nothing is computed for invalid inputs
        let tiers = if valid {
            process_results(budget, quota_count, &inputs.table)
        } else {
            ProcessedResults::default()
        };
        tracing::debug!(within = tiers.within_budget.len(), over = tiers.over_budget.len(), "tier results");

        // SELECT
        let optimal = select_optimal(&tiers.within_budget).copied();
        let best_value = select_best_value(&tiers.within_budget).copied();
        if let Some(best) = &optimal {
            tracing::debug!(choices = best.choices, tickets = best.tickets_used, slips = best.slips_needed, valid = best.is_valid, "optimum");
        }

        let (source, sync) = if inputs.tickets.is_some() {
            (SelectionSource::Explicit, None)
        } else {
            let outcome = self.selection.sync(valid, optimal.as_ref(), quota_count);
            if outcome == SyncOutcome::Oversized {
                tracing::warn!(
                    tickets = optimal.as_ref().map_or(0, |b| b.tickets_used),
                    limit = MAX_SELECTED_TICKETS,
                    "optimum too large to select; selection left unchanged"
                );
            }
            tracing::debug!(?outcome, tickets = self.selection.len(), "selection sync");
            (SelectionSource::Auto, Some(outcome))
        };

        // POOL + GROUPS
        let tickets = self.selection.tickets();
        let pool = build_pool(tickets, quota_count);
        let groups = group_by_tier(tickets);

        if let Some(p) = &pool {
            let invalid = p.slips.iter().filter(|s| !s.is_valid).count();
            tracing::info!(
                slips = p.total_slips,
                tickets = p.total_tickets,
                total_cost = %p.total_cost,
                invalid_slips = invalid,
                "pool built"
            );
        } else {
            tracing::info!("no tickets selected");
        }

        let selection = SelectionBlock {
            source,
            sync,
            optimal,
            best_value,
            stability_key: optimal.as_ref().map(|b| stability_key(b, quota_count).as_str().to_owned()),
        };

        build_plan_doc(inputs.echo(), tiers, selection, pool, groups)
    }
}

// -------------------------------------- Public API --------------------------------------

/// One-shot evaluation of `inputs` with a fresh selection.
pub fn run_plan(inputs: &PlanInputs) -> Result<PlanDoc, PipelineError> {
    PlanSession::new(inputs.clone()).evaluate()
}

/// Convenience entry: load a plan file via bolao_io, then run the pipeline.
pub fn run_from_plan_path<P: AsRef<Path>>(path: P) -> Result<PlanDoc, PipelineError> {
    let loaded = loader::load_plan(path.as_ref())?;
    run_plan(&PlanInputs::from(loaded))
}
