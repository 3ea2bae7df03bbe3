//! crates/bolao_pipeline/src/build_plan.rs
//! Assemble the `PlanDoc` artifact and derive its content id.
//!
//! - id = `PLAN:` + SHA-256 of the canonical JSON of the doc *without* `id`
//! - every field is derived from inputs; no timestamps, no RNG
//! - identical inputs → byte-identical canonical JSON → identical id

use bolao_core::{Funding, Money, Pool, PriceTable, ProcessedResults, TierGroup, TierResult};
use bolao_io::hasher;
use serde::{Deserialize, Serialize};

use crate::selection::SyncOutcome;
use crate::PipelineError;

/// Echo of the resolved inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputsEcho {
    pub participants: u32,
    pub funding: Funding,
    pub budget: Money,
    pub quota_count: u32,
    pub inputs_valid: bool,
    pub prices: PriceTable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// Tickets follow the optimum (auto-selection).
    Auto,
    /// Tickets were supplied by the caller.
    Explicit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionBlock {
    pub source: SelectionSource,
    /// Present for auto-selection only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sync: Option<SyncOutcome>,
    pub optimal: Option<TierResult>,
    pub best_value: Option<TierResult>,
    pub stability_key: Option<String>,
}

/// The plan artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDoc {
    pub id: String,
    pub inputs: InputsEcho,
    pub tiers: ProcessedResults,
    pub selection: SelectionBlock,
    pub pool: Option<Pool>,
    pub groups: Vec<TierGroup>,
}

impl PlanDoc {
    /// Total cost of the pool (zero when nothing is selected).
    pub fn total_cost(&self) -> Money {
        self.pool.as_ref().map(|p| p.total_cost).unwrap_or(Money::ZERO)
    }
}

pub fn build_plan_doc(
    inputs: InputsEcho,
    tiers: ProcessedResults,
    selection: SelectionBlock,
    pool: Option<Pool>,
    groups: Vec<TierGroup>,
) -> Result<PlanDoc, PipelineError> {
    #[derive(Serialize)]
    struct PlanNoId<'a> {
        inputs: &'a InputsEcho,
        tiers: &'a ProcessedResults,
        selection: &'a SelectionBlock,
        pool: &'a Option<Pool>,
        groups: &'a [TierGroup],
    }

    let id = hasher::plan_id_from_canonical(&PlanNoId {
        inputs: &inputs,
        tiers: &tiers,
        selection: &selection,
        pool: &pool,
        groups: &groups,
    })?;

    Ok(PlanDoc { id, inputs, tiers, selection, pool, groups })
}
