//! render_json.rs: plan report as JSON in a fixed section order:
//! inputs → tiers → selection → pool → groups → id.
//!
//! Relies on serde_json's `preserve_order` feature: object keys keep
//! insertion order. Money stays a decimal string, as in the artifact.

use serde::Serialize;
use serde_json::{Map as JsonMap, Value};

use bolao_pipeline::PlanDoc;

use crate::{format_brl, ReportError};

pub fn render_json(doc: &PlanDoc) -> Result<Value, ReportError> {
    let mut root = JsonMap::new();
    root.insert("inputs".into(), to_value(&doc.inputs)?);
    root.insert("tiers".into(), to_value(&doc.tiers)?);
    root.insert("selection".into(), to_value(&doc.selection)?);
    root.insert("pool".into(), pool_json(doc)?);
    root.insert("groups".into(), to_value(&doc.groups)?);
    root.insert("id".into(), Value::String(doc.id.clone()));
    Ok(Value::Object(root))
}

/// Pool plus display strings; `null` when nothing is selected.
fn pool_json(doc: &PlanDoc) -> Result<Value, ReportError> {
    let Some(pool) = &doc.pool else {
        return Ok(Value::Null);
    };
    if pool.slips.len() != pool.total_slips {
        return Err(ReportError::Inconsistent("pool.total_slips"));
    }
    let mut v = to_value(pool)?;
    if let Value::Object(o) = &mut v {
        o.insert("total_cost_brl".into(), Value::String(format_brl(pool.total_cost)));
        o.insert("all_valid".into(), Value::Bool(pool.all_valid()));
    }
    Ok(v)
}

fn to_value<T: Serialize>(v: &T) -> Result<Value, ReportError> {
    serde_json::to_value(v).map_err(|e| ReportError::Serialize(e.to_string()))
}
