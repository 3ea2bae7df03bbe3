//! Loader: read local JSON plan files and price tables, check their shape
//! (`deny_unknown_fields`), resolve funding, and expand ticket specs into
//! concrete tickets priced by the table. No network I/O.
//!
//! Ticket prices are checked here, at the boundary; the algorithms downstream
//! trust every ticket they receive.

#![forbid(unsafe_code)]

use std::path::Path;

use bolao_core::{Funding, Money, PriceTable, Ticket, Tier, MAX_SELECTED_TICKETS};
use serde::{Deserialize, Serialize};

use crate::canonical_json::read_json_value;
use crate::{looks_like_url_strict, IoError, IoResult};

// ----------------------------- Wire-facing types -----------------------------

/// Plan file as written by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
    pub participants: u32,
    /// Share per participant. Exactly one of `contribution` / `budget`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Money>,
    /// Quota override; defaults to `participants`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<Tier>>,
    /// Explicit selection; when absent the optimum is auto-selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<TicketSpec>>,
}

/// `count` tickets of one tier. `price`, when given, must match the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicketSpec {
    pub choices: u8,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

fn one() -> u32 {
    1
}

/// Resolved plan, ready for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPlan {
    pub participants: u32,
    pub funding: Funding,
    pub quotas: Option<u32>,
    pub table: PriceTable,
    pub tickets: Option<Vec<Ticket>>,
}

// ----------------------------- Loaders -----------------------------

pub fn load_plan(path: &Path) -> IoResult<LoadedPlan> {
    reject_url(path)?;
    let v = read_json_value(path)?;
    let file: PlanFile = serde_json::from_value(v).map_err(|e| IoError::Json {
        pointer: "/".into(),
        msg: format!("{}: {e}", path.display()),
    })?;
    let plan = resolve_plan(file)?;
    tracing::info!(
        path = %path.display(),
        participants = plan.participants,
        tiers = plan.table.len(),
        explicit_tickets = plan.tickets.as_ref().map(Vec::len),
        "loaded plan file"
    );
    Ok(plan)
}

/// Price table file: a JSON array of `{"choices", "price"}` rows.
pub fn load_price_table(path: &Path) -> IoResult<PriceTable> {
    reject_url(path)?;
    let v = read_json_value(path)?;
    let rows: Vec<Tier> = serde_json::from_value(v).map_err(|e| IoError::Json {
        pointer: "/".into(),
        msg: format!("{}: {e}", path.display()),
    })?;
    let table = PriceTable::new(rows)?;
    tracing::info!(path = %path.display(), tiers = table.len(), "loaded price table");
    Ok(table)
}

/// Validate and resolve a parsed plan file.
pub fn resolve_plan(file: PlanFile) -> IoResult<LoadedPlan> {
    let funding = funding_from(file.contribution, file.budget)?;
    let table = match file.prices {
        Some(rows) => PriceTable::new(rows)?,
        None => PriceTable::mega_sena(),
    };
    let tickets = match &file.tickets {
        Some(specs) => Some(expand_tickets(specs, &table)?),
        None => None,
    };
    Ok(LoadedPlan {
        participants: file.participants,
        funding,
        quotas: file.quotas,
        table,
        tickets,
    })
}

/// Exactly one funding kind must be present.
pub fn funding_from(contribution: Option<Money>, budget: Option<Money>) -> IoResult<Funding> {
    match (contribution, budget) {
        (Some(c), None) => Ok(Funding::PerParticipant(c)),
        (None, Some(b)) => Ok(Funding::Total(b)),
        (Some(_), Some(_)) => Err(IoError::Config("set either contribution or budget, not both".into())),
        (None, None) => Err(IoError::Config("missing contribution or budget".into())),
    }
}

/// Expand specs in order; every ticket takes the table's price for its tier.
pub fn expand_tickets(specs: &[TicketSpec], table: &PriceTable) -> IoResult<Vec<Ticket>> {
    let total: u64 = specs.iter().map(|s| u64::from(s.count)).sum();
    if total > MAX_SELECTED_TICKETS {
        return Err(IoError::Config(format!(
            "tickets: {total} requested, at most {MAX_SELECTED_TICKETS} allowed"
        )));
    }

    let mut out = Vec::with_capacity(total as usize);
    for (i, spec) in specs.iter().enumerate() {
        if spec.count == 0 {
            return Err(IoError::Config(format!("tickets[{i}]: count must be at least 1")));
        }
        let ticket = table.ticket(spec.choices).map_err(|e| IoError::Invalid(format!("tickets[{i}]: {e}")))?;
        if let Some(price) = spec.price {
            table
                .check_ticket(&Ticket::new(spec.choices, price))
                .map_err(|e| IoError::Invalid(format!("tickets[{i}]: {e}")))?;
        }
        out.extend(std::iter::repeat(ticket).take(spec.count as usize));
    }
    Ok(out)
}

fn reject_url(path: &Path) -> IoResult<()> {
    if looks_like_url_strict(&path.to_string_lossy()) {
        return Err(IoError::Config(format!("only local files are supported: {}", path.display())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> IoResult<LoadedPlan> {
        let file: PlanFile = serde_json::from_value(v)?;
        resolve_plan(file)
    }

    #[test]
    fn contribution_plan_uses_mega_sena() {
        let plan = parse(json!({"participants": 10, "contribution": "100"})).unwrap();
        assert_eq!(plan.funding, Funding::PerParticipant(Money::from_units(100)));
        assert_eq!(plan.table, PriceTable::mega_sena());
        assert_eq!(plan.quotas, None);
        assert_eq!(plan.tickets, None);
    }

    #[test]
    fn integer_amounts_are_whole_reais() {
        let plan = parse(json!({"participants": 3, "budget": 504})).unwrap();
        assert_eq!(plan.funding, Funding::Total(Money::from_units(504)));
    }

    #[test]
    fn funding_must_be_exactly_one() {
        assert!(matches!(parse(json!({"participants": 3})), Err(IoError::Config(_))));
        assert!(matches!(
            parse(json!({"participants": 3, "budget": "1", "contribution": "1"})),
            Err(IoError::Config(_))
        ));
    }

    #[test]
    fn unknown_fields_and_floats_are_rejected() {
        assert!(matches!(
            parse(json!({"participants": 3, "budget": "1", "terms": true})),
            Err(IoError::Json { .. })
        ));
        assert!(matches!(parse(json!({"participants": 3, "budget": 10.5})), Err(IoError::Json { .. })));
    }

    #[test]
    fn tickets_expand_in_order_at_table_price() {
        let plan = parse(json!({
            "participants": 10,
            "contribution": "100",
            "tickets": [{"choices": 7, "count": 2}, {"choices": 6}, {"choices": 9, "price": "504.00"}]
        }))
        .unwrap();
        let got: Vec<(u8, Money)> = plan.tickets.unwrap().iter().map(|t| (t.choices, t.unit_price)).collect();
        assert_eq!(
            got,
            vec![
                (7, Money::from_units(42)),
                (7, Money::from_units(42)),
                (6, Money::from_units(6)),
                (9, Money::from_units(504)),
            ]
        );
    }

    #[test]
    fn mismatched_or_unknown_tickets_are_invalid() {
        let bad_price = json!({"participants": 1, "budget": "6", "tickets": [{"choices": 6, "price": "7"}]});
        assert!(matches!(parse(bad_price), Err(IoError::Invalid(_))));
        let bad_tier = json!({"participants": 1, "budget": "6", "tickets": [{"choices": 21}]});
        assert!(matches!(parse(bad_tier), Err(IoError::Invalid(_))));
        let zero = json!({"participants": 1, "budget": "6", "tickets": [{"choices": 6, "count": 0}]});
        assert!(matches!(parse(zero), Err(IoError::Config(_))));
    }

    #[test]
    fn ticket_counts_are_capped_before_expanding() {
        let table = PriceTable::mega_sena();
        let spec = |count| TicketSpec { choices: 6, count, price: None };

        let huge = expand_tickets(&[spec(u32::MAX)], &table);
        assert!(matches!(huge, Err(IoError::Config(m)) if m.contains("4294967295")));

        // the cap applies to the sum across specs
        let half = (MAX_SELECTED_TICKETS / 2 + 1) as u32;
        assert!(matches!(expand_tickets(&[spec(half), spec(half)], &table), Err(IoError::Config(_))));

        let at_cap = expand_tickets(&[spec(MAX_SELECTED_TICKETS as u32)], &table).unwrap();
        assert_eq!(at_cap.len() as u64, MAX_SELECTED_TICKETS);

        let in_plan = json!({"participants": 1, "budget": "6", "tickets": [{"choices": 6, "count": 4294967295u64}]});
        assert!(matches!(parse(in_plan), Err(IoError::Config(_))));
    }

    #[test]
    fn custom_prices_drive_ticket_prices() {
        let plan = parse(json!({
            "participants": 2,
            "budget": "30",
            "prices": [{"choices": 6, "price": "5"}, {"choices": 7, "price": "35"}],
            "tickets": [{"choices": 6, "count": 3}]
        }))
        .unwrap();
        assert_eq!(plan.table.len(), 2);
        assert!(plan.tickets.unwrap().iter().all(|t| t.unit_price == Money::from_units(5)));

        let unordered = json!({
            "participants": 2, "budget": "30",
            "prices": [{"choices": 7, "price": "35"}, {"choices": 6, "price": "5"}]
        });
        assert!(matches!(parse(unordered), Err(IoError::Invalid(_))));
    }

    #[test]
    fn url_paths_are_refused() {
        let err = load_plan(Path::new("https://example.com/plan.json")).unwrap_err();
        assert!(matches!(err, IoError::Config(_)));
        let err = load_price_table(Path::new("file:///tmp/prices.json")).unwrap_err();
        assert!(matches!(err, IoError::Config(_)));
    }
}
