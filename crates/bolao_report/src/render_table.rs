//! Plain-text tier tables (within budget / over budget) for terminals.

use bolao_core::{ProcessedResults, TierResult};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};

use crate::format_brl;

const WITHIN_HEADERS: [&str; 8] = ["choices", "unit price", "slips", "tickets", "cost", "per quota", "remaining", "valid"];
const OVER_HEADERS: [&str; 3] = ["choices", "unit price", "min for one slip"];

pub fn render_tier_table(results: &ProcessedResults) -> String {
    let mut out = String::from("Within budget\n");
    if results.within_budget.is_empty() {
        out.push_str("  (none)\n");
    } else {
        out.push_str(&table(WITHIN_HEADERS, results.within_budget.iter().map(within_row)));
    }

    out.push_str("\nOver budget\n");
    if results.over_budget.is_empty() {
        out.push_str("  (none)\n");
    } else {
        let rows = results
            .over_budget
            .iter()
            .map(|r| vec![r.choices.to_string(), format_brl(r.unit_price), format_brl(r.min_cost_for_one_slip)]);
        out.push_str(&table(OVER_HEADERS, rows));
    }
    out
}

fn within_row(r: &TierResult) -> Vec<String> {
    vec![
        r.choices.to_string(),
        format_brl(r.unit_price),
        r.slips_needed.to_string(),
        r.tickets_used.to_string(),
        format_brl(r.total_cost),
        format_brl(r.price_per_quota),
        format_brl(r.remaining_budget),
        if r.is_valid { "yes" } else { "no" }.to_string(),
    ]
}

/// Borderless, right-aligned; ends with a newline.
fn table<const N: usize>(headers: [&str; N], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers);
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::blank());
    table.modify(Columns::new(..), Alignment::right());

    let mut text = table.to_string();
    text.push('\n');
    text
}
