//! bolao_report: offline presentation of a plan.
//!
//! Determinism rules:
//! - No network, no I/O here. Callers supply the `PlanDoc` in memory.
//! - Money is formatted from integer centavos, never through floats.
//! - Stable section order and field names.

#![deny(unsafe_code)]

use std::fmt;

use bolao_core::Money;

pub mod render_json;
pub mod render_table;
pub mod share_text;

pub use render_json::render_json;
pub use render_table::render_tier_table;
pub use share_text::{build_share_text, share_text_for};

// ===== Errors =====
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Serialize(String),
    Inconsistent(&'static str),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Serialize(m) => write!(f, "report serialization failed: {m}"),
            ReportError::Inconsistent(what) => write!(f, "inconsistent plan: {what}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Brazilian-real formatting: `R$ 1.234,56` (dot thousands, comma decimals).
pub fn format_brl(m: Money) -> String {
    let (units, cents) = m.split_abs();
    let sign = if m.is_negative() { "-" } else { "" };
    format!("{sign}R$ {},{cents:02}", group_thousands(units))
}

/// Digits grouped by three with `.`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brl_formatting() {
        assert_eq!(format_brl(Money::from_units(100)), "R$ 100,00");
        assert_eq!(format_brl(Money::from_cents(1_250)), "R$ 12,50");
        assert_eq!(format_brl(Money::from_cents(123_456)), "R$ 1.234,56");
        assert_eq!(format_brl(Money::from_units(232_560)), "R$ 232.560,00");
        assert_eq!(format_brl(Money::from_units(1_000_000)), "R$ 1.000.000,00");
        assert_eq!(format_brl(Money::ZERO), "R$ 0,00");
        assert_eq!(format_brl(Money::from_cents(-150)), "-R$ 1,50");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1.000");
        assert_eq!(group_thousands(12_345_678), "12.345.678");
    }
}
