// crates/bolao_cli/src/args.rs
//
// Offline CLI argument surface: types, value parsers, mode checks.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - Exactly one of: --plan  XOR  (--participants + (--contribution XOR --budget))
// - Optional explicit inputs: --quotas, --prices <file>, --tickets 6x4,7x1
// - Output: --out dir, --render [text|json|table]*
// - --validate-only loads and checks inputs without running the pipeline

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};

use bolao_core::Money;
use bolao_io::loader::TicketSpec;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "bolao",
    disable_help_subcommand = true,
    about = "Offline planner for Mega-Sena pools (bolões)"
)]
pub struct Args {
    // --- Mode selection ---
    /// Plan file (JSON) describing the pool; mutually exclusive with the explicit flags.
    #[arg(long, conflicts_with_all = ["participants", "contribution", "budget", "quotas", "prices", "tickets"])]
    pub plan: Option<PathBuf>,

    // --- Explicit mode ---
    /// Number of participants.
    #[arg(long)]
    pub participants: Option<u32>,
    /// Contribution per participant, e.g. `100` or `12.50`.
    #[arg(long, value_parser = parse_money, conflicts_with = "budget")]
    pub contribution: Option<Money>,
    /// Total budget of the pool.
    #[arg(long, value_parser = parse_money)]
    pub budget: Option<Money>,
    /// Quota count override (defaults to the number of participants).
    #[arg(long)]
    pub quotas: Option<u32>,
    /// Price table JSON path (defaults to the Mega-Sena table).
    #[arg(long)]
    pub prices: Option<PathBuf>,
    /// Explicit tickets as `<choices>x<count>`, comma separated (e.g. `6x4,7x1`).
    #[arg(long, value_parser = parse_ticket_spec, value_delimiter = ',')]
    pub tickets: Vec<TicketSpec>,

    // --- Output & rendering ---
    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Renderer(s) to emit (text, json, table). Repeatable; omit to skip rendering.
    #[arg(long, value_enum)]
    pub render: Vec<Render>,

    // --- Control ---
    /// Load and check inputs only; write nothing.
    #[arg(long)]
    pub validate_only: bool,

    /// Only warnings and errors on stderr.
    #[arg(long)]
    pub quiet: bool,
}

/// Report formats written next to `plan.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Render {
    /// share.txt
    Text,
    /// report.json
    Json,
    /// tiers.txt
    Table,
}

/// Errors surfaced by argument parsing/validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    Missing(&'static str),
    FundingChoice,
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            Missing(s) => write!(f, "missing required flag: {s}"),
            FundingChoice => write!(f, "exactly one of --contribution/--budget is required"),
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Decimal reais; same grammar as money fields in plan files.
pub fn parse_money(s: &str) -> Result<Money, String> {
    s.parse::<Money>().map_err(|e| format!("{e}: {s:?}"))
}

/// `<choices>x<count>` or a bare `<choices>` (count 1).
pub fn parse_ticket_spec(s: &str) -> Result<TicketSpec, String> {
    let s = s.trim();
    let (choices, count) = match s.split_once(['x', 'X']) {
        Some((c, n)) => (c, Some(n)),
        None => (s, None),
    };
    let choices = choices
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("bad choices in ticket spec {s:?}"))?;
    let count = match count {
        Some(n) => n.trim().parse::<u32>().map_err(|_| format!("bad count in ticket spec {s:?}"))?,
        None => 1,
    };
    if count == 0 {
        return Err(format!("ticket count must be at least 1: {s:?}"));
    }
    Ok(TicketSpec { choices, count, price: None })
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

/// Mode checks, scheme rejection and path normalization on already-parsed args.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    if let Some(plan) = &args.plan {
        ensure_local_exists(plan, "--plan")?;
        args.plan = args.plan.take().map(|p| normalize_path(&p));
    } else {
        validate_explicit_mode(&args)?;
        args.prices = args.prices.take().map(|p| normalize_path(&p));
    }

    args.out = normalize_path(&args.out);
    Ok(args)
}

/// Explicit mode: participants plus exactly one funding kind; price file must exist.
fn validate_explicit_mode(a: &Args) -> Result<(), CliError> {
    if a.participants.is_none() {
        return Err(CliError::Missing("--participants (or --plan)"));
    }
    if a.contribution.is_some() == a.budget.is_some() {
        return Err(CliError::FundingChoice);
    }
    if let Some(p) = &a.prices {
        ensure_local_exists(p, "--prices")?;
    }
    Ok(())
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if bolao_io::looks_like_url_strict(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [args.plan.as_deref(), args.prices.as_deref(), Some(args.out.as_path())]
        .into_iter()
        .flatten()
}

/// Best-effort absolute path; falls back to CWD-relative when the path doesn't exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}
