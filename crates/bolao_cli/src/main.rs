// crates/bolao_cli/src/main.rs
//
// Exit codes, typed error mapping, logging init, and the run path:
// load inputs → pipeline → plan.json → optional renders.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const BUILD: i32 = 5;
}

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args, Render};

use bolao_core::PriceTable;
use bolao_io::{canonical_json, loader, IoError};
use bolao_pipeline::{run_plan, PipelineError, PlanDoc, PlanInputs};
use bolao_report::{render_json, render_tier_table, share_text_for, ReportError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Plan shape, funding choice, price table or ticket/tier mismatches
    Validation(String),
    /// Read/write/path errors
    Io(String),
    /// Artifact assembly (serialization, hashing)
    Build(String),
    /// Report rendering
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Build(m) => write!(f, "build: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("bolao: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_tracing(args.quiet);

    let outcome = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match outcome {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            tracing::error!("{e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// stderr only; stdout carries the plan id.
fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Build(_) | MainError::Render(_) => BUILD,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Config(m) => MainError::Validation(format!("config: {m}")),
        IoError::Invalid(m) => MainError::Validation(m),
        IoError::Hash(m) => MainError::Build(format!("hash: {m}")),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(m) => MainError::Io(m),
        PipelineError::Config(m) => MainError::Validation(m),
        PipelineError::Build(m) => MainError::Build(m),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    match e {
        ReportError::Serialize(m) => MainError::Render(format!("serialize: {m}")),
        ReportError::Inconsistent(m) => MainError::Render(format!("inconsistent: {m}")),
    }
}

/// Plan file, or the explicit flags with the same meaning.
fn load_inputs(args: &Args) -> Result<PlanInputs, MainError> {
    if let Some(plan) = &args.plan {
        let loaded = loader::load_plan(plan).map_err(map_io_err)?;
        return Ok(PlanInputs::from(loaded));
    }

    let participants = args
        .participants
        .ok_or_else(|| MainError::Validation("missing --participants".into()))?;
    let funding = loader::funding_from(args.contribution, args.budget).map_err(map_io_err)?;
    let table = match &args.prices {
        Some(p) => loader::load_price_table(p).map_err(map_io_err)?,
        None => PriceTable::mega_sena(),
    };

    let mut inputs = PlanInputs::new(participants, funding).with_table(table);
    if let Some(q) = args.quotas {
        inputs = inputs.with_quotas(q);
    }
    if !args.tickets.is_empty() {
        let tickets = loader::expand_tickets(&args.tickets, &inputs.table).map_err(map_io_err)?;
        inputs = inputs.with_tickets(tickets);
    }
    Ok(inputs)
}

/// Load and check only; no pipeline, no artifacts.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let inputs = load_inputs(args)?;
    tracing::info!(
        participants = inputs.participants,
        budget = %inputs.budget(),
        quotas = inputs.quota_count(),
        inputs_valid = inputs.is_valid(),
        "validate-only: inputs OK"
    );
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let inputs = load_inputs(args)?;
    let doc = run_plan(&inputs).map_err(map_pipeline_err)?;

    write_plan(&args.out, &doc)?;
    render_reports(args, &doc, &args.out)?;

    tracing::info!(id = %doc.id, out = %args.out.display(), "plan written");
    println!("{}", doc.id);
    Ok(())
}

fn write_plan(out_dir: &Path, doc: &PlanDoc) -> Result<(), MainError> {
    fs::create_dir_all(out_dir).map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.display())))?;

    let value = serde_json::to_value(doc).map_err(|e| MainError::Build(format!("plan to JSON: {e}")))?;
    canonical_json::write_canonical_file(&out_dir.join("plan.json"), &value)
        .map_err(|e| MainError::Io(format!("write plan.json: {e}")))
}

fn render_reports(args: &Args, doc: &PlanDoc, out_dir: &Path) -> Result<(), MainError> {
    for kind in &args.render {
        match kind {
            Render::Text => match share_text_for(doc) {
                Some(text) => write_text(out_dir, "share.txt", &text)?,
                None => tracing::warn!("no tickets selected; share.txt not written"),
            },
            Render::Json => {
                let value = render_json(doc).map_err(map_report_err)?;
                let pretty = serde_json::to_string_pretty(&value)
                    .map_err(|e| MainError::Render(format!("report to JSON: {e}")))?;
                write_text(out_dir, "report.json", &pretty)?;
            }
            Render::Table => write_text(out_dir, "tiers.txt", &render_tier_table(&doc.tiers))?,
        }
    }
    Ok(())
}

fn write_text(out_dir: &Path, name: &str, body: &str) -> Result<(), MainError> {
    let path = out_dir.join(name);
    fs::write(&path, body).map_err(|e| MainError::Io(format!("write {name}: {e}")))?;
    tracing::debug!(path = %path.display(), bytes = body.len(), "wrote report");
    Ok(())
}
