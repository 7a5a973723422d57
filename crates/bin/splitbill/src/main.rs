//! # splitbill: bill splitting from the command line
//!
//! Composition root that wires the ledger to its environment.
//!
//! ## Responsibilities
//! - Parse CLI arguments and configuration (file, env vars)
//! - Initialize logging
//! - Pick the id generator (random UUIDs or deterministic prefixed ids)
//! - Replay the bill sheet into a `BillLedger`
//! - Print the exported summary as text or JSON
//!
//! ## Dependency rule
//! This is the **only** crate that performs IO. No domain logic belongs here.

mod cli;
mod config;
mod sheet;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use splitbill_app::id_generators::{SequentialIdGenerator, UuidIdGenerator};
use splitbill_app::ports::IdGenerator;

use crate::cli::Cli;
use crate::config::{Config, OutputFormat};
use crate::sheet::Sheet;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    init_tracing(&config.logging.filter);

    let sheet = Sheet::load(&cli.sheet)
        .with_context(|| format!("failed to load bill sheet {}", cli.sheet.display()))?;
    let tax_rate = cli.resolve_tax_rate(sheet.tax_rate, config.summary.tax_rate);
    if let Some(rate) = tax_rate {
        anyhow::ensure!(rate.is_finite(), "tax rate must be a finite number");
    }

    let format = config.summary.format;
    let output = match &config.summary.id_prefix {
        Some(prefix) => render(
            sheet,
            SequentialIdGenerator::new(prefix.as_str()),
            tax_rate,
            format,
        )?,
        None => render(sheet, UuidIdGenerator, tax_rate, format)?,
    };
    print!("{output}");
    Ok(())
}

fn render<G: IdGenerator>(
    sheet: Sheet,
    ids: G,
    tax_rate: Option<f64>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let ledger = sheet.into_ledger(ids).context("invalid bill sheet")?;
    tracing::info!(
        participants = ledger.participants().len(),
        items = ledger.item_count(),
        tax_rate = ?tax_rate,
        "bill loaded"
    );

    let summary = ledger.summary(tax_rate);
    if summary.has_unassigned() {
        tracing::warn!(
            unassigned = summary.unassigned_total,
            "some items are not assigned to anyone"
        );
    }
    match format {
        OutputFormat::Text => Ok(summary.to_string()),
        OutputFormat::Json => {
            let mut json = summary.to_json().context("failed to serialize summary")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
