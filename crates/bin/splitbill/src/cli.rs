//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "splitbill",
    about = "Split a shared bill between participants",
    version
)]
pub struct Cli {
    /// Bill sheet (TOML) listing participants and items.
    pub sheet: PathBuf,

    /// Configuration file (defaults to `splitbill.toml` if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tax rate in percent; overrides the sheet and the configuration.
    #[arg(long, allow_negative_numbers = true, conflicts_with = "no_tax")]
    pub tax_rate: Option<f64>,

    /// Ignore any tax rate from the sheet or the configuration.
    #[arg(long)]
    pub no_tax: bool,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl Cli {
    /// Apply flags that override configuration values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.summary.format = format;
        }
    }

    /// Pick the tax rate: flags first, then the sheet, then the configuration.
    #[must_use]
    pub fn resolve_tax_rate(&self, sheet: Option<f64>, config: Option<f64>) -> Option<f64> {
        if self.no_tax {
            return None;
        }
        self.tax_rate.or(sheet).or(config)
    }
}
