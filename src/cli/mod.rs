//! Command-line parsing for the house valuation tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pipeline code. Range checks are left to the form layer so
//! the CLI and the TUI report the same errors.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_PRICE_FLOOR, Field, HouseInput};

/// Default bundle location when neither `--bundle` nor `PROPAI_BUNDLE` is set.
pub const DEFAULT_BUNDLE_PATH: &str = "house_price_model.json";

/// Environment variable consulted for the bundle path (also read from `.env`).
pub const BUNDLE_ENV: &str = "PROPAI_BUNDLE";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "propai", version, about = "House price valuation from a pre-trained model bundle")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Value a house from flags and print the result.
    Estimate(EstimateArgs),
    /// Show the bundle's label, feature order, and stored defaults.
    Inspect(BundleArgs),
    /// Launch the interactive form.
    Tui(ValuationArgs),
}

/// Where to find the model bundle.
#[derive(Debug, Args, Clone)]
pub struct BundleArgs {
    /// Model bundle JSON (defaults to $PROPAI_BUNDLE, then ./house_price_model.json).
    #[arg(short, long, value_name = "JSON")]
    pub bundle: Option<PathBuf>,
}

/// Options shared by commands that produce a valuation.
#[derive(Debug, Args, Clone)]
pub struct ValuationArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    /// Display floor for prices (not a model parameter).
    #[arg(long, default_value_t = DEFAULT_PRICE_FLOOR)]
    pub floor: f64,
}

#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub common: ValuationArgs,

    /// Above-grade living area (sq ft, 500-10000).
    #[arg(long, default_value_t = Field::LivingArea.default_value())]
    pub sqft: i64,

    /// Lot size (sq ft, 1000-100000).
    #[arg(long, default_value_t = Field::LotArea.default_value())]
    pub lot: i64,

    /// Year built (1800-2025).
    #[arg(long, default_value_t = Field::YearBuilt.default_value())]
    pub year_built: i64,

    /// Overall quality (1-10).
    #[arg(short, long, default_value_t = Field::OverallQual.default_value())]
    pub quality: i64,

    /// Full bathrooms (1-5).
    #[arg(long, default_value_t = Field::FullBath.default_value())]
    pub baths: i64,

    /// Garage capacity in cars (0-4).
    #[arg(long, default_value_t = Field::GarageCars.default_value())]
    pub garage: i64,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write a JSON report to this path.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

impl EstimateArgs {
    pub fn house_input(&self) -> HouseInput {
        HouseInput {
            gr_liv_area: self.sqft,
            lot_area: self.lot,
            year_built: self.year_built,
            overall_qual: self.quality,
            full_bath: self.baths,
            garage_cars: self.garage,
        }
    }
}

impl BundleArgs {
    /// Resolve the bundle path: flag, then environment, then the default file name.
    pub fn resolve(&self) -> PathBuf {
        resolve_bundle_path(self.bundle.clone(), std::env::var(BUNDLE_ENV).ok())
    }
}

fn resolve_bundle_path(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLE_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_defaults_match_form_defaults() {
        let cli = Cli::parse_from(["propai", "estimate"]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.house_input(), HouseInput::default());
        assert_eq!(args.common.floor, DEFAULT_PRICE_FLOOR);
        assert!(!args.json);
    }

    #[test]
    fn estimate_flags_fill_house_input() {
        let cli = Cli::parse_from([
            "propai", "estimate", "--sqft", "1800", "--lot", "8000", "--year-built", "1999", "-q", "6",
            "--baths", "1", "--garage", "0", "--bundle", "model.json",
        ]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        let input = args.house_input();
        assert_eq!(input.gr_liv_area, 1800);
        assert_eq!(input.overall_qual, 6);
        assert_eq!(input.garage_cars, 0);
        assert_eq!(args.common.bundle.bundle, Some(PathBuf::from("model.json")));
    }

    #[test]
    fn bundle_path_precedence() {
        assert_eq!(
            resolve_bundle_path(Some(PathBuf::from("a.json")), Some("b.json".to_string())),
            PathBuf::from("a.json")
        );
        assert_eq!(resolve_bundle_path(None, Some("b.json".to_string())), PathBuf::from("b.json"));
        assert_eq!(resolve_bundle_path(None, Some("  ".to_string())), PathBuf::from(DEFAULT_BUNDLE_PATH));
        assert_eq!(resolve_bundle_path(None, None), PathBuf::from(DEFAULT_BUNDLE_PATH));
    }
}
