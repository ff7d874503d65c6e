//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - loads the artifact bundle once
//! - dispatches to the estimate / inspect / TUI front-ends

use clap::Parser;
use tracing::debug;

use crate::cli::{BundleArgs, Command, EstimateArgs, ValuationArgs};
use crate::domain::{ClampPolicy, ValuationConfig};
use crate::error::AppError;

pub mod service;

pub use service::ValuationService;

/// Entry point for the `propai` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `propai` and `propai -b model.json` behave like `propai tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let interactive = matches!(cli.command, Command::Tui(_));
    crate::logging::init_logging(cli.verbose, interactive);

    match cli.command {
        Command::Estimate(args) => handle_estimate(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = valuation_config_from_args(&args);
    debug!(bundle = %config.bundle_path.display(), "estimate");

    let service = ValuationService::load(&config.bundle_path, config.clamp);
    let valuation = service.value(&config.input)?;
    let label = service.bundle().and_then(|b| b.label());

    if config.json {
        println!("{}", crate::io::report_json(&valuation, label)?);
    } else {
        print!("{}", crate::report::format_valuation(&valuation, label));
    }

    if let Some(path) = &config.export {
        crate::io::write_report_json(path, &valuation, label)?;
    }

    Ok(())
}

fn handle_inspect(args: BundleArgs) -> Result<(), AppError> {
    let bundle = crate::io::read_bundle_json(&args.resolve())?;
    print!("{}", crate::report::format_bundle_summary(&bundle));
    Ok(())
}

fn handle_tui(args: ValuationArgs) -> Result<(), AppError> {
    let service = ValuationService::load(&args.bundle.resolve(), ClampPolicy::new(args.floor));
    crate::tui::run(service)
}

pub fn valuation_config_from_args(args: &EstimateArgs) -> ValuationConfig {
    ValuationConfig {
        bundle_path: args.common.bundle.resolve(),
        input: args.house_input(),
        clamp: ClampPolicy::new(args.common.floor),
        json: args.json,
        export: args.export.clone(),
    }
}

/// Rewrite argv so `propai` defaults to `propai tui`.
///
/// Rules:
/// - `propai`                      -> `propai tui`
/// - `propai -b model.json ...`    -> `propai tui -b model.json ...`
/// - `propai -v estimate ...`      -> unchanged (global flags before a subcommand)
/// - `propai --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    // Global flags may precede the subcommand.
    let first = argv
        .iter()
        .skip(1)
        .find(|a| !matches!(a.as_str(), "-v" | "--verbose"))
        .cloned();
    let Some(arg1) = first else {
        argv.insert(1, "tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "estimate" | "inspect" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["propai"])), argv(&["propai", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["propai", "-b", "m.json"])),
            argv(&["propai", "tui", "-b", "m.json"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["propai", "estimate"])), argv(&["propai", "estimate"]));
        assert_eq!(rewrite_args(argv(&["propai", "--help"])), argv(&["propai", "--help"]));
    }

    #[test]
    fn global_verbose_flag_before_subcommand_is_kept() {
        let rewritten = rewrite_args(argv(&["propai", "-v", "estimate"]));
        assert_eq!(rewritten, argv(&["propai", "-v", "estimate"]));
        let cli = crate::cli::Cli::try_parse_from(rewritten).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Estimate(_)));
    }

    #[test]
    fn verbose_alone_opens_tui() {
        let rewritten = rewrite_args(argv(&["propai", "--verbose"]));
        assert_eq!(rewritten, argv(&["propai", "tui", "--verbose"]));
        let cli = crate::cli::Cli::try_parse_from(rewritten).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Tui(_)));
    }

    #[test]
    fn config_carries_flags() {
        let cli = crate::cli::Cli::parse_from(["propai", "estimate", "--floor", "0", "--json", "-b", "x.json"]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        let config = valuation_config_from_args(&args);
        assert_eq!(config.bundle_path, std::path::PathBuf::from("x.json"));
        assert_eq!(config.clamp.floor, 0.0);
        assert!(config.json);
        assert!(config.export.is_none());
    }
}
