//! Structured logging setup.
//!
//! Library code only emits `tracing` events; the binary installs the
//! subscriber once. Output goes to stderr so stdout stays clean for reports.
//! The interactive form owns the terminal, so it gets a discarding writer.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "propai=warn";
const VERBOSE_DIRECTIVE: &str = "propai=debug";

/// Install the global subscriber. `RUST_LOG` takes precedence when set.
pub fn init_logging(verbose: bool, interactive: bool) {
    let fallback = if verbose { VERBOSE_DIRECTIVE } else { DEFAULT_DIRECTIVE };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    // A second init (e.g. in tests) is harmless; keep the first subscriber.
    let _ = if interactive {
        builder.with_writer(std::io::sink).try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };
}
