//! Subscriber setup for the binaries.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "ucc_content=info";

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// Stdout stays clean for rendered output. `verbose` lowers the default
/// filter to `debug` so cache hits and refreshes show up.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "ucc_content=debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
        .map_err(|e| Error::Msg(format!("Logging already initialised: {e}")))
}
