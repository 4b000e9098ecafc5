//! # Community CLI
//!
//! Command-line interface for Community Admin.
//!
//! Runs the same schema-driven flows as the desktop app against the same
//! API, without a window.
//!
//! ## Commands
//!
//! - `schema` - Print the field descriptors
//! - `list` - Print a table of communities
//! - `create` - Validate and create a community
//! - `update` - Validate and update a community
//! - `delete` - Delete a community after confirmation
//!

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Assignment, Cli, Command, parse_assignment};
pub use commands::{StdinConfirm, is_yes, resolve_config, run};

use tracing_subscriber::EnvFilter;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install the stderr log subscriber.
///
/// `RUST_LOG` decides the level unless `verbose` forces `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
