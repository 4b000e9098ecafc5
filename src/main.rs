//! Community Admin
//!
//! Schema-driven desktop admin for community records.
//!
//! This is the main entry point for the Dioxus Desktop application.

use std::process::ExitCode;

use community_client::ClientConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .pretty()
        .init();

    // Print startup banner
    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   Community Admin v{:<39}║", community_ui::VERSION);
    println!("║   Schema-driven admin for community records               ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    let config = match ClientConfig::load(None) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    // Launch the Dioxus desktop application
    community_ui::launch(config);
    ExitCode::SUCCESS
}
