//! # Community UI
//!
//! Dioxus Desktop UI for Community Admin.
//!
//! A single window that lists communities from a REST backend and lets an
//! operator create, edit and delete them.
//!
//! ## Features
//!
//! - Schema-driven table with infinite scroll
//! - Create and edit forms generated from the schema
//! - Native delete confirmation
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod hooks;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use community_client::ClientConfig;

pub use app::App;
pub use components::{RecordFormDialog, RecordTable, RfdConfirm};
pub use hooks::{RecordList, SentinelHandle, use_record_list, use_sentinel};
pub use state::{ApiHandle, PendingDeletes, SchemaState, StatusLevel, StatusMessage, UiState};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Community Admin";

/// Application display title
pub const TITLE: &str = "Community Admin - Communities";

/// CSS styles for the application
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Community Admin desktop application
///
/// The configuration is provided to the component tree as context; the
/// root component builds its API client from it.
///
/// # Example
///
/// ```rust,ignore
/// fn main() -> anyhow::Result<()> {
///     let config = community_ui::ClientConfig::load(None)?;
///     community_ui::launch(config);
///     Ok(())
/// }
/// ```
pub fn launch(config: ClientConfig) {
    tracing::info!("Starting {} v{} against {}", NAME, VERSION, config.base_url());

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 800.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(640.0, 480.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .with_context(config)
        .launch(App);
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_title() {
        assert!(TITLE.starts_with(NAME));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(STYLES.contains(".spinner"));
        assert!(STYLES.contains(".btn-primary"));
    }
}
