//! # UI Components
//!
//! Dioxus components for the Community Admin window.
//!
//! ## Component Hierarchy
//!
//! ```text
//! Shell
//! ├── Header (title, "New community")
//! ├── RecordTable
//! │   └── RecordRow (multiple)
//! └── RecordFormDialog (in a Modal)
//!     └── FieldInput (TextInput / Select)
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod confirm;
pub mod inputs;
pub mod modal;
pub mod record_form;
pub mod record_table;

// ============================================================================
// Re-exports
// ============================================================================

pub use confirm::RfdConfirm;
pub use inputs::{FieldInput, Select, SelectOption, TextInput};
pub use modal::Modal;
pub use record_form::RecordFormDialog;
pub use record_table::{RecordTable, Spinner};
