//! # Community Core
//!
//! Core types, traits, and error handling for Community Admin.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: Schema field descriptors, records and field values
//! - **Traits**: `Validatable` for server-supplied data
//! - **Errors**: Unified error handling with `AdminError` and `AdminResult`
//! - **Timestamps**: `DD.MM.YYYY HH:mm` formatting and display normalization
//!

pub mod error;
pub mod timestamp;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{AdminError, AdminResult, FieldError, FieldErrors, ResultExt};
pub use timestamp::{display_timestamp, format_timestamp, is_display_formatted, now_timestamp};
pub use traits::Validatable;
pub use types::{
    CREATED_AT, FieldDescriptor, FieldType, FieldValue, Record, RecordId, Schema, SchemaDocument,
    TIMESTAMP_FIELDS, UPDATED_AT, is_timestamp_field,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
