//! # UI Hooks
//!
//! Custom Dioxus hooks for the Community Admin UI:
//! - Cached record list (start, load more, invalidate)
//! - Last-row sentinel for infinite scroll

// ============================================================================
// Module Declarations
// ============================================================================

pub mod use_record_list;
pub mod use_sentinel;

// ============================================================================
// Re-exports
// ============================================================================

pub use use_record_list::{RecordList, use_list_autostart, use_record_list};
pub use use_sentinel::{SentinelHandle, use_sentinel};
