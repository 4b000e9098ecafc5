//! # Community Engine
//!
//! View-independent behavior of Community Admin.
//!
//! - **API seam**: the [`CommunityApi`] trait and confirmation prompt
//! - **Validation**: schema-driven rule lookup table
//! - **Form**: create/edit form model and submission
//! - **Pagination**: page state machine with a generation guard
//! - **Cache**: session-wide query cache keyed by [`QueryKey`]
//! - **Sentinel**: last-row visibility check for infinite scroll
//! - **Session**: headless driver used by the CLI
//!

pub mod api;
pub mod cache;
pub mod columns;
pub mod form;
pub mod pagination;
pub mod sentinel;
pub mod session;
pub mod validation;

#[cfg(test)]
mod testing;

pub use api::{AutoConfirm, CommunityApi, Confirm, PageQuery, delete_prompt};
pub use cache::{QueryCache, QueryKey};
pub use columns::{ACTIONS_COLUMN, header_labels, render_cell, render_row};
pub use form::{FormInput, FormMode, RecordForm, SubmitStep, Submission};
pub use pagination::{ApplyOutcome, DEFAULT_PAGE_SIZE, ListStatus, Page, PageRequest, PagedList};
pub use sentinel::{Bounds, DEFAULT_ROOT_MARGIN, Sentinel};
pub use session::{DeleteOutcome, Session};
pub use validation::{RecordValidator, build_validator};
