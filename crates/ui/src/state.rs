//! Application State for Community Admin
//!
//! State shared across the component tree through Dioxus context:
//!
//! - [`ApiHandle`]: the community API
//! - `Signal<QueryCache>`: the session-wide list cache
//! - `Signal<UiState>`: modal and status line
//! - `Rc<Schema>`: the loaded schema, once available

use std::collections::HashSet;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

use community_core::{Record, RecordId, Schema};
use community_engine::{CommunityApi, FormMode};

// ============================================================================
// API Handle
// ============================================================================

/// Shared reference to the API, comparable so it can travel as a prop
#[derive(Clone)]
pub struct ApiHandle(pub Arc<dyn CommunityApi>);

impl ApiHandle {
    pub fn new(api: impl CommunityApi + 'static) -> Self {
        Self(Arc::new(api))
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ApiHandle {
    type Target = dyn CommunityApi;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

// ============================================================================
// Schema State
// ============================================================================

/// Progress of the one-time schema load
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaState {
    Loading,
    Loaded(Rc<Schema>),
    /// Load failed; the message is shown as a blocking page
    Failed(String),
    /// Server returned no fields
    Empty,
}

// ============================================================================
// UI State
// ============================================================================

/// Status message shown above the table
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Status message severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl StatusLevel {
    /// Text color class
    pub fn class(&self) -> &'static str {
        match self {
            StatusLevel::Info => "text-slate-400",
            StatusLevel::Success => "text-green-400",
            StatusLevel::Error => "text-red-400",
        }
    }
}

/// Transient view state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Open form, if any
    pub modal: Option<FormMode>,
    /// Last status message
    pub status: Option<StatusMessage>,
}

impl UiState {
    /// Open the create form
    pub fn open_create(&mut self) {
        self.modal = Some(FormMode::Create);
    }

    /// Open the edit form for a record
    pub fn open_edit(&mut self, record: Record) {
        self.modal = Some(FormMode::Edit(record));
    }

    /// Close the form
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: message.into(),
            level,
        });
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

// ============================================================================
// Pending Deletes
// ============================================================================

/// Records with a delete request in flight, by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingDeletes {
    ids: HashSet<RecordId>,
}

impl PendingDeletes {
    /// Mark a delete as started; `false` if one is already running
    pub fn begin(&mut self, id: RecordId) -> bool {
        self.ids.insert(id)
    }

    /// Mark a delete as finished, whatever its outcome
    pub fn finish(&mut self, id: RecordId) {
        self.ids.remove(&id);
    }

    pub fn is_pending(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
