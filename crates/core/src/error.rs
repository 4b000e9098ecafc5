//! Error types for Community Admin
//!
//! This module provides unified error handling for schema loading, form
//! validation, list fetching and record mutations.

use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Field Errors
// ============================================================================

/// Why a single field value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Required field left empty
    #[error("This field is required")]
    Required,

    /// Value of a number field is not a finite number
    #[error("Must be a number")]
    TypeCoercion { value: String },

    /// Value of an enum field is not one of the allowed values
    #[error("Must be one of: {}", .allowed.join(", "))]
    InvalidEnumValue { value: String, allowed: Vec<String> },
}

/// Field-level validation failures keyed by field name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, FieldError>,
}

impl FieldErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field, replacing any previous one
    pub fn insert(&mut self, field: impl Into<String>, error: FieldError) {
        self.errors.insert(field.into(), error);
    }

    /// Remove the error for a field
    pub fn remove(&mut self, field: &str) -> Option<FieldError> {
        self.errors.remove(field)
    }

    /// Error for a field, if any
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Human-readable message for a field, if any
    pub fn message(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(ToString::to_string)
    }

    /// Map of field name to message
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(name, err)| (name.clone(), err.to_string()))
            .collect()
    }

    /// Iterate over errors in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(name, err)| (name.as_str(), err))
    }

    /// Number of rejected fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if no field was rejected
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Drop all errors
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(name, err)| format!("{}: {}", name, err))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

// ============================================================================
// AdminError
// ============================================================================

/// The main error type for Community Admin
#[derive(Debug, Error)]
pub enum AdminError {
    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// Schema could not be fetched, decoded or used
    #[error("Failed to load schema: {0}")]
    SchemaLoad(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// One or more form fields were rejected before any network call
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    // ========================================================================
    // Network Errors
    // ========================================================================
    /// Create, update or delete request failed
    #[error("Failed to {operation} record: {message}")]
    Mutation { operation: String, message: String },

    /// Page request failed
    #[error("Failed to load page {page}: {message}")]
    ListFetch { page: u32, message: String },

    /// Server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Request never produced a response (connection, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    // ========================================================================
    // Serialization / IO Errors
    // ========================================================================
    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl AdminError {
    /// Create a schema load error
    pub fn schema_load(msg: impl Into<String>) -> Self {
        AdminError::SchemaLoad(msg.into())
    }

    /// Create a mutation error for the given operation ("create", "update", "delete")
    pub fn mutation(operation: impl Into<String>, msg: impl Into<String>) -> Self {
        AdminError::Mutation {
            operation: operation.into(),
            message: msg.into(),
        }
    }

    /// Create a list fetch error
    pub fn list_fetch(page: u32, msg: impl Into<String>) -> Self {
        AdminError::ListFetch {
            page,
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        AdminError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        AdminError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a local validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, AdminError::Validation(_))
    }

    /// Check if this error came from talking to the API
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            AdminError::Mutation { .. }
                | AdminError::ListFetch { .. }
                | AdminError::Http { .. }
                | AdminError::Transport(_)
        )
    }

    /// Field errors carried by a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AdminError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for AdminError {
    fn from(errors: FieldErrors) -> Self {
        AdminError::Validation(errors)
    }
}

/// Result type alias using AdminError
pub type AdminResult<T> = Result<T, AdminError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> AdminResult<T>;
}

impl<T, E: Into<AdminError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> AdminResult<T> {
        self.map_err(|e| {
            let err: AdminError = e.into();
            AdminError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(
            FieldError::TypeCoercion {
                value: "abc".to_string()
            }
            .to_string(),
            "Must be a number"
        );
        assert_eq!(
            FieldError::InvalidEnumValue {
                value: "x".to_string(),
                allowed: vec!["active".to_string(), "blocked".to_string()],
            }
            .to_string(),
            "Must be one of: active, blocked"
        );
    }

    #[test]
    fn test_field_errors_collection() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());

        errors.insert("name", FieldError::Required);
        errors.insert(
            "subs",
            FieldError::TypeCoercion {
                value: "many".to_string(),
            },
        );

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message("name").as_deref(), Some("This field is required"));
        assert_eq!(
            errors.to_string(),
            "name: This field is required; subs: Must be a number"
        );

        errors.remove("name");
        assert!(errors.get("name").is_none());
        assert_eq!(errors.messages().len(), 1);
    }

    #[test]
    fn test_validation_error() {
        let mut errors = FieldErrors::new();
        errors.insert("name", FieldError::Required);
        let err: AdminError = errors.into();

        assert!(err.is_validation());
        assert!(!err.is_network());
        assert!(err.field_errors().is_some());
        assert_eq!(
            err.to_string(),
            "Validation failed: name: This field is required"
        );
    }

    #[test]
    fn test_network_errors() {
        let err = AdminError::mutation("delete", "HTTP 500: boom");
        assert!(err.is_network());
        assert_eq!(err.to_string(), "Failed to delete record: HTTP 500: boom");

        let err = AdminError::list_fetch(2, "connection refused");
        assert!(err.is_network());
        assert_eq!(err.to_string(), "Failed to load page 2: connection refused");
    }

    #[test]
    fn test_schema_load_error() {
        let err = AdminError::schema_load("HTTP 404: not found");
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "Failed to load schema: HTTP 404: not found");
    }

    #[test]
    fn test_error_with_context() {
        let err = AdminError::with_context("Reading config", "Permission denied");
        assert_eq!(err.to_string(), "Reading config: Permission denied");

        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.with_context("Loading config").unwrap_err();
        assert_eq!(err.to_string(), "Loading config: IO error: missing");
    }
}
