//! Core traits for Community Admin

use crate::error::AdminResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can check their own consistency
///
/// Used on server-supplied data (schemas, field descriptors) before the
/// session starts relying on it.
///
/// # Example
///
/// ```rust,ignore
/// use community_core::{Schema, Validatable};
///
/// let schema: Schema = fetch_schema().await?;
/// schema.validate()?;
/// for warning in schema.warnings() {
///     tracing::warn!("{}", warning);
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `AdminError` describing the problem.
    fn validate(&self) -> AdminResult<()>;

    /// Non-fatal issues worth logging
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminError;

    struct Label(String);

    impl Validatable for Label {
        fn validate(&self) -> AdminResult<()> {
            if self.0.is_empty() {
                return Err(AdminError::internal("empty label"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_methods() {
        assert!(Label("Name".to_string()).is_valid());
        assert!(!Label(String::new()).is_valid());
        assert!(Label(String::new()).warnings().is_empty());
    }
}
