//! Schema-driven record validation
//!
//! A [`RecordValidator`] is built from a list of field descriptors at
//! runtime. Each descriptor's type tag selects a pure rule function from
//! [`RULES`]; validating a form is then just running every rule over the
//! raw input strings.

use community_core::{FieldDescriptor, FieldError, FieldErrors, FieldType, FieldValue, Schema};
use std::collections::BTreeMap;

/// Raw form input keyed by field name
pub type RawValues = BTreeMap<String, String>;

/// Validated values keyed by field name, numbers already coerced
pub type NormalizedValues = BTreeMap<String, FieldValue>;

/// Rule applied to a non-empty raw value
pub type RuleFn = fn(&FieldRule, &str) -> Result<FieldValue, FieldError>;

/// Rule lookup table, one entry per field type
pub const RULES: [(FieldType, RuleFn); 4] = [
    (FieldType::Text, accept_text),
    (FieldType::Number, coerce_number),
    (FieldType::Enum, one_of_choices),
    (FieldType::Date, accept_text),
];

/// Find the rule for a field type
pub fn rule_for(field_type: FieldType) -> RuleFn {
    RULES
        .iter()
        .find(|(ty, _)| *ty == field_type)
        .map(|(_, rule)| *rule)
        .unwrap_or(accept_text)
}

fn accept_text(_rule: &FieldRule, raw: &str) -> Result<FieldValue, FieldError> {
    Ok(FieldValue::Text(raw.to_string()))
}

fn coerce_number(_rule: &FieldRule, raw: &str) -> Result<FieldValue, FieldError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(FieldValue::from_f64)
        .ok_or_else(|| FieldError::TypeCoercion {
            value: raw.to_string(),
        })
}

fn one_of_choices(rule: &FieldRule, raw: &str) -> Result<FieldValue, FieldError> {
    if rule.choices.iter().any(|choice| choice == raw) {
        Ok(FieldValue::Text(raw.to_string()))
    } else {
        Err(FieldError::InvalidEnumValue {
            value: raw.to_string(),
            allowed: rule.choices.clone(),
        })
    }
}

// ============================================================================
// FieldRule
// ============================================================================

/// Validation rule derived from one field descriptor
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Field name
    pub name: String,
    /// Field type the rule was derived from
    pub field_type: FieldType,
    /// Whether an empty value is rejected
    pub required: bool,
    /// Allowed values for enum fields
    pub choices: Vec<String>,
    check: RuleFn,
}

impl FieldRule {
    /// Derive the rule for a descriptor
    pub fn from_descriptor(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            field_type: field.field_type,
            required: field.required,
            choices: field.choices().to_vec(),
            check: rule_for(field.field_type),
        }
    }

    /// Apply the rule to a raw value.
    ///
    /// `Ok(None)` means the field is optional and was left empty, so it is
    /// absent from the normalized output.
    pub fn apply(&self, raw: Option<&str>) -> Result<Option<FieldValue>, FieldError> {
        match raw {
            Some(value) if !self.is_blank(value) => (self.check)(self, value).map(Some),
            _ if self.required => Err(FieldError::Required),
            _ => Ok(None),
        }
    }

    /// Numbers ignore surrounding whitespace, so whitespace alone is empty
    fn is_blank(&self, value: &str) -> bool {
        match self.field_type {
            FieldType::Number => value.trim().is_empty(),
            _ => value.is_empty(),
        }
    }
}

// ============================================================================
// RecordValidator
// ============================================================================

/// Validator for a whole record, built from a schema at runtime
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    rules: Vec<FieldRule>,
}

impl RecordValidator {
    /// Build a validator covering every field of the schema
    pub fn from_schema(schema: &Schema) -> Self {
        Self::from_fields(schema.iter())
    }

    /// Build a validator for a subset of fields
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FieldDescriptor>) -> Self {
        Self {
            rules: fields.into_iter().map(FieldRule::from_descriptor).collect(),
        }
    }

    /// Rules in schema order
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validate a single field by name.
    ///
    /// Names the validator does not know are accepted as absent.
    pub fn validate_field(&self, name: &str, raw: Option<&str>) -> Result<Option<FieldValue>, FieldError> {
        match self.rules.iter().find(|rule| rule.name == name) {
            Some(rule) => rule.apply(raw),
            None => Ok(None),
        }
    }

    /// Validate raw form values.
    ///
    /// Returns the normalized values, or every field error found. Raw values
    /// for names outside the schema are ignored.
    pub fn validate(&self, raw: &RawValues) -> Result<NormalizedValues, FieldErrors> {
        let mut normalized = NormalizedValues::new();
        let mut errors = FieldErrors::new();

        for rule in &self.rules {
            match rule.apply(raw.get(&rule.name).map(String::as_str)) {
                Ok(Some(value)) => {
                    normalized.insert(rule.name.clone(), value);
                }
                Ok(None) => {}
                Err(err) => errors.insert(rule.name.clone(), err),
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}

/// Build a validation function from a schema
pub fn build_validator(schema: &Schema) -> impl Fn(&RawValues) -> Result<NormalizedValues, FieldErrors> {
    let validator = RecordValidator::from_schema(schema);
    move |raw| validator.validate(raw)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new(vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::text("description", "Description"),
            FieldDescriptor::number("subs", "Subscribers").required(),
            FieldDescriptor::number("rating", "Rating"),
            FieldDescriptor::enumeration("status", "Status", ["active", "blocked", "private"]),
            FieldDescriptor::date("foundedAt", "Founded"),
        ])
    }

    fn raw(pairs: &[(&str, &str)]) -> RawValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rule_table_covers_every_type() {
        for ty in FieldType::all() {
            assert!(RULES.iter().any(|(t, _)| t == ty), "missing rule for {ty}");
        }
    }

    #[test]
    fn test_valid_input_is_normalized() {
        let schema = schema();
        let validate = build_validator(&schema);
        let values = validate(&raw(&[
            ("name", "Rustaceans"),
            ("subs", "100"),
            ("rating", " 4.5 "),
            ("status", "active"),
            ("foundedAt", "whenever"),
        ]))
        .unwrap();

        assert_eq!(values["name"], FieldValue::from("Rustaceans"));
        assert_eq!(values["subs"], FieldValue::from(100));
        assert_eq!(values["rating"].as_f64(), Some(4.5));
        assert_eq!(values["status"], FieldValue::from("active"));
        assert_eq!(values["foundedAt"], FieldValue::from("whenever"));
        assert_eq!(serde_json::to_value(&values["subs"]).unwrap(), serde_json::json!(100));
    }

    #[test]
    fn test_required_fields_reject_empty_and_missing() {
        let validator = RecordValidator::from_schema(&schema());
        let errors = validator.validate(&raw(&[("name", "")])).unwrap_err();

        assert_eq!(errors.get("name"), Some(&FieldError::Required));
        assert_eq!(errors.get("subs"), Some(&FieldError::Required));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_optional_empty_fields_are_omitted() {
        let validator = RecordValidator::from_schema(&schema());
        let values = validator
            .validate(&raw(&[
                ("name", "A"),
                ("subs", "1"),
                ("description", ""),
                ("rating", ""),
                ("status", ""),
            ]))
            .unwrap();

        assert_eq!(values.len(), 2);
        assert!(!values.contains_key("description"));
        assert!(!values.contains_key("rating"));
        assert!(!values.contains_key("status"));
    }

    #[test]
    fn test_whitespace_only_number_is_empty() {
        let validator = RecordValidator::from_schema(&schema());
        let values = validator
            .validate(&raw(&[("name", "A"), ("subs", "1"), ("rating", "   ")]))
            .unwrap();
        assert!(!values.contains_key("rating"));

        let errors = validator
            .validate(&raw(&[("name", "A"), ("subs", " \t ")]))
            .unwrap_err();
        assert_eq!(errors.get("subs"), Some(&FieldError::Required));
    }

    #[test]
    fn test_non_numeric_number_is_type_coercion_error() {
        let validator = RecordValidator::from_schema(&schema());
        for bad in ["abc", "12abc", "NaN", "inf", "1e999"] {
            let errors = validator
                .validate(&raw(&[("name", "A"), ("subs", bad)]))
                .unwrap_err();
            assert_eq!(
                errors.get("subs"),
                Some(&FieldError::TypeCoercion {
                    value: bad.to_string()
                }),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn test_enum_rejects_unknown_value() {
        let validator = RecordValidator::from_schema(&schema());
        let errors = validator
            .validate(&raw(&[("name", "A"), ("subs", "1"), ("status", "archived")]))
            .unwrap_err();

        assert_eq!(
            errors.message("status").as_deref(),
            Some("Must be one of: active, blocked, private")
        );
    }

    #[test]
    fn test_enum_without_values_rejects_everything() {
        let mut field = FieldDescriptor::enumeration("kind", "Kind", Vec::<String>::new());
        field.enum_values = None;
        let validator = RecordValidator::from_fields([&field]);

        assert!(validator.validate_field("kind", Some("x")).is_err());
        assert_eq!(validator.validate_field("kind", Some("")), Ok(None));
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let validator = RecordValidator::from_schema(&schema());
        let values = validator
            .validate(&raw(&[("name", "A"), ("subs", "2"), ("hacker", "x")]))
            .unwrap();
        assert!(!values.contains_key("hacker"));
        assert_eq!(validator.validate_field("hacker", Some("x")), Ok(None));
    }

    #[test]
    fn test_error_messages_map() {
        let validator = RecordValidator::from_schema(&schema());
        let errors = validator.validate(&raw(&[("subs", "x")])).unwrap_err();
        let messages = errors.messages();

        assert_eq!(messages["name"], "This field is required");
        assert_eq!(messages["subs"], "Must be a number");
    }
}
