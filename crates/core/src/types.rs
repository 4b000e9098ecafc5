//! Core types used throughout Community Admin
//!
//! This module contains the schema and record types shared by the engine,
//! the HTTP client, the desktop UI and the CLI. All of them mirror the JSON
//! shapes served by the external communities API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};

use crate::error::{AdminError, AdminResult};
use crate::traits::Validatable;

// ============================================================================
// Identifiers
// ============================================================================

/// Server-assigned record identifier
pub type RecordId = u64;

/// Name of the server-managed creation timestamp
pub const CREATED_AT: &str = "createdAt";

/// Name of the server-managed modification timestamp
pub const UPDATED_AT: &str = "updatedAt";

/// Timestamp fields that are never rendered as form inputs
pub const TIMESTAMP_FIELDS: [&str; 2] = [CREATED_AT, UPDATED_AT];

/// Check if a field name refers to one of the server-managed timestamps
pub fn is_timestamp_field(name: &str) -> bool {
    TIMESTAMP_FIELDS.contains(&name)
}

// ============================================================================
// Field Types
// ============================================================================

/// Kind of value a schema field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    /// Free-form text (`"string"` on the wire)
    #[default]
    Text,
    /// Numeric value entered as text and coerced on submit
    Number,
    /// One of a closed list of strings
    Enum,
    /// Date/time string, normalized for display only
    Date,
}

impl FieldType {
    /// All field types in display order
    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::Text,
            FieldType::Number,
            FieldType::Enum,
            FieldType::Date,
        ]
    }

    /// Tag used by the schema service
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldType::Text => "string",
            FieldType::Number => "number",
            FieldType::Enum => "enum",
            FieldType::Date => "date",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Enum => "Enum",
            FieldType::Date => "Date",
        }
    }

    /// Parse a schema type tag.
    ///
    /// Unknown tags are treated as text, so an unexpected schema entry still
    /// renders as a plain input instead of breaking the whole schema.
    pub fn from_wire(tag: &str) -> Self {
        match tag {
            "string" | "text" => FieldType::Text,
            "number" => FieldType::Number,
            "enum" => FieldType::Enum,
            "date" => FieldType::Date,
            other => {
                tracing::warn!("Unknown field type '{}', treating it as text", other);
                FieldType::Text
            }
        }
    }

    /// HTML input type used for this field
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldType::Number => "number",
            _ => "text",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(FieldType::from_wire(&tag))
    }
}

// ============================================================================
// FieldDescriptor
// ============================================================================

/// Describes one attribute of a record, as supplied by the schema service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique key of the field inside a record
    pub name: String,

    /// Value kind
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Display label
    pub label: String,

    /// Whether a non-empty value is mandatory
    #[serde(default)]
    pub required: bool,

    /// Allowed values (enum fields only)
    #[serde(
        rename = "enum",
        alias = "enumValues",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_values: Option<Vec<String>>,
}

impl FieldDescriptor {
    /// Create a new optional field
    pub fn new(name: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: label.into(),
            required: false,
            enum_values: None,
        }
    }

    /// Create a text field
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text, label)
    }

    /// Create a number field
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number, label)
    }

    /// Create a date field
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date, label)
    }

    /// Create an enum field with the given choices
    pub fn enumeration<I, S>(name: impl Into<String>, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(name, FieldType::Enum, label);
        field.enum_values = Some(values.into_iter().map(Into::into).collect());
        field
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allowed enum values, empty for non-enum fields
    pub fn choices(&self) -> &[String] {
        self.enum_values.as_deref().unwrap_or(&[])
    }

    /// Whether this field is one of the server-managed timestamps
    pub fn is_timestamp(&self) -> bool {
        is_timestamp_field(&self.name)
    }
}

impl Validatable for FieldDescriptor {
    fn validate(&self) -> AdminResult<()> {
        if self.name.trim().is_empty() {
            return Err(AdminError::schema_load("Field name cannot be empty"));
        }
        Ok(())
    }

    fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.field_type == FieldType::Enum && self.choices().is_empty() {
            warnings.push(format!(
                "Enum field '{}' has no values; every non-empty value will be rejected",
                self.name
            ));
        }
        if self.field_type != FieldType::Enum && self.enum_values.is_some() {
            warnings.push(format!(
                "Field '{}' is not an enum but lists enum values; they are ignored",
                self.name
            ));
        }
        warnings
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Ordered list of field descriptors, fetched once per session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Create a schema from field descriptors
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// All fields in schema order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Iterate over all fields
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Fields rendered as form inputs (everything but the timestamps)
    pub fn editable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_timestamp())
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Validatable for Schema {
    fn validate(&self) -> AdminResult<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            field.validate()?;
            if !seen.insert(field.name.as_str()) {
                return Err(AdminError::schema_load(format!(
                    "Duplicate field name '{}'",
                    field.name
                )));
            }
        }
        Ok(())
    }

    fn warnings(&self) -> Vec<String> {
        self.fields.iter().flat_map(|f| f.warnings()).collect()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Body of `GET /schema`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Fields of the community resource
    #[serde(default)]
    pub communities: Vec<FieldDescriptor>,
}

impl From<SchemaDocument> for Schema {
    fn from(doc: SchemaDocument) -> Self {
        Schema::new(doc.communities)
    }
}

// ============================================================================
// Field Values
// ============================================================================

/// A single value stored in a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// JSON number
    Number(serde_json::Number),
    /// JSON string (text, enum and date fields)
    Text(String),
    /// Anything else the server sent, kept verbatim
    Other(serde_json::Value),
}

impl FieldValue {
    /// Build a numeric value, keeping integral numbers as integers.
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            return Some(FieldValue::Number((value as i64).into()));
        }
        serde_json::Number::from_f64(value).map(FieldValue::Number)
    }

    /// String content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Text shown in an input control when editing this value
    pub fn to_input_string(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Other(serde_json::Value::Null) => String::new(),
            FieldValue::Other(serde_json::Value::String(s)) => s.clone(),
            FieldValue::Other(other) => other.to_string(),
        }
    }

    /// Whether the value renders as an empty string
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Other(serde_json::Value::Null) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_input_string())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

// ============================================================================
// Record
// ============================================================================

/// One community record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned identifier (absent before creation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Creation timestamp (`DD.MM.YYYY HH:mm` when written by this client)
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last modification timestamp
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Schema-described values keyed by field name
    #[serde(flatten)]
    pub values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set a value
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Get a schema value by name (timestamps are not included)
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of any field by name, timestamps included
    pub fn value_text(&self, name: &str) -> Option<String> {
        match name {
            CREATED_AT => self.created_at.clone(),
            UPDATED_AT => self.updated_at.clone(),
            _ => self.values.get(name).map(FieldValue::to_input_string),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
