//! Table columns and cell rendering

use community_core::{FieldDescriptor, FieldType, Record, Schema, display_timestamp};

/// Label of the trailing column holding row actions
pub const ACTIONS_COLUMN: &str = "Actions";

/// Fields shown as columns, in schema order
pub fn columns(schema: &Schema) -> &[FieldDescriptor] {
    schema.fields()
}

/// Header labels including the actions column
pub fn header_labels(schema: &Schema) -> Vec<String> {
    schema
        .iter()
        .map(|field| field.label.clone())
        .chain(std::iter::once(ACTIONS_COLUMN.to_string()))
        .collect()
}

/// Text shown in one cell.
///
/// Date fields go through timestamp normalization; missing values render
/// empty.
pub fn render_cell(field: &FieldDescriptor, record: &Record) -> String {
    let Some(raw) = record.value_text(&field.name) else {
        return String::new();
    };
    match field.field_type {
        FieldType::Date => display_timestamp(&raw),
        _ => raw,
    }
}

/// Every cell of a row, in column order (actions excluded)
pub fn render_row(schema: &Schema, record: &Record) -> Vec<String> {
    schema.iter().map(|field| render_cell(field, record)).collect()
}
