//! Plain-text rendering of schemas, records and field errors

use community_core::{FieldErrors, Record, Schema};
use community_engine::columns::columns;
use community_engine::render_row;

/// Column separator
const GAP: &str = "  ";

/// Lay out a header and rows as aligned columns.
///
/// The second line is a dashed rule under the header.
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(GAP)
            .trim_end()
            .to_string()
    };

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers));
    lines.push(line(&rule));
    lines.extend(rows.iter().map(|row| line(row)));
    lines
}

/// Records as a table: the id, then one column per schema field
pub fn record_table(schema: &Schema, records: &[&Record]) -> Vec<String> {
    let mut headers = vec!["ID".to_string()];
    headers.extend(columns(schema).iter().map(|field| field.label.clone()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut row = vec![record.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into())];
            row.extend(render_row(schema, record));
            row
        })
        .collect();

    format_table(&headers, &rows)
}

/// Field descriptors as a table
pub fn schema_table(schema: &Schema) -> Vec<String> {
    let headers: Vec<String> = ["Name", "Type", "Label", "Required", "Values"]
        .iter()
        .map(|h| h.to_string())
        .collect();

    let rows: Vec<Vec<String>> = schema
        .iter()
        .map(|field| {
            vec![
                field.name.clone(),
                field.field_type.display_name().to_string(),
                field.label.clone(),
                if field.required { "yes" } else { "no" }.to_string(),
                field.choices().join(", "),
            ]
        })
        .collect();

    format_table(&headers, &rows)
}

/// One indented line per rejected field
pub fn field_error_lines(errors: &FieldErrors) -> Vec<String> {
    errors
        .messages()
        .into_iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use community_core::{FieldDescriptor, FieldError};

    fn schema() -> Schema {
        Schema::new(vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::enumeration("status", "Status", ["active", "blocked"]),
        ])
    }

    #[test]
    fn test_format_table_aligns_columns() {
        let headers = vec!["ID".to_string(), "Name".to_string()];
        let rows = vec![
            vec!["1".to_string(), "Rust".to_string()],
            vec!["12".to_string(), "Go".to_string()],
        ];
        let lines = format_table(&headers, &rows);
        assert_eq!(lines, vec!["ID  Name", "--  ----", "1   Rust", "12  Go"]);
    }

    #[test]
    fn test_format_table_empty() {
        let lines = format_table(&["Name".to_string()], &[]);
        assert_eq!(lines, vec!["Name", "----"]);
    }

    #[test]
    fn test_record_table() {
        let schema = schema();
        let record = Record::new()
            .with_id(3)
            .with_value("name", "Rustaceans")
            .with_value("status", "active");
        let lines = record_table(&schema, &[&record]);
        assert_eq!(lines[0], "ID  Name        Status");
        assert_eq!(lines[2], "3   Rustaceans  active");
    }

    #[test]
    fn test_record_table_missing_value() {
        let schema = schema();
        let record = Record::new().with_id(1).with_value("name", "Solo");
        let lines = record_table(&schema, &[&record]);
        assert_eq!(lines[2], "1   Solo");
    }

    #[test]
    fn test_schema_table() {
        let lines = schema_table(&schema());
        assert!(lines[2].starts_with("name"));
        assert!(lines[2].contains("Text"));
        assert!(lines[3].contains("Enum"));
        assert!(lines[2].contains("yes"));
        assert!(lines[3].contains("active, blocked"));
    }

    #[test]
    fn test_field_error_lines() {
        let mut errors = FieldErrors::new();
        errors.insert("name", FieldError::Required);
        let lines = field_error_lines(&errors);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("  name: "));
    }
}
