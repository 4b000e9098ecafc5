//! Record form model
//!
//! A [`RecordForm`] holds the raw input of one create or edit dialog. It
//! knows which fields to render, validates them with a
//! [`RecordValidator`] built from those fields only, and turns valid input
//! into a [`Submission`]. Timestamps are stamped here; the server never
//! sees a form without them.

use community_core::{
    AdminError, AdminResult, FieldDescriptor, FieldErrors, FieldType, Record, Schema,
};

use crate::api::{CommunityApi, mutation_error};
use crate::validation::{RawValues, RecordValidator};

// ============================================================================
// Mode and Submission
// ============================================================================

/// What the form is for
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormMode {
    /// New record, all inputs empty
    #[default]
    Create,
    /// Existing record, inputs pre-filled
    Edit(Record),
}

impl FormMode {
    /// Dialog title
    pub fn title(&self) -> String {
        match self {
            FormMode::Create => "New community".to_string(),
            FormMode::Edit(record) => match record.id {
                Some(id) => format!("Edit community #{id}"),
                None => "Edit community".to_string(),
            },
        }
    }

    /// Label of the submit control
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Edit(_) => "Save",
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Validated request ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(Record),
    Update(Record),
}

impl Submission {
    /// Record to send
    pub fn record(&self) -> &Record {
        match self {
            Submission::Create(record) | Submission::Update(record) => record,
        }
    }

    /// Operation name used in logs and errors
    pub fn operation(&self) -> &'static str {
        match self {
            Submission::Create(_) => "create",
            Submission::Update(_) => "update",
        }
    }
}

/// Result of [`RecordForm::begin_submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStep {
    /// A submission is already in flight; nothing happened
    Busy,
    /// Validation failed; errors are shown next to the inputs
    Invalid(FieldErrors),
    /// Send this, then report back with [`RecordForm::finish_submit`]
    Ready(Submission),
}

/// One rendered input, owned so views can hold it
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub choices: Vec<String>,
    pub value: String,
    pub error: Option<String>,
}

// ============================================================================
// RecordForm
// ============================================================================

/// State of one create or edit form
#[derive(Debug, Clone)]
pub struct RecordForm {
    mode: FormMode,
    fields: Vec<FieldDescriptor>,
    validator: RecordValidator,
    values: RawValues,
    errors: FieldErrors,
    submitting: bool,
    submit_error: Option<String>,
}

impl RecordForm {
    /// Build a form for every non-timestamp field of the schema
    pub fn new(schema: &Schema, mode: FormMode) -> Self {
        let fields: Vec<FieldDescriptor> = schema.editable_fields().cloned().collect();
        let validator = RecordValidator::from_fields(&fields);

        let values = match &mode {
            FormMode::Create => RawValues::new(),
            FormMode::Edit(record) => fields
                .iter()
                .filter_map(|field| {
                    record
                        .value_text(&field.name)
                        .map(|text| (field.name.clone(), text))
                })
                .collect(),
        };

        Self {
            mode,
            fields,
            validator,
            values,
            errors: FieldErrors::new(),
            submitting: false,
            submit_error: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Rendered fields in schema order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Snapshot of every input for rendering
    pub fn inputs(&self) -> Vec<FormInput> {
        self.fields
            .iter()
            .map(|field| FormInput {
                name: field.name.clone(),
                label: field.label.clone(),
                field_type: field.field_type,
                required: field.required,
                choices: field.choices().to_vec(),
                value: self.value(&field.name).to_string(),
                error: self.errors.message(&field.name),
            })
            .collect()
    }

    /// Current raw value of a field
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Raw values keyed by field name
    pub fn values(&self) -> &RawValues {
        &self.values
    }

    /// Change a field's raw value, clearing its error
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        self.errors.remove(name);
        self.values.insert(name.to_string(), value.into());
    }

    /// Current field errors
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether a submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Error of the last failed request
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Validate and build the request.
    ///
    /// `now` is the timestamp written into `updatedAt` (and `createdAt` for
    /// new records).
    pub fn begin_submit(&mut self, now: &str) -> SubmitStep {
        if self.submitting {
            return SubmitStep::Busy;
        }

        let normalized = match self.validator.validate(&self.values) {
            Ok(normalized) => normalized,
            Err(errors) => {
                tracing::debug!("Form rejected: {}", errors);
                self.errors = errors.clone();
                return SubmitStep::Invalid(errors);
            }
        };

        let submission = match &self.mode {
            FormMode::Create => Submission::Create(Record {
                id: None,
                created_at: Some(now.to_string()),
                updated_at: Some(now.to_string()),
                values: normalized,
            }),
            FormMode::Edit(original) => {
                let mut record = original.clone();
                for field in &self.fields {
                    record.values.remove(&field.name);
                }
                record.values.extend(normalized);
                record.updated_at = Some(now.to_string());
                Submission::Update(record)
            }
        };

        self.errors.clear();
        self.submit_error = None;
        self.submitting = true;
        SubmitStep::Ready(submission)
    }

    /// Record the outcome of the request started by [`RecordForm::begin_submit`]
    pub fn finish_submit(&mut self, result: &AdminResult<Record>) {
        self.submitting = false;
        match result {
            Ok(_) => self.submit_error = None,
            Err(AdminError::Validation(errors)) => self.errors = errors.clone(),
            Err(err) => self.submit_error = Some(err.to_string()),
        }
    }
}

/// Send a submission, reporting failures as a mutation error
pub async fn submit<A>(api: &A, submission: &Submission) -> AdminResult<Record>
where
    A: CommunityApi + ?Sized,
{
    let operation = submission.operation();
    let result = match submission {
        Submission::Create(record) => api.create(record).await,
        Submission::Update(record) if record.id.is_none() => Err(AdminError::mutation(
            operation,
            "record has no id",
        )),
        Submission::Update(record) => api.update(record).await,
    };

    let stored = result.map_err(|err| mutation_error(operation, err))?;
    tracing::info!(
        "Community {} succeeded (id {:?})",
        operation,
        stored.id.or(submission.record().id)
    );
    Ok(stored)
}

// ============================================================================
// Tests
// ============================================================================
