//! # Input Components
//!
//! Form inputs used by the record form:
//! - **TextInput**: single-line input (text, number)
//! - **Select**: closed choice for enum fields
//! - **FieldInput**: picks one of the above from a schema field
//!

use community_core::FieldType;
use community_engine::FormInput;
use dioxus::prelude::*;

// ============================================================================
// Text Input Component
// ============================================================================

/// Properties for TextInput component
#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    /// Input value
    pub value: String,

    /// Label text (optional)
    #[props(default)]
    pub label: Option<String>,

    /// Placeholder text
    #[props(default)]
    pub placeholder: Option<String>,

    /// Error message (shows error state)
    #[props(default)]
    pub error: Option<String>,

    /// Whether the input is required
    #[props(default = false)]
    pub required: bool,

    /// Whether the input is disabled
    #[props(default = false)]
    pub disabled: bool,

    /// Input type (text, number)
    #[props(default = "text".to_string())]
    pub input_type: String,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                    if props.required {
                        span { class: "text-rose-400 ml-0.5", "*" }
                    }
                }
            }

            input {
                class: "{input_class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
            }

            if let Some(error) = &props.error {
                p {
                    class: "mt-1 text-xs text-rose-400",
                    "{error}"
                }
            }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

/// A single option for the Select component
#[derive(Clone, PartialEq, Debug)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// Option whose label is its value
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Properties for Select component
#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value
    pub value: String,

    /// Available options
    pub options: Vec<SelectOption>,

    /// Label text
    #[props(default)]
    pub label: Option<String>,

    /// Placeholder (shown when no selection)
    #[props(default)]
    pub placeholder: Option<String>,

    /// Error message
    #[props(default)]
    pub error: Option<String>,

    /// Whether required
    #[props(default = false)]
    pub required: bool,

    /// Whether disabled
    #[props(default = false)]
    pub disabled: bool,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let select_class = build_input_class(props.error.is_some(), props.disabled);
    let placeholder = props.placeholder.clone().unwrap_or_default();

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                    if props.required {
                        span { class: "text-rose-400 ml-0.5", "*" }
                    }
                }
            }

            select {
                class: "{select_class} select",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                // Empty choice doubles as "unset" for optional fields
                option {
                    value: "",
                    selected: props.value.is_empty(),
                    "{placeholder}"
                }

                for option in &props.options {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }

            if let Some(error) = &props.error {
                p {
                    class: "mt-1 text-xs text-rose-400",
                    "{error}"
                }
            }
        }
    }
}

// ============================================================================
// Field Input Component
// ============================================================================

/// Input for one schema field: a select for enums, a text box otherwise
#[component]
pub fn FieldInput(
    input: FormInput,
    #[props(default = false)] disabled: bool,
    on_change: EventHandler<(String, String)>,
) -> Element {
    let name = input.name.clone();
    let handle = move |value: String| on_change.call((name.clone(), value));

    match input.field_type {
        FieldType::Enum => rsx! {
            Select {
                value: input.value.clone(),
                options: input.choices.iter().map(SelectOption::plain).collect::<Vec<_>>(),
                label: input.label.clone(),
                placeholder: "Select…".to_string(),
                error: input.error.clone(),
                required: input.required,
                disabled: disabled,
                on_change: handle,
            }
        },
        other => rsx! {
            TextInput {
                value: input.value.clone(),
                label: input.label.clone(),
                error: input.error.clone(),
                required: input.required,
                disabled: disabled,
                input_type: other.input_type().to_string(),
                on_change: handle,
            }
        },
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build input class string
fn build_input_class(has_error: bool, disabled: bool) -> String {
    let mut classes = vec![
        "w-full",
        "px-3",
        "py-2",
        "bg-slate-800",
        "border",
        "rounded-lg",
        "text-sm",
        "text-slate-100",
    ];

    if has_error {
        classes.push("border-rose-500");
    } else {
        classes.push("border-slate-700");
    }

    if disabled {
        classes.push("opacity-50");
        classes.push("cursor-not-allowed");
    }

    classes.join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_input_class() {
        let class = build_input_class(false, false);
        assert!(class.contains("border-slate-700"));
        assert!(!class.contains("border-rose-500"));
        assert!(!class.contains("opacity-50"));
    }

    #[test]
    fn test_build_input_class_error() {
        assert!(build_input_class(true, false).contains("border-rose-500"));
    }

    #[test]
    fn test_build_input_class_disabled() {
        let class = build_input_class(false, true);
        assert!(class.contains("opacity-50"));
        assert!(class.contains("cursor-not-allowed"));
    }

    #[test]
    fn test_select_option_plain() {
        let opt = SelectOption::plain("active");
        assert_eq!(opt.value, "active");
        assert_eq!(opt.label, "active");
    }
}
