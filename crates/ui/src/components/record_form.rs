//! # Record Form Dialog
//!
//! Create or edit one community. Inputs are generated from the schema
//! (timestamps excluded); validation runs before anything is sent. While a
//! request is in flight every control is disabled and the dialog cannot be
//! dismissed.

use std::rc::Rc;

use community_core::{Schema, now_timestamp};
use community_engine::form::submit;
use community_engine::{FormMode, RecordForm, SubmitStep};
use dioxus::prelude::*;

use super::inputs::FieldInput;
use super::modal::Modal;
use crate::hooks::use_record_list;
use crate::state::{StatusLevel, UiState};

/// Modal form bound to the shared cache
#[component]
pub fn RecordFormDialog(mode: FormMode) -> Element {
    let schema = use_context::<Rc<Schema>>();
    let mut ui = use_context::<Signal<UiState>>();
    let list = use_record_list();

    let title = mode.title();
    let submit_label = mode.submit_label();
    let mut form = use_signal(move || RecordForm::new(&schema, mode));

    let snapshot = form.read();
    let inputs = snapshot.inputs();
    let submitting = snapshot.is_submitting();
    let banner = snapshot.submit_error().map(str::to_string);
    drop(snapshot);

    let handle_submit = move |_| {
        let step = form.write().begin_submit(&now_timestamp());
        let SubmitStep::Ready(submission) = step else {
            return;
        };

        spawn(async move {
            let api = list.api();
            let result = submit(&*api, &submission).await;
            form.write().finish_submit(&result);

            match result {
                Ok(record) => {
                    let id = record.id.map(|id| format!(" #{id}")).unwrap_or_default();
                    ui.write().set_status(
                        format!("Community{id} saved"),
                        StatusLevel::Success,
                    );
                    list.invalidate();
                    ui.write().close_modal();
                }
                Err(err) => tracing::error!("{}", err),
            }
        });
    };

    rsx! {
        Modal {
            title: title,
            dismissible: !submitting,
            on_close: move |_| ui.write().close_modal(),

            if let Some(message) = banner {
                div {
                    class: "mb-4 px-3 py-2 rounded bg-red-500/20 text-red-300 text-sm",
                    "{message}"
                }
            }

            div {
                class: "flex flex-col gap-4",
                for input in inputs {
                    FieldInput {
                        key: "{input.name}",
                        input: input.clone(),
                        disabled: submitting,
                        on_change: move |(name, value): (String, String)| {
                            form.write().set_value(&name, value);
                        },
                    }
                }
            }

            div {
                class: "flex justify-end gap-2 mt-6",
                button {
                    class: "btn btn-secondary",
                    disabled: submitting,
                    onclick: move |_| ui.write().close_modal(),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    disabled: submitting,
                    onclick: handle_submit,
                    if submitting {
                        span { class: "spinner spinner-sm mr-2" }
                        "Saving…"
                    } else {
                        "{submit_label}"
                    }
                }
            }
        }
    }
}
