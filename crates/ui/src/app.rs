//! Main Application Component for Community Admin
//!
//! The root component builds the API client, provides the shared cache and
//! UI state through context, loads the schema once and then renders the
//! header, the record table, the status bar and the form modal.

use std::rc::Rc;

use community_client::{ClientConfig, HttpCommunityApi};
use community_core::Schema;
use community_engine::api::load_schema;
use community_engine::{QueryCache, QueryKey};
use dioxus::prelude::*;

use crate::components::{RecordFormDialog, RecordTable, Spinner};
use crate::state::{ApiHandle, SchemaState, UiState};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let config = use_context::<ClientConfig>();
    let api = use_hook(|| {
        HttpCommunityApi::new(&config)
            .map(ApiHandle::new)
            .map_err(|e| e.to_string())
    });

    use_effect(|| {
        tracing::info!("Community Admin UI initialized");
    });

    match api {
        Ok(api) => rsx! {
            Shell { api: api, page_size: config.page_size }
        },
        Err(message) => rsx! {
            BlockingMessage { title: "Cannot start", message: message }
        },
    }
}

// ============================================================================
// Shell
// ============================================================================

/// Owns the session-wide context and the schema load
#[component]
fn Shell(api: ApiHandle, page_size: u32) -> Element {
    use_context_provider(|| api.clone());
    use_context_provider(|| Signal::new(QueryCache::new(page_size)));
    use_context_provider(|| Signal::new(UiState::default()));

    let schema = use_resource(move || {
        let api = api.clone();
        async move { load_schema(&*api).await }
    });

    let state = match &*schema.read() {
        None => SchemaState::Loading,
        Some(Err(err)) => {
            tracing::error!("{}", err);
            SchemaState::Failed(err.to_string())
        }
        Some(Ok(schema)) if schema.is_empty() => SchemaState::Empty,
        Some(Ok(schema)) => SchemaState::Loaded(Rc::new(schema.clone())),
    };

    rsx! {
        div {
            class: "app-container h-screen w-screen flex flex-col bg-slate-900 text-slate-100 overflow-hidden",

            match state {
                SchemaState::Loading => rsx! { Spinner {} },
                SchemaState::Failed(message) => rsx! {
                    BlockingMessage { title: "Schema unavailable", message: message }
                },
                SchemaState::Empty => rsx! {
                    BlockingMessage {
                        title: "Nothing to show",
                        message: "The server schema has no fields.".to_string(),
                    }
                },
                SchemaState::Loaded(schema) => rsx! { Workspace { schema: schema } },
            }
        }
    }
}

/// Everything that needs a loaded schema
#[component]
fn Workspace(schema: Rc<Schema>) -> Element {
    use_context_provider(|| schema.clone());
    let ui = use_context::<Signal<UiState>>();
    let modal = ui.read().modal.clone();

    rsx! {
        Header {}

        main {
            class: "flex flex-1 flex-col overflow-hidden px-4",
            RecordTable {}
        }

        StatusBar {}

        if let Some(mode) = modal {
            RecordFormDialog { mode: mode }
        }
    }
}

// ============================================================================
// Header Component
// ============================================================================

/// Title and create action
#[component]
fn Header() -> Element {
    let mut ui = use_context::<Signal<UiState>>();

    rsx! {
        header {
            class: "toolbar h-12 bg-slate-800 border-b border-slate-700 flex items-center px-4 gap-2 shrink-0",

            span { class: "font-semibold text-sm", "{crate::TITLE}" }

            div { class: "flex-1" }

            button {
                class: "btn btn-primary",
                onclick: move |_| ui.write().open_create(),
                "New community"
            }
        }
    }
}

// ============================================================================
// Status Bar Component
// ============================================================================

/// Last status message and loaded record count
#[component]
fn StatusBar() -> Element {
    let mut ui = use_context::<Signal<UiState>>();
    let cache = use_context::<Signal<QueryCache>>();

    let status = ui.read().status.clone();
    let loaded = cache
        .read()
        .list(QueryKey::Communities)
        .map(|list| list.len())
        .unwrap_or(0);

    rsx! {
        footer {
            class: "status-bar h-6 bg-slate-800 border-t border-slate-700 flex items-center px-4 text-xs text-slate-400 shrink-0",

            if let Some(msg) = status {
                span { class: msg.level.class(), "{msg.text}" }
                button {
                    class: "ml-2 text-slate-500",
                    onclick: move |_| ui.write().clear_status(),
                    "✕"
                }
            } else {
                span { "Ready" }
            }

            div { class: "flex-1" }

            span { "Loaded: {loaded}" }
        }
    }
}

// ============================================================================
// Blocking Message
// ============================================================================

/// Full-window message with no way forward
#[component]
fn BlockingMessage(title: &'static str, message: String) -> Element {
    rsx! {
        div {
            class: "flex flex-1 flex-col items-center justify-center gap-2 p-8 text-center",
            h1 { class: "text-xl font-bold text-red-400", "{title}" }
            p { class: "text-slate-300", "{message}" }
        }
    }
}
