//! # Record Table Component
//!
//! Paginated table of communities. One column per schema field plus an
//! actions column. The table grows as the last row scrolls into view.
//!
//! ```text
//! RecordTable
//! ├── Spinner            (first page loading)
//! ├── table
//! │   ├── header row     (field labels, "Actions")
//! │   └── RecordRow ...  (keyed by list generation and position)
//! ├── "Loading…"         (next page loading)
//! └── error message      (fetch failed)
//! ```

use std::rc::Rc;

use community_core::{Record, RecordId, Schema};
use community_engine::api::delete_record;
use community_engine::{Confirm, ListStatus, QueryKey, delete_prompt, header_labels, render_row};
use dioxus::prelude::*;

use super::confirm::RfdConfirm;
use crate::hooks::{RecordList, SentinelHandle, use_list_autostart, use_record_list, use_sentinel};
use crate::state::{PendingDeletes, StatusLevel, UiState};

/// One rendered row
#[derive(Clone, PartialEq)]
struct RowData {
    index: usize,
    record: Record,
    cells: Vec<String>,
}

// ============================================================================
// Table Component
// ============================================================================

/// Infinite-scroll table of records
#[component]
pub fn RecordTable() -> Element {
    let schema = use_context::<Rc<Schema>>();
    let list = use_record_list();
    use_list_autostart(list);
    let sentinel = use_sentinel(list);
    let ui = use_context::<Signal<UiState>>();
    let deleting = use_signal(PendingDeletes::default);

    // Runs in this scope, so refetches that remount rows do not cancel it
    let on_delete = move |id: RecordId| delete_row(list, ui, deleting, id);

    let cache = list.cache();
    let snapshot = cache.read();
    let Some(paged) = snapshot.list(QueryKey::Communities) else {
        return rsx! { Spinner {} };
    };

    let status = paged.status().clone();
    let generation = paged.generation();
    let last = paged.last_index();
    let rows: Vec<RowData> = paged
        .records()
        .enumerate()
        .map(|(index, record)| RowData {
            index,
            record: record.clone(),
            cells: render_row(&schema, record),
        })
        .collect();
    drop(snapshot);

    if matches!(status, ListStatus::Idle | ListStatus::LoadingFirstPage) {
        return rsx! { Spinner {} };
    }

    let headers = header_labels(&schema);
    let column_count = headers.len();

    rsx! {
        div {
            class: "table-container flex-1 overflow-auto",
            onmounted: move |e| sentinel.mount_viewport(e.data()),
            onscroll: move |_| sentinel.check(),

            table {
                class: "w-full text-sm",

                thead {
                    tr {
                        for label in headers {
                            th { class: "text-left px-3 py-2 text-slate-400", "{label}" }
                        }
                    }
                }

                tbody {
                    for row in rows.iter().cloned() {
                        RecordRow {
                            key: "{generation}-{row.index}",
                            busy: row.record.id.is_some_and(|id| deleting.read().is_pending(id)),
                            is_last: last == Some(row.index),
                            row: row.clone(),
                            sentinel: sentinel,
                            on_delete: on_delete,
                        }
                    }

                    if rows.is_empty() && status == ListStatus::Ready {
                        tr {
                            td {
                                class: "px-3 py-6 text-center text-slate-500",
                                colspan: "{column_count}",
                                "No communities yet"
                            }
                        }
                    }
                }
            }

            if status == ListStatus::LoadingNextPage {
                div { class: "py-3 text-center text-slate-400", "Loading…" }
            }

            if let ListStatus::Error(message) = &status {
                p { class: "py-3 text-center text-red-400", "{message}" }
            }
        }
    }
}

// ============================================================================
// Row Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
struct RecordRowProps {
    row: RowData,
    busy: bool,
    is_last: bool,
    sentinel: SentinelHandle,
    on_delete: EventHandler<RecordId>,
}

#[component]
fn RecordRow(props: RecordRowProps) -> Element {
    let mut ui = use_context::<Signal<UiState>>();
    let index = props.row.index;
    let record_id = props.row.record.id;
    let busy = props.busy;
    let last = props.is_last.then_some(index);
    let sentinel = props.sentinel;
    let on_delete = props.on_delete;
    let record = props.row.record.clone();

    rsx! {
        tr {
            class: "border-t border-slate-700",
            onmounted: move |e| sentinel.mount_row(index, last, e.data()),

            for cell in props.row.cells.iter() {
                td { class: "px-3 py-2", "{cell}" }
            }

            td {
                class: "px-3 py-2 whitespace-nowrap",
                button {
                    class: "btn btn-secondary mr-2",
                    disabled: busy,
                    onclick: move |_| ui.write().open_edit(record.clone()),
                    "Edit"
                }
                button {
                    class: "btn btn-danger",
                    disabled: busy || record_id.is_none(),
                    onclick: move |_| {
                        if let Some(id) = record_id {
                            on_delete.call(id);
                        }
                    },
                    if busy { "Deleting…" } else { "Delete" }
                }
            }
        }
    }
}

/// Confirm, delete and invalidate; only the record being deleted shows as busy
fn delete_row(
    list: RecordList,
    mut ui: Signal<UiState>,
    mut deleting: Signal<PendingDeletes>,
    id: RecordId,
) {
    if deleting.peek().is_pending(id) {
        return;
    }

    spawn(async move {
        if !RfdConfirm.confirm(&delete_prompt(id)).await {
            return;
        }
        if !deleting.write().begin(id) {
            return;
        }

        let api = list.api();
        let result = delete_record(&*api, id).await;
        deleting.write().finish(id);

        match result {
            Ok(()) => {
                ui.write()
                    .set_status(format!("Deleted community #{id}"), StatusLevel::Success);
                list.invalidate();
            }
            Err(err) => {
                tracing::error!("{}", err);
                ui.write().set_status(err.to_string(), StatusLevel::Error);
            }
        }
    });
}

// ============================================================================
// Spinner
// ============================================================================

/// Centered loading spinner
#[component]
pub fn Spinner() -> Element {
    rsx! {
        div {
            class: "flex flex-1 items-center justify-center py-12",
            div { class: "spinner" }
        }
    }
}
