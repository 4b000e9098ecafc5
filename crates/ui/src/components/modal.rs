//! # Modal Component
//!
//! Centered dialog over a dimmed backdrop. Clicking the backdrop closes it
//! unless the dialog is busy.

use dioxus::prelude::*;

/// Modal dialog overlay
#[component]
pub fn Modal(
    title: String,
    #[props(default = true)] dismissible: bool,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center",

            // Backdrop
            div {
                class: "absolute inset-0 bg-black/50",
                onclick: move |_| {
                    if dismissible {
                        on_close.call(());
                    }
                }
            }

            div {
                class: "relative bg-slate-800 rounded-lg shadow-xl border border-slate-700 mx-4 max-w-lg w-full",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "flex items-center justify-between px-6 py-4 border-b border-slate-700",
                    h2 { class: "text-lg font-semibold", "{title}" }
                    button {
                        class: "w-8 h-8 rounded text-slate-400 hover:bg-slate-700",
                        disabled: !dismissible,
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }

                div {
                    class: "p-6",
                    {children}
                }
            }
        }
    }
}
