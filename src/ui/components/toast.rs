use std::time::Duration;

use dioxus::prelude::*;

use crate::util::next_ui_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(6);
const MAX_VISIBLE_TOASTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: next_ui_id("toast"),
            kind,
            text: text.into(),
        }
    }
}

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let text = message.into();
    toasts.with_mut(|entries| {
        if entries.len() >= MAX_VISIBLE_TOASTS {
            entries.remove(0);
        }
        entries.push(ToastMessage::new(kind, text));
    });
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let entries = toasts();

    if entries.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "toast-stack",
            ul {
                for message in entries {
                    ToastCard { key: "{message.id}", message: message.clone(), toasts }
                }
            }
        }
    }
}

#[component]
fn ToastCard(message: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let toast_id = message.id.clone();
    let _auto_dismiss = use_future(move || {
        let mut toasts = toasts;
        let id = toast_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    let (theme, icon) = match message.kind {
        ToastKind::Info => ("toast toast-info", "ℹ️"),
        ToastKind::Success => ("toast toast-success", "✅"),
        ToastKind::Warning => ("toast toast-warning", "⚠️"),
        ToastKind::Error => ("toast toast-error", "⛔"),
    };
    let dismiss_id = message.id.clone();

    rsx! {
        li {
            class: theme,
            span { "{icon}" }
            p { "{message.text}" }
            button {
                onclick: move |_| {
                    let mut toasts = toasts;
                    let target = dismiss_id.clone();
                    toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                },
                "Dismiss"
            }
        }
    }
}
