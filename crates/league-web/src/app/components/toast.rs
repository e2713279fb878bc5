use std::time::Duration;

use dioxus::prelude::*;
use gloo_timers::future::sleep;
use league_client::CreateOutcome;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastType {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub message: String,
    pub toast_type: ToastType,
}

impl ToastMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            toast_type: ToastType::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            toast_type: ToastType::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            toast_type: ToastType::Info,
        }
    }

    /// Alert for a create that was rejected or failed.
    pub fn for_create(outcome: &CreateOutcome) -> Option<Self> {
        outcome.user_message().map(Self::error)
    }
}

#[component]
pub fn Toast(mut message: Signal<Option<ToastMessage>>) -> Element {
    // Auto-dismiss after 5 seconds when a message is shown
    use_effect(move || {
        if message().is_some() {
            spawn(async move {
                sleep(Duration::from_secs(5)).await;
                message.set(None);
            });
        }
    });

    let Some(toast) = message() else {
        return rsx! {};
    };
    let alert_class = match toast.toast_type {
        ToastType::Success => "alert-success",
        ToastType::Error => "alert-error",
        ToastType::Info => "alert-info",
    };

    rsx! {
        div { class: "toast toast-bottom toast-end z-50",
            div {
                class: "alert {alert_class}",
                role: "alert",
                style: "max-width: 30vw; word-wrap: break-word; white-space: normal;",
                span { "{toast.message}" }
                button {
                    class: "btn btn-sm btn-circle btn-ghost ml-2",
                    onclick: move |_| message.set(None),
                    "✕"
                }
            }
        }
    }
}
