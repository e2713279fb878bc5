use dioxus::prelude::*;
use league_client::{FormOutcome, SignInForm};

use crate::{
    app::auth::hooks::{use_notice, use_services, use_session}, components::Layout
};

#[component]
pub fn SignInPage() -> Element {
    let services = use_services();
    let mut snapshot = use_session();
    let mut notice = use_notice();
    let navigator = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut error_message = use_signal(|| None::<String>);

    // Shown once, e.g. the post-sign-up verification hint.
    let pending_notice = use_hook(|| notice.peek().clone());
    use_effect(move || notice.set(None));

    let on_submit = move |evt: Event<FormData>| {
        evt.stop_propagation();
        evt.prevent_default();

        if submitting() {
            return;
        }
        error_message.set(None);
        submitting.set(true);

        let form = SignInForm {
            email: email(),
            password: password(),
        };
        let session = services.session.clone();
        spawn(async move {
            match form.submit(&session).await {
                FormOutcome::Navigate { to, notice: message } => {
                    snapshot.set(session.snapshot());
                    notice.set(message);
                    navigator.push(to.path());
                }
                FormOutcome::Error(message) => error_message.set(Some(message)),
            }
            submitting.set(false);
        });
    };

    rsx! {
        Layout {
            div { class: "flex items-center justify-center min-h-[calc(100vh-16rem)]",
                div { class: "card w-96 bg-base-100 shadow-xl",
                    div { class: "card-body",
                        h2 { class: "card-title justify-center mb-4", "Sign In" }

                        if let Some(message) = pending_notice {
                            div { class: "alert alert-info mb-2",
                                span { "{message}" }
                            }
                        }

                        form { onsubmit: on_submit,
                            class: "flex flex-col gap-4",
                            input {
                                r#type: "email",
                                placeholder: "Email",
                                class: "input input-bordered w-full",
                                value: "{email}",
                                oninput: move |evt| email.set(evt.value()),
                                autocomplete: "username",
                            }
                            input {
                                r#type: "password",
                                placeholder: "Password",
                                class: "input input-bordered w-full",
                                value: "{password}",
                                oninput: move |evt| password.set(evt.value()),
                                autocomplete: "current-password",
                            }

                            if let Some(error) = error_message() {
                                div { class: "alert alert-error",
                                    span { "{error}" }
                                }
                            }

                            button {
                                r#type: "submit",
                                class: "btn btn-primary w-full",
                                disabled: submitting(),
                                if submitting() {
                                    span { class: "loading loading-spinner" }
                                    span { "Signing in" }
                                } else {
                                    span { "Sign In" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
