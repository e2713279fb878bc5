use dioxus::prelude::*;
use league_client::{nav, FormOutcome, NavAction, NavBarModel};
use league_types::Destination;

use crate::{
    app::auth::hooks::{use_services, use_session}, components::{Toast, ToastMessage}
};

#[component]
pub fn NavBar() -> Element {
    let services = use_services();
    let mut snapshot = use_session();
    let navigator = use_navigator();
    let mut toast = use_signal(|| None::<ToastMessage>);
    let mut signing_out = use_signal(|| false);

    let model = NavBarModel::from_snapshot(&snapshot.read());

    let on_sign_out = use_callback(move |_: MouseEvent| {
        if signing_out() {
            return;
        }
        signing_out.set(true);
        let session = services.session.clone();
        spawn(async move {
            match nav::sign_out(&session).await {
                FormOutcome::Navigate { to, .. } => {
                    snapshot.set(session.snapshot());
                    navigator.push(to.path());
                }
                FormOutcome::Error(message) => toast.set(Some(ToastMessage::error(message))),
            }
            signing_out.set(false);
        });
    });

    rsx! {
        div { class: "navbar bg-base-200 shadow-sm",
            div { class: "flex-1",
                Link { class: "btn btn-ghost text-xl", to: Destination::Home.path(), "Futsal League" }
                ul { class: "menu menu-horizontal px-1",
                    for destination in model.links() {
                        li { Link { to: destination.path(), "{destination.label()}" } }
                    }
                }
            }

            div { class: "flex-none gap-2",
                if !snapshot.read().is_loading() {
                    for action in model.session_actions() {
                        match action {
                            NavAction::Link(destination) => rsx! {
                                Link { class: "btn btn-ghost btn-sm", to: destination.path(), "{action.label()}" }
                            },
                            NavAction::SignOut => rsx! {
                                button {
                                    class: "btn btn-outline btn-sm",
                                    disabled: signing_out(),
                                    onclick: move |evt| on_sign_out.call(evt),
                                    "{action.label()}"
                                }
                            },
                        }
                    }
                }
            }
            Toast { message: toast }
        }
    }
}
