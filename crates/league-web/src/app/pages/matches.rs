use std::collections::HashMap;

use dioxus::prelude::*;
use league_client::{CreateOutcome, ViewSpec};
use league_types::{display::MatchSummary, Match, MatchDraft, ValidationError};

use crate::{
    app::views::use_gated_list, components::{Layout, Loading, Toast, ToastMessage}
};

#[component]
fn DraftField(
    label: &'static str,
    input_type: &'static str,
    value: String,
    error: Option<String>,
    oninput: EventHandler<String>,
) -> Element {
    let input_class = if error.is_some() { "input input-bordered input-error w-full" } else { "input input-bordered w-full" };

    rsx! {
        label { class: "form-control w-full",
            div { class: "label",
                span { class: "label-text", "{label}" }
            }
            input {
                r#type: input_type,
                class: input_class,
                placeholder: label,
                value: "{value}",
                oninput: move |evt| oninput.call(evt.value()),
            }
            if let Some(message) = error {
                div { class: "label",
                    span { class: "label-text-alt text-error", "{message}" }
                }
            }
        }
    }
}

/// Fixture list; members of the admin group also get the add-match form.
#[component]
pub fn MatchesPage() -> Element {
    let list = use_gated_list::<Match>(ViewSpec::authenticated);
    let mut draft = use_signal(MatchDraft::default);
    let mut errors = use_signal(HashMap::<String, ValidationError>::new);
    let mut submitting = use_signal(|| false);
    let mut toast = use_signal(|| None::<ToastMessage>);

    let submit_list = list.clone();
    let on_submit = move |evt: Event<FormData>| {
        evt.stop_propagation();
        evt.prevent_default();
        if submitting() {
            return;
        }
        submitting.set(true);
        errors.set(HashMap::new());

        submit_list.create(draft(), move |outcome, returned| {
            match &outcome {
                CreateOutcome::Created(_) => toast.set(Some(ToastMessage::success("Match added."))),
                CreateOutcome::Invalid(field_errors) => errors.set(field_errors.clone()),
                other => toast.set(ToastMessage::for_create(other)),
            }
            draft.set(returned);
            submitting.set(false);
        });
    };

    let refresh_list = list.clone();
    let apply_list = list.clone();
    let field_error = move |name: &str| errors.read().get(name).map(ToString::to_string);

    let view = list.view.read();
    let fixtures: Vec<(String, String, [String; 3])> = view
        .items()
        .iter()
        .map(|fixture| {
            let summary = MatchSummary::new(fixture);
            (fixture.id.to_string(), summary.headline(), summary.details())
        })
        .collect();

    rsx! {
        Layout {
            div { class: "flex items-center justify-between mb-4",
                h1 { class: "text-3xl font-bold", "Matches" }
                button {
                    class: "btn btn-ghost btn-sm",
                    disabled: !(list.settled)(),
                    onclick: move |_| refresh_list.refresh(),
                    "Refresh"
                }
            }

            if view.is_stale() {
                div { class: "alert alert-info mb-4",
                    span { "The match list has changed since it was loaded." }
                    button {
                        class: "btn btn-sm",
                        onclick: move |_| apply_list.apply_refresh(),
                        "Show latest"
                    }
                }
            }

            if view.can_create() {
                form { class: "card bg-base-100 shadow mb-6",
                    onsubmit: on_submit,
                    div { class: "card-body grid gap-2 md:grid-cols-2",
                        DraftField {
                            label: "Team 1",
                            input_type: "text",
                            value: draft.read().team1.clone(),
                            error: field_error("team1"),
                            oninput: move |value| draft.write().team1 = value,
                        }
                        DraftField {
                            label: "Team 2",
                            input_type: "text",
                            value: draft.read().team2.clone(),
                            error: field_error("team2"),
                            oninput: move |value| draft.write().team2 = value,
                        }
                        DraftField {
                            label: "Date",
                            input_type: "date",
                            value: draft.read().date.clone(),
                            error: field_error("date"),
                            oninput: move |value| draft.write().date = value,
                        }
                        DraftField {
                            label: "Time",
                            input_type: "time",
                            value: draft.read().time.clone(),
                            error: field_error("time"),
                            oninput: move |value| draft.write().time = value,
                        }
                        DraftField {
                            label: "Location",
                            input_type: "text",
                            value: draft.read().location.clone(),
                            error: field_error("location"),
                            oninput: move |value| draft.write().location = value,
                        }
                        div { class: "card-actions items-end justify-end",
                            button {
                                r#type: "submit",
                                class: "btn btn-primary",
                                disabled: submitting(),
                                if submitting() {
                                    span { class: "loading loading-spinner" }
                                }
                                "Add Match"
                            }
                        }
                    }
                }
            }

            if !(list.settled)() {
                Loading {}
            } else {
                ul { class: "space-y-4",
                    for (id, headline, details) in fixtures {
                        li { key: "{id}", class: "p-4 bg-base-200 rounded shadow",
                            p { class: "font-semibold", "{headline}" }
                            for line in details {
                                p { "{line}" }
                            }
                        }
                    }
                }
            }

            Toast { message: toast }
        }
    }
}
