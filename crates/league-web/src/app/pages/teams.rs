use dioxus::prelude::*;
use league_client::ViewSpec;
use league_types::Team;

use crate::{
    app::views::use_gated_list, components::{Layout, Loading}
};

#[component]
pub fn TeamsPage() -> Element {
    let list = use_gated_list::<Team>(ViewSpec::public);
    let view = list.view.read();

    rsx! {
        Layout {
            div { class: "card bg-base-100 shadow",
                div { class: "card-body",
                    h1 { class: "card-title text-2xl", "Teams" }
                    if !(list.settled)() {
                        Loading {}
                    } else if view.items().is_empty() {
                        p { class: "opacity-70", "No teams yet." }
                    } else {
                        ul { class: "menu bg-base-200 rounded-box",
                            for team in view.items() {
                                li { key: "{team.id}", span { "{team.name}" } }
                            }
                        }
                    }
                }
            }
        }
    }
}
