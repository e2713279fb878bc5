use dioxus::prelude::*;
use league_types::Destination;

use crate::components::Layout;

#[component]
pub fn NotFoundPage(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        Layout {
            p { "Not found: /{path}" }
            Link { class: "btn btn-primary mt-4", to: Destination::Home.path(), "Go Home" }
        }
    }
}

/// Rendered instead of the router when the build carries no backend settings.
#[component]
pub fn ConfigErrorPage(message: String) -> Element {
    rsx! {
        div { class: "hero min-h-screen bg-base-200",
            div { class: "hero-content text-center",
                div {
                    h1 { class: "text-3xl font-bold", "Futsal League is not configured" }
                    p { class: "py-6", "{message}" }
                }
            }
        }
    }
}
