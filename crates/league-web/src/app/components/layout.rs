use dioxus::prelude::*;

use crate::components::NavBar;

#[component]
pub fn Layout(children: Element) -> Element {
    rsx! {
        div {
            class: "league-layout min-h-screen flex flex-col",
            header {
                NavBar {}
            }
            main {
                class: "league-main flex-grow p-4 max-w-5xl w-full mx-auto", {
                    children
                }
            }
        }
    }
}

/// Centered spinner shown until a list has resolved.
#[component]
pub fn Loading() -> Element {
    rsx! {
        div { class: "flex justify-center py-8",
            span { class: "loading loading-spinner loading-lg" }
        }
    }
}
