use chrono::Utc;
use dioxus::prelude::*;
use league_client::ViewSpec;
use league_types::{
    display::{TodayListing, HOME_EMPTY_MESSAGE}, Match
};

use crate::{
    app::views::use_gated_list, components::{Layout, Loading}
};

/// Today's fixtures. "Today" is the UTC calendar date.
#[component]
pub fn HomePage() -> Element {
    let list = use_gated_list::<Match>(|| ViewSpec::todays_matches(Utc::now().date_naive()));

    let listing = TodayListing::from_matches(list.view.read().items());

    rsx! {
        Layout {
            div { class: "card bg-base-100 shadow",
                div { class: "card-body",
                    h1 { class: "card-title text-2xl", "Matches of the Day" }
                    if !(list.settled)() {
                        Loading {}
                    } else {
                        match listing {
                            TodayListing::Empty => rsx! {
                                p { class: "opacity-70", "{HOME_EMPTY_MESSAGE}" }
                            },
                            TodayListing::Lines(lines) => rsx! {
                                ul { class: "list-disc pl-6 space-y-1",
                                    for line in lines {
                                        li { "{line}" }
                                    }
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}
