use dioxus::prelude::*;
use league_client::ViewSpec;
use league_types::{
    display::{StandingRow, STANDINGS_HEADERS}, Standing
};

use crate::{
    app::views::use_gated_list, components::{Layout, Loading}
};

#[component]
pub fn StandingsPage() -> Element {
    let list = use_gated_list::<Standing>(ViewSpec::public);
    let rows: Vec<(String, StandingRow)> = list
        .view
        .read()
        .items()
        .iter()
        .map(|standing| (standing.id.to_string(), StandingRow::from(standing)))
        .collect();

    rsx! {
        Layout {
            div { class: "card bg-base-100 shadow",
                div { class: "card-body",
                    h1 { class: "card-title text-2xl", "League Standings" }
                    if !(list.settled)() {
                        Loading {}
                    } else {
                        div { class: "overflow-x-auto",
                            table { class: "table table-zebra",
                                thead {
                                    tr {
                                        for header in STANDINGS_HEADERS {
                                            th { "{header}" }
                                        }
                                    }
                                }
                                tbody {
                                    for (id, row) in rows {
                                        tr { key: "{id}",
                                            for cell in row.cells {
                                                td { "{cell}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
