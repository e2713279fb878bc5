use dioxus::prelude::*;

use crate::pages::{HomePage, MatchesPage, NotFoundPage, SignInPage, SignUpPage, StandingsPage, TeamsPage};

#[component]
pub fn AppRouter() -> Element {
    rsx! {
        Router::<Routes> {}
    }
}

/// Paths mirror `league_types::Destination::path`.
#[derive(Clone, Routable, PartialEq)]
pub enum Routes {
    #[route("/")]
    HomePage {},
    #[route("/teams")]
    TeamsPage {},
    #[route("/matches")]
    MatchesPage {},
    #[route("/standings")]
    StandingsPage {},
    #[route("/signin")]
    SignInPage {},
    #[route("/signup")]
    SignUpPage {},
    #[route("/:..route")]
    NotFoundPage { route: Vec<String> },
}
