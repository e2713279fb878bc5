use dioxus::prelude::*;
use tracing::error;

use crate::app::{self, auth::context::SessionProvider, pages::ConfigErrorPage, services::AppServices};

/// Root shell: wraps the router and global providers.
#[component]
pub fn app_root() -> Element {
    let services = use_hook(|| {
        app::config::load().map(AppServices::connect).inspect_err(|err| {
            error!(error = %err, "backend settings missing from this build");
        })
    });

    rsx! {
        document::Title { "Futsal League" }
        match services {
            Ok(services) => rsx! {
                SessionProvider { services, children: rsx!( app::routes::AppRouter {} ) }
            },
            Err(err) => rsx! {
                ConfigErrorPage { message: err.to_string() }
            },
        }
    }
}
