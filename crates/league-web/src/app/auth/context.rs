use dioxus::prelude::*;
use league_types::SessionSnapshot;

use crate::app::services::AppServices;

/// One-shot message carried across a navigation, e.g. after sign-up.
#[derive(Clone, Copy)]
pub struct Notice(pub Signal<Option<String>>);

/// Provide the backend services, the session snapshot and the notice slot
/// to everything below.
#[component]
pub fn SessionProvider(services: AppServices, children: Element) -> Element {
    use_context_provider(|| services.clone());
    use_session_provider(&services);
    let notice = use_signal(|| None::<String>);
    use_context_provider(|| Notice(notice));

    children
}

/// Publish the session snapshot and resolve it on mount. Pages re-check it
/// as they activate.
pub fn use_session_provider(services: &AppServices) -> Signal<SessionSnapshot> {
    let mut snapshot = use_signal(|| services.session.snapshot());
    let session = services.session.clone();

    use_effect(move || {
        let session = session.clone();
        spawn(async move {
            snapshot.set(session.lookup().await);
        });
    });

    use_context_provider(|| snapshot)
}
