//! Glue between the gated list view-model and component state.
//!
//! Requests are awaited without holding the view; each result is applied
//! to the signal's current value, so a refresh landing after a create
//! cannot undo the create's append.

use dioxus::prelude::*;
use league_client::{ActivationOutcome, CreateOutcome, GatedListView, ViewSpec};
use league_types::{Destination, Draft, Record};
use tracing::debug;

use crate::app::{
    auth::hooks::{use_services, use_session}, services::AppServices
};

/// Reactive handle to a page's list view.
pub struct ListHandle<T: 'static> {
    pub view: Signal<GatedListView<T>>,
    /// Set once the first list request has resolved, whatever its outcome.
    pub settled: Signal<bool>,
    services: AppServices,
}

impl<T: 'static> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            settled: self.settled,
            services: self.services.clone(),
        }
    }
}

impl<T: Record> ListHandle<T> {
    /// Refetch in the background; a changed list is held until applied.
    pub fn refresh(&self) {
        let store = self.services.store.clone();
        let mut view = self.view;
        spawn(async move {
            let fetch = view.peek().fetch(store.as_ref());
            let Some(listed) = fetch.await else {
                return;
            };
            if view.write().apply_refresh_result(listed) {
                debug!(collection = T::COLLECTION, "list changed since it was shown");
            }
        });
    }

    pub fn apply_refresh(&self) {
        let mut view = self.view;
        view.write().apply_refresh();
    }

    /// Submit `draft` and hand the outcome and the (possibly reset) draft to `done`.
    pub fn create<D>(&self, mut draft: D, done: impl FnOnce(CreateOutcome, D) + 'static)
    where
        D: Draft<Record = T>,
    {
        let store = self.services.store.clone();
        let mut view = self.view;

        let checked = view.peek().check_create(&draft);
        if let Err(outcome) = checked {
            done(outcome, draft);
            return;
        }

        spawn(async move {
            let submit = view.peek().submit(store.as_ref(), draft.clone());
            let outcome = match submit.await {
                Some(created) => view.write().apply_created(created, &mut draft),
                None => CreateOutcome::Cancelled,
            };
            done(outcome, draft);
        });
    }
}

/// Create the page's view, activate it on mount and cancel it on unmount.
///
/// The list and the session are requested together and applied as each
/// arrives. Views that require a session send the user to sign-in when
/// there is none.
pub fn use_gated_list<T: Record>(spec: impl FnOnce() -> ViewSpec) -> ListHandle<T> {
    let services = use_services();
    let mut snapshot = use_session();
    let navigator = use_navigator();
    let mut view = use_signal(|| GatedListView::<T>::new(spec()));
    let mut settled = use_signal(|| false);

    let token = use_hook(|| view.peek().cancellation_token());
    use_drop(move || token.cancel());

    let activation = services.clone();
    use_effect(move || {
        let list_services = activation.clone();
        spawn(async move {
            let fetch = view.peek().fetch(list_services.store.as_ref());
            if let Some(listed) = fetch.await {
                view.write().apply_list(listed);
                settled.set(true);
            }
        });

        let session_services = activation.clone();
        spawn(async move {
            let lookup = view.peek().lookup(&session_services.session);
            let Some(resolved) = lookup.await else {
                return;
            };
            snapshot.set(resolved.clone());
            let admin_group = session_services.session.admin_group();
            if view.write().apply_session(resolved, admin_group) == ActivationOutcome::RedirectToSignIn {
                navigator.push(Destination::SignIn.path());
            }
        });
    });

    ListHandle { view, settled, services }
}
