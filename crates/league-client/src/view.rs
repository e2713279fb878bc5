//! Session-gated list view-model.
//!
//! One instance backs one list view. Activation resolves the session and
//! lists the view's collection concurrently, applying each result as it
//! arrives; creation is offered only to privileged sessions and merges the
//! created record into the local cache without a refetch.
//!
//! The request halves ([`GatedListView::fetch`], [`GatedListView::lookup`],
//! [`GatedListView::submit`]) borrow nothing from the view, so a UI can
//! await them while other updates land and then apply the result to the
//! current state.

use std::{collections::HashMap, future::Future};

use chrono::{NaiveDate, Utc};
use league_types::{Draft, ListFilter, Record, RecordId, SessionSnapshot, ValidationError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    cache::ListCache, error::ClientResult, session::SessionCoordinator, traits::DataStore
};

/// Static description of a list view.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ViewSpec {
    /// Redirect to sign-in unless a session is active.
    pub requires_auth: bool,
    /// Equality filter sent with the list request.
    pub filter: Option<ListFilter>,
}

impl ViewSpec {
    /// Public view over the whole collection.
    pub fn public() -> Self {
        Self::default()
    }

    /// View that sends visitors without a session to sign-in.
    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: ListFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Home view: public, only matches dated `today`.
    pub fn todays_matches(today: NaiveDate) -> Self {
        Self::public().with_filter(ListFilter::on_date(today))
    }
}

/// Result of activating a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Session and list resolved; the view can render.
    Ready { privileged: bool },
    /// The view needs a session and there is none.
    RedirectToSignIn,
    /// The view was torn down first; nothing was applied.
    Cancelled,
}

/// Result of submitting a draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Created and merged locally; the draft was reset.
    Created(RecordId),
    /// The session is not privileged; the store was not called.
    Rejected { message: String },
    /// The draft failed local checks; the store was not called.
    Invalid(HashMap<String, ValidationError>),
    /// The store refused or could not be reached; the draft is kept for retry.
    Failed { message: String },
    Cancelled,
}

impl CreateOutcome {
    /// Text to show the user, if this outcome warrants an alert.
    pub fn user_message(&self) -> Option<String> {
        match self {
            CreateOutcome::Rejected { message } | CreateOutcome::Failed { message } => Some(message.clone()),
            CreateOutcome::Invalid(errors) => {
                let mut fields: Vec<_> = errors.iter().map(|(field, err)| format!("{field}: {err}")).collect();
                fields.sort();
                Some(fields.join("; "))
            }
            CreateOutcome::Created(_) | CreateOutcome::Cancelled => None,
        }
    }
}

/// `Only admins can add matches.`
pub fn rejected_message<T: Record>() -> String {
    format!("Only admins can add {}.", T::PLURAL.to_lowercase())
}

/// `Failed to add match. Please try again.`
pub fn failed_message<T: Record>() -> String {
    format!("Failed to add {}. Please try again.", T::COLLECTION.to_lowercase())
}

#[derive(Clone, Debug)]
pub struct GatedListView<T> {
    spec: ViewSpec,
    cache: ListCache<T>,
    session: SessionSnapshot,
    privileged: bool,
    token: CancellationToken,
}

impl<T: Record> GatedListView<T> {
    pub fn new(spec: ViewSpec) -> Self {
        Self {
            spec,
            cache: ListCache::new(),
            session: SessionSnapshot::Loading,
            privileged: false,
            token: CancellationToken::new(),
        }
    }

    pub fn spec(&self) -> &ViewSpec {
        &self.spec
    }

    /// Records in store order; empty while loading.
    pub fn items(&self) -> &[T] {
        self.cache.items()
    }

    pub fn cache(&self) -> &ListCache<T> {
        &self.cache
    }

    pub fn session(&self) -> &SessionSnapshot {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        !self.cache.is_loaded()
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_stale()
    }

    /// Whether the creation form should be offered. Lapses with the
    /// session's token even before the next activation.
    pub fn can_create(&self) -> bool {
        self.privileged && !self.session.claims().is_some_and(|c| c.is_expired_at(Utc::now()))
    }

    /// Token tied to this view; clones of the view share it.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Abandon in-flight requests. Results arriving later are discarded.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// List request for this view. Resolves to `None` once the view is cancelled.
    pub fn fetch<'s, S: DataStore + 's>(&self, store: &'s S) -> impl Future<Output = Option<ClientResult<Vec<T>>>> + 's {
        let token = self.token.clone();
        let filter = self.spec.filter.clone();
        async move {
            tokio::select! {
                biased;
                () = token.cancelled() => None,
                listed = store.list::<T>(filter.as_ref()) => Some(listed),
            }
        }
    }

    /// Session re-check for this view. Resolves to `None` once the view is cancelled.
    pub fn lookup<'s>(&self, session: &'s SessionCoordinator) -> impl Future<Output = Option<SessionSnapshot>> + 's {
        let token = self.token.clone();
        async move {
            tokio::select! {
                biased;
                () = token.cancelled() => None,
                snapshot = session.lookup() => Some(snapshot),
            }
        }
    }

    /// Apply a list result. A failed list leaves the previous contents in place.
    pub fn apply_list(&mut self, listed: ClientResult<Vec<T>>) {
        match listed {
            Ok(items) => {
                debug!(collection = T::COLLECTION, count = items.len(), "list loaded");
                self.cache.replace(items);
            }
            Err(err) => {
                warn!(collection = T::COLLECTION, error = %err, "error fetching list");
            }
        }
    }

    /// Apply a resolved session and decide whether the view may stay.
    pub fn apply_session(&mut self, snapshot: SessionSnapshot, admin_group: &str) -> ActivationOutcome {
        self.privileged = snapshot.is_privileged_at(admin_group, Utc::now());
        let authenticated = snapshot.is_active();
        self.session = snapshot;

        if self.spec.requires_auth && !authenticated {
            return ActivationOutcome::RedirectToSignIn;
        }
        ActivationOutcome::Ready {
            privileged: self.privileged,
        }
    }

    /// Resolve the session and list the collection, concurrently.
    ///
    /// Each result is applied as soon as it arrives; neither waits for the
    /// other. A failed session lookup counts as unprivileged.
    pub async fn activate<S: DataStore>(&mut self, session: &SessionCoordinator, store: &S) -> ActivationOutcome {
        let list = self.fetch(store);
        let lookup = self.lookup(session);
        tokio::pin!(list, lookup);

        let mut listed = false;
        let mut outcome = None;
        while !listed || outcome.is_none() {
            tokio::select! {
                biased;
                result = &mut list, if !listed => match result {
                    Some(result) => {
                        listed = true;
                        self.apply_list(result);
                    }
                    None => break,
                },
                snapshot = &mut lookup, if outcome.is_none() => match snapshot {
                    Some(snapshot) => outcome = Some(self.apply_session(snapshot, session.admin_group())),
                    None => break,
                },
            }
        }

        match outcome {
            Some(outcome) if listed && !self.token.is_cancelled() => outcome,
            _ => {
                debug!(collection = T::COLLECTION, "activation cancelled");
                ActivationOutcome::Cancelled
            }
        }
    }

    /// Compare a background refetch with what is shown. Returns whether it diverged.
    pub fn apply_refresh_result(&mut self, listed: ClientResult<Vec<T>>) -> bool {
        match listed {
            Ok(items) => self.cache.reconcile(items),
            Err(err) => {
                warn!(collection = T::COLLECTION, error = %err, "error refreshing list");
                false
            }
        }
    }

    /// Background refetch. A result that differs from what is shown marks
    /// the view stale instead of replacing it.
    pub async fn refresh<S: DataStore>(&mut self, store: &S) -> bool {
        match self.fetch(store).await {
            Some(listed) => self.apply_refresh_result(listed),
            None => false,
        }
    }

    /// Show a refetch held back by [`GatedListView::refresh`].
    pub fn apply_refresh(&mut self) -> bool {
        self.cache.apply_pending()
    }

    /// Local checks run before a draft may be sent: role, then fields.
    pub fn check_create<D: Draft<Record = T>>(&self, draft: &D) -> Result<(), CreateOutcome> {
        if !self.can_create() {
            return Err(CreateOutcome::Rejected {
                message: rejected_message::<T>(),
            });
        }
        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(CreateOutcome::Invalid(errors));
        }
        Ok(())
    }

    /// Create request for `draft`. Resolves to `None` once the view is cancelled.
    pub fn submit<'s, S, D>(&self, store: &'s S, draft: D) -> impl Future<Output = Option<ClientResult<T>>> + 's
    where
        S: DataStore + 's,
        D: Draft<Record = T>,
    {
        let token = self.token.clone();
        async move {
            tokio::select! {
                biased;
                () = token.cancelled() => None,
                created = store.create(&draft) => Some(created),
            }
        }
    }

    /// Merge a create result. On success the record is appended and `draft`
    /// reset; on failure `draft` is left as it was.
    pub fn apply_created<D: Draft<Record = T>>(&mut self, created: ClientResult<T>, draft: &mut D) -> CreateOutcome {
        match created {
            Ok(record) => {
                let id = record.id().clone();
                if !self.cache.append_if_absent(record) {
                    debug!(collection = T::COLLECTION, %id, "created record already cached");
                }
                draft.reset();
                CreateOutcome::Created(id)
            }
            Err(err) => {
                warn!(collection = T::COLLECTION, error = %err, "error adding record");
                CreateOutcome::Failed {
                    message: failed_message::<T>(),
                }
            }
        }
    }

    /// Submit `draft` to the store.
    ///
    /// Unprivileged sessions are rejected before the store is called.
    pub async fn create<S, D>(&mut self, store: &S, draft: &mut D) -> CreateOutcome
    where
        S: DataStore,
        D: Draft<Record = T>,
    {
        if let Err(outcome) = self.check_create(draft) {
            return outcome;
        }
        match self.submit(store, draft.clone()).await {
            Some(created) => self.apply_created(created, draft),
            None => CreateOutcome::Cancelled,
        }
    }
}
