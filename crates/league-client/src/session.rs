//! Single owner of the session snapshot.
//!
//! Views receive a shared [`SessionCoordinator`] instead of querying the
//! identity provider themselves, so one navigation costs at most one
//! session lookup however many views activate with it. Sign-in, sign-up and
//! sign-out also go through here so the snapshot follows them.

use std::{
    cell::{Cell, RefCell}, rc::Rc
};

use league_types::{SessionSnapshot, SignUpOutcome, UserAttribute};
use secrecy::SecretString;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{error::ClientResult, traits::IdentityProvider};

pub struct SessionCoordinator {
    identity: Rc<dyn IdentityProvider>,
    admin_group: String,
    snapshot: RefCell<SessionSnapshot>,
    /// Bumped by every completed refresh.
    generation: Cell<u64>,
    /// Held while a lookup is in flight.
    lookup: Mutex<()>,
}

impl SessionCoordinator {
    pub fn new(identity: Rc<dyn IdentityProvider>, admin_group: impl Into<String>) -> Self {
        Self {
            identity,
            admin_group: admin_group.into(),
            snapshot: RefCell::new(SessionSnapshot::Loading),
            generation: Cell::new(0),
            lookup: Mutex::new(()),
        }
    }

    pub fn admin_group(&self) -> &str {
        &self.admin_group
    }

    /// Last resolved snapshot (`Loading` until the first refresh completes).
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn is_privileged(&self) -> bool {
        self.snapshot
            .borrow()
            .is_privileged_at(&self.admin_group, Utc::now())
    }

    /// Ask the identity provider for the current session.
    ///
    /// Any failure resolves to `Anonymous`; it is never propagated.
    pub async fn refresh(&self) -> SessionSnapshot {
        let next = match self.identity.current_session().await {
            Ok(Some(claims)) => {
                debug!(username = %claims.username, groups = ?claims.groups, "session resolved");
                SessionSnapshot::Authenticated(claims)
            }
            Ok(None) => SessionSnapshot::Anonymous,
            Err(err) => {
                warn!(error = %err, "session lookup failed; continuing unauthenticated");
                SessionSnapshot::Anonymous
            }
        };
        self.snapshot.replace(next.clone());
        self.generation.set(self.generation.get() + 1);
        next
    }

    /// Re-check the session for a view that is activating.
    ///
    /// Callers arriving while a lookup is in flight wait for it and share
    /// its result instead of issuing their own.
    pub async fn lookup(&self) -> SessionSnapshot {
        let seen = self.generation.get();
        let _guard = self.lookup.lock().await;
        if self.generation.get() != seen {
            return self.snapshot();
        }
        self.refresh().await
    }

    pub async fn sign_in(&self, identifier: &str, secret: &SecretString) -> ClientResult<SessionSnapshot> {
        self.identity.sign_in(identifier, secret).await?;
        info!("signed in");
        Ok(self.refresh().await)
    }

    pub async fn sign_up(
        &self,
        identifier: &str,
        secret: &SecretString,
        attributes: &[UserAttribute],
    ) -> ClientResult<SignUpOutcome> {
        let outcome = self.identity.sign_up(identifier, secret, attributes).await?;
        info!(confirmed = outcome.confirmed, "account registered");
        Ok(outcome)
    }

    /// Clear the session. The snapshot only changes if the provider succeeds.
    pub async fn sign_out(&self) -> ClientResult<()> {
        self.identity.sign_out().await?;
        self.snapshot.replace(SessionSnapshot::Anonymous);
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockIdentity, SessionBehavior};

    #[tokio::test]
    async fn failing_lookup_resolves_anonymous() {
        let identity = Rc::new(MockIdentity::new(SessionBehavior::Fail));
        let session = SessionCoordinator::new(identity.clone(), "Admins");

        assert_eq!(session.refresh().await, SessionSnapshot::Anonymous);
        assert!(!session.is_privileged());
    }

    #[tokio::test]
    async fn concurrent_lookups_share_one_call() {
        let identity = Rc::new(MockIdentity::new(SessionBehavior::member(&["Admins"])));
        identity.slow_lookups();
        let session = SessionCoordinator::new(identity.clone(), "Admins");

        let (a, b, c) = futures::join!(session.lookup(), session.lookup(), session.lookup());

        assert_eq!(identity.session_calls(), 1);
        assert!(a.is_active() && a == b && b == c);
        assert!(session.is_privileged());
    }

    #[tokio::test]
    async fn later_lookup_sees_ended_session() {
        let identity = Rc::new(MockIdentity::new(SessionBehavior::member(&["Admins"])));
        let session = SessionCoordinator::new(identity.clone(), "Admins");
        assert!(session.lookup().await.is_active());

        identity.set_behavior(SessionBehavior::Anonymous);

        assert_eq!(session.lookup().await, SessionSnapshot::Anonymous);
        assert_eq!(identity.session_calls(), 2);
        assert!(!session.is_privileged());
    }

    #[tokio::test]
    async fn expired_claims_are_not_privileged() {
        let identity = Rc::new(MockIdentity::new(SessionBehavior::member_until(&["Admins"], 1)));
        let session = SessionCoordinator::new(identity.clone(), "Admins");

        assert!(session.lookup().await.is_active());
        assert!(!session.is_privileged());
    }

    #[tokio::test]
    async fn sign_out_resets_snapshot() {
        let identity = Rc::new(MockIdentity::new(SessionBehavior::member(&[])));
        let session = SessionCoordinator::new(identity.clone(), "Admins");
        assert!(session.refresh().await.is_active());

        session.sign_out().await.unwrap();
        assert_eq!(session.snapshot(), SessionSnapshot::Anonymous);
    }

    #[tokio::test]
    async fn failed_sign_out_keeps_session() {
        let identity = Rc::new(MockIdentity::new(SessionBehavior::member(&[])));
        identity.fail_sign_out("network down");
        let session = SessionCoordinator::new(identity.clone(), "Admins");
        session.refresh().await;

        assert!(session.sign_out().await.is_err());
        assert!(session.snapshot().is_active());
    }
}
