//! Collaborator interfaces.
//!
//! The application implements none of these capabilities itself: the
//! identity provider and the data store are managed services consumed
//! through a request/response contract. Everything runs on a single-threaded
//! event loop, so futures are not required to be `Send`.

use async_trait::async_trait;
use league_types::{Draft, ListFilter, Record, SessionClaims, SignUpOutcome, UserAttribute};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;

/// User directory: sessions, sign-in, sign-up and sign-out.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Claims of the stored session, `None` when nobody is signed in or the
    /// session can no longer be used.
    async fn current_session(&self) -> ClientResult<Option<SessionClaims>>;

    async fn sign_in(&self, identifier: &str, secret: &SecretString) -> ClientResult<()>;

    async fn sign_up(
        &self,
        identifier: &str,
        secret: &SecretString,
        attributes: &[UserAttribute],
    ) -> ClientResult<SignUpOutcome>;

    async fn sign_out(&self) -> ClientResult<()>;
}

/// List-oriented remote store, one named collection per record kind.
#[async_trait(?Send)]
pub trait DataStore {
    /// Records of `T`'s collection in store order, optionally restricted by
    /// an equality filter.
    async fn list<T: Record>(&self, filter: Option<&ListFilter>) -> ClientResult<Vec<T>>;

    /// Create a record from `draft`; the returned record carries its
    /// server-assigned identity.
    async fn create<D: Draft>(&self, draft: &D) -> ClientResult<D::Record>;
}

/// Tokens issued at sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access_token: String,
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Ambient credential storage backing the identity provider.
pub trait TokenStore {
    fn load(&self) -> Option<StoredTokens>;
    fn save(&self, tokens: &StoredTokens) -> ClientResult<()>;
    fn clear(&self);
}
