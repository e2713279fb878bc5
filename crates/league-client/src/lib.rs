//! View-models and backend collaborators for the league manager.
//!
//! Every list page is a [`GatedListView`]: it resolves the shared session,
//! fetches its collection, and gates its create operation on the session's
//! role. The identity provider and data store sit behind traits so the
//! views can be driven by in-memory fakes as easily as by the hosted
//! services in [`identity`] and [`graphql`].

pub mod cache;
pub mod config;
pub mod error;
pub mod forms;
pub mod graphql;
pub mod identity;
pub mod nav;
pub mod session;
pub mod traits;
pub mod transport;
pub mod view;

pub use cache::ListCache;
pub use config::{ApiConfig, ConfigError, IdentityConfig, LeagueConfig};
pub use error::{ClientError, ClientResult};
pub use forms::{FormOutcome, SignInForm, SignUpForm, SIGN_UP_NOTICE};
pub use graphql::GraphQlStore;
pub use identity::{CognitoIdentity, MemoryTokenStore};
pub use nav::{NavAction, NavBarModel};
pub use session::SessionCoordinator;
pub use traits::{DataStore, IdentityProvider, StoredTokens, TokenStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use view::{ActivationOutcome, CreateOutcome, GatedListView, ViewSpec};

#[cfg(test)]
mod test_support;
