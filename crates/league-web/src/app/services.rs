use std::rc::Rc;

use league_client::{CognitoIdentity, GraphQlStore, LeagueConfig, SessionCoordinator};
use tracing::info;

use crate::app::storage::BrowserStorage;

/// Backend handles shared by every page through context.
#[derive(Clone)]
pub struct AppServices {
    pub session: Rc<SessionCoordinator>,
    pub store: Rc<GraphQlStore>,
}

impl AppServices {
    pub fn connect(config: LeagueConfig) -> Self {
        let storage = BrowserStorage::local_or_none();
        info!(
            pool = %config.identity.user_pool_id,
            endpoint = %config.api.endpoint,
            storage = ?storage.storage_type(),
            "connecting to league backend"
        );

        let identity = CognitoIdentity::new(config.identity, Rc::new(storage));
        Self {
            session: Rc::new(SessionCoordinator::new(Rc::new(identity), config.admin_group)),
            store: Rc::new(GraphQlStore::new(config.api)),
        }
    }
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session) && Rc::ptr_eq(&self.store, &other.store)
    }
}
