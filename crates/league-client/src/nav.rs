use league_types::{Destination, SessionSnapshot};
use tracing::warn;

use crate::{forms::FormOutcome, session::SessionCoordinator};

/// Session affordance offered in the navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Link(Destination),
    SignOut,
}

impl NavAction {
    pub fn label(self) -> &'static str {
        match self {
            NavAction::Link(destination) => destination.label(),
            NavAction::SignOut => "Sign Out",
        }
    }
}

/// Navigation bar state. Only cares whether a session exists, not its role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavBarModel {
    pub signed_in: bool,
}

impl NavBarModel {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            signed_in: snapshot.is_active(),
        }
    }

    pub fn links(&self) -> [Destination; 3] {
        Destination::BROWSE
    }

    pub fn session_actions(&self) -> Vec<NavAction> {
        if self.signed_in {
            vec![NavAction::SignOut]
        } else {
            vec![
                NavAction::Link(Destination::SignIn),
                NavAction::Link(Destination::SignUp),
            ]
        }
    }
}

/// Clear the session and return to the root view. A failed sign-out is
/// logged and leaves the user signed in.
pub async fn sign_out(session: &SessionCoordinator) -> FormOutcome {
    match session.sign_out().await {
        Ok(()) => FormOutcome::Navigate {
            to: Destination::Home,
            notice: None,
        },
        Err(err) => {
            warn!(error = %err, "error signing out");
            FormOutcome::Error(format!("Error signing out: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use league_types::SessionClaims;

    use super::*;
    use crate::test_support::{MockIdentity, SessionBehavior};

    #[test]
    fn actions_follow_session_presence() {
        let anonymous = NavBarModel::from_snapshot(&SessionSnapshot::Anonymous);
        let labels: Vec<_> = anonymous.session_actions().into_iter().map(NavAction::label).collect();
        assert_eq!(labels, ["Sign In", "Sign Up"]);

        let member = NavBarModel::from_snapshot(&SessionSnapshot::Authenticated(SessionClaims::default()));
        assert_eq!(member.session_actions(), vec![NavAction::SignOut]);
        assert_eq!(member.links(), [Destination::Teams, Destination::Matches, Destination::Standings]);
    }

    #[tokio::test]
    async fn sign_out_returns_home() {
        let identity = Rc::new(MockIdentity::new(SessionBehavior::member(&["Admins"])));
        let session = SessionCoordinator::new(identity, "Admins");
        session.refresh().await;

        let outcome = sign_out(&session).await;

        assert_eq!(
            outcome,
            FormOutcome::Navigate {
                to: Destination::Home,
                notice: None
            }
        );
        assert!(!NavBarModel::from_snapshot(&session.snapshot()).signed_in);
    }
}
