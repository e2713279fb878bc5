//! Sign-in and sign-up form handling.
//!
//! Both forms are plain request/redirect: validate locally, submit once,
//! then either navigate or show the provider's message verbatim.

use league_types::{Destination, UserAttribute};
use secrecy::SecretString;
use tracing::debug;

use crate::session::SessionCoordinator;

/// Notice shown after a successful sign-up.
pub const SIGN_UP_NOTICE: &str = "Sign up successful! Please check your email for verification.";

/// What the page should do after a form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// Leave the form, optionally telling the user something first.
    Navigate { to: Destination, notice: Option<String> },
    /// Stay on the form and show this message.
    Error(String),
}

fn require_credentials(email: &str, password: &str) -> Result<(), FormOutcome> {
    if email.trim().is_empty() {
        return Err(FormOutcome::Error("Email is required".to_string()));
    }
    if password.is_empty() {
        return Err(FormOutcome::Error("Password is required".to_string()));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    /// Sign in and go to the matches view; failures keep the user here.
    pub async fn submit(&self, session: &SessionCoordinator) -> FormOutcome {
        if let Err(outcome) = require_credentials(&self.email, &self.password) {
            return outcome;
        }

        let secret = SecretString::from(self.password.clone());
        match session.sign_in(self.email.trim(), &secret).await {
            Ok(_) => FormOutcome::Navigate {
                to: Destination::Matches,
                notice: None,
            },
            Err(err) => {
                debug!(error = %err, "sign-in rejected");
                FormOutcome::Error(format!("Error signing in: {}", err))
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    /// Register with the email as both username and `email` attribute, then
    /// send the user to sign-in while verification is pending.
    pub async fn submit(&self, session: &SessionCoordinator) -> FormOutcome {
        if let Err(outcome) = require_credentials(&self.email, &self.password) {
            return outcome;
        }

        let email = self.email.trim();
        let secret = SecretString::from(self.password.clone());
        match session.sign_up(email, &secret, &[UserAttribute::email(email)]).await {
            Ok(_) => FormOutcome::Navigate {
                to: Destination::SignIn,
                notice: Some(SIGN_UP_NOTICE.to_string()),
            },
            Err(err) => {
                debug!(error = %err, "sign-up rejected");
                FormOutcome::Error(format!("Error signing up: {}", err))
            }
        }
    }
}
