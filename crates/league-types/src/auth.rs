use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Claims carried by an authenticated session.
pub struct SessionClaims {
    /// Username (or subject) the identity provider issued the tokens for.
    pub username: String,
    /// Group memberships claimed by the access token.
    pub groups: Vec<String>,
    /// Token expiry, seconds since the epoch. `None` when the provider did not say.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl SessionClaims {
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now.timestamp())
    }
}

/// Snapshot of the current session as last resolved by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionSnapshot {
    /// No session check has resolved yet.
    #[default]
    Loading,
    /// No session, an expired one, or the check failed.
    Anonymous,
    Authenticated(SessionClaims),
}

impl SessionSnapshot {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionSnapshot::Loading)
    }

    /// Whether a session is active, regardless of role.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionSnapshot::Authenticated(_))
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        match self {
            SessionSnapshot::Authenticated(claims) => Some(claims),
            _ => None,
        }
    }

    /// Whether the session belongs to `admin_group`. Loading and anonymous
    /// snapshots are never privileged.
    pub fn is_privileged(&self, admin_group: &str) -> bool {
        self.claims().is_some_and(|c| c.is_member_of(admin_group))
    }

    /// Like [`SessionSnapshot::is_privileged`], but an expired session no
    /// longer counts.
    pub fn is_privileged_at(&self, admin_group: &str, now: DateTime<Utc>) -> bool {
        self.claims()
            .is_some_and(|c| c.is_member_of(admin_group) && !c.is_expired_at(now))
    }
}

/// A named attribute attached to a new account at sign-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self::new("email", value)
    }
}

/// Result of a successful sign-up request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SignUpOutcome {
    /// Whether the account is usable immediately (no verification step pending).
    pub confirmed: bool,
    /// Where the verification code was sent, masked by the provider.
    pub delivery_destination: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_requires_admin_membership() {
        let member = SessionSnapshot::Authenticated(SessionClaims {
            username: "ana".into(),
            groups: vec!["Players".into(), "Admins".into()],
            expires_at: None,
        });
        let player = SessionSnapshot::Authenticated(SessionClaims {
            username: "bo".into(),
            groups: vec!["Players".into()],
            expires_at: None,
        });

        assert!(member.is_privileged("Admins"));
        assert!(!player.is_privileged("Admins"));
        assert!(player.is_active());
        assert!(!SessionSnapshot::Anonymous.is_privileged("Admins"));
        assert!(!SessionSnapshot::Loading.is_privileged("Admins"));
        assert!(SessionSnapshot::default().is_loading());
    }

    #[test]
    fn group_match_is_case_sensitive() {
        let claims = SessionClaims {
            username: "ana".into(),
            groups: vec!["admins".into()],
            expires_at: None,
        };
        assert!(!claims.is_member_of("Admins"));
    }

    #[test]
    fn expired_session_loses_privilege() {
        use chrono::TimeZone;

        let admin = SessionSnapshot::Authenticated(SessionClaims {
            username: "ana".into(),
            groups: vec!["Admins".into()],
            expires_at: Some(100),
        });
        assert!(admin.is_privileged_at("Admins", Utc.timestamp_opt(99, 0).unwrap()));
        assert!(!admin.is_privileged_at("Admins", Utc.timestamp_opt(100, 0).unwrap()));
        // Membership alone ignores expiry.
        assert!(admin.is_privileged("Admins"));
    }

    #[test]
    fn attributes_serialize_pascal_case() {
        let value = serde_json::to_value(UserAttribute::email("a@b.c")).unwrap();
        assert_eq!(value, serde_json::json!({ "Name": "email", "Value": "a@b.c" }));
    }
}
