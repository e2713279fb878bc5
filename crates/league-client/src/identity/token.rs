use std::cell::RefCell;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use league_types::SessionClaims;
use serde::Deserialize;

use crate::{
    error::{ClientError, ClientResult}, traits::{StoredTokens, TokenStore}
};

/// Claims read from an access token payload. The signature is not checked
/// here; the token is only ever presented back to the service that issued it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Decode the payload segment of a compact JWT.
    pub fn decode(token: &str) -> ClientResult<Self> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) => payload,
            _ => return Err(ClientError::Transport("malformed access token".to_string())),
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ClientError::Transport(format!("malformed access token: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::decode("access token", e))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    pub fn into_session(self) -> SessionClaims {
        SessionClaims {
            username: self.username.unwrap_or(self.sub),
            groups: self.groups,
            expires_at: Some(self.exp),
        }
    }
}

/// Token storage that lives only as long as the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: RefCell<Option<StoredTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredTokens> {
        self.tokens.borrow().clone()
    }

    fn save(&self, tokens: &StoredTokens) -> ClientResult<()> {
        self.tokens.replace(Some(tokens.clone()));
        Ok(())
    }

    fn clear(&self) {
        self.tokens.replace(None);
    }
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","kid":"test"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}
