//! Identity provider backed by a hosted user pool.
//!
//! Talks the user pool's JSON-over-HTTPS API directly: `InitiateAuth` for
//! password and refresh-token sign-in, `SignUp` and `GlobalSignOut`. Tokens
//! are kept in an injected [`TokenStore`] so the browser build can persist
//! them in local storage.

mod token;

use std::{collections::HashMap, rc::Rc};

use async_trait::async_trait;
use chrono::Utc;
use league_types::{SessionClaims, SignUpOutcome, UserAttribute};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
pub use token::{AccessTokenClaims, MemoryTokenStore};
use tracing::{debug, warn};

use crate::{
    config::IdentityConfig, error::{ClientError, ClientResult}, traits::{IdentityProvider, StoredTokens, TokenStore}, transport::{HttpRequest, HttpTransport, ReqwestTransport}
};

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

const PASSWORD_FLOW: &str = "USER_PASSWORD_AUTH";
const REFRESH_FLOW: &str = "REFRESH_TOKEN_AUTH";

/// Error code for credentials the pool will not accept, refresh tokens included.
const NOT_AUTHORIZED: &str = "NotAuthorizedException";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: HashMap<&'a str, &'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    id_token: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    user_attributes: &'a [UserAttribute],
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpResponse {
    #[serde(default)]
    user_confirmed: bool,
    code_delivery_details: Option<CodeDeliveryDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CodeDeliveryDetails {
    destination: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GlobalSignOutRequest<'a> {
    access_token: &'a str,
}

#[derive(Deserialize)]
struct Empty {}

/// Error body returned with non-2xx responses.
#[derive(Deserialize)]
struct ServiceError {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Turn an error response into a [`ClientError::Remote`] carrying the
/// service's own message and error code.
fn service_error(status: StatusCode, body: &[u8]) -> ClientError {
    let Ok(parsed) = serde_json::from_slice::<ServiceError>(body) else {
        return ClientError::remote(format!("identity service returned {status}"));
    };
    // Codes may arrive namespaced, e.g. `com.amazon...#NotAuthorizedException`.
    let code = parsed
        .kind
        .as_deref()
        .map(|kind| kind.rsplit('#').next().unwrap_or(kind).to_string());
    let message = parsed
        .message
        .or_else(|| code.clone())
        .unwrap_or_else(|| format!("identity service returned {status}"));
    ClientError::Remote { message, code }
}

pub struct CognitoIdentity {
    transport: Rc<dyn HttpTransport>,
    config: IdentityConfig,
    tokens: Rc<dyn TokenStore>,
}

impl CognitoIdentity {
    pub fn new(config: IdentityConfig, tokens: Rc<dyn TokenStore>) -> Self {
        Self::with_transport(config, tokens, Rc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: IdentityConfig, tokens: Rc<dyn TokenStore>, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            config,
            tokens,
        }
    }

    async fn call<Req, Resp>(&self, action: &str, body: &Req) -> ClientResult<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|e| ClientError::decode(action, e))?;
        let request = HttpRequest::new(self.config.endpoint(), payload)
            .header("Content-Type", AMZ_JSON)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{action}"));

        let response = self.transport.post(request).await?;
        if !response.status.is_success() {
            return Err(service_error(response.status, &response.body));
        }
        serde_json::from_slice(&response.body).map_err(|e| ClientError::decode(action, e))
    }

    async fn initiate_auth(&self, flow: &str, parameters: HashMap<&str, &str>) -> ClientResult<AuthenticationResult> {
        let request = InitiateAuthRequest {
            auth_flow: flow,
            client_id: &self.config.client_id,
            auth_parameters: parameters,
        };
        let response: InitiateAuthResponse = self.call("InitiateAuth", &request).await?;
        match (response.authentication_result, response.challenge_name) {
            (Some(result), _) => Ok(result),
            (None, Some(challenge)) => Err(ClientError::remote(format!(
                "Sign-in requires an additional step ({challenge}) that this app does not support."
            ))),
            (None, None) => Err(ClientError::remote("Sign-in returned no tokens.")),
        }
    }

    /// Exchange the refresh token for a new access token. `None` when the
    /// pool rejects the refresh token; any other failure keeps the stored
    /// tokens for the next attempt.
    async fn renew(&self, stored: &StoredTokens, refresh_token: &str) -> ClientResult<Option<SessionClaims>> {
        let result = match self
            .initiate_auth(REFRESH_FLOW, HashMap::from([("REFRESH_TOKEN", refresh_token)]))
            .await
        {
            Ok(result) => result,
            Err(err) if err.code() == Some(NOT_AUTHORIZED) => {
                debug!(reason = %err, "refresh token rejected");
                self.tokens.clear();
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let renewed = StoredTokens {
            access_token: result.access_token,
            id_token: result.id_token.or_else(|| stored.id_token.clone()),
            refresh_token: result.refresh_token.or_else(|| Some(refresh_token.to_string())),
        };
        let claims = AccessTokenClaims::decode(&renewed.access_token)?;
        self.tokens.save(&renewed)?;
        debug!("access token renewed");
        Ok(Some(claims.into_session()))
    }
}

#[async_trait(?Send)]
impl IdentityProvider for CognitoIdentity {
    async fn current_session(&self) -> ClientResult<Option<SessionClaims>> {
        let Some(stored) = self.tokens.load() else {
            return Ok(None);
        };

        let claims = match AccessTokenClaims::decode(&stored.access_token) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(error = %err, "discarding unreadable stored token");
                self.tokens.clear();
                return Ok(None);
            }
        };

        if !claims.is_expired_at(Utc::now()) {
            return Ok(Some(claims.into_session()));
        }

        match stored.refresh_token.clone() {
            Some(refresh_token) => self.renew(&stored, &refresh_token).await,
            None => {
                self.tokens.clear();
                Ok(None)
            }
        }
    }

    async fn sign_in(&self, identifier: &str, secret: &SecretString) -> ClientResult<()> {
        let parameters = HashMap::from([("USERNAME", identifier), ("PASSWORD", secret.expose_secret())]);
        let result = self.initiate_auth(PASSWORD_FLOW, parameters).await?;
        self.tokens.save(&StoredTokens {
            access_token: result.access_token,
            id_token: result.id_token,
            refresh_token: result.refresh_token,
        })
    }

    async fn sign_up(
        &self,
        identifier: &str,
        secret: &SecretString,
        attributes: &[UserAttribute],
    ) -> ClientResult<SignUpOutcome> {
        let request = SignUpRequest {
            client_id: &self.config.client_id,
            username: identifier,
            password: secret.expose_secret(),
            user_attributes: attributes,
        };
        let response: SignUpResponse = self.call("SignUp", &request).await?;
        Ok(SignUpOutcome {
            confirmed: response.user_confirmed,
            delivery_destination: response.code_delivery_details.and_then(|d| d.destination),
        })
    }

    /// Revoke the tokens remotely when possible, and always forget them locally.
    async fn sign_out(&self) -> ClientResult<()> {
        if let Some(stored) = self.tokens.load() {
            let request = GlobalSignOutRequest {
                access_token: &stored.access_token,
            };
            if let Err(err) = self.call::<_, Empty>("GlobalSignOut", &request).await {
                warn!(error = %err, "remote sign-out failed; clearing local session");
            }
        }
        self.tokens.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{token::encode_test_token, *};
    use crate::test_support::ScriptedTransport;

    fn config() -> IdentityConfig {
        IdentityConfig {
            region: "eu-west-1".into(),
            user_pool_id: "eu-west-1_pool".into(),
            client_id: "client".into(),
        }
    }

    fn identity(tokens: Rc<MemoryTokenStore>) -> CognitoIdentity {
        CognitoIdentity::new(config(), tokens)
    }

    fn scripted(tokens: Rc<MemoryTokenStore>, transport: Rc<ScriptedTransport>) -> CognitoIdentity {
        CognitoIdentity::with_transport(config(), tokens, transport)
    }

    fn stored(exp: i64, refresh: Option<&str>) -> StoredTokens {
        StoredTokens {
            access_token: encode_test_token(&json!({
                "sub": "0f1e",
                "username": "ana",
                "cognito:groups": ["Admins"],
                "exp": exp,
            })),
            id_token: None,
            refresh_token: refresh.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn no_tokens_means_no_session() {
        let identity = identity(Rc::new(MemoryTokenStore::new()));
        assert_eq!(identity.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn live_token_yields_claims_without_network() {
        let tokens = Rc::new(MemoryTokenStore::new());
        tokens.save(&stored(Utc::now().timestamp() + 3600, None)).unwrap();
        let identity = identity(tokens);

        let claims = identity.current_session().await.unwrap().unwrap();
        assert_eq!(claims.username, "ana");
        assert!(claims.is_member_of("Admins"));
    }

    #[tokio::test]
    async fn expired_token_without_refresh_is_cleared() {
        let tokens = Rc::new(MemoryTokenStore::new());
        tokens.save(&stored(Utc::now().timestamp() - 1, None)).unwrap();
        let identity = identity(tokens.clone());

        assert_eq!(identity.current_session().await.unwrap(), None);
        assert!(tokens.load().is_none());
    }

    #[tokio::test]
    async fn expired_token_is_renewed_with_refresh_token() {
        let tokens = Rc::new(MemoryTokenStore::new());
        tokens.save(&stored(Utc::now().timestamp() - 1, Some("refresh-1"))).unwrap();
        let fresh = stored(Utc::now().timestamp() + 3600, None).access_token;
        let transport = Rc::new(ScriptedTransport::new());
        transport.reply(
            StatusCode::OK,
            json!({ "AuthenticationResult": { "AccessToken": fresh, "ExpiresIn": 3600 } }),
        );
        let identity = scripted(tokens.clone(), transport.clone());

        let claims = identity.current_session().await.unwrap().unwrap();
        assert!(claims.is_member_of("Admins"));

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].header_value("X-Amz-Target"),
            Some("AWSCognitoIdentityProviderService.InitiateAuth")
        );
        assert_eq!(requests[0].url, "https://cognito-idp.eu-west-1.amazonaws.com/");
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["AuthFlow"], "REFRESH_TOKEN_AUTH");
        assert_eq!(body["AuthParameters"]["REFRESH_TOKEN"], "refresh-1");

        let saved = tokens.load().unwrap();
        assert_eq!(saved.access_token, fresh);
        assert_eq!(saved.refresh_token.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn rejected_refresh_token_signs_out() {
        let tokens = Rc::new(MemoryTokenStore::new());
        tokens.save(&stored(Utc::now().timestamp() - 1, Some("refresh-1"))).unwrap();
        let transport = Rc::new(ScriptedTransport::new());
        transport.reply(
            StatusCode::BAD_REQUEST,
            json!({ "__type": "NotAuthorizedException", "message": "Refresh Token has expired" }),
        );
        let identity = scripted(tokens.clone(), transport);

        assert_eq!(identity.current_session().await.unwrap(), None);
        assert!(tokens.load().is_none());
    }

    #[tokio::test]
    async fn service_outage_keeps_tokens() {
        let tokens = Rc::new(MemoryTokenStore::new());
        let expired = stored(Utc::now().timestamp() - 1, Some("refresh-1"));
        tokens.save(&expired).unwrap();
        let transport = Rc::new(ScriptedTransport::new());
        transport.reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "__type": "InternalErrorException", "message": "try again" }),
        );
        transport.fail("connection reset");
        let identity = scripted(tokens.clone(), transport);

        assert!(identity.current_session().await.is_err());
        assert_eq!(tokens.load(), Some(expired.clone()));

        assert!(matches!(identity.current_session().await, Err(ClientError::Transport(_))));
        assert_eq!(tokens.load(), Some(expired));
    }

    #[tokio::test]
    async fn garbage_token_is_discarded() {
        let tokens = Rc::new(MemoryTokenStore::new());
        tokens
            .save(&StoredTokens {
                access_token: "garbage".into(),
                id_token: None,
                refresh_token: None,
            })
            .unwrap();
        let identity = identity(tokens.clone());

        assert_eq!(identity.current_session().await.unwrap(), None);
        assert!(tokens.load().is_none());
    }

    #[test]
    fn service_error_prefers_message() {
        let body = br#"{"__type":"NotAuthorizedException","message":"Incorrect username or password."}"#;
        let err = service_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "Incorrect username or password.");
        assert_eq!(err.code(), Some(NOT_AUTHORIZED));

        let body = br#"{"__type":"com.amazonaws.cognito#NotAuthorizedException","message":"x"}"#;
        assert_eq!(service_error(StatusCode::BAD_REQUEST, body).code(), Some(NOT_AUTHORIZED));

        let body = br#"{"__type":"UsernameExistsException","Message":"User already exists"}"#;
        assert_eq!(service_error(StatusCode::BAD_REQUEST, body).to_string(), "User already exists");

        let body = br#"{"__type":"InternalErrorException"}"#;
        assert_eq!(
            service_error(StatusCode::INTERNAL_SERVER_ERROR, body).to_string(),
            "InternalErrorException"
        );

        assert_eq!(
            service_error(StatusCode::BAD_GATEWAY, b"<html>").to_string(),
            "identity service returned 502 Bad Gateway"
        );
    }

    #[test]
    fn request_shapes() {
        let request = InitiateAuthRequest {
            auth_flow: PASSWORD_FLOW,
            client_id: "client",
            auth_parameters: HashMap::from([("USERNAME", "ana"), ("PASSWORD", "pw")]),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "AuthFlow": "USER_PASSWORD_AUTH",
                "ClientId": "client",
                "AuthParameters": { "USERNAME": "ana", "PASSWORD": "pw" },
            })
        );

        let attributes = [UserAttribute::email("ana@example.com")];
        let request = SignUpRequest {
            client_id: "client",
            username: "ana@example.com",
            password: "pw",
            user_attributes: &attributes,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "ClientId": "client",
                "Username": "ana@example.com",
                "Password": "pw",
                "UserAttributes": [{ "Name": "email", "Value": "ana@example.com" }],
            })
        );
    }
}
