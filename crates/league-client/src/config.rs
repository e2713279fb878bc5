//! Backend endpoint configuration.
//!
//! Three values locate the managed backend: the user pool, the GraphQL
//! endpoint and its API key (plus the region both live in). They are
//! supplied once at process start through a key lookup so the web build can
//! feed compile-time environment values and tests can feed a map.

use thiserror::Error;
use url::Url;

pub const USER_POOL_ID: &str = "LEAGUE_USER_POOL_ID";
pub const USER_POOL_CLIENT_ID: &str = "LEAGUE_USER_POOL_CLIENT_ID";
pub const GRAPHQL_ENDPOINT: &str = "LEAGUE_GRAPHQL_ENDPOINT";
pub const AWS_REGION: &str = "LEAGUE_AWS_REGION";
pub const API_KEY: &str = "LEAGUE_API_KEY";
pub const ADMIN_GROUP: &str = "LEAGUE_ADMIN_GROUP";

/// Group whose members may create records when none is configured.
pub const DEFAULT_ADMIN_GROUP: &str = "Admins";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration value {key}")]
    Missing { key: &'static str },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// User directory the identity provider signs users into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
}

impl IdentityConfig {
    /// Service endpoint for the pool's region.
    pub fn endpoint(&self) -> String {
        format!("https://cognito-idp.{}.amazonaws.com/", self.region)
    }
}

/// Hosted GraphQL data API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub endpoint: Url,
    pub region: String,
    pub api_key: String,
}

/// Top-level configuration for the league client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    pub identity: IdentityConfig,
    pub api: ApiConfig,
    /// Members of this group see and may use the creation forms.
    pub admin_group: String,
}

impl LeagueConfig {
    /// Build the configuration from a key lookup (environment, build-time values, a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing { key })
        };

        let user_pool_id = required(USER_POOL_ID)?;
        let client_id = required(USER_POOL_CLIENT_ID)?;
        let region = required(AWS_REGION)?;
        let api_key = required(API_KEY)?;
        let endpoint_raw = required(GRAPHQL_ENDPOINT)?;

        let endpoint = Url::parse(&endpoint_raw).map_err(|e| ConfigError::Invalid {
            key: GRAPHQL_ENDPOINT,
            message: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "https" | "http") {
            return Err(ConfigError::Invalid {
                key: GRAPHQL_ENDPOINT,
                message: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        // Pool ids are "<region>_<id>"; prefer that region over the API's.
        let identity_region = user_pool_id
            .split_once('_')
            .map(|(prefix, _)| prefix.to_string())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| region.clone());

        let admin_group = lookup(ADMIN_GROUP)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_GROUP.to_string());

        Ok(Self {
            identity: IdentityConfig {
                region: identity_region,
                user_pool_id,
                client_id,
            },
            api: ApiConfig {
                endpoint,
                region,
                api_key,
            },
            admin_group,
        })
    }
}
