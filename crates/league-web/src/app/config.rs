//! Backend settings baked in at build time.
//!
//! The browser has no process environment, so the values are captured from
//! the build environment with `option_env!`:
//!
//! ```text
//! LEAGUE_USER_POOL_ID=eu-west-1_AbCd LEAGUE_USER_POOL_CLIENT_ID=... \
//! LEAGUE_GRAPHQL_ENDPOINT=https://.../graphql LEAGUE_AWS_REGION=eu-west-1 \
//! LEAGUE_API_KEY=da2-... dx serve
//! ```

use league_client::{
    config::{ADMIN_GROUP, API_KEY, AWS_REGION, GRAPHQL_ENDPOINT, USER_POOL_CLIENT_ID, USER_POOL_ID}, ConfigError, LeagueConfig
};

fn bundled(key: &str) -> Option<String> {
    let value = match key {
        USER_POOL_ID => option_env!("LEAGUE_USER_POOL_ID"),
        USER_POOL_CLIENT_ID => option_env!("LEAGUE_USER_POOL_CLIENT_ID"),
        GRAPHQL_ENDPOINT => option_env!("LEAGUE_GRAPHQL_ENDPOINT"),
        AWS_REGION => option_env!("LEAGUE_AWS_REGION"),
        API_KEY => option_env!("LEAGUE_API_KEY"),
        ADMIN_GROUP => option_env!("LEAGUE_ADMIN_GROUP"),
        _ => None,
    };
    value.map(str::to_string)
}

/// Settings compiled into this build.
pub fn load() -> Result<LeagueConfig, ConfigError> {
    LeagueConfig::from_lookup(bundled)
}
