use thiserror::Error;

/// Errors raised while talking to the identity provider or the data store.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The remote service rejected the request; `message` is the service's own text
    #[error("{message}")]
    Remote {
        message: String,
        /// Service error code, e.g. `NotAuthorizedException`
        code: Option<String>,
    },

    /// The request never produced a usable response
    #[error("request failed: {0}")]
    Transport(String),

    /// A response body did not have the expected shape
    #[error("unexpected response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
            code: None,
        }
    }

    pub fn remote_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// Service error code, when the service sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Remote { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
