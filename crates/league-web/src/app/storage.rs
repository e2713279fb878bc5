use league_client::{ClientError, ClientResult, StoredTokens, TokenStore};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key under which the signed-in user's tokens are kept.
pub const TOKENS_KEY: &str = "league_web_tokens";

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// localStorage - persists across browser sessions
    Local,
    /// sessionStorage - cleared when the tab closes
    Session,
    /// No-op mode, for when storage is disabled or unavailable
    None,
}

/// Thin wrapper over the browser's key/value storage.
pub struct BrowserStorage {
    storage_type: StorageType,
}

impl BrowserStorage {
    pub fn new(storage_type: StorageType) -> Self {
        Self { storage_type }
    }

    /// Local storage if the browser offers it, otherwise the no-op backend.
    pub fn local_or_none() -> Self {
        #[cfg(feature = "web")]
        {
            if web_sys::window().and_then(|w| w.local_storage().ok().flatten()).is_some() {
                return Self::new(StorageType::Local);
            }
        }
        warn!("local storage unavailable; sessions will not survive a reload");
        Self::new(StorageType::None)
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    #[cfg(feature = "web")]
    fn backend(&self) -> Result<Option<web_sys::Storage>, String> {
        if self.storage_type == StorageType::None {
            return Ok(None);
        }
        let window = web_sys::window().ok_or_else(|| "Window not available".to_string())?;
        let storage = match self.storage_type {
            StorageType::Session => window.session_storage(),
            _ => window.local_storage(),
        };
        storage
            .map_err(|e| format!("{:?}", e))?
            .map(Some)
            .ok_or_else(|| "Storage not available".to_string())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "web")]
        {
            let storage = self.backend().ok()??;
            match storage.get_item(key) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = ?e, "failed to read from storage");
                    None
                }
            }
        }
        #[cfg(not(feature = "web"))]
        {
            let _ = key;
            None
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(feature = "web")]
        {
            match self.backend()? {
                Some(storage) => storage
                    .set_item(key, value)
                    .map_err(|e| format!("Failed to set item in storage '{}': {:?}", key, e)),
                None => Ok(()),
            }
        }
        #[cfg(not(feature = "web"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    pub fn remove(&self, key: &str) -> Result<(), String> {
        #[cfg(feature = "web")]
        {
            match self.backend()? {
                Some(storage) => storage
                    .remove_item(key)
                    .map_err(|e| format!("Failed to remove item from storage '{}': {:?}", key, e)),
                None => Ok(()),
            }
        }
        #[cfg(not(feature = "web"))]
        {
            let _ = key;
            Ok(())
        }
    }

    /// Get and deserialize a JSON value from storage
    pub fn get_json<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_str(&value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "unreadable JSON in storage");
                None
            }
        }
    }

    /// Serialize and set a JSON value in storage
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), String> {
        let json = serde_json::to_string(value).map_err(|e| format!("Failed to serialize to JSON: {}", e))?;
        self.set(key, &json)
    }
}

impl TokenStore for BrowserStorage {
    fn load(&self) -> Option<StoredTokens> {
        self.get_json(TOKENS_KEY)
    }

    fn save(&self, tokens: &StoredTokens) -> ClientResult<()> {
        self.set_json(TOKENS_KEY, tokens).map_err(ClientError::Transport)
    }

    fn clear(&self) {
        if let Err(e) = self.remove(TOKENS_KEY) {
            warn!(error = %e, "failed to clear stored tokens");
        }
    }
}
