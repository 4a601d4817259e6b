//! Client configuration and API keys.
//!
//! Keys can come from the caller, from `JSB_*` environment variables, or
//! from ~/.config/jsonbank/keys.json (0600 on Unix), which `jsb login`
//! writes.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Production origin used when no host is configured.
pub const DEFAULT_HOST: &str = "https://api.jsonbank.io";

pub const ENV_HOST: &str = "JSB_HOST";
pub const ENV_PUBLIC_KEY: &str = "JSB_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "JSB_PRIVATE_KEY";

/// Which API key a request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// No key; public content endpoints.
    None,
    /// Public key only.
    Public,
    /// Public and private key.
    Private,
}

/// API key pair. A key counts as present iff it is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    #[serde(default)]
    pub public: Option<String>,
    #[serde(default)]
    pub private: Option<String>,
}

impl Keys {
    pub fn new(public: impl Into<String>, private: impl Into<String>) -> Self {
        Self {
            public: Some(public.into()),
            private: Some(private.into()),
        }
    }

    /// Keys for read-only use: no private key.
    pub fn public_only(public: impl Into<String>) -> Self {
        Self { public: Some(public.into()), private: None }
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public.as_deref().filter(|k| !k.is_empty())
    }

    pub fn private_key(&self) -> Option<&str> {
        self.private.as_deref().filter(|k| !k.is_empty())
    }

    /// Whether requests of `tier` can be signed with these keys.
    /// `Private` requires both keys.
    pub fn has_tier(&self, tier: Tier) -> bool {
        match tier {
            Tier::None => true,
            Tier::Public => self.public_key().is_some(),
            Tier::Private => self.public_key().is_some() && self.private_key().is_some(),
        }
    }
}

/// Host and keys for a [`crate::JsonBank`] instance.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Service origin; empty means [`DEFAULT_HOST`].
    pub host: String,
    pub keys: Keys,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, keys: Keys) -> Self {
        Self { host: host.into(), keys }
    }

    /// Read `JSB_HOST`, `JSB_PUBLIC_KEY` and `JSB_PRIVATE_KEY`.
    /// Unset variables leave the field empty.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            host: var(ENV_HOST).unwrap_or_default(),
            keys: Keys {
                public: var(ENV_PUBLIC_KEY),
                private: var(ENV_PRIVATE_KEY),
            },
        }
    }

    /// The host with the default applied and any trailing slash removed.
    pub fn effective_host(&self) -> String {
        effective_host(&self.host)
    }
}

pub(crate) fn effective_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        DEFAULT_HOST.to_string()
    } else {
        host.to_string()
    }
}

/// Keys persisted by `jsb login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub keys: Keys,
}

/// Returns the path to the saved keys file.
pub fn keys_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("jsonbank/keys.json"))
}

/// Load saved keys from disk.
/// Returns None if nothing is saved or the file is invalid.
pub fn load_keys() -> Option<SavedKeys> {
    load_keys_from(&keys_file_path()?)
}

pub fn load_keys_from(path: &std::path::Path) -> Option<SavedKeys> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(saved) => Some(saved),
        Err(e) => {
            log::warn!("ignoring unreadable keys file {}: {}", path.display(), e);
            None
        }
    }
}

/// Write keys to the default keys file. Returns where they went.
pub fn save_keys(saved: &SavedKeys) -> Result<PathBuf, String> {
    let path = keys_file_path().ok_or("No user config directory to store jsonbank keys in")?;
    save_keys_to(&path, saved)?;
    Ok(path)
}

/// Write keys as pretty JSON, readable only by the owner on Unix.
pub fn save_keys_to(path: &std::path::Path, saved: &SavedKeys) -> Result<(), String> {
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create {} for jsonbank keys: {}", dir.display(), e))?;
    }

    let json = serde_json::to_string_pretty(saved)
        .map_err(|e| format!("Cannot encode jsonbank keys: {}", e))?;
    std::fs::write(path, json)
        .map_err(|e| format!("Cannot write keys to {}: {}", path.display(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| format!("Cannot restrict {} to owner-only: {}", path.display(), e))?;
    }

    Ok(())
}

/// Remove the default keys file. Nothing saved is fine.
pub fn delete_keys() -> Result<(), String> {
    match keys_file_path() {
        Some(path) => delete_keys_at(&path),
        None => Ok(()),
    }
}

fn delete_keys_at(path: &std::path::Path) -> Result<(), String> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("Cannot remove saved keys {}: {}", path.display(), e)),
    }
}
