use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

use super::session::Identity;

/// Token file name in the session directory
const TOKEN_FILE: &str = "token";

/// Identity file name in the session directory
const USER_FILE: &str = "user.json";

/// Durable session persistence: one `token` entry and one `user` entry,
/// always written together and cleared together.
///
/// Only the session store touches this type; everything else reads session
/// state through the store's accessors.
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Default session directory under the platform data dir.
    pub fn default_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join("eduspace"))
    }

    /// Load the persisted session, if a complete and well-formed one exists.
    ///
    /// A token without a parseable identity (or the reverse) is treated as
    /// no session at all rather than an error, so corrupt state degrades to
    /// the unauthenticated default.
    pub fn load(&self) -> Option<(String, Identity)> {
        let token = match std::fs::read_to_string(self.dir.join(TOKEN_FILE)) {
            Ok(t) if !t.trim().is_empty() => t.trim().to_string(),
            Ok(_) => return None,
            Err(_) => return None,
        };

        let contents = std::fs::read_to_string(self.dir.join(USER_FILE)).ok()?;
        match serde_json::from_str::<Identity>(&contents) {
            Ok(identity) => Some((token, identity)),
            Err(e) => {
                warn!(error = %e, "stored identity is corrupt, starting unauthenticated");
                None
            }
        }
    }

    /// Persist token and identity together.
    pub fn save(&self, token: &str, identity: &Identity) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create session directory {}", self.dir.display()))?;

        std::fs::write(self.dir.join(TOKEN_FILE), token).context("Failed to write session token")?;

        let contents = serde_json::to_string_pretty(identity)?;
        std::fs::write(self.dir.join(USER_FILE), contents)
            .context("Failed to write session identity")?;
        Ok(())
    }

    /// Remove both entries. Missing files are not an error.
    pub fn clear(&self) -> Result<()> {
        for name in [TOKEN_FILE, USER_FILE] {
            let path = self.dir.join(name);
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }
        }
        Ok(())
    }
}
