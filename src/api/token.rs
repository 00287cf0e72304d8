use std::path::{Path, PathBuf};

/// The persisted bearer token, one small file under the app data
/// directory. Constructed once at startup and handed to the API client —
/// nothing else reads or writes the file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored token, if any. Whitespace-only files count as absent.
    pub fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    pub fn store(&self, token: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(&self.path, token)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }

    /// Remove the token. Never fails the caller; a leftover file is only
    /// worth a log line.
    pub fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                log::error!("Failed to remove {}: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> TokenStore {
        let dir = std::env::temp_dir().join(format!("quill-token-test-{}", uuid::Uuid::new_v4()));
        TokenStore::new(dir.join("session.token"))
    }

    #[test]
    fn store_then_load_roundtrip() {
        let store = temp_store();
        assert!(store.load().is_none());

        store.store("T").unwrap();
        assert_eq!(store.load().as_deref(), Some("T"));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn whitespace_only_file_counts_as_absent() {
        let store = temp_store();
        store.store("  \n").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = temp_store();
        store.clear();
        store.clear();
        assert!(store.load().is_none());
    }
}
