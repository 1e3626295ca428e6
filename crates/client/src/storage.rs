//! Persistent storage for the session token

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Client-local persistence for exactly one value: the current session
/// token. Absence means anonymous.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Token persisted as a single file at a fixed path, surviving restarts of
/// the consuming application.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok(if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Token held in memory only; used by tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .map_err(|_| io::Error::other("token store poisoned"))?
            .clone())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| io::Error::other("token store poisoned"))? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| io::Error::other("token store poisoned"))? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("keygate-test-{}", std::process::id()));
        let store = FileTokenStore::new(dir.join("token"));

        assert_eq!(store.load().unwrap(), None);
        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().unwrap(), Some("abc.def.ghi".to_string()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing an already-absent token is not an error
        store.clear().unwrap();

        let _ = fs::remove_dir_all(dir);
    }
}
