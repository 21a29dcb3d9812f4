//! [`Vault`]-related implementations.

use std::{
    collections::BTreeMap,
    fs, io,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use derive_more::{Display, Error as StdError, From};
use tracing as log;

/// Key of a [`Vault`] entry.
///
/// Names mirror the storage keys of the web client this backend serves.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Key {
    /// Access token of the current session.
    #[display("accessToken")]
    AccessToken,

    /// Refresh token of the current session.
    #[display("refreshToken")]
    RefreshToken,

    /// JSON-encoded user of the current session.
    #[display("user")]
    User,

    /// Short-lived token of the password-recovery flow.
    #[display("resetToken")]
    ResetToken,
}

/// Persistent client-side storage of the session.
///
/// Always injected explicitly: nothing in the crate reaches for an ambient
/// global store.
pub trait Vault {
    /// Returns the value stored under the provided [`Key`].
    fn load(&self, key: Key) -> Option<String>;

    /// Stores the value under the provided [`Key`].
    fn store(&self, key: Key, value: String);

    /// Removes the value stored under the provided [`Key`].
    fn remove(&self, key: Key);
}

/// In-memory [`Vault`] for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct Memory(Mutex<BTreeMap<String, String>>);

impl Vault for Memory {
    fn load(&self, key: Key) -> Option<String> {
        lock(&self.0).get(&key.to_string()).cloned()
    }

    fn store(&self, key: Key, value: String) {
        drop(lock(&self.0).insert(key.to_string(), value));
    }

    fn remove(&self, key: Key) {
        drop(lock(&self.0).remove(&key.to_string()));
    }
}

/// File-backed [`Vault`] persisting entries as a single JSON object.
#[derive(Debug)]
pub struct File {
    /// Path of the backing file.
    path: PathBuf,

    /// In-memory view of the persisted entries.
    cache: Mutex<BTreeMap<String, String>>,
}

impl File {
    /// Opens a [`File`] vault at the provided path, loading any entries
    /// persisted by a previous session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be read or is
    /// not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, OpenError> {
        let path = path.into();
        let cache = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    /// Persists the provided entries to the backing file.
    ///
    /// Persistence is best-effort: a failure leaves the in-memory view
    /// intact and is only logged.
    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("cannot create `{}`: {e}", parent.display());
                return;
            }
        }
        let raw = match serde_json::to_string_pretty(entries) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("cannot encode session entries: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, raw) {
            log::warn!("cannot write `{}`: {e}", self.path.display());
            return;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;

            if let Err(e) = fs::set_permissions(
                &self.path,
                fs::Permissions::from_mode(0o600),
            ) {
                log::warn!(
                    "cannot restrict permissions of `{}`: {e}",
                    self.path.display(),
                );
            }
        }
    }
}

impl Vault for File {
    fn load(&self, key: Key) -> Option<String> {
        lock(&self.cache).get(&key.to_string()).cloned()
    }

    fn store(&self, key: Key, value: String) {
        let mut entries = lock(&self.cache);
        drop(entries.insert(key.to_string(), value));
        self.persist(&entries);
    }

    fn remove(&self, key: Key) {
        let mut entries = lock(&self.cache);
        if entries.remove(&key.to_string()).is_some() {
            self.persist(&entries);
        }
    }
}

/// Error of opening a [`File`] vault.
#[derive(Debug, Display, From, StdError)]
pub enum OpenError {
    /// Backing file cannot be read.
    #[display("cannot read the vault file: {_0}")]
    Io(io::Error),

    /// Backing file is not a JSON object of strings.
    #[display("vault file is corrupted: {_0}")]
    Corrupted(serde_json::Error),
}

/// Acquires the provided [`Mutex`], recovering from poisoning.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod spec {
    use super::{Key, Memory, Vault as _};

    #[test]
    fn memory_round_trip() {
        let vault = Memory::default();

        assert_eq!(vault.load(Key::AccessToken), None);

        vault.store(Key::AccessToken, "t1".to_owned());
        assert_eq!(vault.load(Key::AccessToken), Some("t1".to_owned()));

        vault.remove(Key::AccessToken);
        assert_eq!(vault.load(Key::AccessToken), None);
        // Removing an absent entry is a no-op.
        vault.remove(Key::AccessToken);
    }

    #[test]
    fn keys_use_storage_names() {
        assert_eq!(Key::AccessToken.to_string(), "accessToken");
        assert_eq!(Key::RefreshToken.to_string(), "refreshToken");
        assert_eq!(Key::User.to_string(), "user");
        assert_eq!(Key::ResetToken.to_string(), "resetToken");
    }
}
