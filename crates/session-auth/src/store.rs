//! Session storage
//!
//! `SessionStore` is the seam between the session layer and wherever the
//! credential pair lives. Two implementations ship here:
//!
//! - `MemorySessionStore` for tests and short-lived processes
//! - `FileSessionStore`, a JSON file written atomically (temp file + rename)
//!   with 0600 permissions, for clients that must survive a restart
//!
//! Both keep the current credential in memory behind a tokio Mutex, so reads
//! never touch the disk and concurrent writers are serialized.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::credentials::{Credential, StoredCredential};
use crate::error::{Error, Result};

/// Holder of the current session credential.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility
/// (`Arc<dyn SessionStore>`).
pub trait SessionStore: Send + Sync {
    /// Current credential, or `None` when there is no session.
    fn get(&self) -> Pin<Box<dyn Future<Output = Option<Credential>> + Send + '_>>;

    /// Replace the current credential.
    fn set(&self, credential: Credential) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Remove the current credential. Clearing an empty store is not an error.
    fn clear(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Store a renewed `credential` only if the session still holds
    /// `refresh_token`, checked and written under one lock.
    ///
    /// Returns the credential held afterwards: the renewed one, or the one
    /// that replaced the session while the renewal was in flight. `None`
    /// means the session ended in the meantime and nothing was written.
    fn set_if_current<'a>(
        &'a self,
        refresh_token: &'a str,
        credential: Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Credential>>> + Send + 'a>>;
}

/// Whether `current` is still the session a renewal was started from.
fn holds_refresh_token(current: &Option<Credential>, refresh_token: &str) -> bool {
    current
        .as_ref()
        .is_some_and(|c| c.refresh_token().as_str() == refresh_token)
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<Option<Credential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential (e.g. right after login).
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            state: Mutex::new(Some(credential)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Pin<Box<dyn Future<Output = Option<Credential>> + Send + '_>> {
        Box::pin(async move { self.state.lock().await.clone() })
    }

    fn set(&self, credential: Credential) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            *self.state.lock().await = Some(credential);
            Ok(())
        })
    }

    fn clear(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.state.lock().await.take();
            Ok(())
        })
    }

    fn set_if_current<'a>(
        &'a self,
        refresh_token: &'a str,
        credential: Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Credential>>> + Send + 'a>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            if holds_refresh_token(&state, refresh_token) {
                *state = Some(credential);
            }
            Ok(state.clone())
        })
    }
}

/// Session store persisted to a JSON file.
pub struct FileSessionStore {
    path: PathBuf,
    state: Mutex<Option<Credential>>,
}

impl FileSessionStore {
    /// Load the session from `path`.
    ///
    /// A missing file is an empty session. A file holding only one of the two
    /// tokens is also treated as an empty session.
    pub async fn load(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let contents = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Error::Io(format!("reading session file: {e}")))?;
            let stored: StoredCredential = serde_json::from_str(&contents)
                .map_err(|e| Error::CredentialParse(format!("parsing session file: {e}")))?;
            let credential = stored.into_credential();
            if credential.is_none() {
                warn!(path = %path.display(), "session file holds an incomplete credential, ignoring");
            }
            info!(path = %path.display(), present = credential.is_some(), "loaded session");
            credential
        } else {
            info!(path = %path.display(), "session file not found, starting without a session");
            None
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Pin<Box<dyn Future<Output = Option<Credential>> + Send + '_>> {
        Box::pin(async move { self.state.lock().await.clone() })
    }

    fn set(&self, credential: Credential) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            let stored = StoredCredential::from(&credential);
            // Memory is updated even if the write fails so the running
            // process keeps using the newest token.
            *state = Some(credential);
            write_atomic(&self.path, &stored).await?;
            debug!("stored session credential");
            Ok(())
        })
    }

    fn clear(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.take();
            match tokio::fs::remove_file(&self.path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::Io(format!("removing session file: {e}"))),
            }
            debug!(path = %self.path.display(), "cleared session");
            Ok(())
        })
    }

    fn set_if_current<'a>(
        &'a self,
        refresh_token: &'a str,
        credential: Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Credential>>> + Send + 'a>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            if !holds_refresh_token(&state, refresh_token) {
                debug!("session changed during renewal, not storing renewed credential");
                return Ok(state.clone());
            }
            let stored = StoredCredential::from(&credential);
            *state = Some(credential.clone());
            write_atomic(&self.path, &stored).await?;
            debug!("stored renewed session credential");
            Ok(Some(credential))
        })
    }
}

/// Write the session file atomically.
///
/// Writes to a temporary file in the same directory, then renames it over the
/// target, so a crash mid-write never leaves a truncated session file. The
/// file holds tokens, so permissions are 0600 on unix.
async fn write_atomic(path: &Path, data: &StoredCredential) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| Error::CredentialParse(format!("serializing session: {e}")))?;

    let dir = path
        .parent()
        .ok_or_else(|| Error::Io("session path has no parent directory".into()))?;
    if !dir.as_os_str().is_empty() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::Io(format!("creating session directory: {e}")))?;
    }

    let tmp_path = dir.join(format!(".session.tmp.{}", std::process::id()));

    tokio::fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| Error::Io(format!("writing temp session file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(&tmp_path, perms)
            .await
            .map_err(|e| Error::Io(format!("setting session file permissions: {e}")))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Error::Io(format!("renaming temp session file: {e}")))?;

    debug!(path = %path.display(), "persisted session");
    Ok(())
}
