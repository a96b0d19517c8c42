//! Persistent key storage
//!
//! The key file holds exactly 32 raw bytes with no header. A key is created
//! on first use, or whenever the operator declines to reuse the stored one.
//! Replacing the key makes every envelope sealed under the old key
//! unreadable.
//!
//! Load-or-generate is serialized per key file across the whole process:
//! every `KeyStore` pointing at the same path shares one lock, so two stores
//! cannot both see a missing file and race to create different keys.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use zeroize::Zeroizing;

use crate::crypto::Key;
use crate::error::{SealError, SealResult};

use super::file_io::write_bytes_atomic;

/// Decides whether an existing key file should be reused
///
/// Returning `false` regenerates the key and overwrites the file.
pub trait KeyReusePrompt {
    fn reuse_existing(&mut self, path: &Path) -> bool;
}

impl<F> KeyReusePrompt for F
where
    F: FnMut(&Path) -> bool,
{
    fn reuse_existing(&mut self, path: &Path) -> bool {
        self(path)
    }
}

type LockRegistry = Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

static KEY_FILE_LOCKS: OnceLock<LockRegistry> = OnceLock::new();

/// Process-wide lock for the key file at `path`
///
/// Relative paths are resolved against the working directory so `key.bin`
/// and `./key.bin` share a lock. Symlinks are not followed.
fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let normalized: PathBuf = absolute.components().collect();

    let mut locks = KEY_FILE_LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(normalized).or_default())
}

/// Owns the on-disk key file
pub struct KeyStore {
    path: PathBuf,
    /// Shared with every other store for the same key file
    lock: Arc<Mutex<()>>,
}

impl KeyStore {
    /// Create a store backed by the key file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock = lock_for(&path);
        Self { path, lock }
    }

    /// Get the path to the key file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored key, or create one
    ///
    /// With no key file a new key is generated and persisted. With a key
    /// file, `prompt` decides between reusing it and replacing it.
    pub fn obtain<P>(&self, prompt: &mut P) -> SealResult<Key>
    where
        P: KeyReusePrompt + ?Sized,
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        match fs::metadata(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no key file found, generating a new key");
                return self.generate_locked();
            }
            Err(e) => {
                return Err(SealError::KeyIo(format!(
                    "Failed to inspect {}: {}",
                    self.path.display(),
                    e
                )));
            }
        }

        if prompt.reuse_existing(&self.path) {
            self.load_locked()
        } else {
            tracing::warn!(
                path = %self.path.display(),
                "replacing existing key; envelopes sealed under the previous key can no longer be decoded"
            );
            self.generate_locked()
        }
    }

    /// Load the stored key
    pub fn load(&self) -> SealResult<Key> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load_locked()
    }

    /// Generate a new key and persist it, replacing any existing key
    pub fn generate(&self) -> SealResult<Key> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.generate_locked()
    }

    fn load_locked(&self) -> SealResult<Key> {
        let material = Zeroizing::new(fs::read(&self.path).map_err(|e| {
            SealError::KeyIo(format!("Failed to read {}: {}", self.path.display(), e))
        })?);

        let key = Key::from_slice(&material).map_err(|_| {
            SealError::KeyIo(format!(
                "{} holds {} bytes, expected {}",
                self.path.display(),
                material.len(),
                crate::crypto::KEY_SIZE
            ))
        })?;

        tracing::debug!(path = %self.path.display(), "loaded existing key");
        Ok(key)
    }

    fn generate_locked(&self) -> SealResult<Key> {
        let key = Key::generate()?;

        write_bytes_atomic(&self.path, key.as_bytes()).map_err(|e| {
            SealError::KeyIo(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::info!(path = %self.path.display(), "persisted new key");
        Ok(key)
    }
}
