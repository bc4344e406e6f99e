// core/src/storage.rs

//! The persistence seam: a browser-localStorage-shaped key-value contract,
//! plus the two bundled backends.
//!
//! The store writes the serialized cart under a single key after every
//! mutation and deletes the key when the cart empties. Backends only move
//! opaque strings; the JSON layout is owned by the store.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;

/// Key-value persistence contract for cart state.
///
/// Semantics mirror the web storage API: `load` of an absent key yields
/// `Ok(None)`, `remove` of an absent key is a no-op. Writes to a single key
/// are last-writer-wins across concurrent handles; no locking or versioning
/// is provided or expected.
pub trait StorageBackend: Send + Sync {
  fn load(&self, key: &str) -> Result<Option<String>>;
  fn store(&self, key: &str, value: &str) -> Result<()>;
  fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory backend: state lives only as long as the backend itself,
/// matching a single browser session. Useful for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl StorageBackend for MemoryStorage {
  fn load(&self, key: &str) -> Result<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn store(&self, key: &str, value: &str) -> Result<()> {
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.entries.lock().remove(key);
    Ok(())
  }
}

/// File-backed backend: one `<key>.json` file per key under a directory, so
/// cart state survives process restarts the way localStorage survives page
/// reloads.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
  dir: PathBuf,
}

impl JsonFileStorage {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    JsonFileStorage { dir: dir.into() }
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{}.json", key))
  }
}

impl StorageBackend for JsonFileStorage {
  fn load(&self, key: &str) -> Result<Option<String>> {
    match fs::read_to_string(self.path_for(key)) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("reading storage entry '{}'", key)),
    }
  }

  fn store(&self, key: &str, value: &str) -> Result<()> {
    fs::create_dir_all(&self.dir).with_context(|| format!("creating storage directory {:?}", self.dir))?;
    fs::write(self.path_for(key), value).with_context(|| format!("writing storage entry '{}'", key))
  }

  fn remove(&self, key: &str) -> Result<()> {
    match fs::remove_file(self.path_for(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("removing storage entry '{}'", key)),
    }
  }
}
