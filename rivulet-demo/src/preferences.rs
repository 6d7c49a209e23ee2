// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scalar key-value preferences and the save/load form built on them.

use crate::error::{DemoError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Group prefix applied to keys by [`FilePreferences`].
pub const DEFAULT_GROUP: &str = "rivulet";

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<String>>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }
}

/// Store persisted as a flat JSON object, keys scoped as `<group>.<key>`.
///
/// A missing file reads as empty. Writes rewrite the whole file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    group: String,
    write_lock: tokio::sync::Mutex<()>,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_group(path, DEFAULT_GROUP)
    }

    pub fn with_group(path: impl Into<PathBuf>, group: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            group: group.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}.{key}", self.group)
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| DemoError::PreferencesFormat {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(DemoError::Preferences {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(values).map_err(|source| DemoError::PreferencesFormat {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| DemoError::Preferences {
                    path: self.path.clone(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|source| DemoError::Preferences {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl PreferenceStore for FilePreferences {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_all().await?;
        values.insert(self.scoped(key), value.to_string());
        self.write_all(&values).await?;
        debug!(path = %self.path.display(), key, "preferences: saved");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.write_lock.lock().await;
        Ok(self.read_all().await?.remove(&self.scoped(key)))
    }
}

/// An input field bound to one preference key.
pub struct ValueForm {
    store: Arc<dyn PreferenceStore>,
    key: String,
    input: String,
    stored: Option<String>,
}

impl ValueForm {
    pub fn new(store: Arc<dyn PreferenceStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            input: String::new(),
            stored: None,
        }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Last value read by [`load`](Self::load).
    pub fn stored(&self) -> Option<&str> {
        self.stored.as_deref()
    }

    /// Stores the input, clears it, then reloads the stored value.
    pub async fn save(&mut self) -> Result<Option<String>> {
        self.store.set(&self.key, &self.input).await?;
        self.input.clear();
        self.load().await
    }

    pub async fn load(&mut self) -> Result<Option<String>> {
        self.stored = self.store.get(&self.key).await?;
        Ok(self.stored.clone())
    }
}
