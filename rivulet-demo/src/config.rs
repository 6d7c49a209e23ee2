// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{DemoError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Config file read when no `--config` path is given, if present.
pub const DEFAULT_CONFIG_FILE: &str = "rivulet.toml";

/// Complete demo configuration.
///
/// Missing keys fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub base_url: String,
    pub user_id: u64,
    pub request_timeout_ms: u64,
    pub loading_message: String,
    pub loading_duration_ms: u64,
    pub take_until_window_ms: u64,
    pub replay_buffer_size: usize,
    /// JSON file backing the preference store; in-memory when absent
    pub preferences_path: Option<PathBuf>,
    pub preference_key: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".into(),
            user_id: 1,
            request_timeout_ms: 10_000,
            loading_message: "Loading...".into(),
            loading_duration_ms: 2_000,
            take_until_window_ms: 1_000,
            replay_buffer_size: 3,
            preferences_path: None,
            preference_key: "myValue".into(),
        }
    }
}

impl DemoConfig {
    /// Defaults, then the TOML file, then `RIVULET_*` environment overrides.
    ///
    /// An explicit `path` must exist; [`DEFAULT_CONFIG_FILE`] is only read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| DemoError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| DemoError::Config(e.to_string()))
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RIVULET_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("RIVULET_USER_ID") {
            self.user_id = parse_env("RIVULET_USER_ID", &v)?;
        }
        if let Some(v) = lookup("RIVULET_TAKE_UNTIL_WINDOW_MS") {
            self.take_until_window_ms = parse_env("RIVULET_TAKE_UNTIL_WINDOW_MS", &v)?;
        }
        if let Some(v) = lookup("RIVULET_REPLAY_BUFFER_SIZE") {
            self.replay_buffer_size = parse_env("RIVULET_REPLAY_BUFFER_SIZE", &v)?;
        }
        if let Some(v) = lookup("RIVULET_PREFERENCES_PATH") {
            self.preferences_path = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DemoError::Config(format!(
                "base_url must be an http(s) URL, got `{}`",
                self.base_url
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(DemoError::Config("request_timeout_ms must be positive".into()));
        }
        if self.replay_buffer_size == 0 {
            return Err(DemoError::Config("replay_buffer_size must be at least 1".into()));
        }
        if self.preference_key.trim().is_empty() {
            return Err(DemoError::Config("preference_key must not be blank".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn loading_duration(&self) -> Duration {
        Duration::from_millis(self.loading_duration_ms)
    }

    pub fn take_until_window(&self) -> Duration {
        Duration::from_millis(self.take_until_window_ms)
    }
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| DemoError::Config(format!("{key}=`{raw}`: {e}")))
}
