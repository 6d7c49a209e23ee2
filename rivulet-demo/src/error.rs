// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{RivuletError, SubjectError};
use std::path::PathBuf;

/// Failures talking to the upstream JSON API.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transport failure, timeout, or a body that is not JSON
    #[error("request for {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("request for {path} returned status {status}")]
    Status { path: String, status: u16 },

    /// The request was abandoned because its token was cancelled
    #[error("request for {path} was cancelled")]
    Cancelled { path: String },
}

/// Root error type for the demo crate.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The payload did not have the expected JSON shape
    #[error("unexpected payload for {context}: {reason}")]
    Mapping { context: String, reason: String },

    #[error(transparent)]
    Stream(#[from] RivuletError),

    /// Use of the dispatcher, a subject or the board after teardown
    #[error("lifecycle misuse: {0}")]
    Lifecycle(#[from] SubjectError),

    #[error("preference store {}: {source}", path.display())]
    Preferences {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {} is not valid JSON: {source}", path.display())]
    PreferencesFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Coarse classification of a dispatch failure, reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Mapping,
    Lifecycle,
    Cancelled,
    Stream,
    Storage,
    Config,
}

impl DemoError {
    pub fn mapping(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Mapping {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Recovers a `DemoError` that travelled through a stream as a user error.
    pub fn from_stream(error: RivuletError) -> Self {
        match error {
            RivuletError::UserError(inner) => match inner.downcast::<DemoError>() {
                Ok(demo) => *demo,
                Err(other) => Self::Stream(RivuletError::UserError(other)),
            },
            other => Self::Stream(other),
        }
    }

    /// Wraps this error so it can travel through a stream.
    #[must_use]
    pub fn into_stream(self) -> RivuletError {
        match self {
            Self::Stream(inner) => inner,
            other => RivuletError::user_error(other),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Source(SourceError::Cancelled { .. }) => FailureKind::Cancelled,
            Self::Source(_) => FailureKind::Network,
            Self::Mapping { .. } => FailureKind::Mapping,
            Self::Stream(e) if e.is_cancelled() => FailureKind::Cancelled,
            Self::Stream(_) => FailureKind::Stream,
            Self::Lifecycle(_) => FailureKind::Lifecycle,
            Self::Preferences { .. } | Self::PreferencesFormat { .. } => FailureKind::Storage,
            Self::Config(_) => FailureKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
