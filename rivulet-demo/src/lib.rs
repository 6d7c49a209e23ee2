// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combination dispatcher over a JSON posts API.
//!
//! A [`Dispatcher`] fetches one user and that user's posts, combines them with
//! the selected [`Operator`] and commits the result to a [`PostBoard`]:
//!
//! ```no_run
//! use rivulet_demo::{DataSource, DispatchSettings, Dispatcher, HttpFetcher, Operator, PostBoard, TracingIndicator};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let fetcher = HttpFetcher::new("https://jsonplaceholder.typicode.com", Duration::from_secs(10))?;
//! let source = DataSource::new(Arc::new(fetcher), 1);
//! let dispatcher = Dispatcher::new(source, PostBoard::new(), Arc::new(TracingIndicator), DispatchSettings::default());
//!
//! dispatcher.dispatch(Operator::ForkJoin).await;
//! println!("{:?}", dispatcher.board().rows());
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod board;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod loading;
pub mod model;
pub mod operator;
pub mod preferences;
pub mod showcase;
pub mod source;

pub use self::board::PostBoard;
pub use self::config::DemoConfig;
pub use self::dispatcher::{DispatchOutcome, DispatchSettings, Dispatcher, HotBatch};
pub use self::error::{DemoError, FailureKind, Result, SourceError};
pub use self::loading::{LoadingHandle, LoadingIndicator, TracingIndicator};
pub use self::model::{build_display_posts, DisplayPost, Post, User};
pub use self::operator::{HotFlavor, Operator};
pub use self::preferences::{FilePreferences, MemoryPreferences, PreferenceStore, ValueForm};
pub use self::source::{DataSource, HttpFetcher, JsonFetcher};
