// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The combination dispatcher.
//!
//! [`Dispatcher::dispatch`] runs one strategy against the data source and commits
//! each display list it produces to the [`PostBoard`]. Failures stop at this
//! boundary: they are logged, reported through [`DispatchOutcome`] and never
//! reach the board.

mod hot;
pub mod strategy;

pub use hot::{HotBatch, HotChannels};
pub use strategy::{title_not_blank, MergeState, PostFilter};

use crate::board::PostBoard;
use crate::config::DemoConfig;
use crate::error::{DemoError, FailureKind, Result};
use crate::loading::LoadingIndicator;
use crate::model::DisplayPost;
use crate::operator::{HotFlavor, Operator};
use crate::source::DataSource;
use futures::{FutureExt, StreamExt};
use rivulet_core::{CancellationToken, RivuletError, StreamItem, SubjectError};
use rivulet_stream::producer::Producer;
use rivulet_stream::TakeUntilExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Tunables for [`Dispatcher`].
#[derive(Clone)]
pub struct DispatchSettings {
    pub loading_message: String,
    pub loading_duration: Duration,
    pub take_until_window: Duration,
    pub replay_buffer_size: usize,
    pub post_filter: PostFilter,
}

impl DispatchSettings {
    pub fn from_config(config: &DemoConfig) -> Self {
        Self {
            loading_message: config.loading_message.clone(),
            loading_duration: config.loading_duration(),
            take_until_window: config.take_until_window(),
            replay_buffer_size: config.replay_buffer_size,
            post_filter: title_not_blank(),
        }
    }

    #[must_use]
    pub fn with_post_filter(mut self, post_filter: PostFilter) -> Self {
        self.post_filter = post_filter;
        self
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::from_config(&DemoConfig::default())
    }
}

/// What a dispatch did, as seen by its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// `Operator::Default`: nothing shown, nothing committed
    NoOp,
    /// The pipeline completed after `commits` board updates
    Completed { commits: usize },
    /// Teardown interrupted the dispatch
    Cancelled,
    /// The failure was logged and swallowed
    Failed { kind: FailureKind, message: String },
}

pub struct Dispatcher {
    source: DataSource,
    board: PostBoard,
    indicator: Arc<dyn LoadingIndicator>,
    settings: DispatchSettings,
    hot: HotChannels,
    token: CancellationToken,
}

impl Dispatcher {
    pub fn new(
        source: DataSource,
        board: PostBoard,
        indicator: Arc<dyn LoadingIndicator>,
        settings: DispatchSettings,
    ) -> Self {
        let hot = HotChannels::new(settings.replay_buffer_size);
        Self {
            source,
            board,
            indicator,
            settings,
            hot,
            token: CancellationToken::new(),
        }
    }

    pub fn board(&self) -> &PostBoard {
        &self.board
    }

    /// Cumulative dispatch count of a hot flavour.
    pub fn invocations(&self, flavor: HotFlavor) -> u64 {
        self.hot.invocations(flavor)
    }

    pub fn hot_channels(&self) -> &HotChannels {
        &self.hot
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Commits the full post list verbatim: original ids and bodies, no author.
    pub async fn load_initial(&self) -> DispatchOutcome {
        let outcome = async {
            self.ensure_alive()?;
            let posts = self.source.fetch_all_posts(&self.token).await?;
            let rows: Vec<DisplayPost> = posts.into_iter().map(DisplayPost::from).collect();
            self.board.commit(rows)?;
            Ok::<_, DemoError>(1)
        }
        .await;

        self.conclude("initial-load", outcome)
    }

    /// Runs `operator` and commits its output.
    pub async fn dispatch(&self, operator: Operator) -> DispatchOutcome {
        if operator == Operator::Default {
            debug!("dispatch: default operator, nothing to do");
            return DispatchOutcome::NoOp;
        }

        info!(%operator, "dispatch: started");
        let loading = self
            .indicator
            .show(&self.settings.loading_message, self.settings.loading_duration);

        let outcome = match operator.hot_flavor() {
            Some(flavor) => self.run_hot(flavor).await,
            None => self.run_cold(operator).await,
        };

        loading.dismiss();
        self.conclude(operator.as_str(), outcome)
    }

    /// Cancels in-flight work, completes every subject and closes the board.
    ///
    /// Idempotent.
    pub fn teardown(&self) {
        if self.token.is_cancelled() {
            return;
        }
        info!("dispatcher: teardown");
        self.token.cancel();
        self.hot.close_all();
        self.board.close();
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(DemoError::Lifecycle(SubjectError::Closed));
        }
        Ok(())
    }

    fn pipeline(&self, operator: Operator) -> Producer<Vec<DisplayPost>> {
        let token = self.token.clone();
        match operator {
            Operator::ForkJoin => strategy::fork_join(&self.source, token),
            Operator::Zip => strategy::zip(&self.source, token),
            Operator::CombineLatest => strategy::combine_latest(&self.source, token),
            Operator::Merge => strategy::merge(&self.source, token),
            Operator::Map => strategy::map(&self.source, token),
            Operator::SwitchMap => strategy::switch_map(&self.source, token),
            Operator::Filter => {
                strategy::filter(&self.source, token, Arc::clone(&self.settings.post_filter))
            }
            Operator::TakeUntil => {
                strategy::take_until(&self.source, token, self.settings.take_until_window)
            }
            // Hot flavours never reach here; they publish a fork-join
            Operator::Subject
            | Operator::BehaviorSubject
            | Operator::ReplaySubject
            | Operator::Default => strategy::fork_join(&self.source, token),
        }
    }

    async fn run_cold(&self, operator: Operator) -> Result<usize> {
        self.ensure_alive()?;
        let mut pipeline = self.pipeline(operator).take_until_cancelled(self.token.clone());

        let mut commits = 0;
        while let Some(item) = pipeline.next().await {
            match item {
                StreamItem::Value(rows) => {
                    self.board.commit(rows)?;
                    commits += 1;
                }
                StreamItem::Error(e) => return Err(DemoError::from_stream(e)),
            }
        }

        self.interrupted(operator.as_str())?;
        Ok(commits)
    }

    /// Fetches via fork-join, publishes the batch to the flavour's subject and
    /// commits whatever a fresh subscriber was delivered.
    async fn run_hot(&self, flavor: HotFlavor) -> Result<usize> {
        self.ensure_alive()?;
        let invocation = self.hot.record_invocation(flavor);

        let mut fetch = strategy::fork_join(&self.source, self.token.clone())
            .take_until_cancelled(self.token.clone());
        let rows = match fetch.next().await {
            Some(StreamItem::Value(rows)) => rows,
            Some(StreamItem::Error(e)) => return Err(DemoError::from_stream(e)),
            None => {
                self.interrupted(flavor.as_str())?;
                warn!(%flavor, "dispatch: fetch produced nothing to publish");
                return Ok(0);
            }
        };

        let mut subscriber = self.hot.subscribe(flavor)?;
        self.hot.publish(flavor, HotBatch { invocation, rows })?;

        let mut commits = 0;
        // Everything due to this subscriber is already queued
        while let Some(Some(item)) = subscriber.next().now_or_never() {
            match item {
                StreamItem::Value(batch) => {
                    debug!(%flavor, invocation = batch.invocation, "dispatch: delivered batch");
                    self.board.commit(batch.rows)?;
                    commits += 1;
                }
                StreamItem::Error(e) => return Err(DemoError::from_stream(e)),
            }
        }
        Ok(commits)
    }

    fn interrupted(&self, context: &str) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(DemoError::Stream(RivuletError::cancelled(context.to_string())));
        }
        Ok(())
    }

    fn conclude(&self, context: &str, outcome: Result<usize>) -> DispatchOutcome {
        match outcome {
            Ok(commits) => {
                info!(operator = context, commits, "dispatch: finished");
                DispatchOutcome::Completed { commits }
            }
            Err(e) if e.kind() == FailureKind::Cancelled => {
                warn!(operator = context, "dispatch: cancelled");
                DispatchOutcome::Cancelled
            }
            Err(e) => {
                error!(operator = context, error = %e, "dispatch: failed");
                DispatchOutcome::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        }
    }
}
