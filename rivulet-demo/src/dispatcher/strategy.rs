// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One pipeline per cold combination strategy.
//!
//! Each function wires producers from the [`DataSource`] into a stream of
//! complete display lists. Every emitted list is meant to be committed as is.

use crate::error::{DemoError, Result};
use crate::model::{build_display_posts, DisplayPost, Post, User};
use crate::source::{decode, DataSource};
use futures::future::ready;
use futures::stream::{self, StreamExt};
use rivulet_core::{CancellationToken, StreamItem};
use rivulet_stream::producer::{self, Producer};
use rivulet_stream::{
    CollectValuesExt, CombineLatestExt, FilterValueExt, ForkJoinExt, MapValueExt, MergeExt,
    SwitchMapExt, TakeUntilExt, ZipWithExt,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Predicate deciding which posts survive the filter strategy.
pub type PostFilter = Arc<dyn Fn(&Post) -> bool + Send + Sync>;

/// Keeps posts whose title is not blank.
pub fn title_not_blank() -> PostFilter {
    Arc::new(|post: &Post| !post.title.trim().is_empty())
}

pub fn fork_join(source: &DataSource, token: CancellationToken) -> Producer<Vec<DisplayPost>> {
    source
        .user(token.clone())
        .fork_join(source.posts(token))
        .map_value(|(user, posts)| build_display_posts(Some(&user), &posts))
        .boxed()
}

pub fn zip(source: &DataSource, token: CancellationToken) -> Producer<Vec<DisplayPost>> {
    source
        .user(token.clone())
        .zip_with(source.posts(token))
        .map_value(|(user, posts)| build_display_posts(Some(&user), &posts))
        .boxed()
}

pub fn combine_latest(source: &DataSource, token: CancellationToken) -> Producer<Vec<DisplayPost>> {
    source
        .user(token.clone())
        .combine_latest(source.posts(token))
        .map_value(|(user, posts)| build_display_posts(Some(&user), &posts))
        .boxed()
}

/// Interleaves the raw bodies, rebuilding from everything seen so far on each one.
pub fn merge(source: &DataSource, token: CancellationToken) -> Producer<Vec<DisplayPost>> {
    let mut state = MergeState::default();
    source
        .user_raw(token.clone())
        .merge(source.posts_raw(token))
        .map(move |item| {
            item.and_then(|raw| match state.absorb(raw) {
                Ok(rows) => StreamItem::Value(rows),
                Err(e) => StreamItem::Error(e.into_stream()),
            })
        })
        .boxed()
}

/// Posts only; rows carry no author.
pub fn map(source: &DataSource, token: CancellationToken) -> Producer<Vec<DisplayPost>> {
    source
        .posts(token)
        .map_value(|posts| build_display_posts(None, &posts))
        .boxed()
}

/// The user's posts, looked up from the fetched user's id.
pub fn switch_map(source: &DataSource, token: CancellationToken) -> Producer<Vec<DisplayPost>> {
    let lookup = source.clone();
    source
        .user(token)
        .switch_map(move |user: User, inner_token| {
            lookup
                .posts_for_user(user.id, inner_token)
                .map_value(move |posts| build_display_posts(Some(&user), &posts))
        })
        .boxed()
}

/// Posts passing `keep`, joined with the user and re-indexed.
pub fn filter(
    source: &DataSource,
    token: CancellationToken,
    keep: PostFilter,
) -> Producer<Vec<DisplayPost>> {
    let survivors = flatten(source.posts(token.clone()))
        .filter_value(move |post| keep(post))
        .collect_values();

    source
        .user(token)
        .fork_join(survivors)
        .map_value(|(user, posts)| build_display_posts(Some(&user), &posts))
        .boxed()
}

/// Combine-latest, cut off once `window` elapses.
pub fn take_until(
    source: &DataSource,
    token: CancellationToken,
    window: Duration,
) -> Producer<Vec<DisplayPost>> {
    combine_latest(source, token)
        .take_until_notified(producer::timer(window))
        .boxed()
}

/// One emission per post.
fn flatten(posts: Producer<Vec<Post>>) -> Producer<Post> {
    posts
        .flat_map(|item| match item {
            StreamItem::Value(posts) => producer::from_iter(posts),
            StreamItem::Error(e) => stream::once(ready(StreamItem::Error(e))).boxed(),
        })
        .boxed()
}

/// Latest user and post list seen by one merge dispatch.
#[derive(Debug, Default)]
pub struct MergeState {
    user: Option<User>,
    posts: Vec<Post>,
}

impl MergeState {
    /// Classifies `raw` by shape and returns the rebuilt rows.
    ///
    /// An array is taken as the post list and an object as the user record.
    /// Anything else is a mapping failure.
    pub fn absorb(&mut self, raw: Value) -> Result<Vec<DisplayPost>> {
        match raw {
            Value::Array(_) => self.posts = decode(raw, "merge: post list")?,
            Value::Object(_) => self.user = Some(decode(raw, "merge: user")?),
            other => {
                return Err(DemoError::mapping(
                    "merge",
                    format!("expected an object or an array, got {other}"),
                ))
            }
        }
        Ok(build_display_posts(self.user.as_ref(), &self.posts))
    }
}
