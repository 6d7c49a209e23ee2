// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Upstream data: the user record and the post lists.
//!
//! [`DataSource`] turns a [`JsonFetcher`] into cold, cancellable producers. Each
//! producer performs one GET when polled, emits one value and completes.

mod http;

pub use http::HttpFetcher;

use crate::error::{DemoError, SourceError};
use crate::model::{Post, User};
use async_trait::async_trait;
use rivulet_core::CancellationToken;
use rivulet_stream::producer::{self, Producer};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

const ALL_POSTS_PATH: &str = "/posts";

/// Performs a GET for `path` (relative to some base URL) and returns the JSON body.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, SourceError>;
}

/// Producers for the endpoints the dispatcher combines.
#[derive(Clone)]
pub struct DataSource {
    fetcher: Arc<dyn JsonFetcher>,
    user_id: u64,
}

impl DataSource {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, user_id: u64) -> Self {
        Self { fetcher, user_id }
    }

    pub fn user_path(&self) -> String {
        format!("/users/{}", self.user_id)
    }

    pub fn posts_path(&self) -> String {
        posts_for_user_path(self.user_id)
    }

    /// Every post, unfiltered.
    pub async fn fetch_all_posts(&self, token: &CancellationToken) -> Result<Vec<Post>, DemoError> {
        let body = self.fetch_json(ALL_POSTS_PATH, token).await?;
        decode(body, ALL_POSTS_PATH)
    }

    /// One GET, abandoned when `token` is cancelled.
    pub async fn fetch_json(&self, path: &str, token: &CancellationToken) -> Result<Value, SourceError> {
        match token.run_until_cancelled(self.fetcher.get_json(path)).await {
            Some(result) => result,
            None => Err(SourceError::Cancelled {
                path: path.to_string(),
            }),
        }
    }

    /// Raw `/users/{id}` body.
    pub fn user_raw(&self, token: CancellationToken) -> Producer<Value> {
        self.raw(self.user_path(), token)
    }

    /// Raw `/posts?userId={id}` body.
    pub fn posts_raw(&self, token: CancellationToken) -> Producer<Value> {
        self.raw(self.posts_path(), token)
    }

    pub fn user(&self, token: CancellationToken) -> Producer<User> {
        self.typed(self.user_path(), token)
    }

    pub fn posts(&self, token: CancellationToken) -> Producer<Vec<Post>> {
        self.typed(self.posts_path(), token)
    }

    /// Posts of an arbitrary user, for dependent lookups.
    pub fn posts_for_user(&self, user_id: u64, token: CancellationToken) -> Producer<Vec<Post>> {
        self.typed(posts_for_user_path(user_id), token)
    }

    fn raw(&self, path: String, token: CancellationToken) -> Producer<Value> {
        let fetcher = Arc::clone(&self.fetcher);
        let context = format!("GET {path}");
        producer::cancellable(token, context, async move {
            fetcher
                .get_json(&path)
                .await
                .map_err(|e| DemoError::from(e).into_stream())
        })
    }

    fn typed<T>(&self, path: String, token: CancellationToken) -> Producer<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let fetcher = Arc::clone(&self.fetcher);
        let context = format!("GET {path}");
        producer::cancellable(token, context, async move {
            let body = fetcher
                .get_json(&path)
                .await
                .map_err(|e| DemoError::from(e).into_stream())?;
            decode(body, &path).map_err(DemoError::into_stream)
        })
    }
}

fn posts_for_user_path(user_id: u64) -> String {
    format!("/posts?userId={user_id}")
}

/// Deserializes `value`, reporting a mapping failure against `context`.
pub fn decode<T: DeserializeOwned>(value: Value, context: &str) -> Result<T, DemoError> {
    serde_json::from_value(value).map_err(|e| DemoError::mapping(context, e))
}
