// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::JsonFetcher;
use crate::error::SourceError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// [`JsonFetcher`] over HTTP. Unauthenticated, no retry.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::Http {
                path: base_url.clone(),
                source,
            })?;
        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, path: &str) -> Result<Value, SourceError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "http: GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Http {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|source| SourceError::Http {
            path: path.to_string(),
            source,
        })
    }
}
