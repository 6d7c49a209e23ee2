// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rivulet_demo::{
    DataSource, DispatchSettings, Dispatcher, JsonFetcher, LoadingHandle, LoadingIndicator,
    PostBoard, SourceError,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Clone)]
enum Reply {
    Json(Value),
    Status(u16),
}

struct Route {
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

/// In-memory [`JsonFetcher`] answering from a fixed routing table.
///
/// A gated route waits for its `Notify` before answering, so tests control the
/// order in which responses arrive.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, path: &str, body: Value) -> Self {
        self.route(path, Reply::Json(body), None)
    }

    pub fn status(self, path: &str, status: u16) -> Self {
        self.route(path, Reply::Status(status), None)
    }

    /// Answers `path` with `body` once the returned gate is notified.
    pub fn gated_json(self, path: &str, body: Value) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (self.route(path, Reply::Json(body), Some(gate.clone())), gate)
    }

    fn route(self, path: &str, reply: Reply, gate: Option<Arc<Notify>>) -> Self {
        self.routes
            .lock()
            .insert(path.to_string(), Route { reply, gate });
        self
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl JsonFetcher for ScriptedFetcher {
    async fn get_json(&self, path: &str) -> Result<Value, SourceError> {
        self.requests.lock().push(path.to_string());

        let (reply, gate) = {
            let routes = self.routes.lock();
            match routes.get(path) {
                Some(route) => (route.reply.clone(), route.gate.clone()),
                None => (Reply::Status(404), None),
            }
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        match reply {
            Reply::Json(body) => Ok(body),
            Reply::Status(status) => Err(SourceError::Status {
                path: path.to_string(),
                status,
            }),
        }
    }
}

/// Counts how often the indicator was shown and dismissed.
#[derive(Default)]
pub struct RecordingIndicator {
    pub shown: Arc<AtomicUsize>,
    pub dismissed: Arc<AtomicUsize>,
}

impl RecordingIndicator {
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    pub fn dismissed(&self) -> usize {
        self.dismissed.load(Ordering::SeqCst)
    }
}

impl LoadingIndicator for RecordingIndicator {
    fn show(&self, _message: &str, _duration: Duration) -> LoadingHandle {
        self.shown.fetch_add(1, Ordering::SeqCst);
        let dismissed = self.dismissed.clone();
        LoadingHandle::new(move || {
            dismissed.fetch_add(1, Ordering::SeqCst);
        })
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub fetcher: Arc<ScriptedFetcher>,
    pub indicator: Arc<RecordingIndicator>,
}

pub fn harness(fetcher: ScriptedFetcher) -> Harness {
    harness_with(fetcher, DispatchSettings::default())
}

pub fn harness_with(fetcher: ScriptedFetcher, settings: DispatchSettings) -> Harness {
    let fetcher = Arc::new(fetcher);
    let indicator = Arc::new(RecordingIndicator::default());
    let source = DataSource::new(fetcher.clone(), 1);
    let dispatcher = Dispatcher::new(source, PostBoard::new(), indicator.clone(), settings);
    Harness {
        dispatcher,
        fetcher,
        indicator,
    }
}

/// Routes for user 1 and that user's posts.
pub fn leanne_with_posts(posts: Value) -> ScriptedFetcher {
    ScriptedFetcher::new()
        .json("/users/1", rivulet_test_utils::fixtures::user_leanne())
        .json("/posts?userId=1", posts)
}
