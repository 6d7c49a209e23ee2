// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Something that can show a transient "loading" state.
pub trait LoadingIndicator: Send + Sync {
    /// Shows `message` for at most `duration`. The returned handle dismisses it.
    fn show(&self, message: &str, duration: Duration) -> LoadingHandle;
}

/// Dismisses a shown indicator, explicitly or when dropped.
///
/// Dismissal runs at most once.
#[must_use = "dropping the handle dismisses the indicator immediately"]
pub struct LoadingHandle {
    on_dismiss: Option<Box<dyn FnOnce() + Send>>,
}

impl LoadingHandle {
    pub fn new(on_dismiss: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_dismiss: Some(Box::new(on_dismiss)),
        }
    }

    /// A handle with nothing to dismiss.
    pub fn noop() -> Self {
        Self { on_dismiss: None }
    }

    pub fn dismiss(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(on_dismiss) = self.on_dismiss.take() {
            on_dismiss();
        }
    }
}

impl Drop for LoadingHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Reports the loading state through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingIndicator;

impl LoadingIndicator for TracingIndicator {
    fn show(&self, message: &str, duration: Duration) -> LoadingHandle {
        info!(text = message, timeout_ms = duration.as_millis() as u64, "loading: shown");
        let shown_at = Instant::now();
        LoadingHandle::new(move || {
            debug!(elapsed_ms = shown_at.elapsed().as_millis() as u64, "loading: dismissed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_handle() -> (LoadingHandle, Arc<AtomicUsize>) {
        let dismissed = Arc::new(AtomicUsize::new(0));
        let counter = dismissed.clone();
        let handle = LoadingHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (handle, dismissed)
    }

    #[test]
    fn explicit_dismiss_runs_once() {
        let (handle, dismissed) = counting_handle();

        handle.dismiss();

        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_dismisses() {
        let (handle, dismissed) = counting_handle();

        drop(handle);

        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
    }
}
