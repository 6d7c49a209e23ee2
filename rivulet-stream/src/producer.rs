// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold producers.
//!
//! Nothing runs until the returned stream is polled, and every poll-to-completion
//! is a fresh execution.

use futures::future::ready;
use futures::stream::{self, BoxStream, StreamExt};
use rivulet_core::{CancellationToken, Result, RivuletError, StreamItem};
use std::future::Future;
#[cfg(feature = "runtime-tokio")]
use std::time::Duration;

/// A boxed, sendable stream of `StreamItem<T>`.
pub type Producer<T> = BoxStream<'static, StreamItem<T>>;

/// Emits `value` once, then completes.
///
/// A collection passed here is a single emission; use [`from_iter`] to emit its
/// elements one by one.
pub fn of<T: Send + 'static>(value: T) -> Producer<T> {
    stream::once(ready(StreamItem::Value(value))).boxed()
}

/// Emits each element of `values` in order, then completes.
pub fn from_iter<I>(values: I) -> Producer<I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    stream::iter(values).map(StreamItem::Value).boxed()
}

/// Emits the outcome of `fut` once, then completes.
pub fn from_future<T, F>(fut: F) -> Producer<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    stream::once(fut).map(StreamItem::from).boxed()
}

/// Like [`from_future`], but abandons `fut` when `token` is cancelled.
///
/// On cancellation the producer emits a single [`RivuletError::Cancelled`] naming
/// `context` and completes. A token cancelled before the first poll never starts
/// the work.
pub fn cancellable<T, F>(token: CancellationToken, context: impl Into<String>, fut: F) -> Producer<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    let context = context.into();
    stream::once(async move {
        match token.run_until_cancelled(fut).await {
            Some(result) => StreamItem::from(result),
            None => {
                info!("{context}: cancelled before completion");
                StreamItem::Error(RivuletError::cancelled(context))
            }
        }
    })
    .boxed()
}

/// Emits `()` once after `duration`, then completes.
#[cfg(feature = "runtime-tokio")]
pub fn timer(duration: Duration) -> Producer<()> {
    stream::once(async move {
        tokio::time::sleep(duration).await;
        StreamItem::Value(())
    })
    .boxed()
}
