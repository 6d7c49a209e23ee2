// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use rivulet_core::StreamItem;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected emission, expected no output: {item:?}");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Awaits the next item and returns its value, panicking on an error or completion.
pub async fn next_value<S, T>(stream: &mut S) -> T
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match stream.next().await {
        Some(StreamItem::Value(value)) => value,
        Some(StreamItem::Error(e)) => panic!("expected a value, got error: {e}"),
        None => panic!("expected a value, stream completed"),
    }
}

/// Awaits the next item and asserts it is an error.
pub async fn expect_error<S, T>(stream: &mut S)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    let item = stream.next().await;
    assert!(
        matches!(item, Some(StreamItem::Error(_))),
        "expected an error item"
    );
}

/// Awaits completion of the stream, panicking if another item arrives first.
pub async fn expect_completed<S, T>(stream: &mut S)
where
    S: Stream<Item = T> + Unpin,
{
    assert!(stream.next().await.is_none(), "expected the stream to complete");
}
