// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{CancellationToken, RivuletError, StreamItem};
use rivulet_stream::producer;
use std::time::Duration;

#[tokio::test]
async fn of_emits_the_whole_collection_once() {
    let items: Vec<_> = producer::of(vec![1, 2, 3]).collect().await;

    assert_eq!(items, vec![StreamItem::Value(vec![1, 2, 3])]);
}

#[tokio::test]
async fn from_iter_emits_each_element() {
    let items: Vec<_> = producer::from_iter(vec![1, 2, 3]).collect().await;

    assert_eq!(
        items,
        vec![
            StreamItem::Value(1),
            StreamItem::Value(2),
            StreamItem::Value(3)
        ]
    );
}

#[tokio::test]
async fn producers_are_cold() -> anyhow::Result<()> {
    // Arrange
    let counter = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let seen = counter.clone();

    // Act
    let stream = producer::from_future(async move {
        seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(1)
    });

    // Assert
    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 0);
    let items: Vec<_> = stream.collect().await;
    assert_eq!(items, vec![StreamItem::Value(1)]);
    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn from_future_emits_failure_as_error_item() {
    let mut stream =
        producer::from_future::<i32, _>(async { Err(RivuletError::stream_error("offline")) });

    assert!(matches!(stream.next().await, Some(StreamItem::Error(_))));
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn cancellable_emits_cancelled_when_token_fires() {
    // Arrange
    let token = CancellationToken::new();
    let mut stream = producer::cancellable(token.clone(), "fetch user", async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(1)
    });

    // Act
    token.cancel();

    // Assert
    match stream.next().await {
        Some(StreamItem::Error(e)) => assert!(e.is_cancelled()),
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn cancellable_completes_normally_when_not_cancelled() {
    let token = CancellationToken::new();

    let items: Vec<_> = producer::cancellable(token, "fetch", async { Ok("user") })
        .collect()
        .await;

    assert_eq!(items, vec![StreamItem::Value("user")]);
}

#[cfg(feature = "runtime-tokio")]
#[tokio::test]
async fn timer_emits_once_after_duration() {
    let started = tokio::time::Instant::now();

    let items: Vec<_> = producer::timer(Duration::from_millis(20)).collect().await;

    assert_eq!(items, vec![StreamItem::Value(())]);
    assert!(started.elapsed() >= Duration::from_millis(20));
}
