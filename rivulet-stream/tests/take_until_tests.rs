// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{CancellationToken, StreamItem};
use rivulet_stream::{producer, TakeUntilExt};
use rivulet_test_utils::{next_value, test_channel};
use std::time::Duration;

#[tokio::test]
async fn forwards_until_notifier_emits() {
    // Arrange
    let (tx_source, source) = test_channel();
    let (tx_notifier, notifier) = test_channel::<()>();
    let mut taken = source.take_until_notified(notifier);

    // Act
    tx_source.send(1).unwrap();
    assert_eq!(next_value(&mut taken).await, 1);
    tx_notifier.send(()).unwrap();
    tx_source.send(2).unwrap();

    // Assert
    assert_eq!(taken.next().await, None);
    assert!(taken.is_terminated());
}

#[tokio::test]
async fn notifier_wins_over_queued_source_items() {
    // Arrange
    let (tx_source, source) = test_channel();
    let (tx_notifier, notifier) = test_channel::<()>();
    let mut taken = source.take_until_notified(notifier);

    // Act
    tx_source.send(1).unwrap();
    tx_notifier.send(()).unwrap();

    // Assert
    assert_eq!(taken.next().await, None);
}

#[tokio::test]
async fn notifier_completing_without_emitting_is_ignored() {
    // Arrange
    let (tx_source, source) = test_channel();
    let mut taken = source.take_until_notified(futures::stream::empty::<()>());

    // Act
    tx_source.send(1).unwrap();
    drop(tx_source);

    // Assert
    assert_eq!(next_value(&mut taken).await, 1);
    assert_eq!(taken.next().await, None);
}

#[cfg(feature = "runtime-tokio")]
#[tokio::test]
async fn timer_notifier_cuts_off_a_silent_source() {
    let taken = futures::stream::pending::<StreamItem<i32>>()
        .take_until_notified(producer::timer(Duration::from_millis(20)));

    let items: Vec<_> = tokio::time::timeout(Duration::from_secs(1), taken.collect())
        .await
        .unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn cancelled_token_stops_forwarding() {
    // Arrange
    let token = CancellationToken::new();
    let (tx_source, source) = test_channel();
    let mut taken = source.take_until_cancelled(token.clone());

    // Act
    tx_source.send(1).unwrap();
    assert_eq!(next_value(&mut taken).await, 1);
    token.cancel();
    tx_source.send(2).unwrap();

    // Assert
    assert_eq!(taken.next().await, None);
}

#[tokio::test]
async fn chains_with_futures_take_until_in_scope() {
    // Arrange
    let (tx_source, source) = test_channel();
    let token = CancellationToken::new();
    let stop = token.clone();
    let mut taken = source
        .take_until_notified(futures::stream::pending::<()>())
        .take_until(Box::pin(async move { stop.cancelled().await }));

    // Act
    tx_source.send(1).unwrap();
    assert_eq!(next_value(&mut taken).await, 1);
    token.cancel();
    tx_source.send(2).unwrap();

    // Assert
    assert_eq!(taken.next().await, None);
}
