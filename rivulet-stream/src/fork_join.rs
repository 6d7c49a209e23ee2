// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::future::{ready, try_join};
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use rivulet_core::{Result, StreamItem};
use std::pin::pin;

/// Extension trait providing the `fork_join` operator.
pub trait ForkJoinExt<A>: Stream<Item = StreamItem<A>> + Sized {
    /// Waits for both streams to complete, then emits one pair of their last values.
    ///
    /// # Behavior
    ///
    /// - Exactly one `(A, B)` pair is emitted, after both sources complete
    /// - If either source completes without emitting, nothing is emitted
    /// - If either source never completes, nothing is emitted
    /// - The first error from either source is emitted and the other source is dropped
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet_stream::{producer, ForkJoinExt};
    /// use rivulet_core::StreamItem;
    /// use futures::StreamExt;
    ///
    /// # async fn example() {
    /// let mut joined = producer::from_iter([1, 2]).fork_join(producer::of("user"));
    /// assert_eq!(joined.next().await, Some(StreamItem::Value((2, "user"))));
    /// assert_eq!(joined.next().await, None);
    /// # }
    /// ```
    fn fork_join<B, S>(self, other: S) -> BoxStream<'static, StreamItem<(A, B)>>
    where
        B: Send + 'static,
        S: Stream<Item = StreamItem<B>> + Send + 'static;
}

impl<A, P> ForkJoinExt<A> for P
where
    P: Stream<Item = StreamItem<A>> + Send + 'static,
    A: Send + 'static,
{
    fn fork_join<B, S>(self, other: S) -> BoxStream<'static, StreamItem<(A, B)>>
    where
        B: Send + 'static,
        S: Stream<Item = StreamItem<B>> + Send + 'static,
    {
        stream::once(try_join(last_value(self), last_value(other)))
            .filter_map(|outcome| {
                ready(match outcome {
                    Ok((Some(a), Some(b))) => Some(StreamItem::Value((a, b))),
                    Ok(_) => {
                        warn!("fork_join: a source completed without emitting");
                        None
                    }
                    Err(e) => Some(StreamItem::Error(e)),
                })
            })
            .boxed()
    }
}

/// Drains `stream`, keeping only its last value. Stops at the first error.
async fn last_value<T, S>(stream: S) -> Result<Option<T>>
where
    S: Stream<Item = StreamItem<T>>,
{
    let mut stream = pin!(stream);
    let mut last = None;
    while let Some(item) = stream.next().await {
        match item {
            StreamItem::Value(value) => last = Some(value),
            StreamItem::Error(e) => return Err(e),
        }
    }
    Ok(last)
}
