// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::terminate_on_error::TerminateOnError;
use futures::future::ready;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;

enum Side<A, B> {
    Left(A),
    Right(B),
}

/// Extension trait providing the `combine_latest` operator.
pub trait CombineLatestExt<A>: Stream<Item = StreamItem<A>> + Sized {
    /// Emits the latest pair every time either stream emits, once both have emitted.
    ///
    /// # Behavior
    ///
    /// - Nothing is emitted until both streams have produced a value
    /// - Afterwards each emission is paired with the latest value of the other side
    /// - Completes when both streams complete
    /// - The first error from either side is emitted and ends the stream
    ///
    /// With single-shot sources this behaves like
    /// [`fork_join`](crate::ForkJoinExt::fork_join).
    fn combine_latest<B, S>(self, other: S) -> BoxStream<'static, StreamItem<(A, B)>>
    where
        B: Clone + Send + 'static,
        S: Stream<Item = StreamItem<B>> + Send + 'static;
}

impl<A, P> CombineLatestExt<A> for P
where
    P: Stream<Item = StreamItem<A>> + Send + 'static,
    A: Clone + Send + 'static,
{
    fn combine_latest<B, S>(self, other: S) -> BoxStream<'static, StreamItem<(A, B)>>
    where
        B: Clone + Send + 'static,
        S: Stream<Item = StreamItem<B>> + Send + 'static,
    {
        // Tag each side, keeping errors as-is
        let left = self.map(|item| item.map(Side::<A, B>::Left));
        let right = other.map(|item| item.map(Side::<A, B>::Right));

        let mut latest: (Option<A>, Option<B>) = (None, None);

        let combined = stream::select(left, right).filter_map(move |item| {
            ready(match item {
                StreamItem::Value(side) => {
                    match side {
                        Side::Left(a) => latest.0 = Some(a),
                        Side::Right(b) => latest.1 = Some(b),
                    }
                    match &latest {
                        (Some(a), Some(b)) => Some(StreamItem::Value((a.clone(), b.clone()))),
                        _ => None,
                    }
                }
                StreamItem::Error(e) => Some(StreamItem::Error(e)),
            })
        });

        TerminateOnError::new(combined).boxed()
    }
}
