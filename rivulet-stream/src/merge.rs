// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::terminate_on_error::TerminateOnError;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;

/// Extension trait providing the `merge` operator.
pub trait MergeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Interleaves emissions of both streams in arrival order.
    ///
    /// Completes when both streams complete. The first error from either side is
    /// emitted and ends the stream.
    fn merge<S>(self, other: S) -> BoxStream<'static, StreamItem<T>>
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static;
}

impl<T, P> MergeExt<T> for P
where
    P: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    fn merge<S>(self, other: S) -> BoxStream<'static, StreamItem<T>>
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        TerminateOnError::new(stream::select(self, other)).boxed()
    }
}
