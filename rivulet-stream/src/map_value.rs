// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing the `map_value` operator.
pub trait MapValueExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Transforms each value with `f`. Errors pass through untouched.
    fn map_value<U, F>(self, f: F) -> MapValue<Self, F>
    where
        F: FnMut(T) -> U;
}

impl<T, P> MapValueExt<T> for P
where
    P: Stream<Item = StreamItem<T>>,
{
    fn map_value<U, F>(self, f: F) -> MapValue<Self, F>
    where
        F: FnMut(T) -> U,
    {
        MapValue { stream: self, f }
    }
}

/// Stream returned by [`MapValueExt::map_value`].
#[pin_project]
pub struct MapValue<S, F> {
    #[pin]
    stream: S,
    f: F,
}

impl<S, F, T, U> Stream for MapValue<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> U,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        match this.stream.poll_next(cx) {
            Poll::Ready(Some(item)) => Poll::Ready(Some(item.map(this.f))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
