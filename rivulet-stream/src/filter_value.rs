// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing the `filter_value` operator.
pub trait FilterValueExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Suppresses values failing `predicate`. Errors always pass through.
    fn filter_value<F>(self, predicate: F) -> FilterValue<Self, F>
    where
        F: FnMut(&T) -> bool;
}

impl<T, P> FilterValueExt<T> for P
where
    P: Stream<Item = StreamItem<T>>,
{
    fn filter_value<F>(self, predicate: F) -> FilterValue<Self, F>
    where
        F: FnMut(&T) -> bool,
    {
        FilterValue {
            stream: self,
            predicate,
        }
    }
}

/// Stream returned by [`FilterValueExt::filter_value`].
#[pin_project]
pub struct FilterValue<S, F> {
    #[pin]
    stream: S,
    predicate: F,
}

impl<S, F, T> Stream for FilterValue<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(&T) -> bool,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    if (this.predicate)(&value) {
                        return Poll::Ready(Some(StreamItem::Value(value)));
                    }
                }
                other => return other,
            }
        }
    }
}
