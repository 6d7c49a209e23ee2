// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Forwards items until the first error, which is emitted and ends the stream.
#[pin_project]
pub(crate) struct TerminateOnError<S> {
    #[pin]
    stream: S,
    is_done: bool,
}

impl<S> TerminateOnError<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self {
            stream,
            is_done: false,
        }
    }
}

impl<S, T> Stream for TerminateOnError<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.is_done {
            return Poll::Ready(None);
        }

        match this.stream.poll_next(cx) {
            Poll::Ready(Some(StreamItem::Error(e))) => {
                *this.is_done = true;
                Poll::Ready(Some(StreamItem::Error(e)))
            }
            Poll::Ready(None) => {
                *this.is_done = true;
                Poll::Ready(None)
            }
            other => other,
        }
    }
}
