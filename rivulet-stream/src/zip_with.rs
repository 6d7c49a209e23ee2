// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing the `zip_with` operator.
pub trait ZipWithExt<A>: Stream<Item = StreamItem<A>> + Sized {
    /// Pairs the i-th value of this stream with the i-th value of `other`.
    ///
    /// Completes as soon as either side completes with no value waiting to be
    /// paired. The first error from either side is emitted and ends the stream.
    ///
    /// With single-shot sources this behaves like
    /// [`fork_join`](crate::ForkJoinExt::fork_join).
    fn zip_with<B, S>(self, other: S) -> ZipWith<Self, S, A, B>
    where
        S: Stream<Item = StreamItem<B>>;
}

impl<A, P> ZipWithExt<A> for P
where
    P: Stream<Item = StreamItem<A>>,
{
    fn zip_with<B, S>(self, other: S) -> ZipWith<Self, S, A, B>
    where
        S: Stream<Item = StreamItem<B>>,
    {
        ZipWith {
            left: self,
            right: other,
            queued_left: None,
            queued_right: None,
            is_done: false,
        }
    }
}

/// Stream returned by [`ZipWithExt::zip_with`].
#[pin_project]
pub struct ZipWith<L, R, A, B> {
    #[pin]
    left: L,
    #[pin]
    right: R,
    queued_left: Option<A>,
    queued_right: Option<B>,
    is_done: bool,
}

impl<L, R, A, B> Stream for ZipWith<L, R, A, B>
where
    L: Stream<Item = StreamItem<A>>,
    R: Stream<Item = StreamItem<B>>,
{
    type Item = StreamItem<(A, B)>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.is_done {
            return Poll::Ready(None);
        }

        if this.queued_left.is_none() {
            match this.left.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(a))) => *this.queued_left = Some(a),
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    *this.is_done = true;
                    return Poll::Ready(Some(StreamItem::Error(e)));
                }
                Poll::Ready(None) => {
                    *this.is_done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => {}
            }
        }

        if this.queued_right.is_none() {
            match this.right.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(b))) => *this.queued_right = Some(b),
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    *this.is_done = true;
                    return Poll::Ready(Some(StreamItem::Error(e)));
                }
                Poll::Ready(None) => {
                    *this.is_done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => {}
            }
        }

        match (this.queued_left.take(), this.queued_right.take()) {
            (Some(a), Some(b)) => Poll::Ready(Some(StreamItem::Value((a, b)))),
            (a, b) => {
                // One side is still pending and has registered the waker
                *this.queued_left = a;
                *this.queued_right = b;
                Poll::Pending
            }
        }
    }
}
