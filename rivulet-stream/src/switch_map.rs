// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use pin_project::{pin_project, pinned_drop};
use rivulet_core::{CancellationToken, StreamItem};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing the `switch_map` operator.
pub trait SwitchMapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Maps each value to an inner stream, forwarding only the most recent one.
    ///
    /// `project` receives the upstream value and a fresh [`CancellationToken`] owned
    /// by the inner stream it builds. When the upstream emits again, that token is
    /// cancelled and the inner stream is dropped before the next one is subscribed.
    /// Dropping the `SwitchMap` cancels the current inner token as well.
    ///
    /// # Behavior
    ///
    /// - Completes once the upstream has completed and the current inner stream is done
    /// - An error from the upstream or the current inner stream is emitted and ends
    ///   the stream
    fn switch_map<U, I, F>(self, project: F) -> SwitchMap<Self, F, U>
    where
        F: FnMut(T, CancellationToken) -> I,
        I: Stream<Item = StreamItem<U>> + Send + 'static;
}

impl<T, P> SwitchMapExt<T> for P
where
    P: Stream<Item = StreamItem<T>>,
{
    fn switch_map<U, I, F>(self, project: F) -> SwitchMap<Self, F, U>
    where
        F: FnMut(T, CancellationToken) -> I,
        I: Stream<Item = StreamItem<U>> + Send + 'static,
    {
        SwitchMap {
            outer: self,
            mapper: project,
            inner: None,
            inner_token: None,
            outer_done: false,
            is_done: false,
        }
    }
}

/// Stream returned by [`SwitchMapExt::switch_map`].
#[pin_project(PinnedDrop)]
pub struct SwitchMap<S, F, U> {
    #[pin]
    outer: S,
    mapper: F,
    inner: Option<BoxStream<'static, StreamItem<U>>>,
    inner_token: Option<CancellationToken>,
    outer_done: bool,
    is_done: bool,
}

impl<S, F, T, U, I> Stream for SwitchMap<S, F, U>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T, CancellationToken) -> I,
    I: Stream<Item = StreamItem<U>> + Send + 'static,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.is_done {
            return Poll::Ready(None);
        }

        loop {
            if !*this.outer_done {
                match this.outer.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(value))) => {
                        if let Some(previous) = this.inner_token.take() {
                            previous.cancel();
                        }
                        *this.inner = None;

                        let token = CancellationToken::new();
                        *this.inner = Some((this.mapper)(value, token.clone()).boxed());
                        *this.inner_token = Some(token);
                        continue;
                    }
                    Poll::Ready(Some(StreamItem::Error(e))) => {
                        if let Some(current) = this.inner_token.take() {
                            current.cancel();
                        }
                        *this.inner = None;
                        *this.is_done = true;
                        return Poll::Ready(Some(StreamItem::Error(e)));
                    }
                    Poll::Ready(None) => *this.outer_done = true,
                    Poll::Pending => {}
                }
            }

            // Reaching here the outer side is either done or has registered the waker
            let Some(inner) = this.inner.as_mut() else {
                return if *this.outer_done {
                    *this.is_done = true;
                    Poll::Ready(None)
                } else {
                    Poll::Pending
                };
            };

            return match inner.poll_next_unpin(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => Poll::Ready(Some(StreamItem::Value(value))),
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    *this.inner = None;
                    *this.inner_token = None;
                    *this.is_done = true;
                    Poll::Ready(Some(StreamItem::Error(e)))
                }
                Poll::Ready(None) => {
                    *this.inner = None;
                    *this.inner_token = None;
                    if *this.outer_done {
                        *this.is_done = true;
                        Poll::Ready(None)
                    } else {
                        Poll::Pending
                    }
                }
                Poll::Pending => Poll::Pending,
            };
        }
    }
}

#[pinned_drop]
impl<S, F, U> PinnedDrop for SwitchMap<S, F, U> {
    fn drop(self: Pin<&mut Self>) {
        if let Some(token) = self.project().inner_token.take() {
            token.cancel();
        }
    }
}
