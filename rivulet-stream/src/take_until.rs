// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use rivulet_core::CancellationToken;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing the `take_until_notified` operator.
///
/// Not to be confused with `futures::StreamExt::take_until`, which takes a future.
pub trait TakeUntilExt: Stream + Sized {
    /// Forwards items until `notifier` emits, then drops the source and completes.
    ///
    /// The notifier is checked before the source on every poll, so once it has
    /// emitted no further source item is forwarded. Any notifier item counts,
    /// including an error. A notifier that completes without emitting is ignored.
    fn take_until_notified<N>(self, notifier: N) -> TakeUntil<Self, N>
    where
        N: Stream;

    /// [`take_until_notified`](Self::take_until_notified) driven by a cancellation token.
    fn take_until_cancelled(self, token: CancellationToken) -> TakeUntil<Self, BoxStream<'static, ()>> {
        let notifier = stream::once(async move { token.cancelled().await }).boxed();
        self.take_until_notified(notifier)
    }
}

impl<P: Stream> TakeUntilExt for P {
    fn take_until_notified<N>(self, notifier: N) -> TakeUntil<Self, N>
    where
        N: Stream,
    {
        TakeUntil {
            source: Some(Box::pin(self)),
            notifier,
            notifier_done: false,
        }
    }
}

/// Stream returned by [`TakeUntilExt::take_until_notified`].
#[pin_project]
pub struct TakeUntil<S, N> {
    source: Option<Pin<Box<S>>>,
    #[pin]
    notifier: N,
    notifier_done: bool,
}

impl<S, N> TakeUntil<S, N> {
    /// Returns `true` once the source has been released.
    pub fn is_terminated(&self) -> bool {
        self.source.is_none()
    }
}

impl<S, N> Stream for TakeUntil<S, N>
where
    S: Stream,
    N: Stream,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if this.source.is_none() {
            return Poll::Ready(None);
        }

        if !*this.notifier_done {
            match this.notifier.poll_next(cx) {
                Poll::Ready(Some(_)) => {
                    info!("take_until: notifier fired, releasing source");
                    *this.source = None;
                    return Poll::Ready(None);
                }
                Poll::Ready(None) => *this.notifier_done = true,
                Poll::Pending => {}
            }
        }

        let Some(source) = this.source.as_mut() else {
            return Poll::Ready(None);
        };

        match source.as_mut().poll_next(cx) {
            Poll::Ready(None) => {
                *this.source = None;
                Poll::Ready(None)
            }
            other => other,
        }
    }
}
