// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::retention::{Forget, LatestValue, Retention};
use super::ring_buffer::RingBuffer;
use crate::{RivuletError, StreamItem, SubjectError};
use futures::channel::mpsc::{self, UnboundedSender};
use futures::stream::BoxStream;
use parking_lot::Mutex;
use std::sync::Arc;

/// Stream handed to each subscriber of a [`Broadcast`].
pub type SubjectStream<T> = BoxStream<'static, StreamItem<T>>;

struct BroadcastState<T, R> {
    closed: bool,
    senders: Vec<UnboundedSender<StreamItem<T>>>,
    retention: R,
}

/// A hot, unbounded broadcast channel with a pluggable replay policy.
///
/// Every item sent is fanned out to all current subscribers. What a late
/// subscriber receives first is decided by the retention policy `R`; see the
/// [`Subject`], [`BehaviorSubject`] and [`ReplaySubject`] aliases.
///
/// Clones share the same state.
pub struct Broadcast<T, R> {
    state: Arc<Mutex<BroadcastState<T, R>>>,
}

/// Hot subject without replay.
pub type Subject<T> = Broadcast<T, Forget>;

/// Hot subject that hands its current value to every new subscriber.
pub type BehaviorSubject<T> = Broadcast<T, LatestValue<T>>;

/// Hot subject that replays the last N values to every new subscriber.
pub type ReplaySubject<T> = Broadcast<T, RingBuffer<T>>;

impl<T, R> Broadcast<T, R>
where
    T: Clone + Send + 'static,
    R: Retention<T>,
{
    /// Creates an open subject with the given retention policy.
    pub fn with_retention(retention: R) -> Self {
        Self {
            state: Arc::new(Mutex::new(BroadcastState {
                closed: false,
                senders: Vec::new(),
                retention,
            })),
        }
    }

    /// Subscribe and receive a stream of `StreamItem<T>`.
    ///
    /// Retained values are queued on the new stream before it is registered, so
    /// they always precede anything sent afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectStream<T>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = mpsc::unbounded();
        for value in state.retention.replay() {
            // The receiver is still in hand, so this can't be disconnected
            let _ = tx.unbounded_send(StreamItem::Value(value));
        }
        state.senders.push(tx);
        Ok(Box::pin(rx))
    }

    /// Send an item to all active subscribers.
    ///
    /// Values are recorded by the retention policy even when nobody is subscribed.
    /// Subscribers whose stream was dropped are pruned here.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        if let StreamItem::Value(value) = &item {
            state.retention.record(value);
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(item.clone()).is_ok());
        Ok(())
    }

    /// Send a value to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(StreamItem::Value(value))
    }

    /// Send an error to all subscribers and terminate the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject was already closed.
    pub fn error(&self, err: RivuletError) -> Result<(), SubjectError> {
        let result = self.send(StreamItem::Error(err));
        self.close();
        result
    }

    /// Closes the subject, completing all subscriber streams.
    ///
    /// Items already queued are still delivered, then each stream ends. Later
    /// `send`, `error` and `subscribe` calls fail with `SubjectError::Closed`.
    /// Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of registered subscribers.
    ///
    /// Dropped subscribers are pruned lazily on the next `send()`.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + 'static> Broadcast<T, Forget> {
    /// Creates a subject that replays nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_retention(Forget)
    }
}

impl<T: Clone + Send + 'static> Default for Broadcast<T, Forget> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Broadcast<T, LatestValue<T>> {
    /// Creates a behavior subject holding `seed` as its current value.
    pub fn new(seed: T) -> Self {
        Self::with_retention(LatestValue::new(seed))
    }

    /// The current value: the seed, or the last value sent.
    #[must_use]
    pub fn value(&self) -> T {
        self.state.lock().retention.get().clone()
    }
}

impl<T: Clone + Send + 'static> Broadcast<T, RingBuffer<T>> {
    /// Creates a replay subject retaining the last `buffer_size` values.
    #[must_use]
    pub fn new(buffer_size: usize) -> Self {
        Self::with_retention(RingBuffer::with_capacity(buffer_size))
    }

    /// Snapshot of the replay buffer, oldest first.
    #[must_use]
    pub fn buffered(&self) -> Vec<T> {
        self.state.lock().retention.replay()
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.state.lock().retention.capacity()
    }
}

impl<T, R> Clone for Broadcast<T, R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
