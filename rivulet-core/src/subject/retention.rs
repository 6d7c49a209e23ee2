// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::ring_buffer::RingBuffer;

/// What a [`Broadcast`](super::Broadcast) remembers for late subscribers.
///
/// `record` sees every value sent through the subject, whether or not anyone is
/// subscribed. `replay` returns what a new subscriber receives before any later
/// emission, oldest first.
pub trait Retention<T>: Send + 'static {
    fn record(&mut self, value: &T);

    fn replay(&self) -> Vec<T>;
}

/// Retains nothing. Late subscribers only see values sent after they subscribed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Forget;

impl<T> Retention<T> for Forget {
    fn record(&mut self, _value: &T) {}

    fn replay(&self) -> Vec<T> {
        Vec::new()
    }
}

/// Single-slot cell holding the most recent value, seeded at construction.
#[derive(Debug, Clone)]
pub struct LatestValue<T> {
    value: T,
}

impl<T> LatestValue<T> {
    pub fn new(seed: T) -> Self {
        Self { value: seed }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: Clone + Send + 'static> Retention<T> for LatestValue<T> {
    fn record(&mut self, value: &T) {
        self.value = value.clone();
    }

    fn replay(&self) -> Vec<T> {
        vec![self.value.clone()]
    }
}

impl<T: Clone + Send + 'static> Retention<T> for RingBuffer<T> {
    fn record(&mut self, value: &T) {
        self.push(value.clone());
    }

    fn replay(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}
