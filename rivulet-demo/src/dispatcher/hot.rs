// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::model::DisplayPost;
use crate::operator::HotFlavor;
use rivulet_core::{BehaviorSubject, ReplaySubject, Subject, SubjectError, SubjectStream};
use std::sync::atomic::{AtomicU64, Ordering};

/// One published display list, tagged with the dispatch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotBatch {
    /// Invocation number of the producing dispatch; the behavior seed is 0
    pub invocation: u64,
    pub rows: Vec<DisplayPost>,
}

/// The hot subjects and invocation counters that live as long as the dispatcher.
pub struct HotChannels {
    subject: Subject<HotBatch>,
    behavior: BehaviorSubject<HotBatch>,
    replay: ReplaySubject<HotBatch>,
    subject_invocations: AtomicU64,
    behavior_invocations: AtomicU64,
    replay_invocations: AtomicU64,
}

impl HotChannels {
    pub fn new(replay_buffer_size: usize) -> Self {
        Self {
            subject: Subject::new(),
            behavior: BehaviorSubject::new(HotBatch {
                invocation: 0,
                rows: Vec::new(),
            }),
            replay: ReplaySubject::new(replay_buffer_size),
            subject_invocations: AtomicU64::new(0),
            behavior_invocations: AtomicU64::new(0),
            replay_invocations: AtomicU64::new(0),
        }
    }

    fn counter(&self, flavor: HotFlavor) -> &AtomicU64 {
        match flavor {
            HotFlavor::Subject => &self.subject_invocations,
            HotFlavor::Behavior => &self.behavior_invocations,
            HotFlavor::Replay => &self.replay_invocations,
        }
    }

    /// Bumps the counter for `flavor` and returns the new invocation number.
    pub fn record_invocation(&self, flavor: HotFlavor) -> u64 {
        self.counter(flavor).fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Cumulative number of dispatches of `flavor`.
    pub fn invocations(&self, flavor: HotFlavor) -> u64 {
        self.counter(flavor).load(Ordering::SeqCst)
    }

    pub fn subscribe(&self, flavor: HotFlavor) -> Result<SubjectStream<HotBatch>, SubjectError> {
        match flavor {
            HotFlavor::Subject => self.subject.subscribe(),
            HotFlavor::Behavior => self.behavior.subscribe(),
            HotFlavor::Replay => self.replay.subscribe(),
        }
    }

    pub fn publish(&self, flavor: HotFlavor, batch: HotBatch) -> Result<(), SubjectError> {
        match flavor {
            HotFlavor::Subject => self.subject.next(batch),
            HotFlavor::Behavior => self.behavior.next(batch),
            HotFlavor::Replay => self.replay.next(batch),
        }
    }

    /// Completes every subject. Idempotent.
    pub fn close_all(&self) {
        self.subject.close();
        self.behavior.close();
        self.replay.close();
    }
}
