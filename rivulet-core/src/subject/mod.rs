// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subjects.
//!
//! All three flavours share one broadcast primitive and differ only in what a
//! late subscriber receives first:
//!
//! | Flavour              | On subscribe                              |
//! |----------------------|-------------------------------------------|
//! | [`Subject`]          | nothing, only later emissions             |
//! | [`BehaviorSubject`]  | the current value (seed or last sent)     |
//! | [`ReplaySubject`]    | up to N most recent values, oldest first  |
//!
//! Emission is independent of subscribers: values sent with no one listening
//! are lost for a [`Subject`] and retained for the other two.

mod broadcast;
mod retention;
mod ring_buffer;

pub use broadcast::{BehaviorSubject, Broadcast, ReplaySubject, Subject, SubjectStream};
pub use retention::{Forget, LatestValue, Retention};
pub use ring_buffer::RingBuffer;
