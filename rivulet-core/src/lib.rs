// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod cancellation_token;
pub mod error;
pub mod stream_item;
pub mod subject;
pub mod subject_error;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{IntoRivuletError, Result, ResultExt, RivuletError};
pub use self::stream_item::StreamItem;
pub use self::subject::{
    BehaviorSubject, Broadcast, ReplaySubject, RingBuffer, Subject, SubjectStream,
};
pub use self::subject_error::SubjectError;
