// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{IntoRivuletError, ResultExt, RivuletError, StreamItem};
use std::io;

#[test]
fn stream_error_displays_context() {
    let error = RivuletError::stream_error("not ready");
    assert_eq!(error.to_string(), "Stream processing error: not ready");
}

#[test]
fn cancelled_is_distinguishable_from_failure() {
    assert!(RivuletError::cancelled("fetch").is_cancelled());
    assert!(!RivuletError::stream_error("fetch").is_cancelled());
}

#[test]
fn foreign_errors_become_user_errors() {
    let error = io::Error::new(io::ErrorKind::Other, "disk").into_rivulet();
    assert!(matches!(error, RivuletError::UserError(_)));
    assert_eq!(error.to_string(), "User error: disk");
}

#[test]
fn clone_keeps_user_error_message() {
    let error = io::Error::new(io::ErrorKind::Other, "disk").into_rivulet();
    let cloned = error.clone();
    assert_eq!(cloned.to_string(), "Stream processing error: User error: disk");
}

#[test]
fn context_wraps_user_errors() {
    let result: Result<(), RivuletError> = Err(RivuletError::user_error(io::Error::new(
        io::ErrorKind::Other,
        "timeout",
    )));

    let error = result.context("loading posts").unwrap_err();

    assert_eq!(
        error.to_string(),
        "Stream processing error: loading posts: timeout"
    );
}

#[test]
fn context_leaves_cancellation_untouched() {
    let result: Result<(), RivuletError> = Err(RivuletError::cancelled("fetch"));

    let error = result.with_context(|| "ignored".to_string()).unwrap_err();

    assert!(error.is_cancelled());
}

#[test]
fn stream_item_accessors() {
    let value: StreamItem<i32> = StreamItem::Value(5);
    let error: StreamItem<i32> = StreamItem::Error(RivuletError::stream_error("x"));

    assert!(value.is_value());
    assert!(error.is_error());
    assert_eq!(value.clone().map(|v| v * 2).ok(), Some(10));
    assert!(error.clone().map(|v| v * 2).is_error());
    assert_ne!(error.clone(), error);
}

#[test]
fn stream_item_result_conversions() {
    let item: StreamItem<i32> = Ok(3).into();
    assert_eq!(item, StreamItem::Value(3));

    let result: Result<i32, RivuletError> = StreamItem::Error(RivuletError::cancelled("x")).into();
    assert!(result.is_err_and(|e| e.is_cancelled()));
}
