// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Producers and combination operators over [`StreamItem`](rivulet_core::StreamItem) streams.
//!
//! Every operator is provided via an extension trait, so they chain on any
//! `Stream<Item = StreamItem<T>>`:
//!
//! ```rust
//! use rivulet_stream::{producer, MapValueExt, ForkJoinExt};
//! use rivulet_core::StreamItem;
//! use futures::StreamExt;
//!
//! # async fn example() {
//! let doubled = producer::from_iter([1, 2, 3]).map_value(|x| x * 2);
//! let mut joined = doubled.fork_join(producer::of("done"));
//!
//! assert_eq!(joined.next().await, Some(StreamItem::Value((6, "done"))));
//! # }
//! ```
//!
//! ## Operator Categories
//!
//! ### Combination Operators
//!
//! - **[`fork_join`](ForkJoinExt::fork_join)**: One pair of last values once both sources complete
//! - **[`zip_with`](ZipWithExt::zip_with)**: Pairs emissions positionally
//! - **[`combine_latest`](CombineLatestExt::combine_latest)**: Latest pair on every emission once both have emitted
//! - **[`merge`](MergeExt::merge)**: Interleaves emissions in arrival order
//!
//! ### Transformation Operators
//!
//! - **[`map_value`](MapValueExt::map_value)**: Maps values, passing errors through
//! - **[`switch_map`](SwitchMapExt::switch_map)**: Maps to inner streams, cancelling the previous one
//! - **[`collect_values`](CollectValuesExt::collect_values)**: Gathers all values into one `Vec`
//!
//! ### Filtering Operators
//!
//! - **[`filter_value`](FilterValueExt::filter_value)**: Drops values failing a predicate
//! - **[`take_until_notified`](TakeUntilExt::take_until_notified)**: Forwards until a notifier emits
//!
//! # Error Semantics
//!
//! Errors travel as `StreamItem::Error`. Combination operators emit the first error
//! they see and complete; `map_value` and `filter_value` pass errors through.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;
mod terminate_on_error;

pub mod collect_values;
pub mod combine_latest;
pub mod filter_value;
pub mod fork_join;
pub mod map_value;
pub mod merge;
pub mod producer;
pub mod switch_map;
pub mod take_until;
pub mod zip_with;

pub use self::collect_values::CollectValuesExt;
pub use self::combine_latest::CombineLatestExt;
pub use self::filter_value::{FilterValue, FilterValueExt};
pub use self::fork_join::ForkJoinExt;
pub use self::map_value::{MapValue, MapValueExt};
pub use self::merge::MergeExt;
pub use self::producer::Producer;
pub use self::switch_map::{SwitchMap, SwitchMapExt};
pub use self::take_until::{TakeUntil, TakeUntilExt};
pub use self::zip_with::{ZipWith, ZipWithExt};
