// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold-producer basics, independent of the network.

use futures::StreamExt;
use rivulet_core::StreamItem;
use rivulet_stream::producer::{self, Producer};
use rivulet_stream::MapValueExt;
use tracing::info;

/// What the basics showcase observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basics {
    /// 1, 2, 3 mapped ×2
    pub doubled: Vec<i32>,
    /// `of` hands the whole array over as one emission
    pub of_emissions: Vec<Vec<i32>>,
    /// `from_iter` emits one element at a time
    pub from_emissions: Vec<i32>,
}

/// Cold producer emitting 1, 2, 3, then completing.
pub fn one_two_three() -> Producer<i32> {
    producer::from_iter([1, 2, 3])
}

pub async fn run_basics() -> Basics {
    let doubled = values(one_two_three().map_value(|value| value * 2)).await;
    for value in &doubled {
        info!(value, "basics: doubled");
    }

    let array = vec![1, 2, 3];
    let of_emissions = values(producer::of(array.clone())).await;
    for emission in &of_emissions {
        info!(?emission, "basics: of");
    }

    let from_emissions = values(producer::from_iter(array)).await;
    for emission in &from_emissions {
        info!(emission, "basics: from");
    }

    Basics {
        doubled,
        of_emissions,
        from_emissions,
    }
}

async fn values<S, T>(stream: S) -> Vec<T>
where
    S: futures::Stream<Item = StreamItem<T>>,
{
    stream.filter_map(|item| async move { item.ok() }).collect().await
}
