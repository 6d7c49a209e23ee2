// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;

/// Extension trait providing the `collect_values` operator.
pub trait CollectValuesExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits every value as a single `Vec` once the stream completes.
    ///
    /// An empty source yields an empty `Vec`. An error is emitted in place of the
    /// collection and nothing collected so far is kept.
    fn collect_values(self) -> BoxStream<'static, StreamItem<Vec<T>>>;
}

impl<T, P> CollectValuesExt<T> for P
where
    P: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    fn collect_values(self) -> BoxStream<'static, StreamItem<Vec<T>>> {
        stream::once(async move {
            let mut source = Box::pin(self);
            let mut values = Vec::new();
            while let Some(item) = source.next().await {
                match item {
                    StreamItem::Value(value) => values.push(value),
                    StreamItem::Error(e) => return StreamItem::Error(e),
                }
            }
            StreamItem::Value(values)
        })
        .boxed()
    }
}
