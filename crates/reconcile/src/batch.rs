//! Chunking of update lists to the API's payload limits.

use std::num::NonZeroUsize;

/// Maximum stock updates per `PUT offers/stocks` request.
pub const STOCK_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(2000).unwrap();

/// Maximum price updates per `POST offer-prices/updates` request.
pub const PRICE_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(500).unwrap();

/// Lazy iterator over contiguous chunks of at most `max` items.
#[derive(Debug, Clone)]
pub struct Batches<'a, T> {
    inner: std::slice::Chunks<'a, T>,
}

/// Split `items` into consecutive chunks of at most `max` items.
///
/// The last chunk may be shorter. An empty input yields no chunks.
pub fn batches<T>(items: &[T], max: NonZeroUsize) -> Batches<'_, T> {
    Batches {
        inner: items.chunks(max.get()),
    }
}

impl<'a, T> Iterator for Batches<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Batches<'_, T> {}

impl<T> DoubleEndedIterator for Batches<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> std::iter::FusedIterator for Batches<'_, T> {}
