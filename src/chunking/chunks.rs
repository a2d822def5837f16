//! Fixed-size slice chunking.
//!
//! Splits a slice into consecutive sub-slices of the same length, with a
//! shorter final chunk when the length does not divide evenly.

use crate::error::{ChunkingError, Result};
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Lazy iterator over fixed-size chunks of a slice.
///
/// Created by [`chunks`]. Chunks borrow from the input and are yielded in
/// order. Cloning a fresh iterator, or calling [`chunks`] again on the same
/// slice, starts over from the first chunk; a partially consumed iterator
/// does not rewind.
///
/// # Examples
///
/// ```
/// use flow_helpers::chunking::chunks;
///
/// let items = [1, 2, 3, 4, 5];
/// let batches: Vec<&[i32]> = chunks(&items, 2).unwrap().collect();
/// assert_eq!(batches, vec![&[1, 2][..], &[3, 4], &[5]]);
/// ```
#[derive(Debug)]
pub struct Chunks<'a, T> {
    inner: std::slice::Chunks<'a, T>,
    chunk_size: NonZeroUsize,
}

// Manual impl: chunks only borrow, so `T` need not be `Clone`
impl<T> Clone for Chunks<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            chunk_size: self.chunk_size,
        }
    }
}

impl<'a, T> Chunks<'a, T> {
    /// Creates a chunk iterator with an already validated size.
    #[must_use]
    pub fn new(items: &'a [T], chunk_size: NonZeroUsize) -> Self {
        Self {
            inner: items.chunks(chunk_size.get()),
            chunk_size,
        }
    }

    /// Returns the configured chunk size.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size.get()
    }
}

impl<'a, T> Iterator for Chunks<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn count(self) -> usize {
        self.inner.count()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n)
    }

    fn last(self) -> Option<Self::Item> {
        self.inner.last()
    }
}

impl<T> DoubleEndedIterator for Chunks<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Chunks<'_, T> {}

impl<T> FusedIterator for Chunks<'_, T> {}

/// Yields successive chunks of `chunk_size` items from `items`.
///
/// # Errors
///
/// Returns [`ChunkingError::InvalidChunkSize`] if `chunk_size` is zero.
pub fn chunks<T>(items: &[T], chunk_size: usize) -> Result<Chunks<'_, T>> {
    let size = NonZeroUsize::new(chunk_size).ok_or(ChunkingError::InvalidChunkSize { size: 0 })?;
    Ok(Chunks::new(items, size))
}

/// Checks a chunk size that arrived as a signed number (CLI, config files).
///
/// # Errors
///
/// Returns [`ChunkingError::InvalidChunkSize`] for zero or negative sizes.
pub fn checked_chunk_size(size: i64) -> Result<NonZeroUsize> {
    usize::try_from(size)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ChunkingError::InvalidChunkSize { size }.into())
}
