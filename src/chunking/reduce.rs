//! Chunked reduction.
//!
//! Folds over chunks instead of single items, so callers can batch work
//! against an external limit such as the size of a database `IN` clause.

use crate::chunking::chunks::Chunks;
use std::num::NonZeroUsize;

/// Reduces `items` by passing successive chunks through `f`.
///
/// `f` receives the accumulator and a whole chunk. A `chunk_size` of zero
/// treats the entire input as a single chunk. An empty input returns
/// `initializer` without calling `f`.
///
/// # Examples
///
/// ```
/// use flow_helpers::chunking::reduce_in_chunks;
///
/// let batches = reduce_in_chunks(|acc, _chunk: &[u32]| acc + 1, &[1, 2, 3, 4, 5], 0, 2);
/// assert_eq!(batches, 3);
/// ```
pub fn reduce_in_chunks<T, S, F>(f: F, items: &[T], initializer: S, chunk_size: usize) -> S
where
    F: FnMut(S, &[T]) -> S,
{
    match effective_size(items, chunk_size) {
        Some(size) => Chunks::new(items, size).fold(initializer, f),
        None => initializer,
    }
}

/// Fallible variant of [`reduce_in_chunks`].
///
/// Stops at the first chunk for which `f` fails.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub fn try_reduce_in_chunks<T, S, E, F>(
    mut f: F,
    items: &[T],
    initializer: S,
    chunk_size: usize,
) -> Result<S, E>
where
    F: FnMut(S, &[T]) -> Result<S, E>,
{
    let Some(size) = effective_size(items, chunk_size) else {
        return Ok(initializer);
    };
    let mut acc = initializer;
    for chunk in Chunks::new(items, size) {
        acc = f(acc, chunk)?;
    }
    Ok(acc)
}

/// Resolves the chunk size; `None` means there is nothing to reduce.
fn effective_size<T>(items: &[T], chunk_size: usize) -> Option<NonZeroUsize> {
    if items.is_empty() {
        return None;
    }
    let size = NonZeroUsize::new(chunk_size).or_else(|| NonZeroUsize::new(items.len()));
    if let Some(size) = size {
        tracing::trace!(
            items = items.len(),
            chunk_size = size.get(),
            chunks = items.len().div_ceil(size.get()),
            "reducing in chunks"
        );
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_sums_chunk_lengths() {
        let total = reduce_in_chunks(|acc: usize, chunk: &[i32]| acc + chunk.len(), &[1, 2, 3, 4, 5], 0, 2);
        assert_eq!(total, 5);
    }

    #[test]
    fn test_reduce_receives_whole_chunks() {
        let seen = reduce_in_chunks(
            |mut acc: Vec<Vec<i32>>, chunk: &[i32]| {
                acc.push(chunk.to_vec());
                acc
            },
            &[1, 2, 3, 4, 5],
            Vec::new(),
            2,
        );
        assert_eq!(seen, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_reduce_zero_size_is_single_chunk() {
        let calls = reduce_in_chunks(|acc: u32, _chunk: &[i32]| acc + 1, &[1, 2, 3, 4, 5], 0, 0);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_reduce_empty_returns_initializer() {
        let items: [i32; 0] = [];
        for size in [0, 1, 3, 100] {
            let result = reduce_in_chunks(|_acc, _chunk: &[i32]| -1, &items, 42, size);
            assert_eq!(result, 42);
        }
    }

    #[test]
    fn test_reduce_left_to_right() {
        let joined = reduce_in_chunks(
            |acc: String, chunk: &[&str]| format!("{acc}[{}]", chunk.concat()),
            &["a", "b", "c"],
            String::new(),
            2,
        );
        assert_eq!(joined, "[ab][c]");
    }

    #[test]
    fn test_try_reduce_stops_at_first_error() {
        let mut calls = 0;
        let result: Result<usize, String> = try_reduce_in_chunks(
            |acc, chunk: &[i32]| {
                calls += 1;
                if chunk.contains(&3) {
                    Err(format!("bad chunk {chunk:?}"))
                } else {
                    Ok(acc + chunk.len())
                }
            },
            &[1, 2, 3, 4, 5, 6],
            0,
            2,
        );
        assert_eq!(result, Err("bad chunk [3, 4]".to_string()));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_try_reduce_ok() {
        let result: Result<i32, ()> =
            try_reduce_in_chunks(|acc, chunk: &[i32]| Ok(acc + chunk.iter().sum::<i32>()), &[1, 2, 3], 10, 0);
        assert_eq!(result, Ok(16));
    }

    #[test]
    fn test_try_reduce_empty() {
        let items: [i32; 0] = [];
        let result: Result<&str, ()> = try_reduce_in_chunks(|_, _: &[i32]| Err(()), &items, "init", 2);
        assert_eq!(result, Ok("init"));
    }
}
