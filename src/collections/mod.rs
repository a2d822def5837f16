//! Collection helpers.
//!
//! Recursive mapping merge, predicate partitioning and one-level flattening.

pub mod merge;
pub mod partition;

pub use merge::{merge_dicts, merge_values};
pub use partition::partition;

/// Flattens one level of nesting.
///
/// # Examples
///
/// ```
/// use flow_helpers::collections::as_flattened_list;
///
/// let colors = as_flattened_list([vec!["blue", "red"], vec!["green", "yellow", "pink"]]);
/// assert_eq!(colors, vec!["blue", "red", "green", "yellow", "pink"]);
/// ```
pub fn as_flattened_list<I>(iterable: I) -> Vec<<I::Item as IntoIterator>::Item>
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    iterable.into_iter().flatten().collect()
}
