//! Predicate partitioning.

/// Splits `iterable` into entries for which `pred` is false and entries for
/// which it is true.
///
/// Each side keeps input order and every element lands in exactly one side.
/// The input is consumed in a single pass, so `pred` runs once per element.
///
/// # Examples
///
/// ```
/// use flow_helpers::collections::partition;
///
/// let (odd, even) = partition(|x: &i32| x % 2 == 0, [1, 2, 3, 4, 5]);
/// assert_eq!(odd, vec![1, 3, 5]);
/// assert_eq!(even, vec![2, 4]);
/// ```
pub fn partition<T, I, P>(pred: P, iterable: I) -> (Vec<T>, Vec<T>)
where
    I: IntoIterator<Item = T>,
    P: FnMut(&T) -> bool,
{
    let (matching, rest): (Vec<T>, Vec<T>) = iterable.into_iter().partition(pred);
    (rest, matching)
}
