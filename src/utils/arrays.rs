//! Sequence helpers: set operations, batching, ranges, and list formatting.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::validation;

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Floored mean, or `None` for an empty slice.
pub fn average(numbers: &[f64]) -> Option<f64> {
    if numbers.is_empty() {
        return None;
    }
    let total: f64 = numbers.iter().sum();
    Some((total / numbers.len() as f64).floor())
}

/// Drop the `None`s.
pub fn compact<T>(items: Vec<Option<T>>) -> Vec<T> {
    items.into_iter().flatten().collect()
}

/// Elements of `source` not present in `exclude`, in source order.
pub fn difference<T>(source: &[T], exclude: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let exclude: HashSet<&T> = exclude.iter().collect();
    source
        .iter()
        .filter(|item| !exclude.contains(item))
        .cloned()
        .collect()
}

/// Elements of `first` also present in `second`, in `first` order.
pub fn intersection<T>(first: &[T], second: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let second: HashSet<&T> = second.iter().collect();
    first
        .iter()
        .filter(|item| second.contains(item))
        .cloned()
        .collect()
}

pub fn flatten<T: Clone>(nested: &[Vec<T>]) -> Vec<T> {
    nested.iter().flat_map(|inner| inner.iter().cloned()).collect()
}

/// Join items into prose: `a`, `a and b`, `a, b, and c`.
pub fn format_string_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch<'a, T> {
    /// Offset of the first item of this batch in the source slice.
    pub index: usize,
    pub items: &'a [T],
}

/// Split `items` into consecutive batches of at most `size` items.
pub fn batches<T>(items: &[T], size: usize) -> Result<impl Iterator<Item = Batch<'_, T>>> {
    let size = validation::require_positive(size, "size", "Batch size must be greater than zero")?;
    Ok(items.chunks(size).enumerate().map(move |(n, chunk)| Batch {
        index: n * size,
        items: chunk,
    }))
}

/// Numbers from `start` toward `end` (exclusive) by `step`.
///
/// Negative steps count down. A zero step is rejected.
pub fn range(start: i64, end: i64, step: i64) -> Result<impl Iterator<Item = i64>> {
    if step == 0 {
        return Err(Error::validation_invalid_argument(
            "step",
            "Step cannot be zero.",
            None,
            None,
        ));
    }

    let in_bounds = move |value: &i64| if step > 0 { *value < end } else { *value > end };
    Ok(std::iter::successors(Some(start), move |value| value.checked_add(step))
        .take_while(in_bounds))
}

/// Copy of `items` without any of `values`.
pub fn remove<T>(items: &[T], values: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    difference(items, values)
}

/// Keep the first occurrence of each value, preserving order.
pub fn remove_duplicates<T>(items: Vec<T>) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
