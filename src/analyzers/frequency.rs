use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use crate::analyzers::types::Distinct;

/// Returns the value that occurs most often.
///
/// When several values share the highest count, the one seen first wins.
/// Empty input gives `None`.
pub fn most_common<T, I>(values: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    let mut values: Vec<T> = values.into_iter().collect();

    let position = {
        let mut counts: HashMap<&T, usize> = HashMap::new();
        for value in &values {
            *counts.entry(value).or_default() += 1;
        }

        let best = counts.values().copied().max()?;
        values.iter().position(|value| counts[value] == best)?
    };

    Some(values.swap_remove(position))
}

/// Sorted distinct non-blank values.
pub fn distinct<'a, I>(values: I) -> Distinct
where
    I: IntoIterator<Item = &'a str>,
{
    let set: BTreeSet<&str> = values
        .into_iter()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();

    let values: Vec<String> = set.into_iter().map(str::to_string).collect();

    Distinct {
        count: values.len(),
        values,
    }
}
