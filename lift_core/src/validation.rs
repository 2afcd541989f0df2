//! Reps input validation.
//!
//! Inputs are all-or-nothing: either every set parses, or the caller gets
//! the exact indices to mark.

use std::collections::BTreeSet;

/// Indices of blank or unparsable reps inputs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSets(pub BTreeSet<usize>);

/// Parse one reps input. Fractions are truncated, negatives rejected.
pub fn parse_reps(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(reps) = trimmed.parse::<u32>() {
        return Some(reps);
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value.trunc() as u32)
}

/// Validate the reps inputs of an exercise with `expected` sets.
///
/// Inputs missing past the end of `inputs` count as blank.
pub fn validate_reps<S: AsRef<str>>(
    expected: usize,
    inputs: &[S],
) -> Result<Vec<u32>, InvalidSets> {
    let mut reps = Vec::with_capacity(expected);
    let mut invalid = BTreeSet::new();

    for index in 0..expected {
        match inputs.get(index).and_then(|input| parse_reps(input.as_ref())) {
            Some(value) => reps.push(value),
            None => {
                invalid.insert(index);
            }
        }
    }

    if invalid.is_empty() {
        Ok(reps)
    } else {
        Err(InvalidSets(invalid))
    }
}
