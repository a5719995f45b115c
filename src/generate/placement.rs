use rand::Rng;

use crate::error::{ConfigurationError, GenerateError, PlacementError};
use crate::puzzle::{Difficulty, Puzzle, Trace, Value};

/// Writes the numbers `1..=number_count` onto `puzzle` along `trace`.
///
/// 1 goes on the first cell and `number_count` on the last. The numbers in
/// between land near evenly spaced trace indices, pushed off by a random offset
/// that grows with `difficulty`. Indices strictly increase with the number, so
/// the trace itself always solves the puzzle.
pub fn place_checkpoints<R: Rng + ?Sized>(
    puzzle: &mut Puzzle,
    trace: &Trace,
    number_count: usize,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<(), GenerateError> {
    if number_count == 0 {
        return Err(ConfigurationError::NoNumbers.into());
    }
    if number_count > trace.len() {
        return Err(ConfigurationError::TooManyNumbers {
            count: number_count,
            cells: trace.len(),
        }
        .into());
    }
    puzzle.clear();
    let indices = checkpoint_indices(trace.len(), number_count, difficulty, rng)?;
    for (i, &index) in indices.iter().enumerate() {
        puzzle.set_value(trace[index], Some(i as Value + 1));
    }
    Ok(())
}

/// Chooses the trace index of each number, in order
fn checkpoint_indices<R: Rng + ?Sized>(
    len: usize,
    number_count: usize,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Vec<usize>, PlacementError> {
    let mut indices = vec![0];
    if number_count == 1 {
        return Ok(indices);
    }
    let last = len - 1;
    let spacing = last as f64 / (number_count - 1) as f64;
    let amplitude = difficulty.variance_amplitude();
    for k in 2..number_count {
        let value = k as Value;
        let ideal = (k - 1) as f64 * spacing;
        let lower = indices[indices.len() - 1] + 1;
        let upper = if k == number_count - 1 {
            len - 2
        } else {
            ((ideal + spacing / 2.0).floor() as usize).min(len - 2)
        };
        let index = if lower > upper {
            // no room before the next ideal slot, take the first free index
            if lower >= last {
                return Err(PlacementError::new(value));
            }
            lower
        } else {
            let offset = (rng.gen::<f64>() * 2.0 - 1.0) * amplitude * spacing;
            let target = ((ideal + offset).round().max(0.0) as usize).max(lower).min(upper);
            free_index(target, lower, upper, &indices, last).ok_or_else(|| PlacementError::new(value))?
        };
        trace!("Number {} at trace index {} (ideal {:.2})", value, index, ideal);
        indices.push(index);
    }
    indices.push(last);
    Ok(indices)
}

/// The nearest unused index to `target` within `lower..=upper`, scanning forward
/// first and then backward
fn free_index(
    target: usize,
    lower: usize,
    upper: usize,
    used: &[usize],
    last: usize,
) -> Option<usize> {
    let is_free = |i: &usize| *i != last && !used.contains(i);
    (target..=upper)
        .find(is_free)
        .or_else(|| (lower..target).rev().find(is_free))
}
