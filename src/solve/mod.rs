//! Check candidate puzzles for a solution path

pub use self::pathfinding::{connects, connects_with, Reachability, DEFAULT_MAX_SEGMENT_DISTANCE};
pub use self::reconstruct::find_complete_path;
pub use self::search::MAX_SEARCH_STEPS;

mod pathfinding;
mod reconstruct;
mod search;

use serde::Serialize;

use crate::puzzle::Puzzle;

/// What `validate_with` requires of the path between the numbers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// Each pair of consecutive numbers `connects`
    Connectivity,
    /// One path meets the numbers in order and covers every cell
    CompletePath,
}

impl Default for ValidationMode {
    fn default() -> Self {
        ValidationMode::CompletePath
    }
}

/// The outcome of validating a puzzle. An invalid puzzle is a normal result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub has_all_numbers: bool,
    pub has_valid_path: bool,
    pub errors: Vec<String>,
}

/// Checks that every number in `1..=number_count` is present and that a complete
/// path through them exists
pub fn validate(puzzle: &Puzzle, number_count: usize) -> ValidationResult {
    validate_with(puzzle, number_count, ValidationMode::CompletePath)
}

pub fn validate_with(puzzle: &Puzzle, number_count: usize, mode: ValidationMode) -> ValidationResult {
    let mut errors = Vec::new();
    let has_all_numbers = has_all_numbers(puzzle, number_count);
    if !has_all_numbers {
        errors.push(format!(
            "The grid does not contain every number from 1 to {} exactly once",
            number_count
        ));
    }
    let has_valid_path = match mode {
        ValidationMode::Connectivity => numbers_connect(puzzle),
        ValidationMode::CompletePath => find_complete_path(puzzle).is_some(),
    };
    if !has_valid_path {
        errors.push(match mode {
            ValidationMode::Connectivity => "Consecutive numbers are not connected".to_string(),
            ValidationMode::CompletePath => {
                "No path visits every cell through the numbers in order".to_string()
            }
        });
    }
    let result = ValidationResult {
        is_valid: has_all_numbers && has_valid_path,
        has_all_numbers,
        has_valid_path,
        errors,
    };
    debug!("Validation ({:?}): {:?}", mode, result);
    result
}

/// true if every number in `1..=number_count` appears exactly once
fn has_all_numbers(puzzle: &Puzzle, number_count: usize) -> bool {
    let mut counts = vec![0; number_count];
    for &value in puzzle.values().iter().flatten() {
        if value >= 1 && value as usize <= number_count {
            counts[value as usize - 1] += 1;
        }
    }
    counts.iter().all(|&count| count == 1)
}

/// true if the numbers run from 1 without gaps and each connects to the next
fn numbers_connect(puzzle: &Puzzle) -> bool {
    let positions = puzzle.checkpoint_positions();
    let max = match puzzle.max_value() {
        Some(max) => max,
        None => return false,
    };
    let mut coords = Vec::with_capacity(max as usize);
    for value in 1..=max {
        match positions.get(&value) {
            Some(&coord) => coords.push(coord),
            None => return false,
        }
    }
    coords.windows(2).all(|w| connects(puzzle, w[0], w[1]))
}

#[cfg(test)]
mod tests {
    use super::{has_all_numbers, validate, validate_with, ValidationMode};
    use crate::collections::grid::Coord;
    use crate::puzzle::Puzzle;

    fn numbered(rows: usize, cols: usize, numbers: &[(usize, usize)]) -> Puzzle {
        let mut puzzle = Puzzle::empty(rows, cols);
        for (i, &(row, col)) in numbers.iter().enumerate() {
            puzzle.set_value(Coord::new(row, col), Some(i as u32 + 1));
        }
        puzzle
    }

    #[test]
    fn connected_neighbours() {
        let puzzle = numbered(3, 3, &[(0, 0), (0, 1), (1, 1), (2, 1)]);
        let result = validate_with(&puzzle, 4, ValidationMode::Connectivity);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn zigzag_connects() {
        let puzzle = numbered(5, 5, &[(0, 0), (0, 4), (2, 2), (4, 0), (4, 4)]);
        assert!(validate_with(&puzzle, 5, ValidationMode::Connectivity).is_valid);
    }

    #[test]
    fn blocked_first_segment() {
        let puzzle = numbered(6, 6, &[(5, 1), (3, 0), (5, 0), (4, 0), (2, 0), (0, 0), (0, 2), (2, 3)]);
        assert!(!validate_with(&puzzle, 8, ValidationMode::Connectivity).is_valid);
        let puzzle = numbered(4, 4, &[(0, 0), (0, 3), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (1, 3)]);
        assert!(!validate_with(&puzzle, 8, ValidationMode::Connectivity).is_valid);
    }

    #[test]
    fn no_complete_path() {
        let puzzle = numbered(6, 6, &[(5, 0), (4, 1), (4, 3), (5, 3), (5, 4), (4, 5), (3, 4), (1, 4)]);
        let result = validate(&puzzle, 8);
        assert!(result.has_all_numbers);
        assert!(!result.has_valid_path);
        assert!(!result.is_valid);
        assert_eq!(1, result.errors.len());
    }

    #[test]
    fn edge_cases() {
        let single = numbered(3, 3, &[(0, 0)]);
        assert!(validate_with(&single, 1, ValidationMode::Connectivity).is_valid);
        assert!(validate(&single, 1).is_valid);
        let empty = Puzzle::empty(3, 3);
        assert!(!validate_with(&empty, 0, ValidationMode::Connectivity).is_valid);
        assert!(!validate(&empty, 0).is_valid);
    }

    #[test]
    fn missing_number() {
        let puzzle = numbered(3, 3, &[(0, 0), (0, 1), (0, 2)]);
        let result = validate(&puzzle, 4);
        assert!(!result.has_all_numbers);
        assert!(!result.is_valid);
    }

    #[test]
    fn duplicated_number() {
        // 1 2 2 3
        let mut puzzle = numbered(1, 4, &[(0, 0), (0, 1), (0, 3)]);
        puzzle.set_value(Coord::new(0, 2), Some(2));
        let result = validate_with(&puzzle, 3, ValidationMode::Connectivity);
        assert!(!result.has_all_numbers);
        assert!(!result.is_valid);
        assert!(!has_all_numbers(&puzzle, 3));
        assert!(has_all_numbers(&numbered(1, 4, &[(0, 0), (0, 1), (0, 3)]), 3));
    }

    #[test]
    fn serialized_names() {
        let result = validate(&Puzzle::empty(1, 1), 1);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(Some(false), json["isValid"].as_bool());
        assert_eq!(Some(false), json["hasAllNumbers"].as_bool());
    }
}
