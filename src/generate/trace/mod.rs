//! Full traces: orderings of every grid cell where consecutive cells share an edge

pub use self::backtrack::{backtracking_trace, MAX_ATTEMPTS, MAX_BACKTRACK_STEPS};
pub use self::serpentine::serpentine;
pub use self::spiral::spiral;

mod backtrack;
mod serpentine;
mod spiral;

use ahash::AHashSet;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::collections::grid::Coord;
use crate::puzzle::{Difficulty, Trace};

/// Generates a full trace with the strategy tied to `difficulty`
pub fn generate_trace<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    difficulty: Difficulty,
    rng: &mut R,
) -> Trace {
    match difficulty {
        Difficulty::Easy => easy_trace(rows, cols, rng),
        Difficulty::Medium => semi_random_trace(rows, cols, rng),
        Difficulty::Hard => random_trace(rows, cols, rng),
    }
}

/// A serpentine or spiral trace, turned by a random multiple of 90 degrees
pub fn easy_trace<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Trace {
    let use_serpentine = rng.gen::<f64>() < 0.5;
    let quarter_turns = rng.gen_range(1, 4);
    // odd turns swap the dimensions, so build the base on the transposed grid
    let (base_rows, base_cols) = if quarter_turns % 2 == 1 {
        (cols, rows)
    } else {
        (rows, cols)
    };
    let base = if use_serpentine {
        serpentine(base_rows, base_cols)
    } else {
        spiral(base_rows, base_cols)
    };
    debug!(
        "Easy trace: {} turned {} degrees",
        if use_serpentine { "serpentine" } else { "spiral" },
        quarter_turns * 90
    );
    rotate(base, base_rows, base_cols, quarter_turns)
}

/// Backtracking search from a random corner to another corner or the centre
pub fn semi_random_trace<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Trace {
    let corners = [
        Coord::new(0, 0),
        Coord::new(0, cols - 1),
        Coord::new(rows - 1, 0),
        Coord::new(rows - 1, cols - 1),
    ];
    let start = *corners.choose(rng).unwrap_or(&corners[0]);
    let ends: Vec<Coord> = vec![
        corners[3],
        corners[2],
        corners[1],
        corners[0],
        Coord::new(rows / 2, cols / 2),
    ]
    .into_iter()
    .filter(|&end| end != start)
    .collect();
    let feasible: Vec<Coord> = ends
        .iter()
        .copied()
        .filter(|&end| backtrack::endpoints_feasible(rows, cols, start, end))
        .collect();
    let end = if feasible.is_empty() {
        ends.choose(rng).copied()
    } else {
        feasible.choose(rng).copied()
    };
    debug!("Semi-random trace from {:?} to {:?}", start, end);
    backtracking_trace(rows, cols, Some(start), end, rng)
}

/// Backtracking search with no fixed start or end
pub fn random_trace<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Trace {
    backtracking_trace(rows, cols, None, None, rng)
}

/// Turns a trace on a `rows` x `cols` grid clockwise by `quarter_turns` * 90 degrees
pub fn rotate(trace: Trace, rows: usize, cols: usize, quarter_turns: u32) -> Trace {
    let (mut rows, mut cols) = (rows, cols);
    let mut trace = trace;
    for _ in 0..quarter_turns % 4 {
        trace = trace
            .into_iter()
            .map(|c| Coord::new(c.col, rows - 1 - c.row))
            .collect();
        std::mem::swap(&mut rows, &mut cols);
    }
    trace
}

/// A Hamiltonian path between `start` and `end` on a grid graph must respect the
/// checkerboard colouring. An even cell count needs endpoints of different
/// colours. An odd cell count needs both endpoints on the majority colour.
pub fn parity_allows(rows: usize, cols: usize, start: Coord, end: Coord) -> bool {
    if (rows * cols) % 2 == 0 {
        start.is_even() != end.is_even()
    } else {
        start.is_even() && end.is_even()
    }
}

/// true if `trace` visits every cell of the grid exactly once, stepping between
/// edge-sharing cells
pub fn is_full_trace(trace: &[Coord], rows: usize, cols: usize) -> bool {
    if trace.len() != rows * cols {
        return false;
    }
    if !trace.iter().all(|c| c.row < rows && c.col < cols) {
        return false;
    }
    let unique: AHashSet<Coord> = trace.iter().copied().collect();
    unique.len() == trace.len()
        && trace
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.is_adjacent(*b))
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::{easy_trace, generate_trace, is_full_trace, rotate, semi_random_trace, serpentine};
    use crate::collections::grid::Coord;
    use crate::puzzle::Difficulty;
    use crate::random::DailyRng;

    const SHAPES: [(usize, usize); 8] = [(1, 1), (1, 3), (3, 1), (3, 3), (4, 4), (5, 3), (3, 5), (6, 6)];

    #[test]
    fn every_strategy_covers_every_shape() {
        for &difficulty in &Difficulty::ALL {
            for seed in 0..4 {
                let mut rng = DailyRng::new(seed);
                for &(rows, cols) in &SHAPES {
                    let trace = generate_trace(rows, cols, difficulty, &mut rng);
                    assert!(
                        is_full_trace(&trace, rows, cols),
                        "{:?} {}x{} seed {}",
                        difficulty,
                        rows,
                        cols,
                        seed
                    );
                }
            }
        }
    }

    #[test]
    fn rotation() {
        // 2x3 turned once is 3x2
        let trace = rotate(serpentine(2, 3), 2, 3, 1);
        assert_eq!(Coord::new(0, 1), trace[0]);
        assert!(is_full_trace(&trace, 3, 2));
        let trace = rotate(serpentine(2, 3), 2, 3, 2);
        assert_eq!(Coord::new(1, 2), trace[0]);
        assert!(is_full_trace(&trace, 2, 3));
        assert_eq!(serpentine(2, 3), rotate(serpentine(2, 3), 2, 3, 4));
    }

    #[test]
    fn easy_is_deterministic() {
        let a = easy_trace(4, 7, &mut DailyRng::new(99));
        let b = easy_trace(4, 7, &mut DailyRng::new(99));
        assert_eq!(a, b);
        assert!(is_full_trace(&a, 4, 7));
    }

    #[test]
    fn semi_random_starts_in_corner() {
        let mut rng = StepRng::new(0, 0);
        let trace = semi_random_trace(3, 3, &mut rng);
        assert_eq!(Coord::new(0, 0), trace[0]);
        assert!(is_full_trace(&trace, 3, 3));
    }

    #[test]
    fn rejects_broken_traces() {
        let mut trace = serpentine(3, 3);
        assert!(is_full_trace(&trace, 3, 3));
        trace.swap(2, 3);
        assert!(!is_full_trace(&trace, 3, 3));
        trace.pop();
        assert!(!is_full_trace(&trace, 3, 3));
    }
}
