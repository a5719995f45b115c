use crate::collections::grid::Coord;
use crate::puzzle::Trace;

/// Boustrophedon sweep: left to right on even rows, right to left on odd rows
pub fn serpentine(rows: usize, cols: usize) -> Trace {
    let mut trace = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        if row % 2 == 0 {
            trace.extend((0..cols).map(|col| Coord::new(row, col)));
        } else {
            trace.extend((0..cols).rev().map(|col| Coord::new(row, col)));
        }
    }
    trace
}

/// The serpentine variant whose first cell is closest to `start`.
///
/// Candidates are the four mirror images of the sweep, each walked forwards or
/// backwards. Every candidate is a full trace.
pub fn serpentine_near(rows: usize, cols: usize, start: Coord) -> Trace {
    let base = serpentine(rows, cols);
    if base.is_empty() {
        return base;
    }
    let mirror = |flip_rows: bool, flip_cols: bool| -> Trace {
        base.iter()
            .map(|c| {
                let row = if flip_rows { rows - 1 - c.row } else { c.row };
                let col = if flip_cols { cols - 1 - c.col } else { c.col };
                Coord::new(row, col)
            })
            .collect()
    };
    let mut best: Option<Trace> = None;
    for &(flip_rows, flip_cols) in &[(false, false), (false, true), (true, false), (true, true)] {
        let forward = mirror(flip_rows, flip_cols);
        let mut backward = forward.clone();
        backward.reverse();
        for candidate in vec![forward, backward] {
            let better = match &best {
                None => true,
                Some(best) => candidate[0].manhattan(start) < best[0].manhattan(start),
            };
            if better {
                best = Some(candidate);
            }
        }
    }
    best.unwrap_or(base)
}
