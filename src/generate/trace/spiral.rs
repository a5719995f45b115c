use crate::collections::grid::Coord;
use crate::puzzle::Trace;

/// Clockwise inward spiral from the top-left corner
pub fn spiral(rows: usize, cols: usize) -> Trace {
    let mut trace = Vec::with_capacity(rows * cols);
    let mut push = |row: isize, col: isize| trace.push(Coord::new(row as usize, col as usize));
    let (mut top, mut bottom) = (0, rows as isize - 1);
    let (mut left, mut right) = (0, cols as isize - 1);
    while top <= bottom && left <= right {
        for col in left..=right {
            push(top, col);
        }
        top += 1;
        for row in top..=bottom {
            push(row, right);
        }
        right -= 1;
        if top <= bottom {
            for col in (left..=right).rev() {
                push(bottom, col);
            }
            bottom -= 1;
        }
        if left <= right {
            for row in (top..=bottom).rev() {
                push(row, left);
            }
            left += 1;
        }
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::spiral;
    use crate::collections::grid::Coord;
    use crate::generate::trace::is_full_trace;

    #[test]
    fn three_by_three() {
        let trace = spiral(3, 3);
        assert_eq!(Coord::new(0, 2), trace[2]);
        assert_eq!(Coord::new(1, 1), trace[8]);
        assert!(is_full_trace(&trace, 3, 3));
    }

    #[test]
    fn rectangles() {
        for &(rows, cols) in &[(1, 1), (1, 5), (5, 1), (2, 7), (6, 3), (4, 4)] {
            assert!(is_full_trace(&spiral(rows, cols), rows, cols), "{}x{}", rows, cols);
        }
    }
}
