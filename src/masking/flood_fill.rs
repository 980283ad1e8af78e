use std::collections::VecDeque;

use crate::math::grid::InclusionMask;

/// Marks every non-border cell reachable from the grid periphery.
///
/// Breadth-first with an explicit queue, 4-connected, border cells block.
/// Seeds are all non-border cells on the outermost rows and columns.
#[must_use]
pub fn reach_from_periphery(border: &InclusionMask) -> InclusionMask {
    let (rows, cols) = border.shape();
    let mut reached = InclusionMask::from_element(rows, cols, false);
    let mut queue = VecDeque::new();
    if rows == 0 || cols == 0 {
        return reached;
    }

    let mut seed = |i: usize, j: usize, reached: &mut InclusionMask| {
        if !border[(i, j)] && !reached[(i, j)] {
            reached[(i, j)] = true;
            queue.push_back((i, j));
        }
    };
    for j in 0..cols {
        seed(0, j, &mut reached);
        seed(rows - 1, j, &mut reached);
    }
    for i in 0..rows {
        seed(i, 0, &mut reached);
        seed(i, cols - 1, &mut reached);
    }

    while let Some((i, j)) = queue.pop_front() {
        for (ni, nj) in neighbors4(i, j, rows, cols) {
            if !border[(ni, nj)] && !reached[(ni, nj)] {
                reached[(ni, nj)] = true;
                queue.push_back((ni, nj));
            }
        }
    }
    reached
}

/// Non-border cells that cannot be reached from the periphery.
#[must_use]
pub fn enclosed_interior(border: &InclusionMask) -> InclusionMask {
    let exterior = reach_from_periphery(border);
    InclusionMask::from_fn(border.nrows(), border.ncols(), |i, j| {
        !border[(i, j)] && !exterior[(i, j)]
    })
}

fn neighbors4(
    i: usize,
    j: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let up = i.checked_sub(1).map(|i| (i, j));
    let down = (i + 1 < rows).then_some((i + 1, j));
    let left = j.checked_sub(1).map(|j| (i, j));
    let right = (j + 1 < cols).then_some((i, j + 1));
    [up, down, left, right].into_iter().flatten()
}
