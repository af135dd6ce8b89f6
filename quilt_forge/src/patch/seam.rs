//! Least-cost boundary carving over a patch's overlap strips.

use crate::plane::{IntPlane, PlaneError};

/// Carves the binary keep/discard mask for a patch out of its overlap error
/// surface.
///
/// Every cell ends up holding exactly 0 or 1. Cells at or above the
/// horizontal boundary path and cells at or left of the vertical boundary
/// path are discarded, along with the rectangle above-and-left of the corner
/// cell where the two paths meet: the boundary itself stays with the
/// already-placed neighbor, which keeps overlap pixels from being owned by
/// both sides of a cut. An absent neighbor skips its cut entirely, leaving
/// the corresponding strip kept.
pub(crate) fn carve_mask(
    mask: &mut IntPlane,
    error: &IntPlane,
    size: u32,
    overlap: u32,
    has_left: bool,
    has_top: bool,
) -> Result<(), PlaneError> {
    mask.fill(1);

    let horizontal = if has_top {
        Some(horizontal_cut(error, size, overlap)?)
    } else {
        None
    };
    let vertical = if has_left {
        Some(vertical_cut(error, size, overlap)?)
    } else {
        None
    };

    if let Some(rows) = &horizontal {
        for (column, &row) in rows.iter().enumerate() {
            for discarded in 0..=row {
                mask.set(column as u32, discarded, 0)?;
            }
        }
    }

    if let Some(columns) = &vertical {
        for (row, &column) in columns.iter().enumerate() {
            for discarded in 0..=column {
                mask.set(discarded, row as u32, 0)?;
            }
        }
    }

    if let (Some(rows), Some(columns)) = (&horizontal, &vertical) {
        let (corner_x, corner_y) = cut_corner(rows, columns, overlap);
        for y in 0..=corner_y {
            for x in 0..=corner_x {
                mask.set(x, y, 0)?;
            }
        }
    }

    Ok(())
}

/// Boundary row for every column of the top overlap strip.
fn horizontal_cut(error: &IntPlane, size: u32, overlap: u32) -> Result<Vec<u32>, PlaneError> {
    least_cost_lanes(|column, row| error.get(column, row), size, overlap)
}

/// Boundary column for every row of the left overlap strip.
fn vertical_cut(error: &IntPlane, size: u32, overlap: u32) -> Result<Vec<u32>, PlaneError> {
    least_cost_lanes(|row, column| error.get(column, row), size, overlap)
}

/// Resolves the cell where the two boundary paths meet inside the
/// `overlap x overlap` corner.
///
/// When the paths cross more than once the last crossing in row-major order
/// wins. When they share no cell, the corner falls back to the column where
/// the vertical path enters the corner region and the row where the
/// horizontal one does.
fn cut_corner(rows: &[u32], columns: &[u32], overlap: u32) -> (u32, u32) {
    let mut corner = None;

    for i in 0..overlap {
        for j in 0..overlap {
            if rows[j as usize] == i && columns[i as usize] == j {
                corner = Some((j, i));
            }
        }
    }

    corner.unwrap_or_else(|| {
        (
            columns[overlap as usize - 1],
            rows[overlap as usize - 1],
        )
    })
}

/// Minimum-cost monotone path across a strip of `len` steps and `band` lanes.
///
/// `cumulative[step][lane]` holds the cheapest total cost of any path running
/// from that cell to the last step, with lane transitions limited to one per
/// step. The trace starts at step 0 from the cheapest lane; ties resolve to
/// the smallest lane index, keeping the result fully deterministic.
fn least_cost_lanes<F>(cost: F, len: u32, band: u32) -> Result<Vec<u32>, PlaneError>
where
    F: Fn(u32, u32) -> Result<i32, PlaneError>,
{
    let len = len as usize;
    let band = band as usize;

    let mut cumulative = vec![vec![0i32; band]; len];

    for lane in 0..band {
        cumulative[len - 1][lane] = cost(len as u32 - 1, lane as u32)?;
    }

    for step in (0..len - 1).rev() {
        for lane in 0..band {
            let from = lane.saturating_sub(1);
            let to = (lane + 1).min(band - 1);

            let mut cheapest = cumulative[step + 1][from];
            for reachable in from + 1..=to {
                if cumulative[step + 1][reachable] < cheapest {
                    cheapest = cumulative[step + 1][reachable];
                }
            }

            cumulative[step][lane] = cost(step as u32, lane as u32)? + cheapest;
        }
    }

    let mut lanes = Vec::with_capacity(len);
    let mut lane = 0;
    for candidate in 1..band {
        if cumulative[0][candidate] < cumulative[0][lane] {
            lane = candidate;
        }
    }
    lanes.push(lane as u32);

    for step in 1..len {
        let from = lane.saturating_sub(1);
        let to = (lane + 1).min(band - 1);

        let mut next = from;
        for reachable in from + 1..=to {
            if cumulative[step][reachable] < cumulative[step][next] {
                next = reachable;
            }
        }

        lane = next;
        lanes.push(lane as u32);
    }

    Ok(lanes)
}

#[cfg(test)]
mod test {
    use crate::plane::IntPlane;

    use super::{carve_mask, cut_corner};

    const SIZE: u32 = 24;
    const OVERLAP: u32 = 4;

    fn filled_strips(top_cost: impl Fn(u32, u32) -> i32, left_cost: impl Fn(u32, u32) -> i32) -> IntPlane {
        let mut error = IntPlane::new(SIZE, SIZE);
        for i in 0..SIZE {
            for j in 0..SIZE {
                if i < OVERLAP {
                    error.set(j, i, top_cost(j, i)).unwrap();
                } else if j < OVERLAP {
                    error.set(j, i, left_cost(j, i)).unwrap();
                }
            }
        }
        error
    }

    #[test]
    fn no_neighbors_keeps_everything() {
        let error = IntPlane::new(SIZE, SIZE);
        let mut mask = IntPlane::new(SIZE, SIZE);

        carve_mask(&mut mask, &error, SIZE, OVERLAP, false, false).unwrap();

        for y in 0..SIZE {
            for x in 0..SIZE {
                assert_eq!(1, mask.get(x, y).unwrap());
            }
        }
    }

    #[test]
    fn valley_in_top_strip_pins_the_cut() {
        let error = filled_strips(|_, i| if i == 3 { 0 } else { 5 }, |_, _| 0);
        let mut mask = IntPlane::new(SIZE, SIZE);

        carve_mask(&mut mask, &error, SIZE, OVERLAP, false, true).unwrap();

        // The valley row and everything above it go to the neighbor, all rows
        // below it are kept.
        for x in 0..SIZE {
            for y in 0..=3 {
                assert_eq!(0, mask.get(x, y).unwrap());
            }
            for y in 4..SIZE {
                assert_eq!(1, mask.get(x, y).unwrap());
            }
        }
    }

    #[test]
    fn boundary_moves_at_most_one_row_per_column() {
        // A jagged surface the path has to slalom through.
        let error = filled_strips(|j, i| ((j * 7 + i * 13) % 11) as i32, |_, _| 0);
        let mut mask = IntPlane::new(SIZE, SIZE);

        carve_mask(&mut mask, &error, SIZE, OVERLAP, false, true).unwrap();

        let boundary_row = |x: u32| -> u32 {
            let mut y = 0;
            while mask.get(x, y).unwrap() == 0 {
                y += 1;
            }
            y
        };

        for x in 0..SIZE - 1 {
            let here = boundary_row(x) as i64;
            let next = boundary_row(x + 1) as i64;
            assert!((here - next).abs() <= 1);
        }
    }

    #[test]
    fn both_cuts_on_flat_surface_discard_the_first_row_and_column() {
        // On an all-zero surface both paths settle on lane 0 and meet at the
        // origin, so exactly the first row and first column go to the
        // neighbors.
        let error = IntPlane::new(SIZE, SIZE);
        let mut mask = IntPlane::new(SIZE, SIZE);

        carve_mask(&mut mask, &error, SIZE, OVERLAP, true, true).unwrap();

        for y in 0..SIZE {
            for x in 0..SIZE {
                let expected = if x == 0 || y == 0 { 0 } else { 1 };
                assert_eq!(expected, mask.get(x, y).unwrap());
            }
        }
    }

    #[test]
    fn crossing_paths_resolve_to_their_intersection() {
        // Horizontal boundary pinned to row 2, vertical boundary to column 3:
        // the paths share exactly the cell (3, 2).
        let rows = vec![2; SIZE as usize];
        let columns = vec![3; SIZE as usize];

        assert_eq!((3, 2), cut_corner(&rows, &columns, OVERLAP));
    }

    #[test]
    fn disjoint_paths_fall_back_to_corner_entry_cells() {
        // The horizontal path climbs the diagonal while the vertical one
        // zigzags around it; no cell is shared inside the corner.
        let mut rows = vec![0, 1, 2, 2];
        rows.resize(SIZE as usize, 2);
        let mut columns = vec![1, 0, 1, 0];
        columns.resize(SIZE as usize, 0);

        assert_eq!(
            (columns[OVERLAP as usize - 1], rows[OVERLAP as usize - 1]),
            cut_corner(&rows, &columns, OVERLAP)
        );
    }

    #[test]
    fn missing_left_neighbor_keeps_left_strip() {
        let error = filled_strips(|_, _| 1, |_, _| 1);
        let mut mask = IntPlane::new(SIZE, SIZE);

        carve_mask(&mut mask, &error, SIZE, OVERLAP, false, true).unwrap();

        // The horizontal cut on a uniform surface settles on row 0, so
        // everything below the first row stays kept, left strip included.
        for y in 1..SIZE {
            for x in 0..OVERLAP {
                assert_eq!(1, mask.get(x, y).unwrap());
            }
        }
        for x in 0..SIZE {
            assert_eq!(0, mask.get(x, 0).unwrap());
        }
    }

    #[test]
    fn mask_is_strictly_binary() {
        let error = filled_strips(|j, i| ((j + i) % 3) as i32, |j, i| ((j * i) % 5) as i32);
        let mut mask = IntPlane::new(SIZE, SIZE);
        mask.fill(7);

        carve_mask(&mut mask, &error, SIZE, OVERLAP, true, true).unwrap();

        for y in 0..SIZE {
            for x in 0..SIZE {
                let value = mask.get(x, y).unwrap();
                assert!(value == 0 || value == 1);
            }
        }
    }
}
