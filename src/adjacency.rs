//! Six-neighbour topology over column-major offset storage.
//!
//! Cells are stored column by column, `index = col * num_rows + row`. Odd
//! columns sit half a row lower than even ones (see [`crate::math::center_for`]),
//! so the neighbour offsets depend on column parity. [`to_axial`] maps the same
//! positions onto [`hexx::Hex`] axial coordinates, where every neighbour is a
//! unit step.

use hexx::Hex;

/// `(dcol, drow)` neighbour offsets for cells in even columns.
const EVEN_COLUMN_OFFSETS: [(isize, isize); 6] =
    [(-1, -1), (-1, 0), (0, 1), (1, -1), (1, 0), (0, -1)];

/// `(dcol, drow)` neighbour offsets for cells in odd columns.
const ODD_COLUMN_OFFSETS: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, 1), (1, 0), (1, 1), (0, -1)];

/// Splits a storage index into `(col, row)`.
pub fn grid_position(index: usize, num_rows: usize) -> (usize, usize) {
    (index / num_rows, index % num_rows)
}

/// Storage index of `(col, row)`.
pub fn cell_index(col: usize, row: usize, num_rows: usize) -> usize {
    col * num_rows + row
}

/// In-bounds neighbours of `index`, at most six, without duplicates.
///
/// Returns an empty list for an index outside the grid.
///
/// # Examples
/// ```
/// # use hex_life::adjacency::neighbors;
/// // Corner of a 3×3 grid: (0,0) touches (0,1) and (1,0).
/// let mut n = neighbors(0, 3, 3);
/// n.sort();
/// assert_eq!(n, vec![1, 3]);
/// ```
pub fn neighbors(index: usize, num_columns: usize, num_rows: usize) -> Vec<usize> {
    if num_rows == 0 || index >= num_columns * num_rows {
        return Vec::new();
    }
    let (col, row) = grid_position(index, num_rows);
    let offsets = if col.is_multiple_of(2) {
        &EVEN_COLUMN_OFFSETS
    } else {
        &ODD_COLUMN_OFFSETS
    };
    offsets
        .iter()
        .filter_map(|&(dc, dr)| {
            let c = col.checked_add_signed(dc)?;
            let r = row.checked_add_signed(dr)?;
            (c < num_columns && r < num_rows).then(|| cell_index(c, r, num_rows))
        })
        .collect()
}

/// True when `a` and `b` share an edge.
pub fn are_adjacent(a: usize, b: usize, num_columns: usize, num_rows: usize) -> bool {
    neighbors(a, num_columns, num_rows).contains(&b)
}

/// Axial coordinate of `(col, row)` for the odd-columns-down layout.
pub fn to_axial(col: usize, row: usize) -> Hex {
    let q = col as i32;
    let r = row as i32 - (q - (q & 1)) / 2;
    Hex::new(q, r)
}

/// Inverse of [`to_axial`]; `None` when the hex lies left of or above the grid origin.
pub fn from_axial(hex: Hex) -> Option<(usize, usize)> {
    let col = usize::try_from(hex.x).ok()?;
    let row = usize::try_from(hex.y + (hex.x - (hex.x & 1)) / 2).ok()?;
    Some((col, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const GRIDS: [(usize, usize); 7] = [(1, 1), (1, 5), (5, 1), (2, 2), (7, 6), (16, 12), (9, 13)];

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    #[test]
    fn neighbours_are_unique_and_in_bounds() {
        for (cols, rows) in GRIDS {
            let total = cols * rows;
            for i in 0..total {
                let n = neighbors(i, cols, rows);
                assert!(n.len() <= 6);
                let unique: HashSet<_> = n.iter().copied().collect();
                assert_eq!(unique.len(), n.len(), "duplicates for {i} in {cols}x{rows}");
                assert!(n.iter().all(|&j| j < total && j != i));
            }
        }
    }

    #[test]
    fn neighbourhood_is_symmetric() {
        for (cols, rows) in GRIDS {
            for i in 0..cols * rows {
                for j in neighbors(i, cols, rows) {
                    assert!(
                        neighbors(j, cols, rows).contains(&i),
                        "{j} is a neighbour of {i} but not vice versa ({cols}x{rows})"
                    );
                }
            }
        }
    }

    #[test]
    fn interior_cells_have_six_neighbours() {
        let (cols, rows) = (6, 6);
        for col in 1..cols - 1 {
            for row in 1..rows - 1 {
                let i = cell_index(col, row, rows);
                assert_eq!(neighbors(i, cols, rows).len(), 6, "({col}, {row})");
            }
        }
    }

    #[test]
    fn even_column_table() {
        // (2, 2) in a 5x5 grid.
        let n = sorted(neighbors(cell_index(2, 2, 5), 5, 5));
        let expected = sorted(
            [(1, 1), (1, 2), (2, 3), (3, 1), (3, 2), (2, 1)]
                .iter()
                .map(|&(c, r)| cell_index(c, r, 5))
                .collect(),
        );
        assert_eq!(n, expected);
    }

    #[test]
    fn odd_column_table() {
        // (1, 2) in a 5x5 grid.
        let n = sorted(neighbors(cell_index(1, 2, 5), 5, 5));
        let expected = sorted(
            [(0, 2), (0, 3), (1, 3), (2, 2), (2, 3), (1, 1)]
                .iter()
                .map(|&(c, r)| cell_index(c, r, 5))
                .collect(),
        );
        assert_eq!(n, expected);
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        assert!(neighbors(0, 1, 1).is_empty());
    }

    #[test]
    fn out_of_range_index_has_no_neighbours() {
        assert!(neighbors(12, 3, 4).is_empty());
        assert!(neighbors(0, 3, 0).is_empty());
    }

    // ── axial agreement ─────────────────────────────────────────────

    #[test]
    fn axial_roundtrip() {
        for col in 0..9 {
            for row in 0..9 {
                assert_eq!(from_axial(to_axial(col, row)), Some((col, row)));
            }
        }
    }

    #[test]
    fn offset_tables_match_axial_neighbours() {
        for (cols, rows) in GRIDS {
            for i in 0..cols * rows {
                let (col, row) = grid_position(i, rows);
                let hex = to_axial(col, row);
                let from_hexx: HashSet<usize> = hex
                    .all_neighbors()
                    .into_iter()
                    .filter_map(from_axial)
                    .filter(|&(c, r)| c < cols && r < rows)
                    .map(|(c, r)| cell_index(c, r, rows))
                    .collect();
                let from_table: HashSet<usize> = neighbors(i, cols, rows).into_iter().collect();
                assert_eq!(from_table, from_hexx, "cell ({col}, {row}) in {cols}x{rows}");
            }
        }
    }

    #[test]
    fn neighbours_are_one_axial_step_away() {
        let (cols, rows) = (8, 8);
        for i in 0..cols * rows {
            let (c, r) = grid_position(i, rows);
            for j in neighbors(i, cols, rows) {
                let (nc, nr) = grid_position(j, rows);
                assert_eq!(to_axial(c, r).distance_to(to_axial(nc, nr)), 1);
            }
        }
    }

    #[test]
    fn adjacency_query() {
        assert!(are_adjacent(0, 1, 3, 3));
        assert!(!are_adjacent(0, 2, 3, 3));
    }
}
