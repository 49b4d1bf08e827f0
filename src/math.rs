//! Pure hex layout geometry.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` inputs, making them straightforward to unit-test.
//!
//! Pixel space has its origin at the top-left of the canvas with `y` growing
//! downwards. Hexagons are flat-topped and laid out in columns; odd columns sit
//! half a row lower than even ones.

use std::fmt;

use bevy::prelude::{Vec2, Vec3};

fn sqrt_3() -> f32 {
    3.0_f32.sqrt()
}

/// Side length that makes `num_rows` flat-topped hexes fill `display_height`.
///
/// # Examples
/// ```
/// # use hex_life::math::side_length_for;
/// let a = side_length_for(600.0, 12);
/// assert!((a * 12.0 * 3.0_f32.sqrt() - 600.0).abs() < 1e-3);
/// ```
pub fn side_length_for(display_height: f32, num_rows: usize) -> f32 {
    display_height / (num_rows as f32 * sqrt_3())
}

/// Horizontal extent of `num_columns` interlocking columns.
///
/// The first column spans two sides; each further column adds one and a half.
pub fn grid_width(side_length: f32, num_columns: usize) -> f32 {
    2.0 * side_length + num_columns.saturating_sub(1) as f32 * 1.5 * side_length
}

/// Offsets that centre the grid horizontally; even columns touch the top edge.
pub fn centering_offsets(display_width: f32, side_length: f32, num_columns: usize) -> Vec2 {
    Vec2::new(
        (display_width - grid_width(side_length, num_columns)) / 2.0,
        0.0,
    )
}

/// The six corners of a flat-topped hexagon, rightmost first, then clockwise
/// on screen (through the bottom-right corner).
///
/// # Examples
/// ```
/// # use bevy::prelude::Vec2;
/// # use hex_life::math::vertices_of;
/// let v = vertices_of(Vec2::new(50.0, 50.0), 10.0);
/// assert_eq!(v[0], Vec2::new(60.0, 50.0));
/// assert_eq!(v[3], Vec2::new(40.0, 50.0));
/// ```
pub fn vertices_of(center: Vec2, side_length: f32) -> [Vec2; 6] {
    let half = side_length / 2.0;
    let apothem = side_length * sqrt_3() / 2.0;
    [
        Vec2::new(center.x + side_length, center.y),
        Vec2::new(center.x + half, center.y + apothem),
        Vec2::new(center.x - half, center.y + apothem),
        Vec2::new(center.x - side_length, center.y),
        Vec2::new(center.x - half, center.y - apothem),
        Vec2::new(center.x + half, center.y - apothem),
    ]
}

/// Pixel center of the hex at logical `(col, row)`.
pub fn center_for(col: usize, row: usize, side_length: f32, offsets: Vec2) -> Vec2 {
    let row_height = side_length * sqrt_3();
    let first_row = if col.is_multiple_of(2) {
        row_height / 2.0
    } else {
        row_height
    };
    Vec2::new(
        offsets.x + side_length + col as f32 * 1.5 * side_length,
        offsets.y + first_row + row as f32 * row_height,
    )
}

/// Side length and offsets for a grid fitted to a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Number of columns.
    pub num_columns: usize,
    /// Number of rows per column.
    pub num_rows: usize,
    /// Hexagon side length in pixels.
    pub side_length: f32,
    /// Top-left offset applied to every center.
    pub offsets: Vec2,
}

impl GridLayout {
    /// Fits `num_columns × num_rows` hexes to the canvas height and centres them horizontally.
    pub fn fit(
        num_columns: usize,
        num_rows: usize,
        display_width: f32,
        display_height: f32,
    ) -> Self {
        let side_length = side_length_for(display_height, num_rows);
        Self {
            num_columns,
            num_rows,
            side_length,
            offsets: centering_offsets(display_width, side_length, num_columns),
        }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.num_columns * self.num_rows
    }

    /// Pixel center of `(col, row)` under this layout.
    pub fn center(&self, col: usize, row: usize) -> Vec2 {
        center_for(col, row, self.side_length, self.offsets)
    }
}

/// Axis-aligned pixel rectangle, `y` growing downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest `x`.
    pub left: f32,
    /// Largest `x`.
    pub right: f32,
    /// Smallest `y`.
    pub top: f32,
    /// Largest `y`.
    pub bottom: f32,
}

impl Bounds {
    /// Creates bounds from its four edges.
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Smallest rectangle containing every point, or `None` for an empty input.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p.x, p.x, p.y, p.y),
                Some(b) => Self::new(
                    b.left.min(p.x),
                    b.right.max(p.x),
                    b.top.min(p.y),
                    b.bottom.max(p.y),
                ),
            })
        })
    }

    /// Grows every edge outwards by `margin`.
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(
            self.left - margin,
            self.right + margin,
            self.top - margin,
            self.bottom + margin,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.top..=self.bottom).contains(&point.y)
    }

    /// Width and height.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.right - self.left, self.bottom - self.top)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(left {}, right {}, top {}, bottom {})",
            self.left, self.right, self.top, self.bottom
        )
    }
}

/// Computes the face normal of a triangle defined by three vertices.
///
/// Uses the cross product of edges `(v1 - v0)` and `(v2 - v0)`.
/// Returns `Vec3::ZERO` if the triangle is degenerate (collinear points).
pub fn compute_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1.cross(edge2).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    // ── side_length_for / grid_width ────────────────────────────────

    #[test]
    fn side_length_fills_display_height() {
        for rows in [1, 2, 7, 12, 40] {
            let a = side_length_for(600.0, rows);
            assert!(close(a * rows as f32 * sqrt_3(), 600.0), "rows = {rows}");
        }
    }

    #[test]
    fn single_column_is_two_sides_wide() {
        assert!(close(grid_width(10.0, 1), 20.0));
        assert!(close(grid_width(10.0, 3), 50.0));
    }

    #[test]
    fn offsets_centre_grid_horizontally() {
        let layout = GridLayout::fit(16, 12, 800.0, 600.0);
        let width = grid_width(layout.side_length, 16);
        assert!(close(layout.offsets.x * 2.0 + width, 800.0));
        assert_eq!(layout.offsets.y, 0.0);
    }

    // ── vertices_of ─────────────────────────────────────────────────

    #[test]
    fn first_vertex_is_rightmost() {
        let c = Vec2::new(50.0, 50.0);
        let v = vertices_of(c, 10.0);
        assert!(close(v[0].x, 60.0) && close(v[0].y, 50.0));
        assert!(v.iter().all(|p| p.x <= v[0].x));
    }

    #[test]
    fn second_vertex_is_bottom_right() {
        let v = vertices_of(Vec2::new(50.0, 50.0), 10.0);
        assert!(close(v[1].x, 55.0));
        assert!(close(v[1].y, 50.0 + 10.0 * sqrt_3() / 2.0));
    }

    #[test]
    fn vertices_are_symmetric_about_center() {
        for (c, a) in [
            (Vec2::new(50.0, 50.0), 10.0),
            (Vec2::new(3.7, 912.25), 0.5),
            (Vec2::new(-12.0, 4.0), 33.3),
        ] {
            let v = vertices_of(c, a);
            assert!(close((v[0].x - c.x).abs(), (v[3].x - c.x).abs()));
            assert!(close((v[1].y - c.y).abs(), (v[4].y - c.y).abs()));
            assert!(close((v[2].y - c.y).abs(), (v[5].y - c.y).abs()));
            assert!(close(v[1].x - c.x, -(v[2].x - c.x)));
        }
    }

    #[test]
    fn vertices_form_regular_hexagon() {
        let c = Vec2::new(10.0, 20.0);
        let v = vertices_of(c, 7.0);
        for (i, p) in v.iter().enumerate() {
            assert!(close(p.distance(c), 7.0), "corner {i}");
            assert!(close(p.distance(v[(i + 1) % 6]), 7.0), "edge {i}");
        }
    }

    // ── center_for ──────────────────────────────────────────────────

    #[test]
    fn even_columns_start_half_a_row_down() {
        let a = 10.0;
        let c = center_for(0, 0, a, Vec2::ZERO);
        assert!(close(c.x, a));
        assert!(close(c.y, a * sqrt_3() / 2.0));
    }

    #[test]
    fn odd_columns_start_a_full_row_down() {
        let a = 10.0;
        let c = center_for(1, 0, a, Vec2::new(5.0, 2.0));
        assert!(close(c.x, 5.0 + a + 1.5 * a));
        assert!(close(c.y, 2.0 + a * sqrt_3()));
    }

    #[test]
    fn rows_step_by_hex_height() {
        let a = 4.0;
        let c0 = center_for(2, 0, a, Vec2::ZERO);
        let c3 = center_for(2, 3, a, Vec2::ZERO);
        assert!(close(c3.y - c0.y, 3.0 * a * sqrt_3()));
        assert!(close(c3.x, c0.x));
    }

    #[test]
    fn adjacent_columns_share_an_edge_length_apart() {
        // Centers of edge-sharing hexes are exactly `a·√3` apart.
        let a = 6.0;
        let even = center_for(0, 1, a, Vec2::ZERO);
        let odd_same_row = center_for(1, 1, a, Vec2::ZERO);
        let odd_prev_row = center_for(1, 0, a, Vec2::ZERO);
        assert!(close(even.distance(odd_same_row), a * sqrt_3()));
        assert!(close(even.distance(odd_prev_row), a * sqrt_3()));
    }

    #[test]
    fn layout_holds_for_degenerate_grids() {
        let layout = GridLayout::fit(1, 1, 100.0, 100.0);
        assert_eq!(layout.cell_count(), 1);
        let c = layout.center(0, 0);
        assert!(close(c.x, 50.0));
        assert!(close(c.y, 50.0));
    }

    // ── Bounds ──────────────────────────────────────────────────────

    #[test]
    fn enclosing_covers_all_points() {
        let b = Bounds::enclosing([
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(4.0, 9.0),
        ])
        .unwrap();
        assert_eq!(b, Bounds::new(-2.0, 4.0, 3.0, 9.0));
        assert_eq!(b.size(), Vec2::new(6.0, 6.0));
    }

    #[test]
    fn enclosing_nothing_is_none() {
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn containment_is_inclusive() {
        let b = Bounds::new(0.0, 10.0, 0.0, 10.0);
        assert!(b.contains(Vec2::new(0.0, 10.0)));
        assert!(!b.contains(Vec2::new(10.01, 5.0)));
        assert!(b.expanded(0.5).contains(Vec2::new(10.4, -0.5)));
    }

    // ── compute_normal ──────────────────────────────────────────────

    #[test]
    fn normal_of_xz_plane_triangle() {
        let n = compute_normal(Vec3::ZERO, Vec3::X, Vec3::Z);
        // Cross of X × Z = -Y
        assert!((n - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn degenerate_triangle_returns_zero() {
        let n = compute_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(n, Vec3::ZERO);
    }
}
