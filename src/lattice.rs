//! Hexagonal lattice addressing.
//!
//! The board is a flat-topped hex grid laid out in columns, with even columns
//! shifted down by half a cell. Every cell carries a "doubled" lattice tag
//! ([`CellCoord`]) in which the row index advances by two per cell, so odd
//! columns sit on the odd rows between their even-column neighbours and
//! `x + y` is always even. The reuse translations in [`crate::cluster`] are
//! written in this coordinate system.
//!
//! Pixel space follows the canvas convention: `y` grows downward.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::{DoubledHexMode, Hex, HexLayout, HexOrientation, OffsetHexMode};

use crate::error::ToolError;

/// Integer lattice tag of a hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct CellCoord {
    /// Column index.
    pub x: i32,
    /// Doubled row index.
    pub y: i32,
}

impl CellCoord {
    /// Creates a tag from raw lattice components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Axial coordinate of this cell (`q = x`, `r = (y - x) / 2`).
    ///
    /// Exact for every tag on the lattice, since `x + y` is even.
    pub fn to_hex(self) -> Hex {
        Hex::from_doubled_coordinates([self.x, self.y], DoubledHexMode::DoubledHeight)
    }

    /// Inverse of [`CellCoord::to_hex`].
    pub fn from_hex(hex: Hex) -> Self {
        let [x, y] = hex.to_doubled_coordinates(DoubledHexMode::DoubledHeight);
        Self::new(x, y)
    }

    /// Number of hex steps between two cells.
    pub fn distance_to(self, other: Self) -> u32 {
        self.to_hex().unsigned_distance_to(other.to_hex())
    }

    /// The six edge-adjacent tags.
    pub fn neighbors(self) -> [Self; 6] {
        self.to_hex().all_neighbors().map(Self::from_hex)
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// Flat-topped layout for cells of circumradius `size`.
///
/// The origin sits half a cell below the pixel origin so that cell `(0, 0)`
/// touches the top edge.
pub fn cell_layout(size: f32) -> HexLayout {
    let layout = HexLayout::flat().with_hex_size(size);
    let half_height = layout.rect_size().y / 2.0;
    layout.with_origin(Vec2::new(0.0, half_height))
}

/// Pixel center of the cell at `(col, row)`.
///
/// Even columns are pushed down by half a cell height.
///
/// # Examples
/// ```
/// # use hex_reuse::lattice::cell_center;
/// let c = cell_center(2, 0, 40.0);
/// assert_eq!(c.x, 120.0);
/// assert!((c.y - 40.0 * 3f32.sqrt() / 2.0).abs() < 1e-4);
/// ```
pub fn cell_center(col: u32, row: u32, size: f32) -> Vec2 {
    cell_layout(size).hex_to_world_pos(cell_coordinate(col, row).to_hex())
}

/// Lattice tag of the cell at `(col, row)`.
///
/// # Examples
/// ```
/// # use hex_reuse::lattice::{CellCoord, cell_coordinate};
/// assert_eq!(cell_coordinate(0, 3), CellCoord::new(0, 6));
/// assert_eq!(cell_coordinate(1, 3), CellCoord::new(1, 5));
/// ```
pub fn cell_coordinate(col: u32, row: u32) -> CellCoord {
    CellCoord::from_hex(Hex::from_offset_coordinates(
        [col as i32, row as i32],
        OffsetHexMode::Even,
        HexOrientation::Flat,
    ))
}

/// Outline of a hex centred on `center`: vertex `k` sits at `60°·k`.
pub fn hex_vertices(center: Vec2, size: f32) -> [Vec2; 6] {
    cell_layout(size)
        .center_aligned_hex_corners()
        .map(|corner| center + corner)
}

/// Parses a cell circumradius; it must be a positive, finite number of pixels.
pub fn parse_cell_size(text: &str) -> Result<f32, ToolError> {
    let text = text.trim();
    text.parse::<f32>()
        .ok()
        .filter(|size| size.is_finite() && *size > 0.0)
        .ok_or_else(|| ToolError::InvalidNumber {
            field: "cell size",
            value: text.to_string(),
        })
}

/// One cell of the board. Pure data; fill color lives in the session.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct HexCell {
    /// Column in the bounded grid.
    pub col: u32,
    /// Row in the bounded grid.
    pub row: u32,
    /// Lattice tag.
    pub coord: CellCoord,
    /// Pixel-space center.
    pub center: Vec2,
}

/// The static bounded grid, built once at startup.
#[derive(Resource, Debug, Clone)]
pub struct HexLattice {
    cols: u32,
    rows: u32,
    size: f32,
    layout: HexLayout,
    corners: [Vec2; 6],
    cells: Vec<HexCell>,
    index: HashMap<CellCoord, usize>,
}

impl HexLattice {
    /// Largest accepted number of columns or rows.
    pub const MAX_DIMENSION: u32 = 200;

    /// Builds a `cols × rows` grid of cells with circumradius `size`.
    ///
    /// Both dimensions are clamped to `1..=MAX_DIMENSION` so that
    /// [`HexLattice::closest_cell`] always has an answer.
    pub fn new(cols: u32, rows: u32, size: f32) -> Self {
        let cols = cols.clamp(1, Self::MAX_DIMENSION);
        let rows = rows.clamp(1, Self::MAX_DIMENSION);
        let layout = cell_layout(size);
        let corners = layout.center_aligned_hex_corners();
        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        let mut index = HashMap::new();

        for col in 0..cols {
            for row in 0..rows {
                let coord = cell_coordinate(col, row);
                index.insert(coord, cells.len());
                cells.push(HexCell {
                    col,
                    row,
                    coord,
                    center: layout.hex_to_world_pos(coord.to_hex()),
                });
            }
        }

        Self {
            cols,
            rows,
            size,
            layout,
            corners,
            cells,
            index,
        }
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Circumradius of every cell, in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Pixel-space layout of the grid.
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// All cells in creation order (column-major).
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// Cell carrying `coord`, if it lies inside the grid.
    pub fn cell(&self, coord: CellCoord) -> Option<&HexCell> {
        self.index.get(&coord).map(|&i| &self.cells[i])
    }

    /// Whether `coord` lies inside the grid.
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.index.contains_key(&coord)
    }

    /// Outline of `cell` in pixel space.
    pub fn vertices(&self, cell: &HexCell) -> [Vec2; 6] {
        self.corners.map(|corner| cell.center + corner)
    }

    /// Cell whose center is nearest to `pixel`.
    ///
    /// Scans in creation order and keeps the first of equally distant cells.
    pub fn closest_cell(&self, pixel: Vec2) -> &HexCell {
        let first = &self.cells[0];
        self.cells[1..]
            .iter()
            .fold(
                (first, first.center.distance_squared(pixel)),
                |(best, best_d), cell| {
                    let d = cell.center.distance_squared(pixel);
                    if d < best_d { (cell, d) } else { (best, best_d) }
                },
            )
            .0
    }

    /// Pixel-space bounding box `(min, max)` of every cell outline.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        self.cells
            .iter()
            .flat_map(|cell| self.vertices(cell))
            .fold((Vec2::MAX, Vec2::MIN), |(min, max), v| {
                (min.min(v), max.max(v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::platform::collections::HashSet;

    const SQRT_3: f32 = 1.732_050_8;

    fn reference_grid() -> HexLattice {
        HexLattice::new(25, 25, 40.0)
    }

    // ── cell_center ─────────────────────────────────────────────────

    #[test]
    fn odd_column_has_no_vertical_offset() {
        let c = cell_center(1, 2, 10.0);
        assert!((c.x - 15.0).abs() < 1e-5);
        assert!((c.y - 2.0 * 10.0 * SQRT_3).abs() < 1e-4);
    }

    #[test]
    fn even_column_is_shifted_half_a_cell() {
        let even = cell_center(0, 0, 10.0);
        let odd = cell_center(1, 0, 10.0);
        assert!((even.y - odd.y - 5.0 * SQRT_3).abs() < 1e-4);
    }

    #[test]
    fn center_y_follows_doubled_row() {
        // y_pixel = (y_tag + 1) * size * sqrt(3) / 2 on both column parities.
        for col in 0..6 {
            for row in 0..6 {
                let c = cell_center(col, row, 8.0);
                let tag = cell_coordinate(col, row);
                let expected = (tag.y + 1) as f32 * 8.0 * SQRT_3 / 2.0;
                assert!((c.y - expected).abs() < 1e-3, "mismatch at ({col}, {row})");
            }
        }
    }

    // ── cell_coordinate ─────────────────────────────────────────────

    #[test]
    fn coordinate_is_injective_over_grid() {
        let grid = reference_grid();
        let tags: HashSet<CellCoord> = grid.cells().iter().map(|c| c.coord).collect();
        assert_eq!(tags.len(), grid.cells().len());
    }

    #[test]
    fn coordinate_sum_is_always_even() {
        for cell in reference_grid().cells() {
            assert_eq!((cell.coord.x + cell.coord.y).rem_euclid(2), 0);
        }
    }

    #[test]
    fn hex_conversion_roundtrip() {
        for cell in reference_grid().cells() {
            assert_eq!(CellCoord::from_hex(cell.coord.to_hex()), cell.coord);
        }
    }

    #[test]
    fn lattice_neighbors_are_adjacent_on_screen() {
        let grid = reference_grid();
        let cell = grid.cell(CellCoord::new(4, 8)).unwrap();
        for n in cell.coord.neighbors() {
            let other = grid.cell(n).expect("interior cell has all neighbors");
            let gap = cell.center.distance(other.center);
            assert!(
                (gap - 40.0 * SQRT_3).abs() < 1e-2,
                "{n} is {gap} px away from {}",
                cell.coord
            );
            assert_eq!(cell.coord.distance_to(n), 1);
        }
    }

    #[test]
    fn layout_matches_closed_form_centers() {
        // x = 1.5·size·col, y = size·√3·row (+ half a cell on even columns).
        for col in 0..8 {
            for row in 0..8 {
                let c = cell_center(col, row, 40.0);
                let height = 40.0 * SQRT_3;
                let offset = if col % 2 == 0 { height / 2.0 } else { 0.0 };
                let expected = Vec2::new(col as f32 * 60.0, row as f32 * height + offset);
                assert!((c - expected).length() < 1e-3, "({col}, {row}): {c} vs {expected}");
            }
        }
    }

    #[test]
    fn layout_round_trips_cell_centers() {
        let grid = reference_grid();
        for cell in grid.cells() {
            let hex = grid.layout().world_pos_to_hex(cell.center);
            assert_eq!(CellCoord::from_hex(hex), cell.coord);
        }
    }

    // ── hex_vertices ────────────────────────────────────────────────

    #[test]
    fn first_vertex_is_at_angle_zero() {
        let v = hex_vertices(Vec2::new(5.0, 5.0), 2.0);
        assert!((v[0] - Vec2::new(7.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn vertices_are_on_circumcircle_and_distinct() {
        let center = Vec2::new(3.0, -1.0);
        let v = hex_vertices(center, 4.0);
        for (i, a) in v.iter().enumerate() {
            assert!((a.distance(center) - 4.0).abs() < 1e-4);
            for b in &v[i + 1..] {
                assert!(a.distance(*b) > 1.0, "vertices collapse");
            }
        }
    }

    #[test]
    fn lattice_outline_matches_free_function() {
        let grid = reference_grid();
        let cell = grid.cell(CellCoord::new(5, 9)).unwrap();
        let a = grid.vertices(cell);
        let b = hex_vertices(cell.center, 40.0);
        for (p, q) in a.iter().zip(&b) {
            assert!(p.distance(*q) < 1e-4);
        }
    }

    // ── closest_cell ────────────────────────────────────────────────

    #[test]
    fn center_maps_back_to_its_cell() {
        let grid = reference_grid();
        for cell in grid.cells() {
            assert_eq!(grid.closest_cell(cell.center).coord, cell.coord);
        }
    }

    #[test]
    fn far_away_pixel_resolves_to_edge_cell() {
        let grid = reference_grid();
        assert_eq!(
            grid.closest_cell(Vec2::new(-500.0, -500.0)).coord,
            CellCoord::new(0, 0)
        );
        let last = grid.closest_cell(Vec2::new(1e5, 1e5));
        assert_eq!((last.col, last.row), (24, 24));
    }

    #[test]
    fn ties_resolve_to_first_created_cell() {
        let grid = HexLattice::new(2, 1, 10.0);
        let a = grid.cells()[0].center;
        let b = grid.cells()[1].center;
        let midpoint = (a + b) / 2.0;
        assert_eq!(grid.closest_cell(midpoint).coord, grid.cells()[0].coord);
    }

    // ── HexLattice ──────────────────────────────────────────────────

    #[test]
    fn empty_dimensions_are_clamped() {
        let grid = HexLattice::new(0, 0, 10.0);
        assert_eq!(grid.cells().len(), 1);
        assert_eq!(grid.closest_cell(Vec2::ZERO).coord, CellCoord::new(0, 0));
    }

    #[test]
    fn oversized_dimensions_are_clamped() {
        let grid = HexLattice::new(u32::MAX, 3, 10.0);
        assert_eq!(grid.cols(), HexLattice::MAX_DIMENSION);
        assert_eq!(grid.cells().len(), HexLattice::MAX_DIMENSION as usize * 3);
    }

    // ── parse_cell_size ─────────────────────────────────────────────

    #[test]
    fn cell_size_must_be_positive_and_finite() {
        assert_eq!(parse_cell_size(" 32.5 "), Ok(32.5));
        for bad in ["0", "-4", "inf", "NaN", "big"] {
            assert!(
                matches!(
                    parse_cell_size(bad),
                    Err(ToolError::InvalidNumber { field: "cell size", .. })
                ),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn lookup_by_coord() {
        let grid = reference_grid();
        let cell = grid.cell(CellCoord::new(3, 7)).unwrap();
        assert_eq!((cell.col, cell.row), (3, 4));
        assert!(!grid.contains(CellCoord::new(3, 8)));
        assert!(!grid.contains(CellCoord::new(-1, 1)));
    }

    #[test]
    fn bounds_enclose_all_centers() {
        let grid = reference_grid();
        let (min, max) = grid.bounds();
        assert!((min.x + 40.0).abs() < 1e-3);
        for cell in grid.cells() {
            assert!(cell.center.cmpge(min).all() && cell.center.cmple(max).all());
        }
    }
}
