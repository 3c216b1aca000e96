//! Uniform bucket grid for neighbor queries.

use crate::math::Vector2;

/// Upper bound on cell count. Cells grow past the requested size to stay under it.
pub const MAX_GRID_CELLS: usize = 1 << 16;

/// Dense grid of particle indices over `[0, width] x [0, height]`.
///
/// With `cell_size` at least the query radius, every neighbor of a point lies
/// in its own cell or one of the eight around it.
pub struct SpatialGrid {
    min_cell_size: f32,
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Create an empty grid covering the given bounds.
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let min_cell_size = cell_size.max(1.0);
        let mut grid = Self {
            min_cell_size,
            cell_size: min_cell_size,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        grid.reshape(width, height);
        grid
    }

    /// Side length of one cell.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid dimensions in cells.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Resize to cover new bounds, dropping all entries.
    ///
    /// Small query radii over large bounds get coarser cells, so the cell
    /// count stays near `MAX_GRID_CELLS`.
    pub fn reshape(&mut self, width: f32, height: f32) {
        let (width, height) = (width.max(0.0), height.max(0.0));
        let coarsest = (width * height / MAX_GRID_CELLS as f32).sqrt();
        self.cell_size = self.min_cell_size.max(coarsest);
        self.cols = (width / self.cell_size).floor() as usize + 1;
        self.rows = (height / self.cell_size).floor() as usize + 1;
        self.cells.clear();
        self.cells.resize_with(self.cols * self.rows, Vec::new);
    }

    /// Remove all entries, keeping allocations.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    fn cell_of(&self, pos: Vector2) -> (usize, usize) {
        let cx = ((pos.x / self.cell_size).floor().max(0.0) as usize).min(self.cols - 1);
        let cy = ((pos.y / self.cell_size).floor().max(0.0) as usize).min(self.rows - 1);
        (cx, cy)
    }

    /// Insert an index at a position. Out-of-range positions land in edge cells.
    pub fn insert(&mut self, index: usize, pos: Vector2) {
        let (cx, cy) = self.cell_of(pos);
        self.cells[cy * self.cols + cx].push(index);
    }

    /// Call `visit` for every index in the 3x3 block of cells around `pos`.
    pub fn for_each_near(&self, pos: Vector2, mut visit: impl FnMut(usize)) {
        let (cx, cy) = self.cell_of(pos);
        let x0 = cx.saturating_sub(1);
        let y0 = cy.saturating_sub(1);
        let x1 = (cx + 1).min(self.cols - 1);
        let y1 = (cy + 1).min(self.rows - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                for &index in &self.cells[y * self.cols + x] {
                    visit(index);
                }
            }
        }
    }
}
