use crate::GridSize;
use crate::Pixel;

/// Largest grid side, in cells
pub const MAX_GRID_SIZE: GridSize = 1024;

/// Largest surface side, in pixels
pub const MAX_EXTENT: Pixel = 8192;

/// Size of the squares drawn for each cell, and of the lines that separate them.
///
/// ```notrust
///   |<- pitch ->|
///   +-----------+-----------+
///   |   cell    |   cell    |
///   +-----------+-----------+
///   ^ thickness
/// ```
///
/// Every cell starts one gridline thickness past a multiple of the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub cell_size: Pixel,
    pub thickness: Pixel,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            cell_size: 10,
            thickness: 1,
        }
    }
}

impl CellGeometry {
    pub const fn new(cell_size: Pixel, thickness: Pixel) -> Self {
        Self {
            cell_size,
            thickness,
        }
    }

    /// Distance between the origins of two neighboring cells
    pub const fn pitch(&self) -> Pixel {
        self.cell_size.saturating_add(self.thickness)
    }

    /// Map a pixel offset from the surface's top-left corner to `(row, col)`.
    ///
    /// The result is not bounded by the grid; callers check it against the grid dimensions. Offsets
    /// that cannot name any cell (negative, NaN, or a zero pitch) yield `None`.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(GridSize, GridSize)> {
        let pitch = self.pitch() as f64;

        if pitch <= 0.0 || !(x >= 0.0 && y >= 0.0) {
            return None;
        }

        let row = (y / pitch).floor();
        let col = (x / pitch).floor();

        if row > GridSize::MAX as f64 || col > GridSize::MAX as f64 {
            return None;
        }

        Some((row as GridSize, col as GridSize))
    }

    /// Top-left pixel of the square filled for `(row, col)`
    pub const fn cell_origin(&self, row: GridSize, col: GridSize) -> (Pixel, Pixel) {
        let pitch = self.pitch();

        (
            col.saturating_mul(pitch).saturating_add(self.thickness),
            row.saturating_mul(pitch).saturating_add(self.thickness),
        )
    }

    /// The pixel at the middle of a cell's square
    pub const fn cell_center(&self, row: GridSize, col: GridSize) -> (Pixel, Pixel) {
        let (x, y) = self.cell_origin(row, col);

        (
            x.saturating_add(self.cell_size / 2),
            y.saturating_add(self.cell_size / 2),
        )
    }

    /// Pixel extent of a grid with `n` cells along one axis, outer gridlines included.
    pub const fn extent(&self, n: GridSize) -> Pixel {
        if n == 0 {
            return 0;
        }

        self.pitch().saturating_mul(n).saturating_add(self.thickness)
    }

    /// The largest grid side that fits in [`MAX_EXTENT`] pixels, capped at [`MAX_GRID_SIZE`]
    pub const fn max_grid_size(&self) -> GridSize {
        let pitch = self.pitch();
        if pitch == 0 {
            return MAX_GRID_SIZE;
        }

        let fits = MAX_EXTENT.saturating_sub(self.thickness) / pitch;
        if fits < MAX_GRID_SIZE { fits } else { MAX_GRID_SIZE }
    }

    /// `(width, height)` in pixels of the surface needed to show a `width x height` grid
    pub const fn surface_size(&self, width: GridSize, height: GridSize) -> (Pixel, Pixel) {
        if width == 0 || height == 0 {
            return (0, 0);
        }

        (self.extent(width), self.extent(height))
    }
}
