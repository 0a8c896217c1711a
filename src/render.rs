use tracing::debug;

use crate::GridSize;
use crate::cells;
use crate::color::Rgba;
use crate::coords::CellGeometry;
use crate::engine::Engine;
use crate::heatmap;
use crate::heatmap::BASELINE;
use crate::session::Session;
use crate::surface::Line;
use crate::surface::Rect;
use crate::surface::Surface;

pub const GRID_COLOR: Rgba = Rgba::opaque(204.0, 204.0, 204.0);

/// Figures shown next to the board after each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub generation: u64,
    pub population: u64,
}

/// Draws the grid and its cells.
///
/// The color each cell was last drawn with is kept here rather than read back from the surface,
/// so the heatmap only ever sees colors from the previous frame and never loses precision to the
/// surface's 8 bit channels.
pub struct GridRenderer {
    geometry: CellGeometry,
    grid_color: Rgba,

    /// Last color drawn for every cell, row-major
    colors: Vec<Rgba>,

    /// Grid dimensions `colors` was sized for
    dims: (GridSize, GridSize),
}

impl GridRenderer {
    pub fn new(geometry: CellGeometry) -> Self {
        Self {
            geometry,
            grid_color: GRID_COLOR,
            colors: Vec::new(),
            dims: (0, 0),
        }
    }

    pub fn with_grid_color(mut self, color: Rgba) -> Self {
        self.grid_color = color;
        self
    }

    pub fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    /// The color `(row, col)` was last drawn with
    pub fn color(&self, row: GridSize, col: GridSize) -> Option<Rgba> {
        let (width, height) = self.dims;
        if row >= height || col >= width {
            return None;
        }

        self.colors
            .get(row as usize * width as usize + col as usize)
            .copied()
    }

    /// Draw a full frame of `engine` onto `surface`. Nothing is drawn for an empty grid.
    pub fn draw<E, S>(&mut self, engine: &E, session: &Session, surface: &mut S) -> FrameStats
    where
        E: Engine + ?Sized,
        S: Surface + ?Sized,
    {
        let stats = FrameStats {
            generation: engine.generation(),
            population: engine.population(),
        };

        let (width, height) = (engine.width(), engine.height());
        if width == 0 || height == 0 {
            return stats;
        }

        self.fit(width, height);
        self.draw_gridlines(width, height, surface);
        self.draw_cells(engine, session, surface);

        stats
    }

    /// Start the color history over whenever the grid changes shape
    fn fit(&mut self, width: GridSize, height: GridSize) {
        if self.dims == (width, height) {
            return;
        }

        debug!(width, height, "resizing color history");

        self.dims = (width, height);
        self.colors.clear();
        self.colors
            .resize(width as usize * height as usize, BASELINE);
    }

    fn draw_gridlines<S>(&self, width: GridSize, height: GridSize, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        let pitch = self.geometry.pitch() as f32;
        let thickness = self.geometry.thickness;
        let half = thickness as f32 / 2.0;

        let right = self.geometry.extent(width) as f32;
        let bottom = self.geometry.extent(height) as f32;

        let vertical = (0..=width).map(|i| {
            let x = i as f32 * pitch + half;
            Line {
                from: (x, 0.0),
                to: (x, bottom),
            }
        });

        let horizontal = (0..=height).map(|j| {
            let y = j as f32 * pitch + half;
            Line {
                from: (0.0, y),
                to: (right, y),
            }
        });

        let lines: Vec<Line> = vertical.chain(horizontal).collect();
        surface.stroke(&lines, thickness, self.grid_color);
    }

    fn draw_cells<E, S>(&mut self, engine: &E, session: &Session, surface: &mut S)
    where
        E: Engine + ?Sized,
        S: Surface + ?Sized,
    {
        let (width, height) = self.dims;

        // never hold on to this across frames: the engine may reallocate it
        let cells = engine.cells();

        for row in 0..height {
            for col in 0..width {
                let slot = row as usize * width as usize + col as usize;
                let alive = cells::is_alive(engine.index_of(row, col), cells);

                // a pending reset only matters to the heatmap; flat colors stay flat
                let color = heatmap::blend(
                    self.colors[slot],
                    alive,
                    session.reset_heatmap && session.heatmap,
                    session.heatmap,
                );
                self.colors[slot] = color;

                let (x, y) = self.geometry.cell_origin(row, col);
                let rect = Rect {
                    x,
                    y,
                    w: self.geometry.cell_size,
                    h: self.geometry.cell_size,
                };

                surface.fill_rect(rect, color);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::Engine;
    use crate::heatmap::ALIVE_COLOR;
    use crate::heatmap::DEAD_COLOR;
    use crate::rule_set::B3S23;
    use crate::surface::Raster;
    use crate::universe::Universe;

    fn raster_for(geometry: CellGeometry, universe: &Universe) -> Raster {
        let (w, h) = geometry.surface_size(universe.width(), universe.height());
        Raster::new(w, h)
    }

    /// One character per cell, sampled from the middle of the cell
    fn board(raster: &Raster, geometry: CellGeometry, width: GridSize, height: GridSize) -> String {
        let mut s = String::new();
        for row in 0..height {
            if row > 0 {
                s.push('\n');
            }

            for col in 0..width {
                let (x, y) = geometry.cell_center(row, col);
                s.push(match raster.pixel(x, y) {
                    c if c == ALIVE_COLOR => '#',
                    c if c == DEAD_COLOR => '.',
                    _ => '?',
                });
            }
        }

        s
    }

    #[test]
    fn flat_board() {
        let geometry = CellGeometry::new(4, 1);
        let mut universe = Universe::new(5, 3, B3S23);
        universe.set_cell(0, 0, true);
        universe.set_cell(1, 2, true);
        universe.set_cell(2, 4, true);

        let mut raster = raster_for(geometry, &universe);
        let mut renderer = GridRenderer::new(geometry);
        let stats = renderer.draw(&universe, &Session::default(), &mut raster);

        assert_eq!(stats, FrameStats { generation: 0, population: 3 });
        insta::assert_snapshot!(board(&raster, geometry, 5, 3), @r"
        #....
        ..#..
        ....#
        ");
    }

    #[test]
    fn pending_reset_keeps_flat_colors() {
        let geometry = CellGeometry::new(4, 1);
        let mut universe = Universe::new(2, 1, B3S23);
        universe.set_cell(0, 0, true);

        let mut session = Session::default();
        session.reset_heatmap = true;

        let mut raster = raster_for(geometry, &universe);
        let mut renderer = GridRenderer::new(geometry);
        renderer.draw(&universe, &session, &mut raster);

        assert_eq!(renderer.color(0, 0), Some(ALIVE_COLOR));
        assert_eq!(renderer.color(0, 1), Some(DEAD_COLOR));
    }

    #[test]
    fn gridlines() {
        let geometry = CellGeometry::new(4, 1);
        let universe = Universe::new(2, 2, B3S23);

        let mut raster = raster_for(geometry, &universe);
        GridRenderer::new(geometry).draw(&universe, &Session::default(), &mut raster);

        // boundaries every 5 pixels, cells in between
        for x in [0, 5, 10] {
            assert_eq!(raster.pixel(x, 3), GRID_COLOR, "x = {x}");
        }
        for y in [0, 5, 10] {
            assert_eq!(raster.pixel(3, y), GRID_COLOR, "y = {y}");
        }
        assert_eq!(raster.pixel(1, 1), DEAD_COLOR);
        assert_eq!(raster.pixel(9, 9), DEAD_COLOR);
    }

    #[test]
    fn heatmap_history() {
        let geometry = CellGeometry::default();
        let mut universe = Universe::new(2, 1, B3S23);
        universe.set_cell(0, 0, true);

        let mut session = Session::default();
        session.set_heatmap(true);

        let mut raster = raster_for(geometry, &universe);
        let mut renderer = GridRenderer::new(geometry);

        renderer.draw(&universe, &session, &mut raster);
        assert_eq!(renderer.color(0, 0), Some(BASELINE));
        assert_eq!(renderer.color(0, 1), Some(BASELINE));

        session.reset_heatmap = false;
        renderer.draw(&universe, &session, &mut raster);
        renderer.draw(&universe, &session, &mut raster);

        assert_eq!(renderer.color(0, 0), Some(Rgba::opaque(179.0, 179.0, 179.0)));
        assert_eq!(renderer.color(0, 1), Some(Rgba::opaque(77.0, 77.0, 77.0)));

        let (x, y) = geometry.cell_center(0, 0);
        assert_eq!(raster.pixel(x, y), Rgba::opaque(179.0, 179.0, 179.0));
    }

    #[test]
    fn history_follows_dimensions() {
        let geometry = CellGeometry::default();
        let mut session = Session::default();
        session.heatmap = true;

        let mut renderer = GridRenderer::new(geometry);

        let mut universe = Universe::new(2, 2, B3S23);
        universe.set_cell(1, 1, true);
        let mut raster = raster_for(geometry, &universe);
        renderer.draw(&universe, &session, &mut raster);
        assert_eq!(renderer.color(1, 1), Some(Rgba::opaque(153.5, 153.5, 153.5)));

        let universe = Universe::new(3, 3, B3S23);
        let mut raster = raster_for(geometry, &universe);
        renderer.draw(&universe, &session, &mut raster);

        assert_eq!(renderer.color(1, 1), Some(Rgba::opaque(102.5, 102.5, 102.5)));
        assert_eq!(renderer.color(2, 2), Some(Rgba::opaque(102.5, 102.5, 102.5)));
    }

    #[test]
    fn empty_grid() {
        let geometry = CellGeometry::default();
        let universe = Universe::new(0, 7, B3S23);
        let mut raster = Raster::new(20, 20);

        let mut renderer = GridRenderer::new(geometry);
        renderer.draw(&universe, &Session::default(), &mut raster);

        assert!(raster.is_blank());
        assert_eq!(renderer.color(0, 0), None);
    }
}
