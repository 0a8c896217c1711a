pub mod app;
pub mod cells;
pub mod color;
pub mod config;
pub mod coords;
pub mod engine;
pub mod fps;
pub mod heatmap;
pub mod interaction;
pub mod render;
pub mod rule_set;
pub mod scheduler;
pub mod session;
pub mod surface;
pub mod universe;

/// Rows and columns of the grid
pub type GridSize = u32;

/// Positions and lengths on the render surface
pub type Pixel = u32;
