use tracing::debug;
use tracing::warn;

use crate::GridSize;
use crate::cells;
use crate::coords::CellGeometry;
use crate::engine::Engine;
use crate::engine::Orientation;

pub const HOVER_PLACEHOLDER: &str = "Hover a cell to see its status";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Stamp a glider instead of toggling
    pub shift: bool,

    /// Stamp a pulsar instead of toggling
    pub ctrl: bool,
}

/// Pointer input over the board. Positions are pixel offsets from the board's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
    Click { x: f64, y: f64, modifiers: Modifiers },

    /// Negative `delta_y` scrolls toward the board
    Wheel { delta_y: f64 },
}

/// What the caller has to do after an event was handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    /// The engine changed and the board should be drawn again right away
    pub redraw: bool,
}

/// Turns pointer input into edits and status text
#[derive(Debug, Clone)]
pub struct InteractionHandler {
    geometry: CellGeometry,
    orientation: Orientation,
    hover: String,
}

impl InteractionHandler {
    pub fn new(geometry: CellGeometry) -> Self {
        Self {
            geometry,
            orientation: Orientation::default(),
            hover: HOVER_PLACEHOLDER.to_string(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Status line for the cell under the pointer
    pub fn hover(&self) -> &str {
        &self.hover
    }

    pub fn handle<E>(&mut self, event: PointerEvent, engine: &mut E) -> Response
    where
        E: Engine + ?Sized,
    {
        match event {
            PointerEvent::Move { x, y } => {
                self.hover = match self.cell_at(engine, x, y) {
                    Some((row, col)) => {
                        let alive = cells::is_alive(engine.index_of(row, col), engine.cells());
                        hover_text(row, col, alive)
                    }
                    None => HOVER_PLACEHOLDER.to_string(),
                };

                Response::default()
            }
            PointerEvent::Leave => {
                self.hover = HOVER_PLACEHOLDER.to_string();

                Response::default()
            }
            PointerEvent::Click { x, y, modifiers } => {
                let Some((row, col)) = self.cell_at(engine, x, y) else {
                    warn!(x, y, "ignoring click outside the grid");
                    return Response::default();
                };

                if modifiers.shift {
                    debug!(row, col, orientation = ?self.orientation, "stamping glider");
                    engine.stamp_glider(row, col, self.orientation);
                } else if modifiers.ctrl {
                    debug!(row, col, "stamping pulsar");
                    engine.stamp_pulsar(row, col);
                } else {
                    engine.toggle_cell(row, col);
                }

                Response { redraw: true }
            }
            PointerEvent::Wheel { delta_y } => {
                if delta_y < 0.0 {
                    self.orientation = self.orientation.next();
                } else {
                    self.orientation = self.orientation.prev();
                }

                Response::default()
            }
        }
    }

    /// The cell under `(x, y)`, if it is on the grid
    fn cell_at<E>(&self, engine: &E, x: f64, y: f64) -> Option<(GridSize, GridSize)>
    where
        E: Engine + ?Sized,
    {
        let (row, col) = self.geometry.cell_at(x, y)?;

        (row < engine.height() && col < engine.width()).then_some((row, col))
    }
}

fn hover_text(row: GridSize, col: GridSize, alive: bool) -> String {
    let (state, action) = if alive {
        ("alive", "kill")
    } else {
        ("dead", "revive")
    };

    format!("Cell {row},{col} is {state}; click to {action}.")
}
