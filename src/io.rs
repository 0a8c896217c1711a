use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use lifecanvas::GridSize;
use lifecanvas::app::App;
use lifecanvas::coords::CellGeometry;
use lifecanvas::engine::Engine;
use lifecanvas::engine::EngineFactory;
use lifecanvas::interaction::Modifiers;
use lifecanvas::interaction::PointerEvent;

use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;

/// Terminal columns used to show one cell, so that cells come out roughly square
pub const CELL_COLUMNS: u16 = 2;

/// Where the board sits in the terminal: the top-left corner, one cell per `CELL_COLUMNS x 1`
/// block of terminal cells.
#[derive(Clone, Copy)]
pub struct Board {
    pub geometry: CellGeometry,
    pub width: GridSize,
    pub height: GridSize,
}

impl Board {
    pub fn of<F: EngineFactory>(app: &App<F>) -> Self {
        Self {
            geometry: app.renderer().geometry(),
            width: app.engine().width(),
            height: app.engine().height(),
        }
    }

    /// The surface pixel shown at a terminal position: the middle of the cell drawn there
    fn pixel_at(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let (row, col) = (row as GridSize, (column / CELL_COLUMNS) as GridSize);
        if row >= self.height || col >= self.width {
            return None;
        }

        let (x, y) = self.geometry.cell_center(row, col);
        Some((x as f64, y as f64))
    }
}

/// Converts a crossterm event into a lifecanvas event
pub fn convert_event(event: CrossTermEvent, board: &Board) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event, board),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let event = match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Event::AppEvent(AppEvent::Exit),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Event::AppEvent(AppEvent::TogglePause),
        KeyEvent {
            code: KeyCode::Char('h'),
            ..
        } => Event::AppEvent(AppEvent::ToggleHeatmap),
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => Event::AppEvent(AppEvent::Framerate(1.0)),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Event::AppEvent(AppEvent::Framerate(-1.0)),
        KeyEvent {
            code: KeyCode::Char(']'),
            ..
        } => Event::AppEvent(AppEvent::GridSize(8)),
        KeyEvent {
            code: KeyCode::Char('['),
            ..
        } => Event::AppEvent(AppEvent::GridSize(-8)),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => Event::EngineEvent(EngineEvent::Tick),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Event::EngineEvent(EngineEvent::Reset),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => Event::EngineEvent(EngineEvent::Clear),
        _ => return None,
    };

    Some(event)
}

fn convert_mouse(mouse_event: MouseEvent, board: &Board) -> Option<Event> {
    let pixel = board.pixel_at(mouse_event.column, mouse_event.row);

    let event = match mouse_event.kind {
        MouseEventKind::Moved => match pixel {
            Some((x, y)) => PointerEvent::Move { x, y },
            None => PointerEvent::Leave,
        },
        MouseEventKind::Down(MouseButton::Left) => {
            let (x, y) = pixel?;
            let modifiers = Modifiers {
                shift: mouse_event.modifiers.contains(KeyModifiers::SHIFT),
                ctrl: mouse_event.modifiers.contains(KeyModifiers::CONTROL),
            };

            PointerEvent::Click { x, y, modifiers }
        }
        MouseEventKind::ScrollUp => PointerEvent::Wheel { delta_y: -1.0 },
        MouseEventKind::ScrollDown => PointerEvent::Wheel { delta_y: 1.0 },
        _ => return None,
    };

    Some(Event::PointerEvent(event))
}
