use std::io;
use std::io::Stdout;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color;
use crossterm::terminal;
use crossterm::terminal::ClearType;
use tracing::warn;

use lifecanvas::GridSize;
use lifecanvas::app::App;
use lifecanvas::engine::EngineFactory;
use lifecanvas::scheduler::FrameHost;
use lifecanvas::scheduler::StopHandle;

use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;
use crate::io::Board;
use crate::io::CELL_COLUMNS;
use crate::io::convert_event;

const HELP: &str = "space play/pause | n tick | h heatmap | r reset | c clear | +/- framerate | ]/[ grid size | q quit";

/// Shows the board in the terminal and feeds it keyboard and mouse input.
///
/// The terminal is put back the way it was when this is dropped.
pub struct TerminalHost {
    stdout: Stdout,
    frametime: Duration,
}

impl TerminalHost {
    pub fn new(frametime: Duration) -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
        )?;

        Ok(Self { stdout, frametime })
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        let res = execute!(
            self.stdout,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
        )
        .and_then(|_| terminal::disable_raw_mode());

        if let Err(e) = res {
            warn!("Failed to restore the terminal: {e}");
        }
    }
}

impl<F: EngineFactory> FrameHost<F> for TerminalHost {
    /// Poll events for as long as a frame lasts
    fn next_frame(&mut self, app: &mut App<F>, stop: &StopHandle) -> anyhow::Result<Instant> {
        let start = Instant::now();

        loop {
            let time_left = self.frametime.saturating_sub(start.elapsed());
            if time_left.is_zero() || !event::poll(time_left)? {
                break;
            }

            let board = Board::of(app);
            if let Some(event) = convert_event(event::read()?, &board) {
                apply(app, event, stop);
            }

            if stop.is_stopped() {
                break;
            }
        }

        Ok(Instant::now())
    }

    fn present(&mut self, app: &App<F>) -> anyhow::Result<()> {
        let Board { geometry, width, height } = Board::of(app);
        let surface = app.surface();

        queue!(self.stdout, cursor::MoveTo(0, 0))?;

        for row in 0..height {
            for col in 0..width {
                let (x, y) = geometry.cell_center(row, col);
                let [r, g, b, _] = surface.pixel(x, y).to_bytes();

                queue!(
                    self.stdout,
                    style::SetBackgroundColor(Color::Rgb { r, g, b }),
                    style::Print(" ".repeat(CELL_COLUMNS as usize)),
                )?;
            }

            queue!(self.stdout, style::ResetColor, cursor::MoveToNextLine(1))?;
        }

        let session = &app.session;
        let status = [
            format!(
                "Generation: {}  Population: {}",
                app.status.stats.generation, app.status.stats.population
            ),
            format!(
                "[{}]  Orientation: {}  Heatmap: {}  Framerate: {}  Next grid: {}x{} @ {:.2}",
                app.play_label(),
                app.interaction().orientation().arrow(),
                if session.heatmap { "on" } else { "off" },
                session.framerate(),
                app.grid_size(),
                app.grid_size(),
                app.life_probability(),
            ),
            app.interaction().hover().to_string(),
            HELP.to_string(),
        ];

        for line in status.iter().map(String::as_str).chain(app.status.fps.lines()) {
            queue!(
                self.stdout,
                style::Print(line),
                terminal::Clear(ClearType::UntilNewLine),
                cursor::MoveToNextLine(1),
            )?;
        }

        queue!(self.stdout, terminal::Clear(ClearType::FromCursorDown))?;
        self.stdout.flush()?;

        Ok(())
    }
}

/// Apply one input event to the app
fn apply<F: EngineFactory>(app: &mut App<F>, event: Event, stop: &StopHandle) {
    match event {
        Event::EngineEvent(EngineEvent::Tick) => {
            app.tick_once(Instant::now());
        }
        Event::EngineEvent(EngineEvent::Reset) => app.reset(),
        Event::EngineEvent(EngineEvent::Clear) => app.clear(),
        Event::AppEvent(AppEvent::TogglePause) => app.toggle_pause(),
        Event::AppEvent(AppEvent::ToggleHeatmap) => {
            let heatmap = !app.session.heatmap;
            app.set_heatmap(heatmap);
        }
        Event::AppEvent(AppEvent::Framerate(delta)) => {
            let framerate = app.session.framerate() + delta;
            app.set_framerate(framerate);
        }
        Event::AppEvent(AppEvent::GridSize(delta)) => {
            let size = (app.grid_size() as i64 + delta).clamp(0, GridSize::MAX as i64);
            app.set_grid_size(size as GridSize);
        }
        Event::AppEvent(AppEvent::Exit) => stop.stop(),
        Event::PointerEvent(event) => app.pointer(event),
    }
}
