use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::GridSize;
use crate::config::Config;
use crate::engine::Engine;
use crate::engine::EngineFactory;
use crate::interaction::InteractionHandler;
use crate::interaction::PointerEvent;
use crate::render::FrameStats;
use crate::render::GridRenderer;
use crate::session::Session;
use crate::surface::Raster;
use crate::surface::Surface;

/// Text shown around the board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub stats: FrameStats,

    /// Framerate summary, empty until the first scheduled tick
    pub fps: String,
}

/// Everything the display is made of: the engine, the board it is drawn on, and the controls'
/// state.
pub struct App<F: EngineFactory> {
    factory: F,
    engine: F::Engine,

    pub session: Session,

    renderer: GridRenderer,
    surface: Raster,
    interaction: InteractionHandler,

    pub status: Status,

    /// Used by the next reset
    life_probability: f64,

    /// Side length of the next grid
    grid_size: GridSize,
}

impl<F: EngineFactory> App<F> {
    /// Create the app and spawn its first grid
    pub fn new(config: &Config, mut factory: F) -> Self {
        let geometry = config.geometry();
        let life_probability = clamp_probability(config.life_probability);
        let grid_size = clamp_grid_size(config.grid_size, geometry.max_grid_size());

        let mut session = Session::new(config.framerate);
        session.set_heatmap(config.heatmap);

        let engine = factory.create(grid_size, grid_size, life_probability);

        let mut app = Self {
            factory,
            engine,
            session,
            renderer: GridRenderer::new(geometry).with_grid_color(config.grid_color()),
            surface: Raster::default(),
            interaction: InteractionHandler::new(geometry),
            status: Status::default(),
            life_probability,
            grid_size,
        };

        app.fit_surface();
        app.session.reset_heatmap = true;
        app.redraw();

        app
    }

    pub fn engine(&self) -> &F::Engine {
        &self.engine
    }

    pub fn surface(&self) -> &Raster {
        &self.surface
    }

    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    pub fn interaction(&self) -> &InteractionHandler {
        &self.interaction
    }

    pub fn life_probability(&self) -> f64 {
        self.life_probability
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Replace the grid with a fresh one, where each cell is alive with `life_probability`
    pub fn spawn(&mut self, life_probability: f64) {
        let size = self.grid_size;

        info!(size, life_probability, "spawning grid");

        self.engine = self.factory.create(size, size, clamp_probability(life_probability));
        self.fit_surface();
        self.session.reset_heatmap = true;
        self.redraw();
    }

    /// A fresh random grid
    pub fn reset(&mut self) {
        self.spawn(self.life_probability);
    }

    /// A fresh empty grid
    pub fn clear(&mut self) {
        self.spawn(0.0);
    }

    pub fn toggle_pause(&mut self) {
        self.session.paused = !self.session.paused;

        debug!(paused = self.session.paused, "toggled pause");
    }

    /// Label for the play/pause control
    pub fn play_label(&self) -> &'static str {
        if self.session.paused { "Play" } else { "Pause" }
    }

    /// Advance by one generation outside of the schedule. Only available while paused; returns
    /// whether a tick happened.
    pub fn tick_once(&mut self, now: Instant) -> bool {
        if !self.session.paused {
            debug!("ignoring manual tick while running");
            return false;
        }

        self.advance(now);
        true
    }

    /// Tick, draw the result, and mark the tick as done
    pub(crate) fn advance(&mut self, now: Instant) {
        self.engine.tick();
        self.redraw();
        self.session.ticked(now);
    }

    pub fn set_heatmap(&mut self, heatmap: bool) {
        self.session.set_heatmap(heatmap);
    }

    pub fn set_framerate(&mut self, framerate: f64) {
        self.session.set_framerate(framerate);
    }

    pub fn set_life_probability(&mut self, life_probability: f64) {
        self.life_probability = clamp_probability(life_probability);
    }

    /// Takes effect on the next reset
    pub fn set_grid_size(&mut self, grid_size: GridSize) {
        self.grid_size = clamp_grid_size(grid_size, self.renderer.geometry().max_grid_size());
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        let response = self.interaction.handle(event, &mut self.engine);

        if response.redraw {
            self.redraw();
        }
    }

    pub fn redraw(&mut self) {
        self.status.stats = self
            .renderer
            .draw(&self.engine, &self.session, &mut self.surface);
    }

    fn fit_surface(&mut self) {
        let geometry = self.renderer.geometry();
        let (w, h) = geometry.surface_size(self.engine.width(), self.engine.height());

        self.surface.resize(w, h);
    }
}

fn clamp_grid_size(grid_size: GridSize, max: GridSize) -> GridSize {
    if grid_size <= max {
        return grid_size;
    }

    warn!(grid_size, max, "grid too large, using the largest that fits");
    max
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::interaction::Modifiers;
    use crate::universe::UniverseFactory;

    fn app(grid_size: GridSize) -> App<UniverseFactory> {
        let config = Config {
            grid_size,
            seed: Some(3),
            ..Config::default()
        };
        let factory = UniverseFactory::new(config.rules().unwrap(), config.seed);

        App::new(&config, factory)
    }

    #[test]
    fn starts_paused_and_drawn() {
        let app = app(8);

        assert!(app.session.paused);
        assert_eq!(app.play_label(), "Play");
        assert_eq!(app.surface().size(), (89, 89));
        assert!(!app.surface().is_blank());
        assert_eq!(app.status.stats.generation, 0);
        assert_eq!(app.status.stats.population, app.engine().population());
    }

    #[test]
    fn clear_and_resize() {
        let mut app = app(8);

        app.set_grid_size(4);
        app.clear();

        assert_eq!(app.engine().width(), 4);
        assert_eq!(app.engine().population(), 0);
        assert_eq!(app.surface().size(), (45, 45));
        assert!(app.session.reset_heatmap);
    }

    #[test]
    fn manual_tick() {
        let mut app = app(8);
        let now = Instant::now();

        assert!(app.tick_once(now));
        assert_eq!(app.status.stats.generation, 1);
        assert_eq!(app.session.last_tick, Some(now));
        assert!(!app.session.reset_heatmap);

        app.toggle_pause();
        assert_eq!(app.play_label(), "Pause");
        assert!(!app.tick_once(now + Duration::from_secs(1)));
        assert_eq!(app.engine().generation(), 1);
    }

    #[test]
    fn click_redraws_while_paused() {
        let mut app = app(8);
        app.clear();

        app.pointer(PointerEvent::Click {
            x: 15.0,
            y: 25.0,
            modifiers: Modifiers::default(),
        });

        assert_eq!(app.status.stats.population, 1);
        let (x, y) = app.renderer().geometry().cell_center(2, 1);
        assert_eq!(app.surface().pixel(x, y), crate::heatmap::ALIVE_COLOR);
    }

    #[test]
    fn empty_grid() {
        let mut app = app(0);

        assert_eq!(app.surface().size(), (0, 0));

        app.pointer(PointerEvent::Click {
            x: 1.0,
            y: 1.0,
            modifiers: Modifiers::default(),
        });
        app.tick_once(Instant::now());

        assert_eq!(app.engine().population(), 0);
        assert!(app.surface().is_blank());
    }

    #[test]
    fn grid_size_is_clamped() {
        let mut app = app(8);
        let max = app.renderer().geometry().max_grid_size();

        app.set_grid_size(GridSize::MAX);
        assert_eq!(app.grid_size(), max);

        let extent = app.renderer().geometry().extent(app.grid_size());
        assert!(extent <= crate::coords::MAX_EXTENT);

        let config = Config {
            cell_size: 100_000_000,
            ..Config::default()
        };
        let factory = UniverseFactory::new(config.rules().unwrap(), Some(3));
        let app = App::new(&config, factory);
        assert_eq!(app.grid_size(), 0);
        assert_eq!(app.surface().size(), (0, 0));
    }

    #[test]
    fn probability_is_clamped() {
        let mut app = app(4);

        app.set_life_probability(3.0);
        assert_eq!(app.life_probability(), 1.0);

        app.reset();
        assert_eq!(app.engine().population(), 16);
    }
}
