use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use tracing::info;
use tracing::trace;

use crate::app::App;
use crate::engine::EngineFactory;
use crate::fps::FpsCounter;
use crate::fps::FpsWindow;

/// Stops a running [`FrameScheduler`]. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// The display driving the schedule
pub trait FrameHost<F: EngineFactory> {
    /// Wait for the next display refresh and return its time. Input arriving in the meantime is
    /// applied to `app`; a request to quit should go through `stop`.
    fn next_frame(&mut self, app: &mut App<F>, stop: &StopHandle) -> anyhow::Result<Instant>;

    /// Show the current state of `app`
    fn present(&mut self, app: &App<F>) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// The engine ticked and the board was redrawn
    Ticked,

    /// Paused, or too early for the next tick
    Idle,
}

/// Ticks the engine at the session's framerate, once per display refresh at most
pub struct FrameScheduler {
    fps: FpsCounter,
    stop: StopHandle,
}

impl FrameScheduler {
    pub fn new(start: Instant) -> Self {
        Self {
            fps: FpsCounter::new(start),
            stop: StopHandle::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn fps(&self) -> &FpsWindow {
        self.fps.window()
    }

    /// Handle one display refresh at `now`
    pub fn frame<F: EngineFactory>(&mut self, now: Instant, app: &mut App<F>) -> Frame {
        if app.session.paused || !app.session.tick_due(now) {
            return Frame::Idle;
        }

        app.advance(now);

        if let Some(stats) = self.fps.sample(now) {
            trace!(fps = stats.latest, "frame");
            app.status.fps = stats.to_string();
        }

        Frame::Ticked
    }

    /// Run frames from `host` until stopped
    pub fn run<F, H>(&mut self, app: &mut App<F>, host: &mut H) -> anyhow::Result<()>
    where
        F: EngineFactory,
        H: FrameHost<F>,
    {
        host.present(app)?;

        while !self.stop.is_stopped() {
            let now = host.next_frame(app, &self.stop)?;
            if self.stop.is_stopped() {
                break;
            }

            self.frame(now, app);
            host.present(app)?;
        }

        info!("frame loop stopped");

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::engine::Engine;
    use crate::universe::UniverseFactory;

    fn app(framerate: f64) -> App<UniverseFactory> {
        let config = Config {
            grid_size: 8,
            framerate,
            seed: Some(11),
            ..Config::default()
        };

        App::new(&config, UniverseFactory::new(Default::default(), config.seed))
    }

    /// Replays a fixed list of frame times, then asks to stop
    struct ScriptedHost {
        frames: VecDeque<Instant>,
        presented: usize,
    }

    impl FrameHost<UniverseFactory> for ScriptedHost {
        fn next_frame(
            &mut self,
            _app: &mut App<UniverseFactory>,
            stop: &StopHandle,
        ) -> anyhow::Result<Instant> {
            match self.frames.pop_front() {
                Some(t) => Ok(t),
                None => {
                    stop.stop();
                    Ok(Instant::now())
                }
            }
        }

        fn present(&mut self, _app: &App<UniverseFactory>) -> anyhow::Result<()> {
            self.presented += 1;
            Ok(())
        }
    }

    #[test]
    fn paused_does_nothing() {
        let t0 = Instant::now();
        let mut app = app(10.0);
        let mut scheduler = FrameScheduler::new(t0);

        assert_eq!(scheduler.frame(t0, &mut app), Frame::Idle);
        assert_eq!(app.engine().generation(), 0);
    }

    #[test]
    fn gated_by_framerate() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;

        let mut app = app(10.0);
        app.toggle_pause();
        let mut scheduler = FrameScheduler::new(t0);

        // first frame ticks right away
        assert_eq!(scheduler.frame(t0 + ms(10), &mut app), Frame::Ticked);

        assert_eq!(scheduler.frame(t0 + ms(60), &mut app), Frame::Idle);
        assert_eq!(scheduler.frame(t0 + ms(110), &mut app), Frame::Ticked);
        assert_eq!(scheduler.frame(t0 + ms(210), &mut app), Frame::Ticked);
        assert_eq!(scheduler.frame(t0 + ms(400), &mut app), Frame::Ticked);

        assert_eq!(app.engine().generation(), 4);
        assert_eq!(scheduler.fps().len(), 4);
        assert!(app.status.fps.starts_with("Frames per Second:"));
    }

    #[test]
    fn clears_heatmap_reset() {
        let t0 = Instant::now();
        let mut app = app(10.0);
        app.set_heatmap(true);
        app.toggle_pause();

        let mut scheduler = FrameScheduler::new(t0);
        scheduler.frame(t0, &mut app);

        assert!(!app.session.reset_heatmap);
        assert_eq!(app.session.last_tick, Some(t0));
    }

    #[test]
    fn run_until_stopped() {
        let t0 = Instant::now();
        let mut app = app(10.0);
        app.toggle_pause();

        let frames = (0..5).map(|i| t0 + Duration::from_millis(50 * i)).collect();
        let mut host = ScriptedHost {
            frames,
            presented: 0,
        };

        let mut scheduler = FrameScheduler::new(t0);
        scheduler.run(&mut app, &mut host).unwrap();

        // ticks at 0, 100 and 200 ms
        assert_eq!(app.engine().generation(), 3);
        assert_eq!(host.presented, 6);
        assert!(scheduler.stop_handle().is_stopped());
    }
}
