use std::time::Duration;
use std::time::Instant;

use tracing::warn;

/// Lowest framerate we will run at. Anything below (zero, negative, NaN) is raised to this.
pub const MIN_FRAMERATE: f64 = 0.1;

/// Display state shared by the renderer, the scheduler and the controls.
#[derive(Debug, Clone)]
pub struct Session {
    /// Draw cells as a heatmap of their recent history
    pub heatmap: bool,

    /// Set whenever the heatmap has to start over. Cleared by the next tick.
    pub reset_heatmap: bool,

    pub paused: bool,

    /// Ticks per second. Always at least [`MIN_FRAMERATE`]; use [`Session::set_framerate`].
    framerate: f64,

    /// When the last tick happened. `None` until the first one.
    pub last_tick: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl Session {
    /// A paused session
    pub fn new(framerate: f64) -> Self {
        Self {
            heatmap: false,
            reset_heatmap: false,
            paused: true,
            framerate: clamp_framerate(framerate),
            last_tick: None,
        }
    }

    pub fn framerate(&self) -> f64 {
        self.framerate
    }

    pub fn set_framerate(&mut self, framerate: f64) {
        self.framerate = clamp_framerate(framerate);
    }

    /// Time between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.framerate)
    }

    /// Whether enough time has passed since the last tick for another one
    pub fn tick_due(&self, now: Instant) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.tick_interval(),
        }
    }

    /// Turning the heatmap on starts it over from the baseline
    pub fn set_heatmap(&mut self, heatmap: bool) {
        self.heatmap = heatmap;

        if heatmap {
            self.reset_heatmap = true;
        }
    }

    /// Bookkeeping after a tick has been drawn
    pub fn ticked(&mut self, now: Instant) {
        self.last_tick = Some(now);
        self.reset_heatmap = false;
    }
}

fn clamp_framerate(framerate: f64) -> f64 {
    if framerate >= MIN_FRAMERATE && framerate.is_finite() {
        return framerate;
    }

    warn!(framerate, "framerate out of range, using {MIN_FRAMERATE}");
    MIN_FRAMERATE
}
