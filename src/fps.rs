use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use tracing::trace;

/// How many samples [`FpsWindow`] keeps
pub const FPS_WINDOW: usize = 100;

/// The latest [`FPS_WINDOW`] framerate samples, oldest first
#[derive(Debug, Clone, Default)]
pub struct FpsWindow {
    samples: VecDeque<f64>,
}

/// Statistics over an [`FpsWindow`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsStats {
    pub latest: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FpsWindow {
    pub fn push(&mut self, fps: f64) {
        if self.samples.len() == FPS_WINDOW {
            self.samples.pop_front();
        }

        self.samples.push_back(fps);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn stats(&self) -> Option<FpsStats> {
        let &latest = self.samples.back()?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;

        for &fps in &self.samples {
            sum += fps;
            min = min.min(fps);
            max = max.max(fps);
        }

        Some(FpsStats {
            latest,
            mean: sum / self.samples.len() as f64,
            min,
            max,
        })
    }
}

impl fmt::Display for FpsStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames per Second:")?;
        // halves round up, not to even
        writeln!(f, "         latest = {}", self.latest.round())?;
        writeln!(f, "avg of last {FPS_WINDOW} = {}", self.mean.round())?;
        writeln!(f, "min of last {FPS_WINDOW} = {}", self.min.round())?;
        write!(f, "max of last {FPS_WINDOW} = {}", self.max.round())
    }
}

/// Turns the time between consecutive samples into framerates
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: FpsWindow,
    last: Instant,
}

impl FpsCounter {
    /// `start` counts as the previous sample of the first call to [`FpsCounter::sample`]
    pub fn new(start: Instant) -> Self {
        Self {
            window: FpsWindow::default(),
            last: start,
        }
    }

    /// Record a frame at `now`. Returns the updated statistics, or `None` when no time has passed
    /// since the previous sample (the sample is dropped).
    pub fn sample(&mut self, now: Instant) -> Option<FpsStats> {
        let delta = now.saturating_duration_since(self.last);
        self.last = now;

        if delta.is_zero() {
            trace!("dropping fps sample with no elapsed time");
            return None;
        }

        self.window.push(1.0 / delta.as_secs_f64());
        self.window.stats()
    }

    pub fn window(&self) -> &FpsWindow {
        &self.window
    }
}
