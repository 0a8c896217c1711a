use lifecanvas::interaction::PointerEvent;

pub enum Event {
    EngineEvent(EngineEvent),
    AppEvent(AppEvent),
    PointerEvent(PointerEvent),
}

pub enum EngineEvent {
    /// Advance the grid by one generation
    Tick,

    /// Start over with a random grid
    Reset,

    /// Start over with an empty grid
    Clear,
}

pub enum AppEvent {
    TogglePause,
    ToggleHeatmap,

    /// Raise or lower the framerate by one tick per second
    Framerate(f64),

    /// Grow or shrink the next grid by this many cells per side
    GridSize(i64),

    /// Exit the application
    Exit,
}
