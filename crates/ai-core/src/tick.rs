/// Per-tick timing passed to every execution call.
///
/// `time_seconds` is the run clock: every elapsed-time computation in the runtime
/// reads it, so two measurements taken against the same context sequence are
/// always comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub time_seconds: f32,
}

impl TickContext {
    pub fn new(dt_seconds: f32) -> Self {
        Self {
            tick: 0,
            dt_seconds,
            time_seconds: 0.0,
        }
    }

    /// Context for the following tick, `dt_seconds` later.
    pub fn advance(&self, dt_seconds: f32) -> Self {
        Self {
            tick: self.tick + 1,
            dt_seconds,
            time_seconds: self.time_seconds + dt_seconds,
        }
    }
}

impl Default for TickContext {
    fn default() -> Self {
        Self::new(0.0)
    }
}
