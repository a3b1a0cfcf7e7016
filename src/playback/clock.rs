//! Discrete Animation Clock
//!
//! The logical timer behind the shared time axis. A host schedule calls
//! `fire` at a fixed interval; the clock decides whether that fire emits a
//! tick. Pausing gates the emission and the increment, never the schedule.

use crate::Result;

use super::Tick;

/// Discrete clock over the tick axis `0..=max_tick`
///
/// The wrap check runs on every fire, including while paused, so a clock
/// sitting just past the end of the axis wraps back to 0 silently. The
/// emitted sequence over one loop is `0, 1, ..., max_tick, 0, ...` with no
/// skips and no duplicates.
#[derive(Debug, Clone)]
pub struct Clock {
    tick: Tick,
    max_tick: Tick,
    running: bool,
}

impl Clock {
    /// Create a paused clock at tick 0
    pub fn new(max_tick: Tick) -> Self {
        Clock {
            tick: 0,
            max_tick,
            running: false,
        }
    }

    /// Handle one schedule fire
    ///
    /// Wraps to 0 when past the end of the axis, then, if running, emits
    /// the current tick through `emit` and advances. Returns the emitted
    /// tick, or `None` when the clock is paused. If `emit` fails the tick
    /// does not advance, so the same tick is emitted on the next fire.
    pub fn fire<F>(&mut self, emit: F) -> Result<Option<Tick>>
    where
        F: FnOnce(Tick) -> Result<()>,
    {
        if self.tick > self.max_tick {
            self.tick = 0;
        }
        if !self.running {
            return Ok(None);
        }
        let tick = self.tick;
        emit(tick)?;
        self.tick += 1;
        Ok(Some(tick))
    }

    /// Let subsequent fires emit ticks
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Hold the current tick; subsequent fires become no-ops
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Rewind to tick 0, leaving the running flag untouched
    pub fn restart(&mut self) {
        self.tick = 0;
    }

    /// Current tick value (may be one past the axis until the next fire
    /// wraps it)
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Whether fires currently emit ticks
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// End of the tick axis
    pub fn max_tick(&self) -> Tick {
        self.max_tick
    }
}
