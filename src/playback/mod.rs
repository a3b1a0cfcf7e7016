//! Playback Engine
//!
//! The discrete clock behind the shared time axis, the pure frame
//! resolver, and the player that ties both to a renderer. Everything in
//! this module runs synchronously on the driving thread.

pub mod clock;
pub mod driver;
pub mod frame;
pub mod player;

pub use clock::Clock;
pub use driver::TickDriver;
pub use frame::{resolve, Frame, TrackFrame};
pub use player::{AnimationStats, Player};

/// Discrete position on the shared time axis
pub type Tick = u32;

/// Playback state of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not started yet
    #[default]
    Stopped,
    /// Advancing one tick per scheduled fire
    Playing,
    /// Holding the current tick; scheduled fires draw nothing
    Paused,
}

/// Transport controls for anything that replays tracks
pub trait PlaybackController {
    /// Begin or resume playback
    fn play(&mut self) -> crate::Result<()>;

    /// Pause playback, keeping the current tick
    fn pause(&mut self) -> crate::Result<()>;

    /// Rewind to tick 0, draw that frame immediately, and resume playing
    fn restart(&mut self) -> crate::Result<()>;

    /// Current playback state
    fn state(&self) -> PlaybackState;
}

/// Progress through one loop of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Recorded seconds covered so far (tick times the resample interval)
    pub elapsed_seconds: u64,
    /// Completion percentage, rounded to the nearest whole percent
    pub percent: u8,
}

impl Progress {
    /// Derive the progress of `tick` on an axis ending at `max_tick`
    pub fn at_tick(tick: Tick, max_tick: Tick, resample_interval_seconds: u32) -> Self {
        let elapsed_seconds = u64::from(tick) * u64::from(resample_interval_seconds);
        let percent = if max_tick == 0 {
            // Degenerate axis: a single-instant animation is always complete
            100
        } else {
            ((f64::from(tick) / f64::from(max_tick)) * 100.0).round() as u8
        };
        Progress {
            elapsed_seconds,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_state_default_is_stopped() {
        assert_eq!(PlaybackState::default(), PlaybackState::Stopped);
    }

    #[test]
    fn test_progress_at_start() {
        let progress = Progress::at_tick(0, 10, 30);
        assert_eq!(progress.elapsed_seconds, 0);
        assert_eq!(progress.percent, 0);
    }

    #[test]
    fn test_progress_midway_rounds_percent() {
        // 2 / 6 = 33.33% rounds down, 4 / 6 = 66.67% rounds up
        assert_eq!(Progress::at_tick(2, 6, 30).percent, 33);
        assert_eq!(Progress::at_tick(4, 6, 30).percent, 67);
    }

    #[test]
    fn test_progress_elapsed_scales_with_interval() {
        let progress = Progress::at_tick(180, 200, 30);
        assert_eq!(progress.elapsed_seconds, 5400);
        assert_eq!(progress.percent, 90);
    }

    #[test]
    fn test_progress_at_end_is_complete() {
        assert_eq!(Progress::at_tick(10, 10, 30).percent, 100);
    }
}
