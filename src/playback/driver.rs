//! Tick Driver
//!
//! The wall-clock half of the clock contract: fires a player at a fixed
//! rate on the calling thread. What a fire means is decided by the logical
//! clock; this module only owns the pacing.

use std::thread;
use std::time::{Duration, Instant};

use crate::render::Renderer;
use crate::{Result, RunmapError};

use super::player::Player;

/// Fixed-rate schedule driving a player on the calling thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDriver {
    period: Duration,
}

impl TickDriver {
    /// Build a driver firing `ticks_per_second` times per second
    pub fn from_rate(ticks_per_second: u32) -> Result<Self> {
        if ticks_per_second == 0 {
            return Err(RunmapError::ConfigError(
                "ticksPerSecond must be positive".to_string(),
            ));
        }
        Ok(TickDriver {
            period: Duration::from_secs_f64(1.0 / f64::from(ticks_per_second)),
        })
    }

    /// Interval between fires
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drive `player` until `control` returns `false` or a fire fails
    ///
    /// Each pass sleeps to the next deadline, polls `control` (host input;
    /// returning `false` tears the schedule down), then fires the player
    /// once. Deadlines advance by whole periods. When the host has fallen
    /// more than a period behind, the deadline realigns to now, so missed
    /// slots are skipped rather than drawn in a burst; frames are still
    /// never drawn out of order.
    pub fn run<R, F>(&self, player: &mut Player<R>, mut control: F) -> Result<()>
    where
        R: Renderer,
        F: FnMut(&mut Player<R>) -> bool,
    {
        let mut next = Instant::now() + self.period;
        loop {
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
            }
            if !control(player) {
                return Ok(());
            }
            player.on_interval()?;

            next += self.period;
            let now = Instant::now();
            if next < now {
                next = now + self.period;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationConfig;
    use crate::playback::PlaybackController;
    use crate::render::CaptureRenderer;
    use crate::track::{RawRow, TrackStore};

    fn player() -> Player<CaptureRenderer> {
        let store = TrackStore::load(vec![
            RawRow {
                lon: 0.0,
                lat: 0.0,
                index: 1,
                len: 2,
            },
            RawRow {
                lon: 1.0,
                lat: 0.0,
                index: 1,
                len: 2,
            },
        ])
        .unwrap();
        Player::new(store, &AnimationConfig::default(), CaptureRenderer::new()).unwrap()
    }

    #[test]
    fn test_from_rate_rejects_zero() {
        assert!(matches!(
            TickDriver::from_rate(0),
            Err(RunmapError::ConfigError(_))
        ));
    }

    #[test]
    fn test_period_matches_rate() {
        assert_eq!(
            TickDriver::from_rate(20).unwrap().period(),
            Duration::from_millis(50)
        );

        let reference_period = TickDriver::from_rate(15).unwrap().period();
        assert!(reference_period > Duration::from_millis(66));
        assert!(reference_period < Duration::from_millis(67));
    }

    #[test]
    fn test_run_stops_when_control_returns_false() {
        let driver = TickDriver::from_rate(1000).unwrap();
        let mut player = player();
        player.play().unwrap();

        let mut passes = 0;
        driver
            .run(&mut player, |_| {
                passes += 1;
                passes <= 3
            })
            .unwrap();

        assert_eq!(player.renderer().ticks(), vec![0, 1, 2]);
    }

    #[test]
    fn test_run_polls_control_while_paused() {
        let driver = TickDriver::from_rate(1000).unwrap();
        let mut player = player();

        // Never played: fires are no-ops but control still runs each pass
        let mut passes = 0;
        driver
            .run(&mut player, |_| {
                passes += 1;
                passes < 3
            })
            .unwrap();

        assert_eq!(passes, 3);
        assert!(player.renderer().frames.is_empty());
    }
}
