//! Animation Player
//!
//! Ties the track store, the discrete clock, and a renderer together
//! behind the transport controls. One scheduled fire resolves and draws at
//! most one frame, synchronously on the driving thread.

use crate::config::AnimationConfig;
use crate::render::{MarkerStyle, Renderer, TrackStyle};
use crate::track::TrackStore;
use crate::Result;

use super::clock::Clock;
use super::frame::resolve;
use super::{PlaybackController, PlaybackState, Progress, Tick};

/// Counters accumulated over the life of a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationStats {
    /// Frames drawn since construction, restart draws included
    pub frames_drawn: u64,
    /// Completed loops over the whole tick axis
    pub loops_completed: u64,
}

/// Replays a track store through a renderer on a discrete clock
///
/// The player never schedules anything itself; a host calls `on_interval`
/// at the configured rate (see `TickDriver` for the wall-clock half) and
/// the transport methods in response to input. Dropping the player ends
/// the animation with it.
pub struct Player<R: Renderer> {
    store: TrackStore,
    clock: Clock,
    renderer: R,
    track_style: TrackStyle,
    marker_style: MarkerStyle,
    resample_interval_seconds: u32,
    started: bool,
    last_drawn: Option<Tick>,
    stats: AnimationStats,
}

impl<R: Renderer> Player<R> {
    /// Build a player from a loaded store, a configuration, and a renderer
    ///
    /// The configuration is validated first; an invalid one fails with
    /// `ConfigError` before anything is constructed. A fresh player is
    /// Stopped at tick 0 and draws nothing until `play` or `restart`.
    pub fn new(store: TrackStore, config: &AnimationConfig, renderer: R) -> Result<Self> {
        config.validate()?;

        let clock = Clock::new(store.max_tick());
        Ok(Player {
            store,
            clock,
            renderer,
            track_style: config.track_style(),
            marker_style: config.marker_style(),
            resample_interval_seconds: config.resample_interval_seconds,
            started: false,
            last_drawn: None,
            stats: AnimationStats::default(),
        })
    }

    /// Handle one schedule fire: resolve and draw at most one frame
    ///
    /// Returns the tick that was drawn, or `None` while paused or stopped.
    /// A renderer failure propagates and leaves the clock on the failed
    /// tick, so the same frame is retried on the next fire.
    pub fn on_interval(&mut self) -> Result<Option<Tick>> {
        let store = &self.store;
        let renderer = &mut self.renderer;
        let track_style = &self.track_style;
        let marker_style = &self.marker_style;

        let drawn = self.clock.fire(|tick| {
            let frame = resolve(store, tick);
            renderer.draw(&frame, track_style, marker_style)
        })?;

        if let Some(tick) = drawn {
            self.last_drawn = Some(tick);
            self.stats.frames_drawn += 1;
            if tick == self.clock.max_tick() {
                self.stats.loops_completed += 1;
            }
        }
        Ok(drawn)
    }

    /// Progress at the most recently drawn tick
    ///
    /// A paused player keeps reporting the frame on screen, not the tick
    /// pending on the clock.
    pub fn progress(&self) -> Progress {
        Progress::at_tick(
            self.last_drawn.unwrap_or(0),
            self.store.max_tick(),
            self.resample_interval_seconds,
        )
    }

    /// Flip between Playing and Paused; a Stopped player starts playing
    pub fn toggle(&mut self) -> Result<()> {
        match self.state() {
            PlaybackState::Playing => self.pause(),
            _ => self.play(),
        }
    }

    /// The loaded store
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// The renderer behind the animation
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> AnimationStats {
        self.stats
    }
}

impl<R: Renderer> PlaybackController for Player<R> {
    /// Begin or resume playback
    fn play(&mut self) -> Result<()> {
        self.started = true;
        self.clock.resume();
        Ok(())
    }

    /// Pause, holding the current tick; scheduled fires draw nothing
    fn pause(&mut self) -> Result<()> {
        self.clock.pause();
        Ok(())
    }

    /// Rewind to tick 0, draw that frame immediately, and resume playing
    ///
    /// Valid from any state. The immediate draw happens outside the
    /// schedule, so the next scheduled fire draws tick 0 once more before
    /// advancing.
    fn restart(&mut self) -> Result<()> {
        self.clock.restart();
        let frame = resolve(&self.store, 0);
        self.renderer
            .draw(&frame, &self.track_style, &self.marker_style)?;
        self.last_drawn = Some(0);
        self.stats.frames_drawn += 1;
        self.started = true;
        self.clock.resume();
        Ok(())
    }

    /// Current playback state
    fn state(&self) -> PlaybackState {
        if !self.started {
            PlaybackState::Stopped
        } else if self.clock.is_running() {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }
}
