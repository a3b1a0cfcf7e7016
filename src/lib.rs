//! Synchronized GPS Track Replay
//!
//! Animates recorded GPS tracks synchronously on a shared discrete time
//! axis. Each track is a finite ordered sequence of resampled fixes; a
//! discrete clock advances one tick per scheduled fire, every track
//! reports the sample it has reached (holding its final sample once
//! exhausted), and a renderer draws the growing trails and markers. When
//! the longest track finishes, the clock wraps to zero and the loop
//! repeats.
//!
//! # Features
//! - Shared time axis across tracks of different lengths
//! - Freeze-on-completion: finished tracks hold their last position
//! - Seamless wrap from the end of the longest track back to tick 0
//! - Pause, resume, and restart from any state
//! - Pure per-tick frame resolution (borrowed slices, no hidden state)
//! - Renderer trait seam; terminal map renderer included
//! - CSV rollup feed (`lon,lat,index,len`)
//!
//! # Crate feature flags
//! - `rollup` (default): CSV rollup feed (`rollup`; enables the optional `csv` dep)
//! - `visualization` (default): Terminal map renderer and status line (`visualization`)
//!
//! # Quick start
//! ## Resolve frames without a schedule
//! ```no_run
//! use runmap::playback::resolve;
//! use runmap::track::{RawRow, TrackStore};
//!
//! let rows = vec![
//!     RawRow { lon: -114.09, lat: 51.04, index: 0, len: 2 },
//!     RawRow { lon: -114.08, lat: 51.05, index: 0, len: 2 },
//! ];
//! let store = TrackStore::load(rows).unwrap();
//! let frame = resolve(&store, 1);
//! assert_eq!(frame.tracks[0].visible_path.len(), 2);
//! ```
//!
//! ## Drive a player tick by tick
//! ```no_run
//! use runmap::playback::PlaybackController;
//! use runmap::render::CaptureRenderer;
//! use runmap::track::{RawRow, TrackStore};
//! use runmap::{AnimationConfig, Player};
//!
//! let rows = vec![RawRow { lon: 0.0, lat: 0.0, index: 0, len: 1 }];
//! let store = TrackStore::load(rows).unwrap();
//! let mut player = Player::new(store, &AnimationConfig::default(), CaptureRenderer::new()).unwrap();
//! player.play().unwrap();
//! player.on_interval().unwrap(); // one scheduled fire: resolve + draw
//! ```
//!
//! ## Animate a rollup in the terminal
//! ```no_run
//! # #[cfg(all(feature = "rollup", feature = "visualization"))]
//! # {
//! use runmap::playback::{PlaybackController, TickDriver};
//! use runmap::visualization::TerminalRenderer;
//! use runmap::{read_rollup_file, AnimationConfig, Player, TrackStore};
//!
//! let rows = read_rollup_file("gpx_rollup.csv").unwrap();
//! let store = TrackStore::load(rows).unwrap();
//! let config = AnimationConfig::default();
//! let renderer = TerminalRenderer::new(
//!     72,
//!     20,
//!     store.bounds(),
//!     config.resample_interval_seconds,
//!     store.max_tick(),
//! )
//! .unwrap();
//! let driver = TickDriver::from_rate(config.ticks_per_second).unwrap();
//! let mut player = Player::new(store, &config, renderer).unwrap();
//! player.play().unwrap();
//! driver.run(&mut player, |_| true).unwrap();
//! # }
//! ```

#![warn(missing_docs)]

// Domain modules (feature-gated for modular use)
pub mod config; // Animation Configuration
pub mod playback; // Playback Engine
pub mod render; // Renderer Seam
#[cfg(feature = "rollup")]
pub mod rollup; // Rollup Feed (CSV)
pub mod track; // GPS Track Domain
#[cfg(feature = "visualization")]
pub mod visualization; // Terminal Map Renderer

/// Error types for track replay operations
#[derive(thiserror::Error, Debug)]
pub enum RunmapError {
    /// Malformed or inconsistent input rows
    #[error("Data error: {0}")]
    DataError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Renderer failed to draw a frame
    #[error("Render error: {0}")]
    RenderError(String),

    /// IO error from filesystem or terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for RunmapError {
    /// Converts a String into `RunmapError::Other`.
    ///
    /// This is a convenience conversion for generic string errors. All
    /// string errors land in the `Other` variant, losing semantic
    /// information about the error type; prefer the specific variant
    /// constructors where the caller can discriminate:
    /// - `RunmapError::DataError(msg)` for malformed input rows
    /// - `RunmapError::ConfigError(msg)` for invalid configuration
    /// - `RunmapError::RenderError(msg)` for renderer failures
    fn from(msg: String) -> Self {
        RunmapError::Other(msg)
    }
}

impl From<&str> for RunmapError {
    /// Converts a string slice into `RunmapError::Other`.
    ///
    /// See [`From<String>`] for guidance on when to use explicit variant
    /// constructors instead.
    fn from(msg: &str) -> Self {
        RunmapError::Other(msg.to_string())
    }
}

/// Result type for track replay operations
pub type Result<T> = std::result::Result<T, RunmapError>;

// Public API exports
pub use config::AnimationConfig;
pub use playback::{
    resolve, AnimationStats, Clock, Frame, PlaybackController, PlaybackState, Player, Progress,
    Tick, TickDriver, TrackFrame,
};
pub use render::{CaptureRenderer, CapturedFrame, MarkerStyle, Renderer, TrackStyle};
pub use track::{GeoBounds, GeoPoint, RawRow, Sample, Track, TrackId, TrackStore};

#[cfg(feature = "rollup")]
pub use rollup::{read_rollup, read_rollup_file};
#[cfg(feature = "visualization")]
pub use visualization::{format_elapsed, format_status, TerminalRenderer};
