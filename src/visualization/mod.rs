//! Terminal Visualization
//!
//! Renders resolved frames as a character-grid map repainted in place with
//! ANSI cursor control, with the status line underneath (`Elapsed:
//! HH:MM/PP%`). Coordinates are fit to the grid by plain bounding-box
//! scaling; real map projection is out of scope.

use std::io::{self, Write};

use crate::playback::{Frame, Progress, Tick};
use crate::render::{MarkerStyle, Renderer, TrackStyle};
use crate::track::{GeoBounds, GeoPoint};
use crate::{Result, RunmapError};

/// Terminal renderer: one character grid per frame
///
/// Trails are dot glyphs (heavier for wide strokes), markers are circle
/// glyphs sized by the configured radius and always painted over trails.
/// Each frame is written with a single `print`, cursor moved back up over
/// the previous one, so the map animates in place without clearing the
/// screen.
pub struct TerminalRenderer {
    width: usize,
    height: usize,
    bounds: GeoBounds,
    resample_interval_seconds: u32,
    max_tick: Tick,
    lines_drawn: usize,
}

impl TerminalRenderer {
    /// Create a renderer for a `width` x `height` grid over `bounds`
    ///
    /// `resample_interval_seconds` and `max_tick` feed the status line;
    /// they are fixed per animation, like the styles.
    pub fn new(
        width: usize,
        height: usize,
        bounds: GeoBounds,
        resample_interval_seconds: u32,
        max_tick: Tick,
    ) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(RunmapError::ConfigError(format!(
                "terminal grid {}x{} is too small",
                width, height
            )));
        }
        Ok(TerminalRenderer {
            width,
            height,
            bounds,
            resample_interval_seconds,
            max_tick,
            lines_drawn: 0,
        })
    }

    /// Map a coordinate onto the grid; row 0 is the northern edge
    fn project(&self, point: GeoPoint) -> (usize, usize) {
        let lon_span = (self.bounds.max_lon - self.bounds.min_lon).max(f64::EPSILON);
        let lat_span = (self.bounds.max_lat - self.bounds.min_lat).max(f64::EPSILON);

        let x = (point.lon - self.bounds.min_lon) / lon_span * (self.width - 1) as f64;
        let y = (self.bounds.max_lat - point.lat) / lat_span * (self.height - 1) as f64;

        (
            (x.round().max(0.0) as usize).min(self.width - 1),
            (y.round().max(0.0) as usize).min(self.height - 1),
        )
    }

    fn trail_glyph(style: &TrackStyle) -> char {
        if style.width >= 2.0 {
            '•'
        } else {
            '·'
        }
    }

    fn marker_glyph(style: &MarkerStyle) -> char {
        if style.radius >= 3.0 {
            '@'
        } else if style.radius >= 1.5 {
            'O'
        } else {
            'o'
        }
    }

    /// Render a frame to text (grid plus status line), without touching
    /// the terminal
    pub fn render_to_string(
        &self,
        frame: &Frame<'_>,
        track_style: &TrackStyle,
        marker_style: &MarkerStyle,
    ) -> String {
        let mut grid = vec![vec![' '; self.width]; self.height];

        let trail = Self::trail_glyph(track_style);
        for track in &frame.tracks {
            for sample in track.visible_path {
                let (x, y) = self.project(sample.position);
                grid[y][x] = trail;
            }
        }

        // Markers paint over trails
        let marker = Self::marker_glyph(marker_style);
        for track in &frame.tracks {
            let (x, y) = self.project(track.marker);
            grid[y][x] = marker;
        }

        let mut out = String::with_capacity((self.width + 1) * (self.height + 1));
        for row in grid {
            out.extend(row);
            out.push('\n');
        }

        let progress = Progress::at_tick(frame.tick, self.max_tick, self.resample_interval_seconds);
        out.push_str(&format_status(&progress));
        out.push('\n');
        out
    }

    /// Total lines one frame occupies (grid plus status line)
    pub fn frame_lines(&self) -> usize {
        self.height + 1
    }
}

impl Renderer for TerminalRenderer {
    fn draw(
        &mut self,
        frame: &Frame<'_>,
        track_style: &TrackStyle,
        marker_style: &MarkerStyle,
    ) -> Result<()> {
        let text = self.render_to_string(frame, track_style, marker_style);

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if self.lines_drawn > 0 {
            // Move back up over the previous frame and repaint in place
            write!(handle, "\x1B[{}A", self.lines_drawn)?;
        }
        handle.write_all(text.as_bytes())?;
        handle.flush()?;

        self.lines_drawn = self.frame_lines();
        Ok(())
    }
}

/// Format recorded elapsed time as `HH:MM`
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{:02}:{:02}", hours, minutes)
}

/// Format the status line shown under the map
pub fn format_status(progress: &Progress) -> String {
    format!(
        "Elapsed: {}/{:02}%",
        format_elapsed(progress.elapsed_seconds),
        progress.percent
    )
}
