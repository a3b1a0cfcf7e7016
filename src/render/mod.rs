//! Renderer Seam
//!
//! Abstract sink for resolved frames. The player calls `draw` exactly once
//! per emitted tick, synchronously, on the driving thread. Everything a
//! renderer needs arrives in the frame and the two style records; swapping
//! the output medium means implementing this one trait.

use crate::playback::{Frame, Tick};
use crate::track::{GeoPoint, TrackId};
use crate::Result;

/// How trails are drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TrackStyle {
    /// Stroke color as a CSS-style string; renderers interpret it as they
    /// can
    pub stroke: String,
    /// Stroke width in display units
    pub width: f32,
}

/// How markers are drawn
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Stroke color as a CSS-style string; renderers interpret it as they
    /// can
    pub stroke: String,
    /// Stroke width in display units
    pub width: f32,
    /// Marker radius in display units
    pub radius: f32,
}

/// Sink for resolved frames
///
/// Implementations must not assume consecutive ticks (the schedule may
/// coalesce when the host falls behind) but may assume non-decreasing
/// ticks between restarts. Styles are fixed for the lifetime of the
/// animation; they are passed on every call so renderers stay stateless
/// about them.
pub trait Renderer {
    /// Draw one resolved frame
    fn draw(
        &mut self,
        frame: &Frame<'_>,
        track_style: &TrackStyle,
        marker_style: &MarkerStyle,
    ) -> Result<()>;
}

/// Owned snapshot of one drawn frame, recorded by [`CaptureRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    /// Tick the frame was resolved for
    pub tick: Tick,
    /// Marker position per track, in store order
    pub markers: Vec<(TrackId, GeoPoint)>,
    /// Visible path length per track, in store order
    pub path_lens: Vec<usize>,
}

/// Renderer that records every draw instead of displaying anything
///
/// The test double for the seam; also handy for headless hosts that want
/// the resolved geometry without a display.
#[derive(Debug, Default)]
pub struct CaptureRenderer {
    /// Every frame drawn so far, in draw order
    pub frames: Vec<CapturedFrame>,
}

impl CaptureRenderer {
    /// Create an empty capture renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks drawn so far, in draw order
    pub fn ticks(&self) -> Vec<Tick> {
        self.frames.iter().map(|f| f.tick).collect()
    }
}

impl Renderer for CaptureRenderer {
    fn draw(
        &mut self,
        frame: &Frame<'_>,
        _track_style: &TrackStyle,
        _marker_style: &MarkerStyle,
    ) -> Result<()> {
        self.frames.push(CapturedFrame {
            tick: frame.tick,
            markers: frame
                .tracks
                .iter()
                .map(|t| (t.track_id, t.marker))
                .collect(),
            path_lens: frame.tracks.iter().map(|t| t.visible_path.len()).collect(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::resolve;
    use crate::track::{RawRow, TrackStore};

    fn style_pair() -> (TrackStyle, MarkerStyle) {
        (
            TrackStyle {
                stroke: "rgba(74,20,134,0.2)".to_string(),
                width: 2.0,
            },
            MarkerStyle {
                stroke: "black".to_string(),
                width: 1.0,
                radius: 2.0,
            },
        )
    }

    #[test]
    fn test_capture_renderer_records_draw_order() {
        let store = TrackStore::load(vec![
            RawRow {
                lon: 0.0,
                lat: 0.0,
                index: 1,
                len: 2,
            },
            RawRow {
                lon: 1.0,
                lat: 1.0,
                index: 1,
                len: 2,
            },
        ])
        .unwrap();
        let (track_style, marker_style) = style_pair();

        let mut capture = CaptureRenderer::new();
        for tick in [0, 1, 2] {
            let frame = resolve(&store, tick);
            capture.draw(&frame, &track_style, &marker_style).unwrap();
        }

        assert_eq!(capture.ticks(), vec![0, 1, 2]);
        assert_eq!(capture.frames[0].path_lens, vec![1]);
        assert_eq!(capture.frames[2].path_lens, vec![2]);
        assert_eq!(capture.frames[2].markers[0].1.lon, 1.0);
    }
}
