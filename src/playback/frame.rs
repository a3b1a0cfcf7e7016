//! Frame Resolver
//!
//! Pure mapping from (store, tick) to the geometry drawn for that tick.
//! Resolving holds no state and allocates nothing per track beyond the
//! frame itself; paths are borrowed slices into the store.

use crate::track::{GeoPoint, Sample, TrackId, TrackStore};

use super::Tick;

/// What one track shows at a given tick
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFrame<'a> {
    /// Track identifier
    pub track_id: TrackId,
    /// Inclusive prefix of the track traversed so far; the marker sits on
    /// its last element
    pub visible_path: &'a [Sample],
    /// Marker position: the sample reached at this tick, held on the final
    /// sample once the track is exhausted
    pub marker: GeoPoint,
}

/// Everything drawn for one tick
///
/// Carries one entry per track, in store order. Frames are immutable value
/// objects; resolving the same tick twice yields identical frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    /// Tick this frame was resolved for
    pub tick: Tick,
    /// Per-track geometry, in store order
    pub tracks: Vec<TrackFrame<'a>>,
}

impl<'a> Frame<'a> {
    /// Geometry of one track within this frame
    pub fn track(&self, id: TrackId) -> Option<&TrackFrame<'a>> {
        self.tracks.iter().find(|t| t.track_id == id)
    }
}

/// Resolve the frame for `tick`
///
/// Each track reports the sample at `min(tick, length - 1)`: exhausted
/// tracks hold their final sample while longer tracks continue. The
/// visible path is the inclusive prefix up to that sample.
pub fn resolve(store: &TrackStore, tick: Tick) -> Frame<'_> {
    let tracks = store
        .tracks()
        .iter()
        .map(|track| {
            let effective = track.effective_index(tick);
            TrackFrame {
                track_id: track.id,
                visible_path: &track.samples[..=effective],
                marker: track.samples[effective].position,
            }
        })
        .collect();

    Frame { tick, tracks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::RawRow;

    /// Track 1 with 3 samples along lat 0, track 2 with 5 samples along
    /// lat 1; lon encodes the sample number
    fn two_track_store() -> TrackStore {
        let mut rows = Vec::new();
        for i in 0..3 {
            rows.push(RawRow {
                lon: f64::from(i),
                lat: 0.0,
                index: 1,
                len: 3,
            });
        }
        for i in 0..5 {
            rows.push(RawRow {
                lon: f64::from(i),
                lat: 1.0,
                index: 2,
                len: 5,
            });
        }
        TrackStore::load(rows).unwrap()
    }

    #[test]
    fn test_shared_axis_spans_longest_track() {
        let store = two_track_store();
        assert_eq!(store.max_tick(), 5);
    }

    #[test]
    fn test_short_and_long_tracks_at_shared_tick() {
        let store = two_track_store();
        let frame = resolve(&store, 4);

        // The short track froze on its sample 2, the long one reached 4
        assert_eq!(frame.track(1).unwrap().marker.lon, 2.0);
        assert_eq!(frame.track(2).unwrap().marker.lon, 4.0);
    }

    #[test]
    fn test_marker_freezes_after_track_completes() {
        let store = two_track_store();

        for tick in 3..20 {
            let frame = resolve(&store, tick);
            let short = frame.track(1).unwrap();
            assert_eq!(short.marker.lon, 2.0);
            assert_eq!(short.visible_path.len(), 3);
        }
    }

    #[test]
    fn test_visible_path_is_inclusive_prefix() {
        let store = two_track_store();

        let frame = resolve(&store, 0);
        assert_eq!(frame.track(2).unwrap().visible_path.len(), 1);

        let frame = resolve(&store, 2);
        let long = frame.track(2).unwrap();
        assert_eq!(long.visible_path.len(), 3);
        // The marker sits on the end of its own trail
        assert_eq!(long.visible_path[2].position, long.marker);
    }

    #[test]
    fn test_visible_path_never_shrinks_within_a_loop() {
        let store = two_track_store();
        let mut previous = vec![0usize; store.track_count()];

        for tick in 0..=store.max_tick() {
            let frame = resolve(&store, tick);
            for (i, track) in frame.tracks.iter().enumerate() {
                assert!(track.visible_path.len() >= previous[i]);
                previous[i] = track.visible_path.len();
            }
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let store = two_track_store();
        for tick in [0, 2, 4, 5, 9] {
            assert_eq!(resolve(&store, tick), resolve(&store, tick));
        }
    }

    #[test]
    fn test_frame_lists_tracks_in_store_order() {
        let store = two_track_store();
        let frame = resolve(&store, 0);

        let ids: Vec<u32> = frame.tracks.iter().map(|t| t.track_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(frame.track(3).is_none());
    }
}
