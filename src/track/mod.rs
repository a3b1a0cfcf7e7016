//! GPS Track Domain
//!
//! Immutable store of resampled GPS tracks. Input rows are grouped into
//! tracks in a single pass on load; after that the store never changes.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{Result, RunmapError};

/// Track identifier (the `index` column of the rollup)
pub type TrackId = u32;

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

/// One input row: a resampled GPS fix tagged with its owning track
///
/// Field names match the rollup header `lon,lat,index,len`, so the struct
/// deserializes straight out of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawRow {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Track this fix belongs to
    pub index: TrackId,
    /// Declared total sample count of that track
    pub len: u32,
}

/// A single resampled fix inside a loaded track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position of the fix
    pub position: GeoPoint,
    /// Owning track
    pub track_id: TrackId,
    /// Declared sample count of the owning track
    pub track_len: u32,
}

/// One loaded track: samples in recorded order
///
/// A loaded track always has at least one sample and `length` always equals
/// `samples.len()`; `load` rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Track identifier
    pub id: TrackId,
    /// Samples in input order
    pub samples: Vec<Sample>,
    /// Declared sample count
    pub length: u32,
}

impl Track {
    /// Sample index reached at `tick`, holding at the final sample once the
    /// track is exhausted
    pub fn effective_index(&self, tick: u32) -> usize {
        (tick as usize).min(self.samples.len() - 1)
    }
}

/// Geographic bounding box over a set of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Westernmost longitude
    pub min_lon: f64,
    /// Southernmost latitude
    pub min_lat: f64,
    /// Easternmost longitude
    pub max_lon: f64,
    /// Northernmost latitude
    pub max_lat: f64,
}

/// Immutable store of loaded tracks sharing one time axis
#[derive(Debug, Clone)]
pub struct TrackStore {
    tracks: Vec<Track>,
    max_tick: u32,
}

impl TrackStore {
    /// Build the store from input rows in a single pass
    ///
    /// Rows are grouped by their track index into buckets in first-seen
    /// order; within a bucket, input order is preserved. Rows of different
    /// tracks may interleave freely.
    ///
    /// Fails with `DataError` on empty input, non-finite coordinates, a
    /// zero declared length, rows of one track disagreeing about their
    /// declared length, or a declared length that does not match the number
    /// of rows actually present.
    pub fn load<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut tracks: Vec<Track> = Vec::new();
        let mut slots: HashMap<TrackId, usize> = HashMap::new();

        for (row_no, row) in rows.into_iter().enumerate() {
            if !row.lon.is_finite() || !row.lat.is_finite() {
                return Err(RunmapError::DataError(format!(
                    "row {}: non-finite coordinate ({}, {})",
                    row_no, row.lon, row.lat
                )));
            }
            if row.len == 0 {
                return Err(RunmapError::DataError(format!(
                    "row {}: track {} declares zero length",
                    row_no, row.index
                )));
            }

            let slot = match slots.get(&row.index) {
                Some(&slot) => slot,
                None => {
                    tracks.push(Track {
                        id: row.index,
                        samples: Vec::with_capacity(row.len as usize),
                        length: row.len,
                    });
                    let slot = tracks.len() - 1;
                    slots.insert(row.index, slot);
                    slot
                }
            };

            let track = &mut tracks[slot];
            if track.length != row.len {
                return Err(RunmapError::DataError(format!(
                    "row {}: track {} declares length {} but earlier rows declared {}",
                    row_no, row.index, row.len, track.length
                )));
            }
            track.samples.push(Sample {
                position: GeoPoint {
                    lon: row.lon,
                    lat: row.lat,
                },
                track_id: row.index,
                track_len: row.len,
            });
        }

        if tracks.is_empty() {
            return Err(RunmapError::DataError("no rows to load".to_string()));
        }

        let mut max_tick = 0;
        for track in &tracks {
            if track.samples.len() != track.length as usize {
                return Err(RunmapError::DataError(format!(
                    "track {}: declared length {} but {} rows present",
                    track.id,
                    track.length,
                    track.samples.len()
                )));
            }
            max_tick = max_tick.max(track.length);
        }

        Ok(TrackStore { tracks, max_tick })
    }

    /// Number of loaded tracks
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Highest tick of the shared time axis
    ///
    /// Equals the longest declared track length, which is one past the last
    /// sample index of that track; the tick axis runs `0..=max_tick`.
    pub fn max_tick(&self) -> u32 {
        self.max_tick
    }

    /// Look up a track by its identifier
    pub fn track_at(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// All tracks, in first-seen input order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Bounding box over every sample in the store
    pub fn bounds(&self) -> GeoBounds {
        let mut bounds = GeoBounds {
            min_lon: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
        };
        for sample in self.tracks.iter().flat_map(|t| t.samples.iter()) {
            bounds.min_lon = bounds.min_lon.min(sample.position.lon);
            bounds.min_lat = bounds.min_lat.min(sample.position.lat);
            bounds.max_lon = bounds.max_lon.max(sample.position.lon);
            bounds.max_lat = bounds.max_lat.max(sample.position.lat);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(lon: f64, lat: f64, index: TrackId, len: u32) -> RawRow {
        RawRow {
            lon,
            lat,
            index,
            len,
        }
    }

    #[test]
    fn test_load_groups_by_track_in_first_seen_order() {
        // Track 7 appears first even though track 3 has more rows
        let store = TrackStore::load(vec![
            row(1.0, 1.0, 7, 1),
            row(2.0, 2.0, 3, 2),
            row(3.0, 3.0, 3, 2),
        ])
        .unwrap();

        assert_eq!(store.track_count(), 2);
        assert_eq!(store.tracks()[0].id, 7);
        assert_eq!(store.tracks()[1].id, 3);
    }

    #[test]
    fn test_load_preserves_sample_order_within_track() {
        // Rows of the two tracks interleave
        let store = TrackStore::load(vec![
            row(0.0, 0.0, 1, 3),
            row(9.0, 9.0, 2, 1),
            row(1.0, 0.0, 1, 3),
            row(2.0, 0.0, 1, 3),
        ])
        .unwrap();

        let track = store.track_at(1).unwrap();
        let lons: Vec<f64> = track.samples.iter().map(|s| s.position.lon).collect();
        assert_eq!(lons, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_max_tick_is_longest_declared_length() {
        let store = TrackStore::load(vec![
            row(0.0, 0.0, 1, 1),
            row(0.0, 0.0, 2, 4),
            row(1.0, 0.0, 2, 4),
            row(2.0, 0.0, 2, 4),
            row(3.0, 0.0, 2, 4),
        ])
        .unwrap();

        assert_eq!(store.max_tick(), 4);
    }

    #[test]
    fn test_load_rejects_empty_input() {
        let result = TrackStore::load(Vec::new());
        assert!(matches!(result, Err(RunmapError::DataError(_))));
    }

    #[test]
    fn test_load_rejects_zero_length_track() {
        let result = TrackStore::load(vec![row(0.0, 0.0, 1, 0)]);
        assert!(matches!(result, Err(RunmapError::DataError(_))));
    }

    #[test]
    fn test_load_rejects_length_mismatch() {
        // Track 1 declares 3 samples but only 2 rows arrive
        let result = TrackStore::load(vec![row(0.0, 0.0, 1, 3), row(1.0, 0.0, 1, 3)]);
        assert!(matches!(result, Err(RunmapError::DataError(_))));
    }

    #[test]
    fn test_load_rejects_inconsistent_declared_length() {
        let result = TrackStore::load(vec![row(0.0, 0.0, 1, 2), row(1.0, 0.0, 1, 3)]);
        assert!(matches!(result, Err(RunmapError::DataError(_))));
    }

    #[test]
    fn test_load_rejects_non_finite_coordinates() {
        let result = TrackStore::load(vec![row(f64::NAN, 0.0, 1, 1)]);
        assert!(matches!(result, Err(RunmapError::DataError(_))));

        let result = TrackStore::load(vec![row(0.0, f64::INFINITY, 1, 1)]);
        assert!(matches!(result, Err(RunmapError::DataError(_))));
    }

    #[test]
    fn test_track_lookup_by_id() {
        let store = TrackStore::load(vec![row(0.0, 0.0, 5, 1), row(1.0, 1.0, 9, 1)]).unwrap();

        assert_eq!(store.track_at(9).unwrap().id, 9);
        assert!(store.track_at(4).is_none());
    }

    #[test]
    fn test_effective_index_clamps_to_last_sample() {
        let store = TrackStore::load(vec![row(0.0, 0.0, 1, 2), row(1.0, 0.0, 1, 2)]).unwrap();
        let track = store.track_at(1).unwrap();

        assert_eq!(track.effective_index(0), 0);
        assert_eq!(track.effective_index(1), 1);
        assert_eq!(track.effective_index(2), 1);
        assert_eq!(track.effective_index(100), 1);
    }

    #[test]
    fn test_bounds_cover_all_samples() {
        let store = TrackStore::load(vec![
            row(-114.09, 51.03, 1, 2),
            row(-114.01, 51.08, 1, 2),
            row(-114.20, 50.99, 2, 1),
        ])
        .unwrap();

        let bounds = store.bounds();
        assert_eq!(bounds.min_lon, -114.20);
        assert_eq!(bounds.max_lon, -114.01);
        assert_eq!(bounds.min_lat, 50.99);
        assert_eq!(bounds.max_lat, 51.08);
    }
}
