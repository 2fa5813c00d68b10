//! Compute a single representative track from several recordings of the same route
use crate::gps::{Track, TrackPoint};
use crate::{Error, InvalidInput};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How tracks of differing lengths are handled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Every track must have exactly as many points as the first one
    Strict,
    /// Only average up to the length of the shortest track
    Truncate,
}

impl Default for LengthPolicy {
    fn default() -> Self {
        LengthPolicy::Strict
    }
}

impl FromStr for LengthPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(LengthPolicy::Strict),
            "truncate" => Ok(LengthPolicy::Truncate),
            _ => Err(Error::InvalidConfigurationValue(format!(
                "Unknown value {}: expected: strict, truncate",
                s
            ))),
        }
    }
}

/// How points recorded without an elevation contribute to the averaged elevation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationPolicy {
    /// Leave the point out of the elevation mean, the averaged point has no elevation when
    /// no input has one
    Skip,
    /// Count a missing elevation as 0 meters
    Zero,
    /// Refuse to average tracks with missing elevations
    Error,
}

impl Default for ElevationPolicy {
    fn default() -> Self {
        ElevationPolicy::Skip
    }
}

impl FromStr for ElevationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(ElevationPolicy::Skip),
            "zero" => Ok(ElevationPolicy::Zero),
            "error" => Ok(ElevationPolicy::Error),
            _ => Err(Error::InvalidConfigurationValue(format!(
                "Unknown value {}: expected: skip, zero, error",
                s
            ))),
        }
    }
}

/// Averages aligned tracks point by point.
///
/// Point `i` of the result holds the mean latitude, longitude and elevation of point `i`
/// across all inputs. A single input track is returned unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackAverager {
    length_policy: LengthPolicy,
    elevation_policy: ElevationPolicy,
    validate_coordinates: bool,
}

impl TrackAverager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length_policy(mut self, policy: LengthPolicy) -> Self {
        self.length_policy = policy;
        self
    }

    pub fn elevation_policy(mut self, policy: ElevationPolicy) -> Self {
        self.elevation_policy = policy;
        self
    }

    /// Reject points outside of -90..=90 latitude and -180..=180 longitude
    pub fn validate_coordinates(mut self, validate: bool) -> Self {
        self.validate_coordinates = validate;
        self
    }

    /// Average the provided tracks, failing before any output is built if they can't be
    pub fn average(&self, tracks: &[Track]) -> Result<Track, Error> {
        let first = tracks.first().ok_or(InvalidInput::NoTracks)?;
        let length = self.reference_length(tracks)?;
        debug!(
            "Averaging {} tracks over {} points ({:?}, {:?})",
            tracks.len(),
            length,
            self.length_policy,
            self.elevation_policy
        );
        self.check_points(tracks, length)?;

        if tracks.len() == 1 {
            trace!("Single track provided, returning it unchanged");
            return Ok(first.clone());
        }

        let count = tracks.len() as f64;
        let points = (0..length)
            .map(|idx| {
                let mut latitude = 0.0;
                let mut longitude = 0.0;
                let mut elevation = 0.0;
                let mut elevation_count = 0;
                for track in tracks {
                    let point = &track.points()[idx];
                    latitude += point.latitude();
                    longitude += point.longitude();
                    match point.elevation() {
                        Some(value) => {
                            elevation += value;
                            elevation_count += 1;
                        }
                        None if self.elevation_policy == ElevationPolicy::Zero => {
                            elevation_count += 1;
                        }
                        None => {}
                    }
                }
                let elevation = if elevation_count > 0 {
                    Some(elevation / elevation_count as f64)
                } else {
                    None
                };
                TrackPoint::new(latitude / count, longitude / count, elevation)
            })
            .collect();

        Ok(Track::new(points))
    }

    /// Number of points the averaged track will have
    fn reference_length(&self, tracks: &[Track]) -> Result<usize, InvalidInput> {
        let expected = tracks.first().map_or(0, Track::len);
        match self.length_policy {
            LengthPolicy::Strict => {
                for (idx, track) in tracks.iter().enumerate().skip(1) {
                    if track.len() != expected {
                        return Err(InvalidInput::LengthMismatch {
                            track: idx,
                            expected,
                            found: track.len(),
                        });
                    }
                }
                Ok(expected)
            }
            LengthPolicy::Truncate => {
                let shortest = tracks.iter().map(Track::len).fold(expected, usize::min);
                if shortest < expected {
                    debug!("Truncating averaged track from {} to {} points", expected, shortest);
                }
                Ok(shortest)
            }
        }
    }

    /// Run the optional coordinate validation and the elevation check over every point used
    fn check_points(&self, tracks: &[Track], length: usize) -> Result<(), InvalidInput> {
        let check_elevation = self.elevation_policy == ElevationPolicy::Error;
        if !self.validate_coordinates && !check_elevation {
            return Ok(());
        }
        for (track_idx, track) in tracks.iter().enumerate() {
            for (idx, point) in track.points()[..length].iter().enumerate() {
                if self.validate_coordinates && !point.has_valid_coordinates() {
                    return Err(InvalidInput::CoordinateOutOfRange {
                        track: track_idx,
                        index: idx,
                        latitude: point.latitude(),
                        longitude: point.longitude(),
                    });
                }
                if check_elevation && point.elevation().is_none() {
                    return Err(InvalidInput::MissingElevation {
                        track: track_idx,
                        index: idx,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Average tracks using the default strict length and skip elevation policies
pub fn average_tracks(tracks: &[Track]) -> Result<Track, Error> {
    TrackAverager::new().average(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    fn track(points: &[(f64, f64, Option<f64>)]) -> Track {
        Track::new(
            points
                .iter()
                .map(|&(lat, lon, ele)| TrackPoint::new(lat, lon, ele))
                .collect(),
        )
    }

    fn invalid_input(result: Result<Track, Error>) -> InvalidInput {
        match result {
            Err(Error::InvalidInput(e)) => e,
            other => panic!("expected invalid input error, got {:?}", other),
        }
    }

    #[test]
    fn averages_two_tracks() {
        let track1 = track(&[(40.0, -73.0, Some(10.0)), (41.0, -74.0, Some(20.0))]);
        let track2 = track(&[(42.0, -75.0, Some(30.0)), (44.0, -76.0, Some(40.0))]);
        let averaged = average_tracks(&[track1, track2]).unwrap();
        assert_eq!(
            averaged,
            track(&[(41.0, -74.0, Some(20.0)), (42.5, -75.0, Some(30.0))])
        );
    }

    #[test]
    fn averages_three_tracks() {
        let tracks = vec![
            track(&[(1.0, 10.0, Some(100.0))]),
            track(&[(2.0, 20.0, Some(200.0))]),
            track(&[(4.0, 30.0, Some(600.0))]),
        ];
        let averaged = average_tracks(&tracks).unwrap();
        let point = averaged.points()[0];
        assert_float_absolute_eq!(point.latitude(), 7.0 / 3.0, 1e-9);
        assert_float_absolute_eq!(point.longitude(), 20.0, 1e-9);
        assert_float_absolute_eq!(point.elevation().unwrap(), 300.0, 1e-9);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(invalid_input(average_tracks(&[])), InvalidInput::NoTracks);
    }

    #[test]
    fn single_track_is_returned_unchanged() {
        let only = track(&[(1.5, 2.5, None), (3.5, 4.5, Some(7.0))]);
        let averaged = TrackAverager::new()
            .elevation_policy(ElevationPolicy::Zero)
            .average(&[only.clone()])
            .unwrap();
        assert_eq!(averaged, only);
    }

    #[test]
    fn mismatched_lengths_are_rejected_by_default() {
        let track1 = track(&[(1.0, 1.0, None), (2.0, 2.0, None)]);
        let track2 = track(&[(1.0, 1.0, None)]);
        assert_eq!(
            invalid_input(average_tracks(&[track1, track2])),
            InvalidInput::LengthMismatch {
                track: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn longer_trailing_track_is_rejected() {
        let track1 = track(&[(1.0, 1.0, None)]);
        let track2 = track(&[(1.0, 1.0, None), (2.0, 2.0, None)]);
        assert!(matches!(
            invalid_input(average_tracks(&[track1, track2])),
            InvalidInput::LengthMismatch { found: 2, .. }
        ));
    }

    #[test]
    fn truncate_policy_uses_shortest_track() {
        let track1 = track(&[(1.0, 1.0, None), (2.0, 2.0, None)]);
        let track2 = track(&[(3.0, 3.0, None)]);
        let averaged = TrackAverager::new()
            .length_policy(LengthPolicy::Truncate)
            .average(&[track1, track2])
            .unwrap();
        assert_eq!(averaged, track(&[(2.0, 2.0, None)]));
    }

    #[test]
    fn missing_elevation_is_skipped() {
        let track1 = track(&[(0.0, 0.0, Some(10.0)), (0.0, 0.0, None)]);
        let track2 = track(&[(0.0, 0.0, None), (0.0, 0.0, None)]);
        let track3 = track(&[(0.0, 0.0, Some(20.0)), (0.0, 0.0, None)]);
        let averaged = average_tracks(&[track1, track2, track3]).unwrap();
        assert_eq!(averaged.points()[0].elevation(), Some(15.0));
        assert_eq!(averaged.points()[1].elevation(), None);
    }

    #[test]
    fn missing_elevation_counts_as_zero() {
        let track1 = track(&[(0.0, 0.0, Some(10.0))]);
        let track2 = track(&[(0.0, 0.0, None)]);
        let averaged = TrackAverager::new()
            .elevation_policy(ElevationPolicy::Zero)
            .average(&[track1, track2])
            .unwrap();
        assert_eq!(averaged.points()[0].elevation(), Some(5.0));
    }

    #[test]
    fn missing_elevation_can_be_an_error() {
        let track1 = track(&[(0.0, 0.0, Some(10.0)), (0.0, 0.0, Some(10.0))]);
        let track2 = track(&[(0.0, 0.0, Some(10.0)), (0.0, 0.0, None)]);
        let result = TrackAverager::new()
            .elevation_policy(ElevationPolicy::Error)
            .average(&[track1, track2]);
        assert_eq!(
            invalid_input(result),
            InvalidInput::MissingElevation { track: 1, index: 1 }
        );
    }

    #[test]
    fn out_of_range_coordinates_are_only_rejected_when_validating() {
        let track1 = track(&[(0.0, 0.0, None)]);
        let track2 = track(&[(95.0, 0.0, None)]);
        let tracks = [track1, track2];
        assert!(average_tracks(&tracks).is_ok());

        let result = TrackAverager::new()
            .validate_coordinates(true)
            .average(&tracks);
        assert_eq!(
            invalid_input(result),
            InvalidInput::CoordinateOutOfRange {
                track: 1,
                index: 0,
                latitude: 95.0,
                longitude: 0.0
            }
        );
    }

    #[test]
    fn averaging_is_commutative() {
        let a = track(&[(10.1, 20.2, Some(1.1)), (10.3, 20.4, None)]);
        let b = track(&[(11.7, 19.9, Some(3.3)), (10.9, 21.0, Some(2.0))]);
        assert_eq!(
            average_tracks(&[a.clone(), b.clone()]).unwrap(),
            average_tracks(&[b, a]).unwrap()
        );
    }

    #[test]
    fn duplicated_track_averages_to_itself() {
        let a = track(&[(47.123456, 8.654321, Some(412.3)), (47.2, 8.7, None)]);
        let averaged = average_tracks(&[a.clone(), a.clone()]).unwrap();
        for (expected, actual) in a.points().iter().zip(averaged.points()) {
            assert_float_absolute_eq!(expected.latitude(), actual.latitude(), 1e-9);
            assert_float_absolute_eq!(expected.longitude(), actual.longitude(), 1e-9);
            assert_eq!(expected.elevation().is_some(), actual.elevation().is_some());
        }
    }

    #[test]
    fn parses_policies_from_strings() {
        assert_eq!("Truncate".parse::<LengthPolicy>().unwrap(), LengthPolicy::Truncate);
        assert_eq!("zero".parse::<ElevationPolicy>().unwrap(), ElevationPolicy::Zero);
        assert!("sometimes".parse::<ElevationPolicy>().is_err());
    }
}
