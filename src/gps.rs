//! Module with GPS specific structures
use crate::{Error, InvalidInput};

/// Largest number of decimal digits a polyline can be encoded with without overflowing
pub static MAX_POLYLINE_PRECISION: u32 = 10;

/// Stores a single recorded point along a track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    /// latitude coordinate in degrees
    latitude: f64,
    /// longitude coordinate in degrees
    longitude: f64,
    /// elevation in meters if available
    elevation: Option<f64>,
}

impl TrackPoint {
    /// Create a point from coordinates in degrees and an optional elevation in meters
    pub fn new(latitude: f64, longitude: f64, elevation: Option<f64>) -> Self {
        TrackPoint {
            latitude,
            longitude,
            elevation,
        }
    }

    /// Return latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Return longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Return elevation in meters (if defined)
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    /// True when both coordinates are finite and inside the valid degree ranges
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// An ordered sequence of points in recording order.
///
/// Equality only considers the points, the name is informational.
#[derive(Clone, Debug, Default)]
pub struct Track {
    name: Option<String>,
    points: Vec<TrackPoint>,
}

impl Track {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Track { name: None, points }
    }

    pub fn with_name(name: Option<String>, points: Vec<TrackPoint>) -> Self {
        Track { name, points }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points that were recorded without an elevation value
    pub fn missing_elevation_count(&self) -> usize {
        self.points.iter().filter(|p| p.elevation.is_none()).count()
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

/// Encodes a slice of points into Google Encoded Polyline format using the given number of
/// decimal digits.
///
/// Points must lie inside the valid latitude/longitude ranges, anything else can't be scaled
/// into the integer deltas the format stores.
///
/// This code was extracted and simplified for our use case from:
/// https://github.com/georust/polyline
/// https://developers.google.com/maps/documentation/utilities/polylinealgorithm
pub fn encode_coordinates(coordinates: &[TrackPoint], precision: u32) -> Result<String, Error> {
    if precision > MAX_POLYLINE_PRECISION {
        return Err(Error::InvalidConfigurationValue(format!(
            "polyline precision must be at most {}: {}",
            MAX_POLYLINE_PRECISION, precision
        )));
    }
    let factor = 10_f64.powi(precision as i32);
    let mut output = String::new();
    let mut b = (0, 0);

    for (idx, a) in coordinates.iter().enumerate() {
        if !a.has_valid_coordinates() {
            return Err(InvalidInput::CoordinateOutOfRange {
                track: 0,
                index: idx,
                latitude: a.latitude,
                longitude: a.longitude,
            }
            .into());
        }
        let a = (scale(a.latitude, factor), scale(a.longitude, factor));
        encode(a.0, b.0, &mut output);
        encode(a.1, b.1, &mut output);
        b = a;
    }

    Ok(output)
}

/// Scale a floating point value into an integer at the given precision
#[inline]
fn scale(n: f64, factor: f64) -> i64 {
    (factor * n).round() as i64
}

/// Encode a single latitude or longitude delta into the polyline format
fn encode(current: i64, previous: i64, output: &mut String) {
    let mut coordinate = (current - previous) << 1;
    if (current - previous) < 0 {
        coordinate = !coordinate;
    }
    while coordinate >= 0x20 {
        output.push((((0x20 | (coordinate & 0x1f)) + 63) as u8) as char);
        coordinate >>= 5;
    }
    output.push(((coordinate + 63) as u8) as char);
}
