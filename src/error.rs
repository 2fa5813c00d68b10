//! Defines the general error type for the crate and various conversions into it
use std::convert;
use std::fmt;
use std::path::PathBuf;

/// Reasons a set of tracks cannot be averaged
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidInput {
    /// No tracks were provided
    NoTracks,
    /// A track's length differs from the first track's length
    LengthMismatch {
        track: usize,
        expected: usize,
        found: usize,
    },
    /// A point lies outside the valid latitude/longitude ranges
    CoordinateOutOfRange {
        track: usize,
        index: usize,
        latitude: f64,
        longitude: f64,
    },
    /// A point has no elevation and missing values are not allowed
    MissingElevation { track: usize, index: usize },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::NoTracks => write!(f, "at least one track required"),
            InvalidInput::LengthMismatch {
                track,
                expected,
                found,
            } => write!(
                f,
                "track {} has {} points, expected {} to match the first track",
                track, found, expected
            ),
            InvalidInput::CoordinateOutOfRange {
                track,
                index,
                latitude,
                longitude,
            } => write!(
                f,
                "track {} point {} has out of range coordinates ({}, {})",
                track, index, latitude, longitude
            ),
            InvalidInput::MissingElevation { track, index } => {
                write!(f, "track {} point {} has no elevation", track, index)
            }
        }
    }
}

/// General error type for the crate
#[derive(Debug)]
pub enum Error {
    Gpx(gpx::errors::GpxError),
    InvalidConfigurationValue(String),
    InvalidInput(InvalidInput),
    InvalidKmlCoordinate(String),
    Io(std::io::Error),
    Kml(kml::Error),
    TrackNotFound(PathBuf, usize),
    UnknownServiceHandler(String),
    UnsupportedFileType(PathBuf),
    Yaml(serde_yaml::Error),
}

impl convert::From<InvalidInput> for Error {
    fn from(err: InvalidInput) -> Error {
        Error::InvalidInput(err)
    }
}

impl convert::From<gpx::errors::GpxError> for Error {
    fn from(err: gpx::errors::GpxError) -> Error {
        Error::Gpx(err)
    }
}

impl convert::From<kml::Error> for Error {
    fn from(err: kml::Error) -> Error {
        Error::Kml(err)
    }
}

impl convert::From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl convert::From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Gpx(e) => write!(f, "{}", e),
            Error::InvalidConfigurationValue(msg) => write!(f, "{}", msg),
            Error::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            Error::InvalidKmlCoordinate(value) => {
                write!(f, "Could not parse KML coordinate: '{}'", value)
            }
            Error::Io(e) => write!(f, "{}", e),
            Error::Kml(e) => write!(f, "{}", e),
            Error::TrackNotFound(path, index) => {
                write!(f, "File {:?} has no track with index {}", path, index)
            }
            Error::UnknownServiceHandler(msg) => write!(f, "{}", msg),
            Error::UnsupportedFileType(path) => write!(
                f,
                "Unsupported track file {:?}, expected a .gpx or .kml extension",
                path
            ),
            Error::Yaml(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}
