//! Average several GPS recordings of the same route into one representative track.
//!
//! Tracks are read from GPX or KML files by the [`services::input`] readers, averaged point by
//! point with [`TrackAverager`] and written back out by a [`services::output`] writer.
pub mod average;
pub mod cli;
pub mod config;
mod error;
pub mod gps;
pub mod services;

// re-export some structures and functions
pub use average::{average_tracks, ElevationPolicy, LengthPolicy, TrackAverager};
pub use error::{Error, InvalidInput};
pub use gps::{Track, TrackPoint};
