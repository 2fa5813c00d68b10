//! Write an averaged track out for a mapping tool or renderer to consume
use crate::config::{FromServiceConfig, ServiceConfig};
use crate::gps::Track;
use crate::Error;
use std::io::Write;

mod gpx_format;
pub use gpx_format::GpxWriter;
mod polyline;
pub use polyline::PolylineWriter;

/// trait that defines how a track is serialized
pub trait TrackWriter {
    /// Serialize the track into the sink
    fn write_track(&self, track: &Track, sink: &mut dyn Write) -> Result<(), Error>;
}

pub fn new_track_writer(config: &ServiceConfig) -> Result<Box<dyn TrackWriter>, Error> {
    match config.handler() {
        "gpx" => Ok(Box::new(GpxWriter::from_config(config)?)),
        "polyline" => Ok(Box::new(PolylineWriter::from_config(config)?)),
        _ => Err(Error::UnknownServiceHandler(format!(
            "no track output handler exists for: {}",
            config.handler()
        ))),
    }
}
