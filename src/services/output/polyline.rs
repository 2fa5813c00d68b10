//! Write a track as a Google encoded polyline, the path format static map APIs accept
use super::TrackWriter;
use crate::config::{FromServiceConfig, ServiceConfig};
use crate::gps::{encode_coordinates, Track, MAX_POLYLINE_PRECISION};
use crate::{set_int_param_from_config, Error};
use log::warn;
use std::io::Write;

#[derive(Clone, Copy, Debug)]
pub struct PolylineWriter {
    precision: u32,
}

impl Default for PolylineWriter {
    fn default() -> Self {
        PolylineWriter { precision: 5 }
    }
}

impl FromServiceConfig for PolylineWriter {
    fn from_config(config: &ServiceConfig) -> Result<Self, Error> {
        let mut base = Self::default();
        for key in config.parameters() {
            match key.as_ref() {
                "precision" => set_int_param_from_config!(base, precision, config, u32),
                _ => warn!("unknown configuration parameter for polyline: {}", key),
            }
        }
        if base.precision > MAX_POLYLINE_PRECISION {
            return Err(Error::InvalidConfigurationValue(format!(
                "invalid value for polyline.precision, must be at most {}: {}",
                MAX_POLYLINE_PRECISION, base.precision
            )));
        }
        Ok(base)
    }
}

impl TrackWriter for PolylineWriter {
    fn write_track(&self, track: &Track, sink: &mut dyn Write) -> Result<(), Error> {
        let encoded = encode_coordinates(track.points(), self.precision)?;
        writeln!(sink, "{}", encoded)?;
        Ok(())
    }
}
