//! Write a track as a GPX 1.1 document
use super::TrackWriter;
use crate::config::{FromServiceConfig, ServiceConfig};
use crate::gps::Track;
use crate::{set_opt_string_param_from_config, set_string_param_from_config, Error};
use geo_types::Point;
use gpx::{Gpx, GpxVersion, TrackSegment, Waypoint};
use log::warn;
use std::io::Write;

static DEFAULT_TRACK_NAME: &str = "Averaged track";

/// Writes one `<trk>` with a single segment holding every point
#[derive(Clone, Debug)]
pub struct GpxWriter {
    creator: String,
    track_name: Option<String>,
}

impl GpxWriter {
    fn build_document(&self, track: &Track) -> Gpx {
        let mut segment = TrackSegment::new();
        segment.points = track
            .points()
            .iter()
            .map(|p| {
                let mut waypoint = Waypoint::new(Point::new(p.longitude(), p.latitude()));
                waypoint.elevation = p.elevation();
                waypoint
            })
            .collect();

        let mut gpx_track = gpx::Track::new();
        gpx_track.name = Some(
            self.track_name
                .as_deref()
                .or_else(|| track.name())
                .unwrap_or(DEFAULT_TRACK_NAME)
                .to_string(),
        );
        gpx_track.segments.push(segment);

        let mut document = Gpx {
            version: GpxVersion::Gpx11,
            creator: Some(self.creator.clone()),
            ..Default::default()
        };
        document.tracks.push(gpx_track);
        document
    }
}

impl Default for GpxWriter {
    fn default() -> Self {
        GpxWriter {
            creator: env!("CARGO_PKG_NAME").to_string(),
            track_name: None,
        }
    }
}

impl FromServiceConfig for GpxWriter {
    fn from_config(config: &ServiceConfig) -> Result<Self, Error> {
        let mut base = Self::default();
        for key in config.parameters() {
            match key.as_ref() {
                "creator" => set_string_param_from_config!(base, creator, config),
                "track_name" => set_opt_string_param_from_config!(base, track_name, config),
                _ => warn!("unknown configuration parameter for gpx: {}", key),
            }
        }
        Ok(base)
    }
}

impl TrackWriter for GpxWriter {
    fn write_track(&self, track: &Track, sink: &mut dyn Write) -> Result<(), Error> {
        gpx::write(&self.build_document(track), sink)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::TrackPoint;
    use crate::services::input::{GpxReader, TrackReader};

    #[test]
    fn written_document_reads_back() {
        let track = Track::with_name(
            Some("Harbour".to_string()),
            vec![
                TrackPoint::new(41.0, -74.0, Some(20.0)),
                TrackPoint::new(42.5, -75.0, None),
            ],
        );
        let mut buffer = Vec::new();
        GpxWriter::default()
            .write_track(&track, &mut buffer)
            .unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.contains("creator=\"track_averager\""));

        let tracks = GpxReader.read_tracks(&mut buffer.as_slice()).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0], track);
        assert_eq!(tracks[0].name(), Some("Harbour"));
    }

    #[test]
    fn configured_name_replaces_track_name() {
        let config: ServiceConfig = serde_yaml::from_str(
            "handler: gpx\nconfiguration:\n  creator: survey\n  track_name: Mean route\n",
        )
        .unwrap();
        let writer = GpxWriter::from_config(&config).unwrap();
        let document = writer.build_document(&Track::with_name(Some("raw".to_string()), vec![]));
        assert_eq!(document.creator.as_deref(), Some("survey"));
        assert_eq!(document.tracks[0].name.as_deref(), Some("Mean route"));
    }

    #[test]
    fn unnamed_track_gets_default_name() {
        let document = GpxWriter::default().build_document(&Track::new(vec![]));
        assert_eq!(document.tracks[0].name.as_deref(), Some(DEFAULT_TRACK_NAME));
    }
}
