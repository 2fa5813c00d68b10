//! Read tracks from GPX documents
use super::TrackReader;
use crate::gps::{Track, TrackPoint};
use crate::Error;
use std::io::Read;

/// Reads every `<trk>` element as one track, joining its segments in order
#[derive(Clone, Copy, Debug, Default)]
pub struct GpxReader;

impl TrackReader for GpxReader {
    fn read_tracks(&self, source: &mut dyn Read) -> Result<Vec<Track>, Error> {
        let data = gpx::read(source)?;
        let tracks = data
            .tracks
            .into_iter()
            .map(|track| {
                let points = track
                    .segments
                    .iter()
                    .flat_map(|segment| segment.points.iter())
                    .map(|waypoint| {
                        let point = waypoint.point();
                        TrackPoint::new(point.y(), point.x(), waypoint.elevation)
                    })
                    .collect();
                Track::with_name(track.name, points)
            })
            .collect();
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TWO_SEGMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Lake loop</name>
    <trkseg>
      <trkpt lat="46.5" lon="7.25"><ele>550.5</ele></trkpt>
      <trkpt lat="46.6" lon="7.35"></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="46.7" lon="7.45"><ele>560</ele></trkpt>
    </trkseg>
  </trk>
  <trk>
    <trkseg>
      <trkpt lat="1" lon="2"></trkpt>
    </trkseg>
  </trk>
</gpx>
"#;

    #[test]
    fn joins_segments_of_each_track() {
        let tracks = GpxReader.read_tracks(&mut TWO_SEGMENTS.as_bytes()).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name(), Some("Lake loop"));
        assert_eq!(
            tracks[0].points(),
            &[
                TrackPoint::new(46.5, 7.25, Some(550.5)),
                TrackPoint::new(46.6, 7.35, None),
                TrackPoint::new(46.7, 7.45, Some(560.0)),
            ]
        );
        assert_eq!(tracks[1].name(), None);
        assert_eq!(tracks[1].len(), 1);
    }

    #[test]
    fn rejects_malformed_document() {
        let result = GpxReader.read_tracks(&mut "<gpx><trk>".as_bytes());
        assert!(matches!(result, Err(Error::Gpx(_))));
    }
}
