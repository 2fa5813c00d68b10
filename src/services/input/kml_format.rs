//! Read tracks from KML documents
use super::TrackReader;
use crate::gps::{Track, TrackPoint};
use crate::Error;
use kml::types::{Element, Geometry, Placemark};
use kml::Kml;
use log::{trace, warn};
use std::io::{BufReader, Read};

/// Reads placemarks holding line strings or `gx:Track` elements as tracks
#[derive(Clone, Copy, Debug, Default)]
pub struct KmlReader;

impl TrackReader for KmlReader {
    fn read_tracks(&self, source: &mut dyn Read) -> Result<Vec<Track>, Error> {
        let data = kml::KmlReader::<_, f64>::from_reader(BufReader::new(source)).read()?;
        let mut tracks = Vec::new();
        for element in flatten_kml(vec![data]) {
            let placemark = match element {
                Kml::Placemark(p) => p,
                _ => continue,
            };
            let track = placemark_track(placemark)?;
            if track.is_empty() {
                trace!("Skipping placemark without track geometry: {:?}", track.name());
            } else {
                tracks.push(track);
            }
        }
        Ok(tracks)
    }
}

fn flatten_kml(kml: Vec<Kml<f64>>) -> Vec<Kml<f64>> {
    kml.into_iter()
        .flat_map(|k| match k {
            Kml::KmlDocument(d) => flatten_kml(d.elements),
            Kml::Document { attrs: _, elements } => flatten_kml(elements),
            Kml::Folder { attrs: _, elements } => flatten_kml(elements),
            k => vec![k],
        })
        .collect()
}

fn placemark_track(placemark: Placemark<f64>) -> Result<Track, Error> {
    let mut points = Vec::new();
    if let Some(geometry) = &placemark.geometry {
        collect_geometry_points(geometry, &mut points);
    }
    for element in placemark.children.iter().filter(|e| e.name == "Track") {
        collect_gx_track_points(element, &mut points)?;
    }
    Ok(Track::with_name(placemark.name, points))
}

fn collect_geometry_points(geometry: &Geometry<f64>, points: &mut Vec<TrackPoint>) {
    match geometry {
        Geometry::LineString(line) => points.extend(
            line.coords
                .iter()
                .map(|c| TrackPoint::new(c.y, c.x, c.z)),
        ),
        Geometry::MultiGeometry(multi) => {
            for geometry in &multi.geometries {
                collect_geometry_points(geometry, points);
            }
        }
        other => warn!("Ignoring non line geometry in KML placemark: {:?}", other),
    }
}

/// `gx:coord` children hold "lon lat [alt]" separated by whitespace
fn collect_gx_track_points(track: &Element, points: &mut Vec<TrackPoint>) -> Result<(), Error> {
    for coord in track.children.iter().filter(|e| e.name == "coord") {
        if let Some(content) = &coord.content {
            points.push(parse_gx_coord(content)?);
        }
    }
    Ok(())
}

fn parse_gx_coord(content: &str) -> Result<TrackPoint, Error> {
    let invalid = || Error::InvalidKmlCoordinate(content.to_string());
    let values = content
        .split_whitespace()
        .map(|v| v.parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<f64>, Error>>()?;
    match values.as_slice() {
        [longitude, latitude] => Ok(TrackPoint::new(*latitude, *longitude, None)),
        [longitude, latitude, altitude] => {
            Ok(TrackPoint::new(*latitude, *longitude, Some(*altitude)))
        }
        _ => Err(invalid()),
    }
}
