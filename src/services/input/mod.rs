//! Parse recorded tracks out of GPS exchange files
use crate::gps::Track;
use crate::Error;
use log::{debug, trace};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

mod gpx_format;
pub use gpx_format::GpxReader;
mod kml_format;
pub use kml_format::KmlReader;

/// trait that defines how a file format is turned into tracks
pub trait TrackReader {
    /// Parse every track contained in the source, in document order
    fn read_tracks(&self, source: &mut dyn Read) -> Result<Vec<Track>, Error>;
}

/// Pick a reader based on the file extension
pub fn reader_for_path(path: &Path) -> Result<Box<dyn TrackReader>, Error> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("gpx") => Ok(Box::new(GpxReader)),
        Some("kml") => Ok(Box::new(KmlReader)),
        _ => Err(Error::UnsupportedFileType(path.to_path_buf())),
    }
}

/// Read all tracks from a GPX or KML file
pub fn read_track_files(path: &Path) -> Result<Vec<Track>, Error> {
    let reader = reader_for_path(path)?;
    trace!("Reading track file: {:?}", path);
    let mut fp = BufReader::new(File::open(path)?);
    let tracks = reader.read_tracks(&mut fp)?;
    debug!("Found {} tracks in {:?}", tracks.len(), path);
    Ok(tracks)
}

/// Read the track at `index` from a GPX or KML file
pub fn read_track_file(path: &Path, index: usize) -> Result<Track, Error> {
    read_track_files(path)?
        .into_iter()
        .nth(index)
        .ok_or_else(|| Error::TrackNotFound(path.to_path_buf(), index))
}
