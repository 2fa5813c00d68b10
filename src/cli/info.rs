//! Define the info subcommand
use crate::services::input::read_track_files;
use crate::{Track, TrackPoint};
use log::warn;
use std::path::PathBuf;
use structopt::StructOpt;

/// Print the tracks found in each file, useful to pick a track index or spot misaligned
/// recordings before averaging
#[derive(Debug, StructOpt)]
pub struct InfoOpts {
    /// GPX or KML files to inspect
    #[structopt(name = "FILES", parse(from_os_str), required = true)]
    files: Vec<PathBuf>,
}

pub fn info_command(opts: InfoOpts) -> Result<(), Box<dyn std::error::Error>> {
    println!("File\tIndex\tName\tPoints\tNo Elevation\tStart\tEnd");
    for file in &opts.files {
        let tracks = read_track_files(file)?;
        if tracks.is_empty() {
            warn!("No tracks found in {:?}", file);
        }
        for (idx, track) in tracks.iter().enumerate() {
            println!("{}", summary_line(&file.to_string_lossy(), idx, track));
        }
    }

    Ok(())
}

fn summary_line(file: &str, idx: usize, track: &Track) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        file,
        idx,
        track.name().unwrap_or("-"),
        track.len(),
        track.missing_elevation_count(),
        format_point(track.points().first()),
        format_point(track.points().last()),
    )
}

fn format_point(point: Option<&TrackPoint>) -> String {
    match point {
        Some(p) => format!("{:.5},{:.5}", p.latitude(), p.longitude()),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_summary_line() {
        let track = Track::with_name(
            Some("Coast".to_string()),
            vec![
                TrackPoint::new(40.0, -73.0, None),
                TrackPoint::new(41.123456, -74.5, Some(3.0)),
            ],
        );
        assert_eq!(
            summary_line("coast.gpx", 0, &track),
            "coast.gpx\t0\tCoast\t2\t1\t40.00000,-73.00000\t41.12346,-74.50000"
        );
    }

    #[test]
    fn formats_empty_track() {
        assert_eq!(
            summary_line("empty.kml", 3, &Track::new(vec![])),
            "empty.kml\t3\t-\t0\t0\t-\t-"
        );
    }
}
