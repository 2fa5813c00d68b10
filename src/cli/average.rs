//! Define average subcommand
use crate::average::{ElevationPolicy, LengthPolicy};
use crate::config::Config;
use crate::services::read_track_file;
use crate::{Error, Track};
use log::{debug, error, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use structopt::StructOpt;

/// Average recordings of the same route into one track
#[derive(Debug, StructOpt)]
pub struct AverageOpts {
    /// GPX or KML files holding the tracks to average
    #[structopt(name = "FILES", parse(from_os_str), required = true)]
    files: Vec<PathBuf>,
    /// name of file to write the averaged track to, if "-" is used we will write to stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// Output format handler (gpx, polyline), defaults to the configured output service
    #[structopt(short, long)]
    format: Option<String>,
    /// Which track to use from files holding more than one
    #[structopt(short, long, default_value = "0")]
    track_index: usize,
    /// Average up to the shortest track instead of failing on tracks of differing length
    #[structopt(long)]
    truncate: bool,
    /// How to handle points without elevation (skip, zero, error)
    #[structopt(long)]
    missing_elevation: Option<ElevationPolicy>,
    /// Fail on latitude/longitude values outside of their valid ranges
    #[structopt(long)]
    validate: bool,
}

/// Implementation of the `average` subcommand
pub fn average_command(config: Config, opts: AverageOpts) -> Result<(), Box<dyn std::error::Error>> {
    // command line flags take precedence over the config file
    let mut averager = config.averaging().averager();
    if opts.truncate {
        averager = averager.length_policy(LengthPolicy::Truncate);
    }
    if let Some(policy) = opts.missing_elevation {
        averager = averager.elevation_policy(policy);
    }
    if opts.validate {
        averager = averager.validate_coordinates(true);
    }
    let writer = config.get_track_writer(opts.format.as_deref())?;

    let mut tracks: Vec<Track> = Vec::with_capacity(opts.files.len());
    for (idx, file) in opts.files.iter().enumerate() {
        let track = read_track_file(file, opts.track_index)?;
        debug!(
            "Track {}: {} points from {:?} ({} without elevation)",
            idx,
            track.len(),
            file,
            track.missing_elevation_count()
        );
        tracks.push(track);
    }

    let averaged = match averager.average(&tracks) {
        Ok(track) => track,
        Err(e) => {
            if let Error::InvalidInput(_) = e {
                // error messages refer to tracks by position, list them for reference
                for (idx, file) in opts.files.iter().enumerate() {
                    error!("track {} = {:?}", idx, file);
                }
            }
            return Err(Box::new(e));
        }
    };
    info!(
        "Averaged {} tracks into {} points",
        tracks.len(),
        averaged.len()
    );

    match opts.output {
        Some(path) if path.to_string_lossy() != "-" => {
            let mut fp = BufWriter::new(File::create(&path)?);
            writer.write_track(&averaged, &mut fp)?;
            fp.flush()?;
            info!("Successfully wrote averaged track to {:?}", &path);
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writer.write_track(&averaged, &mut handle)?;
        }
    }

    Ok(())
}
