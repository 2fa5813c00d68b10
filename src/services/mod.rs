//! Service module that exports interfaces to the track file formats we read and write

pub mod input;
pub mod output;

// rexport some traits and utilty functions
pub use input::{read_track_file, reader_for_path, TrackReader};
pub use output::{new_track_writer, TrackWriter};
