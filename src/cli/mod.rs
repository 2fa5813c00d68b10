//! Define the application's command line interface
use crate::config::Config;
use simplelog::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

mod average;
use average::{average_command, AverageOpts};
mod info;
use info::{info_command, InfoOpts};

/// Average several GPS recordings of the same route into a single track
#[derive(Debug, StructOpt)]
#[structopt(name = "track-averager")]
pub struct Cli {
    /// Set logging level to debug, use a second time (e.g. -vv) to set logging to trace
    #[structopt(short, long, parse(from_occurrences))]
    verbose: i32,
    /// Suppress info logging messages use a second time (e.g. -qq) to hide warnings
    #[structopt(short, long, parse(from_occurrences))]
    quiet: i32,
    /// Configuration file to use instead of the one in the user's config directory
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Command,
}

impl Cli {
    /// Return the verbose flag counts as a log level filter
    pub fn verbosity(&self, default: LevelFilter) -> LevelFilter {
        if self.quiet == 1 {
            LevelFilter::Warn
        } else if self.quiet > 1 {
            LevelFilter::Error
        } else if self.verbose == 1 {
            LevelFilter::Debug
        } else if self.verbose > 1 {
            LevelFilter::Trace
        } else {
            default
        }
    }

    /// Explicit config file path if one was given
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    /// Consume options struct and return the result of subcommand execution
    pub fn execute_subcommand(self, config: Config) -> Result<(), Box<dyn std::error::Error>> {
        self.cmd.execute(config)
    }
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Average two or more tracks point by point
    #[structopt(name = "average")]
    Average(AverageOpts),
    /// Summarize the tracks found in GPX or KML files
    #[structopt(name = "info")]
    Info(InfoOpts),
}

impl Command {
    /// Consume enum variant and return the result of the command's execution
    fn execute(self, config: Config) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Command::Average(opts) => average_command(config, opts),
            Command::Info(opts) => info_command(opts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_verbosity_flags() {
        let cli = Cli::from_iter(&["track-averager", "-vv", "info", "a.gpx"]);
        assert_eq!(cli.verbosity(LevelFilter::Info), LevelFilter::Trace);
        let cli = Cli::from_iter(&["track-averager", "-q", "info", "a.gpx"]);
        assert_eq!(cli.verbosity(LevelFilter::Info), LevelFilter::Warn);
        let cli = Cli::from_iter(&["track-averager", "info", "a.gpx"]);
        assert_eq!(cli.verbosity(LevelFilter::Info), LevelFilter::Info);
    }

    #[test]
    fn average_requires_files() {
        assert!(Cli::from_iter_safe(&["track-averager", "average"]).is_err());
    }
}
