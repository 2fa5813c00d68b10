use log::{debug, error};
use simplelog::{Config as LoggerConfig, TermLogger, TerminalMode};
use std::fs::File;
use structopt::StructOpt;
use track_averager::cli::Cli;
use track_averager::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Cli::from_args();

    // an explicit config file must exist, the default one is optional
    let config = match opt.config_path() {
        Some(path) => Config::load(&mut File::open(path)?)?,
        None => match Config::default_path() {
            Some(path) if path.exists() => Config::load(&mut File::open(&path)?)?,
            _ => Config::default(),
        },
    };

    let level_filter = opt.verbosity(config.log_level());
    TermLogger::init(level_filter, LoggerConfig::default(), TerminalMode::Mixed)?;
    debug!("Loaded configuration: {:?}", config);

    // execute subcommand
    if let Err(e) = opt.execute_subcommand(config) {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
