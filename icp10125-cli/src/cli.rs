use std::path::PathBuf;

use crate::bargraph::BargraphArgs;
use crate::readings::{AltitudeArgs, ReadArgs};
use crate::util;

use clap::{ArgAction, Parser};
use log::LevelFilter;

/// CLI for the ICP-10125 barometric pressure and temperature sensor
///
/// Reads the sensor over a Linux I2C bus device. The chip ID is checked and the
/// factory calibration is read before every command.
///
/// Altitude is derived from pressure and the local sea-level pressure (QNH).
/// The default QNH of 1013.25 hPa is only a standard atmosphere; get the current
/// value from a nearby airport or weather report for a meaningful altitude.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// I2C bus device the sensor is attached to
    #[arg(short, long, default_value = "/dev/i2c-1")]
    pub(crate) bus: PathBuf,
    /// Sensor I2C address in hexadecimal
    #[arg(short, long, default_value = "0x63", value_parser = util::u8_from_hex)]
    pub(crate) address: u8,
    /// Log more detail (-v info, -vv debug, -vvv every bus transfer)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = ArgAction::Count)]
    pub(crate) verbose: u8,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl Cli {
    pub(crate) fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
pub(crate) enum Commands {
    /// Print pressure and temperature readings.
    Read(ReadArgs),
    /// Print pressure, temperature and altitude readings.
    Altitude(AltitudeArgs),
    /// Show readings as a full-screen bar graph.
    Bargraph(BargraphArgs),
    /// Print the factory calibration constants.
    Calibration,
    /// Soft-reset the sensor.
    Reset,
}
