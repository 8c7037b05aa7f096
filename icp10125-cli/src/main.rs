use anyhow::Context;
use clap::Parser;
use icp10125::ICP10125;
use linux_embedded_hal::{Delay, I2cdev};

use cli::Commands;

mod bargraph;
mod cli;
mod readings;
mod util;

pub(crate) type Sensor = ICP10125<I2cdev, Delay>;

pub(crate) const QNH_WARNING: &str = "Using the standard atmosphere QNH of 1013.25 hPa. \
    Pass the current local QNH for an accurate altitude.";

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    env_logger::Builder::new()
        .filter_module("icp10125", cli.log_level())
        .filter_module("icp10125_cli", cli.log_level())
        .parse_default_env()
        .init();

    let i2c = I2cdev::new(&cli.bus)
        .with_context(|| format!("Failed to open I2C bus {}", cli.bus.display()))?;
    let mut sensor = ICP10125::with_address(i2c, Delay, cli.address)
        .with_context(|| format!("No ICP-10125 found at address {:#04x}", cli.address))?;

    match cli.command {
        Commands::Read(args) => readings::read_action(&mut sensor, args)?,
        Commands::Altitude(args) => readings::altitude_action(&mut sensor, args)?,
        Commands::Bargraph(args) => bargraph::action(&mut sensor, args)?,
        Commands::Calibration => {
            for (index, constant) in sensor.calibration().constants().iter().enumerate() {
                println!("c{index}: {constant}");
            }
        }
        Commands::Reset => sensor.reset()?,
    }
    Ok(())
}
