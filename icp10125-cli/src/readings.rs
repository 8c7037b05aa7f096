use std::time::Duration;

use clap::{Args, ValueEnum};
use icp10125::{Measurement, STANDARD_QNH};

use crate::Sensor;
use crate::util;

#[derive(Debug, Args)]
pub(crate) struct ReadArgs {
    /// Measurement mode
    #[arg(short, long, default_value = "normal")]
    mode: Mode,
    /// Which reading the sensor sends first
    #[arg(long, default_value = "temperature-first")]
    order: Order,
    /// Seconds to wait between readings
    #[arg(short, long, default_value = "1", value_parser = util::duration_from_secs)]
    interval: Duration,
    /// Stop after this many readings, rather than running until interrupted
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    count: Option<u64>,
}

#[derive(Debug, Args)]
pub(crate) struct AltitudeArgs {
    /// Local sea-level pressure (QNH) in hectopascals
    #[arg(default_value_t = STANDARD_QNH)]
    pub(crate) qnh: f64,
    #[command(flatten)]
    read: ReadArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Mode {
    /// Conversion time 7 ms
    Normal,
    /// Conversion time 2 ms
    LowPower,
    /// Conversion time 24 ms
    LowNoise,
    /// Conversion time 95 ms
    UltraLowNoise,
}

impl From<Mode> for icp10125::MeasurementMode {
    fn from(value: Mode) -> icp10125::MeasurementMode {
        match value {
            Mode::Normal => icp10125::MeasurementMode::Normal,
            Mode::LowPower => icp10125::MeasurementMode::LowPower,
            Mode::LowNoise => icp10125::MeasurementMode::LowNoise,
            Mode::UltraLowNoise => icp10125::MeasurementMode::UltraLowNoise,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Order {
    TemperatureFirst,
    PressureFirst,
}

impl From<Order> for icp10125::MeasurementOrder {
    fn from(value: Order) -> icp10125::MeasurementOrder {
        match value {
            Order::TemperatureFirst => icp10125::MeasurementOrder::TemperatureFirst,
            Order::PressureFirst => icp10125::MeasurementOrder::PressureFirst,
        }
    }
}

pub(crate) fn read_action(sensor: &mut Sensor, args: ReadArgs) -> anyhow::Result<()> {
    poll(sensor, &args, |reading| format_reading(reading, None))
}

pub(crate) fn altitude_action(sensor: &mut Sensor, args: AltitudeArgs) -> anyhow::Result<()> {
    if args.qnh == STANDARD_QNH {
        log::warn!("{}", crate::QNH_WARNING);
    }
    poll(sensor, &args.read, |reading| {
        format_reading(reading, Some(args.qnh))
    })
}

/// Measure and print until the count is reached or the process is interrupted.
fn poll(
    sensor: &mut Sensor,
    args: &ReadArgs,
    format: impl Fn(&Measurement) -> String,
) -> anyhow::Result<()> {
    let mut taken = 0;
    loop {
        let reading = sensor.measure_with_order(args.mode.into(), args.order.into())?;
        println!("{}", format(&reading));
        taken += 1;
        if args.count.is_some_and(|count| taken >= count) {
            return Ok(());
        }
        std::thread::sleep(args.interval);
    }
}

fn format_reading(reading: &Measurement, qnh: Option<f64>) -> String {
    let mut text = format!(
        "Pressure:    {:.2}hPa\nTemperature: {:.4}c",
        reading.hectopascals(),
        reading.temperature
    );
    if let Some(qnh) = qnh {
        text.push_str(&format!("\nAltitude:    {:.4}m\n", reading.altitude(qnh)));
    }
    text
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cli::{Cli, Commands};

    use clap::Parser;

    const READING: Measurement = Measurement {
        pressure: 101_325.0,
        temperature: 21.5,
    };

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("icp10125-cli").chain(args.iter().copied()))
    }

    fn read_count(args: &[&str]) -> Option<u64> {
        match parse(args).unwrap().command {
            Commands::Read(read) => read.count,
            Commands::Altitude(altitude) => altitude.read.count,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn zero_count_is_rejected() {
        let error = parse(&["read", "--count", "0"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(parse(&["altitude", "-n", "0"]).is_err());
    }

    #[test]
    fn count_is_optional() {
        assert_eq!(read_count(&["read"]), None);
        assert_eq!(read_count(&["read", "-n", "1"]), Some(1));
        assert_eq!(read_count(&["altitude", "1021", "--count", "5"]), Some(5));
    }

    #[test]
    fn pressure_and_temperature() {
        assert_eq!(
            format_reading(&READING, None),
            "Pressure:    1013.25hPa\nTemperature: 21.5000c"
        );
    }

    #[test]
    fn altitude_at_reference_pressure() {
        assert_eq!(
            format_reading(&READING, Some(STANDARD_QNH)),
            "Pressure:    1013.25hPa\nTemperature: 21.5000c\nAltitude:    0.0000m\n"
        );
    }
}
