//! Full-screen bar graph of pressure, temperature and altitude.
//!
//! Each bar is scaled to the range of values seen since the program started,
//! padded so the first reading sits in the middle of the bar.
use std::io::Write as _;

use clap::Args;
use icp10125::{Measurement, MeasurementMode, STANDARD_QNH};

use crate::Sensor;

const BAR_CHAR: char = '\u{2588}';
const BAR_WIDTH: usize = 80;
/// Width of each line, wide enough to overwrite a previous frame.
const LINE_WIDTH: usize = BAR_WIDTH + 14;

const CURSOR_HOME: &str = "\x1b[0;1H";
const CLEAR_SCREEN: &str = "\x1b[2J";
const BLACK: &str = "\x1b[30m";
const RESET: &str = "\x1b[0m";
/// Colours from the bottom to the top of the range.
const GRADIENT: [&str; 5] = [
    "\x1b[34m", // blue
    "\x1b[32m", // green
    "\x1b[33m", // yellow
    "\x1b[31m", // red
    "\x1b[35m", // magenta
];

#[derive(Debug, Args)]
pub(crate) struct BargraphArgs {
    /// Local sea-level pressure (QNH) in hectopascals
    #[arg(default_value_t = STANDARD_QNH)]
    qnh: f64,
}

pub(crate) fn action(sensor: &mut Sensor, args: BargraphArgs) -> anyhow::Result<()> {
    if args.qnh == STANDARD_QNH {
        log::warn!("{}", crate::QNH_WARNING);
    }
    let mut graph = BarGraph::new(args.qnh);
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{CLEAR_SCREEN}")?;
    loop {
        let reading = sensor.measure(MeasurementMode::UltraLowNoise)?;
        write!(stdout, "{}", graph.frame(&reading))?;
        stdout.flush()?;
    }
}

/// Observed range of one metric.
#[derive(Debug)]
struct Range {
    min: f64,
    max: f64,
    padding: f64,
}

impl Range {
    fn new(padding: f64) -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            padding,
        }
    }

    /// Widen the range to include `value` and return its position in the range.
    ///
    /// The position is in 0.0..=1.0.
    fn update(&mut self, value: f64) -> f64 {
        self.min = self.min.min(value - self.padding);
        self.max = self.max.max(value + self.padding);
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

pub(crate) struct BarGraph {
    qnh: f64,
    pressure: Range,
    temperature: Range,
    altitude: Range,
}

impl BarGraph {
    pub(crate) fn new(qnh: f64) -> Self {
        Self {
            qnh,
            pressure: Range::new(100.0),
            temperature: Range::new(5.0),
            altitude: Range::new(1.0),
        }
    }

    /// Record the reading and render a complete frame, starting at the top left.
    pub(crate) fn frame(&mut self, reading: &Measurement) -> String {
        let altitude = reading.altitude(self.qnh);
        let temperature_bar = bar(self.temperature.update(reading.temperature));
        let pressure_bar = bar(self.pressure.update(reading.pressure));
        let altitude_bar = bar(self.altitude.update(altitude));

        let lines = [
            String::from("ICP10125 Sensor"),
            String::new(),
            format!("Temperature:  {temperature_bar}"),
            format!("{:.4}c", reading.temperature),
            format!("Pressure:     {pressure_bar}"),
            format!("{:.4}hPa", reading.hectopascals()),
            format!("Altitude:     {altitude_bar}"),
            format!("{altitude:.2}m"),
            String::new(),
        ];
        let body: String = lines
            .iter()
            .map(|line| format!("{line:<LINE_WIDTH$}\n"))
            .collect();
        format!("{CURSOR_HOME}{body}")
    }
}

/// A bar filled to `position`, coloured by how far along the range it is.
fn bar(position: f64) -> String {
    let filled = (BAR_WIDTH as f64 * position) as usize;
    let colour = GRADIENT[((GRADIENT.len() - 1) as f64 * position) as usize];
    let full = BAR_CHAR.to_string().repeat(filled);
    let empty = BAR_CHAR.to_string().repeat(BAR_WIDTH - filled);
    format!("{colour}{full}{BLACK}{empty}{RESET}")
}
