#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod altitude;
pub mod calibration;
mod commands;
mod constants;
mod crc;
mod driver;
mod error;

pub use altitude::{STANDARD_QNH, altitude};
pub use calibration::{Calibration, Measurement, RawMeasurement};
pub use commands::{MeasurementMode, MeasurementOrder};
pub use constants::{CHIP_ID, DEFAULT_ADDRESS};
pub use crc::crc8;
pub use driver::{ICP10125, Response};
pub use error::Error;
