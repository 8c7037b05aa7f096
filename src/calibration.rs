//! Conversion of raw ADC codes into pascals and degrees Celsius.
//!
//! The sensor stores four calibration constants in OTP memory. Together with the
//! current temperature they place three points on the sensor's pressure response
//! curve, which is then fitted to three reference pressures. See section 5.11 of
//! the datasheet and the reference code published by TDK InvenSense.

/// Lower bound of the pressure look-up table, 3.5 × 2^20.
pub const LUT_LOWER: f64 = 3.5 * (1u32 << 20) as f64;
/// Upper bound of the pressure look-up table, 11.5 × 2^20.
pub const LUT_UPPER: f64 = 11.5 * (1u32 << 20) as f64;
/// Reference pressures in pascals at which the look-up table points are defined.
pub const REFERENCE_PRESSURES: [f64; 3] = [45_000.0, 80_000.0, 105_000.0];

const QUADRATIC_FACTOR: f64 = 1.0 / 16_777_216.0;
const OFFSET_FACTOR: f64 = 2048.0;

/// Raw codes from a single measurement, before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMeasurement {
    /// 16-bit temperature ADC code.
    pub temperature: u16,
    /// 24-bit pressure ADC code.
    pub pressure: u32,
}

impl RawMeasurement {
    /// Assemble the raw codes from the temperature word and the two pressure words.
    ///
    /// The pressure code spans the whole of `pressure_high` and the upper byte of
    /// `pressure_low`. The lower byte of `pressure_low` carries no data.
    pub fn from_words(temperature: u16, pressure_high: u16, pressure_low: u16) -> Self {
        Self {
            temperature,
            pressure: (u32::from(pressure_high) << 8) | u32::from(pressure_low >> 8),
        }
    }
}

/// Factory calibration constants read from the sensor's OTP memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    constants: [i16; 4],
}

impl Calibration {
    /// Wrap constants read from OTP, for converting readings without a sensor.
    pub fn new(constants: [i16; 4]) -> Self {
        Self { constants }
    }

    /// The four constants, in the order they are stored in OTP.
    pub fn constants(&self) -> [i16; 4] {
        self.constants
    }

    /// Pressure look-up table points for the given raw temperature code.
    ///
    /// At a temperature code of 32768 the quadratic terms vanish and the points
    /// are `[LUT_LOWER, 2048 * c3, LUT_UPPER]`.
    pub fn lut(&self, temperature_code: u16) -> [f64; 3] {
        let [c0, c1, c2, c3] = self.constants.map(f64::from);
        let t = f64::from(i32::from(temperature_code) - 32768);
        let t_squared = t * t;
        [
            LUT_LOWER + c0 * t_squared * QUADRATIC_FACTOR,
            OFFSET_FACTOR * c3 + c1 * t_squared * QUADRATIC_FACTOR,
            LUT_UPPER + c2 * t_squared * QUADRATIC_FACTOR,
        ]
    }

    /// Conversion constants for the given raw temperature code.
    pub fn conversion_constants(&self, temperature_code: u16) -> ConversionConstants {
        ConversionConstants::from_lut(self.lut(temperature_code))
    }

    /// Convert raw codes into calibrated pressure and temperature.
    pub fn convert(&self, raw: RawMeasurement) -> Measurement {
        let ConversionConstants { a, b, c } = self.conversion_constants(raw.temperature);
        Measurement {
            pressure: a + b / (c + f64::from(raw.pressure)),
            temperature: -45.0 + 175.0 / 65536.0 * f64::from(raw.temperature),
        }
    }
}

/// Constants of the fitted curve `pressure = a + b / (c + pressure_code)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionConstants {
    /// Pressure offset, in pascals.
    pub a: f64,
    /// Curve scale.
    pub b: f64,
    /// Pressure code offset.
    pub c: f64,
}

impl ConversionConstants {
    /// Fit the curve through the three look-up table points.
    pub fn from_lut(lut: [f64; 3]) -> Self {
        let [s1, s2, s3] = lut;
        let [p0, p1, p2] = REFERENCE_PRESSURES;
        let c = (s1 * s2 * (p0 - p1) + s2 * s3 * (p1 - p2) + s3 * s1 * (p2 - p0))
            / (s3 * (p0 - p1) + s1 * (p1 - p2) + s2 * (p2 - p0));
        let a = (p0 * s1 - p1 * s2 - (p1 - p0) * c) / (s1 - s2);
        let b = (p0 - a) * (s1 + c);
        Self { a, b, c }
    }
}

/// A calibrated pressure and temperature reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Pressure in pascals.
    pub pressure: f64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

impl Measurement {
    /// Pressure in hectopascals (millibars).
    pub fn hectopascals(&self) -> f64 {
        self.pressure / 100.0
    }

    /// Altitude in metres above the level where pressure equals `qnh` hectopascals.
    ///
    /// See [`altitude`](crate::altitude()).
    pub fn altitude(&self, qnh: f64) -> f64 {
        crate::altitude(self.hectopascals(), qnh)
    }
}
