use bit_field::BitField;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use crate::calibration::{Calibration, Measurement, RawMeasurement};
use crate::commands::{Command, MeasurementMode, MeasurementOrder};
use crate::constants::{CHIP_ID, DEFAULT_ADDRESS, OTP_WORDS};
use crate::error::Error;

mod transfer;

pub use transfer::Response;

/// Driver for the ICP-10125.
///
/// # Quick start
///
/// Create the driver with [`ICP10125::new`], passing any I2C bus implementing
/// [`embedded_hal::i2c::I2c`] and a delay provider implementing
/// [`embedded_hal::delay::DelayNs`]. Construction checks the chip ID and reads the
/// factory calibration, so a driver that exists is always ready to measure.
///
/// ```
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
/// # let mut i2c = I2cMock::new(&[
/// #     I2cTransaction::write(0x63, vec![0xEF, 0xC8]),
/// #     I2cTransaction::read(0x63, vec![0x01, 0x48, 0xF1]),
/// #     I2cTransaction::write(0x63, vec![0xC5, 0x95, 0x00, 0x66, 0x9C]),
/// #     I2cTransaction::write(0x63, vec![0xC7, 0xF7]),
/// #     I2cTransaction::read(0x63, vec![0x12, 0x34, 0x37]),
/// #     I2cTransaction::write(0x63, vec![0xC7, 0xF7]),
/// #     I2cTransaction::read(0x63, vec![0x23, 0x45, 0xB8]),
/// #     I2cTransaction::write(0x63, vec![0xC7, 0xF7]),
/// #     I2cTransaction::read(0x63, vec![0x1A, 0x2B, 0x6D]),
/// #     I2cTransaction::write(0x63, vec![0xC7, 0xF7]),
/// #     I2cTransaction::read(0x63, vec![0x0D, 0x0C, 0xBC]),
/// #     I2cTransaction::write(0x63, vec![0x68, 0x25]),
/// #     I2cTransaction::read(0x63, vec![0x6A, 0x3C, 0x82, 0x5E, 0x81, 0x40, 0x9A, 0x00, 0x22]),
/// # ]);
/// # let delay = NoopDelay::new();
/// use icp10125::{ICP10125, MeasurementMode};
///
/// let mut sensor = ICP10125::new(&mut i2c, delay)?;
/// let reading = sensor.measure(MeasurementMode::Normal)?;
/// println!("{:.2} hPa, {:.2} °C", reading.hectopascals(), reading.temperature);
/// # i2c.done();
/// # Ok::<(), icp10125::Error<embedded_hal::i2c::ErrorKind>>(())
/// ```
///
/// # Sharing
///
/// Every operation is a blocking write, delay, read sequence on the bus and must
/// not be interleaved with other traffic to the sensor. All methods take
/// `&mut self`; wrap the driver in a mutex to share it between threads.
#[derive(Debug)]
pub struct ICP10125<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    calibration: Calibration,
    last_measurement: Option<Measurement>,
}

impl<I2C: I2c, D: DelayNs> ICP10125<I2C, D> {
    /// Connect to the sensor at the default address (0x63).
    ///
    /// # Errors
    ///
    /// - [`Error::ChipIdMismatch`] if the device is not an ICP-10125.
    /// - [`Error::Checksum`] if the ID or a calibration word was corrupted.
    /// - [`Error::I2c`] if the bus reports an error.
    pub fn new(i2c: I2C, delay: D) -> Result<Self, Error<I2C::Error>> {
        Self::with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    /// Connect to the sensor at the given 7-bit address.
    ///
    /// The ICP-10125 only answers at 0x63, so this is mostly useful behind an
    /// address translator. The same errors as [`ICP10125::new`] apply.
    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Result<Self, Error<I2C::Error>> {
        let mut sensor = Self {
            i2c,
            delay,
            address,
            calibration: Calibration::new([0; OTP_WORDS]),
            last_measurement: None,
        };

        let found = sensor.chip_id()?;
        if found != CHIP_ID {
            return Err(Error::ChipIdMismatch {
                found,
                expected: CHIP_ID,
            });
        }
        sensor.calibration = sensor.read_otp()?;
        debug!(
            "ICP-10125 at {address:#04x} calibrated with {:?}",
            sensor.calibration.constants()
        );
        Ok(sensor)
    }

    /// Read the product ID, the lower 6 bits of the ID register.
    pub fn chip_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        let id = self.read_word(Command::ReadId)?;
        debug!("ID register {id:#06x}");
        Ok(id.get_bits(0..6) as u8)
    }

    /// Read the four calibration constants from OTP memory.
    fn read_otp(&mut self) -> Result<Calibration, Error<I2C::Error>> {
        self.command(Command::MoveAddressPointer)?;
        let mut constants = [0i16; OTP_WORDS];
        // Each read advances the OTP pointer by one word.
        for constant in constants.iter_mut() {
            *constant = self.read_word(Command::ReadOtp)? as i16;
        }
        Ok(Calibration::new(constants))
    }

    /// Soft-reset the sensor.
    ///
    /// The calibration constants are kept, as they do not change. Use this to
    /// recover a sensor left busy by an abandoned measurement.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command(Command::SoftReset)?;
        Ok(())
    }

    /// Measure pressure and temperature in the given mode.
    ///
    /// This blocks for the conversion time of the mode (up to 95 ms in
    /// [`MeasurementMode::UltraLowNoise`]).
    ///
    /// # Errors
    ///
    /// [`Error::Checksum`] is returned if any word of the response is corrupted, in
    /// which case the whole reading is discarded. Measurements are not retried.
    pub fn measure(&mut self, mode: MeasurementMode) -> Result<Measurement, Error<I2C::Error>> {
        self.measure_with_order(mode, MeasurementOrder::TemperatureFirst)
    }

    /// Measure pressure and temperature, choosing which the sensor sends first.
    pub fn measure_with_order(
        &mut self,
        mode: MeasurementMode,
        order: MeasurementOrder,
    ) -> Result<Measurement, Error<I2C::Error>> {
        let response = self.command(Command::Measure(mode, order))?;
        let &[first, second, third] = response.words() else {
            unreachable!("Measurement responses are three words.");
        };
        let raw = match order {
            MeasurementOrder::TemperatureFirst => RawMeasurement::from_words(first, second, third),
            MeasurementOrder::PressureFirst => RawMeasurement::from_words(third, first, second),
        };
        debug!("{mode:?} measurement {raw:?}");

        let measurement = self.calibration.convert(raw);
        self.last_measurement = Some(measurement);
        Ok(measurement)
    }

    /// The most recent successful measurement, if any.
    pub fn last_measurement(&self) -> Option<Measurement> {
        self.last_measurement
    }

    /// Factory calibration read when the driver was created.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// The sensor's 7-bit I2C address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the I2C bus and delay provider, consuming the driver.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}
