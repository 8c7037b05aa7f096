//! Commands understood by the ICP-10125.
use crate::constants::{CHUNK_LENGTH, OTP_START_ADDRESS, SOFT_RESET_DELAY_US};
use crate::crc::crc8;

/// Longest command written to the sensor: the move-address-pointer command.
pub(crate) const MAX_COMMAND_LENGTH: usize = 5;

/// Operation mode used for a measurement.
///
/// The modes trade conversion time (and so power consumption) against noise.
/// See section 5.2 of the datasheet for the noise figure of each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementMode {
    /// Conversion time up to 6.3 ms.
    #[default]
    Normal,
    /// Conversion time up to 1.8 ms.
    LowPower,
    /// Conversion time up to 23.8 ms.
    LowNoise,
    /// Conversion time up to 94.5 ms.
    UltraLowNoise,
}

impl MeasurementMode {
    /// All four modes, in datasheet order.
    pub const ALL: [MeasurementMode; 4] = [
        MeasurementMode::Normal,
        MeasurementMode::LowPower,
        MeasurementMode::LowNoise,
        MeasurementMode::UltraLowNoise,
    ];

    /// Time to wait between issuing the measurement command and reading the result.
    ///
    /// These round the datasheet's maximum conversion time up to the next whole
    /// millisecond. Reading earlier than this returns a NACK or stale data.
    pub fn conversion_time_us(&self) -> u32 {
        match self {
            MeasurementMode::Normal => 7_000,
            MeasurementMode::LowPower => 2_000,
            MeasurementMode::LowNoise => 24_000,
            MeasurementMode::UltraLowNoise => 95_000,
        }
    }

    /// Command code that starts a measurement in this mode.
    pub fn opcode(&self, order: MeasurementOrder) -> u16 {
        use MeasurementMode::*;
        use MeasurementOrder::*;
        match (self, order) {
            (Normal, TemperatureFirst) => 0x6825,
            (Normal, PressureFirst) => 0x48A3,
            (LowPower, TemperatureFirst) => 0x609C,
            (LowPower, PressureFirst) => 0x401A,
            (LowNoise, TemperatureFirst) => 0x70DF,
            (LowNoise, PressureFirst) => 0x5059,
            (UltraLowNoise, TemperatureFirst) => 0x7866,
            (UltraLowNoise, PressureFirst) => 0x58E0,
        }
    }
}

/// Which of the two readings the sensor transmits first.
///
/// This only changes the layout of the response; the readings are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementOrder {
    /// Temperature word, then the two pressure words.
    #[default]
    TemperatureFirst,
    /// The two pressure words, then the temperature word.
    PressureFirst,
}

pub(crate) enum Command {
    /// Reset the sensor's internal state. There is no response.
    SoftReset,
    /// Read the ID register. The product ID is in the lower 6 bits.
    ReadId,
    /// Position the OTP read pointer at the first calibration constant.
    ///
    /// The two address bytes are followed by their own CRC.
    MoveAddressPointer,
    /// Read the calibration constant at the OTP pointer and advance the pointer.
    ReadOtp,
    /// Start a measurement and read back the raw codes once it completes.
    Measure(MeasurementMode, MeasurementOrder),
}

impl Command {
    fn opcode(&self) -> u16 {
        match self {
            Command::SoftReset => 0x805D,
            Command::ReadId => 0xEFC8,
            Command::MoveAddressPointer => 0xC595,
            Command::ReadOtp => 0xC7F7,
            Command::Measure(mode, order) => mode.opcode(*order),
        }
    }

    /// Serialise the command (big-endian opcode plus any arguments) into `buf`.
    pub(crate) fn encode<'a>(&self, buf: &'a mut [u8; MAX_COMMAND_LENGTH]) -> &'a [u8] {
        let [msb, lsb] = self.opcode().to_be_bytes();
        buf[0] = msb;
        buf[1] = lsb;
        match self {
            Command::MoveAddressPointer => {
                buf[2..4].copy_from_slice(&OTP_START_ADDRESS);
                buf[4] = crc8(&OTP_START_ADDRESS);
                &buf[..5]
            }
            _ => &buf[..2],
        }
    }

    /// Number of bytes the sensor sends back in response to the command.
    pub(crate) fn response_length(&self) -> usize {
        match self {
            Command::SoftReset | Command::MoveAddressPointer => 0,
            Command::ReadId | Command::ReadOtp => CHUNK_LENGTH,
            Command::Measure(..) => 3 * CHUNK_LENGTH,
        }
    }

    /// Delay between writing the command and reading the response, in microseconds.
    pub(crate) fn delay_us(&self) -> u32 {
        match self {
            Command::SoftReset => SOFT_RESET_DELAY_US,
            Command::Measure(mode, _) => mode.conversion_time_us(),
            _ => 0,
        }
    }
}
