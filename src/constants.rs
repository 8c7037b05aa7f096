/// Default 7-bit I2C address of the ICP-10125. The address is fixed in silicon.
pub const DEFAULT_ADDRESS: u8 = 0x63;

/// Product-specific bits of the ID register for the ICP-10125.
pub const CHIP_ID: u8 = 0x08;

/// Address in the OTP memory of the first calibration constant.
///
/// Sent as the argument of the move-address-pointer command, followed by its CRC.
pub(crate) const OTP_START_ADDRESS: [u8; 2] = [0x00, 0x66];

/// Number of calibration words stored in OTP.
pub(crate) const OTP_WORDS: usize = 4;

/// Bytes in one response chunk: two data bytes followed by their CRC.
pub(crate) const CHUNK_LENGTH: usize = 3;

/// Settling time after a soft reset, in microseconds.
pub(crate) const SOFT_RESET_DELAY_US: u32 = 100;
