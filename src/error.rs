use core::fmt;

/// Problems when communicating with the ICP-10125.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// The I2C bus reported an error, which is passed through unchanged.
    I2c(E),
    /// The device at the address is not an ICP-10125.
    ///
    /// Only returned when constructing the driver.
    ChipIdMismatch {
        /// Product ID read from the device (lower 6 bits of the ID register).
        found: u8,
        /// Product ID of the ICP-10125.
        expected: u8,
    },
    /// A word received from the sensor failed its CRC check.
    ///
    /// The whole response is discarded; no partial results are returned. The
    /// driver never retries, so it is up to the caller whether to try again.
    Checksum {
        /// CRC byte sent by the sensor.
        expected: u8,
        /// CRC calculated over the received data bytes.
        computed: u8,
    },
    /// A raw transfer asked for a response that is not 0, 1 or a whole number of
    /// 3-byte words.
    FrameLength(usize),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C bus error: {e:?}"),
            Error::ChipIdMismatch { found, expected } => write!(
                f,
                "invalid chip ID {found:#04x}, expected {expected:#04x}"
            ),
            Error::Checksum { expected, computed } => write!(
                f,
                "invalid CRC8 in response: received {expected:#04x}, calculated {computed:#04x}"
            ),
            Error::FrameLength(length) => {
                write!(f, "cannot decode a response of {length} bytes")
            }
        }
    }
}

impl<E: fmt::Debug> std::error::Error for Error<E> {}
