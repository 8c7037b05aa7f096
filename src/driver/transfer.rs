//! Command/response exchange with the sensor.
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{trace, warn};

use super::ICP10125;
use crate::Error;
use crate::commands::{Command, MAX_COMMAND_LENGTH};
use crate::constants::CHUNK_LENGTH;
use crate::crc::crc8;

/// Data returned by a raw [`ICP10125::transfer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Nothing was read.
    Empty,
    /// A single byte, returned without a CRC check.
    Byte(u8),
    /// One CRC-checked word.
    Word(u16),
    /// Several CRC-checked words, in the order they were received.
    Words(Vec<u16>),
}

impl Response {
    /// The CRC-checked words of the response.
    ///
    /// Empty for [`Response::Empty`] and [`Response::Byte`].
    pub fn words(&self) -> &[u16] {
        match self {
            Response::Empty | Response::Byte(_) => &[],
            Response::Word(word) => std::slice::from_ref(word),
            Response::Words(words) => words,
        }
    }
}

impl<I2C: I2c, D: DelayNs> ICP10125<I2C, D> {
    /// Write `command`, wait `delay_us` microseconds, then read `read_length` bytes.
    ///
    /// This is the building block for every other method, exposed for commands
    /// the driver does not otherwise support. A command is a big-endian 16-bit
    /// opcode, optionally followed by arguments.
    ///
    /// The response is interpreted according to its length:
    ///
    /// - 0 bytes: nothing is read and [`Response::Empty`] is returned.
    /// - 1 byte: the byte is returned as-is.
    /// - a multiple of 3 bytes: each 3-byte chunk is two data bytes followed by
    ///   their CRC. Every chunk is checked and the words are returned.
    ///
    /// # Errors
    ///
    /// - [`Error::FrameLength`] for any other length, before anything is written.
    /// - [`Error::Checksum`] if any chunk fails its CRC check.
    pub fn transfer(
        &mut self,
        command: &[u8],
        read_length: usize,
        delay_us: u32,
    ) -> Result<Response, Error<I2C::Error>> {
        if read_length > 1 && read_length % CHUNK_LENGTH != 0 {
            return Err(Error::FrameLength(read_length));
        }

        trace!("write {command:02X?} to {:#04x}", self.address);
        self.i2c.write(self.address, command).map_err(Error::I2c)?;
        // The sensor NACKs its address while a conversion is in progress.
        if delay_us > 0 {
            self.delay.delay_us(delay_us);
        }

        match read_length {
            0 => Ok(Response::Empty),
            1 => {
                let mut byte = [0u8];
                self.i2c.read(self.address, &mut byte).map_err(Error::I2c)?;
                trace!("read {byte:02X?}");
                Ok(Response::Byte(byte[0]))
            }
            _ => {
                let mut frame = vec![0u8; read_length];
                self.i2c.read(self.address, &mut frame).map_err(Error::I2c)?;
                trace!("read {frame:02X?}");
                let mut words = decode_words(&frame)?;
                if words.len() == 1 {
                    Ok(Response::Word(words.remove(0)))
                } else {
                    Ok(Response::Words(words))
                }
            }
        }
    }

    /// Issue one of the known commands with its response length and delay.
    pub(super) fn command(&mut self, command: Command) -> Result<Response, Error<I2C::Error>> {
        let mut buf = [0u8; MAX_COMMAND_LENGTH];
        let bytes = command.encode(&mut buf);
        self.transfer(bytes, command.response_length(), command.delay_us())
    }

    /// Issue a command that returns exactly one word.
    pub(super) fn read_word(&mut self, command: Command) -> Result<u16, Error<I2C::Error>> {
        match self.command(command)? {
            Response::Word(word) => Ok(word),
            other => unreachable!("Expected a single word, got {other:?}"),
        }
    }
}

/// Check the CRC of each 3-byte chunk and collect the data words.
fn decode_words<E>(frame: &[u8]) -> Result<Vec<u16>, Error<E>> {
    frame
        .chunks_exact(CHUNK_LENGTH)
        .map(|chunk| {
            let [msb, lsb, expected] = [chunk[0], chunk[1], chunk[2]];
            let computed = crc8(&[msb, lsb]);
            if computed != expected {
                warn!("CRC mismatch for {chunk:02X?}: calculated {computed:#04x}");
                return Err(Error::Checksum { expected, computed });
            }
            Ok(u16::from_be_bytes([msb, lsb]))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_each_chunk() {
        let frame = [0x6A, 0x3C, 0x82, 0x5E, 0x81, 0x40, 0x9A, 0x00, 0x22];
        let words: Vec<u16> = decode_words::<()>(&frame).unwrap();
        assert_eq!(words, [0x6A3C, 0x5E81, 0x9A00]);
    }

    #[test]
    fn one_bad_chunk_rejects_the_frame() {
        let frame = [0x6A, 0x3C, 0x82, 0x5E, 0x81, 0x41, 0x9A, 0x00, 0x22];
        assert_eq!(
            decode_words::<()>(&frame),
            Err(Error::Checksum {
                expected: 0x41,
                computed: 0x40
            })
        );
    }

    #[test]
    fn response_words() {
        assert_eq!(Response::Empty.words(), &[] as &[u16]);
        assert_eq!(Response::Byte(0x48).words(), &[] as &[u16]);
        assert_eq!(Response::Word(0x0148).words(), &[0x0148]);
        assert_eq!(Response::Words(vec![1, 2, 3]).words(), &[1, 2, 3]);
    }
}
