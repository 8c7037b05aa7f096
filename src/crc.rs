//! CRC-8 used to protect every data word the sensor sends.

/// Generator polynomial x^8 + x^5 + x^4 + 1.
const POLYNOMIAL: u8 = 0x31;
const INITIAL_VALUE: u8 = 0xFF;

/// Calculate the CRC-8 of `data` as the ICP-10125 does.
///
/// Polynomial 0x31, initialised to 0xFF, processed most-significant bit first,
/// with no reflection and no final XOR.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = INITIAL_VALUE;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

#[cfg(test)]
mod test {
    use super::crc8;

    #[test]
    fn datasheet_example() {
        assert_eq!(crc8(&[0xBE, 0xEF]), 0x92);
    }

    #[test]
    fn otp_pointer_checksum() {
        assert_eq!(crc8(&[0x00, 0x66]), 0x9C);
    }

    #[test]
    fn chip_id_response_checksum() {
        assert_eq!(crc8(&[0x01, 0x48]), 0xF1);
    }

    #[test]
    fn zero_word_is_not_zero_checksum() {
        assert_eq!(crc8(&[0x00, 0x00]), 0x81);
    }

    #[test]
    fn empty_input_is_initial_value() {
        assert_eq!(crc8(&[]), 0xFF);
    }

    /// A chunk that passed validation always reproduces its stored checksum.
    #[test]
    fn recomputed_checksum_is_stable() {
        for word in [0x0000u16, 0x0148, 0x1234, 0x8000, 0xFFFF] {
            let [msb, lsb] = word.to_be_bytes();
            let chunk = [msb, lsb, crc8(&[msb, lsb])];
            assert_eq!(crc8(&chunk[..2]), chunk[2]);
        }
    }
}
