use std::time::Duration;

pub(crate) fn u8_from_hex(value: &str) -> Result<u8, std::num::ParseIntError> {
    let s = if value.to_ascii_lowercase().starts_with("0x") {
        &value[2..]
    } else {
        value
    };
    u8::from_str_radix(s, 16)
}

/// Parse a non-negative number of seconds, which may be fractional.
pub(crate) fn duration_from_secs(value: &str) -> Result<Duration, String> {
    let secs: f64 = value.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_with_and_without_prefix() {
        assert_eq!(u8_from_hex("0x63"), Ok(0x63));
        assert_eq!(u8_from_hex("0X63"), Ok(0x63));
        assert_eq!(u8_from_hex("63"), Ok(0x63));
        assert!(u8_from_hex("0x163").is_err());
    }

    #[test]
    fn fractional_seconds() {
        assert_eq!(duration_from_secs("1"), Ok(Duration::from_secs(1)));
        assert_eq!(duration_from_secs("0.25"), Ok(Duration::from_millis(250)));
        assert!(duration_from_secs("-1").is_err());
        assert!(duration_from_secs("soon").is_err());
    }
}
