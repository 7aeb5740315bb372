use std::ops::Range;

use tracing::warn;

use crate::error::DecodeError;

/// Bounds-checked access to an EEPROM image.
///
/// Every read goes through `get`, so a short image surfaces as
/// `DecodeError::TooShort` instead of a panic.
pub struct EepromReader<'a> {
    raw: &'a [u8],
}

impl<'a> EepromReader<'a> {
    pub fn new(raw: &'a [u8]) -> Self {
        Self { raw }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn covers(&self, len: usize) -> bool {
        self.raw.len() >= len
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.raw.len() < needed {
            return Err(DecodeError::TooShort {
                needed,
                actual: self.raw.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.raw
            .get(offset)
            .copied()
            .ok_or(DecodeError::TooShort {
                needed: offset + 1,
                actual: self.raw.len(),
            })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, DecodeError> {
        let [msb, lsb] = self.read_array::<2>(range)?;
        Ok(u16::from_be_bytes([msb, lsb]))
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.raw.get(range.clone()).ok_or(DecodeError::TooShort {
            needed: range.end,
            actual: self.raw.len(),
        })
    }

    pub fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| DecodeError::TooShort {
            needed: N,
            actual: bytes.len(),
        })
    }

    /// Text field with NUL and space padding trimmed. Bytes that are not
    /// UTF-8 are rendered as lowercase hex.
    pub fn read_string(&self, range: Range<usize>) -> Result<String, DecodeError> {
        let bytes = self.read_slice(range)?;
        Ok(text_field(bytes))
    }

    /// Vendor name field. Names that are not UTF-8 or that start with `/`
    /// come from a known driver glitch and are logged as suspicious.
    pub fn read_vendor_name(&self, range: Range<usize>) -> Result<String, DecodeError> {
        let bytes = self.read_slice(range)?;
        let name = text_field(bytes);
        if std::str::from_utf8(bytes).is_err() || name.starts_with('/') {
            warn!(vendor_name = %name, "suspicious vendor name, image may be garbage");
        }
        Ok(name)
    }
}

pub(crate) fn text_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim_matches(|c| c == '\0' || c == ' ').to_string(),
        Err(_) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::EepromReader;
    use crate::error::DecodeError;

    #[test]
    fn require_len_reports_both_lengths() {
        let raw = [0u8; 10];
        let err = EepromReader::new(&raw).require_len(256).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                needed: 256,
                actual: 10
            }
        );
    }

    #[test]
    fn out_of_range_reads_fail() {
        let raw = [1u8, 2, 3];
        let reader = EepromReader::new(&raw);
        assert!(reader.read_u8(3).is_err());
        assert!(reader.read_slice(2..4).is_err());
        assert_eq!(reader.read_u16_be(1..3).unwrap(), 0x0203);
    }

    #[test]
    fn strings_are_trimmed() {
        let raw = *b"FLEXOPTIX       \0\0";
        let reader = EepromReader::new(&raw);
        assert_eq!(reader.read_string(0..raw.len()).unwrap(), "FLEXOPTIX");
    }

    #[test]
    fn invalid_utf8_becomes_hex() {
        let raw = [0xFF, 0xFE, 0x41];
        let reader = EepromReader::new(&raw);
        assert_eq!(reader.read_string(0..3).unwrap(), "fffe41");
    }

    #[test]
    fn array_reads_exact_width() {
        let raw = [0x3F, 0x80, 0x00, 0x00];
        let reader = EepromReader::new(&raw);
        assert_eq!(reader.read_array::<4>(0..4).unwrap(), raw);
    }
}
