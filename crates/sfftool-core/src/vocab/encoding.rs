use std::fmt;

use serde::{Serialize, Serializer};

use super::{INVALID_OR_UNKNOWN, serialize_code};

/// Which layout's meaning applies to the overlapping codes 0x04..=0x06.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingTable {
    /// SFF-8079 / SFF-8472 ordering.
    Sff8472,
    /// SFF-8436 / SFF-8636 ordering.
    Sff8636,
}

/// Serial encoding algorithm (SFF-8024 Table 4-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoding {
    pub code: u8,
    pub table: EncodingTable,
}

impl Encoding {
    pub fn new(code: u8, table: EncodingTable) -> Self {
        Self { code, table }
    }

    pub fn code(self) -> u8 {
        self.code
    }

    pub fn name(self) -> &'static str {
        match (self.code, self.table) {
            (0x00, _) => "Unspecified",
            (0x01, _) => "8B/10B",
            (0x02, _) => "4B/5B",
            (0x03, _) => "NRZ",
            (0x04, EncodingTable::Sff8472) => "Manchester",
            (0x05, EncodingTable::Sff8472) => "SONET Scrambled",
            (0x06, EncodingTable::Sff8472) => "64B/66B",
            (0x04, EncodingTable::Sff8636) => "SONET Scrambled",
            (0x05, EncodingTable::Sff8636) => "64B/66B",
            (0x06, EncodingTable::Sff8636) => "Manchester",
            (0x07, _) => "256B/257B (transcoded FEC-enabled data)",
            (0x08, _) => "PAM4",
            _ => INVALID_OR_UNKNOWN,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.code, self.name(), serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::{Encoding, EncodingTable};

    #[test]
    fn overlay_depends_on_table() {
        assert_eq!(Encoding::new(6, EncodingTable::Sff8472).name(), "64B/66B");
        assert_eq!(Encoding::new(5, EncodingTable::Sff8636).name(), "64B/66B");
        assert_eq!(Encoding::new(4, EncodingTable::Sff8472).name(), "Manchester");
        assert_eq!(Encoding::new(6, EncodingTable::Sff8636).name(), "Manchester");
    }

    #[test]
    fn shared_codes_and_unknown() {
        for table in [EncodingTable::Sff8472, EncodingTable::Sff8636] {
            assert_eq!(Encoding::new(1, table).name(), "8B/10B");
            assert_eq!(Encoding::new(8, table).name(), "PAM4");
            assert_eq!(Encoding::new(9, table).name(), "Invalid or unknown");
        }
    }
}
