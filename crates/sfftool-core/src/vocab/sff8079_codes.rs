use std::fmt;

use serde::{Serialize, Serializer};

use super::{dense_name, serialize_code};

const EXTENDED_IDENTIFIER_NAMES: [&str; 8] = [
    "GBIC not specified / not MOD_DEF compliant",
    "GBIC compliant with MOD_DEF 1",
    "GBIC compliant with MOD_DEF 2",
    "GBIC compliant with MOD_DEF 3",
    "GBIC/SFP defined by 2-wire interface ID",
    "GBIC compliant with MOD_DEF 5",
    "GBIC compliant with MOD_DEF 6",
    "GBIC compliant with MOD_DEF 7",
];

/// SFF-8079 extended identifier (A0h byte 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedIdentifier(pub u8);

impl ExtendedIdentifier {
    pub fn code(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        dense_name(&EXTENDED_IDENTIFIER_NAMES, self.0).unwrap_or("invalid or unknown")
    }
}

impl fmt::Display for ExtendedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ExtendedIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

/// SFF-8079 rate identifier (A0h byte 13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateIdentifier(pub u8);

impl RateIdentifier {
    pub fn code(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0x00 => "unspecified",
            0x01 => "4/2/1G Rate_Select & AS0/AS1",
            0x02 => "8/4/2G Rx Rate_Select only",
            0x03 => "8/4/2G Independent Rx & Tx Rate_Select",
            0x04 => "8/4/2G Tx Rate_Select only",
            0x06 => "8/4/2G Independent Rx & Tx Rate_select",
            0x08 => "16/8/4G Rx Rate_select only",
            0x0A => "16/8/4G Independent Rx, Tx Rate_select",
            0x0C => "32/16/8G Independent Rx, Tx Rate_Select",
            _ => "unknown",
        }
    }
}

impl fmt::Display for RateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for RateIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtendedIdentifier, RateIdentifier};

    #[test]
    fn extended_identifier_names() {
        assert_eq!(
            ExtendedIdentifier(0x04).name(),
            "GBIC/SFP defined by 2-wire interface ID"
        );
        assert_eq!(
            ExtendedIdentifier(0x06).name(),
            "GBIC compliant with MOD_DEF 6"
        );
        assert_eq!(ExtendedIdentifier(0x08).name(), "invalid or unknown");
    }

    #[test]
    fn rate_identifier_names() {
        assert_eq!(RateIdentifier(0).name(), "unspecified");
        assert_eq!(RateIdentifier(0x05).name(), "unknown");
    }
}
