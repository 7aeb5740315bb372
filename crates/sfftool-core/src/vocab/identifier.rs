use std::fmt;

use serde::{Serialize, Serializer};

use super::{INVALID_OR_UNKNOWN, VENDOR_SPECIFIC, dense_name, serialize_code};

const NAMES: [&str; 0x18] = [
    "No module present, unknown, or unspecified",
    "GBIC",
    "Module soldered to motherboard",
    "SFP",
    "300 pin XBI",
    "XENPAK",
    "XFP",
    "XFF",
    "XFP-E",
    "XPAK",
    "X2",
    "DWDM-SFP",
    "QSFP",
    "QSFP+",
    "CXP",
    "Shielded Mini Multilane HD 4X",
    "Shielded Mini Multilane HD 8X",
    "QSFP28",
    "CXP2/CXP28",
    "CDFP Style 1/Style 2",
    "Shielded Mini Multilane HD 4X Fanout Cable",
    "Shielded Mini Multilane HD 8X Fanout Cable",
    "CDFP Style 3",
    "MicroQSFP",
];

const VENDOR_START: u8 = 0x80;

/// Physical device type (SFF-8024 Table 4-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(pub u8);

impl Identifier {
    pub const UNKNOWN: Self = Self(0x00);
    pub const SFP: Self = Self(0x03);
    pub const QSFP: Self = Self(0x0C);
    pub const QSFP_PLUS: Self = Self(0x0D);
    pub const QSFP28: Self = Self(0x11);

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        match dense_name(&NAMES, self.0) {
            Some(name) => name,
            None if self.0 >= VENDOR_START => VENDOR_SPECIFIC,
            None => INVALID_OR_UNKNOWN,
        }
    }

    /// Named by the table or inside the vendor range.
    pub fn is_known(self) -> bool {
        usize::from(self.0) < NAMES.len() || self.0 >= VENDOR_START
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}
