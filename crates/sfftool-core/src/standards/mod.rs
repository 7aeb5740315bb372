//! Per-standard memory map decoders.
//!
//! Each standard follows the same split: `layout` names every offset,
//! `parser` reads through `common::EepromReader`, and `mod.rs` assembles the
//! record and applies the checksum policy.

pub mod common;
pub mod sff8079;
pub mod sff8472;
pub mod sff8636;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::DecodeError;

/// Memory map standard of an EEPROM image.
///
/// Discriminants are the module-info type codes reported by ethtool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardVariant {
    Sff8079 = 1,
    Sff8472 = 2,
    Sff8636 = 3,
    Sff8436 = 4,
}

impl StandardVariant {
    pub const ALL: [StandardVariant; 4] = [
        StandardVariant::Sff8079,
        StandardVariant::Sff8472,
        StandardVariant::Sff8636,
        StandardVariant::Sff8436,
    ];

    pub fn from_code(code: u32) -> Result<Self, DecodeError> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.code() == code)
            .ok_or(DecodeError::UnknownModuleType { code })
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Shortest image the decoder accepts.
    pub fn min_len(self) -> usize {
        match self {
            StandardVariant::Sff8079 => sff8079::layout::MIN_LEN,
            StandardVariant::Sff8472 => sff8472::layout::MIN_LEN,
            StandardVariant::Sff8636 | StandardVariant::Sff8436 => sff8636::layout::MIN_LEN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StandardVariant::Sff8079 => "SFF-8079",
            StandardVariant::Sff8472 => "SFF-8472",
            StandardVariant::Sff8636 => "SFF-8636",
            StandardVariant::Sff8436 => "SFF-8436",
        }
    }
}

impl fmt::Display for StandardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `sff8472`, `SFF-8472`, `8472` and similar spellings.
impl FromStr for StandardVariant {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let digits = normalized.strip_prefix("sff").unwrap_or(&normalized);
        match digits {
            "8079" => Ok(StandardVariant::Sff8079),
            "8472" => Ok(StandardVariant::Sff8472),
            "8636" => Ok(StandardVariant::Sff8636),
            "8436" => Ok(StandardVariant::Sff8436),
            _ => Err(DecodeError::UnknownStandard {
                name: s.to_string(),
            }),
        }
    }
}

impl Serialize for StandardVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::StandardVariant;
    use crate::error::DecodeError;

    #[test]
    fn type_codes_round_trip() {
        for variant in StandardVariant::ALL {
            assert_eq!(StandardVariant::from_code(variant.code()).unwrap(), variant);
        }
        assert_eq!(
            StandardVariant::from_code(9),
            Err(DecodeError::UnknownModuleType { code: 9 })
        );
        assert!(StandardVariant::from_code(0).is_err());
    }

    #[test]
    fn minimum_lengths() {
        assert_eq!(StandardVariant::Sff8079.min_len(), 256);
        assert_eq!(StandardVariant::Sff8472.min_len(), 256);
        assert_eq!(StandardVariant::Sff8636.min_len(), 512);
        assert_eq!(StandardVariant::Sff8436.min_len(), 512);
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!("sff8472".parse::<StandardVariant>().unwrap(), StandardVariant::Sff8472);
        assert_eq!("SFF-8636".parse::<StandardVariant>().unwrap(), StandardVariant::Sff8636);
        assert_eq!("8436".parse::<StandardVariant>().unwrap(), StandardVariant::Sff8436);
        assert!(matches!(
            "qsfp".parse::<StandardVariant>(),
            Err(DecodeError::UnknownStandard { .. })
        ));
    }
}
