//! SFF-8079 serial ID decoding.
//!
//! SFF-8079 modules expose only page A0h: identity, compliance codes,
//! link lengths and options. The base-page parser here is shared with
//! SFF-8472, which extends the same page with diagnostic fields.
//!
//! Cable assemblies (active or passive cable compliance bit) reuse the
//! wavelength bytes for cable specification compliance and the OM4 byte for
//! copper length; the parser resolves both so callers never see a
//! meaningless wavelength.

pub mod compliance;
pub mod layout;
pub mod options;
pub mod parser;

use serde::Serialize;
use tracing::debug;

use crate::checksum::{self, ChecksumReport};
use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::standards::common::EepromReader;

pub use compliance::{CableSpecification, ComplianceCode};
pub use options::Options;
pub use parser::{LinkLengths, SerialId, parse_serial_id};

/// Decoded SFF-8079 image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sff8079Eeprom {
    #[serde(flatten)]
    pub serial_id: SerialId,
    pub checksums: Vec<ChecksumReport>,
    #[serde(skip)]
    raw: Vec<u8>,
}

impl Sff8079Eeprom {
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Recompute CC_BASE and CC_EXT against the retained image.
    pub fn verify_checksums(&self) -> Vec<ChecksumReport> {
        [layout::BASE_CHECKSUM, layout::EXTENDED_CHECKSUM]
            .iter()
            .filter_map(|span| checksum::verify(&self.raw, span))
            .collect()
    }
}

pub fn parse_sff8079(raw: &[u8], options: &DecodeOptions) -> Result<Sff8079Eeprom, DecodeError> {
    let reader = EepromReader::new(raw);
    reader.require_len(layout::MIN_LEN)?;
    debug!(len = raw.len(), "decoding SFF-8079 image");

    let checksums = checksum::verify_all(
        raw,
        &[layout::BASE_CHECKSUM, layout::EXTENDED_CHECKSUM],
        options.checksum_policy,
    )?;
    let serial_id = parse_serial_id(&reader)?;

    Ok(Sff8079Eeprom {
        serial_id,
        checksums,
        raw: raw.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::{layout, parse_sff8079};
    use crate::checksum::checksum;
    use crate::error::DecodeError;
    use crate::options::{ChecksumPolicy, DecodeOptions};

    fn valid_image() -> Vec<u8> {
        let mut raw = vec![0u8; layout::MIN_LEN];
        raw[0] = 0x03;
        raw[layout::VENDOR_PN_RANGE].copy_from_slice(b"PART-1          ");
        raw[0x3F] = checksum(&raw[0x00..0x3F]);
        raw[0x5F] = checksum(&raw[0x40..0x5F]);
        raw
    }

    #[test]
    fn valid_checksums_are_reported() {
        let eeprom = parse_sff8079(&valid_image(), &DecodeOptions::default()).unwrap();
        assert_eq!(eeprom.checksums.len(), 2);
        assert!(eeprom.checksums.iter().all(|report| report.valid));
        assert_eq!(eeprom.serial_id.vendor_pn, "PART-1");
        assert_eq!(eeprom.verify_checksums(), eeprom.checksums);
    }

    #[test]
    fn base_mismatch_degrades_by_default() {
        let mut raw = valid_image();
        raw[0x3F] ^= 0xFF;
        let eeprom = parse_sff8079(&raw, &DecodeOptions::default()).unwrap();
        assert!(!eeprom.checksums[0].valid);
    }

    #[test]
    fn base_mismatch_fails_when_strict() {
        let mut raw = valid_image();
        raw[0x3F] ^= 0xFF;
        let options = DecodeOptions {
            checksum_policy: ChecksumPolicy::Strict,
            ..DecodeOptions::default()
        };
        let err = parse_sff8079(&raw, &options).unwrap_err();
        assert!(matches!(err, DecodeError::ChecksumMismatch { .. }));
    }

    #[test]
    fn rejects_short_image() {
        let raw = vec![0u8; layout::MIN_LEN - 1];
        let err = parse_sff8079(&raw, &DecodeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                needed: 256,
                actual: 255
            }
        );
    }
}
