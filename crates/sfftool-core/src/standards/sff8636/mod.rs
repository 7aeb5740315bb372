//! SFF-8636 (QSFP+/QSFP28) management interface decoding.
//!
//! The image is the lower page (bytes 0..=127) followed by upper page 00h
//! (128..=255) and, when the driver dumped them, further upper pages at
//! 128-byte strides. Page 03h at offset 512 holds the module and channel
//! thresholds. Images shorter than 0x248 bytes decode without thresholds.
//!
//! Copper assemblies reuse the wavelength, tolerance and OM1 bytes for
//! attenuation figures and the OM4 byte for cable length. `UpperPage`
//! resolves which reading applies.
//!
//! SFF-8436 images share this layout and decode through the same parser.

pub mod compliance;
pub mod control;
pub mod flags;
pub mod layout;
pub mod lower_page;
pub mod parser;
pub mod upper_page;

use serde::Serialize;
use tracing::{debug, warn};

use crate::checksum::{self, ChecksumReport};
use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::standards::common::EepromReader;

pub use compliance::{ExtendedModuleCode, Specification};
pub use control::{ChannelControl, Control, RateSelect};
pub use flags::{AlarmFlags, ChannelFlags, ChannelStatus, InterruptFlags, InterruptMasks};
pub use lower_page::{ChannelMonitor, FreeSideDeviceProperties, FreeSideMonitors};
pub use parser::{LowerPage, ModuleThresholds, UpperPage};
pub use upper_page::{
    CopperAttenuation, DeviceTechnology, DiagnosticMonitoringType, EnhancedOptions,
    ExtendedIdentifier, LinkLengths, Options, TransmitterTechnology,
};

/// Decoded SFF-8636 image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sff8636Eeprom {
    pub lower_page: LowerPage,
    pub upper_page: UpperPage,
    /// Page 03h, absent when the image stops before it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ModuleThresholds>,
    pub checksums: Vec<ChecksumReport>,
    #[serde(skip)]
    raw: Vec<u8>,
}

impl Sff8636Eeprom {
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn is_optical(&self) -> bool {
        self.upper_page.is_optical()
    }

    /// Recompute CC_BASE and CC_EXT of upper page 00h.
    pub fn verify_checksums(&self) -> Vec<ChecksumReport> {
        [layout::BASE_CHECKSUM, layout::EXTENDED_CHECKSUM]
            .iter()
            .filter_map(|span| checksum::verify(&self.raw, span))
            .collect()
    }
}

pub fn parse_sff8636(raw: &[u8], options: &DecodeOptions) -> Result<Sff8636Eeprom, DecodeError> {
    let reader = EepromReader::new(raw);
    reader.require_len(layout::MIN_LEN)?;
    debug!(len = raw.len(), "decoding SFF-8636 image");

    let checksums = checksum::verify_all(
        raw,
        &[layout::BASE_CHECKSUM, layout::EXTENDED_CHECKSUM],
        options.checksum_policy,
    )?;
    let lower_page = parser::parse_lower_page(&reader)?;
    let upper_page = parser::parse_upper_page(&reader)?;
    if upper_page.identifier != lower_page.identifier {
        warn!(
            lower = %lower_page.identifier,
            upper = %upper_page.identifier,
            "upper page identifier differs from lower page"
        );
    }

    let thresholds = if reader.covers(layout::THRESHOLDS_PAGE_LEN) {
        Some(parser::parse_thresholds(&reader)?)
    } else {
        debug!(len = raw.len(), "page 03h absent, thresholds unavailable");
        None
    };

    Ok(Sff8636Eeprom {
        lower_page,
        upper_page,
        thresholds,
        checksums,
        raw: raw.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::{ChecksumRegion, checksum};
    use crate::options::ChecksumPolicy;

    fn image(len: usize) -> Vec<u8> {
        let mut raw = vec![0u8; len];
        raw[layout::IDENTIFIER_OFFSET] = 0x11;
        raw[layout::UPPER_IDENTIFIER_OFFSET] = 0x11;
        raw[layout::VENDOR_NAME_RANGE][..4].copy_from_slice(b"ACME");
        seal(&mut raw);
        raw
    }

    fn seal(raw: &mut [u8]) {
        raw[0xBF] = checksum(&raw[0x80..0xBF]);
        raw[0xDF] = checksum(&raw[0xC0..0xDF]);
    }

    #[test]
    fn rejects_short_image() {
        let err = parse_sff8636(&[0u8; 256], &DecodeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                needed: 512,
                actual: 256
            }
        );
    }

    #[test]
    fn thresholds_only_with_page_three() {
        let eeprom = parse_sff8636(&image(layout::MIN_LEN), &DecodeOptions::default()).unwrap();
        assert!(eeprom.thresholds.is_none());
        assert_eq!(eeprom.upper_page.vendor_name, "ACME");

        let mut raw = image(layout::THRESHOLDS_PAGE_LEN);
        raw[layout::TEMPERATURE_THRESHOLDS_OFFSET] = 0x50;
        let eeprom = parse_sff8636(&raw, &DecodeOptions::default()).unwrap();
        let thresholds = eeprom.thresholds.unwrap();
        assert_eq!(thresholds.temperature.high_alarm, 80.0);
    }

    #[test]
    fn base_mismatch_tolerated_by_default() {
        let mut raw = image(layout::MIN_LEN);
        raw[layout::VENDOR_PN_RANGE.start] = b'X';
        let eeprom = parse_sff8636(&raw, &DecodeOptions::default()).unwrap();
        assert!(!eeprom.checksums[0].valid);
        assert_eq!(eeprom.verify_checksums(), eeprom.checksums);

        let strict = DecodeOptions {
            checksum_policy: ChecksumPolicy::Strict,
            ..DecodeOptions::default()
        };
        let err = parse_sff8636(&raw, &strict).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ChecksumMismatch {
                region: ChecksumRegion::Base,
                ..
            }
        ));
    }

    #[test]
    fn record_serializes_pages_separately() {
        let eeprom = parse_sff8636(&image(layout::MIN_LEN), &DecodeOptions::default()).unwrap();
        let value = serde_json::to_value(&eeprom).unwrap();
        assert_eq!(value["lower_page"]["identifier"]["ascii"], "QSFP28");
        assert_eq!(value["upper_page"]["vendor_name"], "ACME");
        assert!(value.get("thresholds").is_none());
        assert!(value.get("raw").is_none());
    }
}
