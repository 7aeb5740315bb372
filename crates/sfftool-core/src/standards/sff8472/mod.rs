//! SFF-8472 diagnostic monitoring decoding.
//!
//! The image is page A0h (serial ID, decoded by the SFF-8079 parser plus the
//! monitoring type, enhanced options and compliance revision) optionally
//! followed by page A2h at offset 256. Page A2h carries thresholds,
//! calibration constants, live readings and status flags; it is decoded
//! only when the image is at least 512 bytes long, and its absence is not an
//! error.
//!
//! Two bytes of A2h are contradictory in the standard: byte 114 is listed as
//! unallocated yet defined as input equalization control, and byte 115 is
//! described both as CDR unlock status and as output emphasis control. Both
//! are decoded as controls (Table 9-12); see `layout`.

pub mod diagnostics;
pub mod layout;
pub mod monitoring;
pub mod parser;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::bitfield::decode_fields;
use crate::calibration::{self, CalibrationConstants};
use crate::checksum::{self, ChecksumReport};
use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::standards::common::EepromReader;
use crate::standards::sff8079::{self, SerialId};

pub use diagnostics::{
    DiagnosticThresholds, Diagnostics, ExtendedStatusControl, InputEqualization, MonitorFlags,
    OptionalDiagnostics, OptionalThresholds, OutputEmphasis, PowerLevelOperation, RateSplit,
    StatusControl,
};
pub use monitoring::{ComplianceRevision, DiagnosticMonitoringType, EnhancedOptions};

/// Decoded page A2h.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticPage {
    pub thresholds: DiagnosticThresholds,
    pub optional_thresholds: OptionalThresholds,
    /// Present only for externally calibrated modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_constants: Option<CalibrationConstants>,
    pub diagnostics: Diagnostics,
    pub optional_diagnostics: OptionalDiagnostics,
    pub status_control: StatusControl,
    pub alarm_flags: MonitorFlags,
    pub input_equalization: RateSplit<InputEqualization>,
    pub output_emphasis: RateSplit<OutputEmphasis>,
    pub warning_flags: MonitorFlags,
    pub extended_status_control: ExtendedStatusControl,
    #[serde(serialize_with = "serialize_hex")]
    pub user_eeprom: Vec<u8>,
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    let text: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    serializer.serialize_str(&text)
}

/// Decoded SFF-8472 image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sff8472Eeprom {
    #[serde(flatten)]
    pub serial_id: SerialId,
    pub diagnostic_monitoring_type: DiagnosticMonitoringType,
    pub enhanced_options: EnhancedOptions,
    pub compliance_revision: ComplianceRevision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_page: Option<DiagnosticPage>,
    /// External calibration has been applied to the page readings.
    pub calibrated: bool,
    pub checksums: Vec<ChecksumReport>,
    #[serde(skip)]
    raw: Vec<u8>,
}

impl Sff8472Eeprom {
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Monitoring implemented and page A2h present.
    pub fn supports_monitoring(&self) -> bool {
        self.diagnostic_monitoring_type.ddm_implemented && self.diagnostic_page.is_some()
    }

    /// Recompute CC_BASE, CC_EXT and, when page A2h is present, CC_DMI.
    pub fn verify_checksums(&self) -> Vec<ChecksumReport> {
        [
            sff8079::layout::BASE_CHECKSUM,
            sff8079::layout::EXTENDED_CHECKSUM,
            layout::DIAGNOSTICS_CHECKSUM,
        ]
        .iter()
        .filter_map(|span| checksum::verify(&self.raw, span))
        .collect()
    }
}

pub fn parse_sff8472(raw: &[u8], options: &DecodeOptions) -> Result<Sff8472Eeprom, DecodeError> {
    let reader = EepromReader::new(raw);
    reader.require_len(layout::MIN_LEN)?;
    debug!(len = raw.len(), "decoding SFF-8472 image");

    let mut checksums = checksum::verify_all(
        raw,
        &[
            sff8079::layout::BASE_CHECKSUM,
            sff8079::layout::EXTENDED_CHECKSUM,
        ],
        options.checksum_policy,
    )?;
    let serial_id = sff8079::parse_serial_id(&reader)?;

    let diagnostic_monitoring_type: DiagnosticMonitoringType = decode_fields(
        &[reader.read_u8(layout::DIAGNOSTIC_MONITORING_TYPE_OFFSET)?],
        monitoring::DIAGNOSTIC_MONITORING_TYPE,
    );
    let enhanced_options = decode_fields(
        &[reader.read_u8(layout::ENHANCED_OPTIONS_OFFSET)?],
        monitoring::ENHANCED_OPTIONS,
    );
    let compliance_revision =
        ComplianceRevision(reader.read_u8(layout::COMPLIANCE_REVISION_OFFSET)?);

    let mut calibrated = false;
    let diagnostic_page = if reader.covers(layout::DIAGNOSTIC_PAGE_LEN) {
        checksums.extend(checksum::verify_all(
            raw,
            &[layout::DIAGNOSTICS_CHECKSUM],
            options.checksum_policy,
        )?);
        let mut page = parser::parse_diagnostic_page(
            &reader,
            diagnostic_monitoring_type.externally_calibrated,
        )?;
        if options.apply_calibration {
            if let Some(constants) = page.calibration_constants {
                page.diagnostics = calibration::calibrate_diagnostics(&page.diagnostics, &constants);
                page.thresholds = calibration::calibrate_thresholds(&page.thresholds, &constants);
                calibrated = true;
            }
        }
        Some(page)
    } else {
        debug!(
            len = raw.len(),
            "diagnostic page A2h absent, thresholds and readings unavailable"
        );
        None
    };

    Ok(Sff8472Eeprom {
        serial_id,
        diagnostic_monitoring_type,
        enhanced_options,
        compliance_revision,
        diagnostic_page,
        calibrated,
        checksums,
        raw: raw.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::{ChecksumRegion, checksum};
    use crate::options::ChecksumPolicy;

    fn image(dmt: u8) -> Vec<u8> {
        let mut raw = vec![0u8; layout::DIAGNOSTIC_PAGE_LEN];
        raw[0] = 0x03;
        raw[layout::DIAGNOSTIC_MONITORING_TYPE_OFFSET] = dmt;
        raw[layout::TEMPERATURE_RANGE].copy_from_slice(&[0x19, 0x00]);
        raw[layout::TEMPERATURE_THRESHOLDS_OFFSET] = 0x5A;
        seal(&mut raw);
        raw
    }

    fn seal(raw: &mut [u8]) {
        raw[0x3F] = checksum(&raw[0x00..0x3F]);
        raw[0x5F] = checksum(&raw[0x40..0x5F]);
        raw[0x15F] = checksum(&raw[0x100..0x15F]);
    }

    #[test]
    fn base_page_only_has_no_diagnostics() {
        let raw = image(0x68);
        let eeprom = parse_sff8472(&raw[..256], &DecodeOptions::default()).unwrap();
        assert!(eeprom.diagnostic_page.is_none());
        assert!(!eeprom.supports_monitoring());
        assert_eq!(eeprom.checksums.len(), 2);
    }

    #[test]
    fn full_image_decodes_page() {
        let eeprom = parse_sff8472(&image(0x68), &DecodeOptions::default()).unwrap();
        assert!(eeprom.supports_monitoring());
        let page = eeprom.diagnostic_page.as_ref().unwrap();
        assert_eq!(page.diagnostics.temperature, 25.0);
        assert_eq!(page.thresholds.temperature.high_alarm, 90.0);
        assert!(!eeprom.calibrated);
        assert_eq!(eeprom.verify_checksums(), eeprom.checksums);
    }

    #[test]
    fn corrupt_diagnostic_page_is_rejected() {
        let mut raw = image(0x68);
        raw[layout::TEMPERATURE_THRESHOLDS_OFFSET + 1] ^= 0x01;
        let err = parse_sff8472(&raw, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ChecksumMismatch {
                region: ChecksumRegion::Diagnostics,
                ..
            }
        ));
    }

    #[test]
    fn ignore_policy_keeps_corrupt_page() {
        let mut raw = image(0x68);
        raw[layout::TEMPERATURE_THRESHOLDS_OFFSET + 1] ^= 0x01;
        let options = DecodeOptions {
            checksum_policy: ChecksumPolicy::Ignore,
            ..DecodeOptions::default()
        };
        let eeprom = parse_sff8472(&raw, &options).unwrap();
        assert!(eeprom.diagnostic_page.is_some());
        assert!(!eeprom.checksums[2].valid);
    }

    #[test]
    fn external_calibration_applied_once() {
        // DDM + externally calibrated.
        let mut raw = image(0x50);
        raw[layout::TEMPERATURE_SLOPE_RANGE].copy_from_slice(&[0x02, 0x00]);
        raw[layout::TEMPERATURE_OFFSET_RANGE].copy_from_slice(&256i16.to_be_bytes());
        raw[layout::VOLTAGE_SLOPE_RANGE].copy_from_slice(&[0x01, 0x00]);
        raw[layout::BIAS_SLOPE_RANGE].copy_from_slice(&[0x01, 0x00]);
        raw[layout::TX_POWER_SLOPE_RANGE].copy_from_slice(&[0x01, 0x00]);
        seal(&mut raw);

        let eeprom = parse_sff8472(&raw, &DecodeOptions::default()).unwrap();
        assert!(eeprom.calibrated);
        let page = eeprom.diagnostic_page.as_ref().unwrap();
        assert_eq!(page.diagnostics.temperature, 51.0);
        assert_eq!(page.thresholds.temperature.high_alarm, 181.0);

        let raw_readings = DecodeOptions {
            apply_calibration: false,
            ..DecodeOptions::default()
        };
        let eeprom = parse_sff8472(&raw, &raw_readings).unwrap();
        assert!(!eeprom.calibrated);
        let page = eeprom.diagnostic_page.as_ref().unwrap();
        assert_eq!(page.diagnostics.temperature, 25.0);
    }
}
