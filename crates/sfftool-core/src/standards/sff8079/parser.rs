use serde::Serialize;

use super::compliance::{
    ACTIVE_CABLE_SPECIFICATION, CableSpecification, ComplianceCode, PASSIVE_CABLE_SPECIFICATION,
    TRANSCEIVER_COMPLIANCE,
};
use super::layout;
use super::options::{OPTIONS, Options};
use crate::bitfield::{FlagSet, decode_fields, decode_flags};
use crate::error::DecodeError;
use crate::standards::common::{DateCode, EepromReader};
use crate::vocab::{
    ConnectorType, Encoding, EncodingTable, ExtendedIdentifier, ExtendedSpecificationCompliance,
    Identifier, Oui, RateIdentifier,
};

/// Supported reach per medium, in the units the field names carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkLengths {
    pub smf_km: f64,
    pub smf_m: f64,
    pub om1_m: f64,
    pub om2_m: f64,
    pub om3_m: f64,
    /// Absent for cable assemblies, where the byte holds `copper_m`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub om4_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copper_m: Option<f64>,
}

/// Serial ID fields of page A0h (bytes 0..=95).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerialId {
    pub identifier: Identifier,
    pub extended_identifier: ExtendedIdentifier,
    pub connector: ConnectorType,
    pub transceiver_compliance: FlagSet<ComplianceCode>,
    pub encoding: Encoding,
    /// Nominal signaling rate in baud.
    pub signaling_rate: f64,
    pub rate_identifier: RateIdentifier,
    pub link_lengths: LinkLengths,
    pub vendor_name: String,
    pub extended_compliance: ExtendedSpecificationCompliance,
    pub vendor_oui: Oui,
    pub vendor_pn: String,
    pub vendor_rev: String,
    /// Laser wavelength in nm; absent for cable assemblies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength_nm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passive_cable_specification: Option<FlagSet<CableSpecification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_cable_specification: Option<FlagSet<CableSpecification>>,
    pub options: Options,
    /// Upper bit rate margin in percent.
    pub upper_bitrate_margin: u8,
    /// Lower bit rate margin in percent.
    pub lower_bitrate_margin: u8,
    pub vendor_sn: String,
    pub date_code: DateCode,
}

impl SerialId {
    /// Active or passive cable assembly rather than an optical transceiver.
    pub fn is_cable(&self) -> bool {
        self.transceiver_compliance.contains(ComplianceCode::ActiveCable)
            || self.transceiver_compliance.contains(ComplianceCode::PassiveCable)
    }
}

pub fn parse_serial_id(reader: &EepromReader<'_>) -> Result<SerialId, DecodeError> {
    reader.require_len(layout::DATE_CODE_RANGE.end)?;

    let compliance_bytes = reader.read_slice(layout::TRANSCEIVER_COMPLIANCE_RANGE)?;
    let transceiver_compliance = decode_flags(compliance_bytes, TRANSCEIVER_COMPLIANCE);
    let cable_active = transceiver_compliance.contains(ComplianceCode::ActiveCable);
    let cable_passive = transceiver_compliance.contains(ComplianceCode::PassiveCable);
    let cable = cable_active || cable_passive;

    let om4_or_copper = f64::from(reader.read_u8(layout::LENGTH_OM4_OR_COPPER_OFFSET)?);
    let link_lengths = LinkLengths {
        smf_km: f64::from(reader.read_u8(layout::LENGTH_SMF_KM_OFFSET)?),
        smf_m: f64::from(reader.read_u8(layout::LENGTH_SMF_100M_OFFSET)?) * 100.0,
        om2_m: f64::from(reader.read_u8(layout::LENGTH_OM2_OFFSET)?) * 10.0,
        om1_m: f64::from(reader.read_u8(layout::LENGTH_OM1_OFFSET)?) * 10.0,
        om3_m: f64::from(reader.read_u8(layout::LENGTH_OM3_OFFSET)?) * 10.0,
        om4_m: (!cable).then_some(om4_or_copper * 10.0),
        copper_m: cable.then_some(om4_or_copper),
    };

    let wavelength_bytes = reader.read_slice(layout::WAVELENGTH_RANGE)?;
    let wavelength_nm = if cable {
        None
    } else {
        Some(f64::from(reader.read_u16_be(layout::WAVELENGTH_RANGE)?))
    };
    let passive_cable_specification =
        cable_passive.then(|| decode_flags(wavelength_bytes, PASSIVE_CABLE_SPECIFICATION));
    let active_cable_specification =
        cable_active.then(|| decode_flags(wavelength_bytes, ACTIVE_CABLE_SPECIFICATION));

    let upper_bitrate_margin = reader.read_u8(layout::UPPER_BITRATE_MARGIN_OFFSET)?;
    let lower_bitrate_margin = reader.read_u8(layout::LOWER_BITRATE_MARGIN_OFFSET)?;
    let nominal_rate = reader.read_u8(layout::SIGNALING_RATE_OFFSET)?;
    let signaling_rate = if nominal_rate == layout::SIGNALING_RATE_EXTENDED {
        let extended = u16::from_be_bytes([upper_bitrate_margin, lower_bitrate_margin]);
        f64::from(extended) * layout::SIGNALING_RATE_UNIT_BAUD
    } else {
        f64::from(nominal_rate) * layout::SIGNALING_RATE_UNIT_BAUD
    };

    let vendor_name = reader.read_vendor_name(layout::VENDOR_NAME_RANGE)?;

    Ok(SerialId {
        identifier: Identifier(reader.read_u8(layout::IDENTIFIER_OFFSET)?),
        extended_identifier: ExtendedIdentifier(reader.read_u8(layout::EXTENDED_IDENTIFIER_OFFSET)?),
        connector: ConnectorType(reader.read_u8(layout::CONNECTOR_OFFSET)?),
        transceiver_compliance,
        encoding: Encoding::new(
            reader.read_u8(layout::ENCODING_OFFSET)?,
            EncodingTable::Sff8472,
        ),
        signaling_rate,
        rate_identifier: RateIdentifier(reader.read_u8(layout::RATE_IDENTIFIER_OFFSET)?),
        link_lengths,
        vendor_name,
        extended_compliance: ExtendedSpecificationCompliance(
            reader.read_u8(layout::EXTENDED_COMPLIANCE_OFFSET)?,
        ),
        vendor_oui: Oui(reader.read_array(layout::VENDOR_OUI_RANGE)?),
        vendor_pn: reader.read_string(layout::VENDOR_PN_RANGE)?,
        vendor_rev: reader.read_string(layout::VENDOR_REV_RANGE)?,
        wavelength_nm,
        passive_cable_specification,
        active_cable_specification,
        options: decode_fields(reader.read_slice(layout::OPTIONS_RANGE)?, OPTIONS),
        upper_bitrate_margin,
        lower_bitrate_margin,
        vendor_sn: reader.read_string(layout::VENDOR_SN_RANGE)?,
        date_code: DateCode::parse(reader.read_slice(layout::DATE_CODE_RANGE)?),
    })
}

#[cfg(test)]
mod tests {
    use super::parse_serial_id;
    use crate::standards::common::EepromReader;
    use crate::standards::sff8079::layout;

    fn image() -> Vec<u8> {
        let mut raw = vec![0u8; layout::MIN_LEN];
        raw[layout::IDENTIFIER_OFFSET] = 0x03;
        raw[layout::SIGNALING_RATE_OFFSET] = 103;
        raw[layout::LENGTH_OM4_OR_COPPER_OFFSET] = 5;
        raw[layout::VENDOR_NAME_RANGE].copy_from_slice(b"ACME            ");
        raw[layout::WAVELENGTH_RANGE].copy_from_slice(&1310u16.to_be_bytes());
        raw
    }

    #[test]
    fn optical_module_keeps_wavelength() {
        let raw = image();
        let id = parse_serial_id(&EepromReader::new(&raw)).unwrap();
        assert!(!id.is_cable());
        assert_eq!(id.wavelength_nm, Some(1310.0));
        assert_eq!(id.link_lengths.om4_m, Some(50.0));
        assert_eq!(id.link_lengths.copper_m, None);
        assert!(id.passive_cable_specification.is_none());
        assert!(id.active_cable_specification.is_none());
        assert_eq!(id.signaling_rate, 10.3e9);
        assert_eq!(id.vendor_name, "ACME");
    }

    #[test]
    fn passive_cable_drops_wavelength() {
        let mut raw = image();
        raw[layout::TRANSCEIVER_COMPLIANCE_RANGE.start + 5] = 0b0000_0100;
        raw[layout::WAVELENGTH_RANGE.start] = 0b0000_0001;
        let id = parse_serial_id(&EepromReader::new(&raw)).unwrap();
        assert!(id.is_cable());
        assert_eq!(id.wavelength_nm, None);
        assert_eq!(id.link_lengths.copper_m, Some(5.0));
        assert_eq!(id.link_lengths.om4_m, None);
        let passive = id.passive_cable_specification.unwrap();
        assert_eq!(passive.names(), vec!["Compliant to SFF-8431 Appendix E"]);
        assert!(id.active_cable_specification.is_none());
    }

    #[test]
    fn extended_signaling_rate_uses_margin_bytes() {
        let mut raw = image();
        raw[layout::SIGNALING_RATE_OFFSET] = 0xFF;
        raw[layout::UPPER_BITRATE_MARGIN_OFFSET] = 0x01;
        raw[layout::LOWER_BITRATE_MARGIN_OFFSET] = 0x00;
        let id = parse_serial_id(&EepromReader::new(&raw)).unwrap();
        assert_eq!(id.signaling_rate, 256.0 * 100e6);
    }

    #[test]
    fn short_image_is_rejected() {
        let raw = vec![0u8; 40];
        let err = parse_serial_id(&EepromReader::new(&raw)).unwrap_err();
        assert!(err.to_string().contains("buffer too short"));
    }
}
