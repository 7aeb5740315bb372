//! Offsets into the concatenated lower page, upper page 00h and optional
//! upper page 03h. Page 03h starts at 0x200.

use std::ops::Range;

use crate::checksum::{ChecksumRegion, ChecksumSpan};

pub const MIN_LEN: usize = 512;
/// Length at which the page 03h thresholds are present.
pub const THRESHOLDS_PAGE_LEN: usize = 0x248;

// Lower page.
pub const IDENTIFIER_OFFSET: usize = 0x00;
pub const REVISION_COMPLIANCE_OFFSET: usize = 0x01;
pub const STATUS_OFFSET: usize = 0x02;

/// Channel LOS, fault and LOL flags (bytes 3..=5).
pub const CHANNEL_STATUS_FLAGS_RANGE: Range<usize> = 0x03..0x06;
pub const TEMPERATURE_FLAGS_OFFSET: usize = 0x06;
pub const VOLTAGE_FLAGS_OFFSET: usize = 0x07;
pub const RX_POWER_FLAGS_RANGE: Range<usize> = 0x09..0x0B;
pub const BIAS_FLAGS_RANGE: Range<usize> = 0x0B..0x0D;
pub const TX_POWER_FLAGS_RANGE: Range<usize> = 0x0D..0x0F;

pub const TEMPERATURE_RANGE: Range<usize> = 0x16..0x18;
pub const VOLTAGE_RANGE: Range<usize> = 0x1A..0x1C;

/// Two bytes per channel, channel 1 first.
pub const CHANNEL_RX_POWER_OFFSET: usize = 0x22;
pub const CHANNEL_BIAS_OFFSET: usize = 0x2A;
pub const CHANNEL_TX_POWER_OFFSET: usize = 0x32;
pub const CHANNEL_COUNT: usize = 4;

pub const CONTROL_RANGE: Range<usize> = 0x56..0x64;

pub const CHANNEL_STATUS_MASKS_RANGE: Range<usize> = 0x64..0x67;
pub const TEMPERATURE_MASKS_OFFSET: usize = 0x67;
pub const VOLTAGE_MASKS_OFFSET: usize = 0x68;

pub const MAX_POWER_CONSUMPTION_OFFSET: usize = 0x6B;
pub const PROPAGATION_DELAY_RANGE: Range<usize> = 0x6C..0x6E;
pub const LOW_POWER_AND_VOLTAGE_OFFSET: usize = 0x6E;
pub const FAR_NEAR_END_OFFSET: usize = 0x71;

// Upper page 00h.
pub const UPPER_IDENTIFIER_OFFSET: usize = 0x80;
pub const EXTENDED_IDENTIFIER_OFFSET: usize = 0x81;
pub const CONNECTOR_OFFSET: usize = 0x82;
pub const SPECIFICATION_COMPLIANCE_RANGE: Range<usize> = 0x83..0x8B;
pub const ENCODING_OFFSET: usize = 0x8B;
pub const SIGNALING_RATE_OFFSET: usize = 0x8C;
pub const EXTENDED_RATE_SELECT_OFFSET: usize = 0x8D;
pub const LENGTH_SMF_KM_OFFSET: usize = 0x8E;
pub const LENGTH_OM3_OFFSET: usize = 0x8F;
pub const LENGTH_OM2_OFFSET: usize = 0x90;
/// OM1 in metres, or copper attenuation at 25.78 GHz.
pub const LENGTH_OM1_OFFSET: usize = 0x91;
/// OM4 in units of 2 m, or cable assembly length in metres.
pub const LENGTH_OM4_OR_COPPER_OFFSET: usize = 0x92;
pub const DEVICE_TECHNOLOGY_OFFSET: usize = 0x93;
pub const VENDOR_NAME_RANGE: Range<usize> = 0x94..0xA4;
pub const EXTENDED_MODULE_CODES_OFFSET: usize = 0xA4;
pub const VENDOR_OUI_RANGE: Range<usize> = 0xA5..0xA8;
pub const VENDOR_PN_RANGE: Range<usize> = 0xA8..0xB8;
pub const VENDOR_REV_RANGE: Range<usize> = 0xB8..0xBA;
/// Wavelength / 20 nm, or copper attenuation at 2.5 and 5.0 GHz.
pub const WAVELENGTH_RANGE: Range<usize> = 0xBA..0xBC;
/// Tolerance / 200 nm, or copper attenuation at 7.0 and 12.9 GHz.
pub const WAVELENGTH_TOLERANCE_RANGE: Range<usize> = 0xBC..0xBE;
pub const MAX_CASE_TEMPERATURE_OFFSET: usize = 0xBE;
pub const EXTENDED_COMPLIANCE_OFFSET: usize = 0xC0;
pub const OPTIONS_RANGE: Range<usize> = 0xC1..0xC4;
pub const VENDOR_SN_RANGE: Range<usize> = 0xC4..0xD4;
pub const DATE_CODE_RANGE: Range<usize> = 0xD4..0xDC;
pub const DIAGNOSTIC_MONITORING_TYPE_OFFSET: usize = 0xDC;
pub const ENHANCED_OPTIONS_OFFSET: usize = 0xDD;
pub const SIGNALING_RATE_EXTENDED_OFFSET: usize = 0xDE;

pub const SIGNALING_RATE_EXTENDED: u8 = 0xFF;
pub const SIGNALING_RATE_UNIT_BAUD: f64 = 100e6;
pub const SIGNALING_RATE_EXTENDED_UNIT_BAUD: f64 = 250e6;

// Upper page 03h.
pub const TEMPERATURE_THRESHOLDS_OFFSET: usize = 0x200;
pub const VOLTAGE_THRESHOLDS_OFFSET: usize = 0x210;
pub const RX_POWER_THRESHOLDS_OFFSET: usize = 0x230;
pub const BIAS_THRESHOLDS_OFFSET: usize = 0x238;
pub const TX_POWER_THRESHOLDS_OFFSET: usize = 0x240;

pub const BASE_CHECKSUM: ChecksumSpan = ChecksumSpan {
    region: ChecksumRegion::Base,
    covered: 0x80..0xBF,
    stored_at: 0xBF,
};

pub const EXTENDED_CHECKSUM: ChecksumSpan = ChecksumSpan {
    region: ChecksumRegion::Extended,
    covered: 0xC0..0xDF,
    stored_at: 0xDF,
};
