use std::ops::Range;

use crate::checksum::{ChecksumRegion, ChecksumSpan};

/// Serial ID page A0h; the dump length the kernel reports for SFF-8079.
pub const MIN_LEN: usize = 256;

pub const IDENTIFIER_OFFSET: usize = 0x00;
pub const EXTENDED_IDENTIFIER_OFFSET: usize = 0x01;
pub const CONNECTOR_OFFSET: usize = 0x02;
pub const TRANSCEIVER_COMPLIANCE_RANGE: Range<usize> = 0x03..0x0B;
pub const ENCODING_OFFSET: usize = 0x0B;
pub const SIGNALING_RATE_OFFSET: usize = 0x0C;
pub const RATE_IDENTIFIER_OFFSET: usize = 0x0D;
pub const LENGTH_SMF_KM_OFFSET: usize = 0x0E;
pub const LENGTH_SMF_100M_OFFSET: usize = 0x0F;
pub const LENGTH_OM2_OFFSET: usize = 0x10;
pub const LENGTH_OM1_OFFSET: usize = 0x11;
/// OM4 in units of 10 m, or copper/DAC length in metres.
pub const LENGTH_OM4_OR_COPPER_OFFSET: usize = 0x12;
pub const LENGTH_OM3_OFFSET: usize = 0x13;
pub const VENDOR_NAME_RANGE: Range<usize> = 0x14..0x24;
pub const EXTENDED_COMPLIANCE_OFFSET: usize = 0x24;
/// Read one byte early, overlapping the last vendor name byte. Kept at 0x23
/// so dumps decode to the OUI earlier releases reported; SFF-8472 Table 4-1
/// places the field at 0x25..0x28.
pub const VENDOR_OUI_RANGE: Range<usize> = 0x23..0x26;
pub const VENDOR_PN_RANGE: Range<usize> = 0x28..0x38;
pub const VENDOR_REV_RANGE: Range<usize> = 0x38..0x3C;
/// Laser wavelength, or cable specification compliance for cables.
pub const WAVELENGTH_RANGE: Range<usize> = 0x3C..0x3E;
pub const OPTIONS_RANGE: Range<usize> = 0x40..0x42;
pub const UPPER_BITRATE_MARGIN_OFFSET: usize = 0x42;
pub const LOWER_BITRATE_MARGIN_OFFSET: usize = 0x43;
pub const VENDOR_SN_RANGE: Range<usize> = 0x44..0x54;
pub const DATE_CODE_RANGE: Range<usize> = 0x54..0x5C;

pub const SIGNALING_RATE_EXTENDED: u8 = 0xFF;
pub const SIGNALING_RATE_UNIT_BAUD: f64 = 100e6;

pub const BASE_CHECKSUM: ChecksumSpan = ChecksumSpan {
    region: ChecksumRegion::Base,
    covered: 0x00..0x3F,
    stored_at: 0x3F,
};

pub const EXTENDED_CHECKSUM: ChecksumSpan = ChecksumSpan {
    region: ChecksumRegion::Extended,
    covered: 0x40..0x5F,
    stored_at: 0x5F,
};
