//! Offsets into the concatenated A0h + A2h dump. Page A2h starts at 0x100.

use std::ops::Range;

use crate::checksum::{ChecksumRegion, ChecksumSpan};

pub const MIN_LEN: usize = 256;
/// Length at which page A2h is present.
pub const DIAGNOSTIC_PAGE_LEN: usize = 512;

// Page A0h, beyond the SFF-8079 serial ID.
pub const DIAGNOSTIC_MONITORING_TYPE_OFFSET: usize = 0x5C;
pub const ENHANCED_OPTIONS_OFFSET: usize = 0x5D;
pub const COMPLIANCE_REVISION_OFFSET: usize = 0x5E;

// Page A2h.
pub const TEMPERATURE_THRESHOLDS_OFFSET: usize = 0x100;
pub const VOLTAGE_THRESHOLDS_OFFSET: usize = 0x108;
pub const BIAS_THRESHOLDS_OFFSET: usize = 0x110;
pub const TX_POWER_THRESHOLDS_OFFSET: usize = 0x118;
pub const RX_POWER_THRESHOLDS_OFFSET: usize = 0x120;
pub const LASER_TEMPERATURE_THRESHOLDS_OFFSET: usize = 0x128;
pub const TEC_CURRENT_THRESHOLDS_OFFSET: usize = 0x130;

/// Rx_PWR(4) first, Rx_PWR(0) last; four bytes each.
pub const RX_POWER_COEFFICIENTS_RANGE: Range<usize> = 0x138..0x14C;
pub const BIAS_SLOPE_RANGE: Range<usize> = 0x14C..0x14E;
pub const BIAS_OFFSET_RANGE: Range<usize> = 0x14E..0x150;
pub const TX_POWER_SLOPE_RANGE: Range<usize> = 0x150..0x152;
pub const TX_POWER_OFFSET_RANGE: Range<usize> = 0x152..0x154;
pub const TEMPERATURE_SLOPE_RANGE: Range<usize> = 0x154..0x156;
pub const TEMPERATURE_OFFSET_RANGE: Range<usize> = 0x156..0x158;
pub const VOLTAGE_SLOPE_RANGE: Range<usize> = 0x158..0x15A;
pub const VOLTAGE_OFFSET_RANGE: Range<usize> = 0x15A..0x15C;

pub const TEMPERATURE_RANGE: Range<usize> = 0x160..0x162;
pub const VOLTAGE_RANGE: Range<usize> = 0x162..0x164;
pub const BIAS_RANGE: Range<usize> = 0x164..0x166;
pub const TX_POWER_RANGE: Range<usize> = 0x166..0x168;
pub const RX_POWER_RANGE: Range<usize> = 0x168..0x16A;
pub const LASER_TEMPERATURE_RANGE: Range<usize> = 0x16A..0x16C;
pub const TEC_CURRENT_RANGE: Range<usize> = 0x16C..0x16E;

pub const STATUS_CONTROL_OFFSET: usize = 0x16E;
pub const ALARM_FLAGS_RANGE: Range<usize> = 0x170..0x172;
/// Listed as unallocated in Table 4-2 but defined as input equalization
/// control by Table 9-12. Decoded per Table 9-12.
pub const INPUT_EQUALIZATION_OFFSET: usize = 0x172;
/// Table 4-2 assigns CDR unlock status here while Table 9-12 defines output
/// emphasis control. Decoded per Table 9-12; CDR unlock is read from the
/// extended status bytes instead.
pub const OUTPUT_EMPHASIS_OFFSET: usize = 0x173;
pub const WARNING_FLAGS_RANGE: Range<usize> = 0x174..0x176;
pub const EXTENDED_STATUS_CONTROL_RANGE: Range<usize> = 0x176..0x178;
pub const USER_EEPROM_RANGE: Range<usize> = 0x180..0x1F8;

pub const DIAGNOSTICS_CHECKSUM: ChecksumSpan = ChecksumSpan {
    region: ChecksumRegion::Diagnostics,
    covered: 0x100..0x15F,
    stored_at: 0x15F,
};
