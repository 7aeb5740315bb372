use std::fmt;

use serde::{Serialize, Serializer};

use crate::bitfield::BitField;
use crate::standards::common::RxPowerMeasurement;

/// Diagnostic monitoring type (A0h byte 92).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiagnosticMonitoringType {
    pub ddm_implemented: bool,
    pub internally_calibrated: bool,
    pub externally_calibrated: bool,
    pub rx_power_measurement: RxPowerMeasurement,
}

pub const DIAGNOSTIC_MONITORING_TYPE: &[BitField<DiagnosticMonitoringType>] = &[
    BitField { byte: 0, bit: 6, set: |d, v| d.ddm_implemented = v },
    BitField { byte: 0, bit: 5, set: |d, v| d.internally_calibrated = v },
    BitField { byte: 0, bit: 4, set: |d, v| d.externally_calibrated = v },
    BitField {
        byte: 0,
        bit: 3,
        set: |d, v| d.rx_power_measurement = RxPowerMeasurement::from_average_bit(v),
    },
];

/// Optional enhanced features (A0h byte 93).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EnhancedOptions {
    pub alarm_warning_flags: bool,
    pub soft_tx_disable: bool,
    pub soft_tx_fault: bool,
    pub soft_rx_los: bool,
    pub soft_rate_select: bool,
    pub application_select_sff8079: bool,
    pub soft_rate_select_sff8431: bool,
}

pub const ENHANCED_OPTIONS: &[BitField<EnhancedOptions>] = &[
    BitField { byte: 0, bit: 7, set: |e, v| e.alarm_warning_flags = v },
    BitField { byte: 0, bit: 6, set: |e, v| e.soft_tx_disable = v },
    BitField { byte: 0, bit: 5, set: |e, v| e.soft_tx_fault = v },
    BitField { byte: 0, bit: 4, set: |e, v| e.soft_rx_los = v },
    BitField { byte: 0, bit: 3, set: |e, v| e.soft_rate_select = v },
    BitField { byte: 0, bit: 2, set: |e, v| e.application_select_sff8079 = v },
    BitField { byte: 0, bit: 1, set: |e, v| e.soft_rate_select_sff8431 = v },
];

/// SFF-8472 revision the module claims (A0h byte 94).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceRevision(pub u8);

impl ComplianceRevision {
    pub fn name(self) -> &'static str {
        match self.0 {
            0x00 => "not included or undefined",
            0x01 => "9.3",
            0x02 => "9.5",
            0x03 => "10.2",
            0x04 => "10.4",
            0x05 => "11.0",
            0x06 => "11.3",
            0x07 => "11.4",
            0x08 => "12.3",
            _ => "unallocated",
        }
    }
}

impl fmt::Display for ComplianceRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ComplianceRevision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::vocab::serialize_code(self.0, self.name(), serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::decode_fields;

    #[test]
    fn monitoring_type_bits() {
        let dmt: DiagnosticMonitoringType = decode_fields(&[0x68], DIAGNOSTIC_MONITORING_TYPE);
        assert!(dmt.ddm_implemented);
        assert!(dmt.internally_calibrated);
        assert!(!dmt.externally_calibrated);
        assert_eq!(dmt.rx_power_measurement, RxPowerMeasurement::AveragePower);
    }

    #[test]
    fn enhanced_options_bits() {
        let options: EnhancedOptions = decode_fields(&[0b1000_0010], ENHANCED_OPTIONS);
        assert!(options.alarm_warning_flags);
        assert!(options.soft_rate_select_sff8431);
        assert!(!options.soft_tx_fault);
    }

    #[test]
    fn compliance_revision_names() {
        assert_eq!(ComplianceRevision(0x08).name(), "12.3");
        assert_eq!(ComplianceRevision(0x09).name(), "unallocated");
    }
}
