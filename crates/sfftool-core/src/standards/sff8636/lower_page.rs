//! Lower page status, monitors and free-side device properties.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::bitfield::BitField;
use crate::units::Power;
use crate::vocab::serialize_code;

/// Revision of SFF-8636 the module claims (byte 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionCompliance(pub u8);

impl RevisionCompliance {
    pub fn name(self) -> &'static str {
        match self.0 {
            0x00 => "Revision not specified, might be anything < SFF-8636 Rev 2.5",
            0x01 => "SFF-8436 Rev 4.8 or earlier",
            0x02 => "Includes functionality described in revision 4.8 or earlier of SFF-8436, except that this byte and Bytes 186-189 are as defined in this document",
            0x03 => "SFF-8636 Rev 1.3 or earlier",
            0x04 => "SFF-8636 Rev 1.4",
            0x05 => "SFF-8636 Rev 1.5",
            0x06 => "SFF-8636 Rev 2.0",
            0x07 => "SFF-8636 Rev 2.5, 2.6 and 2.7",
            0x08 => "SFF-8636 Rev 2.8, 2.9 and 2.10",
            _ => "Reserved",
        }
    }
}

impl fmt::Display for RevisionCompliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for RevisionCompliance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

/// Status byte 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusIndicator {
    /// Only the lower page and upper page 00h exist.
    pub flat_memory: bool,
    /// IntL pin level; `true` means not asserted.
    pub intl: bool,
    pub data_not_ready: bool,
}

pub const STATUS_INDICATOR: &[BitField<StatusIndicator>] = &[
    BitField { byte: 0, bit: 2, set: |s, v| s.flat_memory = v },
    BitField { byte: 0, bit: 1, set: |s, v| s.intl = v },
    BitField { byte: 0, bit: 0, set: |s, v| s.data_not_ready = v },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusIndicators {
    pub revision_compliance: RevisionCompliance,
    pub status: StatusIndicator,
}

/// Module-level readings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FreeSideMonitors {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Volts.
    pub voltage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ChannelMonitor {
    pub rx_power: Power,
    /// Milliamperes.
    pub bias: f64,
    pub tx_power: Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvancedLowPowerMode(pub u8);

impl AdvancedLowPowerMode {
    pub fn name(self) -> &'static str {
        match self.0 {
            0b0000 => "1.5 W or higher",
            0b0001 => "no more than 1 W",
            0b0010 => "no more than 0.75 W",
            0b0011 => "no more than 0.5 W",
            _ => "Reserved",
        }
    }
}

impl Serialize for AdvancedLowPowerMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarEndImplementation(pub u8);

impl FarEndImplementation {
    pub fn name(self) -> &'static str {
        match self.0 {
            0b000 => "Far end is unspecified",
            0b001 => "Cable with single far-end with 4 channels implemented, or separable module with a 4-channel connector",
            0b010 => "Cable with single far-end with 2 channels implemented, or separable module with a 2-channel connector",
            0b011 => "Cable with single far-end with 1 channel implemented, or separable module with a 1-channel connector",
            0b100 => "4 far-ends with 1 channel implemented in each (i.e. 4x1 break out)",
            0b101 => "2 far-ends with 2 channels implemented in each (i.e. 2x2 break out)",
            0b110 => "2 far-ends with 1 channel implemented in each (i.e. 2x1 break out)",
            _ => "Reserved",
        }
    }
}

impl Serialize for FarEndImplementation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

/// Bytes 107..=113.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreeSideDeviceProperties {
    pub max_power_consumption_watts: f64,
    /// Propagation delay in nanoseconds.
    pub propagation_delay_ns: f64,
    pub advanced_low_power_mode: AdvancedLowPowerMode,
    pub far_side_managed: bool,
    /// Minimum operating voltage in volts; absent for reserved codes.
    pub min_operating_voltage: Option<f64>,
    pub far_end_implementation: FarEndImplementation,
    /// Near end implementation bits 0..=3, one per channel.
    pub near_end_channel_bits: [bool; 4],
}

pub fn min_operating_voltage(code: u8) -> Option<f64> {
    match code {
        0b000 => Some(3.3),
        0b001 => Some(2.5),
        0b010 => Some(1.8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::decode_fields;

    #[test]
    fn status_bits() {
        let status: StatusIndicator = decode_fields(&[0b0000_0110], STATUS_INDICATOR);
        assert!(status.flat_memory);
        assert!(status.intl);
        assert!(!status.data_not_ready);
    }

    #[test]
    fn revision_and_property_names() {
        assert_eq!(RevisionCompliance(0x07).name(), "SFF-8636 Rev 2.5, 2.6 and 2.7");
        assert_eq!(RevisionCompliance(0x42).name(), "Reserved");
        assert_eq!(AdvancedLowPowerMode(1).name(), "no more than 1 W");
        assert!(FarEndImplementation(0b011).name().contains("1 channel"));
        assert_eq!(min_operating_voltage(0b010), Some(1.8));
        assert_eq!(min_operating_voltage(0b111), None);
    }
}
