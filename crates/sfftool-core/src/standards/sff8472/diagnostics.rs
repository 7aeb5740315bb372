//! Page A2h records.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::bitfield::BitField;
use crate::standards::common::{PowerThresholds, Thresholds};
use crate::units::Power;

/// Alarm and warning thresholds for the five mandatory monitors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DiagnosticThresholds {
    pub temperature: Thresholds<f64>,
    pub voltage: Thresholds<f64>,
    pub bias: Thresholds<f64>,
    pub tx_power: PowerThresholds,
    pub rx_power: PowerThresholds,
}

/// Thresholds for the optional laser temperature and TEC current monitors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OptionalThresholds {
    pub laser_temperature: Thresholds<f64>,
    pub tec_current: Thresholds<f64>,
}

/// Live monitor readings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Diagnostics {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Volts.
    pub voltage: f64,
    /// Milliamperes.
    pub bias: f64,
    pub tx_power: Power,
    pub rx_power: Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OptionalDiagnostics {
    pub laser_temperature: f64,
    pub tec_current: f64,
}

/// Optional status and control bits (A2h byte 110).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusControl {
    pub tx_disable_state: bool,
    pub soft_tx_disable_select: bool,
    pub rs1_state: bool,
    pub rs0_state: bool,
    pub soft_rate_select: bool,
    pub tx_fault_state: bool,
    pub rx_los_state: bool,
    pub data_ready_bar: bool,
}

pub const STATUS_CONTROL: &[BitField<StatusControl>] = &[
    BitField { byte: 0, bit: 7, set: |s, v| s.tx_disable_state = v },
    BitField { byte: 0, bit: 6, set: |s, v| s.soft_tx_disable_select = v },
    BitField { byte: 0, bit: 5, set: |s, v| s.rs1_state = v },
    BitField { byte: 0, bit: 4, set: |s, v| s.rs0_state = v },
    BitField { byte: 0, bit: 3, set: |s, v| s.soft_rate_select = v },
    BitField { byte: 0, bit: 2, set: |s, v| s.tx_fault_state = v },
    BitField { byte: 0, bit: 1, set: |s, v| s.rx_los_state = v },
    BitField { byte: 0, bit: 0, set: |s, v| s.data_ready_bar = v },
];

/// High/low flags per monitor. Alarm bytes 112..=113 and warning bytes
/// 116..=117 share this layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonitorFlags {
    pub temperature_high: bool,
    pub temperature_low: bool,
    pub voltage_high: bool,
    pub voltage_low: bool,
    pub bias_high: bool,
    pub bias_low: bool,
    pub tx_power_high: bool,
    pub tx_power_low: bool,
    pub rx_power_high: bool,
    pub rx_power_low: bool,
    pub laser_temperature_high: bool,
    pub laser_temperature_low: bool,
    pub tec_current_high: bool,
    pub tec_current_low: bool,
}

pub const MONITOR_FLAGS: &[BitField<MonitorFlags>] = &[
    BitField { byte: 0, bit: 7, set: |f, v| f.temperature_high = v },
    BitField { byte: 0, bit: 6, set: |f, v| f.temperature_low = v },
    BitField { byte: 0, bit: 5, set: |f, v| f.voltage_high = v },
    BitField { byte: 0, bit: 4, set: |f, v| f.voltage_low = v },
    BitField { byte: 0, bit: 3, set: |f, v| f.bias_high = v },
    BitField { byte: 0, bit: 2, set: |f, v| f.bias_low = v },
    BitField { byte: 0, bit: 1, set: |f, v| f.tx_power_high = v },
    BitField { byte: 0, bit: 0, set: |f, v| f.tx_power_low = v },
    BitField { byte: 1, bit: 7, set: |f, v| f.rx_power_high = v },
    BitField { byte: 1, bit: 6, set: |f, v| f.rx_power_low = v },
    BitField { byte: 1, bit: 5, set: |f, v| f.laser_temperature_high = v },
    BitField { byte: 1, bit: 4, set: |f, v| f.laser_temperature_low = v },
    BitField { byte: 1, bit: 3, set: |f, v| f.tec_current_high = v },
    BitField { byte: 1, bit: 2, set: |f, v| f.tec_current_low = v },
];

/// Input equalization setting, one nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEqualization(pub u8);

impl fmt::Display for InputEqualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("No EQ"),
            1..=10 => write!(f, "{} dB", self.0),
            _ => f.write_str("Reserved"),
        }
    }
}

/// Output emphasis setting, one nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputEmphasis(pub u8);

impl fmt::Display for OutputEmphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("No Emphasis"),
            1..=7 => write!(f, "{} dB", self.0),
            _ => f.write_str("Vendor specific"),
        }
    }
}

fn serialize_nibble<S: Serializer>(code: u8, name: &str, serializer: S) -> Result<S::Ok, S::Error> {
    crate::vocab::serialize_code(code, name, serializer)
}

impl Serialize for InputEqualization {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_nibble(self.0, &self.to_string(), serializer)
    }
}

impl Serialize for OutputEmphasis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_nibble(self.0, &self.to_string(), serializer)
    }
}

/// High nibble applies to the high rate, low nibble to the low rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateSplit<T> {
    pub high_rate: T,
    pub low_rate: T,
}

impl<T> RateSplit<T> {
    pub fn from_byte(raw: u8, wrap: fn(u8) -> T) -> Self {
        Self {
            high_rate: wrap(raw >> 4),
            low_rate: wrap(raw & 0x0F),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PowerLevelOperation {
    #[default]
    #[serde(rename = "Power Level 1 operation (1.0 Watt max)")]
    Level1,
    #[serde(rename = "Power Level 2 or 3 operation (1.5 or 2.0 Watt max)")]
    Level2Or3,
}

/// Extended module control and status (A2h bytes 118..=119).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExtendedStatusControl {
    pub soft_rs1_select: bool,
    pub power_level_operation: PowerLevelOperation,
    pub gfc64_tx_configured: bool,
    pub gfc64_rx_configured: bool,
    pub gfc64_mode: bool,
    pub tx_cdr_unlocked: bool,
    pub rx_cdr_unlocked: bool,
}

pub const EXTENDED_STATUS_CONTROL: &[BitField<ExtendedStatusControl>] = &[
    BitField { byte: 0, bit: 3, set: |e, v| e.soft_rs1_select = v },
    BitField {
        byte: 0,
        bit: 1,
        set: |e, v| {
            e.power_level_operation = if v {
                PowerLevelOperation::Level2Or3
            } else {
                PowerLevelOperation::Level1
            }
        },
    },
    BitField { byte: 1, bit: 4, set: |e, v| e.gfc64_tx_configured = v },
    BitField { byte: 1, bit: 3, set: |e, v| e.gfc64_rx_configured = v },
    BitField { byte: 1, bit: 2, set: |e, v| e.gfc64_mode = v },
    BitField { byte: 1, bit: 1, set: |e, v| e.tx_cdr_unlocked = v },
    BitField { byte: 1, bit: 0, set: |e, v| e.rx_cdr_unlocked = v },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::decode_fields;

    #[test]
    fn alarm_and_rx_flags() {
        let flags: MonitorFlags = decode_fields(&[0b1000_0001, 0b0100_0000], MONITOR_FLAGS);
        assert!(flags.temperature_high);
        assert!(flags.tx_power_low);
        assert!(flags.rx_power_low);
        assert!(!flags.rx_power_high);
    }

    #[test]
    fn equalization_and_emphasis_names() {
        let eq = RateSplit::from_byte(0xA0, InputEqualization);
        assert_eq!(eq.high_rate.to_string(), "10 dB");
        assert_eq!(eq.low_rate.to_string(), "No EQ");
        assert_eq!(InputEqualization(0x0B).to_string(), "Reserved");
        let emphasis = RateSplit::from_byte(0x38, OutputEmphasis);
        assert_eq!(emphasis.high_rate.to_string(), "3 dB");
        assert_eq!(emphasis.low_rate.to_string(), "Vendor specific");
    }

    #[test]
    fn extended_status_power_level() {
        let ext: ExtendedStatusControl =
            decode_fields(&[0b0000_0010, 0b0000_0011], EXTENDED_STATUS_CONTROL);
        assert_eq!(ext.power_level_operation, PowerLevelOperation::Level2Or3);
        assert!(ext.tx_cdr_unlocked);
        assert!(ext.rx_cdr_unlocked);
        let value = serde_json::to_value(ext).unwrap();
        assert_eq!(
            value["power_level_operation"],
            "Power Level 2 or 3 operation (1.5 or 2.0 Watt max)"
        );
    }

    #[test]
    fn status_control_bits() {
        let status: StatusControl = decode_fields(&[0b1000_0010], STATUS_CONTROL);
        assert!(status.tx_disable_state);
        assert!(status.rx_los_state);
        assert!(!status.data_ready_bar);
    }
}
