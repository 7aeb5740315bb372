//! Upper page 00h code fields other than the compliance bitsets.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::bitfield::BitField;
use crate::standards::common::RxPowerMeasurement;
use crate::vocab::{PowerClass, serialize_code};

/// Extended identifier (byte 129).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExtendedIdentifier {
    pub power_class: PowerClass,
    pub power_class8_implemented: bool,
    pub clei_code_present: bool,
    pub tx_cdr_present: bool,
    pub rx_cdr_present: bool,
}

pub const EXTENDED_IDENTIFIER: &[BitField<ExtendedIdentifier>] = &[
    BitField { byte: 0, bit: 5, set: |e, v| e.power_class8_implemented = v },
    BitField { byte: 0, bit: 4, set: |e, v| e.clei_code_present = v },
    BitField { byte: 0, bit: 3, set: |e, v| e.tx_cdr_present = v },
    BitField { byte: 0, bit: 2, set: |e, v| e.rx_cdr_present = v },
];

/// Power class from bits 7-6 and 1-0 of the extended identifier. Classes 5
/// to 7 require bits 7-6 set; any other combination with low bits set is
/// reported as class 1.
pub fn power_class(extended_identifier: u8) -> PowerClass {
    let level = match extended_identifier & 0b1100_0011 {
        0b0000_0000 => 1,
        0b0100_0000 => 2,
        0b1000_0000 => 3,
        0b1100_0000 => 4,
        0b1100_0001 => 5,
        0b1100_0010 => 6,
        0b1100_0011 => 7,
        _ => 1,
    };
    PowerClass::new(level)
}

/// Extended rate select compliance (byte 141, bits 1-0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedRateSelect(pub u8);

impl ExtendedRateSelect {
    pub fn name(self) -> &'static str {
        match self.0 & 0b11 {
            0b01 => "Rate Select Version 1",
            0b10 => "Rate Select Version 2",
            0b00 => "Unspecified",
            _ => "Reserved",
        }
    }
}

impl Serialize for ExtendedRateSelect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

/// Transmitter technology (byte 147, bits 7-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransmitterTechnology(pub u8);

const TRANSMITTER_TECHNOLOGY_NAMES: [&str; 16] = [
    "850 nm VCSEL",
    "1310 nm VCSEL",
    "1550 nm VCSEL",
    "1310 nm FP",
    "1310 nm DFB",
    "1550 nm DFB",
    "1310 nm EML",
    "1550 nm EML",
    "Other / Undefined",
    "1490 nm DFB",
    "Copper cable unequalized",
    "Copper cable passive equalized",
    "Copper cable, near and far end limiting active equalizers",
    "Copper cable, far end limiting active equalizers",
    "Copper cable, near end limiting active equalizers",
    "Copper cable, linear active equalizers",
];

impl TransmitterTechnology {
    const FIRST_COPPER: u8 = 0b1010;

    pub fn name(self) -> &'static str {
        crate::vocab::dense_name(&TRANSMITTER_TECHNOLOGY_NAMES, self.0 & 0x0F).unwrap_or("Reserved")
    }

    /// Copper cable technologies occupy codes 0xA..=0xF.
    pub fn is_copper(self) -> bool {
        (self.0 & 0x0F) >= Self::FIRST_COPPER
    }
}

impl fmt::Display for TransmitterTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TransmitterTechnology {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

/// Device technology (byte 147).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeviceTechnology {
    pub transmitter_technology: TransmitterTechnology,
    pub wavelength_control: bool,
    pub cooled_transmitter: bool,
    pub apd_detector: bool,
    pub transmitter_tunable: bool,
}

pub const DEVICE_TECHNOLOGY: &[BitField<DeviceTechnology>] = &[
    BitField { byte: 0, bit: 3, set: |d, v| d.wavelength_control = v },
    BitField { byte: 0, bit: 2, set: |d, v| d.cooled_transmitter = v },
    BitField { byte: 0, bit: 1, set: |d, v| d.apd_detector = v },
    BitField { byte: 0, bit: 0, set: |d, v| d.transmitter_tunable = v },
];

/// Optional features (bytes 193..=195).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Options {
    pub lp_mode_tx_dis_configurable: bool,
    pub intl_rx_los_l_configurable: bool,
    pub tx_input_adaptive_eq_freeze_capable: bool,
    pub tx_input_eq_auto_adaptive_capable: bool,
    pub tx_input_eq_fixed_programmable: bool,
    pub rx_output_emphasis_fixed_programmable: bool,
    pub rx_output_amplitude_fixed_programmable: bool,
    pub tx_cdr_on_off_control: bool,
    pub rx_cdr_on_off_control: bool,
    pub tx_cdr_loss_of_lock: bool,
    pub rx_cdr_loss_of_lock: bool,
    pub rx_squelch_disable: bool,
    pub rx_output_disable: bool,
    pub tx_squelch_disable: bool,
    pub tx_squelch: bool,
    pub memory_page_02h: bool,
    pub memory_page_01h: bool,
    pub rate_select: bool,
    pub tx_disable: bool,
    pub tx_fault: bool,
    pub tx_squelch_reduces_pave: bool,
    pub tx_los: bool,
    pub memory_pages_20h_21h: bool,
}

pub const OPTIONS: &[BitField<Options>] = &[
    BitField { byte: 0, bit: 6, set: |o, v| o.lp_mode_tx_dis_configurable = v },
    BitField { byte: 0, bit: 5, set: |o, v| o.intl_rx_los_l_configurable = v },
    BitField { byte: 0, bit: 4, set: |o, v| o.tx_input_adaptive_eq_freeze_capable = v },
    BitField { byte: 0, bit: 3, set: |o, v| o.tx_input_eq_auto_adaptive_capable = v },
    BitField { byte: 0, bit: 2, set: |o, v| o.tx_input_eq_fixed_programmable = v },
    BitField { byte: 0, bit: 1, set: |o, v| o.rx_output_emphasis_fixed_programmable = v },
    BitField { byte: 0, bit: 0, set: |o, v| o.rx_output_amplitude_fixed_programmable = v },
    BitField { byte: 1, bit: 7, set: |o, v| o.tx_cdr_on_off_control = v },
    BitField { byte: 1, bit: 6, set: |o, v| o.rx_cdr_on_off_control = v },
    BitField { byte: 1, bit: 5, set: |o, v| o.tx_cdr_loss_of_lock = v },
    BitField { byte: 1, bit: 4, set: |o, v| o.rx_cdr_loss_of_lock = v },
    BitField { byte: 1, bit: 3, set: |o, v| o.rx_squelch_disable = v },
    BitField { byte: 1, bit: 2, set: |o, v| o.rx_output_disable = v },
    BitField { byte: 1, bit: 1, set: |o, v| o.tx_squelch_disable = v },
    BitField { byte: 1, bit: 0, set: |o, v| o.tx_squelch = v },
    BitField { byte: 2, bit: 7, set: |o, v| o.memory_page_02h = v },
    BitField { byte: 2, bit: 6, set: |o, v| o.memory_page_01h = v },
    BitField { byte: 2, bit: 5, set: |o, v| o.rate_select = v },
    BitField { byte: 2, bit: 4, set: |o, v| o.tx_disable = v },
    BitField { byte: 2, bit: 3, set: |o, v| o.tx_fault = v },
    BitField { byte: 2, bit: 2, set: |o, v| o.tx_squelch_reduces_pave = v },
    BitField { byte: 2, bit: 1, set: |o, v| o.tx_los = v },
    BitField { byte: 2, bit: 0, set: |o, v| o.memory_pages_20h_21h = v },
];

/// Diagnostic monitoring type (byte 220).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiagnosticMonitoringType {
    pub temperature_monitoring: bool,
    pub voltage_monitoring: bool,
    pub rx_power_measurement: RxPowerMeasurement,
    pub tx_power_supported: bool,
}

pub const DIAGNOSTIC_MONITORING_TYPE: &[BitField<DiagnosticMonitoringType>] = &[
    BitField { byte: 0, bit: 5, set: |d, v| d.temperature_monitoring = v },
    BitField { byte: 0, bit: 4, set: |d, v| d.voltage_monitoring = v },
    BitField {
        byte: 0,
        bit: 3,
        set: |d, v| d.rx_power_measurement = RxPowerMeasurement::from_average_bit(v),
    },
    BitField { byte: 0, bit: 2, set: |d, v| d.tx_power_supported = v },
];

/// Enhanced options (byte 221).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EnhancedOptions {
    pub initialization_complete_flag: bool,
    pub rate_select: bool,
    pub tc_readiness_flag: bool,
    pub software_reset: bool,
}

pub const ENHANCED_OPTIONS: &[BitField<EnhancedOptions>] = &[
    BitField { byte: 0, bit: 4, set: |e, v| e.initialization_complete_flag = v },
    BitField { byte: 0, bit: 3, set: |e, v| e.rate_select = v },
    BitField { byte: 0, bit: 1, set: |e, v| e.tc_readiness_flag = v },
    BitField { byte: 0, bit: 0, set: |e, v| e.software_reset = v },
];

/// Copper cable attenuation in dB, sharing bytes with OM1 length and the
/// wavelength fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopperAttenuation {
    pub db_at_2_5_ghz: u8,
    pub db_at_5_ghz: u8,
    pub db_at_7_ghz: u8,
    pub db_at_12_9_ghz: u8,
    pub db_at_25_78_ghz: u8,
}

/// Supported reach. Optical lengths are absent for non-optical modules,
/// where the shared bytes carry the cable length and attenuation instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkLengths {
    pub smf_km: f64,
    pub om3_m: f64,
    pub om2_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub om1_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub om4_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copper_m: Option<f64>,
}
