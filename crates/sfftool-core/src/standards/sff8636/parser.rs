use serde::Serialize;

use super::compliance::{
    EXTENDED_MODULE_CODES, ExtendedModuleCode, SPECIFICATION_COMPLIANCE, Specification,
};
use super::control::{CONTROL, Control};
use super::flags::{
    AlarmFlags, CHANNEL_ALARMS, CHANNEL_STATUS, ChannelFlags, ChannelStatus, FREE_SIDE_ALARMS,
    InterruptFlags, InterruptMasks, READINESS, ReadinessFlags,
};
use super::layout;
use super::lower_page::{
    AdvancedLowPowerMode, ChannelMonitor, FarEndImplementation, FreeSideDeviceProperties,
    FreeSideMonitors, RevisionCompliance, STATUS_INDICATOR, StatusIndicators,
    min_operating_voltage,
};
use super::upper_page::{
    CopperAttenuation, DEVICE_TECHNOLOGY, DIAGNOSTIC_MONITORING_TYPE, DeviceTechnology,
    DiagnosticMonitoringType, ENHANCED_OPTIONS, EXTENDED_IDENTIFIER, EnhancedOptions,
    ExtendedIdentifier, ExtendedRateSelect, LinkLengths, OPTIONS, Options, TransmitterTechnology,
    power_class,
};
use crate::bitfield::{FlagSet, bit_is_set, decode_fields, decode_flags};
use crate::error::DecodeError;
use crate::standards::common::{DateCode, EepromReader, PowerThresholds, Thresholds};
use crate::units;
use crate::vocab::{
    ConnectorType, Encoding, EncodingTable, ExtendedSpecificationCompliance, Identifier, Oui,
};

/// Lower page (bytes 0..=127).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowerPage {
    pub identifier: Identifier,
    pub status_indicators: StatusIndicators,
    pub interrupt_flags: InterruptFlags,
    pub free_side_monitors: FreeSideMonitors,
    pub channel_monitors: [ChannelMonitor; layout::CHANNEL_COUNT],
    pub control: Control,
    pub interrupt_masks: InterruptMasks,
    pub device_properties: FreeSideDeviceProperties,
}

/// Upper page 00h (bytes 128..=255).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpperPage {
    /// Repeats the lower page identifier.
    pub identifier: Identifier,
    pub extended_identifier: ExtendedIdentifier,
    pub connector: ConnectorType,
    pub specification_compliance: FlagSet<Specification>,
    pub encoding: Encoding,
    /// Nominal signaling rate in baud.
    pub signaling_rate: f64,
    pub extended_rate_select: ExtendedRateSelect,
    pub link_lengths: LinkLengths,
    pub device_technology: DeviceTechnology,
    pub vendor_name: String,
    pub extended_module_codes: FlagSet<ExtendedModuleCode>,
    pub vendor_oui: Oui,
    pub vendor_pn: String,
    pub vendor_rev: String,
    /// Absent for non-optical modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength_nm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength_tolerance_nm: Option<f64>,
    /// Present only for non-optical modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copper_attenuation: Option<CopperAttenuation>,
    /// Degrees Celsius; zero means the default of 70.
    pub max_case_temperature: u8,
    pub extended_compliance: ExtendedSpecificationCompliance,
    pub options: Options,
    pub vendor_sn: String,
    pub date_code: DateCode,
    pub diagnostic_monitoring_type: DiagnosticMonitoringType,
    pub enhanced_options: EnhancedOptions,
}

impl UpperPage {
    /// Optical transceiver rather than a copper cable assembly.
    pub fn is_optical(&self) -> bool {
        !is_non_optical(
            &self.specification_compliance,
            self.device_technology.transmitter_technology,
            self.extended_compliance,
        )
    }
}

/// Module and channel thresholds from upper page 03h.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ModuleThresholds {
    pub temperature: Thresholds<f64>,
    pub voltage: Thresholds<f64>,
    pub rx_power: PowerThresholds,
    pub bias: Thresholds<f64>,
    pub tx_power: PowerThresholds,
}

fn is_non_optical(
    compliance: &FlagSet<Specification>,
    technology: TransmitterTechnology,
    extended: ExtendedSpecificationCompliance,
) -> bool {
    compliance.contains(Specification::FortyGBaseCr4) || technology.is_copper() || extended.is_copper()
}

fn single(reader: &EepromReader<'_>, offset: usize) -> Result<[u8; 1], DecodeError> {
    Ok([reader.read_u8(offset)?])
}

fn word(reader: &EepromReader<'_>, offset: usize) -> Result<(u8, u8), DecodeError> {
    let [msb, lsb] = reader.read_array::<2>(offset..offset + 2)?;
    Ok((msb, lsb))
}

pub fn parse_interrupt_flags(reader: &EepromReader<'_>) -> Result<InterruptFlags, DecodeError> {
    let status: [ChannelStatus; 4] =
        decode_fields(reader.read_slice(layout::CHANNEL_STATUS_FLAGS_RANGE)?, CHANNEL_STATUS);
    let rx_power = reader.read_slice(layout::RX_POWER_FLAGS_RANGE)?;
    let bias = reader.read_slice(layout::BIAS_FLAGS_RANGE)?;
    let tx_power = reader.read_slice(layout::TX_POWER_FLAGS_RANGE)?;

    let mut channels = [ChannelFlags::default(); layout::CHANNEL_COUNT];
    for (index, channel) in channels.iter_mut().enumerate() {
        let alarms = CHANNEL_ALARMS[index];
        *channel = ChannelFlags {
            status: status[index],
            rx_power: decode_fields(rx_power, alarms),
            bias: decode_fields(bias, alarms),
            tx_power: decode_fields(tx_power, alarms),
        };
    }

    let temperature_byte = single(reader, layout::TEMPERATURE_FLAGS_OFFSET)?;
    let readiness: ReadinessFlags = decode_fields(&temperature_byte, READINESS);
    Ok(InterruptFlags {
        channels,
        temperature: decode_fields(&temperature_byte, FREE_SIDE_ALARMS),
        voltage: decode_fields(&single(reader, layout::VOLTAGE_FLAGS_OFFSET)?, FREE_SIDE_ALARMS),
        readiness,
    })
}

pub fn parse_interrupt_masks(reader: &EepromReader<'_>) -> Result<InterruptMasks, DecodeError> {
    let temperature_byte = single(reader, layout::TEMPERATURE_MASKS_OFFSET)?;
    let readiness: ReadinessFlags = decode_fields(&temperature_byte, READINESS);
    let voltage: AlarmFlags =
        decode_fields(&single(reader, layout::VOLTAGE_MASKS_OFFSET)?, FREE_SIDE_ALARMS);
    Ok(InterruptMasks {
        channels: decode_fields(
            reader.read_slice(layout::CHANNEL_STATUS_MASKS_RANGE)?,
            CHANNEL_STATUS,
        ),
        temperature: decode_fields(&temperature_byte, FREE_SIDE_ALARMS),
        voltage,
        tc_readiness: readiness.tc_readiness,
    })
}

pub fn parse_channel_monitors(
    reader: &EepromReader<'_>,
) -> Result<[ChannelMonitor; layout::CHANNEL_COUNT], DecodeError> {
    let mut channels = [ChannelMonitor::default(); layout::CHANNEL_COUNT];
    for (index, channel) in channels.iter_mut().enumerate() {
        let (rx_msb, rx_lsb) = word(reader, layout::CHANNEL_RX_POWER_OFFSET + index * 2)?;
        let (b_msb, b_lsb) = word(reader, layout::CHANNEL_BIAS_OFFSET + index * 2)?;
        let (tx_msb, tx_lsb) = word(reader, layout::CHANNEL_TX_POWER_OFFSET + index * 2)?;
        *channel = ChannelMonitor {
            rx_power: units::power(rx_msb, rx_lsb),
            bias: units::bias_current(b_msb, b_lsb),
            tx_power: units::power(tx_msb, tx_lsb),
        };
    }
    Ok(channels)
}

pub fn parse_device_properties(
    reader: &EepromReader<'_>,
) -> Result<FreeSideDeviceProperties, DecodeError> {
    let low_power = reader.read_u8(layout::LOW_POWER_AND_VOLTAGE_OFFSET)?;
    let far_near = reader.read_u8(layout::FAR_NEAR_END_OFFSET)?;
    let near_end = [far_near];
    Ok(FreeSideDeviceProperties {
        max_power_consumption_watts: f64::from(reader.read_u8(layout::MAX_POWER_CONSUMPTION_OFFSET)?)
            * 0.1,
        propagation_delay_ns: f64::from(reader.read_u16_be(layout::PROPAGATION_DELAY_RANGE)?) * 10.0,
        advanced_low_power_mode: AdvancedLowPowerMode(low_power >> 4),
        far_side_managed: bit_is_set(&[low_power], 0, 3),
        min_operating_voltage: min_operating_voltage(low_power & 0b111),
        far_end_implementation: FarEndImplementation((far_near >> 4) & 0b111),
        near_end_channel_bits: [0, 1, 2, 3].map(|bit| bit_is_set(&near_end, 0, bit)),
    })
}

pub fn parse_lower_page(reader: &EepromReader<'_>) -> Result<LowerPage, DecodeError> {
    let (t_msb, t_lsb) = word(reader, layout::TEMPERATURE_RANGE.start)?;
    let (v_msb, v_lsb) = word(reader, layout::VOLTAGE_RANGE.start)?;
    Ok(LowerPage {
        identifier: Identifier(reader.read_u8(layout::IDENTIFIER_OFFSET)?),
        status_indicators: StatusIndicators {
            revision_compliance: RevisionCompliance(
                reader.read_u8(layout::REVISION_COMPLIANCE_OFFSET)?,
            ),
            status: decode_fields(&single(reader, layout::STATUS_OFFSET)?, STATUS_INDICATOR),
        },
        interrupt_flags: parse_interrupt_flags(reader)?,
        free_side_monitors: FreeSideMonitors {
            temperature: units::temperature(t_msb, t_lsb),
            voltage: units::voltage(v_msb, v_lsb),
        },
        channel_monitors: parse_channel_monitors(reader)?,
        control: decode_fields(reader.read_slice(layout::CONTROL_RANGE)?, CONTROL),
        interrupt_masks: parse_interrupt_masks(reader)?,
        device_properties: parse_device_properties(reader)?,
    })
}

pub fn parse_upper_page(reader: &EepromReader<'_>) -> Result<UpperPage, DecodeError> {
    let specification_compliance = decode_flags(
        reader.read_slice(layout::SPECIFICATION_COMPLIANCE_RANGE)?,
        SPECIFICATION_COMPLIANCE,
    );
    let technology_byte = reader.read_u8(layout::DEVICE_TECHNOLOGY_OFFSET)?;
    let device_technology = DeviceTechnology {
        transmitter_technology: TransmitterTechnology(technology_byte >> 4),
        ..decode_fields(&[technology_byte], DEVICE_TECHNOLOGY)
    };
    let extended_compliance =
        ExtendedSpecificationCompliance(reader.read_u8(layout::EXTENDED_COMPLIANCE_OFFSET)?);
    let non_optical = is_non_optical(
        &specification_compliance,
        device_technology.transmitter_technology,
        extended_compliance,
    );

    let extended_identifier_byte = reader.read_u8(layout::EXTENDED_IDENTIFIER_OFFSET)?;
    let extended_identifier = ExtendedIdentifier {
        power_class: power_class(extended_identifier_byte),
        ..decode_fields(&[extended_identifier_byte], EXTENDED_IDENTIFIER)
    };

    let nominal_rate = reader.read_u8(layout::SIGNALING_RATE_OFFSET)?;
    let signaling_rate = if nominal_rate == layout::SIGNALING_RATE_EXTENDED {
        f64::from(reader.read_u8(layout::SIGNALING_RATE_EXTENDED_OFFSET)?)
            * layout::SIGNALING_RATE_EXTENDED_UNIT_BAUD
    } else {
        f64::from(nominal_rate) * layout::SIGNALING_RATE_UNIT_BAUD
    };

    let om1 = reader.read_u8(layout::LENGTH_OM1_OFFSET)?;
    let om4_or_copper = f64::from(reader.read_u8(layout::LENGTH_OM4_OR_COPPER_OFFSET)?);
    let link_lengths = LinkLengths {
        smf_km: f64::from(reader.read_u8(layout::LENGTH_SMF_KM_OFFSET)?),
        om3_m: f64::from(reader.read_u8(layout::LENGTH_OM3_OFFSET)?) * 2.0,
        om2_m: f64::from(reader.read_u8(layout::LENGTH_OM2_OFFSET)?),
        om1_m: (!non_optical).then_some(f64::from(om1)),
        om4_m: (!non_optical).then_some(om4_or_copper * 2.0),
        copper_m: non_optical.then_some(om4_or_copper),
    };

    let [wl_msb, wl_lsb] = reader.read_array::<2>(layout::WAVELENGTH_RANGE)?;
    let [tol_msb, tol_lsb] = reader.read_array::<2>(layout::WAVELENGTH_TOLERANCE_RANGE)?;
    let (wavelength_nm, wavelength_tolerance_nm, copper_attenuation) = if non_optical {
        let attenuation = CopperAttenuation {
            db_at_2_5_ghz: wl_msb,
            db_at_5_ghz: wl_lsb,
            db_at_7_ghz: tol_msb,
            db_at_12_9_ghz: tol_lsb,
            db_at_25_78_ghz: om1,
        };
        (None, None, Some(attenuation))
    } else {
        (
            Some(f64::from(units::u16_be(wl_msb, wl_lsb)) / 20.0),
            Some(f64::from(units::u16_be(tol_msb, tol_lsb)) / 200.0),
            None,
        )
    };

    let vendor_name = reader.read_vendor_name(layout::VENDOR_NAME_RANGE)?;

    Ok(UpperPage {
        identifier: Identifier(reader.read_u8(layout::UPPER_IDENTIFIER_OFFSET)?),
        extended_identifier,
        connector: ConnectorType(reader.read_u8(layout::CONNECTOR_OFFSET)?),
        specification_compliance,
        encoding: Encoding::new(reader.read_u8(layout::ENCODING_OFFSET)?, EncodingTable::Sff8636),
        signaling_rate,
        extended_rate_select: ExtendedRateSelect(
            reader.read_u8(layout::EXTENDED_RATE_SELECT_OFFSET)?,
        ),
        link_lengths,
        device_technology,
        vendor_name,
        extended_module_codes: decode_flags(
            &single(reader, layout::EXTENDED_MODULE_CODES_OFFSET)?,
            EXTENDED_MODULE_CODES,
        ),
        vendor_oui: Oui(reader.read_array(layout::VENDOR_OUI_RANGE)?),
        vendor_pn: reader.read_string(layout::VENDOR_PN_RANGE)?,
        vendor_rev: reader.read_string(layout::VENDOR_REV_RANGE)?,
        wavelength_nm,
        wavelength_tolerance_nm,
        copper_attenuation,
        max_case_temperature: reader.read_u8(layout::MAX_CASE_TEMPERATURE_OFFSET)?,
        extended_compliance,
        options: decode_fields(reader.read_slice(layout::OPTIONS_RANGE)?, OPTIONS),
        vendor_sn: reader.read_string(layout::VENDOR_SN_RANGE)?,
        date_code: DateCode::parse(reader.read_slice(layout::DATE_CODE_RANGE)?),
        diagnostic_monitoring_type: decode_fields(
            &single(reader, layout::DIAGNOSTIC_MONITORING_TYPE_OFFSET)?,
            DIAGNOSTIC_MONITORING_TYPE,
        ),
        enhanced_options: decode_fields(
            &single(reader, layout::ENHANCED_OPTIONS_OFFSET)?,
            ENHANCED_OPTIONS,
        ),
    })
}

pub fn parse_thresholds(reader: &EepromReader<'_>) -> Result<ModuleThresholds, DecodeError> {
    reader.require_len(layout::THRESHOLDS_PAGE_LEN)?;
    Ok(ModuleThresholds {
        temperature: Thresholds::read(
            reader,
            layout::TEMPERATURE_THRESHOLDS_OFFSET,
            units::temperature,
        )?,
        voltage: Thresholds::read(reader, layout::VOLTAGE_THRESHOLDS_OFFSET, units::voltage)?,
        rx_power: Thresholds::read(reader, layout::RX_POWER_THRESHOLDS_OFFSET, units::power)?,
        bias: Thresholds::read(reader, layout::BIAS_THRESHOLDS_OFFSET, units::bias_current)?,
        tx_power: Thresholds::read(reader, layout::TX_POWER_THRESHOLDS_OFFSET, units::power)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Vec<u8> {
        let mut raw = vec![0u8; layout::MIN_LEN];
        raw[layout::IDENTIFIER_OFFSET] = 0x11;
        raw[layout::UPPER_IDENTIFIER_OFFSET] = 0x11;
        raw[layout::SIGNALING_RATE_OFFSET] = 0xFF;
        raw[layout::SIGNALING_RATE_EXTENDED_OFFSET] = 104;
        raw[layout::LENGTH_OM4_OR_COPPER_OFFSET] = 3;
        raw[layout::DEVICE_TECHNOLOGY_OFFSET] = 0x44;
        raw[layout::WAVELENGTH_RANGE].copy_from_slice(&26047u16.to_be_bytes());
        raw
    }

    #[test]
    fn optical_upper_page() {
        let raw = image();
        let upper = parse_upper_page(&EepromReader::new(&raw)).unwrap();
        assert!(upper.is_optical());
        assert_eq!(upper.signaling_rate, 26e9);
        assert_eq!(upper.wavelength_nm, Some(1302.35));
        assert_eq!(upper.link_lengths.om4_m, Some(6.0));
        assert_eq!(upper.link_lengths.copper_m, None);
        assert!(upper.copper_attenuation.is_none());
        assert_eq!(upper.device_technology.transmitter_technology.name(), "1310 nm DFB");
    }

    #[test]
    fn copper_technology_is_non_optical() {
        let mut raw = image();
        raw[layout::DEVICE_TECHNOLOGY_OFFSET] = 0xA0;
        raw[layout::WAVELENGTH_RANGE].copy_from_slice(&[6, 8]);
        raw[layout::WAVELENGTH_TOLERANCE_RANGE].copy_from_slice(&[10, 16]);
        let upper = parse_upper_page(&EepromReader::new(&raw)).unwrap();
        assert!(!upper.is_optical());
        assert_eq!(upper.wavelength_nm, None);
        assert_eq!(upper.wavelength_tolerance_nm, None);
        assert_eq!(upper.link_lengths.copper_m, Some(3.0));
        assert_eq!(upper.link_lengths.om4_m, None);
        let attenuation = upper.copper_attenuation.unwrap();
        assert_eq!(attenuation.db_at_2_5_ghz, 6);
        assert_eq!(attenuation.db_at_12_9_ghz, 16);
    }

    #[test]
    fn cr4_bit_is_non_optical() {
        let mut raw = image();
        raw[layout::SPECIFICATION_COMPLIANCE_RANGE.start] = 0b0000_1000;
        let upper = parse_upper_page(&EepromReader::new(&raw)).unwrap();
        assert!(!upper.is_optical());
    }

    #[test]
    fn copper_extended_compliance_is_non_optical() {
        let mut raw = image();
        raw[layout::EXTENDED_COMPLIANCE_OFFSET] = 0x0B;
        let upper = parse_upper_page(&EepromReader::new(&raw)).unwrap();
        assert!(!upper.is_optical());
    }

    #[test]
    fn channel_monitors_are_per_channel() {
        let mut raw = image();
        raw[layout::CHANNEL_RX_POWER_OFFSET + 6..][..2].copy_from_slice(&10000u16.to_be_bytes());
        raw[layout::CHANNEL_BIAS_OFFSET..][..2].copy_from_slice(&500u16.to_be_bytes());
        let channels = parse_channel_monitors(&EepromReader::new(&raw)).unwrap();
        assert_eq!(channels[3].rx_power.milliwatts(), 1.0);
        assert_eq!(channels[0].bias, 1.0);
        assert_eq!(channels[0].rx_power.milliwatts(), 0.0);
    }

    #[test]
    fn interrupt_flags_split_by_channel() {
        let mut raw = image();
        raw[layout::RX_POWER_FLAGS_RANGE.start + 1] = 0b0000_1000;
        raw[layout::TEMPERATURE_FLAGS_OFFSET] = 0b1000_0001;
        let flags = parse_interrupt_flags(&EepromReader::new(&raw)).unwrap();
        assert!(flags.channels[3].rx_power.high_alarm);
        assert!(!flags.channels[2].rx_power.any());
        assert!(flags.temperature.high_alarm);
        assert!(flags.readiness.initialization_complete);
        assert!(!flags.readiness.tc_readiness);
    }

    #[test]
    fn device_properties() {
        let mut raw = image();
        raw[layout::MAX_POWER_CONSUMPTION_OFFSET] = 35;
        raw[layout::LOW_POWER_AND_VOLTAGE_OFFSET] = 0b0001_1001;
        raw[layout::FAR_NEAR_END_OFFSET] = 0b0100_0001;
        let properties = parse_device_properties(&EepromReader::new(&raw)).unwrap();
        assert!((properties.max_power_consumption_watts - 3.5).abs() < 1e-12);
        assert_eq!(properties.advanced_low_power_mode, AdvancedLowPowerMode(1));
        assert!(properties.far_side_managed);
        assert_eq!(properties.min_operating_voltage, Some(2.5));
        assert_eq!(properties.far_end_implementation, FarEndImplementation(0b100));
        assert_eq!(properties.near_end_channel_bits, [true, false, false, false]);
    }

    #[test]
    fn thresholds_need_page_three() {
        let raw = image();
        let err = parse_thresholds(&EepromReader::new(&raw)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                needed: layout::THRESHOLDS_PAGE_LEN,
                actual: layout::MIN_LEN
            }
        );
    }
}
