//! One read-only view over every decoded module.
//!
//! `Module` tags the per-standard record; `Module::view` maps it onto
//! `ModuleView`, which answers the questions every consumer asks (who made
//! it, how far it reaches, what the lasers read) without caring which memory
//! map the module uses.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::DecodeError;
use crate::standards::StandardVariant;
use crate::standards::common::{DateCode, PowerThresholds, Thresholds};
use crate::standards::sff8079::{self, SerialId, Sff8079Eeprom};
use crate::standards::sff8472::Sff8472Eeprom;
use crate::standards::sff8636::{Sff8636Eeprom, layout as sff8636_layout};
use crate::units::Power;
use crate::vocab::{ConnectorType, Encoding, Identifier, Oui, PowerClass};

pub const UNIT_CELSIUS: &str = "degrees celsius";
pub const UNIT_VOLTS: &str = "volts";
pub const UNIT_MILLIAMPERES: &str = "milliamperes";
pub const UNIT_MILLIWATTS: &str = "milliwatts";

/// A decoded image, tagged with the standard it was decoded under.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Module {
    Sff8079(Sff8079Eeprom),
    Sff8472(Sff8472Eeprom),
    Sff8636(Sff8636Eeprom),
    /// SFF-8436 shares the SFF-8636 layout.
    Sff8436(Sff8636Eeprom),
}

impl Module {
    pub fn variant(&self) -> StandardVariant {
        match self {
            Module::Sff8079(_) => StandardVariant::Sff8079,
            Module::Sff8472(_) => StandardVariant::Sff8472,
            Module::Sff8636(_) => StandardVariant::Sff8636,
            Module::Sff8436(_) => StandardVariant::Sff8436,
        }
    }

    pub fn view(&self) -> ModuleView {
        match self {
            Module::Sff8079(eeprom) => view_sff8079(eeprom),
            Module::Sff8472(eeprom) => view_sff8472(eeprom),
            Module::Sff8636(eeprom) | Module::Sff8436(eeprom) => view_sff8636(eeprom),
        }
    }
}

/// Alarm and warning limits in the unit of the measurement they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlarmThresholds {
    pub high_alarm: f64,
    pub high_warning: f64,
    pub low_alarm: f64,
    pub low_warning: f64,
}

impl From<Thresholds<f64>> for AlarmThresholds {
    fn from(t: Thresholds<f64>) -> Self {
        Self {
            high_alarm: t.high_alarm,
            high_warning: t.high_warning,
            low_alarm: t.low_alarm,
            low_warning: t.low_warning,
        }
    }
}

impl From<PowerThresholds> for AlarmThresholds {
    fn from(t: PowerThresholds) -> Self {
        t.map(Power::milliwatts).into()
    }
}

/// A sensor reading with its unit and, when the module provides them, its
/// alarm thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<AlarmThresholds>,
    pub thresholds_available: bool,
}

impl Measurement {
    pub fn new(value: f64, unit: &'static str, thresholds: Option<AlarmThresholds>) -> Self {
        Self {
            value,
            unit,
            thresholds,
            thresholds_available: thresholds.is_some(),
        }
    }

    pub fn alarm_thresholds(&self) -> Result<&AlarmThresholds, DecodeError> {
        self.thresholds
            .as_ref()
            .ok_or(DecodeError::ThresholdsNotSupported)
    }
}

/// One optical channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Laser {
    /// 1-based channel number.
    pub channel: u8,
    pub monitoring_supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_power: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_power: Option<Measurement>,
}

impl Laser {
    fn unmonitored(channel: u8) -> Self {
        Self {
            channel,
            monitoring_supported: false,
            bias: None,
            tx_power: None,
            rx_power: None,
        }
    }

    pub fn bias(&self) -> Result<&Measurement, DecodeError> {
        self.bias.as_ref().ok_or(DecodeError::MonitoringNotSupported)
    }

    pub fn tx_power(&self) -> Result<&Measurement, DecodeError> {
        self.tx_power.as_ref().ok_or(DecodeError::MonitoringNotSupported)
    }

    pub fn rx_power(&self) -> Result<&Measurement, DecodeError> {
        self.rx_power.as_ref().ok_or(DecodeError::MonitoringNotSupported)
    }
}

/// Standard-independent summary of a module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleView {
    pub identifier: Identifier,
    pub connector: ConnectorType,
    pub encoding: Encoding,
    pub power_class: PowerClass,
    /// Nominal signaling rate in baud.
    pub signaling_rate: f64,
    /// Reach per medium: `SMF(km)` in kilometres, everything else in metres.
    pub link_lengths: BTreeMap<String, f64>,
    pub vendor_name: String,
    pub vendor_pn: String,
    pub vendor_rev: String,
    pub vendor_sn: String,
    pub vendor_oui: Oui,
    pub date_code: DateCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength_nm: Option<f64>,
    pub lasers: Vec<Laser>,
    pub supports_monitoring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<Measurement>,
}

impl ModuleView {
    /// Wavelength in nm, zero for cable assemblies.
    pub fn wavelength_nm(&self) -> f64 {
        self.wavelength_nm.unwrap_or(0.0)
    }

    pub fn module_temperature(&self) -> Result<&Measurement, DecodeError> {
        self.temperature
            .as_ref()
            .ok_or(DecodeError::MonitoringNotSupported)
    }

    pub fn module_voltage(&self) -> Result<&Measurement, DecodeError> {
        self.voltage.as_ref().ok_or(DecodeError::MonitoringNotSupported)
    }
}

fn sfp_link_lengths(lengths: &sff8079::LinkLengths) -> BTreeMap<String, f64> {
    if let Some(copper) = lengths.copper_m {
        return BTreeMap::from([("copperOrDAC".to_string(), copper)]);
    }
    BTreeMap::from([
        ("SMF(km)".to_string(), lengths.smf_km),
        ("SMF(m)".to_string(), lengths.smf_m),
        ("OM1".to_string(), lengths.om1_m),
        ("OM2".to_string(), lengths.om2_m),
        ("OM3".to_string(), lengths.om3_m),
        ("OM4".to_string(), lengths.om4_m.unwrap_or(0.0)),
    ])
}

/// Identity fields shared by SFF-8079 and SFF-8472; the caller fills in
/// monitoring.
fn sfp_view(serial_id: &SerialId) -> ModuleView {
    ModuleView {
        identifier: serial_id.identifier,
        connector: serial_id.connector,
        encoding: serial_id.encoding,
        power_class: serial_id.options.power_class(),
        signaling_rate: serial_id.signaling_rate,
        link_lengths: sfp_link_lengths(&serial_id.link_lengths),
        vendor_name: serial_id.vendor_name.clone(),
        vendor_pn: serial_id.vendor_pn.clone(),
        vendor_rev: serial_id.vendor_rev.clone(),
        vendor_sn: serial_id.vendor_sn.clone(),
        vendor_oui: serial_id.vendor_oui,
        date_code: serial_id.date_code.clone(),
        wavelength_nm: serial_id.wavelength_nm,
        lasers: Vec::new(),
        supports_monitoring: false,
        temperature: None,
        voltage: None,
    }
}

fn view_sff8079(eeprom: &Sff8079Eeprom) -> ModuleView {
    let mut view = sfp_view(&eeprom.serial_id);
    if !eeprom.serial_id.is_cable() {
        view.lasers.push(Laser::unmonitored(1));
    }
    view
}

fn view_sff8472(eeprom: &Sff8472Eeprom) -> ModuleView {
    let mut view = sfp_view(&eeprom.serial_id);
    let page = eeprom
        .diagnostic_page
        .as_ref()
        .filter(|_| eeprom.supports_monitoring());
    view.supports_monitoring = page.is_some();

    if let Some(page) = page {
        let t = &page.thresholds;
        let d = &page.diagnostics;
        view.temperature = Some(Measurement::new(
            d.temperature,
            UNIT_CELSIUS,
            Some(t.temperature.into()),
        ));
        view.voltage = Some(Measurement::new(d.voltage, UNIT_VOLTS, Some(t.voltage.into())));
    }

    if !eeprom.serial_id.is_cable() {
        let laser = match page {
            Some(page) => {
                let t = &page.thresholds;
                let d = &page.diagnostics;
                Laser {
                    channel: 1,
                    monitoring_supported: true,
                    bias: Some(Measurement::new(d.bias, UNIT_MILLIAMPERES, Some(t.bias.into()))),
                    tx_power: Some(Measurement::new(
                        d.tx_power.milliwatts(),
                        UNIT_MILLIWATTS,
                        Some(t.tx_power.into()),
                    )),
                    rx_power: Some(Measurement::new(
                        d.rx_power.milliwatts(),
                        UNIT_MILLIWATTS,
                        Some(t.rx_power.into()),
                    )),
                }
            }
            None => Laser::unmonitored(1),
        };
        view.lasers.push(laser);
    }
    view
}

fn view_sff8636(eeprom: &Sff8636Eeprom) -> ModuleView {
    let lower = &eeprom.lower_page;
    let upper = &eeprom.upper_page;
    let thresholds = eeprom.thresholds.as_ref();
    let optical = upper.is_optical();

    let link_lengths = match upper.link_lengths.copper_m {
        Some(copper) if !optical => BTreeMap::from([("copperOrDAC".to_string(), copper)]),
        _ => BTreeMap::from([
            ("SMF(km)".to_string(), upper.link_lengths.smf_km),
            ("OM1".to_string(), upper.link_lengths.om1_m.unwrap_or(0.0)),
            ("OM2".to_string(), upper.link_lengths.om2_m),
            ("OM3".to_string(), upper.link_lengths.om3_m),
            ("OM4".to_string(), upper.link_lengths.om4_m.unwrap_or(0.0)),
        ]),
    };

    let lasers = if optical {
        (1u8..)
            .zip(lower.channel_monitors.iter())
            .take(sff8636_layout::CHANNEL_COUNT)
            .map(|(channel, monitor)| Laser {
                channel,
                monitoring_supported: true,
                bias: Some(Measurement::new(
                    monitor.bias,
                    UNIT_MILLIAMPERES,
                    thresholds.map(|t| t.bias.into()),
                )),
                tx_power: Some(Measurement::new(
                    monitor.tx_power.milliwatts(),
                    UNIT_MILLIWATTS,
                    thresholds.map(|t| t.tx_power.into()),
                )),
                rx_power: Some(Measurement::new(
                    monitor.rx_power.milliwatts(),
                    UNIT_MILLIWATTS,
                    thresholds.map(|t| t.rx_power.into()),
                )),
            })
            .collect()
    } else {
        Vec::new()
    };

    ModuleView {
        identifier: lower.identifier,
        connector: upper.connector,
        encoding: upper.encoding,
        power_class: upper.extended_identifier.power_class,
        signaling_rate: upper.signaling_rate,
        link_lengths,
        vendor_name: upper.vendor_name.clone(),
        vendor_pn: upper.vendor_pn.clone(),
        vendor_rev: upper.vendor_rev.clone(),
        vendor_sn: upper.vendor_sn.clone(),
        vendor_oui: upper.vendor_oui,
        date_code: upper.date_code.clone(),
        wavelength_nm: upper.wavelength_nm,
        lasers,
        supports_monitoring: true,
        temperature: Some(Measurement::new(
            lower.free_side_monitors.temperature,
            UNIT_CELSIUS,
            thresholds.map(|t| t.temperature.into()),
        )),
        voltage: Some(Measurement::new(
            lower.free_side_monitors.voltage,
            UNIT_VOLTS,
            thresholds.map(|t| t.voltage.into()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum;
    use crate::options::{ChecksumPolicy, DecodeOptions};
    use crate::standards::sff8472::parse_sff8472;
    use crate::standards::sff8636::parse_sff8636;
    use crate::standards::{sff8079, sff8472};

    fn sfp_image(compliance_byte8: u8) -> Vec<u8> {
        let mut raw = vec![0u8; sff8472::layout::DIAGNOSTIC_PAGE_LEN];
        raw[0] = 0x03;
        raw[8] = compliance_byte8;
        raw[sff8079::layout::WAVELENGTH_RANGE].copy_from_slice(&1310u16.to_be_bytes());
        raw[sff8472::layout::DIAGNOSTIC_MONITORING_TYPE_OFFSET] = 0x68;
        raw[sff8472::layout::TEMPERATURE_RANGE].copy_from_slice(&[0x19, 0x00]);
        raw[sff8472::layout::TEMPERATURE_THRESHOLDS_OFFSET] = 0x5A;
        raw[0x3F] = checksum(&raw[0x00..0x3F]);
        raw[0x5F] = checksum(&raw[0x40..0x5F]);
        raw[0x15F] = checksum(&raw[0x100..0x15F]);
        raw
    }

    fn relaxed() -> DecodeOptions {
        DecodeOptions {
            checksum_policy: ChecksumPolicy::Ignore,
            ..DecodeOptions::default()
        }
    }

    #[test]
    fn optical_sfp_has_one_monitored_laser() {
        let eeprom = parse_sff8472(&sfp_image(0), &DecodeOptions::default()).unwrap();
        let view = Module::Sff8472(eeprom).view();
        assert_eq!(view.lasers.len(), 1);
        assert!(view.supports_monitoring);
        assert_eq!(view.wavelength_nm(), 1310.0);
        let temperature = view.module_temperature().unwrap();
        assert_eq!(temperature.value, 25.0);
        assert_eq!(temperature.unit, UNIT_CELSIUS);
        assert_eq!(temperature.alarm_thresholds().unwrap().high_alarm, 90.0);
        assert!(view.lasers[0].rx_power().is_ok());
        assert!(view.link_lengths.contains_key("SMF(m)"));
    }

    #[test]
    fn cable_sfp_has_no_lasers_and_no_wavelength() {
        // Active cable compliance bit.
        let eeprom = parse_sff8472(&sfp_image(0x08), &DecodeOptions::default()).unwrap();
        let view = Module::Sff8472(eeprom).view();
        assert!(view.lasers.is_empty());
        assert_eq!(view.wavelength_nm(), 0.0);
        assert!(view.wavelength_nm.is_none());
        assert_eq!(view.link_lengths.keys().collect::<Vec<_>>(), vec!["copperOrDAC"]);
    }

    #[test]
    fn base_page_only_reports_monitoring_unsupported() {
        let raw = sfp_image(0);
        let eeprom = parse_sff8472(&raw[..256], &DecodeOptions::default()).unwrap();
        let view = Module::Sff8472(eeprom).view();
        assert!(!view.supports_monitoring);
        assert_eq!(
            view.module_temperature(),
            Err(DecodeError::MonitoringNotSupported)
        );
        assert_eq!(view.lasers.len(), 1);
        assert!(!view.lasers[0].monitoring_supported);
        assert_eq!(view.lasers[0].bias(), Err(DecodeError::MonitoringNotSupported));
    }

    #[test]
    fn sff8079_never_monitors() {
        let raw = sfp_image(0);
        let eeprom = sff8079::parse_sff8079(&raw[..256], &DecodeOptions::default()).unwrap();
        let module = Module::Sff8079(eeprom);
        assert_eq!(module.variant(), StandardVariant::Sff8079);
        let view = module.view();
        assert!(!view.supports_monitoring);
        assert!(view.module_voltage().is_err());
        assert_eq!(view.lasers.len(), 1);
    }

    fn qsfp_image(technology: u8, len: usize) -> Vec<u8> {
        let mut raw = vec![0u8; len];
        raw[sff8636_layout::IDENTIFIER_OFFSET] = 0x11;
        raw[sff8636_layout::UPPER_IDENTIFIER_OFFSET] = 0x11;
        raw[sff8636_layout::DEVICE_TECHNOLOGY_OFFSET] = technology;
        raw[sff8636_layout::LENGTH_OM4_OR_COPPER_OFFSET] = 1;
        raw
    }

    #[test]
    fn optical_qsfp_has_four_lasers() {
        let eeprom = parse_sff8636(&qsfp_image(0x40, 0x248), &relaxed()).unwrap();
        let view = Module::Sff8636(eeprom).view();
        let channels: Vec<u8> = view.lasers.iter().map(|l| l.channel).collect();
        assert_eq!(channels, vec![1, 2, 3, 4]);
        assert!(view.lasers[2].tx_power().unwrap().thresholds_available);
        assert_eq!(view.link_lengths["OM4"], 2.0);
    }

    #[test]
    fn qsfp_without_page_three_has_no_thresholds() {
        let eeprom = parse_sff8636(&qsfp_image(0x40, 512), &relaxed()).unwrap();
        let view = Module::Sff8636(eeprom).view();
        let voltage = view.module_voltage().unwrap();
        assert!(!voltage.thresholds_available);
        assert_eq!(
            voltage.alarm_thresholds(),
            Err(DecodeError::ThresholdsNotSupported)
        );
    }

    #[test]
    fn copper_qsfp_has_no_lasers() {
        let eeprom = parse_sff8636(&qsfp_image(0xA0, 512), &relaxed()).unwrap();
        let module = Module::Sff8436(eeprom);
        assert_eq!(module.variant(), StandardVariant::Sff8436);
        let view = module.view();
        assert!(view.lasers.is_empty());
        assert!(view.wavelength_nm.is_none());
        assert_eq!(view.link_lengths["copperOrDAC"], 1.0);
        assert!(view.module_temperature().is_ok());
    }

    #[test]
    fn view_serializes_measurements() {
        let eeprom = parse_sff8472(&sfp_image(0), &DecodeOptions::default()).unwrap();
        let value = serde_json::to_value(Module::Sff8472(eeprom).view()).unwrap();
        assert_eq!(value["temperature"]["unit"], "degrees celsius");
        assert_eq!(value["temperature"]["thresholds"]["high_alarm"], 90.0);
        assert_eq!(value["lasers"][0]["channel"], 1);
    }
}
