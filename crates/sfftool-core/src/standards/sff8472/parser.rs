use super::diagnostics::{
    DiagnosticThresholds, Diagnostics, EXTENDED_STATUS_CONTROL, InputEqualization, MONITOR_FLAGS,
    OptionalDiagnostics, OptionalThresholds, OutputEmphasis, RateSplit, STATUS_CONTROL,
};
use super::layout;
use super::DiagnosticPage;
use crate::bitfield::decode_fields;
use crate::calibration::CalibrationConstants;
use crate::error::DecodeError;
use crate::standards::common::{EepromReader, Thresholds};
use crate::units;

fn word(reader: &EepromReader<'_>, range: std::ops::Range<usize>) -> Result<(u8, u8), DecodeError> {
    let [msb, lsb] = reader.read_array::<2>(range)?;
    Ok((msb, lsb))
}

pub fn parse_thresholds(reader: &EepromReader<'_>) -> Result<DiagnosticThresholds, DecodeError> {
    Ok(DiagnosticThresholds {
        temperature: Thresholds::read(reader, layout::TEMPERATURE_THRESHOLDS_OFFSET, units::temperature)?,
        voltage: Thresholds::read(reader, layout::VOLTAGE_THRESHOLDS_OFFSET, units::voltage)?,
        bias: Thresholds::read(reader, layout::BIAS_THRESHOLDS_OFFSET, units::bias_current)?,
        tx_power: Thresholds::read(reader, layout::TX_POWER_THRESHOLDS_OFFSET, units::power)?,
        rx_power: Thresholds::read(reader, layout::RX_POWER_THRESHOLDS_OFFSET, units::power)?,
    })
}

pub fn parse_optional_thresholds(
    reader: &EepromReader<'_>,
) -> Result<OptionalThresholds, DecodeError> {
    Ok(OptionalThresholds {
        laser_temperature: Thresholds::read(
            reader,
            layout::LASER_TEMPERATURE_THRESHOLDS_OFFSET,
            units::temperature,
        )?,
        tec_current: Thresholds::read(
            reader,
            layout::TEC_CURRENT_THRESHOLDS_OFFSET,
            units::tec_current,
        )?,
    })
}

pub fn parse_calibration_constants(
    reader: &EepromReader<'_>,
) -> Result<CalibrationConstants, DecodeError> {
    let coefficients = reader.read_slice(layout::RX_POWER_COEFFICIENTS_RANGE)?;
    let mut rx_power = [0.0; 5];
    // Stored highest power first.
    for (chunk, slot) in coefficients.chunks_exact(4).zip(rx_power.iter_mut().rev()) {
        let bytes: [u8; 4] = chunk.try_into().map_err(|_| DecodeError::TooShort {
            needed: 4,
            actual: chunk.len(),
        })?;
        *slot = units::float32(bytes);
    }

    let slope = |range| -> Result<f64, DecodeError> {
        let (msb, lsb) = word(reader, range)?;
        Ok(units::unsigned_fixed(msb, lsb))
    };
    let offset = |range, lsb_units: f64| -> Result<f64, DecodeError> {
        let (msb, lsb) = word(reader, range)?;
        Ok(units::signed_word(msb, lsb) / lsb_units)
    };

    Ok(CalibrationConstants {
        rx_power,
        bias_slope: slope(layout::BIAS_SLOPE_RANGE)?,
        bias_offset: offset(layout::BIAS_OFFSET_RANGE, 500.0)?,
        tx_power_slope: slope(layout::TX_POWER_SLOPE_RANGE)?,
        tx_power_offset: offset(layout::TX_POWER_OFFSET_RANGE, 10_000.0)?,
        temperature_slope: slope(layout::TEMPERATURE_SLOPE_RANGE)?,
        temperature_offset: offset(layout::TEMPERATURE_OFFSET_RANGE, 256.0)?,
        voltage_slope: slope(layout::VOLTAGE_SLOPE_RANGE)?,
        voltage_offset: offset(layout::VOLTAGE_OFFSET_RANGE, 10_000.0)?,
    })
}

pub fn parse_diagnostics(reader: &EepromReader<'_>) -> Result<Diagnostics, DecodeError> {
    let (t_msb, t_lsb) = word(reader, layout::TEMPERATURE_RANGE)?;
    let (v_msb, v_lsb) = word(reader, layout::VOLTAGE_RANGE)?;
    let (b_msb, b_lsb) = word(reader, layout::BIAS_RANGE)?;
    let (tx_msb, tx_lsb) = word(reader, layout::TX_POWER_RANGE)?;
    let (rx_msb, rx_lsb) = word(reader, layout::RX_POWER_RANGE)?;
    Ok(Diagnostics {
        temperature: units::temperature(t_msb, t_lsb),
        voltage: units::voltage(v_msb, v_lsb),
        bias: units::bias_current(b_msb, b_lsb),
        tx_power: units::power(tx_msb, tx_lsb),
        rx_power: units::power(rx_msb, rx_lsb),
    })
}

pub fn parse_diagnostic_page(
    reader: &EepromReader<'_>,
    externally_calibrated: bool,
) -> Result<DiagnosticPage, DecodeError> {
    reader.require_len(layout::DIAGNOSTIC_PAGE_LEN)?;

    let (lt_msb, lt_lsb) = word(reader, layout::LASER_TEMPERATURE_RANGE)?;
    let (tec_msb, tec_lsb) = word(reader, layout::TEC_CURRENT_RANGE)?;
    let calibration_constants = if externally_calibrated {
        Some(parse_calibration_constants(reader)?)
    } else {
        None
    };

    Ok(DiagnosticPage {
        thresholds: parse_thresholds(reader)?,
        optional_thresholds: parse_optional_thresholds(reader)?,
        calibration_constants,
        diagnostics: parse_diagnostics(reader)?,
        optional_diagnostics: OptionalDiagnostics {
            laser_temperature: units::temperature(lt_msb, lt_lsb),
            tec_current: units::tec_current(tec_msb, tec_lsb),
        },
        status_control: decode_fields(
            reader.read_slice(layout::STATUS_CONTROL_OFFSET..layout::STATUS_CONTROL_OFFSET + 1)?,
            STATUS_CONTROL,
        ),
        alarm_flags: decode_fields(reader.read_slice(layout::ALARM_FLAGS_RANGE)?, MONITOR_FLAGS),
        input_equalization: RateSplit::from_byte(
            reader.read_u8(layout::INPUT_EQUALIZATION_OFFSET)?,
            InputEqualization,
        ),
        output_emphasis: RateSplit::from_byte(
            reader.read_u8(layout::OUTPUT_EMPHASIS_OFFSET)?,
            OutputEmphasis,
        ),
        warning_flags: decode_fields(reader.read_slice(layout::WARNING_FLAGS_RANGE)?, MONITOR_FLAGS),
        extended_status_control: decode_fields(
            reader.read_slice(layout::EXTENDED_STATUS_CONTROL_RANGE)?,
            EXTENDED_STATUS_CONTROL,
        ),
        user_eeprom: reader.read_slice(layout::USER_EEPROM_RANGE)?.to_vec(),
    })
}
