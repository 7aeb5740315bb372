//! External calibration of SFF-8472 monitor readings.
//!
//! Externally calibrated modules report raw sensor values and store the
//! correction constants in page A2h. Temperature, voltage, bias and transmit
//! power are corrected linearly with their own slope and offset. Receive
//! power uses a fourth-order polynomial evaluated on the raw ADC count, as
//! SFF-8472 section 9.3 defines it.
//!
//! Calibration is not idempotent. The decoder applies it once and records
//! that on the result; applying it again corrects twice.

use serde::Serialize;

use crate::standards::common::Thresholds;
use crate::standards::sff8472::{DiagnosticThresholds, Diagnostics};
use crate::units::Power;

/// Raw readings per milliwatt (LSB = 0.1 µW).
const POWER_COUNTS_PER_MILLIWATT: f64 = 10_000.0;

/// Correction constants in engineering units.
///
/// Offsets are stored as signed words in the LSB of their quantity and are
/// converted when read, so every field here applies directly to decoded
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationConstants {
    /// Receive power coefficients; index `i` multiplies `x^i`.
    pub rx_power: [f64; 5],
    pub bias_slope: f64,
    /// Milliamperes.
    pub bias_offset: f64,
    pub tx_power_slope: f64,
    /// Milliwatts.
    pub tx_power_offset: f64,
    pub temperature_slope: f64,
    /// Degrees Celsius.
    pub temperature_offset: f64,
    pub voltage_slope: f64,
    /// Volts.
    pub voltage_offset: f64,
}

impl CalibrationConstants {
    /// Constants that leave every reading unchanged.
    pub fn identity() -> Self {
        Self {
            rx_power: [0.0, 1.0, 0.0, 0.0, 0.0],
            bias_slope: 1.0,
            bias_offset: 0.0,
            tx_power_slope: 1.0,
            tx_power_offset: 0.0,
            temperature_slope: 1.0,
            temperature_offset: 0.0,
            voltage_slope: 1.0,
            voltage_offset: 0.0,
        }
    }

    pub fn temperature(&self, value: f64) -> f64 {
        linear(value, self.temperature_slope, self.temperature_offset)
    }

    pub fn voltage(&self, value: f64) -> f64 {
        linear(value, self.voltage_slope, self.voltage_offset)
    }

    pub fn bias(&self, value: f64) -> f64 {
        linear(value, self.bias_slope, self.bias_offset)
    }

    pub fn tx_power(&self, value: Power) -> Power {
        Power(linear(value.0, self.tx_power_slope, self.tx_power_offset))
    }

    pub fn rx_power(&self, value: Power) -> Power {
        // Readings are integer ADC counts; rounding undoes the mW scaling.
        let x = (value.0 * POWER_COUNTS_PER_MILLIWATT).round();
        let counts = self
            .rx_power
            .iter()
            .rev()
            .fold(0.0, |acc, coefficient| acc * x + coefficient);
        Power(counts / POWER_COUNTS_PER_MILLIWATT)
    }
}

fn linear(value: f64, slope: f64, offset: f64) -> f64 {
    value * slope + offset
}

pub fn calibrate_diagnostics(
    diagnostics: &Diagnostics,
    constants: &CalibrationConstants,
) -> Diagnostics {
    Diagnostics {
        temperature: constants.temperature(diagnostics.temperature),
        voltage: constants.voltage(diagnostics.voltage),
        bias: constants.bias(diagnostics.bias),
        tx_power: constants.tx_power(diagnostics.tx_power),
        rx_power: constants.rx_power(diagnostics.rx_power),
    }
}

pub fn calibrate_thresholds(
    thresholds: &DiagnosticThresholds,
    constants: &CalibrationConstants,
) -> DiagnosticThresholds {
    let scalar = |t: Thresholds<f64>, f: fn(&CalibrationConstants, f64) -> f64| {
        t.map(|value| f(constants, value))
    };
    let power = |t: Thresholds<Power>, f: fn(&CalibrationConstants, Power) -> Power| {
        t.map(|value| f(constants, value))
    };
    DiagnosticThresholds {
        temperature: scalar(thresholds.temperature, CalibrationConstants::temperature),
        voltage: scalar(thresholds.voltage, CalibrationConstants::voltage),
        bias: scalar(thresholds.bias, CalibrationConstants::bias),
        tx_power: power(thresholds.tx_power, CalibrationConstants::tx_power),
        rx_power: power(thresholds.rx_power, CalibrationConstants::rx_power),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units;

    fn sample() -> Diagnostics {
        Diagnostics {
            temperature: units::temperature(0x19, 0x8B),
            voltage: units::voltage(0x7F, 0x21),
            bias: units::bias_current(0x36, 0x70),
            tx_power: units::power(0x18, 0xD9),
            rx_power: units::power(0x15, 0x8E),
        }
    }

    #[test]
    fn identity_is_a_no_op() {
        let diagnostics = sample();
        let calibrated = calibrate_diagnostics(&diagnostics, &CalibrationConstants::identity());
        assert_eq!(calibrated, diagnostics);
    }

    #[test]
    fn identity_leaves_thresholds_unchanged() {
        let thresholds = DiagnosticThresholds {
            temperature: Thresholds {
                high_alarm: 90.0,
                low_alarm: -10.0,
                high_warning: 85.0,
                low_warning: -5.0,
            },
            rx_power: Thresholds {
                high_alarm: units::power(0x4E, 0x20),
                low_alarm: units::power(0x00, 0x9E),
                high_warning: units::power(0x27, 0x10),
                low_warning: units::power(0x01, 0x3C),
            },
            ..DiagnosticThresholds::default()
        };
        let calibrated = calibrate_thresholds(&thresholds, &CalibrationConstants::identity());
        assert_eq!(calibrated, thresholds);
    }

    #[test]
    fn linear_correction_uses_own_constants() {
        let constants = CalibrationConstants {
            temperature_slope: 2.0,
            temperature_offset: 1.0,
            voltage_slope: 1.0,
            voltage_offset: 0.5,
            ..CalibrationConstants::identity()
        };
        let diagnostics = Diagnostics {
            temperature: 10.0,
            voltage: 3.0,
            ..Diagnostics::default()
        };
        let calibrated = calibrate_diagnostics(&diagnostics, &constants);
        assert_eq!(calibrated.temperature, 21.0);
        assert_eq!(calibrated.voltage, 3.5);
    }

    #[test]
    fn calibration_is_not_idempotent() {
        let constants = CalibrationConstants {
            bias_slope: 1.5,
            bias_offset: 2.0,
            ..CalibrationConstants::identity()
        };
        let once = calibrate_diagnostics(&sample(), &constants);
        let twice = calibrate_diagnostics(&once, &constants);
        assert_ne!(once.bias, twice.bias);
    }

    #[test]
    fn rx_polynomial_uses_every_power() {
        // 1000 counts: 1 + 2x + 0.001x^2 = 1 + 2000 + 1000 = 3001 counts.
        let constants = CalibrationConstants {
            rx_power: [1.0, 2.0, 0.001, 0.0, 0.0],
            ..CalibrationConstants::identity()
        };
        let calibrated = constants.rx_power(Power(0.1));
        assert!((calibrated.milliwatts() - 0.3001).abs() < 1e-12);
    }

    #[test]
    fn rx_polynomial_quartic_term() {
        let constants = CalibrationConstants {
            rx_power: [0.0, 0.0, 0.0, 0.0, 1e-9],
            ..CalibrationConstants::identity()
        };
        // 100 counts: 1e-9 * 1e8 = 0.1 counts.
        let calibrated = constants.rx_power(Power(0.01));
        assert!((calibrated.milliwatts() - 0.00001).abs() < 1e-15);
    }
}
