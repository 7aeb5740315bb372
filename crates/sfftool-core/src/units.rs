//! Fixed-point and floating field converters.
//!
//! All converters are total: any bit pattern is a valid reading.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Optical power in milliwatts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Power(pub f64);

impl Power {
    pub fn milliwatts(self) -> f64 {
        self.0
    }

    /// Logarithmic view, `10·log10(mW)`. Zero power yields negative infinity.
    pub fn dbm(self) -> f64 {
        10.0 * self.0.log10()
    }

    /// dBm with non-finite values replaced by `-f64::MAX`, for formats that
    /// cannot carry infinities.
    pub fn dbm_finite(self) -> f64 {
        let dbm = self.dbm();
        if dbm.is_finite() { dbm } else { -f64::MAX }
    }
}

impl Serialize for Power {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Power", 2)?;
        state.serialize_field("milliwatts", &self.0)?;
        state.serialize_field("dbm", &self.dbm_finite())?;
        state.end()
    }
}

pub fn u16_be(msb: u8, lsb: u8) -> u16 {
    u16::from_be_bytes([msb, lsb])
}

/// Signed two's complement word in units of 1/256 °C.
pub fn temperature(msb: u8, lsb: u8) -> f64 {
    f64::from(i16::from_be_bytes([msb, lsb])) / 256.0
}

/// Supply voltage in volts (LSB = 100 µV).
pub fn voltage(msb: u8, lsb: u8) -> f64 {
    f64::from(u16_be(msb, lsb)) / 10_000.0
}

/// Laser bias current in milliamperes (LSB = 2 µA).
pub fn bias_current(msb: u8, lsb: u8) -> f64 {
    f64::from(u16_be(msb, lsb)) / 500.0
}

/// Signed TEC current in milliamperes (LSB = 0.1 mA).
pub fn tec_current(msb: u8, lsb: u8) -> f64 {
    f64::from(i16::from_be_bytes([msb, lsb])) / 10.0
}

/// Wavelength in nm, one nanometre per LSB.
pub fn wavelength(msb: u8, lsb: u8) -> f64 {
    f64::from(u16_be(msb, lsb))
}

/// Optical power (LSB = 0.1 µW).
pub fn power(msb: u8, lsb: u8) -> Power {
    Power(f64::from(u16_be(msb, lsb)) / 10_000.0)
}

/// Unsigned fixed-point with an 8-bit fraction, used for calibration slopes.
pub fn unsigned_fixed(msb: u8, lsb: u8) -> f64 {
    f64::from(msb) + f64::from(lsb) / 256.0
}

/// Signed 16-bit word, used for calibration offsets.
pub fn signed_word(msb: u8, lsb: u8) -> f64 {
    f64::from(i16::from_be_bytes([msb, lsb]))
}

/// Big-endian IEEE-754 single precision.
pub fn float32(raw: [u8; 4]) -> f64 {
    f64::from(f32::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_boundaries() {
        assert_eq!(temperature(0x7F, 0xFF), 127.0 + 255.0 / 256.0);
        assert_eq!(temperature(0x7D, 0x00), 125.0);
        assert_eq!(temperature(0x00, 0x00), 0.0);
        assert_eq!(temperature(0xFF, 0xFF), -1.0 / 256.0);
        assert_eq!(temperature(0x80, 0x00), -128.0);
    }

    #[test]
    fn temperature_negative_with_fraction() {
        // -10.5 °C = 0xF580
        assert_eq!(temperature(0xF5, 0x80), -10.5);
    }

    #[test]
    fn voltage_and_bias_scaling() {
        assert_eq!(voltage(0x80, 0xE8), 3.3);
        assert_eq!(bias_current(0x00, 0x00), 0.0);
        assert_eq!(bias_current(0x46, 0x4D), 35.994);
        assert_eq!(tec_current(0xFF, 0xF6), -1.0);
        assert_eq!(wavelength(0x05, 0x32), 1330.0);
    }

    #[test]
    fn power_and_dbm() {
        let p = power(0x27, 0x10);
        assert_eq!(p.milliwatts(), 1.0);
        assert_eq!(p.dbm(), 0.0);
        assert!((power(0x03, 0xE8).dbm() - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_power_is_negative_infinity_but_serializes_finite() {
        let p = power(0, 0);
        assert_eq!(p.dbm(), f64::NEG_INFINITY);
        assert_eq!(p.dbm_finite(), -f64::MAX);
        let value = serde_json::to_value(p).unwrap();
        assert_eq!(value["milliwatts"], 0.0);
        assert_eq!(value["dbm"], -f64::MAX);
    }

    #[test]
    fn fixed_point_and_float() {
        assert_eq!(unsigned_fixed(0x01, 0x80), 1.5);
        assert_eq!(signed_word(0xFF, 0xFE), -2.0);
        assert_eq!(float32([0x3F, 0x80, 0x00, 0x00]), 1.0);
        assert_eq!(float32([0xC0, 0x00, 0x00, 0x00]), -2.0);
    }
}
