use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Module power class, 1 through 7.
///
/// Classes 5 to 7 only exist in the SFF-8636 extended identifier.
///
/// # Examples
/// ```
/// use sfftool_core::vocab::PowerClass;
///
/// let class = PowerClass::new(4);
/// assert_eq!(class.max_power_watts(), 3.5);
/// assert_eq!(class.to_string(), "Power Level 4 (max 3.50 W)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerClass(u8);

impl PowerClass {
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 7;

    /// Levels outside 1..=7 are clamped.
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN_LEVEL, Self::MAX_LEVEL))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn max_power_watts(self) -> f64 {
        match self.0 {
            1 => 1.5,
            2 => 2.0,
            3 => 2.5,
            4 => 3.5,
            5 => 4.0,
            6 => 4.5,
            _ => 5.0,
        }
    }
}

impl Default for PowerClass {
    fn default() -> Self {
        Self::new(Self::MIN_LEVEL)
    }
}

impl fmt::Display for PowerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Power Level {} (max {:.2} W)",
            self.0,
            self.max_power_watts()
        )
    }
}

impl Serialize for PowerClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PowerClass", 2)?;
        state.serialize_field("power_level", &self.0)?;
        state.serialize_field("max_power_watts", &self.max_power_watts())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::PowerClass;

    #[test]
    fn watts_per_level() {
        let watts: Vec<f64> = (1..=7)
            .map(|level| PowerClass::new(level).max_power_watts())
            .collect();
        assert_eq!(watts, vec![1.5, 2.0, 2.5, 3.5, 4.0, 4.5, 5.0]);
    }

    #[test]
    fn out_of_range_levels_clamp() {
        assert_eq!(PowerClass::new(0).level(), 1);
        assert_eq!(PowerClass::new(9).level(), 7);
    }

    #[test]
    fn serializes_level_and_watts() {
        let value = serde_json::to_value(PowerClass::new(2)).unwrap();
        assert_eq!(value["power_level"], 2);
        assert_eq!(value["max_power_watts"], 2.0);
    }
}
