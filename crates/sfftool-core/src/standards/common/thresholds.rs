use serde::Serialize;

use super::reader::EepromReader;
use crate::error::DecodeError;
use crate::units::Power;

/// Alarm and warning limits for one monitored quantity.
///
/// Images store the four words in the order high alarm, low alarm, high
/// warning, low warning.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Thresholds<T> {
    pub high_alarm: T,
    pub low_alarm: T,
    pub high_warning: T,
    pub low_warning: T,
}

pub type PowerThresholds = Thresholds<Power>;

impl<T> Thresholds<T> {
    /// Read four consecutive words starting at `offset`.
    pub fn read(
        reader: &EepromReader<'_>,
        offset: usize,
        convert: fn(u8, u8) -> T,
    ) -> Result<Self, DecodeError> {
        let word = |index: usize| -> Result<T, DecodeError> {
            let start = offset + index * 2;
            let [msb, lsb] = reader.read_array::<2>(start..start + 2)?;
            Ok(convert(msb, lsb))
        };
        Ok(Self {
            high_alarm: word(0)?,
            low_alarm: word(1)?,
            high_warning: word(2)?,
            low_warning: word(3)?,
        })
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Thresholds<U> {
        Thresholds {
            high_alarm: f(self.high_alarm),
            low_alarm: f(self.low_alarm),
            high_warning: f(self.high_warning),
            low_warning: f(self.low_warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Thresholds;
    use crate::standards::common::EepromReader;
    use crate::units;

    #[test]
    fn reads_alarm_then_warning_order() {
        let raw = [0x5A, 0x00, 0xF6, 0x00, 0x55, 0x00, 0xFB, 0x00];
        let reader = EepromReader::new(&raw);
        let t = Thresholds::read(&reader, 0, units::temperature).unwrap();
        assert_eq!(t.high_alarm, 90.0);
        assert_eq!(t.low_alarm, -10.0);
        assert_eq!(t.high_warning, 85.0);
        assert_eq!(t.low_warning, -5.0);
    }

    #[test]
    fn short_image_fails() {
        let raw = [0u8; 7];
        let reader = EepromReader::new(&raw);
        assert!(Thresholds::read(&reader, 0, units::voltage).is_err());
    }

    #[test]
    fn map_converts_every_value() {
        let t = Thresholds {
            high_alarm: 1,
            low_alarm: 2,
            high_warning: 3,
            low_warning: 4,
        };
        let doubled = t.map(|v| v * 2);
        assert_eq!(doubled.low_warning, 8);
    }
}
