use serde::Serialize;

use crate::bitfield::BitField;
use crate::vocab::PowerClass;

/// Implemented optional signals (A0h bytes 64..=65).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Options {
    pub power_level3_requirement: bool,
    pub paging_implemented: bool,
    pub retimer_or_cdr_present: bool,
    pub cooled_transceiver: bool,
    pub power_level2_requirement: bool,
    pub linear_receiver_output: bool,
    pub receiver_decision_threshold: bool,
    pub tunable_transmitter: bool,
    pub rate_select: bool,
    pub tx_disable: bool,
    pub tx_fault: bool,
    pub rx_los_inverted: bool,
    pub rx_los: bool,
}

impl Options {
    pub fn power_class(&self) -> PowerClass {
        if self.power_level3_requirement {
            PowerClass::new(3)
        } else if self.power_level2_requirement {
            PowerClass::new(2)
        } else {
            PowerClass::new(1)
        }
    }
}

/// Bit positions relative to the two option bytes. Byte 0 bits 7..6 and
/// byte 1 bit 0 are unallocated.
pub const OPTIONS: &[BitField<Options>] = &[
    BitField { byte: 0, bit: 5, set: |o, v| o.power_level3_requirement = v },
    BitField { byte: 0, bit: 4, set: |o, v| o.paging_implemented = v },
    BitField { byte: 0, bit: 3, set: |o, v| o.retimer_or_cdr_present = v },
    BitField { byte: 0, bit: 2, set: |o, v| o.cooled_transceiver = v },
    BitField { byte: 0, bit: 1, set: |o, v| o.power_level2_requirement = v },
    BitField { byte: 0, bit: 0, set: |o, v| o.linear_receiver_output = v },
    BitField { byte: 1, bit: 7, set: |o, v| o.receiver_decision_threshold = v },
    BitField { byte: 1, bit: 6, set: |o, v| o.tunable_transmitter = v },
    BitField { byte: 1, bit: 5, set: |o, v| o.rate_select = v },
    BitField { byte: 1, bit: 4, set: |o, v| o.tx_disable = v },
    BitField { byte: 1, bit: 3, set: |o, v| o.tx_fault = v },
    BitField { byte: 1, bit: 2, set: |o, v| o.rx_los_inverted = v },
    BitField { byte: 1, bit: 1, set: |o, v| o.rx_los = v },
];

#[cfg(test)]
mod tests {
    use super::{OPTIONS, Options};
    use crate::bitfield::decode_fields;

    #[test]
    fn power_class_prefers_level_three() {
        let options: Options = decode_fields(&[0b0010_0010, 0], OPTIONS);
        assert!(options.power_level3_requirement);
        assert!(options.power_level2_requirement);
        assert_eq!(options.power_class().level(), 3);
    }

    #[test]
    fn default_power_class_is_one() {
        let options: Options = decode_fields(&[0, 0b0001_1010], OPTIONS);
        assert_eq!(options.power_class().level(), 1);
        assert!(options.tx_disable);
        assert!(options.tx_fault);
        assert!(options.rx_los);
        assert!(!options.rx_los_inverted);
    }
}
