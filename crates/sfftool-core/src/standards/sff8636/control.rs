//! Control bytes 86..=99 of the lower page.

use serde::Serialize;

use crate::bitfield::BitField;

/// Two-bit rate select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RateSelect {
    pub msb: bool,
    pub lsb: bool,
}

impl RateSelect {
    pub fn value(self) -> u8 {
        (u8::from(self.msb) << 1) | u8::from(self.lsb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChannelControl {
    pub tx_disable: bool,
    pub rx_rate_select: RateSelect,
    pub tx_rate_select: RateSelect,
    pub tx_cdr: bool,
    pub rx_cdr: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Control {
    pub channels: [ChannelControl; 4],
    pub power_class8_enable: bool,
    pub power_class5_to_7_enable: bool,
    pub low_power_mode: bool,
    pub power_override: bool,
    pub lp_mode_tx_dis: bool,
    pub intl_los_l: bool,
}

// Bytes 89..=92 and 94..=97 are reserved or deprecated.
pub const CONTROL: &[BitField<Control>] = &[
    BitField { byte: 0, bit: 3, set: |c, v| c.channels[3].tx_disable = v },
    BitField { byte: 0, bit: 2, set: |c, v| c.channels[2].tx_disable = v },
    BitField { byte: 0, bit: 1, set: |c, v| c.channels[1].tx_disable = v },
    BitField { byte: 0, bit: 0, set: |c, v| c.channels[0].tx_disable = v },
    BitField { byte: 1, bit: 7, set: |c, v| c.channels[3].rx_rate_select.msb = v },
    BitField { byte: 1, bit: 6, set: |c, v| c.channels[3].rx_rate_select.lsb = v },
    BitField { byte: 1, bit: 5, set: |c, v| c.channels[2].rx_rate_select.msb = v },
    BitField { byte: 1, bit: 4, set: |c, v| c.channels[2].rx_rate_select.lsb = v },
    BitField { byte: 1, bit: 3, set: |c, v| c.channels[1].rx_rate_select.msb = v },
    BitField { byte: 1, bit: 2, set: |c, v| c.channels[1].rx_rate_select.lsb = v },
    BitField { byte: 1, bit: 1, set: |c, v| c.channels[0].rx_rate_select.msb = v },
    BitField { byte: 1, bit: 0, set: |c, v| c.channels[0].rx_rate_select.lsb = v },
    BitField { byte: 2, bit: 7, set: |c, v| c.channels[3].tx_rate_select.msb = v },
    BitField { byte: 2, bit: 6, set: |c, v| c.channels[3].tx_rate_select.lsb = v },
    BitField { byte: 2, bit: 5, set: |c, v| c.channels[2].tx_rate_select.msb = v },
    BitField { byte: 2, bit: 4, set: |c, v| c.channels[2].tx_rate_select.lsb = v },
    BitField { byte: 2, bit: 3, set: |c, v| c.channels[1].tx_rate_select.msb = v },
    BitField { byte: 2, bit: 2, set: |c, v| c.channels[1].tx_rate_select.lsb = v },
    BitField { byte: 2, bit: 1, set: |c, v| c.channels[0].tx_rate_select.msb = v },
    BitField { byte: 2, bit: 0, set: |c, v| c.channels[0].tx_rate_select.lsb = v },
    BitField { byte: 7, bit: 3, set: |c, v| c.power_class8_enable = v },
    BitField { byte: 7, bit: 2, set: |c, v| c.power_class5_to_7_enable = v },
    BitField { byte: 7, bit: 1, set: |c, v| c.low_power_mode = v },
    BitField { byte: 7, bit: 0, set: |c, v| c.power_override = v },
    BitField { byte: 12, bit: 7, set: |c, v| c.channels[3].tx_cdr = v },
    BitField { byte: 12, bit: 6, set: |c, v| c.channels[2].tx_cdr = v },
    BitField { byte: 12, bit: 5, set: |c, v| c.channels[1].tx_cdr = v },
    BitField { byte: 12, bit: 4, set: |c, v| c.channels[0].tx_cdr = v },
    BitField { byte: 12, bit: 3, set: |c, v| c.channels[3].rx_cdr = v },
    BitField { byte: 12, bit: 2, set: |c, v| c.channels[2].rx_cdr = v },
    BitField { byte: 12, bit: 1, set: |c, v| c.channels[1].rx_cdr = v },
    BitField { byte: 12, bit: 0, set: |c, v| c.channels[0].rx_cdr = v },
    BitField { byte: 13, bit: 1, set: |c, v| c.lp_mode_tx_dis = v },
    BitField { byte: 13, bit: 0, set: |c, v| c.intl_los_l = v },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::decode_fields;

    #[test]
    fn per_channel_controls() {
        let mut raw = [0u8; 14];
        raw[0] = 0b0000_0100;
        raw[1] = 0b1100_0000;
        raw[7] = 0b0000_0010;
        raw[12] = 0b0001_0001;
        let control: Control = decode_fields(&raw, CONTROL);
        assert!(control.channels[2].tx_disable);
        assert_eq!(control.channels[3].rx_rate_select.value(), 3);
        assert_eq!(control.channels[0].rx_rate_select.value(), 0);
        assert!(control.low_power_mode);
        assert!(control.channels[0].tx_cdr);
        assert!(control.channels[0].rx_cdr);
        assert!(!control.channels[1].rx_cdr);
    }
}
