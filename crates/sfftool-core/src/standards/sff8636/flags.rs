//! Interrupt flags (lower page bytes 3..=21) and their masks (bytes 100..=105).
//!
//! Channel status bits pack two channels' worth of one signal per nibble;
//! monitor alarms pack one channel's high alarm, low alarm, high warning and
//! low warning per nibble, channel 1 in the upper nibble of the first byte.

use serde::Serialize;

use crate::bitfield::BitField;

/// High/low alarm and warning bits of one monitored quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AlarmFlags {
    pub high_alarm: bool,
    pub low_alarm: bool,
    pub high_warning: bool,
    pub low_warning: bool,
}

impl AlarmFlags {
    pub fn any(&self) -> bool {
        self.high_alarm || self.low_alarm || self.high_warning || self.low_warning
    }
}

const ALARMS_FIRST_UPPER: &[BitField<AlarmFlags>] = &[
    BitField { byte: 0, bit: 7, set: |a, v| a.high_alarm = v },
    BitField { byte: 0, bit: 6, set: |a, v| a.low_alarm = v },
    BitField { byte: 0, bit: 5, set: |a, v| a.high_warning = v },
    BitField { byte: 0, bit: 4, set: |a, v| a.low_warning = v },
];

const ALARMS_FIRST_LOWER: &[BitField<AlarmFlags>] = &[
    BitField { byte: 0, bit: 3, set: |a, v| a.high_alarm = v },
    BitField { byte: 0, bit: 2, set: |a, v| a.low_alarm = v },
    BitField { byte: 0, bit: 1, set: |a, v| a.high_warning = v },
    BitField { byte: 0, bit: 0, set: |a, v| a.low_warning = v },
];

const ALARMS_SECOND_UPPER: &[BitField<AlarmFlags>] = &[
    BitField { byte: 1, bit: 7, set: |a, v| a.high_alarm = v },
    BitField { byte: 1, bit: 6, set: |a, v| a.low_alarm = v },
    BitField { byte: 1, bit: 5, set: |a, v| a.high_warning = v },
    BitField { byte: 1, bit: 4, set: |a, v| a.low_warning = v },
];

const ALARMS_SECOND_LOWER: &[BitField<AlarmFlags>] = &[
    BitField { byte: 1, bit: 3, set: |a, v| a.high_alarm = v },
    BitField { byte: 1, bit: 2, set: |a, v| a.low_alarm = v },
    BitField { byte: 1, bit: 1, set: |a, v| a.high_warning = v },
    BitField { byte: 1, bit: 0, set: |a, v| a.low_warning = v },
];

/// Free-side temperature and voltage alarms sit in the upper nibble.
pub const FREE_SIDE_ALARMS: &[BitField<AlarmFlags>] = ALARMS_FIRST_UPPER;

/// Per-channel alarm tables over a two-byte monitor flag pair.
pub const CHANNEL_ALARMS: [&[BitField<AlarmFlags>]; 4] = [
    ALARMS_FIRST_UPPER,
    ALARMS_FIRST_LOWER,
    ALARMS_SECOND_UPPER,
    ALARMS_SECOND_LOWER,
];

/// Loss-of-signal, fault and loss-of-lock indications of one channel. The
/// same layout serves both the flags and their masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChannelStatus {
    pub tx_los: bool,
    pub rx_los: bool,
    pub adaptive_eq_fault: bool,
    pub tx_fault: bool,
    pub tx_lol: bool,
    pub rx_lol: bool,
}

pub const CHANNEL_STATUS: &[BitField<[ChannelStatus; 4]>] = &[
    BitField { byte: 0, bit: 7, set: |c, v| c[3].tx_los = v },
    BitField { byte: 0, bit: 6, set: |c, v| c[2].tx_los = v },
    BitField { byte: 0, bit: 5, set: |c, v| c[1].tx_los = v },
    BitField { byte: 0, bit: 4, set: |c, v| c[0].tx_los = v },
    BitField { byte: 0, bit: 3, set: |c, v| c[3].rx_los = v },
    BitField { byte: 0, bit: 2, set: |c, v| c[2].rx_los = v },
    BitField { byte: 0, bit: 1, set: |c, v| c[1].rx_los = v },
    BitField { byte: 0, bit: 0, set: |c, v| c[0].rx_los = v },
    BitField { byte: 1, bit: 7, set: |c, v| c[3].adaptive_eq_fault = v },
    BitField { byte: 1, bit: 6, set: |c, v| c[2].adaptive_eq_fault = v },
    BitField { byte: 1, bit: 5, set: |c, v| c[1].adaptive_eq_fault = v },
    BitField { byte: 1, bit: 4, set: |c, v| c[0].adaptive_eq_fault = v },
    BitField { byte: 1, bit: 3, set: |c, v| c[3].tx_fault = v },
    BitField { byte: 1, bit: 2, set: |c, v| c[2].tx_fault = v },
    BitField { byte: 1, bit: 1, set: |c, v| c[1].tx_fault = v },
    BitField { byte: 1, bit: 0, set: |c, v| c[0].tx_fault = v },
    BitField { byte: 2, bit: 7, set: |c, v| c[3].tx_lol = v },
    BitField { byte: 2, bit: 6, set: |c, v| c[2].tx_lol = v },
    BitField { byte: 2, bit: 5, set: |c, v| c[1].tx_lol = v },
    BitField { byte: 2, bit: 4, set: |c, v| c[0].tx_lol = v },
    BitField { byte: 2, bit: 3, set: |c, v| c[3].rx_lol = v },
    BitField { byte: 2, bit: 2, set: |c, v| c[2].rx_lol = v },
    BitField { byte: 2, bit: 1, set: |c, v| c[1].rx_lol = v },
    BitField { byte: 2, bit: 0, set: |c, v| c[0].rx_lol = v },
];

/// Readiness bits sharing the temperature flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReadinessFlags {
    pub tc_readiness: bool,
    pub initialization_complete: bool,
}

pub const READINESS: &[BitField<ReadinessFlags>] = &[
    BitField { byte: 0, bit: 1, set: |r, v| r.tc_readiness = v },
    BitField { byte: 0, bit: 0, set: |r, v| r.initialization_complete = v },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChannelFlags {
    #[serde(flatten)]
    pub status: ChannelStatus,
    pub rx_power: AlarmFlags,
    pub bias: AlarmFlags,
    pub tx_power: AlarmFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InterruptFlags {
    pub channels: [ChannelFlags; 4],
    pub temperature: AlarmFlags,
    pub voltage: AlarmFlags,
    #[serde(flatten)]
    pub readiness: ReadinessFlags,
}

/// Masks suppress IntL assertion for the matching flag; a set bit masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InterruptMasks {
    pub channels: [ChannelStatus; 4],
    pub temperature: AlarmFlags,
    pub voltage: AlarmFlags,
    pub tc_readiness: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::decode_fields;

    #[test]
    fn channel_status_nibbles() {
        // Tx LOS on channel 4, Rx LOS on channel 1, Tx fault on channel 2.
        let status: [ChannelStatus; 4] = decode_fields(&[0x81, 0x02, 0x00], CHANNEL_STATUS);
        assert!(status[3].tx_los);
        assert!(status[0].rx_los);
        assert!(status[1].tx_fault);
        assert!(!status[0].tx_los);
        assert!(!status[3].rx_los);
    }

    #[test]
    fn channel_alarm_nibbles() {
        let pair = [0b0100_0001, 0b1000_0000];
        let first: AlarmFlags = decode_fields(&pair, CHANNEL_ALARMS[0]);
        let second: AlarmFlags = decode_fields(&pair, CHANNEL_ALARMS[1]);
        let third: AlarmFlags = decode_fields(&pair, CHANNEL_ALARMS[2]);
        let fourth: AlarmFlags = decode_fields(&pair, CHANNEL_ALARMS[3]);
        assert!(first.low_alarm && !first.high_alarm);
        assert!(second.low_warning);
        assert!(third.high_alarm);
        assert!(!fourth.any());
    }
}
