use crate::bitfield::{Flag, FlagBit};

use ComplianceCode as C;

/// Transceiver compliance codes (SFF-8472 Table 5-3, bytes 3..=10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceCode {
    TenGBaseEr,
    TenGBaseLrm,
    TenGBaseLr,
    TenGBaseSr,
    InfinibandSx,
    InfinibandLx,
    InfinibandCopperActive,
    InfinibandCopperPassive,
    EsconMmfLed,
    EsconMmfLaser,
    Oc192ShortReach,
    SonetReachBit1,
    SonetReachBit2,
    Oc48LongReach,
    Oc48IntermediateReach,
    Oc48ShortReach,
    Oc12LongReach,
    Oc12IntermediateReach,
    Oc12ShortReach,
    Oc3LongReach,
    Oc3IntermediateReach,
    Oc3ShortReach,
    BasePx,
    BaseBx10,
    HundredBaseFx,
    HundredBaseLx,
    GigabitBaseT,
    GigabitBaseCx,
    GigabitBaseLx,
    GigabitBaseSx,
    VeryLongDistance,
    ShortDistance,
    IntermediateDistance,
    LongDistance,
    MediumDistance,
    ShortwaveLaserLinearRx,
    LongwaveLaserLc,
    ElectricalInterEnclosure,
    ElectricalIntraEnclosure,
    ShortwaveLaserWithoutOfc,
    ShortwaveLaserWithOfc,
    LongwaveLaserLl,
    ActiveCable,
    PassiveCable,
    TwinAxialPair,
    TwistedPair,
    MiniatureCoax,
    VideoCoax,
    MultimodeM6,
    MultimodeM5,
    SingleMode,
    Speed1200MBps,
    Speed800MBps,
    Speed1600MBps,
    Speed400MBps,
    Speed3200MBps,
    Speed200MBps,
    Speed100MBps,
}

impl Flag for ComplianceCode {
    fn name(self) -> &'static str {
        use ComplianceCode::*;
        match self {
            TenGBaseEr => "10G Base-ER",
            TenGBaseLrm => "10G Base-LRM",
            TenGBaseLr => "10G Base-LR",
            TenGBaseSr => "10G Base-SR",
            InfinibandSx => "1X SX",
            InfinibandLx => "1X LX",
            InfinibandCopperActive => "1X Copper Active",
            InfinibandCopperPassive => "1X Copper Passive",
            EsconMmfLed => "ESCON MMF, 1310nm LED",
            EsconMmfLaser => "ESCON MMF, 1310nm Laser",
            Oc192ShortReach => "OC-192, short reach",
            SonetReachBit1 => "SONET reach specifier bit 1",
            SonetReachBit2 => "SONET reach specifier bit 2",
            Oc48LongReach => "OC-48, long reach",
            Oc48IntermediateReach => "OC-48, intermediate reach",
            Oc48ShortReach => "OC-48, short reach",
            Oc12LongReach => "OC-12, single mode, long reach",
            Oc12IntermediateReach => "OC-12, single mode, intermediate reach",
            Oc12ShortReach => "OC-12, short reach",
            Oc3LongReach => "OC-3, single mode, long reach",
            Oc3IntermediateReach => "OC-3, single mode, intermediate reach",
            Oc3ShortReach => "OC-3, single mode, short reach",
            BasePx => "BASE-PX",
            BaseBx10 => "BASE-BX10",
            HundredBaseFx => "100BASE-FX",
            HundredBaseLx => "100BASE-LX/LX10",
            GigabitBaseT => "1000BASE-T",
            GigabitBaseCx => "1000BASE-CX",
            GigabitBaseLx => "1000BASE-LX",
            GigabitBaseSx => "1000BASE-SX",
            VeryLongDistance => "very long distance (V)",
            ShortDistance => "short distance (S)",
            IntermediateDistance => "intermediate distance (I)",
            LongDistance => "long distance (L)",
            MediumDistance => "medium distance (M)",
            ShortwaveLaserLinearRx => "Shortwave laser, linear Rx (SA)",
            LongwaveLaserLc => "Longwave laser (LC)",
            ElectricalInterEnclosure => "Electrical inter-enclosure (EL)",
            ElectricalIntraEnclosure => "Electrical intra-enclosure (EL)",
            ShortwaveLaserWithoutOfc => "Shortwave laser w/o OFC (SN)",
            ShortwaveLaserWithOfc => "Shortwave laser with OFC (SL)",
            LongwaveLaserLl => "Longwave laser (LL)",
            ActiveCable => "Active Cable",
            PassiveCable => "Passive Cable",
            TwinAxialPair => "Twin Axial Pair (TW)",
            TwistedPair => "Twisted Pair (TP)",
            MiniatureCoax => "Miniature Coax (MI)",
            VideoCoax => "Video Coax (TV)",
            MultimodeM6 => "Multimode, 62.5um (M6)",
            MultimodeM5 => "Multimode, 50um (M5, M5E)",
            SingleMode => "Single Mode (SM)",
            Speed1200MBps => "1200 MBps",
            Speed800MBps => "800 MBps",
            Speed1600MBps => "1600 MBps",
            Speed400MBps => "400 MBps",
            Speed3200MBps => "3200 MBps",
            Speed200MBps => "200 MBps",
            Speed100MBps => "100 MBps",
        }
    }
}

const fn code(byte: usize, bit: u8, flag: ComplianceCode) -> FlagBit<ComplianceCode> {
    FlagBit { byte, bit, flag }
}

/// Bit positions relative to the eight compliance bytes.
pub const TRANSCEIVER_COMPLIANCE: &[FlagBit<ComplianceCode>] = &[
    code(0, 7, C::TenGBaseEr),
    code(0, 6, C::TenGBaseLrm),
    code(0, 5, C::TenGBaseLr),
    code(0, 4, C::TenGBaseSr),
    code(0, 3, C::InfinibandSx),
    code(0, 2, C::InfinibandLx),
    code(0, 1, C::InfinibandCopperActive),
    code(0, 0, C::InfinibandCopperPassive),
    code(1, 7, C::EsconMmfLed),
    code(1, 6, C::EsconMmfLaser),
    code(1, 5, C::Oc192ShortReach),
    code(1, 4, C::SonetReachBit1),
    code(1, 3, C::SonetReachBit2),
    code(1, 2, C::Oc48LongReach),
    code(1, 1, C::Oc48IntermediateReach),
    code(1, 0, C::Oc48ShortReach),
    code(2, 6, C::Oc12LongReach),
    code(2, 5, C::Oc12IntermediateReach),
    code(2, 4, C::Oc12ShortReach),
    code(2, 2, C::Oc3LongReach),
    code(2, 1, C::Oc3IntermediateReach),
    code(2, 0, C::Oc3ShortReach),
    code(3, 7, C::BasePx),
    code(3, 6, C::BaseBx10),
    code(3, 5, C::HundredBaseFx),
    code(3, 4, C::HundredBaseLx),
    code(3, 3, C::GigabitBaseT),
    code(3, 2, C::GigabitBaseCx),
    code(3, 1, C::GigabitBaseLx),
    code(3, 0, C::GigabitBaseSx),
    code(4, 7, C::VeryLongDistance),
    code(4, 6, C::ShortDistance),
    code(4, 5, C::IntermediateDistance),
    code(4, 4, C::LongDistance),
    code(4, 3, C::MediumDistance),
    code(4, 2, C::ShortwaveLaserLinearRx),
    code(4, 1, C::LongwaveLaserLc),
    code(4, 0, C::ElectricalInterEnclosure),
    code(5, 7, C::ElectricalIntraEnclosure),
    code(5, 6, C::ShortwaveLaserWithoutOfc),
    code(5, 5, C::ShortwaveLaserWithOfc),
    code(5, 4, C::LongwaveLaserLl),
    code(5, 3, C::ActiveCable),
    code(5, 2, C::PassiveCable),
    code(6, 7, C::TwinAxialPair),
    code(6, 6, C::TwistedPair),
    code(6, 5, C::MiniatureCoax),
    code(6, 4, C::VideoCoax),
    code(6, 3, C::MultimodeM6),
    code(6, 2, C::MultimodeM5),
    code(6, 0, C::SingleMode),
    code(7, 7, C::Speed1200MBps),
    code(7, 6, C::Speed800MBps),
    code(7, 5, C::Speed1600MBps),
    code(7, 4, C::Speed400MBps),
    code(7, 3, C::Speed3200MBps),
    code(7, 2, C::Speed200MBps),
    code(7, 0, C::Speed100MBps),
];

/// Cable specification compliance, stored in the wavelength bytes of cables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CableSpecification {
    FcPi4Limiting,
    Sff8431Limiting,
    FcPi4AppendixH,
    Sff8431AppendixE,
}

impl Flag for CableSpecification {
    fn name(self) -> &'static str {
        match self {
            CableSpecification::FcPi4Limiting => "Compliant to FC-PI-4 Limiting",
            CableSpecification::Sff8431Limiting => "Compliant to SFF-8431 Limiting",
            CableSpecification::FcPi4AppendixH => "Compliant to FC-PI-4 Appendix H",
            CableSpecification::Sff8431AppendixE => "Compliant to SFF-8431 Appendix E",
        }
    }
}

pub const PASSIVE_CABLE_SPECIFICATION: &[FlagBit<CableSpecification>] = &[
    FlagBit { byte: 0, bit: 1, flag: CableSpecification::FcPi4AppendixH },
    FlagBit { byte: 0, bit: 0, flag: CableSpecification::Sff8431AppendixE },
];

pub const ACTIVE_CABLE_SPECIFICATION: &[FlagBit<CableSpecification>] = &[
    FlagBit { byte: 0, bit: 3, flag: CableSpecification::FcPi4Limiting },
    FlagBit { byte: 0, bit: 2, flag: CableSpecification::Sff8431Limiting },
    FlagBit { byte: 0, bit: 1, flag: CableSpecification::FcPi4AppendixH },
    FlagBit { byte: 0, bit: 0, flag: CableSpecification::Sff8431AppendixE },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::decode_flags;

    #[test]
    fn cable_bits_live_in_byte_five() {
        let mut raw = [0u8; 8];
        raw[5] = 0b0000_1000;
        let set = decode_flags(&raw, TRANSCEIVER_COMPLIANCE);
        assert!(set.contains(ComplianceCode::ActiveCable));
        assert!(!set.contains(ComplianceCode::PassiveCable));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ten_gig_lr() {
        let raw = [0b0010_0000, 0, 0, 0, 0, 0, 0, 0];
        let set = decode_flags(&raw, TRANSCEIVER_COMPLIANCE);
        assert_eq!(set.names(), vec!["10G Base-LR"]);
    }

    #[test]
    fn passive_table_ignores_limiting_bits() {
        let set = decode_flags(&[0b0000_1111], PASSIVE_CABLE_SPECIFICATION);
        assert_eq!(set.len(), 2);
        let set = decode_flags(&[0b0000_1111], ACTIVE_CABLE_SPECIFICATION);
        assert_eq!(set.len(), 4);
    }
}
