//! Specification compliance (bytes 131..=138) and extended module codes
//! (byte 164).

use crate::bitfield::{Flag, FlagBit};

use Specification as S;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specification {
    Extended,
    TenGBaseLrm,
    TenGBaseLr,
    TenGBaseSr,
    FortyGBaseCr4,
    FortyGBaseSr4,
    FortyGBaseLr4,
    FortyGActiveCableXlppi,
    Oc48LongReach,
    Oc48IntermediateReach,
    Oc48ShortReach,
    Sas24G,
    Sas12G,
    Sas6G,
    Sas3G,
    GigBaseT,
    GigBaseCx,
    GigBaseLx,
    GigBaseSx,
    VeryLongDistance,
    ShortDistance,
    IntermediateDistance,
    LongDistance,
    MediumDistance,
    LongwaveLaserLc,
    ElectricalInterEnclosure,
    ElectricalIntraEnclosure,
    ShortwaveLaserWithoutOfc,
    ShortwaveLaserWithOfc,
    LongwaveLaserLl,
    TwinAxialPair,
    ShieldedTwistedPair,
    MiniatureCoax,
    VideoCoax,
    MultimodeM6,
    MultimodeM5,
    MultimodeOm3,
    SingleMode,
    Fc1200MBps,
    Fc800MBps,
    Fc1600MBps,
    Fc400MBps,
    Fc3200MBps,
    Fc200MBps,
    Fc100MBps,
}

impl Flag for Specification {
    fn name(self) -> &'static str {
        match self {
            S::Extended => "Extended Specification Compliance (byte 192)",
            S::TenGBaseLrm => "10GBASE-LRM",
            S::TenGBaseLr => "10GBASE-LR",
            S::TenGBaseSr => "10GBASE-SR",
            S::FortyGBaseCr4 => "40GBASE-CR4",
            S::FortyGBaseSr4 => "40GBASE-SR4",
            S::FortyGBaseLr4 => "40GBASE-LR4",
            S::FortyGActiveCableXlppi => "40G Active Cable (XLPPI)",
            S::Oc48LongReach => "OC 48, long reach",
            S::Oc48IntermediateReach => "OC 48, intermediate reach",
            S::Oc48ShortReach => "OC 48, short reach",
            S::Sas24G => "SAS 24.0 Gbps",
            S::Sas12G => "SAS 12.0 Gbps",
            S::Sas6G => "SAS 6.0 Gbps",
            S::Sas3G => "SAS 3.0 Gbps",
            S::GigBaseT => "1000BASE-T",
            S::GigBaseCx => "1000BASE-CX",
            S::GigBaseLx => "1000BASE-LX",
            S::GigBaseSx => "1000BASE-SX",
            S::VeryLongDistance => "Very long distance (V)",
            S::ShortDistance => "Short distance (S)",
            S::IntermediateDistance => "Intermediate distance (I)",
            S::LongDistance => "Long distance (L)",
            S::MediumDistance => "Medium distance (M)",
            S::LongwaveLaserLc => "Longwave laser (LC)",
            S::ElectricalInterEnclosure => "Electrical inter-enclosure (EL)",
            S::ElectricalIntraEnclosure => "Electrical intra-enclosure (EL)",
            S::ShortwaveLaserWithoutOfc => "Shortwave laser w/o OFC (SN)",
            S::ShortwaveLaserWithOfc => "Shortwave laser w/ OFC (SL)",
            S::LongwaveLaserLl => "Longwave laser (LL)",
            S::TwinAxialPair => "Twin Axial Pair (TW)",
            S::ShieldedTwistedPair => "Shielded Twisted Pair (TP)",
            S::MiniatureCoax => "Miniature Coax (MI)",
            S::VideoCoax => "Video Coax (TV)",
            S::MultimodeM6 => "Multi-mode 62.5 um (M6)",
            S::MultimodeM5 => "Multi-mode 50 um (M5)",
            S::MultimodeOm3 => "Multi-mode 50 um (OM3)",
            S::SingleMode => "Single Mode (SM)",
            S::Fc1200MBps => "1200 MBps (per channel)",
            S::Fc800MBps => "800 MBps",
            S::Fc1600MBps => "1600 MBps (per channel)",
            S::Fc400MBps => "400 MBps",
            S::Fc3200MBps => "3200 MBps (per channel)",
            S::Fc200MBps => "200 MBps",
            S::Fc100MBps => "100 MBps",
        }
    }
}

const fn spec(byte: usize, bit: u8, flag: Specification) -> FlagBit<Specification> {
    FlagBit { byte, bit, flag }
}

pub const SPECIFICATION_COMPLIANCE: &[FlagBit<Specification>] = &[
    // 10/40/100G Ethernet
    spec(0, 7, S::Extended),
    spec(0, 6, S::TenGBaseLrm),
    spec(0, 5, S::TenGBaseLr),
    spec(0, 4, S::TenGBaseSr),
    spec(0, 3, S::FortyGBaseCr4),
    spec(0, 2, S::FortyGBaseSr4),
    spec(0, 1, S::FortyGBaseLr4),
    spec(0, 0, S::FortyGActiveCableXlppi),
    // SONET
    spec(1, 2, S::Oc48LongReach),
    spec(1, 1, S::Oc48IntermediateReach),
    spec(1, 0, S::Oc48ShortReach),
    // SAS/SATA
    spec(2, 7, S::Sas24G),
    spec(2, 6, S::Sas12G),
    spec(2, 5, S::Sas6G),
    spec(2, 4, S::Sas3G),
    // Gigabit Ethernet
    spec(3, 3, S::GigBaseT),
    spec(3, 2, S::GigBaseCx),
    spec(3, 1, S::GigBaseLx),
    spec(3, 0, S::GigBaseSx),
    // Fibre Channel link length and transmitter technology
    spec(4, 7, S::VeryLongDistance),
    spec(4, 6, S::ShortDistance),
    spec(4, 5, S::IntermediateDistance),
    spec(4, 4, S::LongDistance),
    spec(4, 3, S::MediumDistance),
    spec(4, 1, S::LongwaveLaserLc),
    spec(4, 0, S::ElectricalInterEnclosure),
    spec(5, 7, S::ElectricalIntraEnclosure),
    spec(5, 6, S::ShortwaveLaserWithoutOfc),
    spec(5, 5, S::ShortwaveLaserWithOfc),
    spec(5, 4, S::LongwaveLaserLl),
    // Fibre Channel transmission media
    spec(6, 7, S::TwinAxialPair),
    spec(6, 6, S::ShieldedTwistedPair),
    spec(6, 5, S::MiniatureCoax),
    spec(6, 4, S::VideoCoax),
    spec(6, 3, S::MultimodeM6),
    spec(6, 2, S::MultimodeM5),
    spec(6, 1, S::MultimodeOm3),
    spec(6, 0, S::SingleMode),
    // Fibre Channel speed
    spec(7, 7, S::Fc1200MBps),
    spec(7, 6, S::Fc800MBps),
    spec(7, 5, S::Fc1600MBps),
    spec(7, 4, S::Fc400MBps),
    spec(7, 3, S::Fc3200MBps),
    spec(7, 2, S::Fc200MBps),
    spec(7, 1, S::Fc100MBps),
];

/// InfiniBand data rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedModuleCode {
    Hdr,
    Edr,
    Fdr,
    Qdr,
    Ddr,
    Sdr,
}

impl Flag for ExtendedModuleCode {
    fn name(self) -> &'static str {
        match self {
            ExtendedModuleCode::Hdr => "HDR",
            ExtendedModuleCode::Edr => "EDR",
            ExtendedModuleCode::Fdr => "FDR",
            ExtendedModuleCode::Qdr => "QDR",
            ExtendedModuleCode::Ddr => "DDR",
            ExtendedModuleCode::Sdr => "SDR",
        }
    }
}

pub const EXTENDED_MODULE_CODES: &[FlagBit<ExtendedModuleCode>] = &[
    FlagBit { byte: 0, bit: 5, flag: ExtendedModuleCode::Hdr },
    FlagBit { byte: 0, bit: 4, flag: ExtendedModuleCode::Edr },
    FlagBit { byte: 0, bit: 3, flag: ExtendedModuleCode::Fdr },
    FlagBit { byte: 0, bit: 2, flag: ExtendedModuleCode::Qdr },
    FlagBit { byte: 0, bit: 1, flag: ExtendedModuleCode::Ddr },
    FlagBit { byte: 0, bit: 0, flag: ExtendedModuleCode::Sdr },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::decode_flags;

    #[test]
    fn direct_attach_compliance() {
        let raw = [0x88, 0, 0, 0, 0, 0, 0, 0];
        let set = decode_flags(&raw, SPECIFICATION_COMPLIANCE);
        assert!(set.contains(Specification::FortyGBaseCr4));
        assert!(set.contains(Specification::Extended));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn longwave_variants_live_in_different_bytes() {
        let raw = [0, 0, 0, 0, 0b0000_0010, 0b0001_0000, 0, 0];
        let set = decode_flags(&raw, SPECIFICATION_COMPLIANCE);
        assert_eq!(set.names(), vec!["Longwave laser (LC)", "Longwave laser (LL)"]);
    }

    #[test]
    fn infiniband_rates() {
        let set = decode_flags(&[0x03], EXTENDED_MODULE_CODES);
        assert_eq!(set.names(), vec!["DDR", "SDR"]);
    }
}
