use std::fmt;

use serde::{Serialize, Serializer};

use super::serialize_code;

/// Extended specification compliance code (SFF-8024 Table 4-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedSpecificationCompliance(pub u8);

impl ExtendedSpecificationCompliance {
    pub fn code(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0x00 => "Unspecified",
            0x01 => "100G AOC or 25GAUI C2M AOC (BER 5x10^-5)",
            0x02 => "100GBASE-SR4 or 25GBASE-SR",
            0x03 => "100GBASE-LR4 or 25GBASE-LR",
            0x04 => "100GBASE-ER4 or 25GBASE-ER",
            0x05 => "100GBASE-SR10",
            0x06 => "100G CWDM4",
            0x07 => "100G PSM4 Parallel SMF",
            0x08 => "100G ACC or 25GAUI C2M ACC (BER 5x10^-5)",
            0x09 => "Obsolete",
            0x0B => "100GBASE-CR4, 25GBASE-CR CA-25G-L or 50GBASE-CR2 with RS FEC",
            0x0C => "25GBASE-CR CA-25G-S or 50GBASE-CR2 with BASE-R FEC",
            0x0D => "25GBASE-CR CA-25G-N or 50GBASE-CR2 with no FEC",
            0x10 => "40GBASE-ER4",
            0x11 => "4 x 10GBASE-SR",
            0x12 => "40G PSM4 Parallel SMF",
            0x13 => "G959.1 profile P1I1-2D1",
            0x14 => "G959.1 profile P1S1-2D2",
            0x15 => "G959.1 profile P1L1-2D2",
            0x16 => "10GBASE-T with SFI electrical interface",
            0x17 => "100G CLR4",
            0x18 => "100G AOC or 25GAUI C2M AOC (BER 10^-12)",
            0x19 => "100G ACC or 25GAUI C2M ACC (BER 10^-12)",
            0x1A => "100GE-DWDM2",
            0x1B => "100G 1550nm WDM (4 wavelengths)",
            0x1C => "10GBASE-T Short Reach (30 meters)",
            0x1D => "5GBASE-T",
            0x1E => "2.5GBASE-T",
            0x1F => "40G SWDM4",
            0x20 => "100G SWDM4",
            0x21 => "100G PAM4 BiDi",
            0x22 => "4WDM-10 MSA",
            0x23 => "4WDM-20 MSA",
            0x24 => "4WDM-40 MSA",
            0x25 => "100GBASE-DR",
            0x26 => "100G-FR or 100GBASE-FR1",
            0x27 => "100G-LR or 100GBASE-LR1",
            0x30 => "ACC 50GAUI, 100GAUI-2 or 200GAUI-4 C2M (BER 10^-6)",
            0x31 => "AOC 50GAUI, 100GAUI-2 or 200GAUI-4 C2M (BER 10^-6)",
            0x32 => "ACC 50GAUI, 100GAUI-2 or 200GAUI-4 C2M (BER 2.6x10^-4)",
            0x33 => "AOC 50GAUI, 100GAUI-2 or 200GAUI-4 C2M (BER 2.6x10^-4)",
            0x40 => "50GBASE-CR, 100GBASE-CR2 or 200GBASE-CR4",
            0x41 => "50GBASE-SR, 100GBASE-SR2 or 200GBASE-SR4",
            0x42 => "50GBASE-FR or 200GBASE-DR4",
            0x43 => "200GBASE-FR4",
            0x44 => "200G 1550 nm PSM4",
            0x45 => "50GBASE-LR",
            0x46 => "200GBASE-LR4",
            0x50 => "64GFC EA",
            0x51 => "64GFC SW",
            0x52 => "64GFC LW",
            0x53 => "128GFC EA",
            0x54 => "128GFC SW",
            0x55 => "128GFC LW",
            _ => "Reserved",
        }
    }

    /// Electrical media: active or passive copper cables and BASE-T.
    pub fn is_copper(self) -> bool {
        matches!(
            self.0,
            0x08 | 0x0B | 0x0C | 0x0D | 0x16 | 0x19 | 0x1C | 0x1D | 0x1E | 0x30 | 0x32 | 0x40
        )
    }
}

impl fmt::Display for ExtendedSpecificationCompliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ExtendedSpecificationCompliance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::ExtendedSpecificationCompliance as Esc;

    #[test]
    fn names_and_reserved_gaps() {
        assert_eq!(Esc(0x03).name(), "100GBASE-LR4 or 25GBASE-LR");
        assert_eq!(Esc(0x0A).name(), "Reserved");
        assert_eq!(Esc(0x55).name(), "128GFC LW");
        assert_eq!(Esc(0xFF).name(), "Reserved");
    }

    #[test]
    fn copper_codes() {
        assert!(Esc(0x0B).is_copper());
        assert!(Esc(0x1C).is_copper());
        assert!(!Esc(0x03).is_copper());
        assert!(!Esc(0x18).is_copper());
    }
}
