use std::fmt;

use serde::{Serialize, Serializer};

use super::{VENDOR_SPECIFIC, dense_name, serialize_code};

const OPTICAL_NAMES: [&str; 0x0E] = [
    "Unknown or unspecified",
    "SC",
    "Fibre Channel style 1 copper",
    "Fibre Channel style 2 copper",
    "BNC/TNC",
    "Fibre Channel coaxial headers",
    "FibreJack",
    "LC",
    "MT-RJ",
    "MU",
    "SG",
    "Optical pigtail",
    "MPO Parallel Optic",
    "MPO Parallel Optic - 2x16",
];

const ELECTRICAL_START: u8 = 0x20;
const ELECTRICAL_NAMES: [&str; 5] = [
    "HSSDC II",
    "Copper pigtail",
    "RJ45",
    "No separable connector",
    "MXC 2x16",
];

const VENDOR_START: u8 = 0x80;
/// Lowercase, unlike the identifier and encoding tables.
const UNKNOWN_CONNECTOR: &str = "invalid or unknown";

/// Connector type (SFF-8024 Table 4-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorType(pub u8);

impl ConnectorType {
    pub const LC: Self = Self(0x07);
    pub const NO_SEPARABLE: Self = Self(0x23);

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        if let Some(name) = dense_name(&OPTICAL_NAMES, self.0) {
            return name;
        }
        if let Some(name) = self
            .0
            .checked_sub(ELECTRICAL_START)
            .and_then(|index| dense_name(&ELECTRICAL_NAMES, index))
        {
            return name;
        }
        if self.0 >= VENDOR_START {
            VENDOR_SPECIFIC
        } else {
            UNKNOWN_CONNECTOR
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ConnectorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(self.0, self.name(), serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectorType;

    #[test]
    fn optical_and_electrical_ranges() {
        assert_eq!(ConnectorType::LC.name(), "LC");
        assert_eq!(ConnectorType(0x0D).name(), "MPO Parallel Optic - 2x16");
        assert_eq!(ConnectorType(0x20).name(), "HSSDC II");
        assert_eq!(ConnectorType::NO_SEPARABLE.name(), "No separable connector");
        assert_eq!(ConnectorType(0x24).name(), "MXC 2x16");
    }

    #[test]
    fn gaps_and_vendor_range() {
        assert_eq!(ConnectorType(0x0E).name(), "invalid or unknown");
        assert_eq!(ConnectorType(0x25).name(), "invalid or unknown");
        assert_eq!(ConnectorType(0x90).name(), "Vendor specific");
    }

    #[test]
    fn unknown_connector_label_is_lowercase_in_json() {
        let value = serde_json::to_value(ConnectorType(0x1F)).unwrap();
        assert_eq!(value["hex"], "0x1f");
        assert_eq!(value["ascii"], "invalid or unknown");
    }
}
