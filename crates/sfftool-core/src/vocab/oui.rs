use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// IEEE company identifier of the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Oui(pub [u8; 3]);

impl Oui {
    pub fn value(self) -> u32 {
        let [a, b, c] = self.0;
        u32::from_be_bytes([0, a, b, c])
    }
}

impl fmt::Display for Oui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}")
    }
}

impl Serialize for Oui {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Oui", 2)?;
        state.serialize_field("hex", &format!("{:#08x}", self.value()))?;
        state.serialize_field("ascii", &self.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::Oui;

    #[test]
    fn colon_separated_uppercase() {
        let oui = Oui([0x00, 0x02, 0xC9]);
        assert_eq!(oui.to_string(), "00:02:C9");
        assert_eq!(oui.value(), 0x0002C9);
        let value = serde_json::to_value(oui).unwrap();
        assert_eq!(value["hex"], "0x0002c9");
    }
}
