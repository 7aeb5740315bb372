//! Code vocabularies shared by every memory layout.
//!
//! Each vocabulary wraps the raw byte so any value round-trips, even codes
//! no table names. Names come from static tables; unnamed codes fall back to
//! "Vendor specific" inside a vendor range and "Invalid or unknown" (or
//! "Reserved", or the lowercase connector label) elsewhere.
//!
//! Enumerated codes serialize as `{ "hex": "0x11", "ascii": "QSFP28" }`.

mod connector;
mod encoding;
mod extended_compliance;
mod identifier;
mod oui;
mod power_class;
mod sff8079_codes;

pub use connector::ConnectorType;
pub use encoding::{Encoding, EncodingTable};
pub use extended_compliance::ExtendedSpecificationCompliance;
pub use identifier::Identifier;
pub use oui::Oui;
pub use power_class::PowerClass;
pub use sff8079_codes::{ExtendedIdentifier, RateIdentifier};

use serde::Serializer;
use serde::ser::SerializeStruct;

pub(crate) const VENDOR_SPECIFIC: &str = "Vendor specific";
pub(crate) const INVALID_OR_UNKNOWN: &str = "Invalid or unknown";

/// Serialize a code as its `{hex, ascii}` pair.
pub(crate) fn serialize_code<S: Serializer>(
    code: u8,
    name: &str,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Code", 2)?;
    state.serialize_field("hex", &format!("{code:#04x}"))?;
    state.serialize_field("ascii", name)?;
    state.end()
}

/// Look up `code` in a dense table starting at zero.
pub(crate) fn dense_name(table: &[&'static str], code: u8) -> Option<&'static str> {
    table.get(usize::from(code)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_serializes_as_hex_and_ascii() {
        let value = serde_json::to_value(Identifier::QSFP28).unwrap();
        assert_eq!(value["hex"], "0x11");
        assert_eq!(value["ascii"], "QSFP28");
    }

    #[test]
    fn dense_name_out_of_table() {
        assert_eq!(dense_name(&["a", "b"], 1), Some("b"));
        assert_eq!(dense_name(&["a", "b"], 2), None);
    }
}
