use thiserror::Error;

use crate::checksum::ChecksumRegion;

/// Errors surfaced by the decode engine.
///
/// Nothing is retried internally; recovery policy belongs to the caller.
///
/// ```text
/// buffer too short: need 512 bytes, got 256
/// checksum mismatch in diagnostics region: stored 0x70, computed 0x71
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("checksum mismatch in {region} region: stored {expected:#04x}, computed {computed:#04x}")]
    ChecksumMismatch {
        region: ChecksumRegion,
        expected: u8,
        computed: u8,
    },
    #[error("unrecognized module type code {code}")]
    UnknownModuleType { code: u32 },
    #[error("unrecognized standard '{name}'")]
    UnknownStandard { name: String },
    #[error("monitoring not implemented by module")]
    MonitoringNotSupported,
    #[error("no alarm thresholds available for this measurement")]
    ThresholdsNotSupported,
}

#[cfg(test)]
mod tests {
    use super::DecodeError;
    use crate::checksum::ChecksumRegion;

    #[test]
    fn too_short_names_both_lengths() {
        let msg = DecodeError::TooShort {
            needed: 256,
            actual: 42,
        }
        .to_string();
        assert!(msg.contains("need 256 bytes"));
        assert!(msg.contains("got 42"));
    }

    #[test]
    fn checksum_mismatch_names_region() {
        let msg = DecodeError::ChecksumMismatch {
            region: ChecksumRegion::Diagnostics,
            expected: 0x70,
            computed: 0x71,
        }
        .to_string();
        assert_eq!(
            msg,
            "checksum mismatch in diagnostics region: stored 0x70, computed 0x71"
        );
    }

    #[test]
    fn unknown_module_type_names_code() {
        let msg = DecodeError::UnknownModuleType { code: 9 }.to_string();
        assert!(msg.contains('9'));
    }
}
