use serde::{Deserialize, Serialize};

/// Which checksum mismatches abort a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumPolicy {
    /// Any mismatch is an error.
    Strict,
    /// Only a corrupt diagnostic page is an error; identity fields degrade
    /// gracefully and the failed report stays in the record.
    #[default]
    DiagnosticsOnly,
    /// Mismatches are recorded, never raised.
    Ignore,
}

/// Decoder configuration.
///
/// # Examples
/// ```
/// use sfftool_core::{ChecksumPolicy, DecodeOptions};
///
/// let options: DecodeOptions = serde_json::from_str(r#"{"checksum_policy":"strict"}"#)?;
/// assert_eq!(options.checksum_policy, ChecksumPolicy::Strict);
/// assert!(options.apply_calibration);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub checksum_policy: ChecksumPolicy,
    /// Apply external calibration constants when the module declares them.
    pub apply_calibration: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            checksum_policy: ChecksumPolicy::default(),
            apply_calibration: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let options: DecodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DecodeOptions::default());
        assert_eq!(options.checksum_policy, ChecksumPolicy::DiagnosticsOnly);
    }

    #[test]
    fn calibration_can_be_disabled() {
        let options: DecodeOptions =
            serde_json::from_str(r#"{"apply_calibration":false,"checksum_policy":"ignore"}"#)
                .unwrap();
        assert!(!options.apply_calibration);
        assert_eq!(options.checksum_policy, ChecksumPolicy::Ignore);
    }
}
