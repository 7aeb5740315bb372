//! sfftool core library: pluggable transceiver EEPROM decoding.
//!
//! This crate turns raw memory images of SFP, SFP+, QSFP+ and QSFP28
//! modules into typed records. Each supported standard has its own
//! layout/reader/parser split under `standards`, and every record maps onto
//! the standard-independent `ModuleView`. The crate performs no I/O; the
//! caller supplies the bytes along with the module-info metadata its
//! transport already fetched.
//!
//! Invariants:
//! - Every read is bounds-checked; a short image yields `DecodeError::TooShort`.
//! - Optional pages (SFF-8472 A2h, SFF-8636 page 03h) are decoded only when
//!   present; their absence is reported, never raised.
//! - External calibration is applied at most once per decode.
//!
//! # Examples
//! ```no_run
//! use sfftool_core::{DecodeOptions, ModuleInfo, decode_with_info};
//!
//! let raw = std::fs::read("module.bin")?;
//! let info = ModuleInfo { eeprom_type: 2, length: 512 };
//! let module = decode_with_info(&info, &raw, &DecodeOptions::default())?;
//! let view = module.view();
//! println!("{} {} ({} lasers)", view.vendor_name, view.vendor_pn, view.lasers.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod bitfield;
pub mod calibration;
pub mod checksum;
pub mod error;
pub mod options;
pub mod standards;
pub mod units;
pub mod view;
pub mod vocab;

pub use checksum::{ChecksumRegion, ChecksumReport};
pub use error::DecodeError;
pub use options::{ChecksumPolicy, DecodeOptions};
pub use standards::StandardVariant;
pub use standards::sff8079::{Sff8079Eeprom, parse_sff8079};
pub use standards::sff8472::{Sff8472Eeprom, parse_sff8472};
pub use standards::sff8636::{Sff8636Eeprom, parse_sff8636};
pub use units::Power;
pub use view::{AlarmThresholds, Laser, Measurement, Module, ModuleView};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Timestamp used until the caller stamps the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// EEPROM metadata reported by the driver alongside the dump.
///
/// # Examples
/// ```
/// use sfftool_core::{ModuleInfo, StandardVariant};
///
/// let info = ModuleInfo { eeprom_type: 3, length: 640 };
/// assert_eq!(info.variant().unwrap(), StandardVariant::Sff8636);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// ethtool module-info type code.
    pub eeprom_type: u32,
    /// Valid bytes in the dump.
    pub length: u32,
}

impl ModuleInfo {
    pub fn variant(&self) -> Result<StandardVariant, DecodeError> {
        StandardVariant::from_code(self.eeprom_type)
    }
}

/// Decode `raw` under an explicit standard.
pub fn decode(
    variant: StandardVariant,
    raw: &[u8],
    options: &DecodeOptions,
) -> Result<Module, DecodeError> {
    debug!(variant = %variant, len = raw.len(), "decode requested");
    let module = match variant {
        StandardVariant::Sff8079 => Module::Sff8079(parse_sff8079(raw, options)?),
        StandardVariant::Sff8472 => Module::Sff8472(parse_sff8472(raw, options)?),
        StandardVariant::Sff8636 => Module::Sff8636(parse_sff8636(raw, options)?),
        StandardVariant::Sff8436 => Module::Sff8436(parse_sff8636(raw, options)?),
    };
    Ok(module)
}

/// Decode `raw` using the standard and length the driver advertised.
///
/// Bytes past `info.length` are ignored; a buffer shorter than the
/// advertised length is rejected.
pub fn decode_with_info(
    info: &ModuleInfo,
    raw: &[u8],
    options: &DecodeOptions,
) -> Result<Module, DecodeError> {
    let variant = info.variant()?;
    let advertised = usize::try_from(info.length).unwrap_or(usize::MAX);
    let image = raw.get(..advertised).ok_or(DecodeError::TooShort {
        needed: advertised,
        actual: raw.len(),
    })?;
    decode(variant, image, options)
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use sfftool_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "sfftool".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "sfftool");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Image length in bytes after hex decoding.
    pub bytes: u64,
}

/// Serializable envelope around one decoded module.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the decode.
    pub generated_at: String,
    pub input: InputInfo,
    pub variant: StandardVariant,
    pub view: ModuleView,
    /// Full per-standard record; omitted for view-only reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Module>,
}

impl DecodeReport {
    pub fn new(input_path: &str, input_bytes: u64, module: Module) -> Self {
        Self {
            report_version: REPORT_VERSION,
            tool: ToolInfo {
                name: "sfftool".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at: DEFAULT_GENERATED_AT.to_string(),
            input: InputInfo {
                path: input_path.to_string(),
                bytes: input_bytes,
            },
            variant: module.variant(),
            view: module.view(),
            record: Some(module),
        }
    }

    /// Drop the full record, keeping only the common view.
    pub fn view_only(mut self) -> Self {
        self.record = None;
        self
    }
}
