//! Check code verification.
//!
//! Every checksum-bearing layout stores an 8-bit check code equal to the low
//! byte of the sum of a fixed byte range. A `ChecksumSpan` names the range and
//! the byte holding the stored code; the per-standard `layout` modules declare
//! their spans, and `ChecksumPolicy` decides which mismatches are fatal.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DecodeError;
use crate::options::ChecksumPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumRegion {
    /// Base identification fields (CC_BASE).
    Base,
    /// Extended identification fields (CC_EXT).
    Extended,
    /// Diagnostic page fields (CC_DMI).
    Diagnostics,
}

impl fmt::Display for ChecksumRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChecksumRegion::Base => "base",
            ChecksumRegion::Extended => "extended",
            ChecksumRegion::Diagnostics => "diagnostics",
        };
        f.write_str(name)
    }
}

/// Covered range and location of a stored check code.
#[derive(Debug, Clone)]
pub struct ChecksumSpan {
    pub region: ChecksumRegion,
    pub covered: Range<usize>,
    pub stored_at: usize,
}

/// Outcome of one check code comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecksumReport {
    pub region: ChecksumRegion,
    /// Check code stored in the image.
    pub expected: u8,
    /// Check code recomputed over the covered range.
    pub computed: u8,
    pub valid: bool,
}

impl ChecksumReport {
    pub fn into_error(self) -> DecodeError {
        DecodeError::ChecksumMismatch {
            region: self.region,
            expected: self.expected,
            computed: self.computed,
        }
    }
}

/// Low byte of the sum of `bytes`.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, byte| acc.wrapping_add(*byte))
}

/// Recompute a span against `raw`. Returns `None` when the image does not
/// reach the span.
pub fn verify(raw: &[u8], span: &ChecksumSpan) -> Option<ChecksumReport> {
    let covered = raw.get(span.covered.clone())?;
    let expected = *raw.get(span.stored_at)?;
    let computed = checksum(covered);
    Some(ChecksumReport {
        region: span.region,
        expected,
        computed,
        valid: expected == computed,
    })
}

/// Apply `policy` to a checksum outcome.
///
/// Tolerated mismatches are logged and left in the record for the caller.
pub fn enforce(report: &ChecksumReport, policy: ChecksumPolicy) -> Result<(), DecodeError> {
    if report.valid {
        return Ok(());
    }
    let fatal = match policy {
        ChecksumPolicy::Strict => true,
        ChecksumPolicy::DiagnosticsOnly => report.region == ChecksumRegion::Diagnostics,
        ChecksumPolicy::Ignore => false,
    };
    if fatal {
        return Err(report.into_error());
    }
    warn!(
        region = %report.region,
        expected = report.expected,
        computed = report.computed,
        "checksum mismatch tolerated"
    );
    Ok(())
}

/// Verify every span the image reaches and apply `policy` to each outcome.
pub fn verify_all(
    raw: &[u8],
    spans: &[ChecksumSpan],
    policy: ChecksumPolicy,
) -> Result<Vec<ChecksumReport>, DecodeError> {
    let mut reports = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(report) = verify(raw, span) {
            enforce(&report, policy)?;
            reports.push(report);
        }
    }
    Ok(reports)
}
