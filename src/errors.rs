//! Error taxonomy for the whole crate.
//!
//! Three layers, matching the three stages of an inspection:
//! - ParseFailure: the raw configuration dump could not be parsed.
//! - DomainError: the dump parsed, but the requested VG/LV is not in it.
//! - SnapshotError: a differencing engine could not complete a scan.
//!
//! Nothing here is retried internally; every failure is surfaced to the
//! caller as-is. No partial range lists are ever returned alongside an error.

use thiserror::Error;

/// Parse failure for the configuration-dump grammar.
///
/// Carries the furthest position the parser reached (1-based line/column)
/// and a description of what it expected to find there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line}, column {column}: expected {expected}")]
pub struct ParseFailure {
    pub line: usize,
    pub column: usize,
    pub expected: &'static str,
}

/// The configuration parsed, but the requested object is not in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error("volume group {0:?} not found in configuration dump")]
    VolumeGroupNotFound(String),

    #[error("logical volume {lv:?} does not exist in volume group {vg:?}")]
    LogicalVolumeNotFound { vg: String, lv: String },
}

/// A differencing engine could not complete its scan.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Exception-store header magic is not 0x70416e53.
    #[error("invalid snapshot magic 0x{0:08x}")]
    InvalidMagic(u32),

    /// The kernel marked the exception store invalid.
    #[error("snapshot is marked as invalid")]
    MarkedInvalid,

    /// Exception-table format version other than 1.
    #[error("incompatible snapshot metadata version {0}")]
    UnsupportedVersion(u32),

    /// A device id resolved from the config has no section in the dump.
    #[error("device id {0} has no mapping in the pool metadata dump")]
    MissingDeviceMapping(u64),

    /// The pool metadata dump (or a store header) is structurally broken.
    #[error("malformed metadata dump: {0}")]
    MalformedDump(String),

    /// A thin LV record carries no device_id variable.
    #[error("logical volume {lv:?} has no device id in its configuration")]
    MissingDeviceId { lv: String },

    /// The snapshot's origin LV cannot be resolved from the config.
    #[error("cannot resolve the origin of logical volume {lv:?}")]
    UnresolvedOrigin { lv: String },

    /// The snapshot's thin pool (or its chunk size) cannot be resolved.
    #[error("cannot resolve the thin pool of logical volume {lv:?}")]
    UnresolvedPool { lv: String },

    /// Diffing a thin snapshot needs a pool metadata dump blob.
    #[error("thin snapshot {lv:?} needs a pool metadata dump to diff")]
    DumpRequired { lv: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("i/o failure: {0}")]
    IoFailure(#[from] std::io::Error),
}
