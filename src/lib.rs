//! lvdiff: compute which byte ranges of a logical volume differ from a
//! snapshot of it, using only the volume manager's own metadata.
//!
//! Nothing here reads volume data or launches external tools: callers hand
//! in the configuration dump (and, for thin snapshots, the pool metadata
//! dump) as in-memory blobs, and get back an ordered list of inclusive,
//! chunk-aligned byte ranges. Incremental backup tools copy just those.
//!
//! Layering, bottom up:
//! - `config`: grammar parser + tree view over the configuration dump
//! - `vg`: volume-group / logical-volume domain model
//! - `endian`: disk vs. network byte-order helpers
//! - `snapshot::classic` / `snapshot::thin`: the two differencing engines
//! - `volume`: convenience facade over all of the above

pub mod config;
pub mod consts;
pub mod dev;
pub mod endian;
pub mod errors;
pub mod snapshot;
pub mod vg;
pub mod volume;

pub use errors::{DomainError, ParseFailure, SnapshotError};
pub use snapshot::BlockRange;
pub use vg::{LogicalVolumeConfig, PhysicalVolumeConfig, VolumeGroupConfig};
pub use volume::LogicalVolume;
