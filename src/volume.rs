//! Convenience facade binding a (VG, LV) pair to a loaded configuration.
//!
//! Resolving a device path to the (VG, LV) pair, and producing the
//! configuration/dump blobs, are the caller's job; nothing here launches
//! external tools.

use std::io::{Read, Seek};
use std::path::PathBuf;

use crate::dev;
use crate::errors::{DomainError, SnapshotError};
use crate::snapshot::{classic, thin, BlockRange};
use crate::vg::{LogicalVolumeConfig, VolumeGroupConfig};

/// One logical volume within a loaded volume-group configuration.
#[derive(Debug)]
pub struct LogicalVolume {
    vg_name: String,
    lv_name: String,
    vgcfg: VolumeGroupConfig,
}

impl LogicalVolume {
    /// Load the configuration dump and bind to `lv_name` within it.
    pub fn new(vg_name: &str, lv_name: &str, config_text: &str) -> Result<Self, DomainError> {
        let vgcfg = VolumeGroupConfig::load(vg_name, config_text)?;
        if vgcfg.logical_volume(lv_name).is_none() {
            return Err(DomainError::LogicalVolumeNotFound {
                vg: vg_name.to_string(),
                lv: lv_name.to_string(),
            });
        }
        Ok(Self {
            vg_name: vg_name.to_string(),
            lv_name: lv_name.to_string(),
            vgcfg,
        })
    }

    pub fn vg_name(&self) -> &str {
        &self.vg_name
    }

    pub fn lv_name(&self) -> &str {
        &self.lv_name
    }

    pub fn vg_config(&self) -> &VolumeGroupConfig {
        &self.vgcfg
    }

    /// Canonical block-device path of this LV.
    pub fn path(&self) -> PathBuf {
        dev::dm_path(&self.vg_name, &self.lv_name)
    }

    fn lvcfg(&self) -> Option<&LogicalVolumeConfig> {
        self.vgcfg.logical_volume(&self.lv_name)
    }

    pub fn thin(&self) -> bool {
        self.lvcfg().map(|lv| lv.thin()).unwrap_or(false)
    }

    pub fn snapshot(&self) -> bool {
        self.lvcfg().map(|lv| lv.snapshot(&self.vgcfg)).unwrap_or(false)
    }

    /// Name of the origin LV, if this LV is a snapshot.
    pub fn origin(&self) -> Option<&str> {
        self.lvcfg().and_then(|lv| lv.resolve_origin(&self.vgcfg))
    }

    /// Changed byte ranges of a classic snapshot, read from its `-cow`
    /// device. Empty for non-snapshots; thin snapshots need a pool dump.
    pub fn changes(&self) -> Result<Vec<BlockRange>, SnapshotError> {
        if !self.snapshot() {
            return Ok(Vec::new());
        }
        if self.thin() {
            return Err(SnapshotError::DumpRequired {
                lv: self.lv_name.clone(),
            });
        }
        classic::differences(&self.vg_name, &self.lv_name)
    }

    /// Classic differencing against a caller-supplied exception store.
    pub fn changes_from_store<R: Read + Seek>(
        &self,
        store: &mut R,
    ) -> Result<Vec<BlockRange>, SnapshotError> {
        if !self.snapshot() {
            return Ok(Vec::new());
        }
        classic::scan_store(store)
    }

    /// Thin differencing against a caller-supplied pool metadata dump.
    pub fn changes_from_dump(&self, dump_xml: &str) -> Result<Vec<BlockRange>, SnapshotError> {
        if !self.snapshot() {
            return Ok(Vec::new());
        }
        thin::differences(&self.vgcfg, &self.lv_name, dump_xml)
    }
}
