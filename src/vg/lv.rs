//! Per-LV view over one `logical_volumes` child group.

use crate::config::ConfigGroup;
use crate::consts::SECTOR_SIZE;
use crate::vg::VolumeGroupConfig;

/// Snapshot-relevant metadata of one logical volume.
///
/// All fields come from the LV's first segment (`segment1`); every LV record
/// written by the volume manager has at least one segment. Sibling-dependent
/// queries (`snapshot`, `resolve_origin`) take the owning VG explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalVolumeConfig {
    name: String,
    thin: bool,
    origin: Option<String>,
    cow_store: Option<String>,
    device_id: Option<u64>,
    thin_pool: Option<String>,
    chunk_size: Option<u64>,
}

impl LogicalVolumeConfig {
    pub(crate) fn from_group(name: &str, group: ConfigGroup<'_>) -> Self {
        let seg = group.group("segment1");
        let text = |var: &str| {
            seg.as_ref()
                .and_then(|s| s.variable_value(var))
                .and_then(|v| v.as_text().map(str::to_string))
        };
        let int = |var: &str| {
            seg.as_ref()
                .and_then(|s| s.variable_value(var))
                .and_then(|v| v.as_int())
        };

        Self {
            name: name.to_string(),
            thin: text("type").as_deref() == Some("thin"),
            origin: text("origin"),
            cow_store: text("cow_store"),
            device_id: int("device_id").map(|v| v as u64),
            thin_pool: text("thin_pool"),
            chunk_size: int("chunk_size").map(|sectors| sectors as u64 * SECTOR_SIZE),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True iff the first segment's `type` is `"thin"`.
    pub fn thin(&self) -> bool {
        self.thin
    }

    /// The `origin` variable as recorded on this LV itself.
    ///
    /// For classic snapshots the origin link lives on the origin LV's own
    /// record, not the snapshot's; use `resolve_origin` to follow it.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Name of the LV using this LV as its exception store, if recorded.
    pub fn cow_store(&self) -> Option<&str> {
        self.cow_store.as_deref()
    }

    /// Pool-relative identifier of a thin LV's block mapping.
    pub fn device_id(&self) -> Option<u64> {
        self.device_id
    }

    /// Name of the thin pool this LV is carved from.
    pub fn thin_pool(&self) -> Option<&str> {
        self.thin_pool.as_deref()
    }

    /// Chunk size in bytes (the dump records sectors).
    pub fn chunk_size(&self) -> Option<u64> {
        self.chunk_size
    }

    /// Is this LV a snapshot of some other LV?
    ///
    /// Thin LVs are snapshots iff they record an origin. Classic LVs are
    /// snapshots iff some sibling's `cow_store` names them; volume groups
    /// are small, so the linear scan is fine.
    pub fn snapshot(&self, vg: &VolumeGroupConfig) -> bool {
        if self.thin {
            self.origin.is_some()
        } else {
            vg.logical_volumes()
                .values()
                .any(|lv| lv.cow_store.as_deref() == Some(self.name.as_str()))
        }
    }

    /// Name of this snapshot's origin LV, following the classic indirection
    /// (the sibling whose `cow_store` names us carries the `origin` link).
    pub fn resolve_origin<'a>(&'a self, vg: &'a VolumeGroupConfig) -> Option<&'a str> {
        if self.thin {
            self.origin.as_deref()
        } else {
            vg.logical_volumes()
                .values()
                .find(|lv| lv.cow_store.as_deref() == Some(self.name.as_str()))
                .and_then(|lv| lv.origin.as_deref())
        }
    }
}
