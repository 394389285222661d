//! Canonical /dev/mapper device naming.
//!
//! device-mapper joins the VG and LV names with a single `-` and escapes
//! every literal `-` inside either name as `--`.

use std::path::PathBuf;

use crate::consts::{COW_SUFFIX, DM_DIR, TMETA_SUFFIX};

/// Escape a VG or LV name for use in a device-mapper node name.
pub fn dm_escape(name: &str) -> String {
    name.replace('-', "--")
}

/// Canonical block-device path of a logical volume.
pub fn dm_path(vg: &str, lv: &str) -> PathBuf {
    PathBuf::from(format!("{}/{}-{}", DM_DIR, dm_escape(vg), dm_escape(lv)))
}

/// Exception-store device of a classic snapshot.
pub fn cow_device_path(vg: &str, lv: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/{}-{}{}",
        DM_DIR,
        dm_escape(vg),
        dm_escape(lv),
        COW_SUFFIX
    ))
}

/// Metadata device of a thin pool (the input of the pool dump tool).
pub fn tmeta_device_path(vg: &str, pool: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/{}-{}{}",
        DM_DIR,
        dm_escape(vg),
        dm_escape(pool),
        TMETA_SUFFIX
    ))
}
