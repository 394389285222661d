//! Typed domain model over a parsed volume-group configuration dump.
//!
//! Everything is derived once at load time; no lazy caches, no mutation
//! after construction. LV views carry no back-pointer to their VG; queries
//! that need to see sibling LVs take the `VolumeGroupConfig` as an explicit
//! parameter.

mod lv;
mod pv;

pub use lv::LogicalVolumeConfig;
pub use pv::PhysicalVolumeConfig;

use std::collections::BTreeMap;

use log::debug;

use crate::config::{self, ConfigGroup, SyntaxTree};
use crate::errors::DomainError;

/// A volume group's configuration: root metadata plus per-PV/per-LV views.
///
/// Owns the parsed tree for the duration of one inspection.
#[derive(Debug)]
pub struct VolumeGroupConfig {
    name: String,
    version: Option<i64>,
    description: Option<String>,
    uuid: Option<String>,
    physical_volumes: BTreeMap<String, PhysicalVolumeConfig>,
    logical_volumes: BTreeMap<String, LogicalVolumeConfig>,
    tree: SyntaxTree,
}

impl VolumeGroupConfig {
    /// Parse a configuration dump and locate the volume group `vg_name` in it.
    pub fn load(vg_name: &str, raw_config_text: &str) -> Result<Self, DomainError> {
        let tree = config::parse(raw_config_text)?;

        let root = tree.root();
        let vg = root
            .group(vg_name)
            .ok_or_else(|| DomainError::VolumeGroupNotFound(vg_name.to_string()))?;

        let version = root.variable_value("version").and_then(|v| v.as_int());
        let description = root
            .variable_value("description")
            .and_then(|v| v.as_text().map(str::to_string));
        let uuid = vg
            .variable_value("id")
            .and_then(|v| v.as_text().map(str::to_string));

        let physical_volumes: BTreeMap<String, PhysicalVolumeConfig> = vg
            .group("physical_volumes")
            .map(|section| {
                section
                    .groups()
                    .into_keys()
                    .map(|name| (name.to_string(), PhysicalVolumeConfig::new(name)))
                    .collect()
            })
            .unwrap_or_default();
        let logical_volumes: BTreeMap<String, LogicalVolumeConfig> = vg
            .group("logical_volumes")
            .map(|section| {
                section
                    .groups()
                    .into_iter()
                    .map(|(name, group)| {
                        (name.to_string(), LogicalVolumeConfig::from_group(name, group))
                    })
                    .collect()
            })
            .unwrap_or_default();
        debug!(
            "loaded vg {:?}: {} pv(s), {} lv(s)",
            vg_name,
            physical_volumes.len(),
            logical_volumes.len()
        );

        Ok(Self {
            name: vg_name.to_string(),
            version,
            description,
            uuid,
            physical_volumes,
            logical_volumes,
            tree,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `version` variable of the dump root, if present.
    pub fn version(&self) -> Option<i64> {
        self.version
    }

    /// `description` variable of the dump root, if present.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The VG group's `id` variable, if present.
    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    pub fn physical_volumes(&self) -> &BTreeMap<String, PhysicalVolumeConfig> {
        &self.physical_volumes
    }

    pub fn logical_volumes(&self) -> &BTreeMap<String, LogicalVolumeConfig> {
        &self.logical_volumes
    }

    pub fn logical_volume(&self, name: &str) -> Option<&LogicalVolumeConfig> {
        self.logical_volumes.get(name)
    }

    /// Raw tree access, for variables the typed model does not surface.
    pub fn config_root(&self) -> ConfigGroup<'_> {
        self.tree.root()
    }
}
