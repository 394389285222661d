//! Per-PV view. Deliberately opaque: nothing above the domain model needs
//! physical-volume detail beyond identity.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalVolumeConfig {
    name: String,
}

impl PhysicalVolumeConfig {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
