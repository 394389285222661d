//! Thin-provisioned snapshot differencing.
//!
//! Origin and snapshot each own a block map inside the shared pool
//! metadata. A block differs when its (lv_block, data_block) pair appears
//! in one map but not the other, so the diff is the symmetric difference of
//! the two flattened pair sets. One-directional subtraction would miss
//! origin blocks that were discarded after the snapshot was taken.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::{DomainError, SnapshotError};
use crate::snapshot::BlockRange;
use crate::vg::VolumeGroupConfig;

/// One record of a device's block map.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MapEntry {
    Single {
        origin: u64,
        data: u64,
    },
    /// `length` blocks mapped position-wise: origin_begin+i -> data_begin+i.
    Range {
        origin_begin: u64,
        data_begin: u64,
        length: u64,
    },
}

/// Per-device block maps parsed from a pool metadata dump.
///
/// Built once per differencing call, consumed by the diff, then dropped.
#[derive(Debug, Default)]
pub struct ThinBlockMap {
    devices: BTreeMap<u64, Vec<MapEntry>>,
}

impl ThinBlockMap {
    /// Parse the XML output of the pool metadata dump tool.
    pub fn parse(dump_xml: &str) -> Result<Self, SnapshotError> {
        let mut reader = Reader::from_str(dump_xml);
        let mut devices: BTreeMap<u64, Vec<MapEntry>> = BTreeMap::new();
        let mut current: Option<u64> = None;

        loop {
            match reader.read_event() {
                Err(e) => return Err(malformed(format!("xml error: {e}"))),
                Ok(Event::Eof) => break,
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"superblock" => {}
                    b"device" => {
                        let id = attr_u64(&e, "dev_id")?;
                        devices.entry(id).or_default();
                        current = Some(id);
                    }
                    b"single_mapping" => {
                        let dev = current
                            .ok_or_else(|| malformed("mapping outside a device section".into()))?;
                        let entry = MapEntry::Single {
                            origin: attr_u64(&e, "origin_block")?,
                            data: attr_u64(&e, "data_block")?,
                        };
                        devices.entry(dev).or_default().push(entry);
                    }
                    b"range_mapping" => {
                        let dev = current
                            .ok_or_else(|| malformed("mapping outside a device section".into()))?;
                        let entry = MapEntry::Range {
                            origin_begin: attr_u64(&e, "origin_begin")?,
                            data_begin: attr_u64(&e, "data_begin")?,
                            length: attr_u64(&e, "length")?,
                        };
                        devices.entry(dev).or_default().push(entry);
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => {
                    if e.name().as_ref() == b"device" {
                        current = None;
                    }
                }
                Ok(_) => {}
            }
        }
        Ok(Self { devices })
    }

    /// Expand one device's map into discrete (lv_block, data_block) pairs.
    fn flattened(&self, device_id: u64) -> Result<BTreeSet<(u64, u64)>, SnapshotError> {
        let entries = self
            .devices
            .get(&device_id)
            .ok_or(SnapshotError::MissingDeviceMapping(device_id))?;
        let mut pairs = BTreeSet::new();
        for entry in entries {
            match *entry {
                MapEntry::Single { origin, data } => {
                    pairs.insert((origin, data));
                }
                MapEntry::Range {
                    origin_begin,
                    data_begin,
                    length,
                } => {
                    for i in 0..length {
                        pairs.insert((origin_begin + i, data_begin + i));
                    }
                }
            }
        }
        Ok(pairs)
    }
}

/// Byte ranges of the origin LV that the thin snapshot `lv` has diverged
/// from, computed against the supplied pool metadata dump.
pub fn differences(
    vg: &VolumeGroupConfig,
    lv: &str,
    dump_xml: &str,
) -> Result<Vec<BlockRange>, SnapshotError> {
    let snap = vg
        .logical_volume(lv)
        .ok_or_else(|| DomainError::LogicalVolumeNotFound {
            vg: vg.name().to_string(),
            lv: lv.to_string(),
        })?;

    let origin_name = snap
        .resolve_origin(vg)
        .ok_or_else(|| SnapshotError::UnresolvedOrigin { lv: lv.to_string() })?;
    let origin = vg
        .logical_volume(origin_name)
        .ok_or_else(|| SnapshotError::UnresolvedOrigin { lv: lv.to_string() })?;

    let pool_name = snap
        .thin_pool()
        .ok_or_else(|| SnapshotError::UnresolvedPool { lv: lv.to_string() })?;
    let chunk_size = vg
        .logical_volume(pool_name)
        .and_then(|pool| pool.chunk_size())
        .ok_or_else(|| SnapshotError::UnresolvedPool { lv: lv.to_string() })?;

    let snap_id = snap.device_id().ok_or_else(|| SnapshotError::MissingDeviceId {
        lv: lv.to_string(),
    })?;
    let origin_id = origin
        .device_id()
        .ok_or_else(|| SnapshotError::MissingDeviceId {
            lv: origin_name.to_string(),
        })?;

    let map = ThinBlockMap::parse(dump_xml)?;
    let origin_pairs = map.flattened(origin_id)?;
    let snap_pairs = map.flattened(snap_id)?;
    debug!(
        "thin diff {lv}: origin dev {origin_id} has {} mapping(s), snapshot dev {snap_id} has {}",
        origin_pairs.len(),
        snap_pairs.len()
    );

    // Unique origin-side blocks of all pairs present in exactly one map.
    let changed_blocks: BTreeSet<u64> = origin_pairs
        .symmetric_difference(&snap_pairs)
        .map(|&(lv_block, _)| lv_block)
        .collect();

    Ok(changed_blocks
        .into_iter()
        .map(|b| BlockRange::from_block(b, chunk_size))
        .collect())
}

fn malformed(msg: String) -> SnapshotError {
    SnapshotError::MalformedDump(msg)
}

fn attr_u64(e: &BytesStart<'_>, name: &str) -> Result<u64, SnapshotError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(format!("bad attribute: {err}")))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| malformed(format!("bad attribute value: {err}")))?;
            return value
                .parse()
                .map_err(|_| malformed(format!("attribute {name:?} is not a block number")));
        }
    }
    Err(malformed(format!(
        "element <{}> lacks attribute {name:?}",
        String::from_utf8_lossy(e.name().as_ref())
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_and_range_mappings() {
        let xml = r#"
            <superblock uuid="" time="1" transaction="2" data_block_size="128" nr_data_blocks="1024">
              <device dev_id="1" mapped_blocks="3" transaction="0" creation_time="0" snap_time="0">
                <single_mapping origin_block="0" data_block="10" time="0"/>
                <range_mapping origin_begin="5" data_begin="20" length="3" time="0"/>
              </device>
              <device dev_id="2" mapped_blocks="0" transaction="0" creation_time="1" snap_time="1">
              </device>
            </superblock>
        "#;
        let map = ThinBlockMap::parse(xml).expect("parse");
        let dev1 = map.flattened(1).expect("dev 1");
        assert_eq!(
            dev1.into_iter().collect::<Vec<_>>(),
            vec![(0, 10), (5, 20), (6, 21), (7, 22)]
        );
        assert!(map.flattened(2).expect("dev 2").is_empty());
    }

    #[test]
    fn missing_device_is_an_error_not_empty() {
        let map = ThinBlockMap::parse("<superblock></superblock>").expect("parse");
        assert!(matches!(
            map.flattened(7),
            Err(SnapshotError::MissingDeviceMapping(7))
        ));
    }

    #[test]
    fn mapping_outside_device_is_malformed() {
        let xml = r#"<superblock><single_mapping origin_block="0" data_block="1"/></superblock>"#;
        assert!(matches!(
            ThinBlockMap::parse(xml),
            Err(SnapshotError::MalformedDump(_))
        ));
    }

    #[test]
    fn missing_attribute_is_malformed() {
        let xml = r#"<superblock><device dev_id="1"><single_mapping origin_block="0"/></device></superblock>"#;
        assert!(matches!(
            ThinBlockMap::parse(xml),
            Err(SnapshotError::MalformedDump(_))
        ));
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        let xml = r#"<superblock><device dev_id="1"></wrong></superblock>"#;
        assert!(matches!(
            ThinBlockMap::parse(xml),
            Err(SnapshotError::MalformedDump(_))
        ));
    }
}
