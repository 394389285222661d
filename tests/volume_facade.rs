//! The LogicalVolume facade: naming, interrogation, engine dispatch.

use byteorder::{ByteOrder, LittleEndian};
use std::io::Cursor;
use std::path::PathBuf;

use lvdiff::{BlockRange, DomainError, LogicalVolume, SnapshotError};

const CONFIG: &str = r#"
    version = 1
    description = "mixed vg"
    my-vg {
        id = "vg-uuid"
        logical_volumes {
            data {
                segment1 { type = "striped" }
            }
            old-snap {
                segment1 { type = "striped" }
            }
            snapshot0 {
                segment1 {
                    type = "snapshot"
                    origin = "data"
                    cow_store = "old-snap"
                }
            }
            pool0 {
                segment1 { type = "thin-pool" chunk_size = 8 }
            }
            base {
                segment1 { type = "thin" thin_pool = "pool0" device_id = 1 }
            }
            thin-snap {
                segment1 { type = "thin" thin_pool = "pool0" device_id = 2 origin = "base" }
            }
        }
    }
"#;

fn lv(name: &str) -> LogicalVolume {
    LogicalVolume::new("my-vg", name, CONFIG).expect("bind lv")
}

/// Minimal valid exception store: one exception (block 3), then sentinel.
fn cow_store() -> Vec<u8> {
    let chunk = 512usize;
    let mut out = vec![0u8; chunk];
    LittleEndian::write_u32(&mut out[0..4], 0x70416e53);
    LittleEndian::write_u32(&mut out[4..8], 1);
    LittleEndian::write_u32(&mut out[8..12], 1);
    LittleEndian::write_u32(&mut out[12..16], 1);
    let mut pair = [0u8; 16];
    LittleEndian::write_u64(&mut pair[0..8], 3);
    LittleEndian::write_u64(&mut pair[8..16], 1);
    out.extend_from_slice(&pair);
    out.extend_from_slice(&[0u8; 16]); // sentinel
    out
}

#[test]
fn device_paths_escape_dashes() {
    assert_eq!(
        lv("old-snap").path(),
        PathBuf::from("/dev/mapper/my--vg-old--snap")
    );
}

#[test]
fn missing_lv_is_rejected_at_construction() {
    let err = LogicalVolume::new("my-vg", "ghost", CONFIG).unwrap_err();
    assert_eq!(
        err,
        DomainError::LogicalVolumeNotFound {
            vg: "my-vg".into(),
            lv: "ghost".into(),
        }
    );
}

#[test]
fn classic_snapshot_interrogation() {
    let snap = lv("old-snap");
    assert!(snap.snapshot());
    assert!(!snap.thin());
    assert_eq!(snap.origin(), Some("data"));

    let origin = lv("data");
    assert!(!origin.snapshot());
    assert_eq!(origin.origin(), None);
}

#[test]
fn thin_snapshot_interrogation() {
    let snap = lv("thin-snap");
    assert!(snap.snapshot());
    assert!(snap.thin());
    assert_eq!(snap.origin(), Some("base"));
}

#[test]
fn classic_changes_from_store() {
    let ranges = lv("old-snap")
        .changes_from_store(&mut Cursor::new(cow_store()))
        .expect("scan");
    assert_eq!(ranges, vec![BlockRange::from_block(3, 512)]);
}

#[test]
fn non_snapshot_changes_are_empty_without_reading_anything() {
    // An empty store would fail a scan; a non-snapshot never gets that far.
    let ranges = lv("data")
        .changes_from_store(&mut Cursor::new(Vec::new()))
        .expect("no scan");
    assert!(ranges.is_empty());
    assert!(lv("data").changes_from_dump("not xml").expect("no parse").is_empty());
}

#[test]
fn thin_changes_need_a_dump() {
    let err = lv("thin-snap").changes().unwrap_err();
    assert!(matches!(err, SnapshotError::DumpRequired { .. }));
}

#[test]
fn thin_changes_from_dump() {
    let xml = r#"<superblock uuid="" time="1" transaction="2" data_block_size="8" nr_data_blocks="64">
  <device dev_id="1" mapped_blocks="1" transaction="0" creation_time="0" snap_time="0">
    <single_mapping origin_block="0" data_block="5" time="0"/>
  </device>
  <device dev_id="2" mapped_blocks="0" transaction="1" creation_time="1" snap_time="1"/>
</superblock>"#;
    let ranges = lv("thin-snap").changes_from_dump(xml).expect("diff");
    // pool chunk_size 8 sectors => 4096-byte chunks
    assert_eq!(ranges, vec![BlockRange::from_block(0, 4096)]);
}
