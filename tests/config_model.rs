//! End-to-end scenarios over the configuration domain model.

use lvdiff::{DomainError, VolumeGroupConfig};

const PLAIN_DUMP: &str = r#"
    # Generated by vgcfgbackup
    version = 1
    description = "test"

    vg0 {
        id = "N7rqmr-a8Ck-x1tZ"
        physical_volumes {
            pv0 {
                id = "9zjpQW-pv00"
                device = "/dev/sda2"
            }
        }
        logical_volumes {
            data {
                id = "lv-data-uuid"
                status = ["READ", "WRITE", "VISIBLE"]
                segment_count = 1
                segment1 {
                    start_extent = 0
                    extent_count = 250
                    type = "striped"
                    stripe_count = 1
                }
            }
        }
    }
"#;

const THIN_DUMP: &str = r#"
    version = 1
    description = "thin vg"
    vg0 {
        id = "vg0-uuid"
        logical_volumes {
            pool0 {
                segment1 {
                    type = "thin-pool"
                    chunk_size = 128
                }
            }
            base {
                segment1 {
                    type = "thin"
                    thin_pool = "pool0"
                    device_id = 1
                }
            }
            snap1 {
                segment1 {
                    type = "thin"
                    thin_pool = "pool0"
                    device_id = 2
                    origin = "base"
                }
            }
        }
    }
"#;

#[test]
fn plain_volume_group_end_to_end() {
    let vg = VolumeGroupConfig::load("vg0", PLAIN_DUMP).expect("load");
    assert_eq!(vg.version(), Some(1));
    assert_eq!(vg.description(), Some("test"));
    assert_eq!(vg.uuid(), Some("N7rqmr-a8Ck-x1tZ"));

    let data = vg.logical_volume("data").expect("data lv");
    assert!(!data.thin());
    assert!(!data.snapshot(&vg));
    assert_eq!(data.resolve_origin(&vg), None);
}

#[test]
fn thin_snapshot_end_to_end() {
    let vg = VolumeGroupConfig::load("vg0", THIN_DUMP).expect("load");
    let snap = vg.logical_volume("snap1").expect("snap1");
    assert!(snap.thin());
    assert!(snap.snapshot(&vg));
    assert_eq!(snap.origin(), Some("base"));
    assert_eq!(snap.resolve_origin(&vg), Some("base"));
    assert!(!vg.logical_volume("base").expect("base").snapshot(&vg));
}

#[test]
fn loading_twice_yields_identical_domain_objects() {
    let a = VolumeGroupConfig::load("vg0", THIN_DUMP).expect("first");
    let b = VolumeGroupConfig::load("vg0", THIN_DUMP).expect("second");
    assert_eq!(a.version(), b.version());
    assert_eq!(a.description(), b.description());
    assert_eq!(a.uuid(), b.uuid());
    assert_eq!(
        a.logical_volumes().keys().collect::<Vec<_>>(),
        b.logical_volumes().keys().collect::<Vec<_>>()
    );
    assert_eq!(
        a.physical_volumes().keys().collect::<Vec<_>>(),
        b.physical_volumes().keys().collect::<Vec<_>>()
    );
}

#[test]
fn thin_lvs_carry_pool_and_device_id() {
    let vg = VolumeGroupConfig::load("vg0", THIN_DUMP).expect("load");
    for lv in vg.logical_volumes().values() {
        assert_eq!(
            lv.thin(),
            lv.device_id().is_some() && lv.thin_pool().is_some(),
            "thin/device_id/thin_pool inconsistent on {}",
            lv.name()
        );
    }
}

#[test]
fn unknown_volume_group_fails() {
    let err = VolumeGroupConfig::load("other", PLAIN_DUMP).unwrap_err();
    assert_eq!(err, DomainError::VolumeGroupNotFound("other".into()));
}
