//! Shared naming and on-disk format constants.

// -------- Device-mapper naming --------
pub const DM_DIR: &str = "/dev/mapper";
/// Suffix of a classic snapshot's exception-store device.
pub const COW_SUFFIX: &str = "-cow";
/// Suffix of a thin pool's metadata device.
pub const TMETA_SUFFIX: &str = "_tmeta";

// -------- Sizes --------
/// LVM records chunk sizes in 512-byte sectors.
pub const SECTOR_SIZE: u64 = 512;

// -------- Classic exception store (little-endian on disk) --------
// Header (16 bytes, padded out to one full chunk):
// [magic u32 = 0x70416e53][valid u32][version u32][chunk_size u32 sectors]
// Body: groups of (origin_block u64, snapshot_block u64) pairs, chunk/16
// pairs per group, each full group followed by chunk_size bytes of stored
// data per pair slot. snapshot_block == 0 terminates the stream.
pub const EXCEPTION_STORE_MAGIC: u32 = 0x7041_6e53;
pub const EXCEPTION_SIZE: u64 = 16;
