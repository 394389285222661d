//! Classic (copy-on-write) snapshot differencing.
//!
//! The exception store already is the list of changed blocks: a header
//! chunk, then alternating runs of (origin_block, snapshot_block) pairs and
//! the relocated data itself. We read the pairs and skip the data.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};

use crate::consts::{EXCEPTION_SIZE, EXCEPTION_STORE_MAGIC, SECTOR_SIZE};
use crate::dev;
use crate::endian;
use crate::errors::SnapshotError;
use crate::snapshot::BlockRange;

struct StoreHeader {
    /// Chunk size in bytes.
    chunk_size: u64,
}

/// Byte ranges of the origin LV that the snapshot `vg`/`lv` has diverged
/// from, read from the snapshot's `-cow` device under /dev/mapper.
pub fn differences(vg: &str, lv: &str) -> Result<Vec<BlockRange>, SnapshotError> {
    let path = dev::cow_device_path(vg, lv);
    debug!("scanning exception store {}", path.display());
    let mut store = File::open(&path)?;
    scan_store(&mut store)
}

/// Scan an exception store from any readable, seekable source.
pub fn scan_store<R: Read + Seek>(store: &mut R) -> Result<Vec<BlockRange>, SnapshotError> {
    let header = read_header(store)?;
    let chunk_size = header.chunk_size;
    let pairs_per_chunk = chunk_size / EXCEPTION_SIZE;
    // Data region after each full group: chunk_size^2/16 bytes. A hostile
    // header can push this past u64/i64 range; reject it up front.
    let data_region_len = chunk_size
        .checked_mul(pairs_per_chunk)
        .and_then(|len| i64::try_from(len).ok())
        .ok_or_else(|| {
            SnapshotError::MalformedDump(
                "exception store header declares an oversized chunk size".into(),
            )
        })?;

    // The header chunk occupies one full chunk, not just its 16 bytes.
    store.seek(SeekFrom::Start(chunk_size))?;

    let mut blocks: Vec<u64> = Vec::new();
    'scan: loop {
        for _ in 0..pairs_per_chunk {
            let mut pair = [0u8; 16];
            match store.read_exact(&mut pair) {
                Ok(()) => {}
                // End-of-device without a sentinel: a partially filled final
                // metadata chunk is a valid way for the stream to end.
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break 'scan,
                Err(e) => return Err(e.into()),
            }
            let origin_block = endian::u64_from_disk(&pair[0..8]);
            let snapshot_block = endian::u64_from_disk(&pair[8..16]);

            // Offset 0 is the header chunk, never a valid exception target,
            // so it doubles as the end-of-table sentinel.
            if snapshot_block == 0 {
                break 'scan;
            }
            trace!("exception: origin block {origin_block} -> store block {snapshot_block}");
            blocks.push(origin_block);
        }
        // A full group of pairs is followed by the relocated data itself,
        // one chunk per pair slot. We only care where it ends.
        store.seek(SeekFrom::Current(data_region_len))?;
    }

    debug!("exception store scan found {} changed chunk(s)", blocks.len());
    Ok(blocks
        .into_iter()
        .map(|b| BlockRange::from_block(b, chunk_size))
        .collect())
}

fn read_header<R: Read>(store: &mut R) -> Result<StoreHeader, SnapshotError> {
    let magic = store.read_u32::<LittleEndian>()?;
    if magic != EXCEPTION_STORE_MAGIC {
        return Err(SnapshotError::InvalidMagic(magic));
    }
    let valid = store.read_u32::<LittleEndian>()?;
    if valid != 1 {
        return Err(SnapshotError::MarkedInvalid);
    }
    let version = store.read_u32::<LittleEndian>()?;
    if version != 1 {
        return Err(SnapshotError::UnsupportedVersion(version));
    }
    let chunk_sectors = store.read_u32::<LittleEndian>()?;
    if chunk_sectors == 0 {
        return Err(SnapshotError::MalformedDump(
            "exception store header declares a zero chunk size".into(),
        ));
    }
    Ok(StoreHeader {
        chunk_size: chunk_sectors as u64 * SECTOR_SIZE,
    })
}
