//! Byte-order conversions.
//!
//! Two separate concerns live here and must not be conflated:
//! - Disk decoding: the exception-store format is little-endian on disk no
//!   matter what the host is, so `u64_from_disk` is "LE bytes -> host int".
//! - Network order: big-endian wire convention, a swap on little-endian
//!   hosts and identity on big-endian ones. Kept for protocol use; never
//!   correct for decoding the on-disk format.

use byteorder::{ByteOrder, LittleEndian};
use std::sync::OnceLock;

/// Host endianness, detected once and cached for the process lifetime.
fn host_big_endian() -> bool {
    static BIG: OnceLock<bool> = OnceLock::new();
    *BIG.get_or_init(|| u16::from_ne_bytes([0, 1]) == 1)
}

/// Decode a 64-bit value from its on-disk (little-endian) byte layout.
#[inline]
pub fn u64_from_disk(bytes: &[u8]) -> u64 {
    LittleEndian::read_u64(bytes)
}

/// Encode a 64-bit value into its on-disk (little-endian) byte layout.
#[inline]
pub fn u64_to_disk(out: &mut [u8], v: u64) {
    LittleEndian::write_u64(out, v)
}

/// Host -> network (big-endian) order for a 64-bit value.
#[inline]
pub fn to_network_order_u64(v: u64) -> u64 {
    swap_unless_big(v, host_big_endian())
}

/// Network (big-endian) -> host order for a 64-bit value.
#[inline]
pub fn from_network_order_u64(v: u64) -> u64 {
    swap_unless_big(v, host_big_endian())
}

#[inline]
fn swap_unless_big(v: u64, host_is_big: bool) -> u64 {
    if host_is_big {
        v
    } else {
        v.swap_bytes()
    }
}
