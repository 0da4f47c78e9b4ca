//! Lane-level primitives for the sponge
//!
//! Lanes are stored widened to `u64` whatever the word size, masked to the
//! word width. The permutation narrows them to the native lane type of the
//! matching Keccak-f instance and widens them back.

use crate::params::LANES;

/// Keccak-f[25 × w] on the lane array, `12 + 2ℓ` rounds
///
/// `word_size` must be 8, 16, 32 or 64; a validated spec guarantees this.
#[inline]
pub fn permute(lanes: &mut [u64; LANES], word_size: usize) {
    match word_size {
        64 => keccak::f1600(lanes),
        32 => permute_narrow::<u32>(lanes, keccak::f800),
        16 => permute_narrow::<u16>(lanes, keccak::f400),
        8 => permute_narrow::<u8>(lanes, keccak::f200),
        _ => unreachable!("unsupported word size {word_size}"),
    }
}

trait Lane: Copy + Default + Into<u64> {
    fn truncate(v: u64) -> Self;
}

impl Lane for u32 {
    #[inline(always)]
    fn truncate(v: u64) -> Self {
        v as u32
    }
}

impl Lane for u16 {
    #[inline(always)]
    fn truncate(v: u64) -> Self {
        v as u16
    }
}

impl Lane for u8 {
    #[inline(always)]
    fn truncate(v: u64) -> Self {
        v as u8
    }
}

#[inline(always)]
fn permute_narrow<L: Lane>(lanes: &mut [u64; LANES], f: fn(&mut [L; LANES])) {
    let mut narrow = [L::default(); LANES];
    for (n, lane) in narrow.iter_mut().zip(lanes.iter()) {
        *n = L::truncate(*lane);
    }
    f(&mut narrow);
    for (lane, n) in lanes.iter_mut().zip(narrow.iter()) {
        *lane = (*n).into();
    }
}

/// XOR one block of input into the lanes, little-endian within each lane
///
/// `block` may end partway through a lane when the rate is not a whole
/// number of words.
#[inline]
pub fn xor_block(lanes: &mut [u64; LANES], block: &[u8], word_bytes: usize) {
    for (lane, chunk) in lanes.iter_mut().zip(block.chunks(word_bytes)) {
        let mut buf = [0u8; 8];
        buf[..chunk.len()].copy_from_slice(chunk);
        *lane ^= u64::from_le_bytes(buf);
    }
}

/// Copy lane bytes into `out`, little-endian within each lane
#[inline]
pub fn extract(lanes: &[u64; LANES], out: &mut [u8], word_bytes: usize) {
    for (chunk, lane) in out.chunks_mut(word_bytes).zip(lanes.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes()[..chunk.len()]);
    }
}
