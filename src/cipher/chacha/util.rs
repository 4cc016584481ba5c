//! Endian and keystream-application helpers shared by all backends.

#[inline]
pub fn load_u32_le(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

#[inline]
pub fn store_u32_le(v: u32, out: &mut [u8]) {
    out[..4].copy_from_slice(&v.to_le_bytes());
}

/// XOR `stream` into `dst`, 16 bytes at a time, scalar tail.
///
/// `stream` must be at least as long as `dst`.
#[inline]
pub fn xor_keystream(dst: &mut [u8], stream: &[u8]) {
    debug_assert!(stream.len() >= dst.len());
    let mut chunks = dst.chunks_exact_mut(16);
    let mut offset = 0usize;
    for chunk in &mut chunks {
        let d = u128::from_le_bytes(chunk[..16].try_into().unwrap());
        let s = u128::from_le_bytes(stream[offset..offset + 16].try_into().unwrap());
        chunk.copy_from_slice(&(d ^ s).to_le_bytes());
        offset += 16;
    }
    for (d, s) in chunks.into_remainder().iter_mut().zip(&stream[offset..]) {
        *d ^= s;
    }
}
