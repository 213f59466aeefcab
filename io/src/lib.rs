//! Small binary-reading helpers shared by the ed25519 and scanning crates.
//!
//! Mirrors the subset of Monero's low-level I/O conventions (fixed-width little-endian
//! reads, a byte-at-a-time VarInt) that the output-recognition pipeline actually needs.
//! It intentionally does not attempt to cover the full transaction wire format.

use std::io::{self, Read, Write};

mod varint;
pub use varint::{read_varint, write_varint};

/// Write a single byte.
pub fn write_byte<W: Write>(byte: u8, w: &mut W) -> io::Result<()> {
  w.write_all(&[byte])
}

/// Read a single byte.
pub fn read_byte<R: Read>(r: &mut R) -> io::Result<u8> {
  Ok(read_bytes::<_, 1>(r)?[0])
}

/// Read a fixed number of bytes into an array.
pub fn read_bytes<R: Read, const N: usize>(r: &mut R) -> io::Result<[u8; N]> {
  let mut res = [0; N];
  r.read_exact(&mut res)?;
  Ok(res)
}

/// Read a little-endian `u64`.
pub fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
  read_bytes(r).map(u64::from_le_bytes)
}
