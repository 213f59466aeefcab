//! Hashing and variable-length-integer primitives shared by the derivation kernel and the
//! output recognizer.
//!
//! `keccak256` is the original, pre-standard Keccak padding (the one Monero and its predecessor
//! CryptoNote use throughout), not NIST SHA3-256; the `sha3` crate's `Keccak256` type already
//! implements exactly that variant, so this is a thin, named wrapper rather than a reimplementation.

use sha3::{Digest, Keccak256};

use monero_ed25519::Scalar;

pub use monero_io::{read_varint, write_varint};

/// `keccak256(data)`: the pre-standard Keccak-256 digest of an arbitrary byte string.
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
  Keccak256::digest(data.as_ref()).into()
}

/// `hash_to_scalar(data) = scalar_from_bytes(keccak256(data))`, reduced modulo the curve order.
///
/// This is `H_s` in the Monero literature: the function turning a derivation (plus an output
/// index, plus whatever else is hashed alongside it) into a scalar usable in further curve
/// arithmetic.
pub fn hash_to_scalar(data: impl AsRef<[u8]>) -> Scalar {
  Scalar::hash(data)
}

/// Encode `value` as a VarInt: 7 value bits per byte, little-endian group order, continuation
/// bit set on every group but the last.
pub fn varint_encode(value: u64) -> Vec<u8> {
  let mut out = Vec::new();
  write_varint(value, &mut out).expect("writing to a `Vec` is infallible");
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keccak256_matches_known_vector() {
    // keccak256("") per the Keccak reference test vectors (pre-NIST padding).
    assert_eq!(
      hex::encode(keccak256(b"")),
      "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a47"
    );
  }

  #[test]
  fn varint_encode_matches_write_varint() {
    for value in [0u64, 1, 127, 128, 300, u64::MAX] {
      let mut expected = Vec::new();
      write_varint(value, &mut expected).unwrap();
      assert_eq!(varint_encode(value), expected);
    }
  }

  #[test]
  fn hash_to_scalar_is_deterministic() {
    assert_eq!(hash_to_scalar(b"same input"), hash_to_scalar(b"same input"));
  }
}
