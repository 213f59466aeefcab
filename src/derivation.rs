//! The derivation kernel (§4.3): turning a transaction public key and the caller's private view
//! key into a shared secret, and that shared secret plus an output index into a per-output
//! scalar.

use monero_ed25519::{Point, Scalar};
use monero_primitives::{hash_to_scalar, varint_encode};

/// `key_derivation`: `encode(8 · view_priv · tx_pub)`.
///
/// The factor of 8 clears the cofactor, landing the shared secret in the prime-order subgroup;
/// omitting it produces a derivation that disagrees with every other implementation on the same
/// input (P8).
pub fn key_derivation(tx_pub: Point, view_priv: Scalar) -> [u8; 32] {
  tx_pub.scalarmult(view_priv).mul_by_cofactor().compress().to_bytes()
}

/// `derivation_to_scalar`: `H_s(d ‖ varint(i))`, the per-output scalar used both to invert the
/// stealth-address formula and to derive the amount mask.
pub fn derivation_to_scalar(derivation: &[u8; 32], output_index: u64) -> Scalar {
  let mut preimage = Vec::with_capacity(32 + 10);
  preimage.extend_from_slice(derivation);
  preimage.extend_from_slice(&varint_encode(output_index));
  hash_to_scalar(preimage)
}

#[cfg(test)]
mod tests {
  use super::*;
  use monero_ed25519::CompressedPoint;

  #[test]
  fn derivation_to_scalar_depends_on_index() {
    let derivation = [0x11u8; 32];
    assert_ne!(derivation_to_scalar(&derivation, 0), derivation_to_scalar(&derivation, 1));
  }

  #[test]
  fn key_derivation_is_deterministic() {
    let tx_pub = CompressedPoint::G.decompress().unwrap();
    let view_priv = Scalar::from_bytes([7u8; 32]);
    assert_eq!(key_derivation(tx_pub, view_priv), key_derivation(tx_pub, view_priv));
  }
}
