use std::io::{self, Read, Write};

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use rand_core::{CryptoRng, RngCore};

use sha3::{Digest, Keccak256};

use monero_io::read_bytes;

/// A scalar reduced modulo the edwards25519 group order `l`.
#[derive(Clone, Copy, Eq, Debug, Zeroize)]
pub struct Scalar([u8; 32]);

impl ConstantTimeEq for Scalar {
  fn ct_eq(&self, other: &Self) -> Choice {
    self.0.ct_eq(&other.0)
  }
}
impl PartialEq for Scalar {
  /// This defers to `ConstantTimeEq::ct_eq`.
  fn eq(&self, other: &Self) -> bool {
    bool::from(self.ct_eq(other))
  }
}

impl Scalar {
  /// Decode 32 little-endian bytes into a `Scalar`, reducing modulo `l` if the bytes aren't
  /// already a canonical representative.
  ///
  /// Every 32-byte string decodes to some scalar under this function; it never fails. This is
  /// `scalar_from_bytes` from the derivation pipeline, used wherever a hash output or an
  /// untrusted 32-byte field is turned into a scalar.
  pub fn from_bytes(bytes: [u8; 32]) -> Self {
    Self(curve25519_dalek::Scalar::from_bytes_mod_order(bytes).to_bytes())
  }

  /// Read a canonically-encoded scalar, rejecting any representative which isn't already reduced
  /// modulo `l`.
  ///
  /// Used for scalars supplied directly by the caller (the private view key). Accepting an
  /// unreduced encoding there would silently normalize a malformed key instead of surfacing it.
  pub fn read<R: Read>(r: &mut R) -> io::Result<Scalar> {
    let bytes = read_bytes(r)?;
    Option::<curve25519_dalek::Scalar>::from(curve25519_dalek::Scalar::from_canonical_bytes(bytes))
      .ok_or_else(|| io::Error::other("unreduced scalar"))?;
    Ok(Self(bytes))
  }

  /// Write the 32-byte little-endian encoding.
  ///
  /// This may run in variable time.
  pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
    w.write_all(&self.0)
  }

  /// Build a `Scalar` from a `curve25519_dalek::Scalar` (internal use only).
  #[doc(hidden)]
  pub fn from(scalar: curve25519_dalek::Scalar) -> Self {
    Self(scalar.to_bytes())
  }

  /// Create a `curve25519_dalek::Scalar` from a `Scalar`.
  ///
  /// This is hidden as it is not part of our API commitment.
  #[doc(hidden)]
  pub fn into(self) -> curve25519_dalek::Scalar {
    curve25519_dalek::Scalar::from_canonical_bytes(self.0)
      .expect("`Scalar` instantiated with invalid contents")
  }

  /// Sample a uniform scalar.
  pub fn random(rng: &mut (impl RngCore + CryptoRng)) -> Self {
    let mut wide = [0u8; 64];
    rng.fill_bytes(&mut wide);
    let scalar = curve25519_dalek::Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    Self(scalar.to_bytes())
  }

  /// `hash_to_scalar`: `keccak256(data) mod l`.
  ///
  /// This is a narrow, not wide, reduction of the hash output. Monero's reference client
  /// considers a preimage hashing to exactly a multiple of `l` an integrity failure and panics
  /// rather than silently returning the zero scalar; we match that.
  pub fn hash(data: impl AsRef<[u8]>) -> Self {
    let scalar =
      curve25519_dalek::Scalar::from_bytes_mod_order(Keccak256::digest(data.as_ref()).into());
    assert!(
      scalar != curve25519_dalek::Scalar::ZERO,
      "keccak256(preimage) was congruent to 0 mod l"
    );
    Self::from(scalar)
  }
}

impl From<Scalar> for [u8; 32] {
  fn from(scalar: Scalar) -> [u8; 32] {
    scalar.0
  }
}
