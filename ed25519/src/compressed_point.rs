use std::io::{self, Read, Write};

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use monero_io::read_bytes;

use crate::Point;

/// A compressed point on the edwards25519 curve.
///
/// [`curve25519_dalek::edwards::CompressedEdwardsY::decompress`] does not check that the
/// point is canonically encoded. [`CompressedPoint::decompress`] does: it bans unreduced field
/// elements and the non-canonical `-0` encoding by re-compressing the decompressed candidate and
/// comparing it against the original bytes.
#[derive(Clone, Copy, Eq, Debug, Zeroize)]
pub struct CompressedPoint([u8; 32]);

impl ConstantTimeEq for CompressedPoint {
  fn ct_eq(&self, other: &Self) -> Choice {
    self.0.ct_eq(&other.0)
  }
}
impl PartialEq for CompressedPoint {
  /// This defers to `ConstantTimeEq::ct_eq`.
  fn eq(&self, other: &Self) -> bool {
    bool::from(self.ct_eq(other))
  }
}

impl CompressedPoint {
  /// The encoding of the identity point.
  #[rustfmt::skip]
  pub const IDENTITY: Self = Self([
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
  ]);
  /// The `G` generator for the Monero protocol.
  pub const G: Self = Self(curve25519_dalek::constants::ED25519_BASEPOINT_COMPRESSED.to_bytes());

  /// Read a compressed point. Does not check it's decompressable.
  ///
  /// This may run in variable time.
  pub fn read<R: Read>(r: &mut R) -> io::Result<CompressedPoint> {
    Ok(CompressedPoint(read_bytes(r)?))
  }

  /// Write the compressed point.
  ///
  /// This may run in variable time.
  pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
    w.write_all(&self.0)
  }

  /// The raw bytes of this compressed point.
  ///
  /// No guarantee is made that these bytes represent a valid point.
  pub fn to_bytes(&self) -> [u8; 32] {
    self.0
  }

  /// Decompress a canonically-encoded edwards25519 point.
  ///
  /// The group's order is `8 * l`; to ensure no point has multiple representations, this bans
  /// unreduced field elements and `-0`, neither of which are canonical.
  ///
  /// This does not check membership in the prime-order subgroup.
  pub fn decompress(&self) -> Option<Point> {
    curve25519_dalek::edwards::CompressedEdwardsY(self.0)
      .decompress()
      // Ban points which are either unreduced or -0
      .filter(|point| point.compress().to_bytes() == self.0)
      .map(Point::from)
  }
}

impl From<[u8; 32]> for CompressedPoint {
  fn from(value: [u8; 32]) -> Self {
    Self(value)
  }
}
