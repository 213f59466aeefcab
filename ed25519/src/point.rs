use std::ops::{Add, Neg};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

use crate::{CompressedPoint, Scalar};

/// A decompressed point on the edwards25519 curve.
#[derive(Clone, Copy, Eq, Debug, Zeroize)]
pub struct Point(curve25519_dalek::EdwardsPoint);

impl ConstantTimeEq for Point {
  fn ct_eq(&self, other: &Self) -> Choice {
    self.0.ct_eq(&other.0)
  }
}

impl ConditionallySelectable for Point {
  fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
    Self(<_>::conditional_select(&a.0, &b.0, choice))
  }
}

impl PartialEq for Point {
  /// This defers to `ConstantTimeEq::ct_eq`.
  fn eq(&self, other: &Self) -> bool {
    bool::from(self.ct_eq(other))
  }
}

impl Add for Point {
  type Output = Point;
  fn add(self, other: Point) -> Point {
    Point(self.0 + other.0)
  }
}

impl Neg for Point {
  type Output = Point;
  /// Negate a point.
  ///
  /// For the twisted-Edwards curve used here (`a = -1`), negating `(x, y)` is `(-x mod p, y)`.
  /// `curve25519_dalek`'s `EdwardsPoint` negation already implements exactly this identity (it
  /// negates the extended coordinates' `X`/`T` and leaves `Y`/`Z` untouched) rather than a
  /// generic double-and-subtract, so deferring to it here is correct and cheap.
  fn neg(self) -> Point {
    Point(-self.0)
  }
}

impl Point {
  /// `s * G`: multiply the curve's base point by a scalar.
  ///
  /// This runs in the hot path of recovering a stealth output key from the per-output scalar.
  /// `curve25519_dalek`'s basepoint-table scalar multiplication is constant-time in the scalar.
  pub fn scalarmult_base(scalar: Scalar) -> Self {
    Self(&scalar.into() * curve25519_dalek::constants::ED25519_BASEPOINT_TABLE)
  }

  /// `s * P`: multiply an arbitrary point by a scalar.
  ///
  /// Used for the view-key/tx-public-key Diffie-Hellman in the derivation kernel.
  pub fn scalarmult(self, scalar: Scalar) -> Self {
    Self(scalar.into() * self.0)
  }

  /// Multiply this point by the curve's cofactor (8), clearing any torsion component.
  pub fn mul_by_cofactor(self) -> Self {
    Self(self.0.mul_by_cofactor())
  }

  /// Compress this point to its 32-byte encoding.
  pub fn compress(self) -> CompressedPoint {
    CompressedPoint::from(self.0.compress().to_bytes())
  }

  /// Build a `Point` from a `curve25519_dalek::EdwardsPoint` (internal use only).
  #[doc(hidden)]
  pub fn from(point: curve25519_dalek::EdwardsPoint) -> Self {
    Self(point)
  }

  /// Take the `curve25519_dalek::EdwardsPoint` out of a `Point` (internal use only).
  #[doc(hidden)]
  pub fn into(self) -> curve25519_dalek::EdwardsPoint {
    self.0
  }
}
