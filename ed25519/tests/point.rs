//! Arithmetic checks for `Point`/`Scalar` against `curve25519_dalek`'s own constants.

use curve25519_dalek::{constants::ED25519_BASEPOINT_POINT, traits::IsIdentity};

use monero_ed25519::{CompressedPoint, Point, Scalar};

#[test]
fn scalarmult_base_matches_dalek_basepoint() {
  let two = Scalar::from_bytes({
    let mut bytes = [0u8; 32];
    bytes[0] = 2;
    bytes
  });
  let doubled = Point::scalarmult_base(two);
  assert_eq!(doubled.compress(), Point::from(ED25519_BASEPOINT_POINT + ED25519_BASEPOINT_POINT).compress());
}

#[test]
fn negation_is_additive_inverse() {
  let one = Scalar::from_bytes({
    let mut bytes = [0u8; 32];
    bytes[0] = 1;
    bytes
  });
  let g = Point::scalarmult_base(one);
  let sum = g + (-g);
  assert!(sum.into().is_identity());
}

#[test]
fn cofactor_clearing_is_idempotent_on_the_prime_order_subgroup() {
  let g = CompressedPoint::G.decompress().unwrap();
  assert_eq!(g.mul_by_cofactor().compress(), g.mul_by_cofactor().mul_by_cofactor().compress());
}

#[test]
fn identity_roundtrips() {
  let identity = CompressedPoint::IDENTITY.decompress().unwrap();
  assert_eq!(identity.compress(), CompressedPoint::IDENTITY);
}
