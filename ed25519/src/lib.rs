//! edwards25519 arithmetic for Monero output scanning.
//!
//! Thin, scanning-focused wrappers around [`curve25519_dalek`]: canonical scalar and point
//! encodings, base-point and arbitrary-point scalar multiplication, cofactor clearing, and point
//! negation via the twisted-Edwards `a = -1` identity. Pedersen commitments, key images, and
//! hash-to-point are outside what passive output recognition needs and aren't provided here.

mod scalar;
pub use scalar::Scalar;

mod point;
pub use point::Point;

mod compressed_point;
pub use compressed_point::CompressedPoint;
