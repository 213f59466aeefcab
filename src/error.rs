use thiserror::Error;

/// Errors that can abort an entire scan call.
///
/// Only caller-provided cryptographic material can produce one of these; chain content never
/// does. Every other failure mode (a malformed `extra` blob, an output with a missing field, a
/// public key that doesn't decode to a curve point, a too-short encrypted amount) is per-output
/// or per-transaction and is handled by skipping, not by returning an error — see
/// [`SkipReason`] and the module documentation in [`crate::recognizer`].
#[derive(Debug, Error)]
pub enum ScanError {
  /// The caller's private view key is not a canonical scalar encoding.
  #[error("private view key is not a canonical scalar encoding")]
  BadScalarEncoding,

  /// An invariant that should be impossible to violate was violated.
  #[error("internal invariant violated: {0}")]
  InternalInvariant(&'static str),
}

/// Why a single output or transaction was dropped from the result.
///
/// These never escape a scan call as an `Err`; they exist purely so the caller's logger can
/// explain a skip, per the non-fatal, chain-content-tolerant error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The `extra` blob couldn't be parsed far enough to find a primary transaction public key.
  MalformedExtra,
  /// An output is missing its `output_key` or `view_tag` field, or they don't parse as hex.
  MalformedOutput,
  /// A 32-byte public key does not decode to a point on the curve.
  InvalidPoint,
  /// The 8-byte encrypted amount is missing or the wrong length.
  DecryptShort,
}

impl SkipReason {
  /// A short, stable description suitable for a log line.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::MalformedExtra => "malformed extra field",
      Self::MalformedOutput => "malformed output",
      Self::InvalidPoint => "public key does not decode to a curve point",
      Self::DecryptShort => "encrypted amount missing or wrong length",
    }
  }
}
