//! The logical transaction shape the scanner consumes.
//!
//! This mirrors what a daemon's `get_transactions` (`decode_as_json=true`) response looks like
//! once deserialized, not the binary wire format: `extra` is already a flat byte array, public
//! keys and the encrypted amount are hex strings. Fetching and decoding the raw response is the
//! RPC collaborator's job, not this crate's.

use serde::Deserialize;

/// A transaction as the scanner receives it: one block-fetch response entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
  /// The transaction hash, as a 64-character hex string.
  pub hash: String,
  pub version: u64,
  pub unlock_time: u64,
  /// The raw `extra` bytes, already decoded out of whatever TLV/varint wrapping the RPC used.
  pub extra: Vec<u8>,
  pub vin: Vec<Input>,
  pub vout: Vec<Output>,
  pub rct_signatures: RctSignatures,
}

impl Transaction {
  /// A transaction is a coinbase (miner reward) transaction iff it has exactly one input and
  /// that input is a `gen` input.
  pub fn is_coinbase(&self) -> bool {
    matches!(self.vin.as_slice(), [Input { gen: Some(_) }])
  }
}

/// One transaction input.
///
/// Only the `gen` variant is distinguished; every other input kind (`key`, in real Monero
/// transactions) is irrelevant to output scanning and isn't modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct Input {
  /// Present (with any value) iff this is a coinbase-style generation input.
  #[serde(default)]
  pub gen: Option<serde_json::Value>,
}

/// One transaction output, as the scanner needs it.
#[derive(Debug, Clone, Deserialize)]
pub struct Output {
  /// The output's one-time public key, 32 bytes, hex-encoded.
  pub output_key: String,
  /// The one-byte view tag, hex-encoded (2 hex characters).
  pub view_tag: String,
}

/// The RingCT signature header: just enough to recover per-output encrypted amounts and report
/// the RCT type.
#[derive(Debug, Clone, Deserialize)]
pub struct RctSignatures {
  #[serde(rename = "type")]
  pub rct_type: u64,
  /// Per-output ECDH info, index-aligned with `vout`.
  #[serde(rename = "ecdhInfo", default)]
  pub ecdh_info: Vec<EcdhInfo>,
}

/// One output's encrypted-amount entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EcdhInfo {
  /// The 8-byte encrypted (compact/RingCT-masked) amount, hex-encoded.
  pub amount: String,
}
