//! The scanner facade (§4.6): iterates a block's transactions, runs the recognizer over every
//! output, and attaches per-transaction metadata to survivors.

use monero_ed25519::{CompressedPoint, Scalar};

use crate::config::ScannerConfig;
use crate::error::{ScanError, SkipReason};
use crate::extra::parse_extra;
use crate::recognizer::{recognize_output, OutputInput, TxPublicKeys};
use crate::transaction::Transaction;

/// An output the scanner identified as plausibly belonging to the caller's wallet.
///
/// Callers MUST reconcile `recovered_public_spend_key` against an authoritative owned-subaddress
/// set before treating the output as theirs; this crate tracks no subaddress state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateOutput {
  pub tx_hash: String,
  pub output_index: u64,
  pub recovered_public_spend_key: [u8; 32],
  pub amount_piconero: u64,
  pub amount_xmr: String,
  pub tx_public_key: [u8; 32],
  pub output_key: [u8; 32],
  pub tx_version: u64,
  pub unlock_time: u64,
  pub input_count: usize,
  pub output_count: usize,
  pub rct_type: u64,
  pub is_coinbase: bool,
}

/// Scans blocks of transactions for outputs addressed to a single private view key.
///
/// Pure and single-threaded by contract: a `Scanner` holds no mutable state between calls, and
/// [`Scanner::scan`] is deterministic and referentially transparent in its (view key,
/// transactions) input (P5). Callers are free to parallelize across transactions or blocks
/// themselves; this type imposes no concurrency model of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
  config: ScannerConfig,
}

impl Scanner {
  /// Build a scanner with the given configuration.
  pub fn new(config: ScannerConfig) -> Self {
    Self { config }
  }

  /// Scan every transaction's outputs against `view_key`, a 32-byte little-endian scalar
  /// encoding of the caller's private view key.
  ///
  /// Returns candidates in (transaction index, output index) ascending order (P6). A
  /// transaction whose `extra` field yields no primary transaction public key contributes zero
  /// candidates and is not itself an error (§7, MalformedExtra); only a malformed `view_key`
  /// aborts the whole call.
  pub fn scan(
    &self,
    view_key: [u8; 32],
    transactions: &[Transaction],
  ) -> Result<Vec<CandidateOutput>, ScanError> {
    let view_priv =
      Scalar::read(&mut view_key.as_slice()).map_err(|_| ScanError::BadScalarEncoding)?;

    let mut candidates = Vec::new();
    for tx in transactions {
      self.scan_transaction(tx, view_priv, &mut candidates);
    }
    Ok(candidates)
  }

  fn scan_transaction(&self, tx: &Transaction, view_priv: Scalar, out: &mut Vec<CandidateOutput>) {
    let parsed = parse_extra(&tx.extra);
    let Some(primary) = parsed.primary_tx_pubkey else {
      log::debug!(
        "tx {}: {}, skipping transaction",
        tx.hash,
        SkipReason::MalformedExtra.as_str()
      );
      return;
    };
    let keys = TxPublicKeys { primary: Some(primary), additional: &parsed.additional_pubkeys };

    let is_coinbase = tx.is_coinbase();
    for (index, vout) in tx.vout.iter().enumerate() {
      let index = index as u64;
      let output = match decode_output(vout, index, &tx.rct_signatures.ecdh_info) {
        Ok(output) => output,
        Err(reason) => {
          log::debug!("tx {} output {}: {}, skipping output", tx.hash, index, reason.as_str());
          continue;
        }
      };

      match recognize_output(&keys, &output, view_priv, self.config.safe_amount_ceiling_piconero())
      {
        Ok(Some(recognized)) => out.push(CandidateOutput {
          tx_hash: tx.hash.clone(),
          output_index: recognized.output_index,
          recovered_public_spend_key: recognized.recovered_public_spend_key.to_bytes(),
          amount_piconero: recognized.amount_piconero,
          amount_xmr: recognized.amount_xmr,
          tx_public_key: recognized.tx_public_key.to_bytes(),
          output_key: recognized.output_key.to_bytes(),
          tx_version: tx.version,
          unlock_time: tx.unlock_time,
          input_count: tx.vin.len(),
          output_count: tx.vout.len(),
          rct_type: tx.rct_signatures.rct_type,
          is_coinbase,
        }),
        Ok(None) => {}
        Err(reason) => {
          log::debug!("tx {} output {}: {}, skipping output", tx.hash, index, reason.as_str());
        }
      }
    }
  }
}

fn decode_output(
  vout: &crate::transaction::Output,
  index: u64,
  ecdh_info: &[crate::transaction::EcdhInfo],
) -> Result<OutputInput, SkipReason> {
  let output_key_bytes = decode_hex_array::<32>(&vout.output_key).ok_or(SkipReason::MalformedOutput)?;
  let view_tag = decode_hex_array::<1>(&vout.view_tag).ok_or(SkipReason::MalformedOutput)?[0];
  let encrypted_amount = ecdh_info
    .get(index as usize)
    .and_then(|entry| decode_hex_array::<8>(&entry.amount))
    .ok_or(SkipReason::DecryptShort)?;

  Ok(OutputInput { index, output_key: CompressedPoint::from(output_key_bytes), view_tag, encrypted_amount })
}

fn decode_hex_array<const N: usize>(hex_str: &str) -> Option<[u8; N]> {
  let bytes = hex::decode(hex_str).ok()?;
  bytes.try_into().ok()
}
