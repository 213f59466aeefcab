//! The output recognizer (§4.5): the per-output pipeline that decides whether an output belongs
//! to the scanning wallet, and if so recovers its destination spend key and decrypted amount.
//!
//! Nothing here raises on adversarial chain content. A malformed-but-parseable output is
//! represented as `Ok(None)` (not ours, or not ours that we could tell); only a shape the
//! recognizer cannot evaluate at all returns `Err` — see [`crate::error::SkipReason`].

use monero_ed25519::{CompressedPoint, Point, Scalar};
use monero_primitives::keccak256;
use rust_decimal::Decimal;

use crate::derivation::{derivation_to_scalar, key_derivation};
use crate::error::SkipReason;

const VIEW_TAG_DOMAIN: &[u8] = b"view_tag";
const AMOUNT_DOMAIN: &[u8] = b"amount";

/// One output, decoded to the shapes the recognizer needs.
pub struct OutputInput {
  pub index: u64,
  pub output_key: CompressedPoint,
  pub view_tag: u8,
  pub encrypted_amount: [u8; 8],
}

/// The public keys an `extra` blob yielded, borrowed from [`crate::extra::ParsedExtra`].
pub struct TxPublicKeys<'a> {
  pub primary: Option<CompressedPoint>,
  pub additional: &'a [CompressedPoint],
}

/// An output the recognizer accepted as (plausibly) belonging to the scanning wallet.
pub struct RecognizedOutput {
  pub output_index: u64,
  pub tx_public_key: CompressedPoint,
  pub output_key: CompressedPoint,
  pub recovered_public_spend_key: CompressedPoint,
  pub amount_piconero: u64,
  pub amount_xmr: String,
}

/// Run the full per-output pipeline (§4.5 steps 1-6).
///
/// Returns `Ok(None)` for an output that is well-formed but not recognized: neither candidate's
/// view tag matched, or one did but the output then failed the safe-amount sanity filter.
/// Returns `Err(reason)` for an output whose own fields the recognizer cannot even evaluate
/// (an unparseable output key, or one that doesn't decode to a curve point).
pub fn recognize_output(
  keys: &TxPublicKeys<'_>,
  output: &OutputInput,
  view_priv: Scalar,
  safe_amount_ceiling_piconero: u128,
) -> Result<Option<RecognizedOutput>, SkipReason> {
  let output_point = output.output_key.decompress().ok_or(SkipReason::InvalidPoint)?;

  // Step 1 — choose candidate tx public keys.
  let primary_candidate = primary_candidate_for_index(keys, output.index);
  let fallback_candidate =
    usize::try_from(output.index).ok().and_then(|i| keys.additional.get(i)).copied();

  // Step 2 — view-tag filter, trying the primary candidate then the fallback.
  let Some((derivation, tx_public_key)) = [primary_candidate, fallback_candidate]
    .into_iter()
    .flatten()
    .find_map(|candidate| matching_derivation(candidate, output, view_priv))
  else {
    return Ok(None);
  };

  // Step 3 — recover the destination spend key: P - H_s(d‖i)·G = D.
  let s = derivation_to_scalar(&derivation, output.index);
  let s_point = Point::scalarmult_base(s);
  let recovered = (output_point + (-s_point)).compress();

  // Step 4 — decrypt the amount.
  let s_encoded = <[u8; 32]>::from(s);
  let mut mask_preimage = Vec::with_capacity(AMOUNT_DOMAIN.len() + 32);
  mask_preimage.extend_from_slice(AMOUNT_DOMAIN);
  mask_preimage.extend_from_slice(&s_encoded);
  let mask = keccak256(mask_preimage);

  let mut amount_bytes = [0u8; 8];
  for i in 0 .. 8 {
    amount_bytes[i] = mask[i] ^ output.encrypted_amount[i];
  }
  let amount_piconero = u64::from_le_bytes(amount_bytes);

  // Step 5 — safe-amount sanity filter. Computed here, on the freshly-decrypted amount, and
  // only then checked: a scanner that checked a not-yet-computed amount would never reject
  // anything.
  if u128::from(amount_piconero) > safe_amount_ceiling_piconero {
    return Ok(None);
  }

  // Step 6 — emit.
  Ok(Some(RecognizedOutput {
    output_index: output.index,
    tx_public_key,
    output_key: output.output_key,
    recovered_public_spend_key: recovered,
    amount_piconero,
    amount_xmr: format_piconero_as_xmr(amount_piconero),
  }))
}

/// The primary candidate for output `index`: `additional_pubkeys[index - 1]` if present,
/// otherwise the primary transaction public key. This off-by-one convention is load-bearing —
/// it is how a subaddress-destined output signals "use my per-output tx key instead" — and must
/// not be simplified away.
fn primary_candidate_for_index(keys: &TxPublicKeys<'_>, index: u64) -> Option<CompressedPoint> {
  if index >= 1 {
    let from_additional =
      usize::try_from(index - 1).ok().and_then(|i| keys.additional.get(i)).copied();
    if from_additional.is_some() {
      return from_additional;
    }
  }
  keys.primary
}

/// Decode `candidate`, compute its derivation against `view_priv`, and check the output's view
/// tag against it. Returns the derivation (for stealth-key recovery) and the candidate itself
/// (reported back as the output's `tx_public_key`) on a match.
///
/// A candidate that fails to decompress is simply not a match; tx public keys come from chain
/// content an attacker controls just as output keys do.
fn matching_derivation(
  candidate: CompressedPoint,
  output: &OutputInput,
  view_priv: Scalar,
) -> Option<([u8; 32], CompressedPoint)> {
  let point = candidate.decompress()?;
  let derivation = key_derivation(point, view_priv);

  let mut preimage = Vec::with_capacity(VIEW_TAG_DOMAIN.len() + 32 + 10);
  preimage.extend_from_slice(VIEW_TAG_DOMAIN);
  preimage.extend_from_slice(&derivation);
  preimage.extend_from_slice(&monero_primitives::varint_encode(output.index));
  let expected_view_tag = keccak256(preimage)[0];

  (expected_view_tag == output.view_tag).then_some((derivation, candidate))
}

/// Render a piconero amount as an XMR decimal string with exactly 12 fractional digits.
///
/// Uses fixed-scale decimal arithmetic, never binary floating point, so the conversion is exact
/// for every `u64` amount (P4).
fn format_piconero_as_xmr(amount_piconero: u64) -> String {
  Decimal::from_i128_with_scale(i128::from(amount_piconero), 12).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn encrypt_amount(derivation_scalar: Scalar, amount: u64) -> [u8; 8] {
    let s_encoded = <[u8; 32]>::from(derivation_scalar);
    let mut preimage = Vec::new();
    preimage.extend_from_slice(AMOUNT_DOMAIN);
    preimage.extend_from_slice(&s_encoded);
    let mask = keccak256(preimage);
    let mut out = [0u8; 8];
    for i in 0 .. 8 {
      out[i] = mask[i] ^ amount.to_le_bytes()[i];
    }
    out
  }

  fn view_tag_for(derivation: &[u8; 32], index: u64) -> u8 {
    let mut preimage = Vec::new();
    preimage.extend_from_slice(VIEW_TAG_DOMAIN);
    preimage.extend_from_slice(derivation);
    preimage.extend_from_slice(&monero_primitives::varint_encode(index));
    keccak256(preimage)[0]
  }

  /// Builds a genuine output for (view_priv, spend_pub) at the given index and confirms the
  /// whole pipeline recovers it: P3 (recovery correctness) and P4 (amount round-trip).
  #[test]
  fn recognizes_and_recovers_a_genuine_output() {
    let view_priv = Scalar::from_bytes([3u8; 32]);
    let spend_priv = Scalar::from_bytes([5u8; 32]);
    let spend_pub = Point::scalarmult_base(spend_priv);

    let tx_priv = Scalar::from_bytes([9u8; 32]);
    let tx_pub = Point::scalarmult_base(tx_priv);

    let index = 0u64;
    let derivation = key_derivation(tx_pub, view_priv);
    let s = derivation_to_scalar(&derivation, index);
    let output_point = spend_pub + Point::scalarmult_base(s);

    let output = OutputInput {
      index,
      output_key: output_point.compress(),
      view_tag: view_tag_for(&derivation, index),
      encrypted_amount: encrypt_amount(s, 100_000_000_000_000),
    };
    let keys = TxPublicKeys { primary: Some(tx_pub.compress()), additional: &[] };

    let recognized = recognize_output(&keys, &output, view_priv, u128::MAX).unwrap().unwrap();
    assert_eq!(recognized.recovered_public_spend_key, spend_pub.compress());
    assert_eq!(recognized.amount_piconero, 100_000_000_000_000);
    assert_eq!(recognized.amount_xmr, "100.000000000000");
  }

  #[test]
  fn non_matching_view_tag_is_not_recognized() {
    let view_priv = Scalar::from_bytes([3u8; 32]);
    let tx_priv = Scalar::from_bytes([9u8; 32]);
    let tx_pub = Point::scalarmult_base(tx_priv);

    let output = OutputInput {
      index: 0,
      output_key: CompressedPoint::G,
      view_tag: 0,
      encrypted_amount: [0; 8],
    };
    let keys = TxPublicKeys { primary: Some(tx_pub.compress()), additional: &[] };

    // The real expected view tag is vanishingly unlikely to be 0; if this flakes, the
    // probability math in P2 is broken.
    let derivation = key_derivation(tx_pub, view_priv);
    assert_ne!(view_tag_for(&derivation, 0), 0);

    assert!(recognize_output(&keys, &output, view_priv, u128::MAX).unwrap().is_none());
  }

  #[test]
  fn amount_above_ceiling_is_discarded() {
    let view_priv = Scalar::from_bytes([3u8; 32]);
    let spend_priv = Scalar::from_bytes([5u8; 32]);
    let spend_pub = Point::scalarmult_base(spend_priv);
    let tx_priv = Scalar::from_bytes([9u8; 32]);
    let tx_pub = Point::scalarmult_base(tx_priv);

    let index = 0u64;
    let derivation = key_derivation(tx_pub, view_priv);
    let s = derivation_to_scalar(&derivation, index);
    let output_point = spend_pub + Point::scalarmult_base(s);

    // 20000 XMR, over the default 9999 XMR ceiling.
    let amount = 20_000 * 1_000_000_000_000u64;
    let output = OutputInput {
      index,
      output_key: output_point.compress(),
      view_tag: view_tag_for(&derivation, index),
      encrypted_amount: encrypt_amount(s, amount),
    };
    let keys = TxPublicKeys { primary: Some(tx_pub.compress()), additional: &[] };

    let ceiling_piconero = 9999u128 * 1_000_000_000_000;
    assert!(recognize_output(&keys, &output, view_priv, ceiling_piconero).unwrap().is_none());
  }

  #[test]
  fn malformed_output_key_is_rejected() {
    let keys = TxPublicKeys { primary: Some(CompressedPoint::G), additional: &[] };
    let output = OutputInput {
      index: 0,
      output_key: CompressedPoint::from([0xffu8; 32]),
      view_tag: 0,
      encrypted_amount: [0; 8],
    };
    let view_priv = Scalar::from_bytes([1u8; 32]);
    assert!(matches!(
      recognize_output(&keys, &output, view_priv, u128::MAX),
      Err(SkipReason::InvalidPoint)
    ));
  }

  #[test]
  fn subaddress_output_uses_additional_pubkey_at_index_minus_one() {
    let view_priv = Scalar::from_bytes([3u8; 32]);
    let spend_priv = Scalar::from_bytes([5u8; 32]);
    let spend_pub = Point::scalarmult_base(spend_priv);

    // The per-output tx key used for output index 1; output 0 would use the primary instead.
    let per_output_tx_priv = Scalar::from_bytes([11u8; 32]);
    let per_output_tx_pub = Point::scalarmult_base(per_output_tx_priv);
    let primary_tx_pub = Point::scalarmult_base(Scalar::from_bytes([9u8; 32]));

    let index = 1u64;
    let derivation = key_derivation(per_output_tx_pub, view_priv);
    let s = derivation_to_scalar(&derivation, index);
    let output_point = spend_pub + Point::scalarmult_base(s);

    let output = OutputInput {
      index,
      output_key: output_point.compress(),
      view_tag: view_tag_for(&derivation, index),
      encrypted_amount: encrypt_amount(s, 1_000_000_000_000),
    };
    let keys =
      TxPublicKeys { primary: Some(primary_tx_pub.compress()), additional: &[per_output_tx_pub.compress()] };

    let recognized = recognize_output(&keys, &output, view_priv, u128::MAX).unwrap().unwrap();
    assert_eq!(recognized.recovered_public_spend_key, spend_pub.compress());
    assert_eq!(recognized.tx_public_key, per_output_tx_pub.compress());
  }
}
