//! Tag-length-value scan of a transaction's `extra` blob (§4.4).
//!
//! This is a left-to-right cursor sweep, not a full parse of every tag Monero's reference client
//! understands: only the primary transaction public key (`0x01`) and the additional-public-keys
//! list (`0x04`) feed the recognizer, so every other tag, known or not, is skipped by a single
//! length byte. A truncated blob simply ends the scan with whatever was collected so far; nothing
//! here is fatal.

use monero_ed25519::CompressedPoint;

const TAG_TX_PUBLIC_KEY: u8 = 0x01;
const TAG_NONCE: u8 = 0x02;
const TAG_ADDITIONAL_PUBLIC_KEYS: u8 = 0x04;

/// The public keys recovered from an `extra` blob.
#[derive(Debug, Clone, Default)]
pub struct ParsedExtra {
  /// The primary transaction public key, if the blob carried one. First occurrence wins; a
  /// second `0x01` tag later in the blob is discarded rather than overwriting this.
  pub primary_tx_pubkey: Option<CompressedPoint>,
  /// Additional per-output public keys, in the order they appeared.
  pub additional_pubkeys: Vec<CompressedPoint>,
}

/// Parse an `extra` blob. Never fails: on truncation it returns whatever was collected before
/// the cut.
pub fn parse_extra(extra: &[u8]) -> ParsedExtra {
  let mut parsed = ParsedExtra::default();
  let mut cursor = 0usize;

  while cursor < extra.len() {
    let tag = extra[cursor];
    cursor += 1;

    match tag {
      TAG_TX_PUBLIC_KEY => {
        let Some(key) = take(extra, &mut cursor, 32) else { break };
        if parsed.primary_tx_pubkey.is_none() {
          parsed.primary_tx_pubkey = Some(CompressedPoint::from(to_array(key)));
        }
      }

      TAG_NONCE => {
        let Some(&len) = extra.get(cursor) else { break };
        cursor += 1;
        if take(extra, &mut cursor, usize::from(len)).is_none() {
          break;
        }
      }

      TAG_ADDITIONAL_PUBLIC_KEYS => {
        let Some(&count) = extra.get(cursor) else { break };
        cursor += 1;
        for _ in 0..count {
          let Some(key) = take(extra, &mut cursor, 32) else { break };
          parsed.additional_pubkeys.push(CompressedPoint::from(to_array(key)));
        }
      }

      _unknown => {
        let Some(&len) = extra.get(cursor) else { break };
        cursor += 1;
        if take(extra, &mut cursor, usize::from(len)).is_none() {
          break;
        }
      }
    }
  }

  parsed
}

/// Take `len` bytes starting at `*cursor`, advancing it. Returns `None` (without advancing) if
/// fewer than `len` bytes remain.
fn take<'e>(extra: &'e [u8], cursor: &mut usize, len: usize) -> Option<&'e [u8]> {
  let end = cursor.checked_add(len)?;
  let slice = extra.get(*cursor .. end)?;
  *cursor = end;
  Some(slice)
}

fn to_array(slice: &[u8]) -> [u8; 32] {
  slice.try_into().expect("`take` always returns exactly the requested length")
}
