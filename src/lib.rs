//! Offline output recognition for a privacy-preserving blockchain.
//!
//! Given a block's transactions and a caller's private view key, [`Scanner::scan`] performs
//! local cryptographic filtering and returns the outputs that plausibly belong to the wallet,
//! annotated with decrypted amounts and recovered destination spend keys. It trusts no remote
//! wallet service and holds no state between calls.
//!
//! The scanner does not construct, sign, or send transactions; does not verify ring signatures
//! or chain validity; and does not maintain a subaddress index. Callers must reconcile a
//! [`CandidateOutput`]'s `recovered_public_spend_key` against their own authoritative
//! owned-subaddress set before treating it as theirs.

pub mod config;
pub mod derivation;
pub mod error;
pub mod extra;
pub mod recognizer;
pub mod scan;
pub mod transaction;

pub use config::ScannerConfig;
pub use error::ScanError;
pub use scan::{CandidateOutput, Scanner};
pub use transaction::Transaction;
