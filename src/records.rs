//! Persisted record shapes
//!
//! Three collections leave a batch: SOL-denominated trades, token-to-token
//! trades, and the append-only signature ledger the scanner uses to track
//! what has already been processed. Record ids are transaction signatures,
//! inserted with ignore-on-conflict semantics downstream.

use serde::{Deserialize, Serialize};

/// Fixed partition tag on every persisted record
pub const BUCKET: i32 = 1;

/// A trade with SOL on one side.
///
/// Deltas are signed from the trader's point of view: the spent leg is
/// negative, the received leg positive. i128 holds any u64 magnitude with
/// its sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolTrade {
    pub id: String,
    pub bucket: i32,
    pub trader: String,
    /// The non-SOL mint of the pair
    pub mint: String,
    pub timestamp: i64,
    pub token_delta: i128,
    pub sol_delta: i128,
    pub fee: u64,
    pub created_at: i64,
}

/// A trade between two non-SOL tokens, both legs unsigned magnitudes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTrade {
    pub id: String,
    pub bucket: i32,
    pub trader: String,
    pub timestamp: i64,
    pub mint_spent: String,
    pub amount_spent: u64,
    pub mint_got: String,
    pub amount_got: u64,
    pub fee: u64,
}

/// Ledger entry marking a transaction as scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JupSignature {
    pub id: String,
    pub timestamp: i64,
    pub bucket: i32,
    pub processed: bool,
    pub is_trade_extracted: bool,
    pub error_message: Option<String>,
}
