//! Trade extraction and reconciliation engine
//!
//! Turns qualifying Jupiter swap instructions into persisted trade records:
//! correlate the token transfers a swap triggered, normalize into a `Trade`,
//! classify as SOL-denominated or token-to-token, then reconcile duplicate
//! observations of the same transaction.

pub mod batch;
pub mod classifier;
pub mod correlator;
pub mod dedup;
pub mod route_decoder;

pub use batch::{extract_batch, BatchOutput};
pub use classifier::{classify, TradeRecord};
pub use dedup::resolve_duplicates;

use crate::programs::jupiter::SwapKind;

/// Normalized swap, transient within one batch pass.
///
/// Amounts are exact base-unit integers; some mints exceed the 53-bit
/// safe-double range, so nothing here is floating point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub kind: SwapKind,
    pub signature: String,
    /// Block time, unix seconds
    pub timestamp: i64,
    pub trader: String,
    pub mint_spent: String,
    pub amount_spent: u64,
    pub mint_got: String,
    pub amount_got: u64,
    pub fee: u64,
}
