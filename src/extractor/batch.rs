//! Batch orchestration: qualify, decode, classify, reconcile
//!
//! Processes one batch of blocks strictly in arrival order. Ordering matters
//! twice over: transfer correlation lets later matches overwrite earlier
//! ones, and duplicate resolution distinguishes first from last occurrence.

use crate::chain::Block;
use crate::extractor::classifier::{classify, TradeRecord};
use crate::extractor::dedup::resolve_duplicates;
use crate::extractor::route_decoder::decode_swap;
use crate::programs::jupiter::{self, SwapKind};
use crate::records::{JupSignature, SolTrade, TokenTrade};

/// Everything one batch pass produced, ready for the store.
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub sol_trades: Vec<SolTrade>,
    pub token_trades: Vec<TokenTrade>,
    pub signatures: Vec<JupSignature>,
    /// SOL trades observed before duplicate resolution
    pub sol_trades_observed: usize,
    /// ids that appeared more than once among the SOL trades
    pub duplicate_ids: usize,
    /// trades that classified with an unresolved (empty) mint on one leg
    pub unresolved_mints: usize,
}

/// Extract and reconcile all trades of a block batch.
///
/// `created_at` is captured once by the caller so every record of the batch
/// shares one creation time and classification stays deterministic.
pub fn extract_batch(blocks: &[Block], created_at: i64) -> BatchOutput {
    let mut out = BatchOutput::default();

    for block in blocks {
        for tx in &block.transactions {
            for ins in tx.flattened() {
                if ins.program_id != jupiter::PROGRAM_ID {
                    continue;
                }
                if !ins.is_committed {
                    continue;
                }
                // a real route call fans out into at least two CPIs
                if ins.inner.len() <= 1 {
                    continue;
                }
                let Some(d8) = ins.d8() else {
                    log::debug!("aggregator instruction without discriminant in {}", tx.signature());
                    continue;
                };
                let Some(kind) = SwapKind::from_d8(&d8) else {
                    log::debug!(
                        "unrecognized aggregator discriminant {} in {}",
                        hex::encode(d8),
                        tx.signature()
                    );
                    continue;
                };

                let Some(trade) = decode_swap(kind, ins, tx, block.timestamp) else {
                    log::warn!("malformed {:?} instruction in {}", kind, tx.signature());
                    continue;
                };

                let Some((record, signature)) = classify(&trade, created_at) else {
                    log::debug!("degenerate same-mint trade discarded in {}", tx.signature());
                    continue;
                };

                if trade.mint_spent.is_empty() || trade.mint_got.is_empty() {
                    out.unresolved_mints += 1;
                }

                match record {
                    TradeRecord::Sol(sol) => out.sol_trades.push(sol),
                    TradeRecord::Token(token) => out.token_trades.push(token),
                }
                out.signatures.push(signature);
            }
        }
    }

    out.sol_trades_observed = out.sol_trades.len();
    out.duplicate_ids = resolve_duplicates(&mut out.sol_trades);

    out
}
