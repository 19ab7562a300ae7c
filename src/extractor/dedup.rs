//! Duplicate-trade reconciliation
//!
//! One transaction can match the outer scan twice (a nested route call
//! inside a shared-accounts route), producing two SOL trades with the same
//! id that describe complementary legs of the same swap. The two
//! observations report the token leg with opposite signs, so the merged
//! record keeps the first observation's SOL delta and negates the second's
//! token delta.

use crate::records::SolTrade;
use std::collections::HashMap;

/// Merge SOL trades sharing an id down to a single record per id.
///
/// The first-encountered record is the base, the last-encountered the
/// supplement: base keeps its sol_delta, its token_delta becomes the
/// negation of the supplement's. Merged records are appended after the
/// unaffected ones. Returns the number of ids that had duplicates.
pub fn resolve_duplicates(sol_trades: &mut Vec<SolTrade>) -> usize {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for trade in sol_trades.iter() {
        *counts.entry(trade.id.as_str()).or_insert(0) += 1;
    }

    // first-encounter order keeps the pass deterministic
    let mut duplicates: Vec<String> = Vec::new();
    for trade in sol_trades.iter() {
        if counts[trade.id.as_str()] > 1 && !duplicates.contains(&trade.id) {
            duplicates.push(trade.id.clone());
        }
    }

    for id in &duplicates {
        let mut first: Option<SolTrade> = None;
        let mut supplement: Option<SolTrade> = None;
        let mut group_size = 0usize;

        for trade in sol_trades.iter() {
            if &trade.id == id {
                group_size += 1;
                if first.is_none() {
                    first = Some(trade.clone());
                } else {
                    // later occurrences overwrite: the last one supplements
                    supplement = Some(trade.clone());
                }
            }
        }

        if group_size > 2 {
            log::warn!(
                "{} records share trade id {}; merging first against last, dropping the rest",
                group_size,
                id
            );
        }

        let (Some(mut merged), Some(supplement)) = (first, supplement) else {
            continue;
        };
        merged.token_delta = -supplement.token_delta;

        sol_trades.retain(|t| &t.id != id);
        sol_trades.push(merged);
    }

    duplicates.len()
}
