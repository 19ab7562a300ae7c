//! Trade classification: SOL-denominated or token-to-token
//!
//! Pure function of the trade and the batch creation time, so reclassifying
//! the same input always yields the same records.

use crate::chain::SOL_MINT;
use crate::extractor::Trade;
use crate::records::{JupSignature, SolTrade, TokenTrade, BUCKET};

/// The persisted trade shape a classification produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeRecord {
    Sol(SolTrade),
    Token(TokenTrade),
}

/// Classify one normalized trade.
///
/// A trade whose two legs carry the same mint is degenerate (correlation
/// could not tell the legs apart) and is fully suppressed: no trade record,
/// no ledger entry. Everything else yields exactly one trade record plus a
/// ledger entry.
pub fn classify(trade: &Trade, created_at: i64) -> Option<(TradeRecord, JupSignature)> {
    if trade.mint_spent == trade.mint_got {
        return None;
    }

    let spends_sol = trade.mint_spent == SOL_MINT;
    let receives_sol = trade.mint_got == SOL_MINT;

    let record = if spends_sol || receives_sol {
        // spent leg negative, received leg positive
        let (mint, token_delta, sol_delta) = if spends_sol {
            (
                trade.mint_got.clone(),
                trade.amount_got as i128,
                -(trade.amount_spent as i128),
            )
        } else {
            (
                trade.mint_spent.clone(),
                -(trade.amount_spent as i128),
                trade.amount_got as i128,
            )
        };

        TradeRecord::Sol(SolTrade {
            id: trade.signature.clone(),
            bucket: BUCKET,
            trader: trade.trader.clone(),
            mint,
            timestamp: trade.timestamp,
            token_delta,
            sol_delta,
            fee: trade.fee,
            created_at,
        })
    } else {
        TradeRecord::Token(TokenTrade {
            id: trade.signature.clone(),
            bucket: BUCKET,
            trader: trade.trader.clone(),
            timestamp: trade.timestamp,
            mint_spent: trade.mint_spent.clone(),
            amount_spent: trade.amount_spent,
            mint_got: trade.mint_got.clone(),
            amount_got: trade.amount_got,
            fee: trade.fee,
        })
    };

    let signature = JupSignature {
        id: trade.signature.clone(),
        timestamp: trade.timestamp,
        bucket: BUCKET,
        processed: true,
        is_trade_extracted: true,
        error_message: None,
    };

    Some((record, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::jupiter::SwapKind;

    fn trade(mint_spent: &str, amount_spent: u64, mint_got: &str, amount_got: u64) -> Trade {
        Trade {
            kind: SwapKind::Route,
            signature: "sig1".to_string(),
            timestamp: 1_700_000_000,
            trader: "trader".to_string(),
            mint_spent: mint_spent.to_string(),
            amount_spent,
            mint_got: mint_got.to_string(),
            amount_got,
            fee: 5000,
        }
    }

    #[test]
    fn test_spending_sol_yields_sol_trade() {
        let t = trade(SOL_MINT, 1_000_000, "XYZ", 500);
        let (record, sig) = classify(&t, 123).unwrap();

        match record {
            TradeRecord::Sol(s) => {
                assert_eq!(s.id, "sig1");
                assert_eq!(s.mint, "XYZ");
                assert_eq!(s.token_delta, 500);
                assert_eq!(s.sol_delta, -1_000_000);
                assert_eq!(s.fee, 5000);
                assert_eq!(s.created_at, 123);
            }
            TradeRecord::Token(_) => panic!("expected SOL trade"),
        }
        assert!(sig.processed);
        assert!(sig.is_trade_extracted);
        assert_eq!(sig.error_message, None);
    }

    #[test]
    fn test_receiving_sol_yields_sol_trade() {
        let t = trade("XYZ", 500, SOL_MINT, 1_000_000);
        let (record, _) = classify(&t, 0).unwrap();

        match record {
            TradeRecord::Sol(s) => {
                assert_eq!(s.mint, "XYZ");
                assert_eq!(s.token_delta, -500);
                assert_eq!(s.sol_delta, 1_000_000);
            }
            TradeRecord::Token(_) => panic!("expected SOL trade"),
        }
    }

    #[test]
    fn test_token_pair_yields_token_trade() {
        let t = trade("ABC", 200, "DEF", 300);
        let (record, _) = classify(&t, 0).unwrap();

        match record {
            TradeRecord::Token(tt) => {
                assert_eq!(tt.mint_spent, "ABC");
                assert_eq!(tt.amount_spent, 200);
                assert_eq!(tt.mint_got, "DEF");
                assert_eq!(tt.amount_got, 300);
            }
            TradeRecord::Sol(_) => panic!("expected token trade"),
        }
    }

    #[test]
    fn test_same_mint_discarded() {
        assert!(classify(&trade(SOL_MINT, 100, SOL_MINT, 100), 0).is_none());
        assert!(classify(&trade("ABC", 100, "ABC", 90), 0).is_none());
        // both legs unresolved collapses to the same (empty) mint
        assert!(classify(&trade("", 100, "", 90), 0).is_none());
    }

    #[test]
    fn test_empty_spent_mint_tolerated() {
        // unresolved spent mint still classifies, as a token trade
        let t = trade("", 100, "XYZ", 50);
        let (record, _) = classify(&t, 0).unwrap();
        match record {
            TradeRecord::Token(tt) => assert_eq!(tt.mint_spent, ""),
            TradeRecord::Sol(_) => panic!("expected token trade"),
        }
    }

    #[test]
    fn test_classification_is_pure() {
        let t = trade(SOL_MINT, 1_000_000, "XYZ", 500);
        assert_eq!(classify(&t, 42), classify(&t, 42));
    }

    #[test]
    fn test_deltas_have_opposite_signs() {
        for t in [
            trade(SOL_MINT, 10, "XYZ", 20),
            trade("XYZ", 10, SOL_MINT, 20),
        ] {
            if let Some((TradeRecord::Sol(s), _)) = classify(&t, 0) {
                assert!(s.token_delta.signum() * s.sol_delta.signum() == -1);
            } else {
                panic!("expected SOL trade");
            }
        }
    }

    #[test]
    fn test_amounts_beyond_53_bits_survive() {
        let big = (1u64 << 60) + 1;
        let t = trade(SOL_MINT, big, "XYZ", 500);
        if let Some((TradeRecord::Sol(s), _)) = classify(&t, 0) {
            assert_eq!(s.sol_delta, -(big as i128));
        } else {
            panic!("expected SOL trade");
        }
    }
}
