//! Route decoders: one swap instruction + its correlated transfers -> Trade
//!
//! The two shapes disagree about what to trust. The direct route's declared
//! input amount is a placeholder until a correlated transfer overwrites it,
//! and its spent mint is unknown without correlation. The shared-accounts
//! route declares both mints and an authoritative input amount; only the
//! received amount comes from a transfer.

use crate::chain::{Instruction, Transaction};
use crate::extractor::correlator::{correlate_user_transfers, first_checked_transfer_amount};
use crate::extractor::Trade;
use crate::programs::jupiter::{RouteAccounts, SharedAccountsRouteAccounts, SwapArgs, SwapKind};

/// Decode one qualifying swap instruction into a normalized trade.
///
/// Returns `None` when the instruction's account table or payload does not
/// have the expected shape; the caller skips it.
pub fn decode_swap(
    kind: SwapKind,
    ins: &Instruction,
    tx: &Transaction,
    block_time: i64,
) -> Option<Trade> {
    match kind {
        SwapKind::Route => decode_route(ins, tx, block_time),
        SwapKind::SharedAccountsRoute => decode_shared_accounts_route(ins, tx, block_time),
    }
}

fn decode_route(ins: &Instruction, tx: &Transaction, block_time: i64) -> Option<Trade> {
    let accounts = RouteAccounts::from_instruction(ins)?;
    let args = SwapArgs::from_payload_tail(&ins.data)?;

    let mut trade = Trade {
        kind: SwapKind::Route,
        signature: tx.signature().to_string(),
        timestamp: block_time,
        trader: accounts.user_transfer_authority.to_string(),
        mint_spent: String::new(),
        amount_spent: args.in_amount,
        mint_got: accounts.destination_mint.to_string(),
        amount_got: 0,
        fee: tx.fee,
    };

    let legs = correlate_user_transfers(
        tx,
        accounts.user_source_token_account,
        accounts.user_destination_token_account,
    );
    if let Some(leg) = legs.spent {
        trade.amount_spent = leg.amount;
        if let Some(mint) = leg.mint {
            trade.mint_spent = mint;
        }
    }
    if let Some(leg) = legs.got {
        trade.amount_got = leg.amount;
        if let Some(mint) = leg.mint {
            trade.mint_got = mint;
        }
    }

    Some(trade)
}

fn decode_shared_accounts_route(
    ins: &Instruction,
    tx: &Transaction,
    block_time: i64,
) -> Option<Trade> {
    let accounts = SharedAccountsRouteAccounts::from_instruction(ins)?;
    let args = SwapArgs::from_payload_tail(&ins.data)?;

    Some(Trade {
        kind: SwapKind::SharedAccountsRoute,
        signature: tx.signature().to_string(),
        timestamp: block_time,
        trader: accounts.user_transfer_authority.to_string(),
        mint_spent: accounts.source_mint.to_string(),
        amount_spent: args.in_amount,
        mint_got: accounts.destination_mint.to_string(),
        amount_got: first_checked_transfer_amount(tx).unwrap_or(0),
        fee: tx.fee,
    })
}
