//! Transfer correlation over a transaction's full instruction list
//!
//! A swap instruction only names token accounts; the amounts (and for the
//! direct route, the spent mint) live in the SPL transfers the swap
//! triggered. Those transfers are not necessarily nested under the swap
//! instruction, so correlation scans every instruction of the transaction in
//! execution order. Later matches overwrite earlier ones per role, which
//! makes the fold order-sensitive on purpose.

use crate::chain::Transaction;
use crate::programs::token_program::{Transfer, TransferChecked};

/// One correlated transfer leg.
///
/// `mint` is `None` when the matching transfer does not carry mint
/// information for this role (a plain transfer into the destination
/// account); `Some("")` when a plain transfer's mint lookup against the
/// balance records came up empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLeg {
    pub amount: u64,
    pub mint: Option<String>,
}

/// Correlated spent/got legs for one swap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelatedLegs {
    pub spent: Option<TransferLeg>,
    pub got: Option<TransferLeg>,
}

/// Scan `tx` for transfers touching the user's source and destination token
/// accounts. The last matching transfer per role wins.
pub fn correlate_user_transfers(
    tx: &Transaction,
    user_source_account: &str,
    user_destination_account: &str,
) -> CorrelatedLegs {
    let mut legs = CorrelatedLegs::default();

    for ins in tx.flattened() {
        if let Some(checked) = TransferChecked::from_instruction(ins) {
            if checked.source == user_source_account {
                legs.spent = Some(TransferLeg {
                    amount: checked.amount,
                    mint: Some(checked.mint.to_string()),
                });
            }
            if checked.destination == user_destination_account {
                legs.got = Some(TransferLeg {
                    amount: checked.amount,
                    mint: Some(checked.mint.to_string()),
                });
            }
        }

        if let Some(transfer) = Transfer::from_instruction(ins) {
            if transfer.source == user_source_account {
                // plain transfers name no mint; infer it from what the
                // destination account held before the transfer
                let mint = pre_transfer_mint(tx, transfer.destination);
                if mint.is_empty() {
                    log::warn!(
                        "unresolved mint for plain transfer into {} (tx {})",
                        transfer.destination,
                        tx.signature()
                    );
                }
                legs.spent = Some(TransferLeg {
                    amount: transfer.amount,
                    mint: Some(mint),
                });
            }
            if transfer.destination == user_destination_account {
                legs.got = Some(TransferLeg {
                    amount: transfer.amount,
                    mint: None,
                });
            }
        }
    }

    legs
}

/// Amount of the first checked transfer anywhere in the transaction.
///
/// The shared-accounts route settles the user's received leg with a checked
/// transfer; its declared input amount covers the other side.
pub fn first_checked_transfer_amount(tx: &Transaction) -> Option<u64> {
    tx.flattened()
        .into_iter()
        .find_map(|ins| TransferChecked::from_instruction(ins).map(|t| t.amount))
}

/// Mint the given token account held before this transaction, empty when no
/// balance record matches.
fn pre_transfer_mint(tx: &Transaction, account: &str) -> String {
    tx.token_balances
        .iter()
        .find(|tb| tb.account == account)
        .and_then(|tb| tb.pre_mint.clone())
        .unwrap_or_default()
}
