//! Jupiter v6 swap-instruction shapes
//!
//! Only the two route entrypoints are recognized: `route` and
//! `sharedAccountsRoute`. Their account tables differ in one important way:
//! the direct route names only the destination mint, while the
//! shared-accounts route names both mints, which drives how much transfer
//! correlation each one needs downstream.

use crate::chain::Instruction;

pub const PROGRAM_ID: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";

/// Anchor discriminant of the `route` instruction
pub const ROUTE_D8: [u8; 8] = [0xe5, 0x17, 0xcb, 0x97, 0x7a, 0xe3, 0xad, 0x42];
/// Anchor discriminant of the `sharedAccountsRoute` instruction
pub const SHARED_ACCOUNTS_ROUTE_D8: [u8; 8] = [0xc1, 0x20, 0x9b, 0x33, 0x41, 0xd6, 0x9c, 0x81];

/// The two swap shapes, keyed on the instruction discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SwapKind {
    Route,
    SharedAccountsRoute,
}

impl SwapKind {
    pub fn from_d8(d8: &[u8; 8]) -> Option<SwapKind> {
        match *d8 {
            ROUTE_D8 => Some(SwapKind::Route),
            SHARED_ACCOUNTS_ROUTE_D8 => Some(SwapKind::SharedAccountsRoute),
            _ => None,
        }
    }
}

/// Named accounts of a `route` instruction.
///
/// The source mint is absent from the table; it has to be recovered from the
/// transfers the route triggered.
#[derive(Debug)]
pub struct RouteAccounts<'a> {
    pub user_transfer_authority: &'a str,
    pub user_source_token_account: &'a str,
    pub user_destination_token_account: &'a str,
    pub destination_mint: &'a str,
}

impl<'a> RouteAccounts<'a> {
    pub fn from_instruction(ins: &'a Instruction) -> Option<Self> {
        Some(Self {
            user_transfer_authority: ins.accounts.get(1)?,
            user_source_token_account: ins.accounts.get(2)?,
            user_destination_token_account: ins.accounts.get(3)?,
            destination_mint: ins.accounts.get(5)?,
        })
    }
}

/// Named accounts of a `sharedAccountsRoute` instruction.
#[derive(Debug)]
pub struct SharedAccountsRouteAccounts<'a> {
    pub user_transfer_authority: &'a str,
    pub source_mint: &'a str,
    pub destination_mint: &'a str,
}

impl<'a> SharedAccountsRouteAccounts<'a> {
    pub fn from_instruction(ins: &'a Instruction) -> Option<Self> {
        Some(Self {
            user_transfer_authority: ins.accounts.get(2)?,
            source_mint: ins.accounts.get(7)?,
            destination_mint: ins.accounts.get(8)?,
        })
    }
}

/// Scalar swap arguments shared by both route shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapArgs {
    pub in_amount: u64,
    pub quoted_out_amount: u64,
    pub slippage_bps: u16,
    pub platform_fee_bps: u8,
}

// in_amount(8) + quoted_out_amount(8) + slippage_bps(2) + platform_fee_bps(1)
const ARGS_TAIL_LEN: usize = 19;

impl SwapArgs {
    /// Parse the scalar arguments from the payload tail.
    ///
    /// The route plan ahead of them is variable-length (one enum entry per
    /// hop), but both shapes end with the same fixed-size argument suffix,
    /// so the scalars can be read without walking the plan.
    pub fn from_payload_tail(data: &[u8]) -> Option<Self> {
        if data.len() < 8 + ARGS_TAIL_LEN {
            return None;
        }
        let tail = &data[data.len() - ARGS_TAIL_LEN..];
        Some(Self {
            in_amount: u64::from_le_bytes(tail[0..8].try_into().ok()?),
            quoted_out_amount: u64::from_le_bytes(tail[8..16].try_into().ok()?),
            slippage_bps: u16::from_le_bytes(tail[16..18].try_into().ok()?),
            platform_fee_bps: tail[18],
        })
    }
}
