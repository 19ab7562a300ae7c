//! SPL token transfer shapes
//!
//! Two variants move tokens: `TransferChecked` names the mint in its account
//! table, plain `Transfer` does not. Callers that need a mint for a plain
//! transfer have to consult the transaction's balance records.

use crate::chain::Instruction;

pub const PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Tag byte of the plain `Transfer` instruction
pub const TRANSFER_D1: u8 = 3;
/// Tag byte of the `TransferChecked` instruction
pub const TRANSFER_CHECKED_D1: u8 = 12;

/// Plain transfer view: source, destination, little-endian u64 amount.
#[derive(Debug)]
pub struct Transfer<'a> {
    pub source: &'a str,
    pub destination: &'a str,
    pub amount: u64,
}

impl<'a> Transfer<'a> {
    pub fn from_instruction(ins: &'a Instruction) -> Option<Self> {
        if ins.program_id != PROGRAM_ID || ins.d1() != Some(TRANSFER_D1) {
            return None;
        }
        Some(Self {
            source: ins.accounts.first()?,
            destination: ins.accounts.get(1)?,
            amount: u64::from_le_bytes(ins.data.get(1..9)?.try_into().ok()?),
        })
    }
}

/// Checked transfer view: carries the mint and decimals explicitly.
#[derive(Debug)]
pub struct TransferChecked<'a> {
    pub source: &'a str,
    pub mint: &'a str,
    pub destination: &'a str,
    pub amount: u64,
    pub decimals: u8,
}

impl<'a> TransferChecked<'a> {
    pub fn from_instruction(ins: &'a Instruction) -> Option<Self> {
        if ins.program_id != PROGRAM_ID || ins.d1() != Some(TRANSFER_CHECKED_D1) {
            return None;
        }
        Some(Self {
            source: ins.accounts.first()?,
            mint: ins.accounts.get(1)?,
            destination: ins.accounts.get(2)?,
            amount: u64::from_le_bytes(ins.data.get(1..9)?.try_into().ok()?),
            decimals: ins.data.get(9).copied()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_ins(tag: u8, accounts: Vec<&str>, amount: u64) -> Instruction {
        let mut data = vec![tag];
        data.extend_from_slice(&amount.to_le_bytes());
        if tag == TRANSFER_CHECKED_D1 {
            data.push(6); // decimals
        }
        Instruction {
            program_id: PROGRAM_ID.to_string(),
            accounts: accounts.into_iter().map(String::from).collect(),
            data,
            is_committed: true,
            inner: vec![],
        }
    }

    #[test]
    fn test_plain_transfer_parse() {
        let ins = transfer_ins(TRANSFER_D1, vec!["src", "dst", "auth"], 12_345);
        let t = Transfer::from_instruction(&ins).unwrap();
        assert_eq!(t.source, "src");
        assert_eq!(t.destination, "dst");
        assert_eq!(t.amount, 12_345);

        // a checked transfer is not a plain transfer
        assert!(TransferChecked::from_instruction(&ins).is_none());
    }

    #[test]
    fn test_checked_transfer_parse() {
        let ins = transfer_ins(TRANSFER_CHECKED_D1, vec!["src", "mintX", "dst", "auth"], 777);
        let t = TransferChecked::from_instruction(&ins).unwrap();
        assert_eq!(t.mint, "mintX");
        assert_eq!(t.destination, "dst");
        assert_eq!(t.amount, 777);
        assert_eq!(t.decimals, 6);
    }

    #[test]
    fn test_wrong_program_rejected() {
        let mut ins = transfer_ins(TRANSFER_D1, vec!["src", "dst", "auth"], 1);
        ins.program_id = "SomeOtherProgram1111111111111111111111111111".to_string();
        assert!(Transfer::from_instruction(&ins).is_none());
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let mut ins = transfer_ins(TRANSFER_D1, vec!["src", "dst", "auth"], 1);
        ins.data.truncate(5);
        assert!(Transfer::from_instruction(&ins).is_none());
    }

    #[test]
    fn test_amount_beyond_53_bits() {
        // amounts past the double-precision safe range must stay exact
        let big = (1u64 << 60) + 3;
        let ins = transfer_ins(TRANSFER_D1, vec!["src", "dst", "auth"], big);
        let t = Transfer::from_instruction(&ins).unwrap();
        assert_eq!(t.amount, big);
    }
}
