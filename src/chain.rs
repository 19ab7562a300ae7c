//! Decoded-chain data model at the streaming boundary
//!
//! The upstream block streamer hands over fully materialized blocks: every
//! transaction carries its complete instruction list (with CPI nesting) and
//! its token balance records. Batches travel as JSONL, one block per line.

use serde::{Deserialize, Serialize};

/// Native SOL / wrapped SOL mint address
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Block time, unix seconds
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Ordered signatures; the first one is the transaction id
    pub signatures: Vec<String>,
    pub fee: u64,
    /// Top-level instructions in execution order
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub token_balances: Vec<TokenBalance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub program_id: String,
    pub accounts: Vec<String>,
    /// Raw payload, hex-encoded on the wire
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
    #[serde(default = "default_committed")]
    pub is_committed: bool,
    /// Nested (CPI) instructions in execution order
    #[serde(default)]
    pub inner: Vec<Instruction>,
}

/// Token-account balance change record for one transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenBalance {
    pub account: String,
    #[serde(default)]
    pub pre_mint: Option<String>,
    #[serde(default)]
    pub post_mint: Option<String>,
    #[serde(default)]
    pub pre_amount: Option<u64>,
    #[serde(default)]
    pub post_amount: Option<u64>,
    #[serde(default)]
    pub pre_owner: Option<String>,
    #[serde(default)]
    pub post_owner: Option<String>,
}

fn default_committed() -> bool {
    true
}

impl Transaction {
    /// First signature, or empty string when the transaction carries none
    pub fn signature(&self) -> &str {
        self.signatures.first().map(String::as_str).unwrap_or("")
    }

    /// Every instruction of the transaction in execution order: each outer
    /// instruction followed by its nested instructions, depth-first.
    /// Correlation depends on this ordering being exact.
    pub fn flattened(&self) -> Vec<&Instruction> {
        let mut out = Vec::new();
        for ins in &self.instructions {
            walk(ins, &mut out);
        }
        out
    }
}

fn walk<'a>(ins: &'a Instruction, out: &mut Vec<&'a Instruction>) {
    out.push(ins);
    for inner in &ins.inner {
        walk(inner, out);
    }
}

impl Instruction {
    /// First 8 payload bytes, the Anchor-style instruction discriminant
    pub fn d8(&self) -> Option<[u8; 8]> {
        self.data.get(..8)?.try_into().ok()
    }

    /// First payload byte, the SPL-token instruction tag
    pub fn d1(&self) -> Option<u8> {
        self.data.first().copied()
    }
}

pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(de)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}
