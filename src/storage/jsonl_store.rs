//! JSONL backend: one file per collection, one record per line
//!
//! Serde keeps the integer deltas exact here, unlike the SQLite REAL
//! columns, which makes this backend the one to use for audits.

use crate::extractor::BatchOutput;
use crate::storage::{StoreBackend, StoreError};
use async_trait::async_trait;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct JsonlStore {
    sol_trades: BufWriter<File>,
    token_trades: BufWriter<File>,
    signatures: BufWriter<File>,
}

impl JsonlStore {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = output_dir.as_ref();
        std::fs::create_dir_all(dir)?;

        Ok(Self {
            sol_trades: open_append(&dir.join("sol_trades.jsonl"))?,
            token_trades: open_append(&dir.join("token_trades.jsonl"))?,
            signatures: open_append(&dir.join("jup_signatures.jsonl"))?,
        })
    }
}

fn open_append(path: &PathBuf) -> Result<BufWriter<File>, StoreError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

fn write_lines<T: Serialize>(out: &mut BufWriter<File>, records: &[T]) -> Result<(), StoreError> {
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(out, "{}", json)?;
    }
    Ok(())
}

#[async_trait]
impl StoreBackend for JsonlStore {
    async fn insert_batch(&mut self, batch: &BatchOutput) -> Result<(), StoreError> {
        write_lines(&mut self.sol_trades, &batch.sol_trades)?;
        write_lines(&mut self.token_trades, &batch.token_trades)?;
        write_lines(&mut self.signatures, &batch.signatures)?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), StoreError> {
        self.sol_trades.flush()?;
        self.token_trades.flush()?;
        self.signatures.flush()?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "JSONL"
    }
}
