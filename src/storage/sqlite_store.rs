//! SQLite backend
//!
//! One transaction per batch, INSERT OR IGNORE on every record so replayed
//! batches and intra-batch id collisions are absorbed by the unique key.
//! Deltas and amounts are narrowed to REAL columns here; this is the only
//! lossy step in the pipeline (exact above 2^53 is not representable), the
//! engine upstream is integer-only.

use crate::extractor::BatchOutput;
use crate::storage::pragmas::apply_optimized_pragmas;
use crate::storage::{StoreBackend, StoreError};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        apply_optimized_pragmas(&conn).map_err(|e| StoreError::Database(e.to_string()))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sol_trades (
                id TEXT PRIMARY KEY,
                bucket INTEGER NOT NULL,
                trader TEXT,
                mint TEXT,
                timestamp INTEGER,
                token_delta REAL,
                sol_delta REAL,
                fee INTEGER,
                created_at INTEGER
            );
            CREATE INDEX IF NOT EXISTS idx_sol_trades_1 ON sol_trades(mint, timestamp);
            CREATE INDEX IF NOT EXISTS idx_sol_trades_2 ON sol_trades(timestamp);
            CREATE INDEX IF NOT EXISTS idx_sol_trades_3 ON sol_trades(mint);

            CREATE TABLE IF NOT EXISTS token_trades (
                id TEXT PRIMARY KEY,
                bucket INTEGER NOT NULL,
                trader TEXT,
                timestamp INTEGER,
                mint_spent TEXT,
                amount_spent REAL,
                mint_got TEXT,
                amount_got REAL,
                fee INTEGER
            );
            CREATE INDEX IF NOT EXISTS idx_token_trades_1 ON token_trades(timestamp);

            CREATE TABLE IF NOT EXISTS jup_signatures (
                id TEXT PRIMARY KEY,
                timestamp INTEGER NOT NULL,
                bucket INTEGER NOT NULL,
                processed INTEGER NOT NULL DEFAULT 0,
                is_trade_extracted INTEGER,
                error_message TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_processed_timestamp ON jup_signatures(processed, timestamp);
            CREATE INDEX IF NOT EXISTS idx_timestamp ON jup_signatures(timestamp);",
        )?;

        log::info!("✅ SQLite database initialized with WAL mode");

        Ok(Self { conn })
    }
}

#[async_trait]
impl StoreBackend for SqliteStore {
    async fn insert_batch(&mut self, batch: &BatchOutput) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        for trade in &batch.sol_trades {
            tx.execute(
                "INSERT OR IGNORE INTO sol_trades
                 (id, bucket, trader, mint, timestamp, token_delta, sol_delta, fee, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    trade.id,
                    trade.bucket,
                    trade.trader,
                    trade.mint,
                    trade.timestamp,
                    trade.token_delta as f64,
                    trade.sol_delta as f64,
                    trade.fee as i64,
                    trade.created_at,
                ],
            )?;
        }

        for trade in &batch.token_trades {
            tx.execute(
                "INSERT OR IGNORE INTO token_trades
                 (id, bucket, trader, timestamp, mint_spent, amount_spent, mint_got, amount_got, fee)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    trade.id,
                    trade.bucket,
                    trade.trader,
                    trade.timestamp,
                    trade.mint_spent,
                    trade.amount_spent as f64,
                    trade.mint_got,
                    trade.amount_got as f64,
                    trade.fee as i64,
                ],
            )?;
        }

        for sig in &batch.signatures {
            tx.execute(
                "INSERT OR IGNORE INTO jup_signatures
                 (id, timestamp, bucket, processed, is_trade_extracted, error_message)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    sig.id,
                    sig.timestamp,
                    sig.bucket,
                    sig.processed,
                    sig.is_trade_extracted,
                    sig.error_message,
                ],
            )?;
        }

        tx.commit()?;

        log::debug!(
            "✅ Flushed {} sol trades, {} token trades, {} signatures",
            batch.sol_trades.len(),
            batch.token_trades.len(),
            batch.signatures.len()
        );

        Ok(())
    }

    async fn flush(&mut self) -> Result<(), StoreError> {
        // every batch commits its own transaction; nothing is buffered here
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}
