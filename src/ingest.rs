//! Block ingestion at the streaming boundary
//!
//! The upstream streamer materializes decoded blocks as JSONL, one block per
//! line. The reader parses lines lazily and groups blocks into batches;
//! malformed lines are skipped with a warning instead of poisoning the run.

use crate::chain::Block;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

pub struct BlockReader {
    lines: Lines<BufReader<File>>,
    skipped: u64,
}

impl BlockReader {
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::open(path.as_ref()).await?;
        log::info!("📖 Reading blocks from {}", path.as_ref().display());
        Ok(Self {
            lines: BufReader::new(file).lines(),
            skipped: 0,
        })
    }

    /// Next parseable block, or `None` at end of input.
    pub async fn next_block(&mut self) -> std::io::Result<Option<Block>> {
        while let Some(line) = self.lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Block>(&line) {
                Ok(block) => return Ok(Some(block)),
                Err(e) => {
                    self.skipped += 1;
                    log::warn!("skipping malformed block line: {}", e);
                }
            }
        }
        Ok(None)
    }

    /// Up to `size` blocks; an empty vec means end of input.
    pub async fn next_batch(&mut self, size: usize) -> std::io::Result<Vec<Block>> {
        let mut batch = Vec::with_capacity(size);
        while batch.len() < size {
            match self.next_block().await? {
                Some(block) => batch.push(block),
                None => break,
            }
        }
        Ok(batch)
    }

    /// Malformed lines skipped so far
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn block_line(timestamp: i64) -> String {
        format!(r#"{{"timestamp":{},"transactions":[]}}"#, timestamp)
    }

    async fn reader_over(lines: &[String]) -> (BlockReader, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        (BlockReader::open(&path).await.unwrap(), dir)
    }

    #[tokio::test]
    async fn test_reads_blocks_in_order() {
        let (mut reader, _dir) = reader_over(&[block_line(1), block_line(2)]).await;

        assert_eq!(reader.next_block().await.unwrap().unwrap().timestamp, 1);
        assert_eq!(reader.next_block().await.unwrap().unwrap().timestamp, 2);
        assert!(reader.next_block().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_skips_malformed_lines() {
        let (mut reader, _dir) =
            reader_over(&[block_line(1), "{broken".to_string(), block_line(3)]).await;

        assert_eq!(reader.next_block().await.unwrap().unwrap().timestamp, 1);
        assert_eq!(reader.next_block().await.unwrap().unwrap().timestamp, 3);
        assert_eq!(reader.skipped(), 1);
    }

    #[tokio::test]
    async fn test_batching() {
        let lines: Vec<String> = (0..5).map(block_line).collect();
        let (mut reader, _dir) = reader_over(&lines).await;

        assert_eq!(reader.next_batch(2).await.unwrap().len(), 2);
        assert_eq!(reader.next_batch(2).await.unwrap().len(), 2);
        assert_eq!(reader.next_batch(2).await.unwrap().len(), 1);
        assert!(reader.next_batch(2).await.unwrap().is_empty());
    }
}
