//! SQLite PRAGMA tuning applied before any writes

use rusqlite::Connection;

/// Apply the write-optimized PRAGMA set: WAL journaling, NORMAL sync,
/// in-memory temp store, mmap, enlarged cache, bounded autocheckpoint.
pub fn apply_optimized_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;
    conn.pragma_update(None, "mmap_size", 268_435_456i64)?;
    conn.pragma_update(None, "cache_size", -64_000)?;
    conn.pragma_update(None, "wal_autocheckpoint", 1000)?;
    Ok(())
}
