use {
    jupflow::{
        config::{BackendType, RuntimeConfig},
        extractor::extract_batch,
        ingest::BlockReader,
        programs::known_programs,
        storage::{JsonlStore, SqliteStore, StoreBackend},
    },
    std::error::Error,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = RuntimeConfig::from_env()?;
    let backend = RuntimeConfig::parse_backend_from_args();

    log::info!("🚀 Starting jupflow...");
    log::info!("📊 Configuration:");
    log::info!("   BLOCKS_PATH: {}", config.blocks_path);
    log::info!("   BLOCK_BATCH_SIZE: {}", config.batch_size);
    log::info!("📋 Tracked programs:");
    for (program_id, name) in known_programs() {
        log::info!("   ├─ {}: {}", name, program_id);
    }

    let mut store: Box<dyn StoreBackend> = match backend {
        BackendType::Sqlite => {
            log::info!("   Backend: SQLite at {}", config.db_path);
            Box::new(SqliteStore::new(&config.db_path)?)
        }
        BackendType::Jsonl => {
            log::info!("   Backend: JSONL under {}", config.output_dir);
            Box::new(JsonlStore::new(&config.output_dir)?)
        }
    };

    let mut reader = BlockReader::open(&config.blocks_path).await?;

    let mut total_blocks = 0usize;
    let mut total_sol = 0usize;
    let mut total_token = 0usize;

    loop {
        let blocks = reader.next_batch(config.batch_size).await?;
        if blocks.is_empty() {
            break;
        }
        total_blocks += blocks.len();

        let created_at = chrono::Utc::now().timestamp();
        let output = extract_batch(&blocks, created_at);

        log::info!(
            "Duplicates: {} of {}",
            output.duplicate_ids,
            output.sol_trades_observed
        );
        if output.unresolved_mints > 0 {
            log::warn!(
                "⚠️  {} trades with an unresolved mint in this batch",
                output.unresolved_mints
            );
        }

        total_sol += output.sol_trades.len();
        total_token += output.token_trades.len();

        store.insert_batch(&output).await?;
    }

    store.flush().await?;

    if reader.skipped() > 0 {
        log::warn!("⚠️  {} malformed block lines skipped", reader.skipped());
    }
    log::info!(
        "✅ Done: {} blocks, {} sol trades, {} token trades written via {}",
        total_blocks,
        total_sol,
        total_token,
        store.backend_type()
    );

    Ok(())
}
