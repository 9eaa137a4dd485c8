//! Environment/runtime helpers
//!
//! Startup sanity checks for directories the service writes into.

/// Create the data directory when missing; storage files live under it.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}
