//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can run startup checks
//! without depending on `common` directly.

/// Ensure the data directory exists before stores open files inside it.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir).await
}
