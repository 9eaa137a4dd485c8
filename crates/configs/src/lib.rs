use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_posts_file")]
    pub posts_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), posts_file: default_posts_file() }
    }
}

fn default_data_dir() -> String { "data".to_string() }
fn default_posts_file() -> String { "posts.json".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    /// Fill the data directory from `DATA_DIR` when the TOML leaves it empty.
    pub fn normalize_from_env(&mut self) {
        if self.data_dir.trim().is_empty() {
            match std::env::var("DATA_DIR") {
                Ok(dir) if !dir.trim().is_empty() => self.data_dir = dir,
                _ => self.data_dir = default_data_dir(),
            }
        }
        if self.posts_file.trim().is_empty() {
            self.posts_file = default_posts_file();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir is empty; set it in config.toml or DATA_DIR"));
        }
        if self.posts_file.trim().is_empty() {
            return Err(anyhow!("storage.posts_file is empty"));
        }
        Ok(())
    }

    /// Full path of the posts collection file.
    pub fn posts_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.posts_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.data_dir, "data");
        assert_eq!(cfg.storage.posts_file, "posts.json");
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [storage]
            data_dir = "var/blog"
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.data_dir, "var/blog");
        assert_eq!(cfg.storage.posts_file, "posts.json");
        assert_eq!(cfg.storage.posts_path(), PathBuf::from("var/blog/posts.json"));
    }

    #[test]
    fn normalize_rejects_port_zero() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn normalize_restores_blank_storage_fields() {
        let mut cfg = AppConfig::default();
        cfg.storage.posts_file = "  ".into();
        cfg.normalize_and_validate().expect("normalize");
        assert_eq!(cfg.storage.posts_file, "posts.json");
    }
}
