use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub address: String,
    /// Directory where persisted question batches live.
    pub data_dir: String,
    /// Directory where uploaded images are stored.
    pub images_dir: String,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            address: env::var("EXTRACTOR_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3001".to_string()),
            data_dir: env::var("EXTRACTOR_DATA_DIR")
                .unwrap_or_else(|_| "data/processed".to_string()),
            images_dir: env::var("EXTRACTOR_IMAGES_DIR")
                .unwrap_or_else(|_| "assets/images".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopeguard::guard;
    use std::env;

    fn clean_env() {
        env::remove_var("EXTRACTOR_ADDRESS");
        env::remove_var("EXTRACTOR_DATA_DIR");
        env::remove_var("EXTRACTOR_IMAGES_DIR");
        env::remove_var("LOG_LEVEL");
    }

    #[test]
    #[serial_test::serial]
    fn test_default_config() {
        clean_env();
        let _guard = guard((), |_| clean_env());

        let config = Config::from_env().unwrap();

        assert_eq!(config.address, "127.0.0.1:3001", "wrong default address");
        assert_eq!(config.data_dir, "data/processed", "wrong default data dir");
        assert_eq!(
            config.images_dir, "assets/images",
            "wrong default images dir"
        );
        assert_eq!(config.log_level, "info", "wrong default log level");
    }

    #[test]
    #[serial_test::serial]
    fn test_custom_config() {
        clean_env();
        let _guard = guard((), |_| clean_env());

        env::set_var("EXTRACTOR_ADDRESS", "0.0.0.0:8080");
        env::set_var("EXTRACTOR_DATA_DIR", "/tmp/batches");
        env::set_var("EXTRACTOR_IMAGES_DIR", "/tmp/images");
        env::set_var("LOG_LEVEL", "debug");

        let config = Config::from_env().unwrap();

        assert_eq!(config.address, "0.0.0.0:8080", "address mismatch");
        assert_eq!(config.data_dir, "/tmp/batches", "data dir mismatch");
        assert_eq!(config.images_dir, "/tmp/images", "images dir mismatch");
        assert_eq!(config.log_level, "debug", "log level mismatch");
    }
}
