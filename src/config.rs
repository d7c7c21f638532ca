use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub log_level: String,

    // Content settings
    pub max_comment_length: usize,
    pub default_comments_per_page: usize,
    pub max_comments_per_page: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            max_comment_length: env::var("MAX_COMMENT_LENGTH")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            default_comments_per_page: env::var("DEFAULT_COMMENTS_PER_PAGE")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            max_comments_per_page: env::var("MAX_COMMENTS_PER_PAGE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            max_comment_length: 1000,
            default_comments_per_page: 20,
            max_comments_per_page: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_comment_length, 1000);
        assert_eq!(config.default_comments_per_page, 20);
        assert!(config.is_development());
        assert!(!config.is_production());
    }
}
