use std::env;

use serde::{Deserialize, Serialize};

pub mod category;
pub mod registry;

pub use category::{CATEGORIES, Category, category_info};
pub use registry::{RecipeLocator, registry};

/// Where recipe documents are served from and how long to wait for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
    pub fetch_timeout_ms: u64,
}

impl SiteConfig {
    pub fn new() -> Self {
        let base_url = env::var("RASOI_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let fetch_timeout_ms = env::var("RASOI_FETCH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000); // 10 seconds default

        SiteConfig {
            base_url,
            fetch_timeout_ms,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new()
    }
}
