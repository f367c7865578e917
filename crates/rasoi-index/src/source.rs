use std::path::PathBuf;
use std::time::Duration;

use rasoi_config::{RecipeLocator, SiteConfig};
use rasoi_types::Recipe;

use crate::error::FetchError;

/// Where recipe documents come from. The index only depends on this
/// trait, so the fetch strategy can change without touching consumers.
#[async_trait::async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch and parse one recipe document.
    async fn fetch(&self, locator: &RecipeLocator) -> Result<Recipe, FetchError>;
}

/// Fetches documents over HTTP from the deployed static site.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self, FetchError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_millis(config.fetch_timeout_ms),
        )
    }
}

#[async_trait::async_trait]
impl RecipeSource for HttpSource {
    async fn fetch(&self, locator: &RecipeLocator) -> Result<Recipe, FetchError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            locator.rel_path()
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                path: locator.rel_path(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Reads documents from a local checkout of the site tree.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl RecipeSource for DirSource {
    async fn fetch(&self, locator: &RecipeLocator) -> Result<Recipe, FetchError> {
        let path = self
            .root
            .join("recipes")
            .join(&locator.category)
            .join(format!("{}.json", locator.slug));

        let body = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
