//! Reusable-action search backed by the host's repository search

use crate::error::{Error, Result};
use crate::types::MarketplaceAction;
use octocrab::Octocrab;
use octocrab::models::Repository;

/// Results per search
const PAGE_SIZE: u8 = 12;

/// Query used when the caller supplies none
const DEFAULT_QUERY: &str = "ci";

/// Search service using octocrab
pub struct MarketplaceClient {
    client: Octocrab,
}

impl MarketplaceClient {
    /// Create a search client, anonymous when `token` is `None`
    pub fn new(token: Option<&str>, api_url: &str) -> Result<Self> {
        let mut builder = Octocrab::builder()
            .base_uri(api_url)
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            builder = builder.personal_token(token.to_string());
        }

        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;
        Ok(Self { client })
    }

    /// Find repositories tagged as GitHub Actions, most-starred first
    pub async fn search(&self, query: &str) -> Result<Vec<MarketplaceAction>> {
        let page = self
            .client
            .search()
            .repositories(&search_query(query))
            .sort("stars")
            .order("desc")
            .per_page(PAGE_SIZE)
            .send()
            .await?;

        Ok(page.items.iter().filter_map(to_action).collect())
    }
}

/// Convenience wrapper: build a client and run one search
pub async fn search_marketplace(
    query: &str,
    token: Option<&str>,
    api_url: &str,
) -> Result<Vec<MarketplaceAction>> {
    MarketplaceClient::new(token, api_url)?.search(query).await
}

fn search_query(query: &str) -> String {
    let query = query.trim();
    let query = if query.is_empty() { DEFAULT_QUERY } else { query };
    format!("{query} topic:github-action")
}

fn to_action(repo: &Repository) -> Option<MarketplaceAction> {
    let full_name = repo.full_name.clone()?;
    Some(MarketplaceAction {
        uses: format!("{full_name}@v1"),
        name: full_name,
        description: repo
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "No description".to_string()),
        stars: repo.stargazers_count.unwrap_or_default(),
        url: repo
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    })
}
