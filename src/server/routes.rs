//! Request handlers

use crate::codec::{parse, serialize};
use crate::error::Error;
use crate::load::{LoadedWorkflows, load_workflows};
use crate::platform::{parse_repo_locator, search_marketplace};
use crate::publish::{TracingProgress, publish};
use crate::server::{AppError, AppState};
use crate::types::{MarketplaceAction, PublishRequest, WorkflowDocument};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of `POST /workflows/load`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBody {
    /// Repository locator
    #[serde(default)]
    pub repo_url: Option<String>,
    /// Optional bearer credential
    #[serde(default)]
    pub token: Option<String>,
}

/// Body of `POST /workflows/parse`
#[derive(Debug, Deserialize)]
pub struct ParseBody {
    /// Workflow text
    #[serde(default)]
    pub text: String,
}

/// Workflow text response
#[derive(Debug, Serialize)]
pub struct TextResponse {
    /// Workflow text
    pub text: String,
}

/// Query of `GET /marketplace/search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query
    #[serde(default)]
    pub q: Option<String>,
    /// Optional bearer credential
    #[serde(default)]
    pub token: Option<String>,
}

/// Response of `GET /marketplace/search`
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Matching actions, most-starred first
    pub actions: Vec<MarketplaceAction>,
}

/// Body of `POST /publish`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishBody {
    /// Repository locator
    #[serde(default)]
    pub repo_url: Option<String>,
    /// Bearer credential
    #[serde(default)]
    pub token: Option<String>,
    /// Repository-relative target path
    #[serde(default)]
    pub target_path: Option<String>,
    /// Workflow text to commit
    #[serde(default)]
    pub text_content: Option<String>,
    /// Branch name to try first
    #[serde(default)]
    pub branch_name: Option<String>,
    /// Commit message
    #[serde(default)]
    pub commit_message: Option<String>,
    /// PR title
    #[serde(default)]
    pub pr_title: Option<String>,
    /// PR body
    #[serde(default)]
    pub pr_body: Option<String>,
}

/// Response of `POST /publish`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    /// Web URL of the opened PR
    pub pr_url: String,
    /// PR number
    pub pr_number: u64,
    /// Branch actually used
    pub branch: String,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::from(Error::MalformedInput(format!("{field} is required"))))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// POST /workflows/load - list and fetch a repository's workflow files
pub async fn load(
    State(state): State<AppState>,
    payload: Result<Json<LoadBody>, JsonRejection>,
) -> Result<Json<LoadedWorkflows>, AppError> {
    let Json(body) = payload?;
    let repo_url = required(body.repo_url, "repoUrl")?;
    let repo = parse_repo_locator(repo_url.trim())?;

    let client = state.clients.remote_client(body.token.as_deref());
    let loaded = load_workflows(client.as_ref(), &repo).await?;
    info!(
        owner = %loaded.owner,
        repo = %loaded.repo,
        count = loaded.workflows.len(),
        "workflows loaded"
    );
    Ok(Json(loaded))
}

/// POST /workflows/parse - workflow text to document
pub async fn parse_text(
    payload: Result<Json<ParseBody>, JsonRejection>,
) -> Result<Json<WorkflowDocument>, AppError> {
    let Json(body) = payload?;
    Ok(Json(parse(&body.text)))
}

/// POST /workflows/generate - document to workflow text
pub async fn generate_text(
    payload: Result<Json<WorkflowDocument>, JsonRejection>,
) -> Result<Json<TextResponse>, AppError> {
    let Json(document) = payload?;
    Ok(Json(TextResponse {
        text: serialize(&document),
    }))
}

/// GET /marketplace/search - reusable actions matching a query
pub async fn marketplace_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> Result<Json<SearchResponse>, AppError> {
    let token = params
        .token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| bearer_token(&headers));
    let query = params.q.unwrap_or_default();

    let actions =
        search_marketplace(&query, token.as_deref(), &state.config.api_root()).await?;
    Ok(Json(SearchResponse { actions }))
}

/// POST /publish - commit a workflow on a new branch and open a PR
pub async fn publish_workflow(
    State(state): State<AppState>,
    payload: Result<Json<PublishBody>, JsonRejection>,
) -> Result<Json<PublishResponse>, AppError> {
    let Json(body) = payload?;
    let repo_url = required(body.repo_url, "repoUrl")?;
    let token = required(body.token, "token")?;
    let target_path = required(body.target_path, "targetPath")?;
    let text_content = required(body.text_content, "textContent")?;

    let request = PublishRequest::new(target_path.trim(), text_content)
        .with_branch(body.branch_name.filter(|b| !b.trim().is_empty()))
        .with_commit_message(body.commit_message)
        .with_pr_title(body.pr_title)
        .with_pr_body(body.pr_body);

    let client = state.clients.remote_client(Some(token.trim()));
    let outcome = publish(client.as_ref(), repo_url.trim(), &request, &TracingProgress).await?;

    Ok(Json(PublishResponse {
        pr_url: outcome.pr_url,
        pr_number: outcome.pr_number,
        branch: outcome.branch,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc".to_string()));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(required(Some("  ".into()), "token").is_err());
        assert!(required(None, "token").is_err());
        assert_eq!(required(Some("x".into()), "token").unwrap(), "x");
    }
}
