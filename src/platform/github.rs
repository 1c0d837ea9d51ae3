//! GitHub REST client

use crate::error::{Error, Result};
use crate::platform::{GITHUB_HOST, RemoteRepoClient};
use crate::types::{
    BranchRef, DirectoryEntry, EntryKind, FileWrite, NewPullRequest, PullRequest, RemoteFile,
    RepoLocator, RepositoryInfo,
};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// User agent sent with every request
pub const USER_AGENT: &str = "workflow-studio";

/// GitHub service using reqwest
///
/// The token is optional: anonymous requests work for public reads and are
/// rejected by the host for writes.
pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    api_url: String,
}

#[derive(Deserialize)]
struct RepositoryPayload {
    default_branch: String,
}

#[derive(Deserialize)]
struct RefPayload {
    #[serde(rename = "ref")]
    ref_name: String,
    object: RefObject,
}

#[derive(Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Serialize)]
struct CreateRefPayload<'a> {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: &'a str,
}

#[derive(Deserialize)]
struct ContentPayload {
    #[serde(rename = "type")]
    kind: EntryKind,
    name: String,
    path: String,
    sha: String,
    #[serde(default)]
    content: Option<String>,
}

// The contents endpoint answers with an array for directories and an object
// for anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentPayload>),
    Single(ContentPayload),
}

#[derive(Serialize)]
struct PutFilePayload<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Deserialize)]
struct PutFileResponse {
    content: PutFileContent,
}

#[derive(Deserialize)]
struct PutFileContent {
    path: String,
    sha: String,
}

#[derive(Serialize)]
struct CreatePrPayload<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    number: u64,
    html_url: String,
    title: String,
    head: PrBranch,
    base: PrBranch,
}

#[derive(Deserialize)]
struct PrBranch {
    #[serde(rename = "ref")]
    ref_field: String,
}

#[derive(Deserialize, Default)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
}

impl GitHubClient {
    /// Create a new GitHub client against `api_url`
    pub fn new(token: Option<String>, api_url: impl Into<String>) -> Self {
        // No request timeout: a stalled call stalls the caller's flow.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn repo_url(&self, repo: &RepoLocator, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            api_root_for(&repo.host, &self.api_url),
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.name),
            path
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorize(request).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// API root serving repositories on `host`
///
/// `github.com` and a configured root on the same host use the configured
/// root; any other host is GitHub Enterprise at `https://{host}/api/v3`.
fn api_root_for(host: &str, configured: &str) -> String {
    let host = host.to_ascii_lowercase();
    let hosted = host == GITHUB_HOST || host.ends_with(".github.com");
    let configured_host = Url::parse(configured).ok().and_then(|url| {
        let name = url.host_str()?.to_ascii_lowercase();
        Some(match url.port() {
            Some(port) => format!("{name}:{port}"),
            None => name,
        })
    });

    if hosted || configured_host.as_deref() == Some(host.as_str()) {
        configured.to_string()
    } else {
        format!("https://{host}/api/v3")
    }
}

/// Encode each path segment, keeping the separators
fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Decode a base64 contents payload (GitHub wraps it at 60 columns)
fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact)
        .map_err(|e| Error::Internal(format!("invalid base64 content: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Turn a non-2xx response into the matching error kind
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let payload: ErrorPayload = response.json().await.unwrap_or_default();
    let message = payload
        .message
        .unwrap_or_else(|| format!("GitHub API error: {}", status.as_u16()));

    if status.as_u16() == 404 {
        Err(Error::RemoteNotFound { message })
    } else {
        Err(Error::RemoteRejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Whether a failed ref creation means the name is already taken
fn is_ref_conflict(status: u16, message: &str) -> bool {
    matches!(status, 409 | 422) && message.to_ascii_lowercase().contains("already exists")
}

fn into_directory_entry(item: ContentPayload) -> DirectoryEntry {
    DirectoryEntry {
        name: item.name,
        path: item.path,
        sha: item.sha,
        kind: item.kind,
    }
}

#[async_trait]
impl RemoteRepoClient for GitHubClient {
    async fn get_repository(&self, repo: &RepoLocator) -> Result<RepositoryInfo> {
        debug!(owner = %repo.owner, repo = %repo.name, "fetching repository metadata");
        let payload: RepositoryPayload = self.send(self.client.get(self.repo_url(repo, ""))).await?;
        Ok(RepositoryInfo {
            default_branch: payload.default_branch,
        })
    }

    async fn get_branch_ref(&self, repo: &RepoLocator, branch: &str) -> Result<BranchRef> {
        debug!(branch, "fetching branch ref");
        let url = self.repo_url(repo, &format!("/git/ref/heads/{}", encode_path(branch)));
        let payload: RefPayload = self.send(self.client.get(url)).await?;
        Ok(BranchRef {
            name: payload
                .ref_name
                .strip_prefix("refs/heads/")
                .unwrap_or(&payload.ref_name)
                .to_string(),
            base_commit_sha: payload.object.sha,
        })
    }

    async fn create_branch_ref(
        &self,
        repo: &RepoLocator,
        branch: &str,
        sha: &str,
    ) -> Result<BranchRef> {
        debug!(branch, sha, "creating branch ref");
        let payload = CreateRefPayload {
            ref_name: format!("refs/heads/{branch}"),
            sha,
        };
        let request = self
            .client
            .post(self.repo_url(repo, "/git/refs"))
            .json(&payload);

        match self.send::<RefPayload>(request).await {
            Ok(created) => Ok(BranchRef {
                name: branch.to_string(),
                base_commit_sha: created.object.sha,
            }),
            Err(Error::RemoteRejected { status, message }) if is_ref_conflict(status, &message) => {
                Err(Error::RemoteConflict {
                    status,
                    branch: branch.to_string(),
                    message,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn list_directory(&self, repo: &RepoLocator, path: &str) -> Result<Vec<DirectoryEntry>> {
        debug!(path, "listing directory");
        let url = self.repo_url(repo, &format!("/contents/{}", encode_path(path)));
        let response: ContentsResponse = self.send(self.client.get(url)).await?;
        Ok(match response {
            ContentsResponse::Listing(items) => {
                items.into_iter().map(into_directory_entry).collect()
            }
            ContentsResponse::Single(item) => vec![into_directory_entry(item)],
        })
    }

    async fn get_file(
        &self,
        repo: &RepoLocator,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<RemoteFile> {
        debug!(path, git_ref, "fetching file");
        let url = self.repo_url(repo, &format!("/contents/{}", encode_path(path)));
        let mut request = self.client.get(url);
        if let Some(git_ref) = git_ref {
            request = request.query(&[("ref", git_ref)]);
        }

        match self.send::<ContentsResponse>(request).await? {
            ContentsResponse::Single(item) if item.kind == EntryKind::File => {
                let content = item.content.as_deref().map(decode_content).transpose()?;
                Ok(RemoteFile {
                    path: item.path,
                    content_hash: Some(item.sha),
                    content,
                })
            }
            _ => Err(Error::MalformedInput(format!("'{path}' is not a file"))),
        }
    }

    async fn put_file(&self, repo: &RepoLocator, write: &FileWrite) -> Result<RemoteFile> {
        debug!(
            path = %write.path,
            branch = %write.branch,
            update = write.version_hash.is_some(),
            "writing file"
        );
        let payload = PutFilePayload {
            message: &write.message,
            content: BASE64.encode(write.content.as_bytes()),
            branch: &write.branch,
            sha: write.version_hash.as_deref(),
        };
        let url = self.repo_url(repo, &format!("/contents/{}", encode_path(&write.path)));
        let response: PutFileResponse = self.send(self.client.put(url).json(&payload)).await?;

        Ok(RemoteFile {
            path: response.content.path,
            content_hash: Some(response.content.sha),
            content: None,
        })
    }

    async fn create_pull_request(
        &self,
        repo: &RepoLocator,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        debug!(head = %pr.head, base = %pr.base, "creating pull request");
        let payload = CreatePrPayload {
            title: &pr.title,
            body: &pr.body,
            head: &pr.head,
            base: &pr.base,
        };
        let created: PullRequestPayload = self
            .send(self.client.post(self.repo_url(repo, "/pulls")).json(&payload))
            .await?;

        Ok(PullRequest {
            number: created.number,
            html_url: created.html_url,
            base_ref: created.base.ref_field,
            head_ref: created.head.ref_field,
            title: created.title,
        })
    }
}
