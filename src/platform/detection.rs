//! Repository locator parsing

use crate::error::{Error, Result};
use crate::types::RepoLocator;
use regex::Regex;
use std::env;
use std::sync::LazyLock;

/// Hosted GitHub
pub const GITHUB_HOST: &str = "github.com";

// Accepts https://host/owner/name, git@host:owner/name, host/owner/name,
// each with an optional `.git` suffix or trailing slash.
static LOCATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:https?|ssh|git)://)?(?:[\w.-]+@)?(?P<host>[\w.-]+(?::\d+)?)[:/](?P<owner>[\w.-]+)/(?P<name>[\w.-]+?)(?:\.git)?/?$",
    )
    .expect("locator regex is valid")
});

/// Whether a host is served by the configured platform
///
/// `github.com` and its subdomains are always accepted; `extra_host` adds a
/// GitHub Enterprise hostname.
pub fn is_supported_host(host: &str, extra_host: Option<&str>) -> bool {
    let host = host.to_ascii_lowercase();
    host == GITHUB_HOST
        || host.ends_with(".github.com")
        || extra_host.is_some_and(|h| host == h.to_ascii_lowercase())
}

/// Parse a repository locator, also accepting the host named by `GH_HOST`
pub fn parse_repo_locator(input: &str) -> Result<RepoLocator> {
    let gh_host = env::var("GH_HOST").ok();
    parse_repo_locator_with_host(input, gh_host.as_deref())
}

/// Parse a repository locator of the form `<host>[:/]<owner>/<name>[.git][/]`
///
/// Nothing here touches the network; a rejected locator means no remote call
/// is ever made for it.
pub fn parse_repo_locator_with_host(input: &str, extra_host: Option<&str>) -> Result<RepoLocator> {
    let trimmed = input.trim();
    let caps = LOCATOR_RE
        .captures(trimmed)
        .ok_or_else(|| Error::InvalidLocator(trimmed.to_string()))?;

    let host = caps["host"].to_string();
    if !is_supported_host(&host, extra_host) {
        return Err(Error::InvalidLocator(trimmed.to_string()));
    }

    let name = caps["name"].to_string();
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::InvalidLocator(trimmed.to_string()));
    }

    Ok(RepoLocator {
        host: host.to_ascii_lowercase(),
        owner: caps["owner"].to_string(),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<RepoLocator> {
        parse_repo_locator_with_host(input, None)
    }

    #[test]
    fn test_parse_https() {
        let locator = parse("https://github.com/owner/repo").unwrap();
        assert_eq!(locator.host, "github.com");
        assert_eq!(locator.owner, "owner");
        assert_eq!(locator.name, "repo");
    }

    #[test]
    fn test_parse_git_suffix_and_trailing_slash() {
        assert_eq!(parse("https://github.com/owner/repo.git").unwrap().name, "repo");
        assert_eq!(parse("https://github.com/owner/repo/").unwrap().name, "repo");
        assert_eq!(parse("  github.com/owner/my.repo  ").unwrap().name, "my.repo");
    }

    #[test]
    fn test_parse_ssh() {
        let locator = parse("git@github.com:owner/repo.git").unwrap();
        assert_eq!(locator.owner, "owner");
        assert_eq!(locator.name, "repo");
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "not-a-url",
            "",
            "https://github.com/owner",
            "https://github.com/owner/repo/tree/main",
            "https://gitlab.com/owner/repo",
        ] {
            assert!(
                matches!(parse(input), Err(Error::InvalidLocator(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_enterprise_host() {
        let locator =
            parse_repo_locator_with_host("https://git.example.com/team/app", Some("git.example.com"))
                .unwrap();
        assert_eq!(locator.host, "git.example.com");
        assert_eq!(locator.owner, "team");
        assert!(parse("https://git.example.com/team/app").is_err());
    }
}
