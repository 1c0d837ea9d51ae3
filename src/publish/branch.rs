//! Branch naming for publish attempts

use chrono::Utc;

/// Prefix for generated branch names
pub const BRANCH_PREFIX: &str = "workflow-studio-update";

/// Replace every character outside `[A-Za-z0-9/_-]` with `-`
pub fn sanitize_branch_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// First branch name to try
///
/// A blank or missing `desired` name falls back to a generated one.
pub fn candidate_branch_name(desired: Option<&str>, timestamp_ms: i64) -> String {
    match desired.map(str::trim).filter(|d| !d.is_empty()) {
        Some(name) => sanitize_branch_name(name),
        None => format!("{BRANCH_PREFIX}-{timestamp_ms}"),
    }
}

/// Name used for the single retry after a conflict
pub fn disambiguate(candidate: &str, timestamp_ms: i64) -> String {
    format!("{candidate}-{timestamp_ms}")
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_branch_name("feature/ci update!"), "feature/ci-update-");
        assert_eq!(sanitize_branch_name("a_b-c/D9"), "a_b-c/D9");
        assert_eq!(sanitize_branch_name("ci.yml"), "ci-yml");
    }

    #[test]
    fn test_candidate_uses_desired_name() {
        assert_eq!(candidate_branch_name(Some("my branch"), 1), "my-branch");
    }

    #[test]
    fn test_candidate_generated_when_blank() {
        assert_eq!(
            candidate_branch_name(None, 1_700_000_000_000),
            "workflow-studio-update-1700000000000"
        );
        assert_eq!(
            candidate_branch_name(Some("   "), 5),
            "workflow-studio-update-5"
        );
    }

    #[test]
    fn test_disambiguate() {
        assert_eq!(disambiguate("ci", 7), "ci-7");
    }
}
