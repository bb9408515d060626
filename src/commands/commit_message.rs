// Commit message suggestions from the current repository status

use std::str::FromStr;

use crate::commands::git::GitToolState;
use crate::git::{RepoError, RepoResult, RepoStatus};

/// Paths listed per group before the rest are summarised
const MAX_LISTED_FILES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitMessageStyle {
    /// `feat: ...`, `fix: ...` style prefixes
    #[default]
    Conventional,
    Simple,
}

impl FromStr for CommitMessageStyle {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conventional" => Ok(CommitMessageStyle::Conventional),
            "simple" => Ok(CommitMessageStyle::Simple),
            other => Err(RepoError::Validation(format!(
                "unknown commit message style '{}' (expected conventional or simple)",
                other
            ))),
        }
    }
}

/// Suggest a commit message for the uncommitted changes
pub fn generate_commit_message(
    repo_path: Option<&str>,
    style: Option<&str>,
    state: &GitToolState,
) -> RepoResult<String> {
    let style: CommitMessageStyle = match style {
        Some(style) => style.parse()?,
        None => CommitMessageStyle::default(),
    };

    let status = state.manager_for(repo_path)?.get_status()?;
    Ok(describe_changes(&status, style))
}

pub(crate) fn describe_changes(status: &RepoStatus, style: CommitMessageStyle) -> String {
    if !status.has_changes {
        return "No changes to describe".to_string();
    }

    let file_count = status.changed_file_count();
    let message = match style {
        CommitMessageStyle::Conventional => {
            format!("{}: update {} file(s)", conventional_prefix(status), file_count)
        }
        CommitMessageStyle::Simple => format!("Update {} file(s)", file_count),
    };

    let mut changes = Vec::new();
    if !status.staged_files.is_empty() {
        changes.push(format!("Staged: {}", list_files(&status.staged_files)));
        if status.staged_files.len() > MAX_LISTED_FILES {
            changes.push(format!(
                "  ...and {} more",
                status.staged_files.len() - MAX_LISTED_FILES
            ));
        }
    }
    if !status.modified_files.is_empty() {
        changes.push(format!("Modified: {}", list_files(&status.modified_files)));
    }
    if !status.untracked_files.is_empty() {
        changes.push(format!("New: {}", list_files(&status.untracked_files)));
    }

    format!(
        "Suggested message: {}\n\nChanges detected:\n{}",
        message,
        changes.join("\n")
    )
}

/// New files win, then tests, then docs
fn conventional_prefix(status: &RepoStatus) -> &'static str {
    let mut changed = status.modified_files.iter().chain(status.staged_files.iter());

    if !status.untracked_files.is_empty() {
        "feat"
    } else if changed
        .clone()
        .any(|f| f.to_lowercase().contains("test"))
    {
        "test"
    } else if changed.any(|f| {
        let lower = f.to_lowercase();
        lower.contains("readme") || lower.contains("doc")
    }) {
        "docs"
    } else {
        "chore"
    }
}

fn list_files(files: &[String]) -> String {
    files
        .iter()
        .take(MAX_LISTED_FILES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(staged: &[&str], modified: &[&str], untracked: &[&str]) -> RepoStatus {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        RepoStatus::new(
            Some("main".into()),
            owned(staged),
            owned(modified),
            owned(untracked),
        )
    }

    #[test]
    fn test_clean_tree_has_nothing_to_describe() {
        let clean = status(&[], &[], &[]);
        assert_eq!(
            describe_changes(&clean, CommitMessageStyle::Conventional),
            "No changes to describe"
        );
    }

    #[test]
    fn test_conventional_prefixes() {
        let feat = status(&[], &["src/lib.rs"], &["src/new.rs"]);
        assert!(describe_changes(&feat, CommitMessageStyle::Conventional)
            .starts_with("Suggested message: feat: update 2 file(s)"));

        let test = status(&["tests/api_test.rs"], &[], &[]);
        assert!(describe_changes(&test, CommitMessageStyle::Conventional)
            .starts_with("Suggested message: test: update 1 file(s)"));

        let docs = status(&[], &["README.md"], &[]);
        assert!(describe_changes(&docs, CommitMessageStyle::Conventional)
            .starts_with("Suggested message: docs: update 1 file(s)"));

        let chore = status(&[], &["Cargo.toml"], &[]);
        assert!(describe_changes(&chore, CommitMessageStyle::Conventional)
            .starts_with("Suggested message: chore: update 1 file(s)"));
    }

    #[test]
    fn test_simple_style_and_file_listing() {
        let many = status(&["a", "b", "c", "d", "e", "f", "g"], &[], &["new.txt"]);
        let text = describe_changes(&many, CommitMessageStyle::Simple);

        assert!(text.starts_with("Suggested message: Update 8 file(s)"));
        assert!(text.contains("Staged: a, b, c, d, e\n  ...and 2 more"));
        assert!(text.contains("New: new.txt"));
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let err = "fancy".parse::<CommitMessageStyle>().unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
