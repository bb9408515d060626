//! Commit operations for GitManager
//!
//! Contains methods for creating commits, viewing history, and diffs

use chrono::{DateTime, FixedOffset, Utc};
use git2::{
    BranchType, Commit, Delta, DiffFindOptions, DiffOptions, Index, IndexAddOption, Patch,
    Repository, Sort,
};
use std::path::Path;

use crate::git::error::{RepoError, RepoResult};
use crate::git::types::{ChangeKind, CommitDiff, CommitList, CommitOutcome, CommitRecord, FileChange};
use crate::git::GitManager;

impl GitManager {
    /// Stage every change in the working tree and commit it.
    ///
    /// Bootstraps the repository first if there is none (see
    /// [`GitManager::ensure_initialized`]). A clean tree yields
    /// [`CommitOutcome::NoChanges`] rather than an empty commit.
    pub fn commit_all(&self, message: &str) -> RepoResult<CommitOutcome> {
        if message.trim().is_empty() {
            return Err(RepoError::validation("commit message must not be empty"));
        }

        self.ensure_initialized()?;
        let repo = self.open()?;

        let outcome = self.stage_and_commit(&repo, message)?;
        match &outcome {
            CommitOutcome::Created(sha) => log::info!("[GitManager] Created commit {}", sha),
            CommitOutcome::NoChanges => log::info!("[GitManager] Nothing to commit"),
        }
        Ok(outcome)
    }

    /// Stage all files (new, modified, and deleted) in memory.
    ///
    /// The on-disk index is untouched until the caller writes it back.
    pub(crate) fn stage_all(&self, repo: &Repository) -> RepoResult<Index> {
        let mut index = repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        Ok(index)
    }

    /// Stage everything and commit on top of HEAD unless the snapshot equals HEAD.
    ///
    /// The staged index is persisted only once the commit and ref update
    /// succeed, so a failed commit leaves the index as it was.
    pub(crate) fn stage_and_commit(
        &self,
        repo: &Repository,
        message: &str,
    ) -> RepoResult<CommitOutcome> {
        let mut index = self.stage_all(repo)?;
        let tree_id = index.write_tree()?;

        let parent = match Self::head_commit(repo) {
            Ok(commit) => Some(commit),
            Err(RepoError::RepositoryNotInitialized(_)) => None,
            Err(e) => return Err(e),
        };

        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => index.is_empty(),
        };
        if unchanged {
            return Ok(CommitOutcome::NoChanges);
        }

        let tree = repo.find_tree(tree_id)?;
        let signature = self.signature(repo)?;
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        index.write()?;

        Ok(CommitOutcome::Created(oid.to_string()))
    }

    /// List commits reachable from `branch`, newest first, at most `limit`.
    ///
    /// `"HEAD"` (or an empty name) means the checked-out branch.
    pub fn list_commits(&self, branch: &str, limit: usize) -> RepoResult<CommitList> {
        let repo = self.open()?;
        Self::require_commits(&repo)?;

        let (name, tip) = self.resolve_history_start(&repo, branch)?;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(tip.id())?;

        let mut commits = Vec::new();
        for oid in revwalk.take(limit) {
            let commit = repo.find_commit(oid?)?;
            commits.push(self.commit_to_record(&commit));
        }

        Ok(CommitList {
            branch: name,
            commits,
        })
    }

    /// Local branch names win over other revisions of the same spelling
    fn resolve_history_start<'r>(
        &self,
        repo: &'r Repository,
        branch: &str,
    ) -> RepoResult<(String, Commit<'r>)> {
        let branch = branch.trim();

        if branch.is_empty() || branch == "HEAD" {
            let commit = Self::head_commit(repo)?;
            let name = Self::current_branch_name(repo).unwrap_or_else(|| "HEAD".to_string());
            return Ok((name, commit));
        }

        if let Ok(local) = repo.find_branch(branch, BranchType::Local) {
            let commit = local.get().peel_to_commit()?;
            return Ok((branch.to_string(), commit));
        }

        let commit = Self::resolve_commit(repo, branch)
            .map_err(|_| RepoError::not_found(format!("branch '{}'", branch)))?;
        Ok((branch.to_string(), commit))
    }

    /// Compare the snapshots of two commits directly (no merge base).
    ///
    /// Identical commits yield an empty diff.
    pub fn compare_commits(&self, from_sha: &str, to_sha: &str) -> RepoResult<CommitDiff> {
        let repo = self.open()?;
        let from_commit = Self::resolve_commit(&repo, from_sha)?;
        let to_commit = Self::resolve_commit(&repo, to_sha)?;

        let from_id = from_commit.id().to_string();
        let to_id = to_commit.id().to_string();

        if from_commit.id() == to_commit.id() {
            return Ok(CommitDiff::from_files(from_id, to_id, Vec::new()));
        }

        let from_tree = from_commit.tree()?;
        let to_tree = to_commit.tree()?;

        let mut diff = repo.diff_tree_to_tree(
            Some(&from_tree),
            Some(&to_tree),
            Some(&mut DiffOptions::new()),
        )?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut files = Vec::new();
        for idx in 0..diff.deltas().len() {
            let Some(delta) = diff.get_delta(idx) else {
                continue;
            };
            let Some(status) = self.change_kind(delta.status()) else {
                continue;
            };

            let new_path = delta.new_file().path().map(path_to_string);
            let old_path = delta.old_file().path().map(path_to_string);
            let path = new_path.clone().or_else(|| old_path.clone()).unwrap_or_default();

            let (patch, insertions, deletions) = match Patch::from_diff(&diff, idx)? {
                Some(mut patch) => {
                    let (_, insertions, deletions) = patch.line_stats()?;
                    let text = String::from_utf8_lossy(&patch.to_buf()?).into_owned();
                    (text, insertions, deletions)
                }
                None => (String::new(), 0, 0),
            };

            files.push(FileChange {
                path,
                old_path: if status == ChangeKind::Renamed {
                    old_path
                } else {
                    None
                },
                status,
                insertions,
                deletions,
                patch,
            });
        }

        Ok(CommitDiff::from_files(from_id, to_id, files))
    }

    /// Convert a Commit to CommitRecord
    pub(crate) fn commit_to_record(&self, commit: &Commit) -> CommitRecord {
        let author = commit.author();

        CommitRecord {
            sha: commit.id().to_string(),
            message: commit.message().unwrap_or("").to_string(),
            author: author.name().unwrap_or("").to_string(),
            timestamp: format_commit_time(commit.time()),
        }
    }

    /// Map an engine delta onto the four reported change kinds
    pub(crate) fn change_kind(&self, delta: Delta) -> Option<ChangeKind> {
        match delta {
            Delta::Added | Delta::Copied | Delta::Untracked => Some(ChangeKind::Added),
            Delta::Deleted => Some(ChangeKind::Deleted),
            Delta::Modified | Delta::Typechange => Some(ChangeKind::Modified),
            Delta::Renamed => Some(ChangeKind::Renamed),
            Delta::Unmodified | Delta::Ignored | Delta::Unreadable | Delta::Conflicted => None,
        }
    }
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// RFC 3339 in the offset recorded on the commit
fn format_commit_time(time: git2::Time) -> String {
    let utc = DateTime::<Utc>::from_timestamp(time.seconds(), 0).unwrap_or_default();
    match FixedOffset::east_opt(time.offset_minutes() * 60) {
        Some(offset) => utc.with_timezone(&offset).to_rfc3339(),
        None => utc.to_rfc3339(),
    }
}
