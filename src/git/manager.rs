//! Core GitManager implementation
//!
//! Contains the GitManager struct, repository binding, initialization, and the
//! reference-resolution helpers shared by the other operation modules.
//!
//! The manager holds only the repository path. Every operation opens the
//! repository fresh, so nothing is cached between calls.

use git2::{BranchType, Commit, ErrorCode, Repository, RepositoryInitOptions, Signature};
use std::path::{Path, PathBuf};

use crate::git::error::{RepoError, RepoResult};
use crate::git::types::{CommitIdentity, CommitOutcome};
use crate::utils::short_sha;

/// Branch created by `initialize`
pub const DEFAULT_BRANCH: &str = "main";

/// Message of the commit made by `initialize` on a non-empty directory
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

const FALLBACK_AUTHOR_NAME: &str = "git-tools";
const FALLBACK_AUTHOR_EMAIL: &str = "git-tools@localhost";

/// Git manager for repository operations
#[derive(Debug, Clone)]
pub struct GitManager {
    path: PathBuf,
    identity: Option<CommitIdentity>,
}

impl GitManager {
    /// Create a new GitManager bound to the given repository path.
    ///
    /// The path does not need to exist or hold a repository yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            identity: None,
        }
    }

    /// Use a fixed identity for commits instead of the repository's configuration
    pub fn with_identity(mut self, identity: Option<CommitIdentity>) -> Self {
        self.identity = identity;
        self
    }

    /// Get the repository path
    pub fn repo_path(&self) -> &Path {
        &self.path
    }

    /// Whether a repository exists at the bound path. Never touches disk state.
    pub fn is_initialized(&self) -> bool {
        Repository::open(&self.path).is_ok()
    }

    /// Initialize a repository at the bound path.
    ///
    /// Idempotent: an existing repository is left untouched. On a fresh
    /// directory with `initial_commit` set, everything present is committed
    /// as [`INITIAL_COMMIT_MESSAGE`]; an empty directory gets no commit.
    pub fn initialize(&self, initial_commit: bool) -> RepoResult<String> {
        let display = self.path.display();

        if self.is_initialized() {
            log::debug!("[GitManager] Repository already initialized at {}", display);
            return Ok(format!("Repository already initialized at {}", display));
        }

        std::fs::create_dir_all(&self.path)?;
        let has_content = dir_has_content(&self.path)?;

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(DEFAULT_BRANCH);
        let repo = Repository::init_opts(&self.path, &opts)?;
        log::info!("[GitManager] Initialized repository at {}", display);

        if !initial_commit {
            return Ok(format!("Initialized empty repository at {}", display));
        }
        if !has_content {
            return Ok(format!(
                "Initialized empty repository at {} (no files to commit)",
                display
            ));
        }

        match self.stage_and_commit(&repo, INITIAL_COMMIT_MESSAGE)? {
            CommitOutcome::Created(sha) => Ok(format!(
                "Initialized repository at {} with initial commit {}",
                display,
                short_sha(&sha)
            )),
            CommitOutcome::NoChanges => Ok(format!(
                "Initialized empty repository at {} (no files to commit)",
                display
            )),
        }
    }

    /// Precondition repair for mutating operations: bootstrap a repository
    /// (without committing) when none exists. Returns `true` if one was created.
    ///
    /// Read-only operations never call this.
    pub fn ensure_initialized(&self) -> RepoResult<bool> {
        if self.is_initialized() {
            return Ok(false);
        }
        log::info!(
            "[GitManager] Bootstrapping repository at {} before write",
            self.path.display()
        );
        self.initialize(false)?;
        Ok(true)
    }

    /// Open the repository, distinguishing a missing path from a missing repository
    pub(crate) fn open(&self) -> RepoResult<Repository> {
        if !self.path.exists() {
            return Err(RepoError::not_found(format!(
                "repository path {}",
                self.path.display()
            )));
        }

        Repository::open(&self.path).map_err(|e| match e.code() {
            ErrorCode::NotFound => RepoError::RepositoryNotInitialized(format!(
                "no repository at {}",
                self.path.display()
            )),
            _ => e.into(),
        })
    }

    /// Signature for new commits
    pub(crate) fn signature(&self, repo: &Repository) -> RepoResult<Signature<'static>> {
        if let Some(identity) = &self.identity {
            return Ok(Signature::now(&identity.name, &identity.email)?);
        }

        Ok(repo
            .signature()
            .or_else(|_| Signature::now(FALLBACK_AUTHOR_NAME, FALLBACK_AUTHOR_EMAIL))?)
    }

    /// Whether any commit is reachable from HEAD or a local branch.
    ///
    /// `Repository::is_empty` only recognises the engine's default branch
    /// name, so an unborn `main` has to be checked through HEAD.
    pub(crate) fn has_commits(repo: &Repository) -> RepoResult<bool> {
        match repo.head() {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(repo.branches(Some(BranchType::Local))?.next().is_some())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// `RepositoryNotInitialized` unless the repository has history
    pub(crate) fn require_commits(repo: &Repository) -> RepoResult<()> {
        if Self::has_commits(repo)? {
            Ok(())
        } else {
            Err(RepoError::RepositoryNotInitialized(
                "repository has no commits yet".to_string(),
            ))
        }
    }

    /// Commit HEAD points at, or `RepositoryNotInitialized` when there is none
    pub(crate) fn head_commit(repo: &Repository) -> RepoResult<Commit<'_>> {
        match repo.head() {
            Ok(head) => Ok(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Err(RepoError::RepositoryNotInitialized(
                    "repository has no commits yet".to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a branch name, tag, or (abbreviated) SHA to a commit
    pub(crate) fn resolve_commit<'r>(repo: &'r Repository, rev: &str) -> RepoResult<Commit<'r>> {
        let rev = rev.trim();
        if rev.is_empty() {
            return Err(RepoError::validation("commit reference must not be empty"));
        }

        let object = repo.revparse_single(rev).map_err(|e| {
            log::debug!("[GitManager] Could not resolve '{}': {}", rev, e);
            match e.code() {
                ErrorCode::Ambiguous => {
                    RepoError::validation(format!("reference '{}' is ambiguous", rev))
                }
                ErrorCode::Locked => e.into(),
                _ => RepoError::not_found(format!("commit '{}'", rev)),
            }
        })?;

        object
            .peel_to_commit()
            .map_err(|_| RepoError::not_found(format!("'{}' does not point to a commit", rev)))
    }

    /// Name of the checked-out branch, including an unborn one.
    /// `None` when HEAD is detached.
    pub(crate) fn current_branch_name(repo: &Repository) -> Option<String> {
        match repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(|s| s.to_string()),
            Ok(_) => None,
            Err(_) => repo.find_reference("HEAD").ok().and_then(|r| {
                r.symbolic_target()
                    .map(|t| t.trim_start_matches("refs/heads/").to_string())
            }),
        }
    }
}

/// Whether a directory holds anything besides repository metadata
fn dir_has_content(path: &Path) -> RepoResult<bool> {
    for entry in std::fs::read_dir(path)? {
        if entry?.file_name() != ".git" {
            return Ok(true);
        }
    }
    Ok(false)
}
