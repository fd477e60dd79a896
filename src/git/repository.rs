//! Git repository operations

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Commit, Delta, Diff, ErrorCode, Reference, Repository};

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository containing the current directory
    pub fn open() -> Result<Self> {
        let repo = Repository::discover(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Open the repository containing the specified path
    ///
    /// Parent directories are searched, so any path inside the work tree works.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Get workdir path
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// HEAD reference, or `None` before the first commit
    fn head(&self) -> Result<Option<Reference<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head)),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to get HEAD reference"),
        }
    }

    /// Get current branch name
    ///
    /// Returns an empty string on a detached HEAD, and the branch HEAD
    /// points at in a repository without commits.
    pub fn get_current_branch(&self) -> Result<String> {
        if let Some(head) = self.head()? {
            if !head.is_branch() {
                return Ok(String::new());
            }
            return Ok(head.shorthand().unwrap_or_default().to_string());
        }

        let head = self
            .repo
            .find_reference("HEAD")
            .context("Failed to read HEAD")?;
        Ok(head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .unwrap_or_default()
            .to_string())
    }

    /// Read a string value from the repository's git config
    pub fn config_value(&self, key: &str) -> Result<Option<String>> {
        let config = self.repo.config().context("Failed to read git config")?;
        match config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read git config {key}")),
        }
    }

    /// Resolve a revision to a commit, defaulting to HEAD
    ///
    /// HEAD of a repository without commits resolves to `None`.
    pub fn find_commit(&self, revision: Option<&str>) -> Result<Option<Commit<'_>>> {
        match revision {
            Some(rev) => {
                let obj = self
                    .repo
                    .revparse_single(rev)
                    .with_context(|| format!("Failed to parse commit: {rev}"))?;
                let commit = obj
                    .peel_to_commit()
                    .with_context(|| format!("{rev} does not point to a commit"))?;
                Ok(Some(commit))
            }
            None => match self.head()? {
                Some(head) => Ok(Some(
                    head.peel_to_commit()
                        .context("Failed to peel HEAD to commit")?,
                )),
                None => Ok(None),
            },
        }
    }

    /// Paths staged in the index relative to HEAD
    pub fn staged_files(&self) -> Result<Vec<String>> {
        let head_tree = match self.head()? {
            Some(head) => Some(head.peel_to_tree().context("Failed to peel HEAD to tree")?),
            None => None,
        };
        let index = self.repo.index().context("Failed to read index")?;
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)
            .context("Failed to diff HEAD against index")?;

        Ok(committed_paths(&diff))
    }

    /// Paths changed by a commit relative to its first parent
    pub fn files_in_commit(&self, revision: &str) -> Result<Vec<String>> {
        let commit = self
            .find_commit(Some(revision))?
            .with_context(|| format!("Failed to find commit: {revision}"))?;
        let tree = commit.tree().context("Failed to get commit tree")?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(
                commit
                    .parent(0)
                    .and_then(|parent| parent.tree())
                    .context("Failed to get parent tree")?,
            )
        } else {
            None
        };
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .context("Failed to diff commit against parent")?;

        Ok(committed_paths(&diff))
    }

    /// Local and remote branches whose tip is HEAD or one of its ancestors
    ///
    /// The current branch and symbolic `*/HEAD` refs are left out.
    pub fn branches_contained_in_head(&self) -> Result<Vec<String>> {
        let Some(head) = self.head()? else {
            return Ok(Vec::new());
        };
        let head_oid = head
            .peel_to_commit()
            .context("Failed to peel HEAD to commit")?
            .id();
        let current = if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        };

        let mut names = Vec::new();
        for entry in self.repo.branches(None).context("Failed to list branches")? {
            let (branch, _) = entry.context("Failed to read branch")?;
            let Some(name) = branch.name().context("Failed to read branch name")? else {
                continue;
            };
            if name.ends_with("/HEAD") || current.as_deref() == Some(name) {
                continue;
            }
            let Some(tip) = branch.get().target() else {
                continue;
            };
            if tip == head_oid
                || self
                    .repo
                    .graph_descendant_of(head_oid, tip)
                    .context("Failed to compare branch history")?
            {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(names)
    }
}

fn is_unborn(err: &git2::Error) -> bool {
    matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

/// New-side paths of a diff, skipping deletions
fn committed_paths(diff: &Diff<'_>) -> Vec<String> {
    diff.deltas()
        .filter(|delta| delta.status() != Delta::Deleted)
        .filter_map(|delta| delta.new_file().path())
        .map(|path| path.to_string_lossy().to_string())
        .collect()
}
