//! Release tag queries and checkout through git.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::CommandRunner;

/// Git-backed version queries over the command runner boundary.
pub struct VersionService {
    cmd: Arc<dyn CommandRunner>,
    repo_dir: Option<PathBuf>,
}

impl VersionService {
    /// Create a service running git in `repo_dir` (current directory when `None`).
    pub fn new(cmd: Arc<dyn CommandRunner>, repo_dir: Option<PathBuf>) -> Self {
        Self { cmd, repo_dir }
    }

    fn git_args<'a>(&self, dir: &'a Option<String>, args: &[&'a str]) -> Vec<&'a str> {
        let mut full = Vec::with_capacity(args.len() + 2);
        if let Some(dir) = dir {
            full.push("-C");
            full.push(dir.as_str());
        }
        full.extend_from_slice(args);
        full
    }

    /// Run git and return its stdout; a non-zero exit is an error.
    fn git(&self, args: &[&str]) -> ApplicationResult<String> {
        let dir = self.repo_dir.as_ref().map(|d| d.to_string_lossy().into_owned());
        let full = self.git_args(&dir, args);
        debug!("git: {:?}", full);

        let output = self.cmd.run("git", &full).with_command_context("git")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApplicationError::External {
                command: format!("git {}", args.join(" ")),
                message: stderr.trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Commit hash of a revision (`HEAD`, a branch, a tag).
    pub fn hash_for(&self, revision: &str) -> ApplicationResult<String> {
        Ok(self.git(&["rev-parse", revision])?.trim().to_string())
    }

    /// Commit hash a tag points at.
    pub fn hash_for_tag(&self, tag: &str) -> ApplicationResult<String> {
        Ok(self.git(&["rev-list", "-n", "1", tag])?.trim().to_string())
    }

    /// All tags, in git's order.
    pub fn tags(&self) -> ApplicationResult<Vec<String>> {
        Ok(self
            .git(&["tag"])?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Tag pointing at `revision`, if any.
    pub fn tag_for(&self, revision: &str) -> ApplicationResult<Option<String>> {
        let hash = self.hash_for(revision)?;
        // show-ref exits 1 when the repository has no tags at all
        let refs = match self.git(&["show-ref", "--tags", "-d"]) {
            Ok(refs) => refs,
            Err(ApplicationError::External { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let tag = refs.lines().find_map(|line| {
            let (commit, reference) = line.split_once(' ')?;
            if commit != hash {
                return None;
            }
            let name = reference.strip_prefix("refs/tags/")?;
            Some(name.trim_end_matches("^{}").to_string())
        });
        debug!("tag_for: {} -> {:?}", revision, tag);
        Ok(tag)
    }

    /// Check out a commit quietly.
    pub fn checkout(&self, hash: &str) -> ApplicationResult<()> {
        self.git(&["checkout", "-q", hash])?;
        Ok(())
    }
}
