//! Core types for moveit-merge

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Where a source repository is pulled from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// A URL or local path known up front
    Address(String),
    /// The scratch clone created at the start of the run
    Scratch,
}

/// A repository to merge into the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDescriptor {
    /// Repository name, also the subdirectory its content is moved into
    pub name: String,
    /// Address to pull from
    pub source: RepoSource,
}

impl RepoDescriptor {
    /// Repository pulled from a fixed address
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: RepoSource::Address(address.into()),
        }
    }

    /// Repository served by the scratch clone
    pub fn scratch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: RepoSource::Scratch,
        }
    }
}

/// A branch to build in the destination repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDescriptor {
    /// Branch name in the source repositories (and the destination)
    pub name: String,
    /// Distribution label, selects the template subdirectory
    pub distro: String,
}

impl BranchDescriptor {
    /// Create a branch descriptor
    pub fn new(name: impl Into<String>, distro: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distro: distro.into(),
        }
    }
}

/// Repository cloned locally and given one branch per [`BranchDescriptor`]
///
/// Used for a source that doesn't carry the target branches yet. Its local
/// path becomes the address of the repository descriptor with the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchClone {
    /// Name of the repository descriptor this clone serves
    pub name: String,
    /// Remote to clone
    pub url: String,
    /// Directory (relative to the working directory) to clone into
    pub dir: String,
}

/// Which flag set the installed git understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitCompat {
    /// git 2.9 and later, merges unrelated histories only when asked
    #[default]
    Modern,
    /// Older git, no `--allow-unrelated-histories` flag
    Legacy,
}

impl GitCompat {
    /// Whether pull/merge should pass `--allow-unrelated-histories`
    pub const fn allows_unrelated_flag(self) -> bool {
        matches!(self, Self::Modern)
    }
}

/// Everything a consolidation run needs to know
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// Repositories in merge order
    pub repos: Vec<RepoDescriptor>,
    /// Branches in processing order
    pub branches: Vec<BranchDescriptor>,
    /// Optional scratch clone bootstrapped before anything else
    pub scratch: Option<ScratchClone>,
    /// Destination directory name (relative to the working directory)
    pub destination: String,
    /// Branch `git init` starts on; deleted once every branch is built
    pub default_branch: String,
    /// git flag compatibility
    pub git_compat: GitCompat,
    /// Directory holding `README.md`, `.gitignore` and per-distro subdirectories
    pub template_dir: PathBuf,
    /// Grace period before removing a directory left over from a previous run
    pub removal_delay: Duration,
}

impl MergePlan {
    /// Check the plan for problems that would otherwise surface halfway through a run
    pub fn validate(&self) -> Result<()> {
        if self.repos.is_empty() {
            return Err(Error::InvalidPlan("no repositories to merge".to_string()));
        }
        if self.branches.is_empty() {
            return Err(Error::InvalidPlan("no branches to merge".to_string()));
        }

        let mut seen = HashSet::new();
        for repo in &self.repos {
            if repo.name.is_empty() || repo.name.contains('/') {
                return Err(Error::InvalidPlan(format!(
                    "repository name '{}' is not a valid directory name",
                    repo.name
                )));
            }
            if !seen.insert(repo.name.as_str()) {
                return Err(Error::InvalidPlan(format!(
                    "repository '{}' listed twice",
                    repo.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for branch in &self.branches {
            if !seen.insert(branch.name.as_str()) {
                return Err(Error::InvalidPlan(format!(
                    "branch '{}' listed twice",
                    branch.name
                )));
            }
            if branch.name == self.default_branch {
                return Err(Error::InvalidPlan(format!(
                    "branch '{}' collides with the default branch",
                    branch.name
                )));
            }
        }

        let scratch_users: Vec<_> = self
            .repos
            .iter()
            .filter(|r| r.source == RepoSource::Scratch)
            .collect();
        match (&self.scratch, scratch_users.as_slice()) {
            (None, []) => {}
            (Some(scratch), [repo]) if repo.name == scratch.name => {}
            (Some(scratch), _) => {
                return Err(Error::InvalidPlan(format!(
                    "scratch clone '{}' must serve exactly one repository of the same name",
                    scratch.name
                )));
            }
            (None, [repo, ..]) => {
                return Err(Error::InvalidPlan(format!(
                    "repository '{}' expects a scratch clone but none is configured",
                    repo.name
                )));
            }
        }

        Ok(())
    }

    /// Branch names in processing order
    pub fn branch_names(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.name.as_str()).collect()
    }
}

/// Concrete pull address for every repository, in merge order
///
/// Built by the bootstrap phase once the scratch clone exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSources {
    entries: Vec<(String, Option<String>)>,
}

impl ResolvedSources {
    /// Seed from a plan; scratch-backed repositories start unresolved
    pub fn from_plan(plan: &MergePlan) -> Self {
        let entries = plan
            .repos
            .iter()
            .map(|repo| {
                let addr = match &repo.source {
                    RepoSource::Address(addr) => Some(addr.clone()),
                    RepoSource::Scratch => None,
                };
                (repo.name.clone(), addr)
            })
            .collect();
        Self { entries }
    }

    /// Fill in the address of a repository
    pub fn resolve(&mut self, name: &str, address: impl Into<String>) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| Error::InvalidPlan(format!("unknown repository '{name}'")))?;
        entry.1 = Some(address.into());
        Ok(())
    }

    /// Address of a repository, if resolved
    pub fn address(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, addr)| addr.as_deref())
    }

    /// All `(name, address)` pairs in merge order, failing on the first unresolved one
    pub fn ordered(&self) -> Result<Vec<(&str, &str)>> {
        self.entries
            .iter()
            .map(|(name, addr)| {
                addr.as_deref()
                    .map(|a| (name.as_str(), a))
                    .ok_or_else(|| Error::UnresolvedSource(name.clone()))
            })
            .collect()
    }
}
