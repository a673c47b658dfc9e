//! Typed git invocations
//!
//! Flag spellings are kept exactly as git expects them so the echoed command
//! lines can be replayed by hand.

use crate::error::Result;
use crate::exec::{CommandRunner, Invocation};
use crate::types::GitCompat;
use std::path::Path;

/// Flag that lets pull/merge join histories with no common ancestor
pub const ALLOW_UNRELATED: &str = "--allow-unrelated-histories";

/// git command front-end over a [`CommandRunner`]
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    compat: GitCompat,
}

impl<'a> Git<'a> {
    /// Create a front-end
    pub fn new(runner: &'a dyn CommandRunner, compat: GitCompat) -> Self {
        Self { runner, compat }
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<()> {
        self.runner.run(&Invocation::git(dir, args.iter().copied()))
    }

    /// Append the unrelated-histories flag when the installed git knows it
    fn with_unrelated<'b>(&self, mut args: Vec<&'b str>) -> Vec<&'b str> {
        if self.compat.allows_unrelated_flag() {
            args.push(ALLOW_UNRELATED);
        }
        args.push("--no-edit");
        args
    }

    /// `git clone <url> <dest>`
    pub fn clone_repo(&self, dir: &Path, url: &str, dest: &str) -> Result<()> {
        self.run(dir, &["clone", url, dest])
    }

    /// `git init .`
    pub fn init(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["init", "."])
    }

    /// Point `HEAD` of a fresh repository at `branch`
    pub fn set_initial_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        let reference = format!("refs/heads/{branch}");
        self.run(dir, &["symbolic-ref", "HEAD", reference.as_str()])
    }

    /// `git commit -m <message> --allow-empty`
    pub fn commit_empty(&self, dir: &Path, message: &str) -> Result<()> {
        self.run(dir, &["commit", "-m", message, "--allow-empty"])
    }

    /// `git commit -m <message>`
    pub fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        self.run(dir, &["commit", "-m", message])
    }

    /// `git checkout -b <branch> [<start>]`
    pub fn checkout_new(&self, dir: &Path, branch: &str, start: Option<&str>) -> Result<()> {
        let mut args = vec!["checkout", "-b", branch];
        args.extend(start);
        self.run(dir, &args)
    }

    /// `git checkout <branch>`
    pub fn checkout(&self, dir: &Path, branch: &str) -> Result<()> {
        self.run(dir, &["checkout", branch])
    }

    /// `git tag <name>`
    pub fn tag(&self, dir: &Path, name: &str) -> Result<()> {
        self.run(dir, &["tag", name])
    }

    /// `git tag -d <name>`
    pub fn delete_tag(&self, dir: &Path, name: &str) -> Result<()> {
        self.run(dir, &["tag", "-d", name])
    }

    /// `git branch -d <name>`
    pub fn delete_branch(&self, dir: &Path, name: &str) -> Result<()> {
        self.run(dir, &["branch", "-d", name])
    }

    /// `git pull --no-rebase <addr> <branch> [--allow-unrelated-histories] --no-edit`
    ///
    /// `--no-rebase` pins pull to fetch+merge regardless of the user's
    /// `pull.rebase` setting, newer git refuses divergent pulls without it.
    pub fn pull(&self, dir: &Path, address: &str, branch: &str) -> Result<()> {
        let args = self.with_unrelated(vec!["pull", "--no-rebase", address, branch]);
        self.run(dir, &args)
    }

    /// `git merge <branch> [--allow-unrelated-histories] --no-edit`
    pub fn merge(&self, dir: &Path, branch: &str) -> Result<()> {
        let args = self.with_unrelated(vec!["merge", branch]);
        self.run(dir, &args)
    }

    /// `git filter-branch -f --tree-filter <filter> HEAD`
    pub fn filter_tree(&self, dir: &Path, filter: &str) -> Result<()> {
        self.run(dir, &["filter-branch", "-f", "--tree-filter", filter, "HEAD"])
    }

    /// `git rm <path>`
    pub fn rm(&self, dir: &Path, path: &str) -> Result<()> {
        self.run(dir, &["rm", path])
    }

    /// `git add .`
    pub fn add_all(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["add", "."])
    }
}
