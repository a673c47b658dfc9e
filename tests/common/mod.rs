//! Shared test fixtures

#![allow(dead_code)]

mod mock_runner;

pub use mock_runner::{MockRunner, RecordingProgress};

use moveit_merge::exec::SystemRunner;
use moveit_merge::types::{BranchDescriptor, GitCompat, MergePlan, RepoDescriptor};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;

pub const README: &str = "# Merged repository\n";
pub const GITIGNORE: &str = "build/\n*.pyc\n";

/// Working directory with a populated `template/` inside
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    /// Template with README, .gitignore, and a `dist1/` holding one file and one subdirectory
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create workspace");
        let template = dir.path().join("template");
        fs::create_dir_all(template.join("dist1").join("nested")).unwrap();
        fs::write(template.join("README.md"), README).unwrap();
        fs::write(template.join(".gitignore"), GITIGNORE).unwrap();
        fs::write(template.join("dist1").join(".travis.yml"), "language: cpp\n").unwrap();
        fs::write(template.join("dist1").join("nested").join("x"), "x").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Canonical workspace path, as the orchestrator sees it
    pub fn canonical(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).unwrap()
    }

    /// Canonical path of the destination repository
    pub fn destination(&self) -> PathBuf {
        self.canonical().join("moveit")
    }

    /// Plan merging `repos` (name, address) into branches `(name, distro)`
    pub fn plan(&self, repos: &[(&str, &str)], branches: &[(&str, &str)]) -> MergePlan {
        MergePlan {
            repos: repos
                .iter()
                .map(|(name, addr)| RepoDescriptor::new(*name, *addr))
                .collect(),
            branches: branches
                .iter()
                .map(|(name, distro)| BranchDescriptor::new(*name, *distro))
                .collect(),
            scratch: None,
            destination: "moveit".to_string(),
            default_branch: "master".to_string(),
            git_compat: GitCompat::Modern,
            template_dir: self.dir.path().join("template"),
            removal_delay: Duration::ZERO,
        }
    }
}

// =============================================================================
// Real git fixtures
// =============================================================================

/// Environment isolating git from the user's configuration
pub fn git_env(home: &Path) -> Vec<(String, String)> {
    let home = home.to_string_lossy().to_string();
    vec![
        ("HOME".to_string(), home.clone()),
        ("XDG_CONFIG_HOME".to_string(), home),
        ("GIT_CONFIG_NOSYSTEM".to_string(), "1".to_string()),
        ("GIT_AUTHOR_NAME".to_string(), "Test User".to_string()),
        ("GIT_AUTHOR_EMAIL".to_string(), "test@test.com".to_string()),
        ("GIT_COMMITTER_NAME".to_string(), "Test User".to_string()),
        ("GIT_COMMITTER_EMAIL".to_string(), "test@test.com".to_string()),
        ("GIT_TERMINAL_PROMPT".to_string(), "0".to_string()),
    ]
}

/// System runner with the isolated environment
pub fn isolated_runner(home: &Path) -> SystemRunner {
    git_env(home)
        .into_iter()
        .fold(SystemRunner::new().silent(), |runner, (k, v)| {
            runner.with_env(k, v)
        })
}

/// Run git in `dir` and return stdout, panicking on failure
pub fn git_output(home: &Path, dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(git_env(home))
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Sorted lines of git output
pub fn git_lines(home: &Path, dir: &Path, args: &[&str]) -> Vec<String> {
    let mut lines: Vec<String> = git_output(home, dir, args)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    lines.sort();
    lines
}

/// Temporary git repository with a `main` branch
pub struct TempGitRepo {
    pub dir: TempDir,
    home: PathBuf,
}

impl TempGitRepo {
    pub fn new(home: &Path) -> Self {
        let dir = TempDir::new().expect("create repo dir");
        let repo = Self {
            dir,
            home: home.to_path_buf(),
        };
        repo.git(&["init", "."]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Address usable with `git pull`
    pub fn address(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }

    pub fn git(&self, args: &[&str]) -> String {
        git_output(&self.home, self.dir.path(), args)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Stage everything and commit
    pub fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-m", message]);
    }
}

/// Empty directory used as `$HOME` for git
pub fn temp_home() -> TempDir {
    TempDir::new().expect("create home")
}
