//! External command execution
//!
//! Every git operation goes through a [`CommandRunner`], so the orchestration
//! logic can be exercised against a fake runner in tests.

mod system;

pub use system::SystemRunner;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// One external command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute
    pub program: String,
    /// Arguments, passed verbatim
    pub args: Vec<String>,
    /// Directory to run in
    pub cwd: PathBuf,
    /// Extra environment variables for this invocation only
    pub envs: Vec<(String, String)>,
}

impl Invocation {
    /// Build an invocation of `program` in `cwd`
    pub fn new<I, S>(program: &str, cwd: &Path, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
            envs: Vec::new(),
        }
    }

    /// Build a `git` invocation in `cwd`
    pub fn git<I, S>(cwd: &Path, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", cwd, args)
    }

    /// Add an environment variable
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Program and arguments as one list
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Human-readable command line
    pub fn rendered(&self) -> String {
        render_command(&self.argv())
    }
}

/// Render a command line for display, single-quoting arguments that contain whitespace
pub fn render_command<S: AsRef<str>>(argv: &[S]) -> String {
    argv.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            if arg.chars().any(char::is_whitespace) {
                format!("'{arg}'")
            } else {
                arg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs external commands, failing on non-zero exit
///
/// Implementations block until the command finishes. A non-zero exit must
/// surface as [`Error::CommandFailed`](crate::error::Error::CommandFailed).
pub trait CommandRunner {
    /// Run one command to completion
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        (**self).run(invocation)
    }
}
