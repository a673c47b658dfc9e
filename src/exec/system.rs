//! Runner that spawns real processes

use super::{CommandRunner, Invocation};
use crate::error::{Error, Result};
use anstream::println;
use std::process::Command;
use tracing::{debug, instrument};

/// Runs commands with [`std::process::Command`], inheriting stdio
///
/// Each command is echoed to stdout as `++ <command line>` before it runs.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    envs: Vec<(String, String)>,
    echo: bool,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            // filter-branch otherwise stops to print a deprecation notice
            envs: vec![("FILTER_BRANCH_SQUELCH_WARNING".to_string(), "1".to_string())],
            echo: true,
        }
    }
}

impl SystemRunner {
    /// Runner with the default environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable for every command this runner spawns
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Don't echo commands before running them
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.echo = false;
        self
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(cwd = %invocation.cwd.display()))]
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let command = invocation.rendered();
        if self.echo {
            println!("++ {command}");
        }
        debug!(%command, "spawning");

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .envs(invocation.envs.iter().map(|(k, v)| (k, v)))
            .status()
            .map_err(|source| Error::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if !status.success() {
            debug!(%command, code = ?status.code(), "command failed");
            return Err(Error::CommandFailed {
                command,
                code: status.code(),
            });
        }

        Ok(())
    }
}
