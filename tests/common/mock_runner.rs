//! Mock command runner and progress sink for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use moveit_merge::error::{Error, Result};
use moveit_merge::exec::{CommandRunner, Invocation};
use moveit_merge::progress::Progress;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

type Hook = Box<dyn Fn(&Invocation) + Send>;

/// Command runner that records invocations instead of spawning them
///
/// Features:
/// - Call tracking for verification
/// - Failure injection by command-line prefix
/// - Hooks that simulate side effects of a command (e.g. files a merge brings in)
pub struct MockRunner {
    calls: Mutex<Vec<Invocation>>,
    fail_on: Mutex<Option<(String, i32)>>,
    hooks: Mutex<Vec<(String, Hook)>>,
}

impl MockRunner {
    /// Create a mock that accepts every command
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
            hooks: Mutex::new(Vec::new()),
        }
    }

    // === Error injection methods ===

    /// Fail the first command whose rendered line starts with `prefix`
    pub fn fail_on(&self, prefix: &str, code: i32) {
        *self.fail_on.lock().unwrap() = Some((prefix.to_string(), code));
    }

    /// Run `hook` after any command whose rendered line starts with `prefix`
    pub fn on(&self, prefix: &str, hook: impl Fn(&Invocation) + Send + 'static) {
        self.hooks
            .lock()
            .unwrap()
            .push((prefix.to_string(), Box::new(hook)));
    }

    // === Call inspection ===

    /// Every invocation, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Rendered command lines, in order
    pub fn rendered(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(Invocation::rendered)
            .collect()
    }

    /// Rendered command lines starting with `prefix`
    pub fn rendered_matching(&self, prefix: &str) -> Vec<String> {
        self.rendered()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    /// Position of the first command equal to `line`
    pub fn position(&self, line: &str) -> Option<usize> {
        self.rendered().iter().position(|c| c == line)
    }

    /// Directories commands ran in, deduplicated in order of first use
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for inv in self.calls.lock().unwrap().iter() {
            if !dirs.contains(&inv.cwd) {
                dirs.push(inv.cwd.clone());
            }
        }
        dirs
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let line = invocation.rendered();
        self.calls.lock().unwrap().push(invocation.clone());

        if let Some((prefix, code)) = self.fail_on.lock().unwrap().as_ref() {
            if line.starts_with(prefix.as_str()) {
                return Err(Error::CommandFailed {
                    command: line,
                    code: Some(*code),
                });
            }
        }

        for (prefix, hook) in self.hooks.lock().unwrap().iter() {
            if line.starts_with(prefix.as_str()) {
                hook(invocation);
            }
        }
        Ok(())
    }
}

/// Progress sink that records what it was told
#[derive(Default)]
pub struct RecordingProgress {
    pub phases: Mutex<Vec<String>>,
    pub steps: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
    pub removals: Mutex<Vec<PathBuf>>,
    pub guidance: Mutex<Vec<String>>,
    /// Refuse every removal
    pub refuse_removal: bool,
}

impl RecordingProgress {
    /// Progress that aborts instead of removing leftovers
    pub fn refusing() -> Self {
        Self {
            refuse_removal: true,
            ..Self::default()
        }
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<String> {
        self.phases.lock().unwrap().clone()
    }

    pub fn guidance(&self) -> Vec<String> {
        self.guidance.lock().unwrap().clone()
    }

    pub fn removals(&self) -> Vec<PathBuf> {
        self.removals.lock().unwrap().clone()
    }
}

impl Progress for RecordingProgress {
    fn on_phase(&self, message: &str) {
        self.phases.lock().unwrap().push(message.to_string());
    }

    fn on_step(&self, message: &str) {
        self.steps.lock().unwrap().push(message.to_string());
    }

    fn on_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn confirm_removal(&self, path: &Path, _delay: Duration) -> Result<()> {
        self.removals.lock().unwrap().push(path.to_path_buf());
        if self.refuse_removal {
            return Err(Error::Aborted(format!("'{}' left in place", path.display())));
        }
        Ok(())
    }

    fn on_complete(&self, guidance: &[String]) {
        self.guidance.lock().unwrap().extend_from_slice(guidance);
    }
}
