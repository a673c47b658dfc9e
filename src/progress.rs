//! Progress reporting for a consolidation run

use crate::error::Result;
use std::path::Path;
use std::time::Duration;

/// Receives status updates from the orchestrator
///
/// The CLI prints these; library callers and tests can ignore them with
/// [`NoopProgress`].
pub trait Progress {
    /// A new phase of the run started
    fn on_phase(&self, message: &str);

    /// A step within the current phase
    fn on_step(&self, message: &str);

    /// Something unexpected that doesn't stop the run
    fn on_warning(&self, message: &str);

    /// Called before a leftover directory is deleted
    ///
    /// Returning an error aborts the run. The default waits `delay` so the
    /// operator has a chance to interrupt.
    fn confirm_removal(&self, _path: &Path, delay: Duration) -> Result<()> {
        std::thread::sleep(delay);
        Ok(())
    }

    /// Instructions for the operator once the run is complete
    fn on_complete(&self, guidance: &[String]);
}

/// Progress sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl Progress for NoopProgress {
    fn on_phase(&self, _: &str) {}
    fn on_step(&self, _: &str) {}
    fn on_warning(&self, _: &str) {}
    fn on_complete(&self, _: &[String]) {}
}
