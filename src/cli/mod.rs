//! CLI front-end

mod consolidate;
pub mod style;

pub use consolidate::{RunOptions, run_consolidate};

use anstream::{eprintln, println};
use dialoguer::Confirm;
use indicatif::ProgressBar;
use moveit_merge::error::{Error, Result};
use moveit_merge::progress::Progress;
use std::path::Path;
use std::time::Duration;
use style::{Stylize, check, spinner_style};

/// Console progress reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgress {
    /// Ask before removing leftover directories instead of waiting
    pub confirm: bool,
}

impl Progress for CliProgress {
    fn on_phase(&self, message: &str) {
        println!();
        println!("{} {}", "==>".accent(), message.emphasis());
    }

    fn on_step(&self, message: &str) {
        println!("{} {message}", "==>".accent());
    }

    fn on_warning(&self, message: &str) {
        eprintln!("{} {message}", "Warning!".warn());
    }

    fn confirm_removal(&self, path: &Path, delay: Duration) -> Result<()> {
        if self.confirm {
            let proceed = Confirm::new()
                .with_prompt(format!("Remove '{}'?", path.display()))
                .default(false)
                .interact()
                .map_err(|e| Error::Aborted(format!("failed to read confirmation: {e}")))?;
            if !proceed {
                return Err(Error::Aborted(format!(
                    "'{}' left in place",
                    path.display()
                )));
            }
            return Ok(());
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(format!(
            "Removing {} in {}s (Ctrl-C to stop)...",
            path.display().accent(),
            delay.as_secs()
        ));
        spinner.enable_steady_tick(Duration::from_millis(80));
        std::thread::sleep(delay);
        spinner.finish_with_message(format!("{} Removed {}", check(), path.display().accent()));
        Ok(())
    }

    fn on_complete(&self, guidance: &[String]) {
        println!();
        println!("{}", "Repository complete.".success());
        println!("Add a remote and push the branches like this:");
        println!();
        for line in guidance {
            println!("{line}");
        }
    }
}
