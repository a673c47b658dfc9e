//! Consolidate command - build the merged repository

use crate::cli::CliProgress;
use crate::cli::style::{Stylize, arrow};
use anstream::println;
use anyhow::{Context, Result, ensure};
use moveit_merge::config::default_plan;
use moveit_merge::consolidate::run;
use moveit_merge::exec::SystemRunner;
use moveit_merge::types::{GitCompat, MergePlan, RepoSource};
use std::path::{Path, PathBuf};

/// Options for a consolidation run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Template directory, defaults to `<path>/template`
    pub template_dir: Option<PathBuf>,
    /// Use flags understood by git older than 2.9
    pub legacy_git: bool,
    /// Show the plan without running anything
    pub dry_run: bool,
    /// Prompt before removing leftover directories
    pub confirm: bool,
}

/// Run the consolidation rooted at `path`
pub fn run_consolidate(path: &Path, options: RunOptions) -> Result<()> {
    ensure!(
        path.is_dir(),
        "working directory '{}' does not exist",
        path.display()
    );

    let mut plan = default_plan(path);
    if let Some(dir) = options.template_dir {
        plan.template_dir = dir;
    }
    if options.legacy_git {
        plan.git_compat = GitCompat::Legacy;
    }
    plan.validate()?;

    if options.dry_run {
        print_plan_preview(&plan, path);
        return Ok(());
    }

    let progress = CliProgress {
        confirm: options.confirm,
    };
    let report = run(&plan, path, &SystemRunner::new(), &progress)
        .with_context(|| format!("consolidating into '{}'", plan.destination))?;

    tracing::info!(
        branches = report.branches.len(),
        merges = report.merged.len(),
        "consolidation finished"
    );
    Ok(())
}

/// Print what a run would do, for --dry-run
fn print_plan_preview(plan: &MergePlan, path: &Path) {
    println!("{}:", "Consolidation plan".emphasis());
    println!();
    println!(
        "  Destination: {}",
        path.join(&plan.destination).display().accent()
    );
    println!("  Templates:   {}", plan.template_dir.display().accent());
    println!(
        "  Git flags:   {}",
        match plan.git_compat {
            GitCompat::Modern => "modern",
            GitCompat::Legacy => "legacy (no --allow-unrelated-histories)",
        }
        .muted()
    );
    println!();

    println!("  {}:", "Repositories (merge order)".emphasis());
    for repo in &plan.repos {
        let source = match &repo.source {
            RepoSource::Address(addr) => addr.clone(),
            RepoSource::Scratch => plan.scratch.as_ref().map_or_else(
                || "(unresolved)".to_string(),
                |s| format!("clone of {} in {}", s.url, s.dir),
            ),
        };
        println!("    {} {} {}", arrow(), repo.name.accent(), source.muted());
    }
    println!();

    println!("  {}:", "Branches".emphasis());
    for branch in &plan.branches {
        println!(
            "    {} {} {}",
            arrow(),
            branch.name.accent(),
            format!("({})", branch.distro).muted()
        );
    }
    println!();
    println!("{}", "Dry run, nothing changed".muted());
}
