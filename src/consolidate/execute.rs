//! Consolidation execution - effectful operations
//!
//! Runs the phases in order against a [`CommandRunner`]. The first failure
//! aborts the run and leaves the working directory as it is for inspection.

use crate::consolidate::plan::{
    COMMON_TEMPLATE_FILES, INITIAL_COMMIT_MESSAGE, TEMPLATE_COMMIT_MESSAGE, VESTIGIAL_COMMIT_MESSAGE,
    VESTIGIAL_FILES, push_instructions, relocation_filter, sentinel_tag, temp_branch,
    vestigial_path,
};
use crate::error::{Error, Result};
use crate::exec::CommandRunner;
use crate::files::copy_file;
use crate::git::Git;
use crate::progress::Progress;
use crate::types::{BranchDescriptor, MergePlan, ResolvedSources, ScratchClone};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Absolute path of the merged repository
    pub destination: PathBuf,
    /// Branches built, in processing order
    pub branches: Vec<String>,
    /// `(branch, repository)` pairs merged, in merge order
    pub merged: Vec<(String, String)>,
}

/// Run every phase of the consolidation
///
/// `workdir` holds the scratch clone and the destination repository.
pub fn run(
    plan: &MergePlan,
    workdir: &Path,
    runner: &dyn CommandRunner,
    progress: &dyn Progress,
) -> Result<ConsolidationReport> {
    plan.validate()?;
    let workdir = fs::canonicalize(workdir).map_err(|e| Error::io(workdir, e))?;
    let git = Git::new(runner, plan.git_compat);

    let mut sources = ResolvedSources::from_plan(plan);
    if let Some(scratch) = &plan.scratch {
        let address = bootstrap_scratch(plan, scratch, &workdir, &git, progress)?;
        sources.resolve(&scratch.name, address)?;
    }

    let dest = bootstrap_destination(plan, &workdir, &git, progress)?;

    let mut report = ConsolidationReport {
        destination: dest.clone(),
        ..ConsolidationReport::default()
    };

    for branch in &plan.branches {
        let merged = merge_branch(plan, branch, &sources, &dest, &git, progress)?;
        report
            .merged
            .extend(merged.into_iter().map(|repo| (branch.name.clone(), repo)));

        apply_template(plan, branch, &dest, &git, progress)?;
        report.branches.push(branch.name.clone());
    }

    progress.on_phase(&format!("Removing '{}' branch", plan.default_branch));
    git.delete_branch(&dest, &plan.default_branch)?;

    info!(destination = %dest.display(), "repository complete");
    progress.on_complete(&push_instructions(plan));

    Ok(report)
}

/// Delete a directory left over from a previous run, after giving the operator a chance to stop
fn clear_leftover(path: &Path, delay: Duration, progress: &dyn Progress) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    warn!(path = %path.display(), "removing leftover directory");
    progress.on_warning(&format!(
        "'{}' exists, it will be removed in {} seconds...",
        path.display(),
        delay.as_secs()
    ));
    progress.confirm_removal(path, delay)?;
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Phase 0: clone the scratch repository and give it every target branch
///
/// Returns the clone's `file://` address.
pub fn bootstrap_scratch(
    plan: &MergePlan,
    scratch: &ScratchClone,
    workdir: &Path,
    git: &Git<'_>,
    progress: &dyn Progress,
) -> Result<String> {
    let clone_dir = workdir.join(&scratch.dir);
    clear_leftover(&clone_dir, plan.removal_delay, progress)?;

    progress.on_phase(&format!(
        "Cloning '{}' into '{}'",
        scratch.url, scratch.dir
    ));
    git.clone_repo(workdir, &scratch.url, &scratch.dir)?;
    for branch in &plan.branches {
        git.checkout_new(&clone_dir, &branch.name, None)?;
    }

    let address = Url::from_file_path(&clone_dir)
        .map_err(|()| {
            Error::InvalidPlan(format!(
                "scratch clone path '{}' is not absolute",
                clone_dir.display()
            ))
        })?
        .to_string();
    info!(repo = %scratch.name, %address, "resolved scratch source");
    Ok(address)
}

/// Phase 1: create the destination repository with an empty root commit
///
/// Returns the destination path.
pub fn bootstrap_destination(
    plan: &MergePlan,
    workdir: &Path,
    git: &Git<'_>,
    progress: &dyn Progress,
) -> Result<PathBuf> {
    let dest = workdir.join(&plan.destination);
    clear_leftover(&dest, plan.removal_delay, progress)?;

    progress.on_phase(&format!(
        "Creating git repository '{}' to merge repositories into.",
        plan.destination
    ));
    fs::create_dir_all(&dest).map_err(|e| Error::io(&dest, e))?;
    git.init(&dest)?;
    git.set_initial_branch(&dest, &plan.default_branch)?;
    git.commit_empty(&dest, INITIAL_COMMIT_MESSAGE)?;

    Ok(dest)
}

/// Phase 2a/2b: build `branch` by merging every repository into it
///
/// Each repository is pulled onto its own temporary branch rooted at the
/// sentinel tag, relocated under its own directory, then merged in.
/// Returns the repositories merged, in order.
pub fn merge_branch(
    plan: &MergePlan,
    branch: &BranchDescriptor,
    sources: &ResolvedSources,
    dest: &Path,
    git: &Git<'_>,
    progress: &dyn Progress,
) -> Result<Vec<String>> {
    let repos = sources.ordered()?;
    let sentinel = sentinel_tag(&branch.name);

    progress.on_phase(&format!("Preparing branch '{}'", branch.name));
    git.checkout_new(dest, &branch.name, Some(&plan.default_branch))?;
    git.tag(dest, &sentinel)?;

    progress.on_phase(&format!(
        "Merging imported branches for branch '{}'",
        branch.name
    ));
    let mut merged = Vec::with_capacity(repos.len());
    for (repo, address) in repos {
        progress.on_step(&format!(
            "Processing '{}' branch from the '{repo}' repository",
            branch.name
        ));
        let temp = temp_branch(repo, &branch.name);
        git.checkout_new(dest, &temp, Some(&sentinel))?;
        git.pull(dest, address, &branch.name)?;
        git.filter_tree(dest, &relocation_filter(repo))?;

        progress.on_step(&format!(
            "Merging '{}' branch from the '{repo}' repository",
            branch.name
        ));
        git.checkout(dest, &branch.name)?;
        git.merge(dest, &temp)?;
        git.delete_branch(dest, &temp)?;

        prune_vestigial(repo, dest, git)?;
        info!(branch = %branch.name, %repo, "merged");
        merged.push(repo.to_string());
    }

    Ok(merged)
}

/// Drop per-repository ignore/CI files superseded by the top-level ones
///
/// Returns whether a commit was made.
fn prune_vestigial(repo: &str, dest: &Path, git: &Git<'_>) -> Result<bool> {
    let mut removed = false;
    for file in VESTIGIAL_FILES {
        if dest.join(repo).join(file).is_file() {
            git.rm(dest, &vestigial_path(repo, file))?;
            removed = true;
        }
    }
    if removed {
        git.commit(dest, VESTIGIAL_COMMIT_MESSAGE)?;
    }
    Ok(removed)
}

/// Phase 2c: copy template files into the branch root and commit them
pub fn apply_template(
    plan: &MergePlan,
    branch: &BranchDescriptor,
    dest: &Path,
    git: &Git<'_>,
    progress: &dyn Progress,
) -> Result<()> {
    progress.on_phase(&format!(
        "Moving README.md, .travis.yml, and .gitignore for branch '{}'",
        branch.name
    ));

    for name in COMMON_TEMPLATE_FILES {
        copy_file(&plan.template_dir.join(name), dest)?;
    }

    let distro_dir = plan.template_dir.join(&branch.distro);
    if distro_dir.is_dir() {
        for path in sorted_entries(&distro_dir)? {
            if !path.is_file() {
                warn!(path = %path.display(), "skipping non-file template entry");
                progress.on_warning(&format!("skipping non-file '{}'", path.display()));
                continue;
            }
            copy_file(&path, dest)?;
        }
    }

    git.add_all(dest)?;
    git.commit(dest, TEMPLATE_COMMIT_MESSAGE)?;
    git.delete_tag(dest, &sentinel_tag(&branch.name))?;
    Ok(())
}

/// Directory entries sorted by path, so copies happen in a stable order
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort();
    Ok(entries)
}
