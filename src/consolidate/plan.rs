//! Naming and text helpers for a consolidation run
//!
//! Pure functions only, so the exact refs, filters and messages the
//! orchestrator produces can be checked without touching git.

use crate::types::MergePlan;

/// Directory the relocation filter stages content in before renaming it
pub const SCRATCH_SUBDIR: &str = "__tmp";

/// Files dropped from a repository subdirectory after it is merged
///
/// The combined repository carries one top-level copy of each.
pub const VESTIGIAL_FILES: &[&str] = &[".gitignore", ".travis.yml"];

/// Files copied from the template directory into every branch
pub const COMMON_TEMPLATE_FILES: &[&str] = &["README.md", ".gitignore"];

/// Message of the empty root commit all branches grow from
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit before merging branches";

/// Message of the commit removing [`VESTIGIAL_FILES`]
pub const VESTIGIAL_COMMIT_MESSAGE: &str = "Removing vestigial files after merging";

/// Message of the commit adding template files
pub const TEMPLATE_COMMIT_MESSAGE: &str = "Moving README.md, .travis.yml, and .gitignore";

/// Remote URL shown in the push instructions
pub const EXAMPLE_REMOTE: &str = "https://github.com/example/repo.git";

/// Tag marking the pre-merge state of `branch`
pub fn sentinel_tag(branch: &str) -> String {
    format!("{branch}/initial")
}

/// Short-lived branch `repo`'s history is pulled into for `branch`
pub fn temp_branch(repo: &str, branch: &str) -> String {
    format!("temp/{repo}/{branch}")
}

/// Shell snippet for `git filter-branch --tree-filter` moving a tree under `repo/`
///
/// Everything at the top level except the staging directory moves into
/// [`SCRATCH_SUBDIR`] one entry at a time, which is then renamed to `repo`.
/// Names may contain whitespace or start with `-`. A tree whose only entry
/// is already `repo` is left alone, so rewriting a branch twice does not
/// nest `repo/repo/`. This also means a source commit whose whole tree is a
/// single directory named `repo` keeps that directory as the subdirectory
/// instead of gaining a second level. Empty trees stay empty.
pub fn relocation_filter(repo: &str) -> String {
    format!(
        "mkdir -p {tmp}; entries=\"$(ls -A | grep -v -x {tmp})\"; \
         if test -n \"$entries\" && test \"$entries\" != '{repo}'; \
         then printf '%s\\n' \"$entries\" | \
         while IFS= read -r f; do mv -- \"$f\" {tmp}/ || exit 1; done \
         && mv {tmp} '{repo}'; \
         else rmdir {tmp}; fi",
        tmp = SCRATCH_SUBDIR,
    )
}

/// Path (relative to the destination root) of a vestigial file of `repo`
pub fn vestigial_path(repo: &str, file: &str) -> String {
    format!("{repo}/{file}")
}

/// Commands the operator runs to publish the merged branches
pub fn push_instructions(plan: &MergePlan) -> Vec<String> {
    let mut lines = vec![
        format!("cd {}", plan.destination),
        format!("git remote add origin {EXAMPLE_REMOTE}"),
    ];
    for branch in &plan.branches {
        lines.push(format!("git checkout {}", branch.name));
        lines.push(format!("git push -uf origin {}", branch.name));
    }
    lines
}
