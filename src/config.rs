//! Compiled-in consolidation plan
//!
//! The MoveIt repositories and ROS distributions this tool was written for.
//! Edit these constants to consolidate a different set of repositories.

use crate::types::{BranchDescriptor, GitCompat, MergePlan, RepoDescriptor, ScratchClone};
use std::path::Path;
use std::time::Duration;

/// Repositories in merge order; `None` marks the scratch-backed repository
pub const REPOS: &[(&str, Option<&str>)] = &[
    (
        "moveit_commander",
        Some("http://github.com/ros-planning/moveit_commander.git"),
    ),
    (
        "moveit_core",
        Some("http://github.com/ros-planning/moveit_core.git"),
    ),
    (
        "moveit_ros",
        Some("http://github.com/ros-planning/moveit_ros.git"),
    ),
    (
        "moveit_planners",
        Some("http://github.com/ros-planning/moveit_planners.git"),
    ),
    (
        "moveit_ikfast",
        Some("http://github.com/ros-planning/moveit_ikfast.git"),
    ),
    (
        "moveit_plugins",
        Some("http://github.com/ros-planning/moveit_plugins.git"),
    ),
    (
        "moveit_setup_assistant",
        Some("http://github.com/ros-planning/moveit_setup_assistant.git"),
    ),
    ("moveit_experimental", None),
];

/// `(branch, distro)` pairs in processing order
pub const BRANCHES: &[(&str, &str)] = &[
    ("indigo-devel", "indigo"),
    ("jade-devel", "jade"),
    ("kinetic-devel", "kinetic"),
];

/// Repository that has to be cloned and branched before it can be merged
pub const SCRATCH_NAME: &str = "moveit_experimental";

/// Where the scratch repository is cloned from
pub const SCRATCH_URL: &str = "http://github.com/ros-planning/moveit_experimental.git";

/// Destination directory for the merged repository
pub const DESTINATION: &str = "moveit";

/// Branch a fresh `git init` is pointed at
pub const DEFAULT_BRANCH: &str = "master";

/// Set for git older than 2.9 (e.g. Ubuntu 16.04)
pub const LEGACY_GIT: bool = false;

/// Name of the template directory next to the working directory
pub const TEMPLATE_DIR: &str = "template";

/// Grace period before a leftover directory is removed
pub const REMOVAL_DELAY: Duration = Duration::from_secs(5);

/// Build the compiled-in plan rooted at `workdir`
pub fn default_plan(workdir: &Path) -> MergePlan {
    let repos = REPOS
        .iter()
        .map(|(name, addr)| match addr {
            Some(addr) => RepoDescriptor::new(*name, *addr),
            None => RepoDescriptor::scratch(*name),
        })
        .collect();

    let branches = BRANCHES
        .iter()
        .map(|(name, distro)| BranchDescriptor::new(*name, *distro))
        .collect();

    MergePlan {
        repos,
        branches,
        scratch: Some(ScratchClone {
            name: SCRATCH_NAME.to_string(),
            url: SCRATCH_URL.to_string(),
            dir: SCRATCH_NAME.to_string(),
        }),
        destination: DESTINATION.to_string(),
        default_branch: DEFAULT_BRANCH.to_string(),
        git_compat: if LEGACY_GIT {
            GitCompat::Legacy
        } else {
            GitCompat::Modern
        },
        template_dir: workdir.join(TEMPLATE_DIR),
        removal_delay: REMOVAL_DELAY,
    }
}
