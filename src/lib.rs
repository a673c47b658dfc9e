//! moveit-merge: fold several git repositories into one
//!
//! Each source repository's history is pulled into a shared destination
//! repository, rewritten so its files live under a subdirectory named after
//! the repository, and merged. One destination branch is built per target
//! branch, and shared template files are committed on top.

pub mod config;
pub mod consolidate;
pub mod error;
pub mod exec;
pub mod files;
pub mod git;
pub mod progress;
pub mod types;
