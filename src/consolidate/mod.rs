//! Repository consolidation
//!
//! Two-part split:
//! 1. Plan - ref names, filter text, messages and push instructions (pure)
//! 2. Execute - the bootstrap, merge, template and cleanup phases (effectful)

mod execute;
mod plan;

pub use execute::{
    ConsolidationReport, apply_template, bootstrap_destination, bootstrap_scratch, merge_branch,
    run,
};
pub use plan::{
    COMMON_TEMPLATE_FILES, EXAMPLE_REMOTE, INITIAL_COMMIT_MESSAGE, SCRATCH_SUBDIR,
    TEMPLATE_COMMIT_MESSAGE, VESTIGIAL_COMMIT_MESSAGE, VESTIGIAL_FILES, push_instructions,
    relocation_filter, sentinel_tag, temp_branch, vestigial_path,
};
