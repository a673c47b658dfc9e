//! Template file helpers

use crate::error::{Error, Result};
use anstream::println;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Copy `src` onto `dst`, overwriting
///
/// `dst` may be a directory, in which case the file keeps its name.
/// Permissions are copied along with content. Returns the path written.
pub fn copy_file(src: &Path, dst: &Path) -> Result<PathBuf> {
    println!("++ Copying '{}'", src.display());

    let target = if dst.is_dir() {
        let name = src
            .file_name()
            .ok_or_else(|| Error::Template(format!("'{}' has no file name", src.display())))?;
        dst.join(name)
    } else {
        dst.to_path_buf()
    };

    fs::copy(src, &target).map_err(|e| Error::io(src, e))?;
    debug!(src = %src.display(), dst = %target.display(), "copied");
    Ok(target)
}

/// Render `src` into `dst` with literal substitutions applied in order
///
/// Each replacement runs on the output of the previous one, so an earlier
/// substitution can produce text a later one matches.
pub fn template_file(src: &Path, dst: &Path, subs: &[(&str, &str)]) -> Result<()> {
    println!("++ Templating '{}'", src.display());

    let mut data = fs::read_to_string(src).map_err(|e| Error::io(src, e))?;
    for (from, to) in subs {
        data = data.replace(from, to);
    }

    fs::write(dst, data).map_err(|e| Error::io(dst, e))?;
    Ok(())
}
