use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::FrameseqResult;

/// Make `path` an empty directory.
///
/// An existing directory at `path` is removed with all of its contents first. Missing
/// parents are created. A non-directory already at `path` is left alone and the call fails.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn init_folder(path: impl AsRef<Path>) -> FrameseqResult<()> {
    let path = path.as_ref();

    if path.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove existing folder '{}'", path.display()))?;
        tracing::debug!("removed existing folder");
    }

    std::fs::create_dir_all(path)
        .with_context(|| format!("create folder '{}'", path.display()))?;

    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/folder.rs"]
mod tests;
