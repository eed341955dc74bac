use std::path::{Path, PathBuf};

use crate::foundation::error::{FrameseqError, FrameseqResult};

/// Collaborator that receives a freshly exported image and produces something presentable.
///
/// The handle type is opaque to the exporter; it is returned to the caller unchanged.
pub trait DisplayImage {
    type Handle;

    fn display_image(&self, path: &Path) -> FrameseqResult<Self::Handle>;
}

impl<F, H> DisplayImage for F
where
    F: Fn(&Path) -> FrameseqResult<H>,
{
    type Handle = H;

    fn display_image(&self, path: &Path) -> FrameseqResult<H> {
        self(path)
    }
}

/// Metadata read back from an exported image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayedImage {
    pub path: PathBuf,
    pub format: Option<image::ImageFormat>,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

/// Default collaborator: sniffs the file format and reads its dimensions.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageSummary;

impl DisplayImage for ImageSummary {
    type Handle = DisplayedImage;

    fn display_image(&self, path: &Path) -> FrameseqResult<DisplayedImage> {
        let bytes = std::fs::metadata(path)
            .map_err(|e| FrameseqError::display(format!("stat '{}': {e}", path.display())))?
            .len();

        let reader = image::ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| FrameseqError::display(format!("open '{}': {e}", path.display())))?;
        let format = reader.format();
        let (width, height) = reader.into_dimensions().map_err(|e| {
            FrameseqError::display(format!("read dimensions of '{}': {e}", path.display()))
        })?;

        Ok(DisplayedImage {
            path: path.to_path_buf(),
            format,
            width,
            height,
            bytes,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/display.rs"]
mod tests;
