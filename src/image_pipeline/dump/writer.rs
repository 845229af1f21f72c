use std::io::Write;
use std::path::{Path, PathBuf};

use crate::image_pipeline::common::{self, error::{LidxError, Result}};
use crate::image_pipeline::dump::types::DumpConfig;
use crate::image_pipeline::features::ExtractedImage;

pub trait ImageDumpWriter {
    /// File extension (without dot) of the produced images.
    fn extension(&self) -> &'static str;

    fn write_image(&self, image: &ExtractedImage, output: &mut dyn Write) -> Result<()>;

    /// Writes `image` into `dir`, named after `source` with this writer's
    /// extension. Returns the path written.
    fn dump_into(&self, image: &ExtractedImage, source: &Path, dir: &Path, config: &DumpConfig) -> Result<PathBuf> {
        let stem = source.file_stem().ok_or_else(|| {
            LidxError::InvalidConfig(format!("{} has no file name", source.display()))
        })?;
        if config.create_dirs {
            std::fs::create_dir_all(dir)
                .map_err(|e| LidxError::OutputWriteError(format!("{}: {}", dir.display(), e)))?;
        }

        let target = dir.join(stem).with_extension(self.extension());
        let mut file = common::create_output(&target)?;
        self.write_image(image, &mut file)?;
        Ok(target)
    }
}
