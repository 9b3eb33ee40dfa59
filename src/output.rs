//! Writing rendered logos to disk

use std::fs;
use std::path::Path;

use log::info;

use crate::rendering::LogoImage;
use crate::{Error, Result};

/// Write `image` to `path`, creating missing parent directories and
/// replacing any existing file.
///
/// The PNG is fully encoded in memory before the file is opened.
pub fn write_png(path: &Path, image: &LogoImage) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| Error::OutputError(format!("cannot create {}: {}", parent.display(), e)))?;
    }
    fs::write(path, &image.png_data)
        .map_err(|e| Error::OutputError(format!("cannot write {}: {}", path.display(), e)))?;
    info!(
        "wrote {} ({}x{}, sha256 {})",
        path.display(),
        image.width,
        image.height,
        image.digest()
    );
    Ok(())
}
