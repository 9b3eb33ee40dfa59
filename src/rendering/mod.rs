//! Rendering pipeline: layout -> display list -> raster -> PNG

pub mod layout;
pub mod paint;
pub mod raster;

use log::debug;
use sha2::{Digest, Sha256};

use crate::config::LogoConfig;
use crate::font::GlyphSource;
use crate::{Error, Result};

use layout::LogoLayout;

/// An encoded logo held in memory.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl LogoImage {
    /// Hex SHA-256 of the PNG bytes. Identical configs give identical digests.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}

/// Draw the logo described by `config` and encode it as PNG.
pub fn render_logo(config: &LogoConfig, glyphs: &dyn GlyphSource) -> Result<LogoImage> {
    config.validate()?;
    let layout = LogoLayout::compute(config);
    let commands = paint::build_display_list(config, &layout, glyphs)?;
    let pixmap = raster::rasterize(&commands, layout.canvas_size, glyphs, config.anti_alias)?;
    let png_data = pixmap
        .encode_png()
        .map_err(|e| Error::EncodeError(e.to_string()))?;
    debug!(
        "rendered {}x{} logo, {} bytes of PNG",
        pixmap.width(),
        pixmap.height(),
        png_data.len()
    );
    Ok(LogoImage {
        width: pixmap.width(),
        height: pixmap.height(),
        png_data,
    })
}
