//! Shield Logo Generator
//!
//! Procedurally draws the "3:11 SECURITY" logo (a two-tone shield holding a
//! padlock, with a title and subtitle underneath) and writes it as a PNG.
//!
//! # Pipeline
//!
//! - **Config**: [`LogoConfig`] holds every color, string and fractional
//!   coordinate; the default reproduces the reference 1024px logo
//! - **Layout**: pure geometry in pixels ([`rendering::layout`])
//! - **Paint**: an ordered display list ([`rendering::paint`])
//! - **Raster**: tiny-skia canvas and PNG encoding ([`rendering::raster`])
//! - **Output**: parent directory creation and overwrite ([`output`])
//!
//! # Example
//!
//! ```no_run
//! use shieldlogo::LogoConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LogoConfig::default().with_output("target/logo.png");
//! let logo = shieldlogo::generate(&config)?;
//! println!("wrote {} ({} bytes)", logo.path.display(), logo.image.png_data.len());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use log::debug;

pub mod config;
pub mod error;
pub mod font;
pub mod output;
pub mod rendering;

pub use config::{LogoConfig, Rgba8};
pub use error::{Error, Result};
pub use font::{resolve_font, BitmapFont, GlyphSource, OutlineFont};
pub use rendering::{render_logo, LogoImage};

/// A logo that has been rendered and written to disk.
#[derive(Debug, Clone)]
pub struct GeneratedLogo {
    pub path: PathBuf,
    /// Font actually used for the text lines
    pub font: String,
    pub image: LogoImage,
}

/// Resolve a font, render the logo and write it to `config.output`.
///
/// Font problems never fail the run: the built-in bitmap font is used when no
/// candidate loads. Configuration, encoding and filesystem errors are returned.
pub fn generate(config: &LogoConfig) -> Result<GeneratedLogo> {
    config.validate()?;
    let glyphs = resolve_font(&config.fonts);
    debug!("text font: {}", glyphs.name());
    let image = render_logo(config, glyphs.as_ref())?;
    output::write_png(&config.output, &image)?;
    Ok(GeneratedLogo {
        path: config.output.clone(),
        font: glyphs.name(),
        image,
    })
}
