//! Visual parameters for the logo
//!
//! Every length in this module is a fraction of `canvas_size`, so the whole
//! drawing scales with the canvas. `LogoConfig::default()` reproduces the
//! reference 1024px logo exactly: the fractions that replace the old absolute
//! pixel offsets are all multiples of 1/1024.
//!
//! Configs can be loaded from JSON. Missing fields fall back to the defaults,
//! so a file only needs to name what it overrides:
//!
//! ```
//! let cfg = shieldlogo::LogoConfig::from_json_str(r#"{ "canvas_size": 512 }"#).unwrap();
//! assert_eq!(cfg.canvas_size, 512);
//! assert_eq!(cfg.title.text, "3:11");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest canvas accepted by `LogoConfig::validate`.
pub const MAX_CANVAS_SIZE: u32 = 8192;

/// Default location of the generated file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "assets/images/logo.png";

/// An opaque-or-not RGBA color, serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8([255, 255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba8([r, g, b, 255])
    }

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }

    pub fn a(self) -> u8 {
        self.0[3]
    }
}

/// Shield background: two stacked polygons producing a two-tone border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldStyle {
    pub outer: Vec<[f32; 2]>,
    pub inner: Vec<[f32; 2]>,
    pub outer_color: Rgba8,
    pub inner_color: Rgba8,
}

impl Default for ShieldStyle {
    fn default() -> Self {
        Self {
            outer: vec![[0.2, 0.15], [0.8, 0.15], [0.87, 0.45], [0.5, 0.9], [0.13, 0.45]],
            inner: vec![[0.27, 0.22], [0.73, 0.22], [0.78, 0.46], [0.5, 0.83], [0.22, 0.46]],
            outer_color: Rgba8::rgb(10, 94, 181),
            inner_color: Rgba8::rgb(20, 132, 233),
        }
    }
}

/// Curved top of the padlock.
///
/// The box offsets are measured from the top edge of the (unshifted) lock box.
/// Angles follow raster conventions: degrees clockwise from 3 o'clock with y
/// pointing down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShackleStyle {
    /// Half width of the shackle as a ratio of the lock width (not of the canvas).
    pub half_width_ratio: f32,
    pub box_top_offset: f32,
    pub box_bottom_offset: f32,
    /// Top of the filled bar closing the shackle, relative to the lock top.
    pub bar_top_offset: f32,
    pub stroke_width: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl Default for ShackleStyle {
    fn default() -> Self {
        Self {
            half_width_ratio: 1.0 / 3.0,
            box_top_offset: -0.078125,
            box_bottom_offset: 0.0390625,
            bar_top_offset: -0.009765625,
            stroke_width: 0.05859375,
            start_angle: 0.0,
            end_angle: 180.0,
        }
    }
}

/// Ellipse head over a rectangular stem, painted on the lock body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyholeStyle {
    /// Vertical offset of the keyhole anchor below the lock center.
    pub offset: f32,
    pub head_width: f32,
    pub head_height: f32,
    pub stem_width: f32,
    pub stem_height: f32,
    pub color: Rgba8,
}

impl Default for KeyholeStyle {
    fn default() -> Self {
        Self {
            offset: 0.05859375,
            head_width: 0.05859375,
            head_height: 0.05859375,
            stem_width: 0.029296875,
            stem_height: 0.078125,
            color: Rgba8::rgb(10, 94, 181),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockStyle {
    pub center: [f32; 2],
    pub width: f32,
    pub height: f32,
    /// Downward shift of the body relative to the lock box.
    pub body_offset: f32,
    pub corner_radius: f32,
    pub color: Rgba8,
    pub shackle: ShackleStyle,
    pub keyhole: KeyholeStyle,
}

impl Default for LockStyle {
    fn default() -> Self {
        Self {
            center: [0.5, 0.48],
            width: 0.3,
            height: 0.28,
            body_offset: 0.05859375,
            corner_radius: 0.05859375,
            color: Rgba8::WHITE,
            shackle: ShackleStyle::default(),
            keyhole: KeyholeStyle::default(),
        }
    }
}

/// One horizontally centered line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLine {
    pub text: String,
    /// Font size (em height) as a fraction of the canvas.
    pub size: f32,
    /// Top of the ascender line as a fraction of the canvas.
    pub top: f32,
    pub color: Rgba8,
}

impl Default for TextLine {
    fn default() -> Self {
        Self {
            text: String::new(),
            size: 0.1,
            top: 0.0,
            color: Rgba8::WHITE,
        }
    }
}

/// Complete description of the logo and where it is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    /// Side of the square canvas in pixels
    pub canvas_size: u32,
    pub shield: ShieldStyle,
    pub lock: LockStyle,
    pub title: TextLine,
    pub subtitle: TextLine,
    /// Font files to try, in order. The built-in bitmap font is used if none load.
    pub fonts: Vec<PathBuf>,
    pub output: PathBuf,
    pub anti_alias: bool,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            canvas_size: 1024,
            shield: ShieldStyle::default(),
            lock: LockStyle::default(),
            title: TextLine {
                text: "3:11".to_string(),
                size: 0.146484375,
                top: 0.82,
                color: Rgba8::WHITE,
            },
            subtitle: TextLine {
                text: "SECURITY".to_string(),
                size: 0.1171875,
                top: 0.92,
                color: Rgba8::WHITE,
            },
            fonts: default_font_candidates(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            anti_alias: true,
        }
    }
}

/// Bold display fonts to try, most preferred first. The bundled asset
/// comes before OS fonts so output stays reproducible where it is present.
pub fn default_font_candidates() -> Vec<PathBuf> {
    [
        "assets/fonts/logo-bold.ttf",
        "C:/Windows/Fonts/arialbd.ttf",
        "C:/Windows/Fonts/arial.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl LogoConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: LogoConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw).map_err(|e| match e {
            Error::ConfigError(msg) => Error::ConfigError(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_canvas_size(mut self, size: u32) -> Self {
        self.canvas_size = size;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_fonts(mut self, fonts: Vec<PathBuf>) -> Self {
        self.fonts = fonts;
        self
    }

    /// Canvas size as a float, the unit every fraction is multiplied by.
    pub fn scale(&self) -> f32 {
        self.canvas_size as f32
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_size == 0 || self.canvas_size > MAX_CANVAS_SIZE {
            return Err(Error::ConfigError(format!(
                "canvas_size must be in 1..={}, got {}",
                MAX_CANVAS_SIZE, self.canvas_size
            )));
        }
        for (name, poly) in [("shield.outer", &self.shield.outer), ("shield.inner", &self.shield.inner)] {
            if poly.len() < 3 {
                return Err(Error::ConfigError(format!(
                    "{} needs at least 3 points, got {}",
                    name,
                    poly.len()
                )));
            }
            if poly.iter().flatten().any(|v| !v.is_finite()) {
                return Err(Error::ConfigError(format!("{} has a non-finite coordinate", name)));
            }
        }

        let lock = &self.lock;
        let sh = &lock.shackle;
        let kh = &lock.keyhole;
        let fractions = [
            ("lock.center.x", lock.center[0]),
            ("lock.center.y", lock.center[1]),
            ("lock.width", lock.width),
            ("lock.height", lock.height),
            ("lock.body_offset", lock.body_offset),
            ("lock.corner_radius", lock.corner_radius),
            ("lock.shackle.half_width_ratio", sh.half_width_ratio),
            ("lock.shackle.box_top_offset", sh.box_top_offset),
            ("lock.shackle.box_bottom_offset", sh.box_bottom_offset),
            ("lock.shackle.bar_top_offset", sh.bar_top_offset),
            ("lock.shackle.stroke_width", sh.stroke_width),
            ("lock.shackle.start_angle", sh.start_angle),
            ("lock.shackle.end_angle", sh.end_angle),
            ("lock.keyhole.offset", kh.offset),
            ("lock.keyhole.head_width", kh.head_width),
            ("lock.keyhole.head_height", kh.head_height),
            ("lock.keyhole.stem_width", kh.stem_width),
            ("lock.keyhole.stem_height", kh.stem_height),
            ("title.top", self.title.top),
            ("subtitle.top", self.subtitle.top),
        ];
        if let Some((name, _)) = fractions.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::ConfigError(format!("{} must be finite", name)));
        }
        if lock.width < 0.0 || lock.height < 0.0 || lock.corner_radius < 0.0 || sh.stroke_width < 0.0 {
            return Err(Error::ConfigError("lock dimensions must not be negative".into()));
        }
        for (name, line) in [("title", &self.title), ("subtitle", &self.subtitle)] {
            if !(line.size.is_finite() && line.size > 0.0) {
                return Err(Error::ConfigError(format!("{}.size must be positive", name)));
            }
        }
        Ok(())
    }
}
