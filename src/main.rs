use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{warn, LevelFilter};
use shieldlogo::LogoConfig;

/// Draw the 3:11 SECURITY logo and write it as a PNG.
///
/// With no options, writes a 1024x1024 image to assets/images/logo.png.
#[derive(Parser, Debug)]
#[command(name = "shieldlogo", version, about)]
struct Cli {
    /// Output PNG path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding any subset of the visual parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas size in pixels
    #[arg(short, long)]
    size: Option<u32>,

    /// Font file to try before the default candidates (repeatable)
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Only try fonts given with --font, then the built-in font
    #[arg(long)]
    no_system_fonts: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn effective_config(&self) -> anyhow::Result<LogoConfig> {
        let mut config = match &self.config {
            Some(path) => LogoConfig::load(path)?,
            None => LogoConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(size) = self.size {
            config.canvas_size = size;
        }
        let mut fonts = self.fonts.clone();
        if !self.no_system_fonts {
            fonts.extend(config.fonts.iter().cloned());
        }
        config.fonts = fonts;
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialize logger")?;

    let config = cli.effective_config()?;

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    // Unreadable files are reported while resolving; only missing ones here.
    for font in cli.fonts.iter().filter(|f| !f.exists()) {
        warn!("requested font {} does not exist", font.display());
    }

    shieldlogo::generate(&config)
        .with_context(|| format!("failed to generate {}", config.output.display()))?;
    Ok(())
}
