/// Display list for the logo: an ordered set of fill/stroke commands, later
/// commands painting over earlier ones.

use log::{debug, warn};

use crate::config::{LogoConfig, Rgba8, TextLine};
use crate::font::GlyphSource;
use crate::rendering::layout::{ArcGeometry, LogoLayout, Point, Rect, TextAnchor};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Polygon {
        points: Vec<Point>,
        color: Rgba8,
    },
    SolidRect {
        rect: Rect,
        color: Rgba8,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        color: Rgba8,
    },
    Ellipse {
        bounds: Rect,
        color: Rgba8,
    },
    Arc {
        arc: ArcGeometry,
        color: Rgba8,
    },
    Text {
        origin: Point,
        size: f32,
        text: String,
        color: Rgba8,
    },
}

impl PaintCommand {
    pub fn color(&self) -> Rgba8 {
        match self {
            PaintCommand::Polygon { color, .. }
            | PaintCommand::SolidRect { color, .. }
            | PaintCommand::RoundedRect { color, .. }
            | PaintCommand::Ellipse { color, .. }
            | PaintCommand::Arc { color, .. }
            | PaintCommand::Text { color, .. } => *color,
        }
    }
}

/// Build the logo's paint commands back to front: shield, lock, keyhole, text.
pub fn build_display_list(
    config: &LogoConfig,
    layout: &LogoLayout,
    glyphs: &dyn GlyphSource,
) -> Result<Vec<PaintCommand>> {
    let lock = &layout.lock;
    let lock_color = config.lock.color;
    let hole_color = config.lock.keyhole.color;

    let mut commands = vec![
        PaintCommand::Polygon {
            points: layout.shield_outer.clone(),
            color: config.shield.outer_color,
        },
        PaintCommand::Polygon {
            points: layout.shield_inner.clone(),
            color: config.shield.inner_color,
        },
        PaintCommand::RoundedRect {
            rect: lock.body,
            radius: lock.corner_radius,
            color: lock_color,
        },
        PaintCommand::Arc {
            arc: lock.shackle,
            color: lock_color,
        },
        PaintCommand::SolidRect {
            rect: lock.shackle_bar,
            color: lock_color,
        },
        PaintCommand::Ellipse {
            bounds: lock.keyhole_head,
            color: hole_color,
        },
        PaintCommand::SolidRect {
            rect: lock.keyhole_stem,
            color: hole_color,
        },
    ];

    let width = layout.canvas_size as f32;
    commands.extend(text_command(&config.title, &layout.title, width, glyphs)?);
    commands.extend(text_command(&config.subtitle, &layout.subtitle, width, glyphs)?);

    debug!("display list has {} commands", commands.len());
    Ok(commands)
}

/// Center a text line's ink on its anchor. Empty lines produce no command.
fn text_command(
    line: &TextLine,
    anchor: &TextAnchor,
    canvas_width: f32,
    glyphs: &dyn GlyphSource,
) -> Result<Option<PaintCommand>> {
    if line.text.is_empty() {
        return Ok(None);
    }
    let metrics = glyphs.measure(&line.text, anchor.size)?;
    if metrics.advance > canvas_width {
        warn!(
            "text {:?} is {:.0}px wide and will be clipped by the {:.0}px canvas",
            line.text, metrics.advance, canvas_width
        );
    }
    let origin = anchor.origin_for_ink(metrics.ink_left, metrics.ink_width);
    debug!(
        "text {:?}: {} at {:.1}px, ink width {:.1}, origin ({:.1}, {:.1})",
        line.text,
        glyphs.name(),
        anchor.size,
        metrics.ink_width,
        origin.x,
        origin.y
    );
    Ok(Some(PaintCommand::Text {
        origin,
        size: anchor.size,
        text: line.text.clone(),
        color: line.color,
    }))
}
