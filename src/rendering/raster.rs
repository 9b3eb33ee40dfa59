/// Executes a display list on an RGBA canvas using tiny-skia.

use tiny_skia::{FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::config::Rgba8;
use crate::font::GlyphSource;
use crate::rendering::layout::{ArcGeometry, Point, Rect};
use crate::rendering::paint::PaintCommand;
use crate::{Error, Result};

/// Bezier circle constant: control distance for a quarter arc of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Draw `commands` in order onto a fresh, fully transparent square canvas.
pub fn rasterize(commands: &[PaintCommand], size: u32, glyphs: &dyn GlyphSource, anti_alias: bool) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(size, size)
        .ok_or_else(|| Error::RenderError(format!("cannot allocate a {}x{} canvas", size, size)))?;

    for cmd in commands {
        let paint = paint_for(cmd.color(), anti_alias);
        match cmd {
            PaintCommand::Polygon { points, .. } => {
                if let Some(path) = polygon_path(points) {
                    fill(&mut pixmap, &path, &paint);
                }
            }
            PaintCommand::SolidRect { rect, .. } => {
                if let Some(r) = to_sk_rect(rect) {
                    pixmap.fill_rect(r, &paint, Transform::identity(), None);
                }
            }
            PaintCommand::RoundedRect { rect, radius, .. } => {
                if let Some(path) = rounded_rect_path(rect, *radius) {
                    fill(&mut pixmap, &path, &paint);
                }
            }
            PaintCommand::Ellipse { bounds, .. } => {
                if let Some(path) = to_sk_rect(bounds).and_then(PathBuilder::from_oval) {
                    fill(&mut pixmap, &path, &paint);
                }
            }
            PaintCommand::Arc { arc, .. } => {
                if let Some(path) = arc_path(arc) {
                    let stroke = Stroke {
                        width: arc.stroke_width,
                        line_cap: LineCap::Butt,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                }
            }
            PaintCommand::Text { origin, size, text, .. } => {
                if let Some(path) = glyphs.text_path(text, *size, *origin)? {
                    fill(&mut pixmap, &path, &paint);
                }
            }
        }
    }

    Ok(pixmap)
}

fn paint_for(color: Rgba8, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
    paint.anti_alias = anti_alias;
    paint
}

fn fill(pixmap: &mut Pixmap, path: &Path, paint: &Paint) {
    pixmap.fill_path(path, paint, FillRule::Winding, Transform::identity(), None);
}

fn to_sk_rect(rect: &Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom)
}

pub fn polygon_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

/// Rectangle with quarter-ellipse corners; the radius is clamped to half the
/// shorter side.
pub fn rounded_rect_path(rect: &Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    if r == 0.0 {
        return to_sk_rect(rect).map(PathBuilder::from_rect);
    }
    let (l, t, rt, b) = (rect.left, rect.top, rect.right, rect.bottom);
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}

/// Centerline of a stroked elliptical arc.
///
/// The ellipse is inset by half the stroke width so the stroke stays inside
/// `arc.bounds`. Angles are degrees clockwise from 3 o'clock (y down). The
/// arc is split into cubic segments of at most 90 degrees.
pub fn arc_path(arc: &ArcGeometry) -> Option<Path> {
    let c = arc.bounds.center();
    let inset = arc.stroke_width / 2.0;
    let rx = (arc.bounds.width() / 2.0 - inset).max(0.5);
    let ry = (arc.bounds.height() / 2.0 - inset).max(0.5);

    let mut start = arc.start_angle;
    let mut end = arc.end_angle;
    if end < start {
        end += 360.0 * ((start - end) / 360.0).ceil();
    }
    if end - start > 360.0 {
        end = start + 360.0;
    }
    if end == start {
        return None;
    }

    let segments = ((end - start) / 90.0).ceil().max(1.0) as usize;
    let step = (end - start) / segments as f32;
    let point = |deg: f32| {
        let a = deg.to_radians();
        (c.x + rx * a.cos(), c.y + ry * a.sin())
    };
    let tangent = |deg: f32| {
        let a = deg.to_radians();
        (-rx * a.sin(), ry * a.cos())
    };

    let mut pb = PathBuilder::new();
    let (x0, y0) = point(start);
    pb.move_to(x0, y0);
    for _ in 0..segments {
        let a0 = start;
        let a1 = start + step;
        let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan();
        let (p0x, p0y) = point(a0);
        let (p1x, p1y) = point(a1);
        let (d0x, d0y) = tangent(a0);
        let (d1x, d1y) = tangent(a1);
        pb.cubic_to(p0x + k * d0x, p0y + k * d0y, p1x - k * d1x, p1y - k * d1y, p1x, p1y);
        start = a1;
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BitmapFont;

    fn opaque(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = pixmap.pixel(x, y).expect("pixel in bounds");
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    #[test]
    fn empty_list_is_transparent() {
        let pixmap = rasterize(&[], 32, &BitmapFont::new(), true).unwrap();
        assert_eq!(pixmap.width(), 32);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn later_commands_paint_over_earlier_ones() {
        let red = Rgba8::rgb(255, 0, 0);
        let blue = Rgba8::rgb(0, 0, 255);
        let cmds = vec![
            PaintCommand::SolidRect {
                rect: Rect::from_ltrb(0.0, 0.0, 64.0, 64.0),
                color: red,
            },
            PaintCommand::Ellipse {
                bounds: Rect::from_ltrb(16.0, 16.0, 48.0, 48.0),
                color: blue,
            },
        ];
        let pixmap = rasterize(&cmds, 64, &BitmapFont::new(), true).unwrap();
        assert_eq!(opaque(&pixmap, 2, 2), (255, 0, 0, 255));
        assert_eq!(opaque(&pixmap, 32, 32), (0, 0, 255, 255));
    }

    #[test]
    fn rounded_corners_are_cut() {
        let rect = Rect::from_ltrb(0.0, 0.0, 100.0, 100.0);
        let cmds = vec![PaintCommand::RoundedRect {
            rect,
            radius: 30.0,
            color: Rgba8::WHITE,
        }];
        let pixmap = rasterize(&cmds, 100, &BitmapFont::new(), false).unwrap();
        assert_eq!(opaque(&pixmap, 1, 1).3, 0);
        assert_eq!(opaque(&pixmap, 50, 50), (255, 255, 255, 255));
        assert_eq!(opaque(&pixmap, 50, 1).3, 255);
    }

    #[test]
    fn radius_larger_than_rect_is_clamped() {
        let rect = Rect::from_ltrb(10.0, 10.0, 30.0, 20.0);
        let path = rounded_rect_path(&rect, 500.0).expect("path");
        let b = path.bounds();
        assert!((b.left() - 10.0).abs() < 1e-3 && (b.right() - 30.0).abs() < 1e-3);
        assert!((b.top() - 10.0).abs() < 1e-3 && (b.bottom() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn lower_half_arc_stays_inside_its_box() {
        let arc = ArcGeometry {
            bounds: Rect::from_ltrb(0.0, 0.0, 100.0, 60.0),
            start_angle: 0.0,
            end_angle: 180.0,
            stroke_width: 10.0,
        };
        let path = arc_path(&arc).expect("arc path");
        let b = path.bounds();
        // Centerline runs from 3 o'clock through 6 o'clock to 9 o'clock.
        assert!((b.left() - 5.0).abs() < 1e-3);
        assert!((b.right() - 95.0).abs() < 1e-3);
        assert!((b.top() - 30.0).abs() < 1e-3);
        assert!((b.bottom() - 55.0).abs() < 0.1);
    }

    #[test]
    fn degenerate_arc_has_no_path() {
        let arc = ArcGeometry {
            bounds: Rect::from_ltrb(0.0, 0.0, 10.0, 10.0),
            start_angle: 45.0,
            end_angle: 45.0,
            stroke_width: 2.0,
        };
        assert!(arc_path(&arc).is_none());
    }

    #[test]
    fn polygon_needs_points() {
        assert!(polygon_path(&[]).is_none());
        let tri = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)];
        assert!(polygon_path(&tri).is_some());
    }
}
