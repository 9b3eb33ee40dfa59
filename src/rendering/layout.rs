/// Pure geometry for the logo: every shape position in pixels, computed from
/// a `LogoConfig` without touching a rendering backend.

use crate::config::LogoConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box given by its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Stroked elliptical arc. The stroke lies inside `bounds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub bounds: Rect,
    pub start_angle: f32,
    pub end_angle: f32,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LockLayout {
    pub center: Point,
    pub body: Rect,
    pub corner_radius: f32,
    pub shackle: ArcGeometry,
    pub shackle_bar: Rect,
    pub keyhole_head: Rect,
    pub keyhole_stem: Rect,
}

/// Where a line of text goes before it is measured: the horizontal center
/// and the top of its ascender line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    pub center_x: f32,
    pub top: f32,
    pub size: f32,
}

impl TextAnchor {
    /// Pen origin that centers ink starting `left` px after the pen and
    /// spanning `width` px.
    pub fn origin_for_ink(&self, left: f32, width: f32) -> Point {
        Point::new(self.center_x - width / 2.0 - left, self.top)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogoLayout {
    pub canvas_size: u32,
    pub shield_outer: Vec<Point>,
    pub shield_inner: Vec<Point>,
    pub lock: LockLayout,
    pub title: TextAnchor,
    pub subtitle: TextAnchor,
}

impl LogoLayout {
    pub fn compute(config: &LogoConfig) -> Self {
        let s = config.scale();
        let polygon = |pts: &[[f32; 2]]| -> Vec<Point> {
            pts.iter().map(|[x, y]| Point::new(x * s, y * s)).collect()
        };

        Self {
            canvas_size: config.canvas_size,
            shield_outer: polygon(config.shield.outer.as_slice()),
            shield_inner: polygon(config.shield.inner.as_slice()),
            lock: lock_layout(config),
            title: TextAnchor {
                center_x: s / 2.0,
                top: config.title.top * s,
                size: config.title.size * s,
            },
            subtitle: TextAnchor {
                center_x: s / 2.0,
                top: config.subtitle.top * s,
                size: config.subtitle.size * s,
            },
        }
    }
}

fn lock_layout(config: &LogoConfig) -> LockLayout {
    let s = config.scale();
    let lock = &config.lock;
    let cx = lock.center[0] * s;
    let cy = lock.center[1] * s;
    let w = lock.width * s;
    let h = lock.height * s;
    let shift = lock.body_offset * s;
    let top = cy - h / 2.0;

    let body = Rect::from_ltrb(cx - w / 2.0, top + shift, cx + w / 2.0, cy + h / 2.0 + shift);

    let sh = &lock.shackle;
    let half = w * sh.half_width_ratio;
    let shackle = ArcGeometry {
        bounds: Rect::from_ltrb(cx - half, top + sh.box_top_offset * s, cx + half, top + sh.box_bottom_offset * s),
        start_angle: sh.start_angle,
        end_angle: sh.end_angle,
        stroke_width: sh.stroke_width * s,
    };
    let shackle_bar = Rect::from_ltrb(cx - half, top + sh.bar_top_offset * s, cx + half, top + sh.box_bottom_offset * s);

    // The keyhole anchor sits where the head meets the stem.
    let kh = &lock.keyhole;
    let hx = cx;
    let hy = cy + kh.offset * s;
    let head_half = kh.head_width * s / 2.0;
    let stem_half = kh.stem_width * s / 2.0;
    let keyhole_head = Rect::from_ltrb(hx - head_half, hy - kh.head_height * s, hx + head_half, hy);
    let keyhole_stem = Rect::from_ltrb(hx - stem_half, hy, hx + stem_half, hy + kh.stem_height * s);

    LockLayout {
        center: Point::new(cx, cy),
        body,
        corner_radius: lock.corner_radius * s,
        shackle,
        shackle_bar,
        keyhole_head,
        keyhole_stem,
    }
}

/// Even-odd point-in-polygon test.
pub fn polygon_contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
