//! 2D drawing surface abstraction

use std::f64::consts::TAU;

/// Colour with straight alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Composite over an opaque background
    pub fn over(self, bg: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f64 * a + bg as f64 * (1.0 - a)).round() as u8;
        (mix(self.r, bg.0), mix(self.g, bg.1), mix(self.b, bg.2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    pub cap: LineCap,
}

/// Circular arc in surface coordinates (y grows downward).
///
/// Angles are radians measured clockwise from the positive x axis, so
/// `-PI / 2` is 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub start: f64,
    pub sweep: f64,
}

impl ArcSegment {
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self { cx, cy, radius, start: 0.0, sweep: TAU }
    }

    pub fn is_full_circle(&self) -> bool {
        self.sweep.abs() >= TAU
    }

    /// Point on the arc at the given angle
    pub fn point_at(&self, angle: f64) -> (f64, f64) {
        (self.cx + self.radius * angle.cos(), self.cy + self.radius * angle.sin())
    }

    pub fn end(&self) -> f64 {
        self.start + self.sweep
    }
}

/// Minimal canvas-style drawing target
pub trait Surface {
    /// Width and height in surface units
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn stroke_arc(&mut self, arc: ArcSegment, stroke: Stroke);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    StrokeArc { arc: ArcSegment, stroke: Stroke },
}

/// Surface that records draw operations for a backend to rasterise
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Arcs drawn since the last clear
    pub fn arcs(&self) -> impl Iterator<Item = (&ArcSegment, &Stroke)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokeArc { arc, stroke } => Some((arc, stroke)),
            DrawOp::Clear => None,
        })
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_arc(&mut self, arc: ArcSegment, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeArc { arc, stroke });
    }
}
