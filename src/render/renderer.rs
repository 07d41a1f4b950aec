//! Frame painting and the repaint clock

use std::{
    f64::consts::{FRAC_PI_2, TAU},
    time::Duration,
};
use tokio::time::{interval, Interval, MissedTickBehavior};

use super::{
    document::Document,
    surface::{ArcSegment, LineCap, Rgba, Stroke, Surface},
};
use crate::{
    present::{map_to_visual_intent, RingColor, VisualIntent},
    state::StateStore,
};

const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
pub const TRACK_COLOR: Rgba = WHITE.with_alpha(0.12);
pub const HIGHLIGHT_COLOR: Rgba = WHITE.with_alpha(0.05);
pub const HIGHLIGHT_WIDTH: f64 = 1.0;

/// Ring geometry in surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub stroke_width: f64,
    pub padding: f64,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            stroke_width: 6.0,
            padding: 2.0,
        }
    }
}

impl RingStyle {
    /// Radius of the ring's centre line on a surface of the given size
    pub fn radius(&self, width: f64, height: f64) -> f64 {
        (width.min(height) / 2.0 - self.stroke_width / 2.0 - self.padding).max(0.0)
    }
}

fn ring_rgba(color: RingColor) -> Rgba {
    let (r, g, b) = color.rgb();
    Rgba::rgb(r, g, b)
}

/// Draws one frame from a visual intent. Holds no animation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramePainter {
    pub style: RingStyle,
}

impl FramePainter {
    pub fn new(style: RingStyle) -> Self {
        Self { style }
    }

    pub fn paint<S: Surface>(&self, intent: &VisualIntent, surface: &mut S, doc: &mut Document) {
        self.paint_ring(intent, surface);
        self.apply_document(intent, doc);
    }

    fn paint_ring<S: Surface>(&self, intent: &VisualIntent, surface: &mut S) {
        surface.clear();

        let (width, height) = surface.size();
        let (cx, cy) = (width / 2.0, height / 2.0);
        let radius = self.style.radius(width, height);
        let stroke_width = self.style.stroke_width;

        surface.stroke_arc(
            ArcSegment::circle(cx, cy, radius),
            Stroke { color: TRACK_COLOR, width: stroke_width, cap: LineCap::Butt },
        );

        if intent.ring_fraction > 0.0 {
            surface.stroke_arc(
                ArcSegment {
                    cx,
                    cy,
                    radius,
                    start: -FRAC_PI_2,
                    sweep: intent.ring_fraction * TAU,
                },
                Stroke {
                    color: ring_rgba(intent.ring_color),
                    width: stroke_width,
                    cap: LineCap::Round,
                },
            );
        }

        surface.stroke_arc(
            ArcSegment::circle(cx, cy, (radius - stroke_width / 2.0).max(0.0)),
            Stroke { color: HIGHLIGHT_COLOR, width: HIGHLIGHT_WIDTH, cap: LineCap::Butt },
        );
    }

    fn apply_document(&self, intent: &VisualIntent, doc: &mut Document) {
        doc.time.set_text(&intent.text);
        doc.status.set_text(intent.status_label);
        doc.set_status_class(intent.status_class);
        doc.set_flash(intent.flash_text);
    }
}

/// Owns the repaint cadence, independent of message arrival
#[derive(Debug)]
pub struct Renderer {
    painter: FramePainter,
    clock: Interval,
}

impl Renderer {
    /// Must be called from within a tokio runtime
    pub fn new(style: RingStyle, fps: u32) -> Self {
        // Never zero: `interval` rejects an empty period
        let period = Duration::from_micros((1_000_000 / u64::from(fps.max(1))).max(1));
        let mut clock = interval(period);
        clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            painter: FramePainter::new(style),
            clock,
        }
    }

    /// Wait for the next repaint tick
    pub async fn next_frame(&mut self) {
        self.clock.tick().await;
    }

    pub fn period(&self) -> Duration {
        self.clock.period()
    }

    /// Paint whatever the store holds right now
    pub fn render<S: Surface>(&self, store: &StateStore, surface: &mut S, doc: &mut Document) {
        let intent = map_to_visual_intent(&store.current());
        self.painter.paint(&intent, surface, doc);
    }
}
