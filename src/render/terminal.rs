//! Terminal backend: rasterises the display list and styles the readout

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Block, Paragraph,
    },
    Frame,
};

use super::{
    document::Document,
    renderer::Renderer,
    surface::{ArcSegment, DisplayList, LineCap, Stroke, Surface},
};
use crate::{config::PresentationMode, present::{RingColor, StatusClass}, state::StateStore};

/// Background painted in opaque mode
pub const BACKGROUND: (u8, u8, u8) = (0x12, 0x12, 0x12);

/// Sampling step in braille dots
const STEP: f64 = 0.5;

/// Terminal view state: the recorded ring and the readout document
#[derive(Debug, Clone)]
pub struct TerminalView {
    pub canvas: DisplayList,
    pub document: Document,
    mode: PresentationMode,
}

impl TerminalView {
    pub fn new(mode: PresentationMode) -> Self {
        Self {
            canvas: DisplayList::default(),
            document: Document::default(),
            mode,
        }
    }

    fn background(&self) -> (u8, u8, u8) {
        match self.mode {
            PresentationMode::Opaque => BACKGROUND,
            // Assume a dark backdrop when blending
            PresentationMode::Transparent => (0, 0, 0),
        }
    }

    /// Paint the current store contents into the frame
    pub fn draw(&mut self, frame: &mut Frame, renderer: &Renderer, store: &StateStore, footer: Vec<Line<'_>>) {
        let area = frame.area();
        let footer_height = footer.len().min(u16::MAX as usize) as u16;
        let [ring_area, footer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(footer_height)]).areas(area);

        // Braille cells hold 2x4 dots, which are roughly square
        self.canvas.resize(f64::from(ring_area.width) * 2.0, f64::from(ring_area.height) * 4.0);
        renderer.render(store, &mut self.canvas, &mut self.document);

        if self.mode == PresentationMode::Opaque {
            let (r, g, b) = BACKGROUND;
            frame.render_widget(Block::default().style(Style::default().bg(Color::Rgb(r, g, b))), area);
        }

        let (width, height) = self.canvas.size();
        let shape = RingShape { list: &self.canvas, background: self.background() };
        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| ctx.draw(&shape));
        if self.mode == PresentationMode::Opaque {
            let (r, g, b) = BACKGROUND;
            canvas = canvas.background_color(Color::Rgb(r, g, b));
        }
        frame.render_widget(canvas, ring_area);

        let readout = readout_lines(&self.document);
        let readout_area = centered_rows(ring_area, readout.len() as u16);
        frame.render_widget(Paragraph::new(readout).alignment(Alignment::Center), readout_area);

        frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), footer_area);
    }
}

/// Text colour for each status class
fn class_color(class: Option<StatusClass>) -> Color {
    let ring = match class {
        Some(StatusClass::Running) => RingColor::Green,
        Some(StatusClass::Warning) => RingColor::Orange,
        Some(StatusClass::Finished) => RingColor::Red,
        Some(StatusClass::Paused) | None => RingColor::White,
    };
    let (r, g, b) = ring.rgb();
    Color::Rgb(r, g, b)
}

fn readout_lines(doc: &Document) -> Vec<Line<'static>> {
    let mut time_style = Style::default()
        .fg(class_color(doc.status_class()))
        .add_modifier(Modifier::BOLD);
    if doc.is_flashing() {
        time_style = time_style.add_modifier(Modifier::SLOW_BLINK);
    }

    vec![
        Line::from(Span::styled(doc.time.text.clone(), time_style)),
        Line::from(Span::styled(doc.status.text.clone(), Style::default().fg(Color::Gray))),
    ]
}

fn centered_rows(area: Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    Rect {
        x: area.x,
        y: area.y + (area.height - rows) / 2,
        width: area.width,
        height: rows,
    }
}

/// Rasterises recorded arcs onto the braille grid
struct RingShape<'a> {
    list: &'a DisplayList,
    background: (u8, u8, u8),
}

impl Shape for RingShape<'_> {
    fn draw(&self, painter: &mut Painter) {
        let (_, height) = self.list.size();
        for (arc, stroke) in self.list.arcs() {
            let (r, g, b) = stroke.color.over(self.background);
            let color = Color::Rgb(r, g, b);
            // Surface y grows downward, canvas y grows upward
            let mut plot = |x: f64, y: f64| {
                if let Some((px, py)) = painter.get_point(x, height - y) {
                    painter.paint(px, py, color);
                }
            };
            stroke_band(arc, stroke, &mut plot);
        }
    }
}

fn stroke_band(arc: &ArcSegment, stroke: &Stroke, plot: &mut impl FnMut(f64, f64)) {
    let half = stroke.width / 2.0;

    let mut r = (arc.radius - half).max(0.0);
    while r <= arc.radius + half {
        let samples = ((r * arc.sweep.abs()) / STEP).ceil().max(1.0) as usize;
        for i in 0..=samples {
            let angle = arc.start + arc.sweep * (i as f64 / samples as f64);
            plot(arc.cx + r * angle.cos(), arc.cy + r * angle.sin());
        }
        r += STEP;
    }

    if stroke.cap == LineCap::Round && !arc.is_full_circle() {
        for angle in [arc.start, arc.end()] {
            let (ex, ey) = arc.point_at(angle);
            let mut dy = -half;
            while dy <= half {
                let mut dx = -half;
                while dx <= half {
                    if dx * dx + dy * dy <= half * half {
                        plot(ex + dx, ey + dy);
                    }
                    dx += STEP;
                }
                dy += STEP;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use std::f64::consts::{FRAC_PI_2, PI};
    use crate::{
        render::{renderer::RingStyle, surface::Rgba},
        state::{TimerState, TimerStatus},
    };

    fn snapshot(status: TimerStatus, display: &str, remaining: u64, progress: f64) -> TimerState {
        TimerState {
            status,
            remaining_seconds: remaining,
            initial_seconds: 300,
            display: display.to_string(),
            progress,
        }
    }

    fn render(view: &mut TerminalView, store: &StateStore) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let renderer = Renderer::new(RingStyle::default(), 60);
        terminal
            .draw(|f| view.draw(f, &renderer, store, vec![Line::from("footer")]))
            .unwrap();
        terminal
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[tokio::test]
    async fn test_readout_shows_peer_text() {
        let store = StateStore::new();
        store.replace(snapshot(TimerStatus::Running, "02:30", 150, 50.0));
        let mut view = TerminalView::new(PresentationMode::Opaque);

        let terminal = render(&mut view, &store);
        let text = screen_text(&terminal);
        assert!(text.contains("02:30"));
        assert!(text.contains("Running"));
        assert!(text.contains("footer"));
        assert_eq!(view.document.status_class(), Some(StatusClass::Running));
        assert_eq!(view.canvas.size(), (80.0, 76.0));
    }

    #[tokio::test]
    async fn test_finished_text_blinks() {
        let store = StateStore::new();
        store.replace(snapshot(TimerStatus::Finished, "00:00", 0, 100.0));
        let mut view = TerminalView::new(PresentationMode::Transparent);

        let terminal = render(&mut view, &store);
        let buffer = terminal.backend().buffer();
        assert!(buffer.content().iter().any(|c| c.modifier.contains(Modifier::SLOW_BLINK)));
        assert!(screen_text(&terminal).contains("Time's up!"));
    }

    #[test]
    fn test_band_covers_stroke_width() {
        let arc = ArcSegment { cx: 0.0, cy: 0.0, radius: 10.0, start: -FRAC_PI_2, sweep: PI };
        let stroke = Stroke { color: Rgba::rgb(255, 0, 0), width: 4.0, cap: LineCap::Butt };
        let mut points = Vec::new();
        stroke_band(&arc, &stroke, &mut |x, y| points.push((x, y)));

        let radii: Vec<f64> = points.iter().map(|(x, y)| (x * x + y * y).sqrt()).collect();
        assert!(radii.iter().all(|r| *r >= 8.0 - 1e-9 && *r <= 12.0 + 1e-9));
        // Clockwise half turn from 12 o'clock stays on the right (x >= 0)
        assert!(points.iter().all(|(x, _)| *x >= -1e-9));
    }

    #[test]
    fn test_round_caps_extend_past_arc_ends() {
        let arc = ArcSegment { cx: 0.0, cy: 0.0, radius: 10.0, start: -FRAC_PI_2, sweep: FRAC_PI_2 };
        let butt = Stroke { color: Rgba::rgb(255, 0, 0), width: 4.0, cap: LineCap::Butt };
        let round = Stroke { cap: LineCap::Round, ..butt };

        let mut butt_points = Vec::new();
        stroke_band(&arc, &butt, &mut |x, y| butt_points.push((x, y)));
        let mut round_points = Vec::new();
        stroke_band(&arc, &round, &mut |x, y| round_points.push((x, y)));

        assert!(butt_points.iter().all(|(x, _)| *x >= -1e-9));
        assert!(round_points.iter().any(|(x, _)| *x < -1.0));
    }

    #[test]
    fn test_centered_rows() {
        let area = Rect { x: 0, y: 0, width: 10, height: 9 };
        assert_eq!(centered_rows(area, 2), Rect { x: 0, y: 3, width: 10, height: 2 });
        assert_eq!(centered_rows(area, 20).height, 9);
    }
}
