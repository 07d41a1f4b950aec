//! Rendering module
//!
//! Drawing surface abstraction, the readout document model, the per-frame
//! painter with its repaint clock, and the terminal backend.

pub mod document;
pub mod renderer;
pub mod surface;
pub mod terminal;

// Re-export main types
pub use document::{ClassList, Document, Element};
pub use renderer::{FramePainter, Renderer, RingStyle};
pub use surface::{ArcSegment, DisplayList, DrawOp, LineCap, Rgba, Stroke, Surface};
pub use terminal::TerminalView;
