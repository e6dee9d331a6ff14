//! Terminal rendering module.
//!
//! Renders into a simple framebuffer that is flushed to the terminal, keeping
//! `core` free of any I/O. The `GameView` mapping is pure and unit-testable.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{CellStyle, FrameBuffer, Rgb, TermCell};
pub use game_view::{GameView, HudInfo, Viewport};
pub use renderer::TerminalRenderer;
