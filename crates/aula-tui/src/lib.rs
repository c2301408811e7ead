#![forbid(unsafe_code)]

//! Terminal substrate for the aula dashboard.
//!
//! This crate provides the pieces every interactive screen is built on:
//!
//! - [`event`]: canonical input events (keys, mouse, resize, paste, tick)
//!   with a crossterm conversion layer.
//! - [`geometry`]: rectangles for layout and hit testing.
//! - [`style`] / [`text`]: colors, attributes, and styled spans.
//! - [`buffer`]: the cell grid widgets paint into, plus the [`Frame`]
//!   handed to render code.
//! - [`backend`]: raw-mode terminal setup, deadline-aware event polling,
//!   and dirty-row presentation.
//! - [`program`]: the message-passing loop. A [`Model`] consumes events,
//!   returns [`Cmd`]s, and repaints after every update. There is no
//!   implicit re-render machinery; state flows one way.
//!
//! Widgets are plain structs: they hold their own state, expose
//! `handle_event(&Event) -> Option<Action>` for their owner to interpret,
//! and paint themselves through [`Widget::render`].
//!
//! Tracing instrumentation is gated behind the `tracing` feature; call
//! sites use `#[cfg(feature = "tracing")]` directly.

pub mod backend;
pub mod buffer;
pub mod event;
pub mod geometry;
pub mod program;
pub mod style;
pub mod text;

pub use buffer::{Buffer, Cell, Frame};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind, PasteEvent};
pub use geometry::Rect;
pub use program::{Cmd, Model};
pub use style::{Attrs, Color, Style};
pub use text::{Line, Span};

/// Something that can paint itself into a frame region.
pub trait Widget {
    /// Render the widget into the given area of the frame.
    ///
    /// Implementations must not paint outside `area`.
    fn render(&self, area: Rect, frame: &mut Frame);
}
