#![forbid(unsafe_code)]

//! Core: gesture events and track geometry.
//!
//! # Role in rangetrack
//! `rangetrack-core` is the input and geometry layer. It owns the normalized
//! event types a host produces from DOM mouse/touch events, and the pure
//! geometry that turns those events and the owner's percentages into
//! track-local positions and active-region styles.
//!
//! # How it fits in the system
//! `rangetrack-web` consumes these types in its gesture state machine and
//! view tree. Nothing here holds state across events.

pub mod event;
pub mod geometry;
pub mod logging;

pub use event::{
    GestureEvent, GestureModality, ListenerKind, MouseButton, PointerEvent, SurfaceEvents,
    TouchEvent, TouchPoint,
};
pub use geometry::{ActiveTrackStyle, ClientRect, CssPercent, Percentages, Position};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
