#![forbid(unsafe_code)]

//! `rangetrack-web` drives the track surface of a range slider from
//! host-delivered DOM events.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes mouse/touch
//!   events and answers bounding-rect queries; the crate never calls into a
//!   browser itself.
//! - **Explicit listener ownership**: document listeners exist only while a
//!   gesture is in progress, held by a registration that unbinds on drop.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.

#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod listeners;
pub mod track;
pub mod view;

pub use listeners::{EventTarget, ListenerId, ListenerRegistration, ListenerRegistry};
pub use track::{
    GestureState, ListenerChange, Track, TrackCallback, TrackConfig, TrackDispatch,
    TrackDispatchOutcome, TrackHandlers, TrackIgnoredReason, TrackLifecyclePhase, TrackSurface,
};
pub use view::{ActiveTrackNode, TrackClassNames, TrackNode};
