#![forbid(unsafe_code)]

//! JSON input parser for host-encoded DOM events.
//!
//! Hosts that cannot call the typed [`Track`] handlers directly (a JS shim
//! posting messages, a recorded session) encode each DOM event as JSON:
//!
//! ```json
//! {"type": "mousedown", "clientX": 130, "clientY": 4, "button": 0}
//! {"type": "touchmove", "touches": [{"identifier": 0, "clientX": 200, "clientY": 3}]}
//! {"type": "mouseup", "target": "surface", "clientX": 90}
//! ```
//!
//! `target` defaults to `surface` for starts and `document` for moves and
//! releases. Gated behind the `input-parser` feature.

use rangetrack_core::event::{GestureEvent, MouseButton, PointerEvent, TouchEvent, TouchPoint};
use serde::Deserialize;
use thiserror::Error;

use crate::track::{Track, TrackDispatch, TrackLifecyclePhase, TrackSurface};

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputParseError {
    /// Malformed JSON.
    #[error("JSON parse error: {0}")]
    Json(String),
    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// Event type the track never listens to.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),
    /// Unknown target value.
    #[error("unknown target: {0}")]
    UnknownTarget(String),
    /// Known event type delivered to a target that never binds it.
    #[error("{event_type} is not bound on the {target}")]
    UnboundTarget {
        event_type: String,
        target: &'static str,
    },
}

/// A decoded DOM event ready for [`Track::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedTrackInput {
    pub phase: TrackLifecyclePhase,
    pub event: GestureEvent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTouchPoint {
    #[serde(default)]
    identifier: i64,
    client_x: f64,
    #[serde(default)]
    client_y: f64,
}

impl From<RawTouchPoint> for TouchPoint {
    fn from(raw: RawTouchPoint) -> Self {
        TouchPoint::new(raw.identifier, raw.client_x, raw.client_y)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInput {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    client_x: Option<f64>,
    #[serde(default)]
    client_y: Option<f64>,
    #[serde(default)]
    button: Option<i32>,
    #[serde(default)]
    touches: Vec<RawTouchPoint>,
    #[serde(default)]
    changed_touches: Vec<RawTouchPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Surface,
    Document,
}

impl Target {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Document => "document",
        }
    }
}

/// Parse a JSON-encoded DOM event into a phase and gesture event.
pub fn parse_encoded_track_input(json: &str) -> Result<EncodedTrackInput, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    let default_target = match raw.event_type.as_str() {
        "mousedown" | "touchstart" => Target::Surface,
        "mousemove" | "mouseup" | "touchmove" | "touchend" => Target::Document,
        other => return Err(InputParseError::UnknownEventType(other.to_owned())),
    };
    let target = match raw.target.as_deref() {
        None => default_target,
        Some("surface") => Target::Surface,
        Some("document") => Target::Document,
        Some(other) => return Err(InputParseError::UnknownTarget(other.to_owned())),
    };

    let phase = match (raw.event_type.as_str(), target) {
        ("mousedown", Target::Surface) => TrackLifecyclePhase::SurfaceMouseDown,
        ("touchstart", Target::Surface) => TrackLifecyclePhase::SurfaceTouchStart,
        ("mouseup", Target::Surface) => TrackLifecyclePhase::SurfaceMouseUp,
        ("touchend", Target::Surface) => TrackLifecyclePhase::SurfaceTouchEnd,
        ("mousemove", Target::Document) => TrackLifecyclePhase::DocumentMouseMove,
        ("mouseup", Target::Document) => TrackLifecyclePhase::DocumentMouseUp,
        ("touchmove", Target::Document) => TrackLifecyclePhase::DocumentTouchMove,
        ("touchend", Target::Document) => TrackLifecyclePhase::DocumentTouchEnd,
        (event_type, target) => {
            return Err(InputParseError::UnboundTarget {
                event_type: event_type.to_owned(),
                target: target.as_str(),
            });
        }
    };

    let event = if raw.event_type.starts_with("mouse") {
        let client_x = raw.client_x.ok_or(InputParseError::MissingField("clientX"))?;
        GestureEvent::Pointer(
            PointerEvent::new(client_x, raw.client_y.unwrap_or(0.0))
                .with_button(MouseButton::from_dom(raw.button.unwrap_or(0))),
        )
    } else {
        GestureEvent::Touch(TouchEvent {
            touches: raw.touches.into_iter().map(TouchPoint::from).collect(),
            changed_touches: raw.changed_touches.into_iter().map(TouchPoint::from).collect(),
        })
    };

    Ok(EncodedTrackInput { phase, event })
}

impl<S: TrackSurface> Track<S> {
    /// Parse and dispatch one host-encoded DOM event.
    pub fn dispatch_encoded(&mut self, json: &str) -> Result<TrackDispatch, InputParseError> {
        let input = parse_encoded_track_input(json)?;
        Ok(self.dispatch(input.phase, input.event))
    }
}
