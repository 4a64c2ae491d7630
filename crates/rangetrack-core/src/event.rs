#![forbid(unsafe_code)]

//! Canonical gesture event types.
//!
//! Hosts translate DOM `MouseEvent`/`TouchEvent` objects into
//! [`GestureEvent`] values before handing them to a track. Everything
//! downstream of the translation works on a single [`Position`] type.
//!
//! # Design Notes
//!
//! - Coordinates are viewport (`clientX`/`clientY`) CSS pixels.
//! - Only the first touch point is honored; multi-touch is not modeled.
//! - A `touchend` has no active touches, so [`TouchEvent::primary_point`]
//!   falls back to the first changed touch.

use bitflags::bitflags;

use crate::geometry::{ClientRect, Position};

/// Input modality of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GestureModality {
    Mouse,
    Touch,
}

impl GestureModality {
    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Touch => "touch",
        }
    }
}

/// Mouse button reported by a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub const fn from_dom(button: i32) -> Self {
        match button {
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A mouse event: one coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub button: MouseButton,
}

impl PointerEvent {
    /// Create a primary-button event at the given viewport coordinates.
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            button: MouseButton::Primary,
        }
    }

    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// One touch point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchPoint {
    pub identifier: i64,
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(identifier: i64, client_x: f64, client_y: f64) -> Self {
        Self {
            identifier,
            client_x,
            client_y,
        }
    }
}

/// A touch event: the active touch list plus the points that changed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchEvent {
    /// Touch points currently on the surface.
    pub touches: Vec<TouchPoint>,
    /// Touch points that changed in this event (the lifted one on `touchend`).
    pub changed_touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Event with a single active touch point.
    #[must_use]
    pub fn single(point: TouchPoint) -> Self {
        Self {
            touches: vec![point],
            changed_touches: vec![point],
        }
    }

    /// Event for a lifted finger: no active touches, one changed touch.
    #[must_use]
    pub fn lifted(point: TouchPoint) -> Self {
        Self {
            touches: Vec::new(),
            changed_touches: vec![point],
        }
    }

    /// First active touch, falling back to the first changed touch.
    #[must_use]
    pub fn primary_point(&self) -> Option<&TouchPoint> {
        self.touches.first().or_else(|| self.changed_touches.first())
    }
}

/// A gesture event from either input modality.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureEvent {
    /// A mouse event.
    Pointer(PointerEvent),
    /// A touch event.
    Touch(TouchEvent),
}

impl GestureEvent {
    #[must_use]
    pub const fn modality(&self) -> GestureModality {
        match self {
            Self::Pointer(_) => GestureModality::Mouse,
            Self::Touch(_) => GestureModality::Touch,
        }
    }

    /// Horizontal viewport coordinate of the event.
    ///
    /// `None` only for a touch event that carries no touch points at all.
    #[must_use]
    pub fn client_x(&self) -> Option<f64> {
        match self {
            Self::Pointer(pointer) => Some(pointer.client_x),
            Self::Touch(touch) => touch.primary_point().map(|point| point.client_x),
        }
    }

    /// Translate the event into track-local space using the live track rectangle.
    #[must_use]
    pub fn position_in(&self, rect: &ClientRect) -> Option<Position> {
        self.client_x().map(|client_x| rect.local_position(client_x))
    }
}

impl From<PointerEvent> for GestureEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

impl From<TouchEvent> for GestureEvent {
    fn from(event: TouchEvent) -> Self {
        Self::Touch(event)
    }
}

/// Document-level listener kinds held during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    MouseMove,
    MouseUp,
    TouchMove,
    TouchEnd,
}

impl ListenerKind {
    /// All listener kinds.
    pub const ALL: [Self; 4] = [Self::MouseMove, Self::MouseUp, Self::TouchMove, Self::TouchEnd];

    /// DOM event type string.
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
        }
    }

    #[must_use]
    pub const fn modality(self) -> GestureModality {
        match self {
            Self::MouseMove | Self::MouseUp => GestureModality::Mouse,
            Self::TouchMove | Self::TouchEnd => GestureModality::Touch,
        }
    }

    /// The move and end listeners for a modality, in attach order.
    #[must_use]
    pub const fn for_modality(modality: GestureModality) -> [Self; 2] {
        match modality {
            GestureModality::Mouse => [Self::MouseMove, Self::MouseUp],
            GestureModality::Touch => [Self::TouchMove, Self::TouchEnd],
        }
    }
}

bitflags! {
    /// Events the outer track node is bound to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SurfaceEvents: u8 {
        const MOUSE_DOWN  = 0b0000_0001;
        const MOUSE_UP    = 0b0000_0010;
        const TOUCH_START = 0b0000_0100;
        const TOUCH_END   = 0b0000_1000;
        const STARTS = Self::MOUSE_DOWN.bits() | Self::TOUCH_START.bits();
        const RELEASES = Self::MOUSE_UP.bits() | Self::TOUCH_END.bits();
    }
}

impl SurfaceEvents {
    /// DOM event type strings for every set flag.
    #[must_use]
    pub fn event_types(self) -> Vec<&'static str> {
        let mut types = Vec::with_capacity(4);
        if self.contains(Self::MOUSE_DOWN) {
            types.push("mousedown");
        }
        if self.contains(Self::MOUSE_UP) {
            types.push("mouseup");
        }
        if self.contains(Self::TOUCH_START) {
            types.push("touchstart");
        }
        if self.contains(Self::TOUCH_END) {
            types.push("touchend");
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_event_translates_against_rect() {
        let rect = ClientRect::new(50.0, 0.0, 200.0, 10.0);
        let event = GestureEvent::from(PointerEvent::new(130.0, 4.0));
        assert_eq!(event.position_in(&rect), Some(Position::new(80.0)));
        assert_eq!(event.modality(), GestureModality::Mouse);
    }

    #[test]
    fn touch_event_uses_first_touch_only() {
        let rect = ClientRect::new(50.0, 0.0, 200.0, 10.0);
        let event = GestureEvent::Touch(TouchEvent {
            touches: vec![TouchPoint::new(0, 200.0, 3.0), TouchPoint::new(1, 90.0, 3.0)],
            changed_touches: Vec::new(),
        });
        assert_eq!(event.position_in(&rect), Some(Position { x: 150.0, y: 0.0 }));
        assert_eq!(event.modality(), GestureModality::Touch);
    }

    #[test]
    fn lifted_touch_falls_back_to_changed_touches() {
        let event = TouchEvent::lifted(TouchPoint::new(7, 42.0, 0.0));
        assert_eq!(event.primary_point().map(|p| p.identifier), Some(7));
    }

    #[test]
    fn empty_touch_event_has_no_coordinate() {
        let event = GestureEvent::Touch(TouchEvent::default());
        assert_eq!(event.client_x(), None);
    }

    #[test]
    fn listener_kinds_pair_by_modality() {
        assert_eq!(
            ListenerKind::for_modality(GestureModality::Touch),
            [ListenerKind::TouchMove, ListenerKind::TouchEnd]
        );
        for kind in ListenerKind::ALL {
            assert!(ListenerKind::for_modality(kind.modality()).contains(&kind));
        }
    }

    #[test]
    fn surface_event_types_follow_flag_order() {
        let all = SurfaceEvents::STARTS | SurfaceEvents::RELEASES;
        assert_eq!(
            all.event_types(),
            vec!["mousedown", "mouseup", "touchstart", "touchend"]
        );
        assert_eq!(SurfaceEvents::STARTS.event_types(), vec!["mousedown", "touchstart"]);
    }

    #[test]
    fn dom_button_mapping() {
        assert_eq!(MouseButton::from_dom(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_dom(2), MouseButton::Secondary);
    }
}
