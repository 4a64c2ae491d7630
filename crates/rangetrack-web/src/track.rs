#![forbid(unsafe_code)]

//! Gesture state machine for the track surface of a range slider.
//!
//! The track turns DOM mouse/touch signals into owner callbacks carrying a
//! track-local [`Position`], while enforcing:
//! - a gesture starts only on the surface (mouse-down or touch-start),
//! - move/end listeners live on the surface's owning document for exactly
//!   the duration of the gesture, and
//! - a fresh start while dragging tears down and rebuilds those listeners.
//!
//! Every handler returns a [`TrackDispatch`] describing what happened, so
//! hosts can honor default-action suppression and tests can observe
//! transitions without a browser.

use core::fmt;

use rangetrack_core::event::{
    GestureEvent, GestureModality, ListenerKind, PointerEvent, SurfaceEvents, TouchEvent,
};
use rangetrack_core::geometry::{ClientRect, Position};

use crate::listeners::{EventTarget, ListenerId, ListenerRegistration};

/// Track configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackConfig {
    /// Ask the host to suppress the default action of touch events
    /// (scrolling, synthesized mouse events).
    pub suppress_touch_default: bool,
    /// Bind mouse-up/touch-end on the surface itself, so a release over the
    /// track ends the gesture even before the document listener sees it.
    pub release_on_surface: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            suppress_touch_default: true,
            release_on_surface: true,
        }
    }
}

impl TrackConfig {
    #[must_use]
    pub const fn with_suppress_touch_default(mut self, suppress: bool) -> Self {
        self.suppress_touch_default = suppress;
        self
    }

    #[must_use]
    pub const fn with_release_on_surface(mut self, release: bool) -> Self {
        self.release_on_surface = release;
        self
    }

    /// Events the outer track node must be bound to.
    #[must_use]
    pub fn surface_events(&self) -> SurfaceEvents {
        if self.release_on_surface {
            SurfaceEvents::STARTS | SurfaceEvents::RELEASES
        } else {
            SurfaceEvents::STARTS
        }
    }
}

/// The rendered root node of a mounted track.
pub trait TrackSurface {
    /// Listener table of the document that owns the node.
    type Document: EventTarget;

    /// Current bounding box in viewport coordinates. Queried at every event.
    fn bounding_client_rect(&self) -> ClientRect;

    /// The document the node belongs to, which may be an embedded frame's
    /// document rather than the top-level one.
    fn owner_document(&self) -> Self::Document;
}

/// Owner callback receiving the triggering event and its track-local position.
pub type TrackCallback = Box<dyn FnMut(&GestureEvent, Position)>;

/// Callbacks supplied by the owning slider.
///
/// Only the press callback is required; release and drag are optional.
pub struct TrackHandlers {
    on_track_mouse_down: TrackCallback,
    on_track_mouse_up: Option<TrackCallback>,
    on_track_drag: Option<TrackCallback>,
}

impl TrackHandlers {
    pub fn new(on_track_mouse_down: impl FnMut(&GestureEvent, Position) + 'static) -> Self {
        Self {
            on_track_mouse_down: Box::new(on_track_mouse_down),
            on_track_mouse_up: None,
            on_track_drag: None,
        }
    }

    #[must_use]
    pub fn on_track_mouse_up(
        mut self,
        on_track_mouse_up: impl FnMut(&GestureEvent, Position) + 'static,
    ) -> Self {
        self.on_track_mouse_up = Some(Box::new(on_track_mouse_up));
        self
    }

    #[must_use]
    pub fn on_track_drag(
        mut self,
        on_track_drag: impl FnMut(&GestureEvent, Position) + 'static,
    ) -> Self {
        self.on_track_drag = Some(Box::new(on_track_drag));
        self
    }
}

impl fmt::Debug for TrackHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackHandlers")
            .field("on_track_mouse_up", &self.on_track_mouse_up.is_some())
            .field("on_track_drag", &self.on_track_drag.is_some())
            .finish_non_exhaustive()
    }
}

/// DOM signal handled by one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackLifecyclePhase {
    SurfaceMouseDown,
    SurfaceTouchStart,
    SurfaceMouseUp,
    SurfaceTouchEnd,
    DocumentMouseMove,
    DocumentMouseUp,
    DocumentTouchMove,
    DocumentTouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureStep {
    Start,
    Move,
    Release,
}

impl TrackLifecyclePhase {
    #[must_use]
    pub const fn modality(self) -> GestureModality {
        match self {
            Self::SurfaceMouseDown
            | Self::SurfaceMouseUp
            | Self::DocumentMouseMove
            | Self::DocumentMouseUp => GestureModality::Mouse,
            Self::SurfaceTouchStart
            | Self::SurfaceTouchEnd
            | Self::DocumentTouchMove
            | Self::DocumentTouchEnd => GestureModality::Touch,
        }
    }

    /// Document listener that delivers this phase, if it is a document phase.
    #[must_use]
    pub const fn listener_kind(self) -> Option<ListenerKind> {
        match self {
            Self::DocumentMouseMove => Some(ListenerKind::MouseMove),
            Self::DocumentMouseUp => Some(ListenerKind::MouseUp),
            Self::DocumentTouchMove => Some(ListenerKind::TouchMove),
            Self::DocumentTouchEnd => Some(ListenerKind::TouchEnd),
            _ => None,
        }
    }

    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SurfaceMouseDown => "surface_mouse_down",
            Self::SurfaceTouchStart => "surface_touch_start",
            Self::SurfaceMouseUp => "surface_mouse_up",
            Self::SurfaceTouchEnd => "surface_touch_end",
            Self::DocumentMouseMove => "document_mouse_move",
            Self::DocumentMouseUp => "document_mouse_up",
            Self::DocumentTouchMove => "document_touch_move",
            Self::DocumentTouchEnd => "document_touch_end",
        }
    }

    const fn step(self) -> GestureStep {
        match self {
            Self::SurfaceMouseDown | Self::SurfaceTouchStart => GestureStep::Start,
            Self::DocumentMouseMove | Self::DocumentTouchMove => GestureStep::Move,
            Self::SurfaceMouseUp
            | Self::SurfaceTouchEnd
            | Self::DocumentMouseUp
            | Self::DocumentTouchEnd => GestureStep::Release,
        }
    }

    const fn is_surface_release(self) -> bool {
        matches!(self, Self::SurfaceMouseUp | Self::SurfaceTouchEnd)
    }
}

/// Gesture state of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging { modality: GestureModality },
}

impl GestureState {
    #[must_use]
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Why a signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackIgnoredReason {
    /// No surface is mounted, so there is no rectangle to translate against.
    NotMounted,
    /// Move or release without a gesture in progress.
    NoActiveGesture,
    /// Event modality differs from the phase or the active gesture.
    ModalityMismatch,
    /// Touch event without any touch point.
    NoTouchPoint,
    /// Surface release while surface release binding is disabled.
    SurfaceReleaseUnbound,
}

/// Effect of a dispatch on the document listener table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerChange {
    #[default]
    None,
    Attached,
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDispatchOutcome {
    Forwarded,
    Ignored(TrackIgnoredReason),
}

/// Result of one track dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackDispatch {
    pub phase: TrackLifecyclePhase,
    /// Monotonic sequence number, assigned to forwarded dispatches only.
    pub sequence: Option<u64>,
    pub position: Option<Position>,
    /// The host must call `preventDefault()` on the DOM event.
    pub suppress_default: bool,
    pub listener_change: ListenerChange,
    pub outcome: TrackDispatchOutcome,
}

impl TrackDispatch {
    fn ignored(phase: TrackLifecyclePhase, reason: TrackIgnoredReason) -> Self {
        Self {
            phase,
            sequence: None,
            position: None,
            suppress_default: false,
            listener_change: ListenerChange::None,
            outcome: TrackDispatchOutcome::Ignored(reason),
        }
    }

    #[must_use]
    pub const fn is_forwarded(&self) -> bool {
        matches!(self.outcome, TrackDispatchOutcome::Forwarded)
    }
}

/// Interactive track surface.
///
/// Owns the mounted surface handle, the owner callbacks, and while a gesture
/// is in progress, the registration of its document listeners. Dropping or
/// unmounting the track releases that registration.
pub struct Track<S: TrackSurface> {
    config: TrackConfig,
    handlers: TrackHandlers,
    surface: Option<S>,
    gesture: Option<ListenerRegistration<S::Document>>,
    listener: ListenerId,
    next_sequence: u64,
}

impl<S: TrackSurface> Track<S> {
    /// Create an unmounted track.
    pub fn new(config: TrackConfig, handlers: TrackHandlers) -> Self {
        Self {
            config,
            handlers,
            surface: None,
            gesture: None,
            listener: ListenerId::next(),
            next_sequence: 1,
        }
    }

    #[must_use]
    pub const fn config(&self) -> TrackConfig {
        self.config
    }

    /// Identity this track binds document listeners under.
    #[must_use]
    pub const fn listener_id(&self) -> ListenerId {
        self.listener
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        match &self.gesture {
            Some(registration) => GestureState::Dragging {
                modality: registration.modality(),
            },
            None => GestureState::Idle,
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Replace the owner callbacks, as a re-render with new props would.
    pub fn set_handlers(&mut self, handlers: TrackHandlers) {
        self.handlers = handlers;
    }

    /// Attach the rendered root node. Remounting ends any gesture bound to
    /// the previous node's document.
    pub fn mount(&mut self, surface: S) {
        drop(self.gesture.take());
        self.surface = Some(surface);
    }

    /// Detach the rendered root node, force-releasing document listeners of
    /// a gesture still in progress.
    pub fn unmount(&mut self) -> Option<S> {
        #[cfg(feature = "tracing")]
        if self.gesture.is_some() {
            tracing::debug!(
                listener = self.listener.get(),
                "unmounted mid-gesture; releasing document listeners"
            );
        }
        drop(self.gesture.take());
        self.surface.take()
    }

    /// Mouse-down on the surface.
    pub fn mouse_down(&mut self, event: PointerEvent) -> TrackDispatch {
        self.dispatch(TrackLifecyclePhase::SurfaceMouseDown, event.into())
    }

    /// Touch-start on the surface.
    pub fn touch_start(&mut self, event: TouchEvent) -> TrackDispatch {
        self.dispatch(TrackLifecyclePhase::SurfaceTouchStart, event.into())
    }

    /// Mouse-up on the surface.
    pub fn surface_mouse_up(&mut self, event: PointerEvent) -> TrackDispatch {
        self.dispatch(TrackLifecyclePhase::SurfaceMouseUp, event.into())
    }

    /// Touch-end on the surface.
    pub fn surface_touch_end(&mut self, event: TouchEvent) -> TrackDispatch {
        self.dispatch(TrackLifecyclePhase::SurfaceTouchEnd, event.into())
    }

    /// Mouse-move delivered by the document listener.
    pub fn document_mouse_move(&mut self, event: PointerEvent) -> TrackDispatch {
        self.dispatch(TrackLifecyclePhase::DocumentMouseMove, event.into())
    }

    /// Mouse-up delivered by the document listener.
    pub fn document_mouse_up(&mut self, event: PointerEvent) -> TrackDispatch {
        self.dispatch(TrackLifecyclePhase::DocumentMouseUp, event.into())
    }

    /// Touch-move delivered by the document listener.
    pub fn document_touch_move(&mut self, event: TouchEvent) -> TrackDispatch {
        self.dispatch(TrackLifecyclePhase::DocumentTouchMove, event.into())
    }

    /// Touch-end delivered by the document listener.
    pub fn document_touch_end(&mut self, event: TouchEvent) -> TrackDispatch {
        self.dispatch(TrackLifecyclePhase::DocumentTouchEnd, event.into())
    }

    /// Handle `event` as `phase`.
    ///
    /// Touch phases request default-action suppression (when configured)
    /// whether or not the event is forwarded.
    pub fn dispatch(&mut self, phase: TrackLifecyclePhase, event: GestureEvent) -> TrackDispatch {
        let mut dispatch = if event.modality() != phase.modality() {
            TrackDispatch::ignored(phase, TrackIgnoredReason::ModalityMismatch)
        } else {
            match phase.step() {
                GestureStep::Start => self.begin(phase, &event),
                GestureStep::Move => self.drag(phase, &event),
                GestureStep::Release => self.release(phase, &event),
            }
        };
        dispatch.suppress_default =
            phase.modality() == GestureModality::Touch && self.config.suppress_touch_default;

        #[cfg(feature = "tracing")]
        trace_dispatch(&dispatch);

        dispatch
    }

    fn begin(&mut self, phase: TrackLifecyclePhase, event: &GestureEvent) -> TrackDispatch {
        let Some(surface) = self.surface.as_ref() else {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::NotMounted);
        };
        let Some(position) = event.position_in(&surface.bounding_client_rect()) else {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::NoTouchPoint);
        };
        let document = surface.owner_document();

        (self.handlers.on_track_mouse_down)(event, position);

        // A start while dragging means the previous end event was missed.
        drop(self.gesture.take());
        self.gesture = Some(ListenerRegistration::acquire(
            document,
            self.listener,
            event.modality(),
        ));
        self.forwarded(phase, Some(position), ListenerChange::Attached)
    }

    fn drag(&mut self, phase: TrackLifecyclePhase, event: &GestureEvent) -> TrackDispatch {
        let Some(active) = self.gesture.as_ref() else {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::NoActiveGesture);
        };
        if active.modality() != phase.modality() {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::ModalityMismatch);
        }
        let Some(surface) = self.surface.as_ref() else {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::NotMounted);
        };
        let Some(position) = event.position_in(&surface.bounding_client_rect()) else {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::NoTouchPoint);
        };

        if let Some(on_track_drag) = self.handlers.on_track_drag.as_mut() {
            on_track_drag(event, position);
        }
        self.forwarded(phase, Some(position), ListenerChange::None)
    }

    fn release(&mut self, phase: TrackLifecyclePhase, event: &GestureEvent) -> TrackDispatch {
        if phase.is_surface_release() && !self.config.release_on_surface {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::SurfaceReleaseUnbound);
        }
        let Some(active) = self.gesture.as_ref() else {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::NoActiveGesture);
        };
        if active.modality() != phase.modality() {
            return TrackDispatch::ignored(phase, TrackIgnoredReason::ModalityMismatch);
        }

        // A lifted touch with no changed touches still ends the gesture,
        // but has no position to report.
        let position = self
            .surface
            .as_ref()
            .and_then(|surface| event.position_in(&surface.bounding_client_rect()));
        if let (Some(on_track_mouse_up), Some(position)) =
            (self.handlers.on_track_mouse_up.as_mut(), position)
        {
            on_track_mouse_up(event, position);
        }

        drop(self.gesture.take());
        self.forwarded(phase, position, ListenerChange::Detached)
    }

    fn forwarded(
        &mut self,
        phase: TrackLifecyclePhase,
        position: Option<Position>,
        listener_change: ListenerChange,
    ) -> TrackDispatch {
        TrackDispatch {
            phase,
            sequence: Some(self.next_sequence()),
            position,
            suppress_default: false,
            listener_change,
            outcome: TrackDispatchOutcome::Forwarded,
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

#[cfg(feature = "tracing")]
fn trace_dispatch(dispatch: &TrackDispatch) {
    let _span = tracing::debug_span!(
        "track.gesture",
        phase = dispatch.phase.as_str(),
        modality = dispatch.phase.modality().as_str(),
        x = dispatch.position.map(|position| position.x),
        outcome = ?dispatch.outcome
    )
    .entered();
    tracing::debug!(listener_change = ?dispatch.listener_change, "track dispatch");
}
