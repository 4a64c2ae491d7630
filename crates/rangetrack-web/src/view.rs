#![forbid(unsafe_code)]

//! Render output of a track.
//!
//! The host turns a [`TrackNode`] into real elements: an outer hit-testable
//! node bound to the [`SurfaceEvents`] it lists, an inner active-region node
//! positioned by its [`ActiveTrackStyle`], then the owner's children.

use rangetrack_core::event::SurfaceEvents;
use rangetrack_core::geometry::{ActiveTrackStyle, Percentages};

use crate::track::{Track, TrackSurface};

/// Style class identifiers per semantic role. Used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrackClassNames {
    pub track: String,
    pub active_track: String,
}

impl TrackClassNames {
    pub fn new(track: impl Into<String>, active_track: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            active_track: active_track.into(),
        }
    }
}

/// The highlighted sub-range.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTrackNode {
    pub class_name: String,
    pub style: ActiveTrackStyle,
}

/// Outer track node. `C` is the owner's opaque child content.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackNode<C> {
    pub class_name: String,
    /// Surface events the host must bind to this node.
    pub listens: SurfaceEvents,
    pub active_track: ActiveTrackNode,
    pub children: C,
}

impl<C> TrackNode<C> {
    /// Build the node tree. The active style is computed fresh every call.
    pub fn new(
        class_names: &TrackClassNames,
        percentages: Percentages,
        listens: SurfaceEvents,
        children: C,
    ) -> Self {
        Self {
            class_name: class_names.track.clone(),
            listens,
            active_track: ActiveTrackNode {
                class_name: class_names.active_track.clone(),
                style: percentages.active_track_style(),
            },
            children,
        }
    }

    /// Transform the children, keeping the track structure.
    pub fn map_children<D>(self, f: impl FnOnce(C) -> D) -> TrackNode<D> {
        TrackNode {
            class_name: self.class_name,
            listens: self.listens,
            active_track: self.active_track,
            children: f(self.children),
        }
    }
}

impl<S: TrackSurface> Track<S> {
    /// Render the track for the owner's current props.
    pub fn render<C>(
        &self,
        class_names: &TrackClassNames,
        percentages: Percentages,
        children: C,
    ) -> TrackNode<C> {
        TrackNode::new(
            class_names,
            percentages,
            self.config().surface_events(),
            children,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerRegistry;
    use crate::track::{TrackConfig, TrackHandlers};
    use rangetrack_core::geometry::ClientRect;

    struct StaticSurface(ListenerRegistry);

    impl TrackSurface for StaticSurface {
        type Document = ListenerRegistry;

        fn bounding_client_rect(&self) -> ClientRect {
            ClientRect::new(0.0, 0.0, 100.0, 4.0)
        }

        fn owner_document(&self) -> ListenerRegistry {
            self.0.clone()
        }
    }

    fn class_names() -> TrackClassNames {
        TrackClassNames::new("range__track", "range__track--active")
    }

    #[test]
    fn render_passes_class_names_verbatim() {
        let track: Track<StaticSurface> =
            Track::new(TrackConfig::default(), TrackHandlers::new(|_, _| {}));
        let node = track.render(&class_names(), Percentages::new(0.2, 0.7), ["knob-min", "knob-max"]);

        assert_eq!(node.class_name, "range__track");
        assert_eq!(node.active_track.class_name, "range__track--active");
        assert_eq!(node.active_track.style.left.to_string(), "20%");
        assert_eq!(node.active_track.style.width.to_string(), "50%");
        assert_eq!(node.children, ["knob-min", "knob-max"]);
    }

    #[test]
    fn render_binds_surface_releases_by_default() {
        let track: Track<StaticSurface> =
            Track::new(TrackConfig::default(), TrackHandlers::new(|_, _| {}));
        let node = track.render(&class_names(), Percentages::new(0.0, 1.0), ());
        assert_eq!(
            node.listens.event_types(),
            vec!["mousedown", "mouseup", "touchstart", "touchend"]
        );
    }

    #[test]
    fn render_recomputes_style_each_call() {
        let mut track = Track::new(TrackConfig::default(), TrackHandlers::new(|_, _| {}));
        track.mount(StaticSurface(ListenerRegistry::new()));
        let first = track.render(&class_names(), Percentages::new(0.1, 0.2), ());
        let second = track.render(&class_names(), Percentages::new(0.4, 0.9), ());
        assert_eq!(first.active_track.style.to_css(), "left: 10%; width: 10%;");
        assert_eq!(second.active_track.style.to_css(), "left: 40%; width: 50%;");
    }

    #[test]
    fn map_children_keeps_structure() {
        let node = TrackNode::new(
            &class_names(),
            Percentages::new(0.25, 0.5),
            SurfaceEvents::STARTS,
            2_u8,
        );
        let mapped = node.map_children(|count| vec!["knob"; usize::from(count)]);
        assert_eq!(mapped.children.len(), 2);
        assert_eq!(mapped.listens, SurfaceEvents::STARTS);
        assert_eq!(mapped.active_track.style.left.to_string(), "25%");
    }
}
