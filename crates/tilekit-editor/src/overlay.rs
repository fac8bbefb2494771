//! Overlay markers pushed by tools for the renderer to draw.
//!
//! Tools never draw. They add markers to an [`OverlaySink`] they were given
//! at construction and remove them when the marker is no longer needed.

use crate::objects::ObjectClassId;
use tilekit_core::{Rect, TileRegion};
use uuid::Uuid;

/// Handle to a marker in an overlay sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// A renderable annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayMarker {
    /// Rubber-band rectangle of a box gesture, in level units.
    SelectionRect { rect: Rect },
    /// Outline of a tile selection.
    TileSelectionBox { region: TileRegion, floating: bool },
    /// Highlight around a selected object.
    ObjectHighlight { object: Uuid, rect: Rect },
    /// Ghost of the object about to be placed.
    ObjectPreview { class: ObjectClassId, rect: Rect },
}

pub trait OverlaySink {
    fn add(&mut self, marker: OverlayMarker) -> OverlayId;

    /// Removes a marker. Returns false if the id is unknown.
    fn remove(&mut self, id: OverlayId) -> bool;
}

/// In-memory marker collection read by the renderer.
#[derive(Debug, Clone, Default)]
pub struct OverlayLayer {
    next_id: u64,
    markers: Vec<(OverlayId, OverlayMarker)>,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers in insertion order.
    pub fn markers(&self) -> &[(OverlayId, OverlayMarker)] {
        &self.markers
    }

    pub fn get(&self, id: OverlayId) -> Option<&OverlayMarker> {
        self.markers
            .iter()
            .find(|(marker_id, _)| *marker_id == id)
            .map(|(_, marker)| marker)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl OverlaySink for OverlayLayer {
    fn add(&mut self, marker: OverlayMarker) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.markers.push((id, marker));
        id
    }

    fn remove(&mut self, id: OverlayId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|(marker_id, _)| *marker_id != id);
        self.markers.len() != before
    }
}

/// Replaces the marker held in `slot`, or clears it when `marker` is `None`.
pub(crate) fn replace_marker(
    sink: &mut dyn OverlaySink,
    slot: &mut Option<OverlayId>,
    marker: Option<OverlayMarker>,
) {
    if let Some(old) = slot.take() {
        sink.remove(old);
    }
    *slot = marker.map(|m| sink.add(m));
}
