//! Object selection model.

use crate::objects::{HitTest, ObjectInstance, ObjectLayer, ObjectPool};
use crate::overlay::{OverlayId, OverlayMarker, OverlaySink};
use serde::{Deserialize, Serialize};
use tilekit_core::{EditorError, Point, Rect};
use uuid::Uuid;

/// A selected object and the position it had when the current drag baseline was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedObject {
    pub id: Uuid,
    pub initial_location: Point,
    highlight: Option<OverlayId>,
}

/// Ordered set of selected objects, each at most once.
///
/// Every entry owns a highlight marker in the overlay sink passed to the
/// mutating methods.
#[derive(Debug, Clone, Default)]
pub struct ObjectSelection {
    entries: Vec<SelectedObject>,
}

impl ObjectSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> Vec<Uuid> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn entries(&self) -> &[SelectedObject] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&SelectedObject> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Adds an object, capturing its current position. Returns false if it
    /// is already selected or not in the layer.
    pub fn add(&mut self, layer: &ObjectLayer, overlay: &mut dyn OverlaySink, id: Uuid) -> bool {
        if self.contains(id) {
            return false;
        }
        let Some(instance) = layer.get(id) else {
            return false;
        };
        let highlight = layer
            .bounds_of(instance, HitTest::Coarse)
            .map(|rect| overlay.add(OverlayMarker::ObjectHighlight { object: id, rect }));
        self.entries.push(SelectedObject {
            id,
            initial_location: instance.position,
            highlight,
        });
        true
    }

    pub fn remove(&mut self, overlay: &mut dyn OverlaySink, id: Uuid) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        let entry = self.entries.remove(index);
        if let Some(highlight) = entry.highlight {
            overlay.remove(highlight);
        }
        true
    }

    pub fn clear(&mut self, overlay: &mut dyn OverlaySink) {
        for entry in self.entries.drain(..) {
            if let Some(highlight) = entry.highlight {
                overlay.remove(highlight);
            }
        }
    }

    /// Takes the current positions as the new drag baseline.
    pub fn capture_locations(&mut self, layer: &ObjectLayer) {
        for entry in &mut self.entries {
            if let Some(instance) = layer.get(entry.id) {
                entry.initial_location = instance.position;
            }
        }
    }

    /// Drops entries whose object left the layer and redraws every highlight.
    pub fn refresh_highlights(&mut self, layer: &ObjectLayer, overlay: &mut dyn OverlaySink) {
        self.entries.retain(|entry| {
            let keep = layer.contains(entry.id);
            if !keep {
                if let Some(highlight) = entry.highlight {
                    overlay.remove(highlight);
                }
            }
            keep
        });
        for entry in &mut self.entries {
            if let Some(highlight) = entry.highlight.take() {
                overlay.remove(highlight);
            }
            entry.highlight = layer
                .get(entry.id)
                .and_then(|instance| layer.bounds_of(instance, HitTest::Coarse))
                .map(|rect| {
                    overlay.add(OverlayMarker::ObjectHighlight {
                        object: entry.id,
                        rect,
                    })
                });
        }
    }

    /// Union of the selected objects' image bounds.
    pub fn bounds(&self, layer: &ObjectLayer) -> Option<Rect> {
        Rect::union_all(self.entries.iter().filter_map(|entry| {
            layer
                .get(entry.id)
                .and_then(|instance| layer.bounds_of(instance, HitTest::Coarse))
        }))
    }

    /// Clipboard form of the selection, in selection order.
    pub fn to_payload(&self, layer: &ObjectLayer) -> ObjectSelectionPayload {
        ObjectSelectionPayload::from_instances(
            layer.pool(),
            self.entries.iter().filter_map(|entry| layer.get(entry.id)),
        )
    }
}

/// A serialized object, referring to its class by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub class: String,
    pub x: f64,
    pub y: f64,
}

/// Clipboard form of an object selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectSelectionPayload {
    pub objects: Vec<ObjectRecord>,
}

impl ObjectSelectionPayload {
    /// Serializes instances, swapping pool references for class names.
    pub fn from_instances<'a, I>(pool: &ObjectPool, instances: I) -> Self
    where
        I: IntoIterator<Item = &'a ObjectInstance>,
    {
        let objects = instances
            .into_iter()
            .filter_map(|instance| {
                pool.get(instance.class).map(|class| ObjectRecord {
                    class: class.name.clone(),
                    x: instance.position.x,
                    y: instance.position.y,
                })
            })
            .collect();
        Self { objects }
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Rebuilds instances against `pool`, each with a fresh id.
    ///
    /// Records naming a class the pool does not know are skipped.
    pub fn into_instances(self, pool: &ObjectPool) -> Vec<ObjectInstance> {
        self.objects
            .into_iter()
            .filter_map(|record| match pool.by_name(&record.class) {
                Some(class) => Some(ObjectInstance::new(class.id, Point::new(record.x, record.y))),
                None => {
                    tracing::warn!("{}", EditorError::UnknownObjectClass(record.class));
                    None
                }
            })
            .collect()
    }
}
