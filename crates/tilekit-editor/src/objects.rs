//! Object classes and the placed-object layer.
//!
//! An [`ObjectClass`] describes a placeable object in its own image space:
//! the image bounds, a tighter collision mask, and an origin point. An
//! [`ObjectInstance`] is one placement of a class, positioned by the level
//! location of its origin point. The [`ObjectLayer`] keeps instances in
//! z-order, bottom first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tilekit_core::{Point, Rect};
use uuid::Uuid;

/// Index of a class in an [`ObjectPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectClassId(pub u32);

impl fmt::Display for ObjectClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Geometry of a placeable object, in image space.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectClass {
    pub id: ObjectClassId,
    pub name: String,
    pub image_bounds: Rect,
    pub mask_bounds: Rect,
    pub origin: Point,
}

impl ObjectClass {
    /// Image bounds of an instance whose origin sits at `position`.
    pub fn image_bounds_at(&self, position: Point) -> Rect {
        self.image_bounds.translate(position - self.origin)
    }

    /// Mask bounds of an instance whose origin sits at `position`.
    pub fn mask_bounds_at(&self, position: Point) -> Rect {
        self.mask_bounds.translate(position - self.origin)
    }
}

/// Registry of object classes, addressable by id or name.
#[derive(Debug, Clone, Default)]
pub struct ObjectPool {
    classes: Vec<ObjectClass>,
    by_name: HashMap<String, ObjectClassId>,
}

impl ObjectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class, replacing the geometry of an existing class with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        image_bounds: Rect,
        mask_bounds: Rect,
        origin: Point,
    ) -> ObjectClassId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            if let Some(class) = self.classes.get_mut(id.0 as usize) {
                class.image_bounds = image_bounds;
                class.mask_bounds = mask_bounds;
                class.origin = origin;
            }
            return id;
        }
        let id = ObjectClassId(self.classes.len() as u32);
        tracing::debug!("Registered object class '{}' as {}", name, id);
        self.by_name.insert(name.clone(), id);
        self.classes.push(ObjectClass {
            id,
            name,
            image_bounds,
            mask_bounds,
            origin,
        });
        id
    }

    pub fn get(&self, id: ObjectClassId) -> Option<&ObjectClass> {
        self.classes.get(id.0 as usize)
    }

    pub fn by_name(&self, name: &str) -> Option<&ObjectClass> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectClass> {
        self.classes.iter()
    }
}

/// One placed object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInstance {
    pub id: Uuid,
    pub class: ObjectClassId,
    /// Level location of the class origin point.
    pub position: Point,
}

impl ObjectInstance {
    /// Creates an instance with a fresh id.
    pub fn new(class: ObjectClassId, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            class,
            position,
        }
    }
}

/// Which rectangle of an object a hit test uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitTest {
    /// Image bounds.
    #[default]
    Coarse,
    /// Mask bounds.
    Mask,
}

/// Relative z-order moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZOrder {
    Front,
    Back,
    Forward,
    Backward,
}

/// Placed objects in z-order, bottom first, plus the classes they refer to.
#[derive(Debug, Clone, Default)]
pub struct ObjectLayer {
    pool: ObjectPool,
    instances: Vec<ObjectInstance>,
}

impl ObjectLayer {
    pub fn new(pool: ObjectPool) -> Self {
        Self {
            pool,
            instances: Vec::new(),
        }
    }

    pub fn pool(&self) -> &ObjectPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ObjectPool {
        &mut self.pool
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectInstance> {
        self.instances.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&ObjectInstance> {
        self.instances.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.instances.iter().position(|o| o.id == id)
    }

    /// Instance ids, bottom first.
    pub fn order(&self) -> Vec<Uuid> {
        self.instances.iter().map(|o| o.id).collect()
    }

    /// Bounds of an instance for the given hit test, `None` if its class is unknown.
    pub fn bounds_of(&self, instance: &ObjectInstance, test: HitTest) -> Option<Rect> {
        let class = self.pool.get(instance.class)?;
        Some(match test {
            HitTest::Coarse => class.image_bounds_at(instance.position),
            HitTest::Mask => class.mask_bounds_at(instance.position),
        })
    }

    /// Objects whose bounds contain `point`, topmost first.
    pub fn objects_at_point(&self, point: Point, test: HitTest) -> Vec<Uuid> {
        self.instances
            .iter()
            .rev()
            .filter(|o| self.bounds_of(o, test).is_some_and(|r| r.contains(point)))
            .map(|o| o.id)
            .collect()
    }

    /// Objects whose bounds overlap `rect`, topmost first.
    pub fn objects_in_region(&self, rect: Rect, test: HitTest) -> Vec<Uuid> {
        self.instances
            .iter()
            .rev()
            .filter(|o| self.bounds_of(o, test).is_some_and(|r| r.intersects(&rect)))
            .map(|o| o.id)
            .collect()
    }

    /// Appends an instance on top.
    pub fn push(&mut self, instance: ObjectInstance) {
        self.instances.push(instance);
    }

    /// Inserts an instance at a z-index, clamped to the layer size.
    pub fn insert(&mut self, index: usize, instance: ObjectInstance) {
        let index = index.min(self.instances.len());
        self.instances.insert(index, instance);
    }

    /// Removes an instance, returning its former z-index.
    pub fn remove(&mut self, id: Uuid) -> Option<(usize, ObjectInstance)> {
        let index = self.index_of(id)?;
        Some((index, self.instances.remove(index)))
    }

    pub fn set_position(&mut self, id: Uuid, position: Point) -> bool {
        match self.instances.iter_mut().find(|o| o.id == id) {
            Some(instance) => {
                instance.position = position;
                true
            }
            None => false,
        }
    }

    /// Applies a z-order move. Returns false if the object is missing or already in place.
    pub fn reorder(&mut self, id: Uuid, op: ZOrder) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let last = self.instances.len() - 1;
        let target = match op {
            ZOrder::Front => last,
            ZOrder::Back => 0,
            ZOrder::Forward => (index + 1).min(last),
            ZOrder::Backward => index.saturating_sub(1),
        };
        if target == index {
            return false;
        }
        let instance = self.instances.remove(index);
        self.instances.insert(target, instance);
        true
    }

    pub fn bring_to_front(&mut self, id: Uuid) -> bool {
        self.reorder(id, ZOrder::Front)
    }

    pub fn send_to_back(&mut self, id: Uuid) -> bool {
        self.reorder(id, ZOrder::Back)
    }

    pub fn bring_forward(&mut self, id: Uuid) -> bool {
        self.reorder(id, ZOrder::Forward)
    }

    pub fn send_backward(&mut self, id: Uuid) -> bool {
        self.reorder(id, ZOrder::Backward)
    }

    /// Rearranges instances to follow `order`. Ids not in `order` keep their relative order on top.
    pub fn restore_order(&mut self, order: &[Uuid]) {
        let rank: HashMap<Uuid, usize> = order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        self.instances
            .sort_by_key(|o| rank.get(&o.id).copied().unwrap_or(usize::MAX));
    }
}
