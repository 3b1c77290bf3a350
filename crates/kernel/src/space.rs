use glam::{DMat4, DVec3};

/// The pair of matrices that carry points between object space and the
/// locator's deformation space for one pass.
///
/// Column-vector convention: `object_to_locator` first applies the object's
/// world matrix, then the inverse of the locator's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceTransforms {
    pub object_to_locator: DMat4,
    pub locator_to_object: DMat4,
}

impl Default for SpaceTransforms {
    fn default() -> Self {
        Self {
            object_to_locator: DMat4::IDENTITY,
            locator_to_object: DMat4::IDENTITY,
        }
    }
}

impl SpaceTransforms {
    /// Derive both directions from the object's and locator's world matrices.
    ///
    /// The return trip is built from its own inverse rather than by inverting
    /// `object_to_locator`, so a zero displacement round-trips only to within
    /// floating-point tolerance. A singular locator is not special-cased.
    pub fn new(object_to_world: DMat4, locator_world: DMat4) -> Self {
        Self {
            object_to_locator: locator_world.inverse() * object_to_world,
            locator_to_object: object_to_world.inverse() * locator_world,
        }
    }

    #[inline]
    pub fn to_locator(&self, p: DVec3) -> DVec3 {
        self.object_to_locator.transform_point3(p)
    }

    #[inline]
    pub fn to_object(&self, p: DVec3) -> DVec3 {
        self.locator_to_object.transform_point3(p)
    }
}

/// Caches [`SpaceTransforms`] keyed on the two input matrices.
///
/// Both matrices are constant within a pass and usually across many passes,
/// so the two inversions only run when either input changes.
#[derive(Debug, Clone, Default)]
pub struct TransformMemo {
    key: Option<(DMat4, DMat4)>,
    transforms: SpaceTransforms,
    recomputes: u64,
}

impl TransformMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transforms for the given inputs, recomputed only if they differ from
    /// the previous call.
    pub fn get(&mut self, object_to_world: DMat4, locator_world: DMat4) -> SpaceTransforms {
        let key = (object_to_world, locator_world);
        if self.key != Some(key) {
            self.transforms = SpaceTransforms::new(object_to_world, locator_world);
            self.key = Some(key);
            self.recomputes += 1;
            tracing::debug!(recomputes = self.recomputes, "space transforms recomputed");
        }
        self.transforms
    }

    /// Drop the cached value so the next `get` recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// How many times the transforms have been derived.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}
