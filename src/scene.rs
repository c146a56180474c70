use crate::collision::{CollisionSet, RayHit};
use crate::math::{Ray, AABB};
use crate::terrain::TerrainSource;
use glam::Vec2;
use std::cell::{Cell, RefCell};

pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 1080.0;

/// Which controller kind currently holds the camera slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsKind {
    FirstPerson,
    Orbit,
}

/// Host surface the controllers attach to. Carries the collision geometry,
/// the terrain height provider and the viewport metrics. Shared
/// single-threaded behind an Rc; the host mutates, controllers only read.
pub struct SceneContext {
    collision: RefCell<CollisionSet>,
    terrain: RefCell<Option<Box<dyn TerrainSource>>>,
    viewport_height: Cell<f32>,
    active_controls: Cell<Option<ControlsKind>>,
}

impl SceneContext {
    pub fn new() -> Self {
        Self {
            collision: RefCell::new(CollisionSet::new()),
            terrain: RefCell::new(None),
            viewport_height: Cell::new(DEFAULT_VIEWPORT_HEIGHT),
            active_controls: Cell::new(None),
        }
    }

    pub fn set_collision(&self, collision: CollisionSet) {
        *self.collision.borrow_mut() = collision;
    }

    /// Nearest collision hit along the ray, None when nothing obstructs
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        self.collision.borrow().raycast(ray)
    }

    pub fn collision_bounds(&self) -> Option<AABB> {
        self.collision.borrow().bounds()
    }

    pub fn set_terrain(&self, terrain: impl TerrainSource + 'static) {
        *self.terrain.borrow_mut() = Some(Box::new(terrain));
    }

    pub fn clear_terrain(&self) {
        *self.terrain.borrow_mut() = None;
    }

    /// Terrain elevation under a ground position, None where no data exists
    pub fn terrain_height_at(&self, xy: Vec2) -> Option<f32> {
        self.terrain.borrow().as_ref().and_then(|t| t.height_at(xy))
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height.get()
    }

    pub fn set_viewport_height(&self, height: f32) {
        self.viewport_height.set(height);
    }

    /// Record which controller now drives the camera. Attaching over a live
    /// controller is a host bug; it is logged and the slot is handed over.
    pub fn claim_controls(&self, kind: ControlsKind) {
        if let Some(active) = self.active_controls.get() {
            if active != kind {
                log::warn!(
                    "controls slot taken over while {:?} was still attached",
                    active
                );
            }
        }
        self.active_controls.set(Some(kind));
    }

    /// Release the slot, only if this controller kind still holds it
    pub fn release_controls(&self, kind: ControlsKind) {
        if self.active_controls.get() == Some(kind) {
            self.active_controls.set(None);
        }
    }

    pub fn active_controls(&self) -> Option<ControlsKind> {
        self.active_controls.get()
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new()
    }
}
