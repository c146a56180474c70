mod first_person;
mod orbit;
mod orbit_core;

pub use first_person::{look_direction, FirstPersonControls};
pub use orbit::OrbitControls;
pub use orbit_core::MapOrbit;

use crate::camera::Camera;
use crate::input::InputEvent;
use crate::scene::ControlsKind;

/// Common surface of the navigation controllers. A host holds whichever
/// controller currently owns the camera behind this trait and drives it
/// from its event loop; only one controller is connected at a time.
pub trait NavControls {
    /// Which controls slot this controller occupies
    fn kind(&self) -> ControlsKind;

    /// Current camera pose, for rendering or for seeding a handover
    fn camera(&self) -> &Camera;

    /// Feed one normalized input event
    fn handle_event(&mut self, event: &InputEvent);

    /// Advance time-driven state by a frame delta in seconds
    fn tick(&mut self, delta: f32);

    /// Detach from the scene and stop accepting input
    fn disconnect(&mut self);
}

impl NavControls for FirstPersonControls {
    fn kind(&self) -> ControlsKind {
        ControlsKind::FirstPerson
    }

    fn camera(&self) -> &Camera {
        self.camera()
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.handle_event(event);
    }

    fn tick(&mut self, delta: f32) {
        self.tick(delta);
    }

    fn disconnect(&mut self) {
        self.disconnect();
    }
}

impl NavControls for OrbitControls {
    fn kind(&self) -> ControlsKind {
        ControlsKind::Orbit
    }

    fn camera(&self) -> &Camera {
        self.camera()
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.handle_event(event);
    }

    fn tick(&mut self, delta: f32) {
        self.tick(delta);
    }

    fn disconnect(&mut self) {
        self.disconnect();
    }
}
