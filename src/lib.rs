pub mod camera;
pub mod cli;
pub mod collision;
pub mod config;
pub mod controls;
pub mod demo;
pub mod events;
pub mod input;
pub mod math;
pub mod scene;
pub mod terrain;
pub mod timer;

pub use camera::Camera;
pub use collision::{Collider, CollisionSet, RayHit};
pub use config::{FirstPersonSettings, NavSettings, OrbitSettings};
pub use controls::{FirstPersonControls, NavControls, OrbitControls};
pub use scene::{ControlsKind, SceneContext};
pub use terrain::{FlatTerrain, GridTerrain, TerrainSource};
