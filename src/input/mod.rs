mod event;
mod keys;
mod tracker;
mod winit_adapter;

pub use event::{InputEvent, NavKey, PointerButton, PointerEvent, PointerKind};
pub use keys::{KeyNavState, NavSignals};
pub use tracker::{DragMove, InteractionState, PointerTracker};
pub use winit_adapter::{WinitInputAdapter, MOUSE_POINTER_ID};
