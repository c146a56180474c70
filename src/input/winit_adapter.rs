use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, NavKey, PointerButton, PointerEvent, PointerKind};

/// Pointer id the single mouse cursor reports under. Platform touch ids
/// start at zero and never reach this.
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

/// Wheel pixels treated as one notch when a platform reports pixel deltas
const PIXELS_PER_LINE: f32 = 100.0;

/// Adapter that lowers winit window events into the controller event model.
/// Tracks the cursor so mouse downs and drags carry a position.
#[derive(Debug, Clone, Default)]
pub struct WinitInputAdapter {
    cursor: Option<Vec2>,
}

impl WinitInputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower a window event. Returns the normalized event when one applies.
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = keycode_to_nav(keycode)?;
                    Some(InputEvent::Key {
                        key,
                        pressed: event.state.is_pressed(),
                    })
                } else {
                    None
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                // A click before any cursor report cannot be localized
                let position = self.cursor?;
                let pointer = PointerEvent {
                    id: MOUSE_POINTER_ID,
                    kind: PointerKind::Mouse,
                    button: mouse_button(*button),
                    position,
                };
                match state {
                    ElementState::Pressed => Some(InputEvent::PointerDown(pointer)),
                    ElementState::Released => Some(InputEvent::PointerUp(pointer)),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = Some(position);
                Some(InputEvent::PointerMove(PointerEvent {
                    id: MOUSE_POINTER_ID,
                    kind: PointerKind::Mouse,
                    button: PointerButton::None,
                    position,
                }))
            }
            WindowEvent::Touch(touch) => {
                let pointer = PointerEvent {
                    id: touch.id,
                    kind: PointerKind::Touch,
                    button: PointerButton::None,
                    position: Vec2::new(touch.location.x as f32, touch.location.y as f32),
                };
                match touch.phase {
                    TouchPhase::Started => Some(InputEvent::PointerDown(pointer)),
                    TouchPhase::Moved => Some(InputEvent::PointerMove(pointer)),
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        Some(InputEvent::PointerUp(pointer))
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scroll(scroll_amount(delta))),
            WindowEvent::Focused(false) => Some(InputEvent::Blur),
            _ => None,
        }
    }
}

/// Wheel delta in notches, positive toward the viewer
fn scroll_amount(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / PIXELS_PER_LINE,
    }
}

fn mouse_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

fn keycode_to_nav(keycode: KeyCode) -> Option<NavKey> {
    match keycode {
        KeyCode::ArrowLeft => Some(NavKey::ArrowLeft),
        KeyCode::ArrowRight => Some(NavKey::ArrowRight),
        KeyCode::ArrowUp => Some(NavKey::ArrowUp),
        KeyCode::ArrowDown => Some(NavKey::ArrowDown),
        KeyCode::PageUp => Some(NavKey::PageUp),
        KeyCode::PageDown => Some(NavKey::PageDown),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(NavKey::Shift),
        KeyCode::ControlLeft | KeyCode::ControlRight => Some(NavKey::Control),
        _ => None,
    }
}
