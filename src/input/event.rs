use glam::Vec2;

/// Pointer device class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Button reported with a pointer event. Moves and touch contacts carry
/// `None`; only mouse downs distinguish Primary from Secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
    None,
}

/// One pointer sample in viewport pixels, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: u64,
    pub kind: PointerKind,
    pub button: PointerButton,
    pub position: Vec2,
}

/// Keyboard keys the controllers navigate with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Shift,
    Control,
}

/// Normalized event stream fed to a controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// Wheel movement in notches, positive toward the viewer (dolly out)
    Scroll(f32),
    Key { key: NavKey, pressed: bool },
    /// The host surface lost focus; held state must be dropped
    Blur,
}
