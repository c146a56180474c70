use crate::input::NavKey;
use std::collections::HashSet;

/// Signed navigation signals derived from the held key set. Axis values are
/// -1, 0 or 1 before the controller applies its own step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavSignals {
    /// ArrowRight minus ArrowLeft
    pub left_right: f32,
    /// ArrowUp minus ArrowDown
    pub up_down: f32,
    /// PageUp minus PageDown
    pub page: f32,
    pub shift: bool,
    pub control: bool,
}

impl NavSignals {
    pub fn is_zero(&self) -> bool {
        self.left_right == 0.0 && self.up_down == 0.0 && self.page == 0.0
    }
}

/// Currently held navigation keys, polled by the repeat tick
#[derive(Debug, Default)]
pub struct KeyNavState {
    held: HashSet<NavKey>,
}

impl KeyNavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: NavKey, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn is_down(&self, key: NavKey) -> bool {
        self.held.contains(&key)
    }

    /// Whether any key that produces motion is held. Modifiers alone do not
    /// drive the repeat tick.
    pub fn has_motion(&self) -> bool {
        const MOTION_KEYS: [NavKey; 6] = [
            NavKey::ArrowLeft,
            NavKey::ArrowRight,
            NavKey::ArrowUp,
            NavKey::ArrowDown,
            NavKey::PageUp,
            NavKey::PageDown,
        ];
        MOTION_KEYS.iter().any(|key| self.held.contains(key))
    }

    /// Drop all held keys, e.g. on focus loss or disconnect
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn signals(&self) -> NavSignals {
        let axis = |pos: NavKey, neg: NavKey| -> f32 {
            let mut value = 0.0;
            if self.is_down(pos) {
                value += 1.0;
            }
            if self.is_down(neg) {
                value -= 1.0;
            }
            value
        };

        NavSignals {
            left_right: axis(NavKey::ArrowRight, NavKey::ArrowLeft),
            up_down: axis(NavKey::ArrowUp, NavKey::ArrowDown),
            page: axis(NavKey::PageUp, NavKey::PageDown),
            shift: self.is_down(NavKey::Shift),
            control: self.is_down(NavKey::Control),
        }
    }
}
