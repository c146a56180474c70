use crate::input::{PointerButton, PointerEvent, PointerKind};
use glam::Vec2;

/// What the active pointer gesture is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    None,
    Rotate,
    Pan,
    TouchRotate,
    TouchPan,
}

/// A drag increment attributed to the current gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    pub state: InteractionState,
    pub delta: Vec2,
}

/// Pointer registry plus the gesture state machine. Derives incremental
/// drag deltas against a reference point that follows the gesture; with two
/// touch contacts the reference is their midpoint.
#[derive(Debug, Default)]
pub struct PointerTracker {
    state: InteractionState,
    pointers: Vec<(u64, Vec2)>,
    reference: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        match self.pointers.iter_mut().find(|(id, _)| *id == event.id) {
            Some((_, pos)) => *pos = event.position,
            None => self.pointers.push((event.id, event.position)),
        }

        match event.kind {
            PointerKind::Mouse => {
                self.state = match event.button {
                    PointerButton::Primary => InteractionState::Pan,
                    PointerButton::Secondary => InteractionState::Rotate,
                    _ => InteractionState::None,
                };
                self.reference = Some(event.position);
            }
            PointerKind::Touch => self.derive_touch_state(),
        }
    }

    /// Record a pointer move. Returns the drag increment while a gesture is
    /// active; hover moves and unknown pointers yield nothing.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<DragMove> {
        let known = self
            .pointers
            .iter_mut()
            .find(|(id, _)| *id == event.id)
            .map(|(_, pos)| *pos = event.position)
            .is_some();
        if !known || self.state == InteractionState::None {
            return None;
        }

        let current = self.gesture_point()?;
        let reference = self.reference.unwrap_or(current);
        self.reference = Some(current);

        Some(DragMove {
            state: self.state,
            delta: current - reference,
        })
    }

    pub fn pointer_up(&mut self, event: PointerEvent) {
        self.pointers.retain(|(id, _)| *id != event.id);

        if self.pointers.is_empty() {
            self.state = InteractionState::None;
            self.reference = None;
        } else {
            // Losing one of two contacts demotes the gesture; the reference
            // re-derives from what remains so the next move does not jump
            self.derive_touch_state();
        }
    }

    /// Drop all held pointer state, e.g. on focus loss or disconnect
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.state = InteractionState::None;
        self.reference = None;
    }

    fn derive_touch_state(&mut self) {
        self.state = match self.pointers.len() {
            1 => InteractionState::TouchPan,
            2 => InteractionState::TouchRotate,
            _ => InteractionState::None,
        };
        self.reference = self.gesture_point();
    }

    /// The point a drag is measured against: the lone pointer's position,
    /// or the midpoint of the first two
    fn gesture_point(&self) -> Option<Vec2> {
        match self.pointers.len() {
            0 => None,
            1 => Some(self.pointers[0].1),
            _ => Some((self.pointers[0].1 + self.pointers[1].1) * 0.5),
        }
    }
}
