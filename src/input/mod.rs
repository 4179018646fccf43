// Pointer input: positions, modifier state, and the event shape the selection engine consumes.

pub mod mouse;
pub mod promotion;
pub mod selection;

use winit::dpi::PhysicalPosition;
use winit::keyboard::ModifiersState;

/// A 2D position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Modifier keys held when a pointer event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    /// Whether a gesture started with these modifiers unions into the prior selection.
    /// Ctrl, Cmd/Super and Shift all count; Alt does not.
    pub fn is_additive(&self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            ctrl: state.control_key(),
            meta: state.super_key(),
            shift: state.shift_key(),
            alt: state.alt_key(),
        }
    }
}

/// A pointer event in client (window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub client: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self {
            client: Point::new(x, y),
            modifiers,
        }
    }

    /// Build from a winit cursor position and the current modifier state.
    pub fn from_cursor(position: PhysicalPosition<f64>, modifiers: ModifiersState) -> Self {
        Self::new(position.x as f32, position.y as f32, modifiers.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn ctrl_meta_shift_are_additive() {
        assert!(Modifiers::from(ModifiersState::CONTROL).is_additive());
        assert!(Modifiers::from(ModifiersState::SUPER).is_additive());
        assert!(Modifiers::from(ModifiersState::SHIFT).is_additive());
    }

    #[test]
    fn alt_alone_is_not_additive() {
        assert!(!Modifiers::from(ModifiersState::ALT).is_additive());
        assert!(!Modifiers::from(ModifiersState::empty()).is_additive());
    }

    #[test]
    fn from_cursor_converts_position_and_modifiers() {
        let ev =
            PointerEvent::from_cursor(PhysicalPosition::new(12.5, 40.0), ModifiersState::SHIFT);
        assert_eq!(ev.client, Point::new(12.5, 40.0));
        assert!(ev.modifiers.shift);
    }
}
