use glam::Vec2;

/// Pointer (mouse or touch) position in canvas pixels and button state.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

impl PointerState {
    pub fn pressed_at(pos: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            down: true,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// The pointer the particles should react to this tick: a forced synthetic
/// press wins over the real pointer.
#[inline]
pub fn effective_pointer(real: PointerState, synthetic: Option<PointerState>) -> PointerState {
    match synthetic {
        Some(p) if p.down => p,
        _ => real,
    }
}
