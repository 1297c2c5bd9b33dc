/// Logical-pixel extent of the drawable area.
///
/// Shaders build their logical-to-NDC mapping from this, so it is the one
/// size renderers agree on.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
