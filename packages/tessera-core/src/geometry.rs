pub use glam::{IVec2, UVec2, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color, the only color format a `Surface` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Rounds each authored channel and clamps it into `0..=255`.
    pub fn from_channels(channels: Vec3) -> Self {
        let c = channels.round().clamp(Vec3::ZERO, Vec3::splat(255.0));
        Self::new(c.x as u8, c.y as u8, c.z as u8)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Largest pixel offset a coordinate may resolve to, in either direction.
pub const PIXEL_LIMIT: i32 = 1 << 24;

/// Clamps a float pixel position into `±PIXEL_LIMIT`.
pub fn clamp_to_pixel(v: Vec2) -> IVec2 {
    let limit = Vec2::splat(PIXEL_LIMIT as f32);
    v.clamp(-limit, limit).as_ivec2()
}

pub fn round_to_pixel(v: Vec2) -> IVec2 {
    clamp_to_pixel(v.round())
}

/// `origin + offset`, saturating at the `i32` bounds.
pub fn translate(origin: IVec2, offset: IVec2) -> IVec2 {
    IVec2::new(
        origin.x.saturating_add(offset.x),
        origin.y.saturating_add(offset.y),
    )
}

/// `end - start` as floats, computed without overflowing.
pub fn span(start: IVec2, end: IVec2) -> Vec2 {
    Vec2::new(
        (end.x as i64 - start.x as i64) as f32,
        (end.y as i64 - start.y as i64) as f32,
    )
}

/// Inclusive containment in the rectangle spanned by `min` and `max`.
pub fn within(point: IVec2, min: IVec2, max: IVec2) -> bool {
    point.cmpge(min).all() && point.cmple(max).all()
}

/// Screen size the root layout is positioned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn end(&self) -> IVec2 {
        UVec2::new(self.width, self.height).as_ivec2()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}
