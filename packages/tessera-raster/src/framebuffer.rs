use crate::error::RasterError;
use image::{Rgb as Pixel, RgbImage};
use std::path::Path;
use tessera_core::{IVec2, Rgb, Surface};

/// An in-memory RGB surface that can be written out as an image file.
pub struct Framebuffer {
    image: RgbImage,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn clear(&mut self, color: Rgb) {
        let fill = Pixel(color.to_array());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.image.width()
            && (pos.y as u32) < self.image.height()
    }

    pub fn pixel(&self, pos: IVec2) -> Option<Rgb> {
        if !self.contains(pos) {
            return None;
        }
        let [r, g, b] = self.image.get_pixel(pos.x as u32, pos.y as u32).0;
        Some(Rgb::new(r, g, b))
    }

    /// Number of pixels currently equal to `color`.
    pub fn count(&self, color: Rgb) -> usize {
        let wanted = color.to_array();
        self.image.pixels().filter(|p| p.0 == wanted).count()
    }

    /// Writes the buffer to `path`, picking the format from its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        let path = path.as_ref();
        self.image.save(path).map_err(|source| RasterError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "Saved {}x{} frame to {:?}",
            self.image.width(),
            self.image.height(),
            path
        );
        Ok(())
    }
}

impl Surface for Framebuffer {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn set_safe_pixel(&mut self, pos: IVec2, color: Rgb) {
        if self.contains(pos) {
            self.image
                .put_pixel(pos.x as u32, pos.y as u32, Pixel(color.to_array()));
        }
    }

    /// Bresenham, walked from an endpoint on the surface and stopped as soon
    /// as it steps off it.
    fn draw_safe_line(&mut self, a: IVec2, b: IVec2, color: Rgb) {
        let (from, to) = match (self.contains(a), self.contains(b)) {
            (true, _) => (a, b),
            (false, true) => (b, a),
            (false, false) => {
                tracing::debug!("Line {:?}..{:?} has no endpoint on the surface", a, b);
                return;
            }
        };

        let (x1, y1) = (to.x as i64, to.y as i64);
        let (mut x, mut y) = (from.x as i64, from.y as i64);
        let (dx, dy) = ((x1 - x).abs(), (y1 - y).abs());
        let (sx, sy) = (if x < x1 { 1 } else { -1 }, if y < y1 { 1 } else { -1 });
        let mut err = dx - dy;
        loop {
            // x and y stay between the endpoints, so they fit back into i32.
            let at = IVec2::new(x as i32, y as i32);
            if !self.contains(at) {
                break;
            }
            self.set_safe_pixel(at, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fills `[min, max]` inclusively. Boxes reaching off the surface are
    /// skipped outright.
    fn draw_safe_box(&mut self, min: IVec2, max: IVec2, color: Rgb) {
        let (lo, hi) = (min.min(max), min.max(max));
        if !self.contains(lo) || !self.contains(hi) {
            tracing::warn!("Box {:?}..{:?} leaves the surface, skipping", min, max);
            return;
        }

        let fill = Pixel(color.to_array());
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                self.image.put_pixel(x as u32, y as u32, fill);
            }
        }
    }

    fn draw_safe_triangle(&mut self, v0: IVec2, v1: IVec2, v2: IVec2, color: Rgb) {
        let surface_max = IVec2::new(
            self.image.width() as i32 - 1,
            self.image.height() as i32 - 1,
        );
        let lo = v0.min(v1).min(v2).max(IVec2::ZERO);
        let hi = v0.max(v1).max(v2).min(surface_max);

        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                let p = IVec2::new(x, y);
                if inside_triangle(p, v0, v1, v2) {
                    self.set_safe_pixel(p, color);
                }
            }
        }
    }
}

/// Same-sign test over the three edge cross products; edges count as inside.
fn inside_triangle(p: IVec2, v0: IVec2, v1: IVec2, v2: IVec2) -> bool {
    let edge = |a: IVec2, b: IVec2| -> i64 {
        let (pa, ba) = (p - a, b - a);
        pa.x as i64 * ba.y as i64 - pa.y as i64 * ba.x as i64
    };
    let (d0, d1, d2) = (edge(v0, v1), edge(v1, v2), edge(v2, v0));

    let has_neg = d0 < 0 || d1 < 0 || d2 < 0;
    let has_pos = d0 > 0 || d1 > 0 || d2 > 0;
    !(has_neg && has_pos)
}
