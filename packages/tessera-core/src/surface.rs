use crate::geometry::{IVec2, Rgb};

/// Drawing capability consumed by the render pass.
///
/// Every primitive is "safe": coordinates that fall outside the surface are
/// dropped by the implementation, never reported back to the caller.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_safe_pixel(&mut self, pos: IVec2, color: Rgb);
    fn draw_safe_line(&mut self, a: IVec2, b: IVec2, color: Rgb);
    fn draw_safe_box(&mut self, min: IVec2, max: IVec2, color: Rgb);
    fn draw_safe_triangle(&mut self, v0: IVec2, v1: IVec2, v2: IVec2, color: Rgb);
}

/// Audio capability owned by the root of the layout tree.
///
/// A single clip is loaded at a time; `play_sound` replaces anything queued
/// with that clip and starts playback immediately.
pub trait SoundOutput {
    fn load_sound(&mut self, name: &str) -> bool;
    fn play_sound(&mut self);
}

impl<S: SoundOutput + ?Sized> SoundOutput for &mut S {
    fn load_sound(&mut self, name: &str) -> bool {
        (**self).load_sound(name)
    }

    fn play_sound(&mut self) {
        (**self).play_sound()
    }
}

/// Sound sink for callers that have no audio device.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundOutput for Silent {
    fn load_sound(&mut self, _name: &str) -> bool {
        false
    }

    fn play_sound(&mut self) {}
}
