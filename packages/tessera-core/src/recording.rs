//! Capability doubles that record every call, for tests and dry runs.

use crate::geometry::{IVec2, Rgb};
use crate::surface::{SoundOutput, Surface};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Pixel { pos: IVec2, color: Rgb },
    Line { a: IVec2, b: IVec2, color: Rgb },
    Box { min: IVec2, max: IVec2, color: Rgb },
    Triangle { v0: IVec2, v1: IVec2, v2: IVec2, color: Rgb },
}

/// A surface that draws nothing and remembers what it was asked to draw.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_safe_pixel(&mut self, pos: IVec2, color: Rgb) {
        self.calls.push(DrawCall::Pixel { pos, color });
    }

    fn draw_safe_line(&mut self, a: IVec2, b: IVec2, color: Rgb) {
        self.calls.push(DrawCall::Line { a, b, color });
    }

    fn draw_safe_box(&mut self, min: IVec2, max: IVec2, color: Rgb) {
        self.calls.push(DrawCall::Box { min, max, color });
    }

    fn draw_safe_triangle(&mut self, v0: IVec2, v1: IVec2, v2: IVec2, color: Rgb) {
        self.calls.push(DrawCall::Triangle { v0, v1, v2, color });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundCall {
    Load(String),
    Play,
}

/// Sound output whose log is shared between clones, so a test can keep a
/// handle while the tree borrows another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSound {
    pub log: Rc<RefCell<Vec<SoundCall>>>,
    /// Names `load_sound` refuses.
    pub missing: Rc<RefCell<Vec<String>>>,
}

impl RecordingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|c| matches!(c, SoundCall::Play))
            .count()
    }

    pub fn loads(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                SoundCall::Load(name) => Some(name.clone()),
                SoundCall::Play => None,
            })
            .collect()
    }
}

impl SoundOutput for RecordingSound {
    fn load_sound(&mut self, name: &str) -> bool {
        self.log.borrow_mut().push(SoundCall::Load(name.to_owned()));
        !self.missing.borrow().iter().any(|m| m == name)
    }

    fn play_sound(&mut self) {
        self.log.borrow_mut().push(SoundCall::Play);
    }
}
