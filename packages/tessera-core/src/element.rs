use crate::event::Event;
use crate::geometry::{IVec2, Rgb, Vec2, Vec3, round_to_pixel, translate, within};
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Line,
    Box,
    Point,
    Triangle,
    Button,
}

impl ElementKind {
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Box => "box",
            ElementKind::Point => "point",
            ElementKind::Triangle => "triangle",
            ElementKind::Button => "button",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub min: Vec2,
    pub max: Vec2,
    pub color: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: Vec2,
    pub color: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub v0: Vec2,
    pub v1: Vec2,
    pub v2: Vec2,
    pub color: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Vec3,
    pub clicked: bool,
    pub hoverable: bool,
    pub clickable: bool,
    /// Name of the layout this button toggles. `None` addresses the first
    /// nested layout of the node holding the button.
    pub target: Option<String>,
    /// Sound requested when a click is consumed.
    pub sound: Option<String>,
}

/// A drawable, optionally hit-testable shape owned by a layout node.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Line(Line),
    Box(BoxShape),
    Point(Point),
    Triangle(Triangle),
    Button(Button),
}

impl Element {
    pub fn line(start: Vec2, end: Vec2, color: Vec3) -> Self {
        Element::Line(Line { start, end, color })
    }

    pub fn rect(min: Vec2, max: Vec2, color: Vec3) -> Self {
        Element::Box(BoxShape { min, max, color })
    }

    pub fn point(position: Vec2, color: Vec3) -> Self {
        Element::Point(Point { position, color })
    }

    pub fn triangle(v0: Vec2, v1: Vec2, v2: Vec2, color: Vec3) -> Self {
        Element::Triangle(Triangle { v0, v1, v2, color })
    }

    pub fn button(position: Vec2, size: Vec2, color: Vec3) -> Self {
        Element::Button(Button::new(position, size, color))
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Line(_) => ElementKind::Line,
            Element::Box(_) => ElementKind::Box,
            Element::Point(_) => ElementKind::Point,
            Element::Triangle(_) => ElementKind::Triangle,
            Element::Button(_) => ElementKind::Button,
        }
    }

    pub fn color(&self) -> Vec3 {
        match self {
            Element::Line(l) => l.color,
            Element::Box(b) => b.color,
            Element::Point(p) => p.color,
            Element::Triangle(t) => t.color,
            Element::Button(b) => b.color,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }

    /// Draws the element translated into the region `[start, end]`.
    ///
    /// Elements with no logical point inside the region are skipped; anything
    /// finer is left to the surface's own bounds checks.
    pub fn draw(&self, surface: &mut dyn Surface, start: IVec2, end: IVec2) {
        let color = Rgb::from_channels(self.color());
        let place = |v: Vec2| translate(start, round_to_pixel(v));

        match self {
            Element::Line(l) => {
                let (a, b) = (place(l.start), place(l.end));
                if within(a, start, end) || within(b, start, end) {
                    surface.draw_safe_line(a, b, color);
                }
            }
            Element::Box(b) => draw_box(surface, place(b.min), place(b.max), start, end, color),
            Element::Point(p) => {
                let pos = place(p.position);
                if within(pos, start, end) {
                    surface.set_safe_pixel(pos, color);
                }
            }
            Element::Triangle(t) => {
                let (v0, v1, v2) = (place(t.v0), place(t.v1), place(t.v2));
                if [v0, v1, v2].iter().any(|&v| within(v, start, end)) {
                    surface.draw_safe_triangle(v0, v1, v2, color);
                }
            }
            Element::Button(b) => {
                let min = place(b.position);
                let max = place(b.position + b.size);
                draw_box(surface, min, max, start, end, color);
            }
        }
    }

    /// Hit test against a point in the element's own (layout-local) frame.
    pub fn is_inside(&self, point: IVec2) -> bool {
        match self {
            Element::Line(_) => false,
            Element::Box(b) => contains(b.min, b.max, point.as_vec2()),
            Element::Point(p) => round_to_pixel(p.position) == point,
            Element::Triangle(t) => triangle_contains(t.v0, t.v1, t.v2, point.as_vec2()),
            Element::Button(b) => b.is_inside(point),
        }
    }
}

impl Button {
    pub fn new(position: Vec2, size: Vec2, color: Vec3) -> Self {
        Self {
            position,
            size,
            color,
            clicked: false,
            hoverable: true,
            clickable: true,
            target: None,
            sound: None,
        }
    }

    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }

    pub fn with_sound(mut self, name: impl Into<String>) -> Self {
        self.sound = Some(name.into());
        self
    }

    pub fn with_flags(mut self, hoverable: bool, clickable: bool) -> Self {
        self.hoverable = hoverable;
        self.clickable = clickable;
        self
    }

    pub fn is_inside(&self, point: IVec2) -> bool {
        contains(self.position, self.position + self.size, point.as_vec2())
    }

    /// Toggles `clicked` when a click lands on a clickable button.
    /// Returns true when the click was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Click { pos } if self.clickable && self.is_inside(*pos) => {
                self.clicked = !self.clicked;
                true
            }
            _ => false,
        }
    }

    pub fn handle_hover(&self, event: &Event) -> bool {
        match event {
            Event::Show { pos } => self.hoverable && self.is_inside(*pos),
            _ => false,
        }
    }
}

impl From<Button> for Element {
    fn from(button: Button) -> Self {
        Element::Button(button)
    }
}

fn draw_box(
    surface: &mut dyn Surface,
    min: IVec2,
    max: IVec2,
    start: IVec2,
    end: IVec2,
    color: Rgb,
) {
    if within(min, start, end) || within(max, start, end) {
        surface.draw_safe_box(min, max, color);
    }
}

fn contains(min: Vec2, max: Vec2, p: Vec2) -> bool {
    p.cmpge(min).all() && p.cmple(max).all()
}

fn triangle_contains(v0: Vec2, v1: Vec2, v2: Vec2, p: Vec2) -> bool {
    let edge = |a: Vec2, b: Vec2| (p - a).perp_dot(b - a);
    let (d0, d1, d2) = (edge(v0, v1), edge(v1, v2), edge(v2, v0));

    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}
