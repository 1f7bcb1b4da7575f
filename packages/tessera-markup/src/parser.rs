use crate::error::MarkupError;
use crate::lexer::{Attrs, Token, TokenKind, tokenize};
use smallvec::SmallVec;
use std::fmt;
use std::path::Path;
use tessera_core::{
    Button, Element, ElementKind, LayoutError, LayoutId, LayoutNode, LayoutTree, Vec2, Vec3,
};

/// Tags that only group leaf values and carry no meaning of their own.
const WRAPPERS: [&str; 4] = ["vec2", "vec3", "ivec2", "ivec3"];

/// A recoverable problem found while reading a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "byte {}: {}", self.offset, self.message)
    }
}

/// A parsed layout tree plus everything that had to be patched up on the way.
pub struct Document {
    pub tree: LayoutTree,
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, MarkupError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| MarkupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes of markup from {:?}", text.len(), path);
    parse(&text)
}

/// Builds a layout tree from markup text.
///
/// The first top-level `<layout>` becomes the root. Malformed numbers read as
/// zero and unknown tags are skipped; both are reported as diagnostics rather
/// than errors. Structural damage (an unclosed or mismatched tag) is fatal.
pub fn parse(text: &str) -> Result<Document, MarkupError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser::new(tokens);

    let root = parser.parse_document()?;
    let mut tree = LayoutTree::with_root(root.node);
    let root_id = tree.root();
    for element in root.elements {
        tree.add_element(root_id, element)?;
    }
    attach(&mut tree, root_id, root.children)?;

    tracing::debug!(
        "Parsed {} layouts with {} diagnostics",
        tree.len(),
        parser.diagnostics.len()
    );
    Ok(Document {
        tree,
        diagnostics: parser.diagnostics,
    })
}

/// A layout read from markup, not yet inserted into a tree. Names are
/// registered on insertion, so a node is only attached once it is complete.
struct Draft {
    node: LayoutNode,
    elements: Vec<Element>,
    children: Vec<Draft>,
}

fn attach(tree: &mut LayoutTree, parent: LayoutId, drafts: Vec<Draft>) -> Result<(), LayoutError> {
    for draft in drafts {
        let id = tree.add_nested_layout(parent, draft.node)?;
        for element in draft.elements {
            tree.add_element(id, element)?;
        }
        attach(tree, id, draft.children)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

/// Leaf values of one shape, in document order.
struct Components {
    values: SmallVec<[(Axis, f32); 12]>,
    cursor: usize,
    offset: usize,
}

impl Components {
    /// Next value on `axis` at or after the cursor.
    fn take(&mut self, axis: Axis, diagnostics: &mut Vec<Diagnostic>) -> f32 {
        let found = self.values[self.cursor..]
            .iter()
            .position(|(a, _)| *a == axis);
        match found {
            Some(skip) => {
                let value = self.values[self.cursor + skip].1;
                self.cursor += skip + 1;
                value
            }
            None => {
                report(
                    diagnostics,
                    self.offset,
                    format!("missing <{}> value, using 0", axis_tag(axis)),
                );
                0.0
            }
        }
    }

    fn vec2(&mut self, diagnostics: &mut Vec<Diagnostic>) -> Vec2 {
        let x = self.take(Axis::X, diagnostics);
        let y = self.take(Axis::Y, diagnostics);
        Vec2::new(x, y)
    }

    fn vec3(&mut self, diagnostics: &mut Vec<Diagnostic>) -> Vec3 {
        let x = self.take(Axis::X, diagnostics);
        let y = self.take(Axis::Y, diagnostics);
        let z = self.take(Axis::Z, diagnostics);
        Vec3::new(x, y, z)
    }
}

fn axis_tag(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "x",
        Axis::Y => "y",
        Axis::Z => "z",
    }
}

#[derive(Default)]
struct ButtonExtras {
    hoverable: Option<bool>,
    clickable: Option<bool>,
    clicked: bool,
    target: Option<String>,
    sound: Option<String>,
}

fn report(diagnostics: &mut Vec<Diagnostic>, offset: usize, message: String) {
    tracing::warn!("Markup at byte {}: {}", offset, message);
    diagnostics.push(Diagnostic { offset, message });
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        let tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| match &t.kind {
                TokenKind::Open { name, .. } | TokenKind::Close { name } => {
                    !WRAPPERS.contains(&name.as_str())
                }
                TokenKind::Text(_) => true,
            })
            .collect();
        Self {
            tokens: tokens.into_iter(),
            diagnostics: Vec::new(),
        }
    }

    fn warn(&mut self, offset: usize, message: String) {
        report(&mut self.diagnostics, offset, message);
    }

    fn parse_document(&mut self) -> Result<Draft, MarkupError> {
        let mut root = None;

        while let Some(token) = self.tokens.next() {
            match token.kind {
                TokenKind::Open { name, attrs } if name == "layout" && root.is_none() => {
                    root = Some(self.parse_layout(&attrs, token.offset)?);
                }
                TokenKind::Open { name, .. } => {
                    self.warn(token.offset, format!("ignoring top-level <{}>", name));
                    self.skip_subtree(&name, token.offset)?;
                }
                TokenKind::Close { name } => {
                    self.warn(token.offset, format!("stray </{}>", name));
                }
                TokenKind::Text(_) => {
                    self.warn(token.offset, "ignoring text outside <layout>".to_owned());
                }
            }
        }

        let root = root.ok_or(MarkupError::MissingRoot)?;
        let (from, to) = root.node.fractions();
        if from != Vec2::ZERO || to != Vec2::ONE {
            self.warn(0, "root layout always spans the viewport".to_owned());
        }
        Ok(root)
    }

    /// Reads everything up to the `</layout>` matching the open tag at `offset`.
    fn parse_layout(&mut self, attrs: &Attrs, offset: usize) -> Result<Draft, MarkupError> {
        let mut draft = Draft {
            node: LayoutNode::full(false),
            elements: Vec::new(),
            children: Vec::new(),
        };
        for (key, value) in attrs {
            match key.as_str() {
                "active" => draft.node.active = self.read_bool(value, false, offset),
                "name" => draft.node.name = Some(value.clone()),
                _ => self.warn(offset, format!("unknown layout attribute '{}'", key)),
            }
        }

        loop {
            let Some(token) = self.tokens.next() else {
                return Err(MarkupError::unclosed("layout", offset));
            };
            let at = token.offset;

            match token.kind {
                TokenKind::Close { name } if name == "layout" => return Ok(draft),
                TokenKind::Close { name } => {
                    return Err(MarkupError::mismatched("layout", &name, at));
                }
                TokenKind::Text(text) => match squeeze(&text).strip_prefix("active=") {
                    Some(value) => {
                        draft.node.active = self.read_bool(value.trim_matches('"'), false, at)
                    }
                    None => self.warn(at, format!("ignoring text '{}' in <layout>", text)),
                },
                TokenKind::Open { name, attrs } => match name.as_str() {
                    "layout" => {
                        let child = self.parse_layout(&attrs, at)?;
                        draft.children.push(child);
                    }
                    "sX" => draft.node.s_x = self.read_number(&name, at)?,
                    "sY" => draft.node.s_y = self.read_number(&name, at)?,
                    "eX" => draft.node.e_x = self.read_number(&name, at)?,
                    "eY" => draft.node.e_y = self.read_number(&name, at)?,
                    "active" => {
                        let text = self.read_leaf(&name, at)?;
                        draft.node.active = self.read_bool(&text, false, at);
                    }
                    "latched" => {
                        let text = self.read_leaf(&name, at)?;
                        draft.node.click_toggled = self.read_bool(&text, false, at);
                    }
                    "name" => {
                        let text = self.read_leaf(&name, at)?;
                        draft.node.name = Some(text);
                    }
                    _ => match shape_kind(&name) {
                        Some(kind) => {
                            let element = self.parse_shape(kind, at)?;
                            draft.elements.push(element);
                        }
                        None => {
                            self.warn(at, format!("unknown tag <{}> skipped", name));
                            self.skip_subtree(&name, at)?;
                        }
                    },
                },
            }
        }
    }

    /// Collects leaf values up to `</kind>` and assembles the element from
    /// them in the fixed order the shape expects.
    fn parse_shape(&mut self, kind: ElementKind, offset: usize) -> Result<Element, MarkupError> {
        let tag = kind.tag();
        let mut values = Components {
            values: SmallVec::new(),
            cursor: 0,
            offset,
        };
        let mut extras = ButtonExtras::default();

        loop {
            let Some(token) = self.tokens.next() else {
                return Err(MarkupError::unclosed(tag, offset));
            };
            let at = token.offset;

            match token.kind {
                TokenKind::Close { name } if name == tag => break,
                TokenKind::Close { name } => {
                    return Err(MarkupError::mismatched(tag, &name, at));
                }
                TokenKind::Text(text) => {
                    self.warn(at, format!("ignoring text '{}' in <{}>", text, tag));
                }
                TokenKind::Open { name, .. } => {
                    let axis = match name.as_str() {
                        "x" => Some(Axis::X),
                        "y" => Some(Axis::Y),
                        "z" => Some(Axis::Z),
                        _ => None,
                    };
                    if let Some(axis) = axis {
                        let value = self.read_number(&name, at)?;
                        values.values.push((axis, value));
                        continue;
                    }

                    match name.as_str() {
                        "hoverable" | "clickable" | "clicked" | "target" | "sound"
                            if kind == ElementKind::Button =>
                        {
                            let text = self.read_leaf(&name, at)?;
                            match name.as_str() {
                                "hoverable" => {
                                    extras.hoverable = Some(self.read_bool(&text, true, at))
                                }
                                "clickable" => {
                                    extras.clickable = Some(self.read_bool(&text, true, at))
                                }
                                "clicked" => extras.clicked = self.read_bool(&text, false, at),
                                "target" => extras.target = Some(text),
                                _ => extras.sound = Some(text),
                            }
                        }
                        _ => {
                            self.warn(at, format!("unknown tag <{}> in <{}> skipped", name, tag));
                            self.skip_subtree(&name, at)?;
                        }
                    }
                }
            }
        }

        let d = &mut self.diagnostics;
        let element = match kind {
            ElementKind::Box => {
                let min = values.vec2(d);
                let max = values.vec2(d);
                Element::rect(min, max, values.vec3(d))
            }
            ElementKind::Line => {
                let start = values.vec2(d);
                let end = values.vec2(d);
                Element::line(start, end, values.vec3(d))
            }
            ElementKind::Point => {
                let position = values.vec2(d);
                Element::point(position, values.vec3(d))
            }
            ElementKind::Triangle => {
                let v0 = values.vec2(d);
                let v1 = values.vec2(d);
                let v2 = values.vec2(d);
                Element::triangle(v0, v1, v2, values.vec3(d))
            }
            ElementKind::Button => {
                let position = values.vec2(d);
                let size = values.vec2(d);
                let mut button = Button::new(position, size, values.vec3(d)).with_flags(
                    extras.hoverable.unwrap_or(true),
                    extras.clickable.unwrap_or(true),
                );
                button.clicked = extras.clicked;
                button.target = extras.target;
                button.sound = extras.sound;
                Element::Button(button)
            }
        };

        if values.cursor < values.values.len() {
            self.warn(
                offset,
                format!(
                    "{} unused values in <{}>",
                    values.values.len() - values.cursor,
                    tag
                ),
            );
        }
        Ok(element)
    }

    /// Text content of a leaf tag, up to its closing tag.
    fn read_leaf(&mut self, tag: &str, offset: usize) -> Result<String, MarkupError> {
        let mut text = String::new();
        loop {
            let Some(token) = self.tokens.next() else {
                return Err(MarkupError::unclosed(tag, offset));
            };
            match token.kind {
                TokenKind::Text(t) => text.push_str(&t),
                TokenKind::Close { name } if name == tag => return Ok(text),
                TokenKind::Close { name } => {
                    return Err(MarkupError::mismatched(tag, &name, token.offset));
                }
                TokenKind::Open { name, .. } => {
                    self.warn(token.offset, format!("unexpected <{}> inside <{}>", name, tag));
                    self.skip_subtree(&name, token.offset)?;
                }
            }
        }
    }

    fn read_number(&mut self, tag: &str, offset: usize) -> Result<f32, MarkupError> {
        let text = squeeze(&self.read_leaf(tag, offset)?);
        match text.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => {
                self.warn(offset, format!("<{}> value '{}' is not a finite number, using 0", tag, text));
                Ok(0.0)
            }
        }
    }

    fn read_bool(&mut self, text: &str, default: bool, offset: usize) -> bool {
        match squeeze(text).as_str() {
            "true" => true,
            "false" => false,
            other => {
                self.warn(
                    offset,
                    format!("'{}' is not true or false, using {}", other, default),
                );
                default
            }
        }
    }

    /// Discards tokens up to and including the close tag matching the open
    /// tag `tag` that was just consumed.
    fn skip_subtree(&mut self, tag: &str, offset: usize) -> Result<(), MarkupError> {
        let mut depth = 1usize;
        while let Some(token) = self.tokens.next() {
            match token.kind {
                TokenKind::Open { .. } => depth += 1,
                TokenKind::Close { name } => {
                    depth -= 1;
                    if depth == 0 {
                        return if name == tag {
                            Ok(())
                        } else {
                            Err(MarkupError::mismatched(tag, &name, token.offset))
                        };
                    }
                }
                TokenKind::Text(_) => {}
            }
        }
        Err(MarkupError::unclosed(tag, offset))
    }
}

/// Drops all whitespace, so `0. 5` reads as `0.5`.
fn squeeze(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn shape_kind(tag: &str) -> Option<ElementKind> {
    match tag {
        "box" => Some(ElementKind::Box),
        "line" => Some(ElementKind::Line),
        "point" => Some(ElementKind::Point),
        "triangle" => Some(ElementKind::Triangle),
        "button" => Some(ElementKind::Button),
        _ => None,
    }
}
