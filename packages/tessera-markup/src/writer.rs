use crate::error::MarkupError;
use std::path::Path;
use tessera_core::{Element, LayoutId, LayoutTree, Vec2, Vec3};

const INDENT: &str = "    ";

/// Serialises a tree back into markup that [`parse`](crate::parse) accepts.
///
/// Output is value-equivalent to the input it was read from, not
/// byte-identical: every field is written out explicitly and leaf values are
/// grouped in `<vec2>`/`<vec3>` wrappers.
pub fn write(tree: &LayoutTree) -> String {
    let mut writer = Writer::default();
    writer.layout(tree, tree.root());
    writer.out
}

pub fn write_file(tree: &LayoutTree, path: impl AsRef<Path>) -> Result<(), MarkupError> {
    let path = path.as_ref();
    std::fs::write(path, write(tree)).map_err(|source| MarkupError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Default)]
struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.line(&format!("<{}>", tag));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    fn leaf(&mut self, tag: &str, value: impl std::fmt::Display) {
        self.line(&format!("<{tag}>{value}</{tag}>"));
    }

    fn vec2(&mut self, v: Vec2) {
        self.line(&format!("<vec2><x>{}</x><y>{}</y></vec2>", v.x, v.y));
    }

    fn vec3(&mut self, v: Vec3) {
        self.line(&format!(
            "<vec3><x>{}</x><y>{}</y><z>{}</z></vec3>",
            v.x, v.y, v.z
        ));
    }

    fn layout(&mut self, tree: &LayoutTree, id: LayoutId) {
        let Some(node) = tree.get(id) else {
            return;
        };

        self.line(&format!("<layout active=\"{}\">", node.active));
        self.depth += 1;
        if let Some(name) = &node.name {
            self.leaf("name", name);
        }
        self.leaf("sX", node.s_x);
        self.leaf("sY", node.s_y);
        self.leaf("eX", node.e_x);
        self.leaf("eY", node.e_y);
        if node.click_toggled {
            self.leaf("latched", true);
        }

        for element in node.elements() {
            self.element(element);
        }
        for &child in node.children() {
            self.layout(tree, child);
        }
        self.close("layout");
    }

    fn element(&mut self, element: &Element) {
        let tag = element.kind().tag();
        self.open(tag);
        match element {
            Element::Line(l) => {
                self.vec2(l.start);
                self.vec2(l.end);
            }
            Element::Box(b) => {
                self.vec2(b.min);
                self.vec2(b.max);
            }
            Element::Point(p) => self.vec2(p.position),
            Element::Triangle(t) => {
                self.vec2(t.v0);
                self.vec2(t.v1);
                self.vec2(t.v2);
            }
            Element::Button(b) => {
                self.vec2(b.position);
                self.vec2(b.size);
            }
        }
        self.vec3(element.color());

        if let Element::Button(b) = element {
            self.leaf("hoverable", b.hoverable);
            self.leaf("clickable", b.clickable);
            self.leaf("clicked", b.clicked);
            if let Some(target) = &b.target {
                self.leaf("target", target);
            }
            if let Some(sound) = &b.sound {
                self.leaf("sound", sound);
            }
        }
        self.close(tag);
    }
}
