use crate::element::Element;
use crate::geometry::{IVec2, Vec2, Viewport, clamp_to_pixel, span, translate};
use crate::surface::Surface;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

new_key_type! {
    pub struct LayoutId;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout {0:?} does not belong to this tree")]
    UnknownLayout(LayoutId),
    #[error("no layout named '{0}'")]
    UnknownName(String),
}

/// A rectangular region expressed as fractions of its parent's region.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub s_x: f32,
    pub s_y: f32,
    pub e_x: f32,
    pub e_y: f32,
    pub active: bool,
    pub name: Option<String>,
    /// Set while visibility of this node's target was last decided by a
    /// click, so hover probes leave it alone.
    pub click_toggled: bool,
    pub(crate) start: IVec2,
    pub(crate) end: IVec2,
    pub(crate) elements: Vec<Element>,
    pub(crate) children: SmallVec<[LayoutId; 4]>,
    pub(crate) parent: Option<LayoutId>,
}

impl LayoutNode {
    pub fn new(s_x: f32, s_y: f32, e_x: f32, e_y: f32, active: bool) -> Self {
        Self {
            s_x,
            s_y,
            e_x,
            e_y,
            active,
            name: None,
            click_toggled: false,
            start: IVec2::ZERO,
            end: IVec2::ZERO,
            elements: Vec::new(),
            children: SmallVec::new(),
            parent: None,
        }
    }

    /// A node covering its whole parent.
    pub fn full(active: bool) -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0, active)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element.into());
        self
    }

    pub fn fractions(&self) -> (Vec2, Vec2) {
        (Vec2::new(self.s_x, self.s_y), Vec2::new(self.e_x, self.e_y))
    }

    pub fn start(&self) -> IVec2 {
        self.start
    }

    pub fn end(&self) -> IVec2 {
        self.end
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn children(&self) -> &[LayoutId] {
        &self.children
    }

    pub fn parent(&self) -> Option<LayoutId> {
        self.parent
    }
}

/// Arena holding every layout node of one document.
///
/// The root is created with the tree and always spans the full viewport.
/// Ownership runs root to children; `parent` links are plain ids.
pub struct LayoutTree {
    pub(crate) nodes: SlotMap<LayoutId, LayoutNode>,
    pub(crate) names: FxHashMap<String, LayoutId>,
    root: LayoutId,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::with_root(LayoutNode::full(true))
    }

    /// Builds a tree around `root`, forcing it to span its whole parent and
    /// to be active.
    pub fn with_root(mut root: LayoutNode) -> Self {
        root.s_x = 0.0;
        root.s_y = 0.0;
        root.e_x = 1.0;
        root.e_y = 1.0;
        root.active = true;
        root.parent = None;
        root.children.clear();

        let mut nodes = SlotMap::with_key();
        let name = root.name.clone();
        let id = nodes.insert(root);
        let mut tree = Self {
            nodes,
            names: FxHashMap::default(),
            root: id,
        };
        if let Some(name) = name {
            tree.register_name(name, id);
        }
        tree
    }

    pub fn root(&self) -> LayoutId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: LayoutId) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: LayoutId) -> Option<&mut LayoutNode> {
        self.nodes.get_mut(id)
    }

    pub fn node(&self, id: LayoutId) -> Result<&LayoutNode, LayoutError> {
        self.nodes.get(id).ok_or(LayoutError::UnknownLayout(id))
    }

    fn node_mut(&mut self, id: LayoutId) -> Result<&mut LayoutNode, LayoutError> {
        self.nodes.get_mut(id).ok_or(LayoutError::UnknownLayout(id))
    }

    pub fn add_element(
        &mut self,
        id: LayoutId,
        element: impl Into<Element>,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.elements.push(element.into());
        Ok(())
    }

    /// Attaches `node` as the last child of `parent` and returns its id.
    ///
    /// Any children already listed on `node` are discarded; subtrees are
    /// built by attaching one node at a time.
    pub fn add_nested_layout(
        &mut self,
        parent: LayoutId,
        mut node: LayoutNode,
    ) -> Result<LayoutId, LayoutError> {
        if !self.nodes.contains_key(parent) {
            return Err(LayoutError::UnknownLayout(parent));
        }
        node.parent = Some(parent);
        node.children.clear();
        let name = node.name.clone();

        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        if let Some(name) = name {
            self.register_name(name, id);
        }
        Ok(id)
    }

    fn register_name(&mut self, name: String, id: LayoutId) {
        if let Some(existing) = self.names.get(&name) {
            tracing::warn!(
                "Layout name '{}' already used by {:?}; {:?} is unreachable by name",
                name,
                existing,
                id
            );
            return;
        }
        self.names.insert(name, id);
    }

    pub fn find_by_name(&self, name: &str) -> Option<LayoutId> {
        self.names.get(name).copied()
    }

    pub fn set_active(&mut self, id: LayoutId, active: bool) -> Result<(), LayoutError> {
        self.node_mut(id)?.active = active;
        Ok(())
    }

    pub fn set_active_by_name(&mut self, name: &str, active: bool) -> Result<LayoutId, LayoutError> {
        let id = self
            .find_by_name(name)
            .ok_or_else(|| LayoutError::UnknownName(name.to_owned()))?;
        self.set_active(id, active)?;
        Ok(id)
    }

    pub fn is_active(&self, id: LayoutId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.active)
    }

    pub fn parent(&self, id: LayoutId) -> Option<LayoutId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: LayoutId) -> &[LayoutId] {
        self.nodes.get(id).map_or(&[][..], |n| n.children.as_slice())
    }

    pub fn elements(&self, id: LayoutId) -> &[Element] {
        self.nodes.get(id).map_or(&[][..], |n| n.elements.as_slice())
    }

    /// Resolved `(start, end)` pixel rectangle of a node.
    pub fn bounds(&self, id: LayoutId) -> Option<(IVec2, IVec2)> {
        self.nodes.get(id).map(|n| (n.start, n.end))
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: LayoutId) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent(id);
        while let Some(p) = cursor {
            depth += 1;
            cursor = self.parent(p);
        }
        depth
    }

    /// Positions the whole tree against a screen of the given size.
    pub fn position(&mut self, viewport: Viewport) {
        self.calculate_position(self.root, IVec2::ZERO, viewport.end());
    }

    /// Resolves the fractional rectangle of `id` inside
    /// `[parent_start, parent_end]`, then recurses into every child whether
    /// active or not.
    pub fn calculate_position(&mut self, id: LayoutId, parent_start: IVec2, parent_end: IVec2) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let space = span(parent_start, parent_end);
        let (from, to) = node.fractions();
        node.start = translate(parent_start, clamp_to_pixel((space * from).floor()));
        node.end = translate(parent_start, clamp_to_pixel((space * to).floor()));

        tracing::debug!(
            "Layout {:?} positioned at {:?}..{:?}",
            id,
            node.start,
            node.end
        );

        let (start, end) = (node.start, node.end);
        let children = node.children.clone();
        for child in children {
            self.calculate_position(child, start, end);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.render_node(self.root, surface);
    }

    /// Draws a node's elements, then its children in insertion order.
    /// An inactive node hides its entire subtree.
    pub fn render_node(&self, id: LayoutId, surface: &mut dyn Surface) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.active {
            return;
        }

        for element in &node.elements {
            element.draw(surface, node.start, node.end);
        }

        for &child in &node.children {
            self.render_node(child, surface);
        }
    }

    /// Depth-first, pre-order walk over every node id.
    pub fn walk(&self) -> Vec<LayoutId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}
