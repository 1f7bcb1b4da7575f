use crate::element::ElementKind;
use crate::layout::{LayoutId, LayoutTree};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub name: Option<String>,
    pub fractions: [f32; 4],
    pub active: bool,
    pub click_toggled: bool,
    pub start: [i32; 2],
    pub end: [i32; 2],
    pub elements: Vec<ElementKind>,
    pub children: Vec<LayoutSnapshot>,
}

impl LayoutTree {
    /// Serializable picture of the tree, as last positioned.
    pub fn snapshot(&self) -> Option<LayoutSnapshot> {
        self.snapshot_node(self.root())
    }

    pub fn snapshot_node(&self, id: LayoutId) -> Option<LayoutSnapshot> {
        let node = self.get(id)?;
        Some(LayoutSnapshot {
            name: node.name.clone(),
            fractions: [node.s_x, node.s_y, node.e_x, node.e_y],
            active: node.active,
            click_toggled: node.click_toggled,
            start: node.start().to_array(),
            end: node.end().to_array(),
            elements: node.elements().iter().map(|e| e.kind()).collect(),
            children: node
                .children()
                .iter()
                .filter_map(|&child| self.snapshot_node(child))
                .collect(),
        })
    }
}
