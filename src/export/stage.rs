//! Off-screen template nodes and their reveal/restore cycle

use crate::render::Scene;

/// Style every node is mounted with
pub const HIDDEN_STYLE: &str = "position: absolute; left: -9999px; top: -9999px; visibility: hidden;";

/// Style applied while a node is being captured
pub const VISIBLE_STYLE: &str =
    "position: fixed; top: 0; left: 0; z-index: 9999; visibility: visible; width: 1080px; height: 1920px;";

#[derive(Debug, Clone)]
pub struct TemplateNode {
    id: String,
    style: String,
    scene: Scene,
}

impl TemplateNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

/// Registry of rendered template nodes, keyed by identifier
#[derive(Debug, Default)]
pub struct Stage {
    nodes: Vec<TemplateNode>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount (or re-render) a node; it starts hidden
    pub fn mount(&mut self, id: &str, scene: Scene) {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => node.scene = scene,
            None => self.nodes.push(TemplateNode {
                id: id.to_string(),
                style: HIDDEN_STYLE.to_string(),
                scene,
            }),
        }
    }

    #[cfg(test)]
    pub fn node(&self, id: &str) -> Option<&TemplateNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Make a node visible until the returned guard is dropped
    pub fn reveal(&mut self, id: &str) -> Option<RevealGuard<'_>> {
        let node = self.nodes.iter_mut().find(|n| n.id == id)?;
        let original = std::mem::replace(&mut node.style, VISIBLE_STYLE.to_string());
        Some(RevealGuard { node, original })
    }
}

/// Restores the node's previous style when dropped, on success and failure alike
#[derive(Debug)]
pub struct RevealGuard<'a> {
    node: &'a mut TemplateNode,
    original: String,
}

impl RevealGuard<'_> {
    pub fn node(&self) -> &TemplateNode {
        &*self.node
    }
}

impl Drop for RevealGuard<'_> {
    fn drop(&mut self) {
        self.node.style = std::mem::take(&mut self.original);
    }
}
