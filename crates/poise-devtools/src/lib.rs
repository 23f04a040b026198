use std::fmt::Write as _;

use poise_core::{NodeId, SceneTree, Vec2, WidgetFlags};

/// One line per visited node, indented by depth. Disabled widgets and
/// invisible nodes are left out along with their subtrees.
pub fn dump_tree(tree: &SceneTree, root: NodeId) -> String {
    let mut lines = Vec::new();
    tree.visit(root, &mut |tree, id, depth| {
        lines.push(format!("{}{}", "  ".repeat(depth), describe(tree, id)));
    });
    lines.join("\n")
}

/// Single-line summary of one node.
pub fn describe(tree: &SceneTree, id: NodeId) -> String {
    let Some(node) = tree.get(id) else {
        return format!("<gone {id:?}>");
    };
    let mut out = String::new();
    match node.widget() {
        Some(w) => out.push_str(w.behavior().description()),
        None => out.push_str("Node"),
    }
    if let Some(tag) = node.tag {
        let _ = write!(out, "#{tag}");
    }
    let size = node.content_size();
    let pos = node.position();
    let _ = write!(out, " {}x{} @ ({}, {})", size.width, size.height, pos.x, pos.y);
    if let Some(w) = node.widget() {
        if w.is_touch_enabled() {
            out.push_str(" touch");
        }
        if w.is_focused() {
            out.push_str(" focused");
        }
        if w.flags().contains(WidgetFlags::GREY) {
            out.push_str(" grey");
        }
    }
    out
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    pub nodes: usize,
    pub widgets: usize,
    pub listeners: usize,
    pub focused: usize,
}

impl Metrics {
    pub fn collect(tree: &SceneTree) -> Self {
        let mut m = Metrics {
            nodes: tree.len(),
            listeners: tree.dispatcher().len(),
            ..Metrics::default()
        };
        tree.visit(tree.root(), &mut |tree, id, _| {
            if tree.is_widget(id) {
                m.widgets += 1;
            }
            if tree.is_focused(id) {
                m.focused += 1;
            }
        });
        m
    }
}

pub struct Hud {
    pub inspector_enabled: bool,
    pub hovered: Option<NodeId>,
    frame_count: u64,
    pub metrics: Option<Metrics>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            hovered: None,
            frame_count: 0,
            metrics: None,
        }
    }
    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
    }
    pub fn set_hovered(&mut self, id: Option<NodeId>) {
        self.hovered = id;
    }

    /// Status lines for the current frame.
    pub fn overlay(&mut self, tree: &SceneTree) -> Vec<String> {
        self.frame_count += 1;
        let metrics = Metrics::collect(tree);
        let mut lines = vec![
            format!("frame: {}", self.frame_count),
            format!(
                "nodes: {}  |  widgets: {}  |  listeners: {}",
                metrics.nodes, metrics.widgets, metrics.listeners
            ),
        ];
        if let Some(id) = self.hovered {
            lines.push(format!("hovered: {}", describe(tree, id)));
        }
        self.metrics = Some(metrics);
        lines
    }
}

pub struct Inspector {
    pub hud: Hud,
}
impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }

    pub fn frame(&mut self, tree: &SceneTree) -> Option<Vec<String>> {
        if !self.hud.inspector_enabled {
            return None;
        }
        Some(self.hud.overlay(tree))
    }

    /// Front-most visited widget whose content box contains `world`.
    pub fn pick(&mut self, tree: &SceneTree, world: Vec2) -> Option<NodeId> {
        let mut hit = None;
        tree.visit(tree.root(), &mut |tree, id, _| {
            if tree.is_widget(id) && tree.hit_test(id, world) {
                hit = Some(id);
            }
        });
        log::trace!("inspector pick at {world:?}: {hit:?}");
        self.hud.set_hovered(hit);
        hit
    }
}
