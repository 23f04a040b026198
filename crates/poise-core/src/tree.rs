//! Arena-backed scene tree.
//!
//! Ownership runs strictly parent → child through the arena's child lists.
//! The parent pointer is an index, and the "widget parent" of a node is
//! computed on demand (the direct parent, if it is a widget) so it can never
//! go stale after reparenting.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::{
    Node, NodeId, Rect, Settings, Size, TouchDispatcher, TreeError, TreeResult, Vec2,
    WidgetBehavior, WidgetData,
};

pub struct SceneTree {
    pub(crate) arena: SlotMap<NodeId, Node>,
    root: NodeId,
    pub(crate) dispatcher: TouchDispatcher,
    settings: Settings,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let mut arena = SlotMap::with_key();
        let mut root = Node::plain();
        root.content_size = settings.root_size;
        root.running = true;
        let root = arena.insert(root);
        Self {
            arena,
            root,
            dispatcher: TouchDispatcher::new(),
            settings,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn dispatcher(&self) -> &TouchDispatcher {
        &self.dispatcher
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Resize the scene root and cascade into the widgets directly under it.
    pub fn set_root_size(&mut self, size: Size) {
        let root = self.root;
        self.arena[root].content_size = size;
        log::debug!("root resized to {}x{}", size.width, size.height);
        let children = self.arena[root].children.clone();
        for child in children {
            if self.is_widget(child) {
                self.update_size_and_position(child, size);
            }
        }
    }

    // ------------------------------------------------------------------
    // Creation and lookup
    // ------------------------------------------------------------------

    /// Detached generic scene node.
    pub fn create_node(&mut self) -> NodeId {
        self.arena.insert(Node::plain())
    }

    /// Detached widget driven by `behavior`.
    pub fn create_widget(&mut self, behavior: impl WidgetBehavior) -> NodeId {
        self.create_widget_boxed(Box::new(behavior))
    }

    pub fn create_widget_boxed(&mut self, behavior: Box<dyn WidgetBehavior>) -> NodeId {
        let anchor = self.settings.widget_anchor;
        let id = self.arena.insert(Node::new_widget(WidgetData::new(behavior), anchor));
        // Enter bright/normal so the first focus change has a defined origin.
        self.set_bright_style_internal(id, crate::BrightStyle::Normal);
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn node(&self, id: NodeId) -> TreeResult<&Node> {
        self.arena.get(id).ok_or(TreeError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut Node> {
        self.arena.get_mut(id).ok_or(TreeError::NodeNotFound(id))
    }

    pub fn widget(&self, id: NodeId) -> TreeResult<&WidgetData> {
        self.node(id)?.widget().ok_or(TreeError::NotAWidget(id))
    }

    pub(crate) fn widget_mut(&mut self, id: NodeId) -> TreeResult<&mut WidgetData> {
        self.node_mut(id)?
            .widget_mut()
            .ok_or(TreeError::NotAWidget(id))
    }

    pub fn is_widget(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(Node::is_widget)
    }

    /// Concrete behaviour of a widget, if it is a `T`.
    pub fn behavior<T: WidgetBehavior>(&self, id: NodeId) -> Option<&T> {
        self.widget(id).ok()?.behavior.as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: WidgetBehavior>(&mut self, id: NodeId) -> Option<&mut T> {
        self.widget_mut(id)
            .ok()?
            .behavior
            .as_any_mut()
            .downcast_mut::<T>()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Direct widget children, in insertion order.
    pub fn widget_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_widget(*c))
            .collect()
    }

    /// The direct parent if it is a widget. A plain parent ends the widget
    /// chain even if widgets sit further up.
    pub fn widget_parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.is_widget(*p))
    }

    pub fn child_by_tag(&self, parent: NodeId, tag: i32) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.arena[*c].tag == Some(tag))
    }

    /// First widget child carrying `name`.
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.arena[*c].widget().is_some_and(|w| w.name == name))
    }

    // ------------------------------------------------------------------
    // Attach / detach
    // ------------------------------------------------------------------

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.node(parent)?;
        if child == self.root {
            return Err(TreeError::RootImmovable);
        }
        if self.node(child)?.parent.is_some() {
            return Err(TreeError::AlreadyParented(child));
        }
        let mut cursor = Some(parent);
        while let Some(c) = cursor {
            if c == child {
                return Err(TreeError::WouldCreateCycle { parent, child });
            }
            cursor = self.arena[c].parent;
        }

        self.arena[parent].children.push(child);
        self.arena[child].parent = Some(parent);
        if self.arena[parent].running {
            self.enter(child);
        }
        Ok(())
    }

    pub fn add_child_with(
        &mut self,
        parent: NodeId,
        child: NodeId,
        local_z_order: i32,
        tag: Option<i32>,
    ) -> TreeResult<()> {
        {
            let node = self.node_mut(child)?;
            node.local_z_order = local_z_order;
            node.tag = tag;
        }
        self.add_child(parent, child)
    }

    /// Detach `child` from its parent. State is kept for reattachment; the
    /// touch listener is released if the node was running.
    pub fn remove_from_parent(&mut self, child: NodeId) -> TreeResult<()> {
        if child == self.root {
            return Err(TreeError::RootImmovable);
        }
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        if self.arena[child].running {
            self.exit(child);
        }
        self.arena[parent].children.retain(|c| *c != child);
        self.arena[child].parent = None;
        Ok(())
    }

    /// Detach and drop `id` with its whole subtree.
    pub fn destroy(&mut self, id: NodeId) -> TreeResult<()> {
        if id == self.root {
            return Err(TreeError::RootImmovable);
        }
        self.remove_from_parent(id)?;
        let mut doomed = Vec::new();
        self.collect_subtree(id, &mut doomed);
        for node in doomed {
            self.release_listener(node);
            self.arena.remove(node);
        }
        Ok(())
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.children(id) {
            self.collect_subtree(child, out);
        }
    }

    /// Geometry first, then children, then the listener.
    fn enter(&mut self, id: NodeId) {
        if self.is_widget(id) {
            let reference = self.parent_reference_size(id);
            self.update_size_and_position(id, reference);
        }
        self.arena[id].running = true;
        let children = self.arena[id].children.clone();
        for child in children {
            self.enter(child);
        }
        if self.arena[id].widget().is_some_and(|w| w.touch.touch_enabled) {
            self.acquire_listener(id);
        }
    }

    fn exit(&mut self, id: NodeId) {
        let children = self.arena[id].children.clone();
        for child in children {
            self.exit(child);
        }
        if self.is_widget(id) {
            // A widget leaving mid-touch gets the same abort as a platform cancel.
            self.on_touch_cancelled(id);
            self.release_listener(id);
        }
        self.arena[id].running = false;
    }

    // ------------------------------------------------------------------
    // Generic node properties
    // ------------------------------------------------------------------

    pub fn set_tag(&mut self, id: NodeId, tag: Option<i32>) -> TreeResult<()> {
        self.node_mut(id)?.tag = tag;
        Ok(())
    }

    pub fn set_local_z_order(&mut self, id: NodeId, z: i32) -> TreeResult<()> {
        self.node_mut(id)?.local_z_order = z;
        Ok(())
    }

    pub fn set_anchor(&mut self, id: NodeId, anchor: Vec2) -> TreeResult<()> {
        self.node_mut(id)?.anchor = anchor;
        Ok(())
    }

    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) -> TreeResult<()> {
        self.node_mut(id)?.scale = scale;
        Ok(())
    }

    pub fn set_rotation(&mut self, id: NodeId, radians: f32) -> TreeResult<()> {
        self.node_mut(id)?.rotation = radians;
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> TreeResult<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Content size of a plain node. For a widget this is [`SceneTree::set_size`].
    pub fn set_content_size(&mut self, id: NodeId, size: Size) -> TreeResult<()> {
        if self.is_widget(id) {
            return self.set_size(id, size);
        }
        self.node_mut(id)?.content_size = size;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Children of `id` in paint order: local z ascending, insertion order
    /// among equals.
    pub fn sorted_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut kids: Vec<NodeId> = self.children(id).to_vec();
        kids.sort_by_key(|c| self.arena[*c].local_z_order);
        kids
    }

    /// Depth-first pre-order walk in paint order. Invisible nodes and
    /// disabled widgets are skipped together with their subtrees.
    pub fn visit(&self, id: NodeId, f: &mut impl FnMut(&SceneTree, NodeId, usize)) {
        self.visit_at(id, 0, f);
    }

    fn visit_at(&self, id: NodeId, depth: usize, f: &mut impl FnMut(&SceneTree, NodeId, usize)) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if !node.visible || node.widget().is_some_and(|w| !w.is_enabled()) {
            return;
        }
        f(self, id, depth);
        for child in self.sorted_children(id) {
            self.visit_at(child, depth + 1, f);
        }
    }

    /// Back-to-front paint index of every attached node.
    pub(crate) fn draw_order(&self) -> HashMap<NodeId, usize> {
        let mut order = HashMap::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.insert(id, order.len());
            let mut kids = self.sorted_children(id);
            kids.reverse();
            stack.extend(kids);
        }
        order
    }

    // ------------------------------------------------------------------
    // Space conversion
    // ------------------------------------------------------------------

    /// Root-first chain ending at `id`.
    fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            chain.push(c);
            cursor = self.arena.get(c).and_then(|n| n.parent);
        }
        chain.reverse();
        chain
    }

    /// World point → `id`'s content space (origin at the content box corner).
    pub fn convert_to_node_space(&self, id: NodeId, world: Vec2) -> Vec2 {
        self.lineage(id).into_iter().fold(world, |p, n| {
            let node = &self.arena[n];
            node.local_transform().invert_point(p) + node.anchor_in_points()
        })
    }

    pub fn convert_to_world_space(&self, id: NodeId, local: Vec2) -> Vec2 {
        self.lineage(id).into_iter().rev().fold(local, |p, n| {
            let node = &self.arena[n];
            node.local_transform()
                .apply_to_point(p - node.anchor_in_points())
        })
    }

    /// World position of the anchor point.
    pub fn world_position(&self, id: NodeId) -> Vec2 {
        let anchor = self
            .arena
            .get(id)
            .map(Node::anchor_in_points)
            .unwrap_or_default();
        self.convert_to_world_space(id, anchor)
    }

    /// Is `world` inside `id`'s content box?
    pub fn hit_test(&self, id: NodeId, world: Vec2) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        let local = self.convert_to_node_space(id, world);
        Rect::from_size(node.content_size).contains(local)
    }
}
