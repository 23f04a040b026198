//! Size and position resolution of widgets and the top-down cascade.
//!
//! Every size mutator ends in [`SceneTree::on_size_changed`], which applies
//! the resolved size to the content box and then re-resolves every widget
//! child against it. Each level depends only on its parent's already
//! resolved size, so one depth-first pass settles the whole subtree.

use crate::resolver::{derive_percent, derive_percent_from_absolute, resolve_position, resolve_size};
use crate::{NodeId, PositionMode, SceneTree, Size, SizeMode, TreeResult, Vec2, WidgetGeometry};

impl SceneTree {
    /// Reference size a widget resolves against: its widget parent's size,
    /// else the generic parent's content size, else zero for a detached node.
    pub fn parent_reference_size(&self, id: NodeId) -> Size {
        if let Some(wp) = self.widget_parent(id) {
            return self.arena[wp].widget().map(|w| w.size()).unwrap_or_default();
        }
        self.parent(id)
            .map(|p| self.arena[p].content_size)
            .unwrap_or_default()
    }

    pub fn geometry(&self, id: NodeId) -> TreeResult<&WidgetGeometry> {
        Ok(&self.widget(id)?.geometry)
    }

    /// Resolved size of a widget.
    pub fn size(&self, id: NodeId) -> TreeResult<Size> {
        Ok(self.widget(id)?.geometry.size)
    }

    pub fn custom_size(&self, id: NodeId) -> TreeResult<Size> {
        Ok(self.widget(id)?.geometry.custom_size)
    }

    pub fn size_percent(&self, id: NodeId) -> TreeResult<Vec2> {
        Ok(self.widget(id)?.geometry.size_percent)
    }

    pub fn position(&self, id: NodeId) -> TreeResult<Vec2> {
        Ok(self.node(id)?.position)
    }

    pub fn position_percent(&self, id: NodeId) -> TreeResult<Vec2> {
        Ok(self.widget(id)?.geometry.position_percent)
    }

    pub fn set_size(&mut self, id: NodeId, size: Size) -> TreeResult<()> {
        let running = self.node(id)?.running;
        let reference = self.parent_reference_size(id);
        let g = &mut self.widget_mut(id)?.geometry;
        g.custom_size = size;
        g.size = if g.ignore_intrinsic_size {
            g.intrinsic_size
        } else {
            size
        };
        if running {
            g.size_percent = derive_percent_from_absolute(size, reference);
        }
        self.on_size_changed(id);
        Ok(())
    }

    pub fn set_size_percent(&mut self, id: NodeId, percent: Vec2) -> TreeResult<()> {
        let running = self.node(id)?.running;
        let reference = self.parent_reference_size(id);
        let g = &mut self.widget_mut(id)?.geometry;
        g.size_percent = percent;
        if running {
            g.custom_size = reference.scale_by(percent);
        }
        g.size = if g.ignore_intrinsic_size {
            g.intrinsic_size
        } else {
            g.custom_size
        };
        self.on_size_changed(id);
        Ok(())
    }

    /// Mode switch only; the next mutation or cascade applies it.
    pub fn set_size_mode(&mut self, id: NodeId, mode: SizeMode) -> TreeResult<()> {
        self.widget_mut(id)?.geometry.size_mode = mode;
        Ok(())
    }

    pub fn set_position_mode(&mut self, id: NodeId, mode: PositionMode) -> TreeResult<()> {
        self.widget_mut(id)?.geometry.position_mode = mode;
        Ok(())
    }

    pub fn set_ignore_intrinsic_size(&mut self, id: NodeId, ignore: bool) -> TreeResult<()> {
        let g = &mut self.widget_mut(id)?.geometry;
        if g.ignore_intrinsic_size == ignore {
            return Ok(());
        }
        g.ignore_intrinsic_size = ignore;
        g.size = if ignore { g.intrinsic_size } else { g.custom_size };
        self.on_size_changed(id);
        Ok(())
    }

    /// The renderer reports a new natural size (texture loaded, text changed).
    pub fn update_intrinsic_size(&mut self, id: NodeId, intrinsic: Size) -> TreeResult<()> {
        let g = &mut self.widget_mut(id)?.geometry;
        g.intrinsic_size = intrinsic;
        g.size = if g.ignore_intrinsic_size {
            intrinsic
        } else {
            g.custom_size
        };
        self.on_size_changed(id);
        Ok(())
    }

    /// Cascade primitive: re-resolve size and position of `id` against
    /// `parent_size`, then cascade into its widget children.
    pub fn update_size_and_position(&mut self, id: NodeId, parent_size: Size) {
        let Ok(widget) = self.widget_mut(id) else {
            return;
        };
        let g = &mut widget.geometry;
        match g.size_mode {
            SizeMode::Absolute => {
                g.size_percent = derive_percent_from_absolute(g.custom_size, parent_size);
            }
            SizeMode::Percent => {
                g.custom_size = parent_size.scale_by(g.size_percent);
            }
        }
        g.size = resolve_size(
            g.size_mode,
            g.custom_size,
            g.size_percent,
            parent_size,
            g.ignore_intrinsic_size,
            g.intrinsic_size,
        );

        let mode = g.position_mode;
        let percent = g.position_percent;
        match mode {
            PositionMode::Absolute => {
                let abs = self.arena[id].position;
                if let Some(w) = self.arena[id].widget_mut() {
                    w.geometry.position_percent = derive_percent(abs, parent_size);
                }
            }
            PositionMode::Percent => {
                self.arena[id].position = resolve_position(percent, parent_size);
            }
        }

        self.on_size_changed(id);
    }

    /// [`SceneTree::update_size_and_position`] against the current parent.
    pub fn refresh_layout(&mut self, id: NodeId) -> TreeResult<()> {
        self.widget(id)?;
        let reference = self.parent_reference_size(id);
        self.update_size_and_position(id, reference);
        Ok(())
    }

    /// Apply the resolved size to the content box, notify the behaviour and
    /// cascade depth-first into widget children. Plain children are neither
    /// resized nor descended into.
    pub(crate) fn on_size_changed(&mut self, id: NodeId) {
        let node = &mut self.arena[id];
        let Some(size) = node.widget().map(|w| w.geometry.size) else {
            return;
        };
        node.content_size = size;
        if let Some(w) = node.widget_mut() {
            w.behavior.on_size_changed(size);
        }
        log::trace!("{id:?} resolved to {}x{}", size.width, size.height);

        let children = node.children.clone();
        for child in children {
            if self.is_widget(child) {
                self.update_size_and_position(child, size);
            }
        }
    }

    /// Absolute position. While running under a widget parent the percent
    /// position is re-derived from it.
    pub fn set_position(&mut self, id: NodeId, pos: Vec2) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.position = pos;
        if node.running {
            if let Some(wp) = self.widget_parent(id) {
                let reference = self.arena[wp].widget().map(|w| w.size()).unwrap_or_default();
                if let Some(w) = self.arena[id].widget_mut() {
                    w.geometry.position_percent = derive_percent(pos, reference);
                }
            }
        }
        Ok(())
    }

    pub fn set_position_percent(&mut self, id: NodeId, percent: Vec2) -> TreeResult<()> {
        self.widget_mut(id)?.geometry.position_percent = percent;
        if !self.arena[id].running {
            return Ok(());
        }
        if let Some(wp) = self.widget_parent(id) {
            let reference = self.arena[wp].widget().map(|w| w.size()).unwrap_or_default();
            self.set_position(id, resolve_position(percent, reference))?;
        }
        Ok(())
    }

    pub fn left_in_parent(&self, id: NodeId) -> TreeResult<f32> {
        let node = self.node(id)?;
        let size = self.size(id)?;
        Ok(node.position.x - node.anchor.x * size.width)
    }

    pub fn bottom_in_parent(&self, id: NodeId) -> TreeResult<f32> {
        let node = self.node(id)?;
        let size = self.size(id)?;
        Ok(node.position.y - node.anchor.y * size.height)
    }

    pub fn right_in_parent(&self, id: NodeId) -> TreeResult<f32> {
        Ok(self.left_in_parent(id)? + self.size(id)?.width)
    }

    pub fn top_in_parent(&self, id: NodeId) -> TreeResult<f32> {
        Ok(self.bottom_in_parent(id)? + self.size(id)?.height)
    }
}
