//! Widget state that is not geometry: enablement, brightness and focus,
//! touch configuration, tint, layout parameters and cloning.

use crate::{
    BrightStyle, Color, FrameRef, LayoutParameter, LayoutParameterType, NodeId, SceneTree,
    TextureSource, TouchCallback, TouchEventType, TreeResult, Vec2, WidgetFlags,
};

impl SceneTree {
    /// Set the interaction flag on `id` and every widget descendant reached
    /// through widget children. Plain children stop the recursion.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> TreeResult<()> {
        self.widget_mut(id)?.flags.set(WidgetFlags::ENABLED, enabled);
        for child in self.widget_children(id) {
            self.set_enabled(child, enabled)?;
        }
        Ok(())
    }

    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.widget(id).is_ok_and(|w| w.is_enabled())
    }

    pub fn set_bright(&mut self, id: NodeId, bright: bool) -> TreeResult<()> {
        let w = self.widget_mut(id)?;
        w.flags.set(WidgetFlags::BRIGHT, bright);
        if bright {
            w.touch.bright_style = BrightStyle::None;
            self.set_bright_style_internal(id, BrightStyle::Normal);
        } else {
            w.behavior.on_press_state_changed_to_disabled();
        }
        Ok(())
    }

    pub fn set_bright_style(&mut self, id: NodeId, style: BrightStyle) -> TreeResult<()> {
        self.widget(id)?;
        self.set_bright_style_internal(id, style);
        Ok(())
    }

    pub(crate) fn set_bright_style_internal(&mut self, id: NodeId, style: BrightStyle) {
        let Ok(w) = self.widget_mut(id) else {
            return;
        };
        if w.touch.bright_style == style {
            return;
        }
        w.touch.bright_style = style;
        match style {
            BrightStyle::Normal => w.behavior.on_press_state_changed_to_normal(),
            BrightStyle::Highlighted => w.behavior.on_press_state_changed_to_pressed(),
            BrightStyle::None => {}
        }
    }

    /// Focus drives brightness: highlighted while focused if bright, the
    /// disabled hook otherwise. No-op when unchanged.
    pub fn set_focused(&mut self, id: NodeId, focused: bool) -> TreeResult<()> {
        let w = self.widget_mut(id)?;
        if w.touch.focused == focused {
            return Ok(());
        }
        w.touch.focused = focused;
        if w.is_bright() {
            let style = if focused {
                BrightStyle::Highlighted
            } else {
                BrightStyle::Normal
            };
            self.set_bright_style_internal(id, style);
        } else {
            w.behavior.on_press_state_changed_to_disabled();
        }
        Ok(())
    }

    pub fn is_focused(&self, id: NodeId) -> bool {
        self.widget(id).is_ok_and(|w| w.is_focused())
    }

    // ------------------------------------------------------------------
    // Touch configuration
    // ------------------------------------------------------------------

    pub fn set_touch_enabled(&mut self, id: NodeId, enabled: bool) -> TreeResult<()> {
        let running = self.node(id)?.running;
        let w = self.widget_mut(id)?;
        if w.touch.touch_enabled == enabled {
            return Ok(());
        }
        w.touch.touch_enabled = enabled;
        if enabled && running {
            self.acquire_listener(id);
        } else if !enabled {
            // A touch in flight is aborted before its claim goes away.
            self.on_touch_cancelled(id);
            self.release_listener(id);
        }
        Ok(())
    }

    pub fn is_touch_enabled(&self, id: NodeId) -> bool {
        self.widget(id).is_ok_and(|w| w.is_touch_enabled())
    }

    /// Assign `priority` to `id` and `priority - depth` to widget descendants,
    /// so inner widgets are offered touches before the containers around
    /// them. A live listener is re-registered at the new priority.
    pub fn set_touch_priority(&mut self, id: NodeId, priority: i32) -> TreeResult<()> {
        self.widget_mut(id)?.touch.priority = priority;
        for child in self.widget_children(id) {
            self.set_touch_priority(child, priority - 1)?;
        }
        if self.widget(id)?.touch.listener.is_some() {
            self.acquire_listener(id);
        }
        Ok(())
    }

    pub fn touch_priority(&self, id: NodeId) -> TreeResult<i32> {
        Ok(self.widget(id)?.touch.priority)
    }

    /// Where the current or last touch began, in world space.
    pub fn touch_start_pos(&self, id: NodeId) -> TreeResult<Vec2> {
        Ok(self.widget(id)?.touch.start_pos)
    }

    pub fn touch_move_pos(&self, id: NodeId) -> TreeResult<Vec2> {
        Ok(self.widget(id)?.touch.move_pos)
    }

    pub fn touch_end_pos(&self, id: NodeId) -> TreeResult<Vec2> {
        Ok(self.widget(id)?.touch.end_pos)
    }

    /// Let claimed touches continue to lower-priority listeners.
    pub fn set_touch_pass_through(&mut self, id: NodeId, pass: bool) -> TreeResult<()> {
        self.widget_mut(id)?
            .flags
            .set(WidgetFlags::TOUCH_PASS_THROUGH, pass);
        Ok(())
    }

    pub fn set_touch_event_listener(
        &mut self,
        id: NodeId,
        callback: impl Fn(NodeId, TouchEventType) + 'static,
    ) -> TreeResult<()> {
        let callback: TouchCallback = std::rc::Rc::new(callback);
        self.widget_mut(id)?.callback = Some(callback);
        Ok(())
    }

    pub fn remove_touch_event_listener(&mut self, id: NodeId) -> TreeResult<()> {
        self.widget_mut(id)?.callback = None;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cosmetics and bookkeeping
    // ------------------------------------------------------------------

    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> TreeResult<()> {
        self.widget_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_action_tag(&mut self, id: NodeId, tag: i32) -> TreeResult<()> {
        self.widget_mut(id)?.action_tag = tag;
        Ok(())
    }

    /// RGB tint; opacity is left as is.
    pub fn set_color(&mut self, id: NodeId, color: Color) -> TreeResult<()> {
        let w = self.widget_mut(id)?;
        w.color = color.with_alpha(w.color.alpha());
        let tint = w.color;
        w.behavior.update_tint(tint);
        Ok(())
    }

    pub fn set_opacity(&mut self, id: NodeId, opacity: u8) -> TreeResult<()> {
        let w = self.widget_mut(id)?;
        w.color = w.color.with_alpha(opacity);
        let tint = w.color;
        w.behavior.update_tint(tint);
        Ok(())
    }

    pub fn set_flipped(&mut self, id: NodeId, flipped_x: bool, flipped_y: bool) -> TreeResult<()> {
        let w = self.widget_mut(id)?;
        w.flags.set(WidgetFlags::FLIPPED_X, flipped_x);
        w.flags.set(WidgetFlags::FLIPPED_Y, flipped_y);
        w.behavior.update_flipped(flipped_x, flipped_y);
        Ok(())
    }

    pub fn set_layout_parameter(&mut self, id: NodeId, parameter: LayoutParameter) -> TreeResult<()> {
        self.widget_mut(id)?
            .layout_parameters
            .insert(parameter.layout_type(), parameter);
        Ok(())
    }

    pub fn layout_parameter(
        &self,
        id: NodeId,
        kind: LayoutParameterType,
    ) -> TreeResult<Option<&LayoutParameter>> {
        Ok(self.widget(id)?.layout_parameter(kind))
    }

    /// Texture frame the widget renders with; read by the grey overlay.
    pub fn set_frame(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        source: TextureSource,
    ) -> TreeResult<()> {
        let name = name.into();
        self.widget_mut(id)?.frame = (!name.is_empty()).then_some(FrameRef { name, source });
        Ok(())
    }

    pub fn set_grey_flag(&mut self, id: NodeId, grey: bool) -> TreeResult<()> {
        self.widget_mut(id)?.flags.set(WidgetFlags::GREY, grey);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cloning
    // ------------------------------------------------------------------

    /// Detached deep copy of a widget and its widget children. The touch
    /// callback is not copied and pass-through is reset.
    pub fn clone_widget(&mut self, model: NodeId) -> TreeResult<NodeId> {
        let behavior = {
            let source = self.widget(model)?;
            let mut fresh = source.behavior.create_clone_instance();
            fresh.copy_special_properties(source.behavior.as_ref());
            fresh
        };
        let copy = self.create_widget_boxed(behavior);
        self.copy_properties(copy, model)?;
        for child in self.widget_children(model) {
            let cloned = self.clone_widget(child)?;
            self.add_child(copy, cloned)?;
        }
        Ok(copy)
    }

    fn copy_properties(&mut self, copy: NodeId, model: NodeId) -> TreeResult<()> {
        let (visible, z, tag, position, anchor, scale, rotation) = {
            let n = self.node(model)?;
            (
                n.visible,
                n.local_z_order,
                n.tag,
                n.position,
                n.anchor,
                n.scale,
                n.rotation,
            )
        };
        let src = self.widget(model)?;
        let enabled = src.is_enabled();
        let bright = src.is_bright();
        let touch_enabled = src.is_touch_enabled();
        let flags = src.flags;
        let name = src.name.clone();
        let action_tag = src.action_tag;
        let geometry = src.geometry;
        let color = src.color;
        let params = src.layout_parameters.clone();
        let frame = src.frame.clone();

        self.set_enabled(copy, enabled)?;
        self.set_bright(copy, bright)?;
        self.set_touch_enabled(copy, touch_enabled)?;
        {
            let node = self.node_mut(copy)?;
            node.visible = visible;
            node.local_z_order = z;
            node.tag = tag;
            node.position = position;
            node.anchor = anchor;
            node.scale = scale;
            node.rotation = rotation;
        }
        let w = self.widget_mut(copy)?;
        w.flags.remove(WidgetFlags::TOUCH_PASS_THROUGH);
        w.name = name;
        w.action_tag = action_tag;
        w.geometry = geometry;
        w.layout_parameters = params;
        w.frame = frame;
        self.set_flipped(
            copy,
            flags.contains(WidgetFlags::FLIPPED_X),
            flags.contains(WidgetFlags::FLIPPED_Y),
        )?;
        self.set_color(copy, color)?;
        self.set_opacity(copy, color.alpha())?;
        self.on_size_changed(copy);
        Ok(())
    }
}
