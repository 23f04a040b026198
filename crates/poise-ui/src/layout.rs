use std::any::Any;

use poise_core::{Color, NodeId, SceneTree, WidgetBehavior};

/// Container widget. When clipping is on, descendants only accept touches
/// that also land inside this layout's content box.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    clipping: bool,
    pub background: Option<Color>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clipped() -> Self {
        Self {
            clipping: true,
            ..Self::default()
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

impl WidgetBehavior for Layout {
    fn description(&self) -> &'static str {
        "Layout"
    }

    fn clipping_enabled(&self) -> bool {
        self.clipping
    }

    fn create_clone_instance(&self) -> Box<dyn WidgetBehavior> {
        Box::new(Layout::new())
    }

    fn copy_special_properties(&mut self, model: &dyn WidgetBehavior) {
        if let Some(m) = model.as_any().downcast_ref::<Layout>() {
            self.clipping = m.clipping;
            self.background = m.background;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Layout-specific operations on a tree.
pub trait LayoutExt {
    /// Returns `false` if `id` is not a [`Layout`].
    fn set_clipping_enabled(&mut self, id: NodeId, enabled: bool) -> bool;
    fn is_clipping_enabled(&self, id: NodeId) -> bool;
}

impl LayoutExt for SceneTree {
    fn set_clipping_enabled(&mut self, id: NodeId, enabled: bool) -> bool {
        match self.behavior_mut::<Layout>(id) {
            Some(layout) => {
                layout.clipping = enabled;
                log::debug!("clipping on {id:?} set to {enabled}");
                true
            }
            None => false,
        }
    }

    fn is_clipping_enabled(&self, id: NodeId) -> bool {
        self.behavior::<Layout>(id).is_some_and(|l| l.clipping)
    }
}
