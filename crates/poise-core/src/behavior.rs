use std::any::Any;

use crate::{ChildTouchPhase, Color, NodeId, Size, Vec2};

/// Touch activity of a descendant, relayed up the widget-parent chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildTouch {
    pub phase: ChildTouchPhase,
    /// Widget whose listener handled the touch.
    pub sender: NodeId,
    pub point: Vec2,
}

/// Per-variant hooks of a widget.
///
/// The tree owns all geometry and touch state; a behaviour only decides how a
/// concrete widget reacts. Every hook except the clone pair defaults to a no-op.
pub trait WidgetBehavior: Any {
    fn description(&self) -> &'static str {
        "Widget"
    }

    /// A clipping-capable container returns true while clipping is on. Touches
    /// outside its bounds never reach its descendants.
    fn clipping_enabled(&self) -> bool {
        false
    }

    fn on_press_state_changed_to_normal(&mut self) {}
    fn on_press_state_changed_to_pressed(&mut self) {}
    fn on_press_state_changed_to_disabled(&mut self) {}

    /// Called after the content box took `size`, before children cascade.
    fn on_size_changed(&mut self, _size: Size) {}

    /// Descendant touch relay. Observation only; the touch is not intercepted.
    fn observe_child_touch(&mut self, _touch: ChildTouch) {}

    fn update_tint(&mut self, _color: Color) {}
    fn update_flipped(&mut self, _flipped_x: bool, _flipped_y: bool) {}

    /// Fresh, default-configured instance of the same variant.
    fn create_clone_instance(&self) -> Box<dyn WidgetBehavior>;

    /// Copy variant-specific state from `model` during a clone.
    fn copy_special_properties(&mut self, _model: &dyn WidgetBehavior) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The base widget: no variant-specific behaviour at all.
#[derive(Clone, Debug, Default)]
pub struct Panel;

impl WidgetBehavior for Panel {
    fn create_clone_instance(&self) -> Box<dyn WidgetBehavior> {
        Box::new(Panel)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
