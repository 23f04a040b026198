use std::collections::HashMap;
use std::rc::Rc;

use bitflags::bitflags;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::{
    Color, ListenerId, PositionMode, Size, SizeMode, Transform, TouchEventType, TouchId, Vec2,
    WidgetBehavior,
};

new_key_type! {
    /// Handle into the scene arena. Stable across insertions and removals.
    pub struct NodeId;
}

pub type TouchCallback = Rc<dyn Fn(NodeId, TouchEventType)>;

pub type Children = SmallVec<[NodeId; 4]>;

/// One entry of the scene arena: the generic scene-graph part plus a tag
/// saying whether the node is a widget.
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Children,
    pub tag: Option<i32>,
    pub local_z_order: i32,
    pub(crate) position: Vec2,
    pub anchor: Vec2,
    pub scale: Vec2,
    /// Radians, counter-clockwise.
    pub rotation: f32,
    pub(crate) content_size: Size,
    pub visible: bool,
    pub(crate) running: bool,
    pub(crate) kind: NodeKind,
}

pub enum NodeKind {
    /// Generic scene node (sprites, overlays, anything that is not a widget).
    Plain,
    Widget(Box<WidgetData>),
}

impl Node {
    pub(crate) fn plain() -> Self {
        Node {
            parent: None,
            children: SmallVec::new(),
            tag: None,
            local_z_order: 0,
            position: Vec2::ZERO,
            anchor: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            content_size: Size::ZERO,
            visible: true,
            running: false,
            kind: NodeKind::Plain,
        }
    }

    pub(crate) fn new_widget(data: WidgetData, anchor: Vec2) -> Self {
        Node {
            anchor,
            kind: NodeKind::Widget(Box::new(data)),
            ..Node::plain()
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
    pub fn position(&self) -> Vec2 {
        self.position
    }
    pub fn content_size(&self) -> Size {
        self.content_size
    }
    pub fn is_running(&self) -> bool {
        self.running
    }
    pub fn is_widget(&self) -> bool {
        matches!(self.kind, NodeKind::Widget(_))
    }

    pub fn widget(&self) -> Option<&WidgetData> {
        match &self.kind {
            NodeKind::Widget(w) => Some(w),
            NodeKind::Plain => None,
        }
    }

    pub fn widget_mut(&mut self) -> Option<&mut WidgetData> {
        match &mut self.kind {
            NodeKind::Widget(w) => Some(w),
            NodeKind::Plain => None,
        }
    }

    /// Pixel offset of the anchor inside the content box.
    pub fn anchor_in_points(&self) -> Vec2 {
        self.anchor.scale_by(self.content_size)
    }

    /// Local → parent transform, not counting the anchor offset.
    pub fn local_transform(&self) -> Transform {
        Transform {
            translate_x: self.position.x,
            translate_y: self.position.y,
            scale_x: self.scale.x,
            scale_y: self.scale.y,
            rotate: self.rotation,
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct WidgetFlags: u8 {
        /// Gates interaction and visiting.
        const ENABLED = 1 << 0;
        const BRIGHT = 1 << 1;
        /// Claimed touches keep travelling to lower-priority listeners.
        const TOUCH_PASS_THROUGH = 1 << 2;
        const FLIPPED_X = 1 << 3;
        const FLIPPED_Y = 1 << 4;
        /// A greyscale overlay is attached.
        const GREY = 1 << 5;
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        WidgetFlags::ENABLED | WidgetFlags::BRIGHT
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WidgetGeometry {
    pub size_mode: SizeMode,
    pub position_mode: PositionMode,
    /// Last explicitly requested size; kept while in percent mode.
    pub custom_size: Size,
    /// Size applied to the content box.
    pub size: Size,
    pub size_percent: Vec2,
    pub ignore_intrinsic_size: bool,
    /// Renderer-reported size used when `ignore_intrinsic_size` is set.
    pub intrinsic_size: Size,
    pub position_percent: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrightStyle {
    #[default]
    None,
    Normal,
    Highlighted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingPhase {
    #[default]
    Idle,
    Tracking(TouchId),
}

#[derive(Clone, Debug, Default)]
pub struct TouchState {
    pub touch_enabled: bool,
    pub priority: i32,
    pub focused: bool,
    pub bright_style: BrightStyle,
    pub start_pos: Vec2,
    pub move_pos: Vec2,
    pub end_pos: Vec2,
    /// Valid only while a touch-begin is being evaluated.
    pub hit_confirmed: bool,
    /// Result of the last clipping-ancestor lookup.
    pub affected_by_clipping: bool,
    pub phase: TrackingPhase,
    /// Live registration in the tree's dispatcher. At most one per widget.
    pub(crate) listener: Option<ListenerId>,
}

impl TouchState {
    /// Widgets always swallow what they claim unless marked pass-through.
    pub const SWALLOW: bool = true;

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutParameterType {
    Linear,
    Relative,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinearGravity {
    #[default]
    None,
    Left,
    Top,
    Right,
    Bottom,
    CenterVertical,
    CenterHorizontal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelativeAlign {
    #[default]
    None,
    ParentTopLeft,
    ParentTopRight,
    ParentBottomLeft,
    ParentBottomRight,
    CenterInParent,
    LocationAboveLeft,
    LocationBelowLeft,
    LocationLeftOfCenter,
    LocationRightOfCenter,
}

/// Placement hints read by container layouts. Stored, never interpreted here.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutParameter {
    Linear {
        gravity: LinearGravity,
        margin: Margin,
    },
    Relative {
        align: RelativeAlign,
        name: String,
        relative_to: String,
        margin: Margin,
    },
}

impl LayoutParameter {
    pub fn layout_type(&self) -> LayoutParameterType {
        match self {
            LayoutParameter::Linear { .. } => LayoutParameterType::Linear,
            LayoutParameter::Relative { .. } => LayoutParameterType::Relative,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSource {
    /// Frame packed into a sprite sheet.
    Plist,
    /// Standalone image file.
    Local,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRef {
    pub name: String,
    pub source: TextureSource,
}

/// Widget-only state of a node.
pub struct WidgetData {
    pub(crate) behavior: Box<dyn WidgetBehavior>,
    pub(crate) geometry: WidgetGeometry,
    pub(crate) touch: TouchState,
    pub(crate) flags: WidgetFlags,
    pub(crate) callback: Option<TouchCallback>,
    pub name: String,
    pub action_tag: i32,
    pub(crate) color: Color,
    pub(crate) layout_parameters: HashMap<LayoutParameterType, LayoutParameter>,
    pub frame: Option<FrameRef>,
}

impl WidgetData {
    pub(crate) fn new(behavior: Box<dyn WidgetBehavior>) -> Self {
        WidgetData {
            behavior,
            geometry: WidgetGeometry::default(),
            touch: TouchState::default(),
            flags: WidgetFlags::default(),
            callback: None,
            name: String::from("default"),
            action_tag: 0,
            color: Color::WHITE,
            layout_parameters: HashMap::new(),
            frame: None,
        }
    }

    pub fn behavior(&self) -> &dyn WidgetBehavior {
        self.behavior.as_ref()
    }
    pub fn geometry(&self) -> &WidgetGeometry {
        &self.geometry
    }
    pub fn touch(&self) -> &TouchState {
        &self.touch
    }
    pub fn flags(&self) -> WidgetFlags {
        self.flags
    }
    pub fn color(&self) -> Color {
        self.color
    }
    pub fn is_enabled(&self) -> bool {
        self.flags.contains(WidgetFlags::ENABLED)
    }
    pub fn is_bright(&self) -> bool {
        self.flags.contains(WidgetFlags::BRIGHT)
    }
    pub fn is_focused(&self) -> bool {
        self.touch.focused
    }
    pub fn is_touch_enabled(&self) -> bool {
        self.touch.touch_enabled
    }
    pub fn size(&self) -> Size {
        self.geometry.size
    }
    pub fn layout_parameter(&self, kind: LayoutParameterType) -> Option<&LayoutParameter> {
        self.layout_parameters.get(&kind)
    }
}
