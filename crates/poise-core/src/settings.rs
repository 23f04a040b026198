use crate::{Size, Vec2};

/// Tree-wide parameters, fixed when the [`SceneTree`](crate::SceneTree) is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Content size of the scene root; the reference size for top-level widgets.
    pub root_size: Size,
    /// Anchor point given to newly created widgets.
    pub widget_anchor: Vec2,
    /// Child tag reserved for the greyscale overlay. Nothing else in the
    /// tree should use it.
    pub grey_overlay_tag: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_size: Size::new(1280.0, 800.0),
            widget_anchor: Vec2::new(0.5, 0.5),
            grey_overlay_tag: 1777,
        }
    }
}

impl Settings {
    pub fn with_root_size(mut self, size: Size) -> Self {
        self.root_size = size;
        self
    }
    pub fn with_widget_anchor(mut self, anchor: Vec2) -> Self {
        self.widget_anchor = anchor;
        self
    }
    pub fn with_grey_overlay_tag(mut self, tag: i32) -> Self {
        self.grey_overlay_tag = tag;
        self
    }
}
