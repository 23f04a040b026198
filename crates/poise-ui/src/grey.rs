//! Greyscale "disabled" look for a widget subtree.
//!
//! Each widget that has a texture frame gets a plain overlay child at the
//! reserved tag from [`Settings`](poise_core::Settings), stretched over its
//! content box. Widget children are raised one z step so they keep painting
//! above their parent's overlay.

use poise_core::{NodeId, SceneTree, Size, TextureSource, TreeResult, Vec2, WidgetFlags};

/// Looks up the natural size of a texture frame.
pub trait SpriteFrameSource {
    fn frame_size(&self, name: &str, source: TextureSource) -> Option<Size>;
}

pub struct GreyOverlay<S> {
    source: S,
}

impl<S: SpriteFrameSource> GreyOverlay<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Grey `id` and every widget below it. `dt` is added to the overlay
    /// scale so it slightly overhangs the widget's edges.
    pub fn set_grey(&self, tree: &mut SceneTree, id: NodeId, dt: f32) -> TreeResult<()> {
        if self.is_grey(tree, id) {
            self.remove_grey(tree, id)?;
        }
        for child in tree.widget_children(id) {
            let z = tree.node(child)?.local_z_order;
            tree.set_local_z_order(child, z + 1)?;
            self.set_grey(tree, child, dt)?;
        }
        self.attach_overlay(tree, id, dt)?;
        tree.set_grey_flag(id, true)
    }

    fn attach_overlay(&self, tree: &mut SceneTree, id: NodeId, dt: f32) -> TreeResult<()> {
        let tag = tree.settings().grey_overlay_tag;
        if let Some(stale) = tree.child_by_tag(id, tag) {
            tree.destroy(stale)?;
        }
        let Some(frame) = tree.widget(id)?.frame.clone() else {
            return Ok(());
        };
        let Some(frame_size) = self.source.frame_size(&frame.name, frame.source) else {
            log::warn!("no frame {:?} for grey overlay of {id:?}", frame.name);
            return Ok(());
        };

        let size = tree.size(id)?;
        let overlay = tree.create_node();
        tree.set_content_size(overlay, frame_size)?;
        tree.set_anchor(overlay, Vec2::new(0.5, 0.5))?;
        tree.set_position(overlay, Vec2::new(size.width * 0.5, size.height * 0.5))?;
        tree.set_scale(
            overlay,
            Vec2::new(
                stretch(size.width, frame_size.width) + dt,
                stretch(size.height, frame_size.height) + dt,
            ),
        )?;
        tree.add_child_with(id, overlay, 0, Some(tag))
    }

    /// Undo [`GreyOverlay::set_grey`]. A widget that is not grey is left
    /// alone together with its subtree.
    pub fn remove_grey(&self, tree: &mut SceneTree, id: NodeId) -> TreeResult<()> {
        if !self.is_grey(tree, id) {
            return Ok(());
        }
        let tag = tree.settings().grey_overlay_tag;
        if let Some(overlay) = tree.child_by_tag(id, tag) {
            tree.destroy(overlay)?;
        }
        for child in tree.widget_children(id) {
            let z = tree.node(child)?.local_z_order;
            tree.set_local_z_order(child, z - 1)?;
            self.remove_grey(tree, child)?;
        }
        tree.set_grey_flag(id, false)
    }

    pub fn is_grey(&self, tree: &SceneTree, id: NodeId) -> bool {
        tree.widget(id)
            .is_ok_and(|w| w.flags().contains(WidgetFlags::GREY))
    }
}

fn stretch(target: f32, natural: f32) -> f32 {
    if natural > 0.0 { target / natural } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Button;
    use poise_core::{Panel, Settings};
    use std::collections::HashMap;

    struct Frames(HashMap<&'static str, Size>);

    impl SpriteFrameSource for Frames {
        fn frame_size(&self, name: &str, _source: TextureSource) -> Option<Size> {
            self.0.get(name).copied()
        }
    }

    fn overlay() -> GreyOverlay<Frames> {
        let _ = env_logger::builder().is_test(true).try_init();
        GreyOverlay::new(Frames(HashMap::from([
            ("panel.png", Size::new(50.0, 25.0)),
            ("ok.png", Size::new(20.0, 20.0)),
        ])))
    }

    /// Panel 100x50 with a framed button and a frameless panel inside.
    fn build(tree: &mut SceneTree) -> (NodeId, NodeId, NodeId) {
        let root = tree.root();
        let panel = tree.create_widget(Panel);
        tree.add_child(root, panel).unwrap();
        tree.set_size(panel, Size::new(100.0, 50.0)).unwrap();
        tree.set_frame(panel, "panel.png", TextureSource::Plist).unwrap();

        let button = tree.create_widget(Button::new("ok"));
        tree.add_child(panel, button).unwrap();
        tree.set_size(button, Size::new(40.0, 20.0)).unwrap();
        tree.set_frame(button, "ok.png", TextureSource::Local).unwrap();

        let bare = tree.create_widget(Panel);
        tree.add_child_with(panel, bare, 3, None).unwrap();
        (panel, button, bare)
    }

    #[test]
    fn test_set_grey_attaches_scaled_overlay() {
        let grey = overlay();
        let mut tree = SceneTree::with_settings(Settings::default());
        let (panel, button, bare) = build(&mut tree);

        grey.set_grey(&mut tree, panel, 0.0).unwrap();

        let tag = tree.settings().grey_overlay_tag;
        let sprite = tree.child_by_tag(panel, tag).unwrap();
        let node = tree.node(sprite).unwrap();
        assert!(!node.is_widget());
        assert_eq!(node.position(), Vec2::new(50.0, 25.0));
        assert_eq!(node.scale, Vec2::new(2.0, 2.0));
        assert_eq!(node.anchor, Vec2::new(0.5, 0.5));
        assert_eq!(node.content_size(), Size::new(50.0, 25.0));
        assert_eq!(node.local_z_order, 0);

        assert_eq!(tree.node(button).unwrap().local_z_order, 1);
        assert_eq!(tree.node(bare).unwrap().local_z_order, 4);
        assert!(tree.child_by_tag(button, tag).is_some());
        assert!(tree.child_by_tag(bare, tag).is_none());
        assert!(grey.is_grey(&tree, panel));
        assert!(grey.is_grey(&tree, button));
        assert!(grey.is_grey(&tree, bare));
    }

    #[test]
    fn test_dt_overhangs_overlay() {
        let grey = overlay();
        let mut tree = SceneTree::new();
        let (panel, _, _) = build(&mut tree);
        grey.set_grey(&mut tree, panel, 0.5).unwrap();
        let tag = tree.settings().grey_overlay_tag;
        let sprite = tree.child_by_tag(panel, tag).unwrap();
        assert_eq!(tree.node(sprite).unwrap().scale, Vec2::new(2.5, 2.5));
    }

    #[test]
    fn test_regrey_does_not_stack() {
        let grey = overlay();
        let mut tree = SceneTree::new();
        let (panel, button, _) = build(&mut tree);
        let before = tree.children(panel).len();

        grey.set_grey(&mut tree, panel, 0.0).unwrap();
        grey.set_grey(&mut tree, panel, 0.0).unwrap();
        assert_eq!(tree.children(panel).len(), before + 1);
        assert_eq!(tree.node(button).unwrap().local_z_order, 1);
    }

    #[test]
    fn test_remove_grey_restores_subtree() {
        let grey = overlay();
        let mut tree = SceneTree::new();
        let (panel, button, bare) = build(&mut tree);
        let before = tree.len();

        grey.set_grey(&mut tree, panel, 0.0).unwrap();
        grey.remove_grey(&mut tree, panel).unwrap();

        assert_eq!(tree.len(), before);
        assert_eq!(tree.node(button).unwrap().local_z_order, 0);
        assert_eq!(tree.node(bare).unwrap().local_z_order, 3);
        assert!(!grey.is_grey(&tree, panel));
        assert!(!grey.is_grey(&tree, button));

        // second removal is a no-op
        grey.remove_grey(&mut tree, panel).unwrap();
        assert_eq!(tree.node(button).unwrap().local_z_order, 0);
    }

    #[test]
    fn test_unknown_frame_greys_without_overlay() {
        let grey = overlay();
        let mut tree = SceneTree::new();
        let root = tree.root();
        let w = tree.create_widget(Panel);
        tree.add_child(root, w).unwrap();
        tree.set_frame(w, "missing.png", TextureSource::Plist).unwrap();

        grey.set_grey(&mut tree, w, 0.0).unwrap();
        assert!(tree.children(w).is_empty());
        assert!(grey.is_grey(&tree, w));
    }
}
