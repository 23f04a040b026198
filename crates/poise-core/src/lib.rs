//! # Widgets, geometry policies and touch dispatch
//!
//! Poise keeps a retained scene tree in an arena. Some nodes are plain scene
//! nodes (sprites, overlays); others are widgets that carry sizing policies,
//! touch state and a [`WidgetBehavior`] describing the concrete variant.
//!
//! ## Sizing
//!
//! A widget's size and position are either absolute or a fraction of its
//! parent's reference size. Changing a size cascades top-down through the
//! widget children in a single pass:
//!
//! ```rust
//! use poise_core::*;
//!
//! let mut tree = SceneTree::new();
//! let panel = tree.create_widget(Panel);
//! let child = tree.create_widget(Panel);
//! tree.add_child(tree.root(), panel).unwrap();
//! tree.add_child(panel, child).unwrap();
//!
//! tree.set_size(panel, Size::new(200.0, 100.0)).unwrap();
//! tree.set_size_mode(child, SizeMode::Percent).unwrap();
//! tree.set_size_percent(child, Vec2::new(0.5, 0.5)).unwrap();
//! assert_eq!(tree.size(child).unwrap(), Size::new(100.0, 50.0));
//!
//! tree.set_size(panel, Size::new(400.0, 100.0)).unwrap();
//! assert_eq!(tree.size(child).unwrap(), Size::new(200.0, 50.0));
//! ```
//!
//! ## Touches
//!
//! A touch-enabled widget in a running tree owns one listener in the tree's
//! dispatcher. [`SceneTree::dispatch_touch`] offers a touch-begin to the
//! listeners in priority order; the first widget that is hit claims and
//! swallows it, and later phases go to the claimers only.
//!
//! ```rust
//! use poise_core::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut tree = SceneTree::new();
//! let button = tree.create_widget(Panel);
//! tree.add_child(tree.root(), button).unwrap();
//! tree.set_size(button, Size::new(100.0, 40.0)).unwrap();
//! tree.set_position(button, Vec2::new(50.0, 20.0)).unwrap();
//! tree.set_touch_enabled(button, true).unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = seen.clone();
//! tree.set_touch_event_listener(button, move |_, ev| log.borrow_mut().push(ev))
//!     .unwrap();
//!
//! assert!(tree.dispatch_touch(&TouchEvent::new(1, TouchPhase::Began, Vec2::new(60.0, 25.0))));
//! tree.dispatch_touch(&TouchEvent::new(1, TouchPhase::Ended, Vec2::new(60.0, 25.0)));
//! assert_eq!(*seen.borrow(), vec![TouchEventType::Began, TouchEventType::Ended]);
//! ```
//!
//! Everything runs on the thread that owns the tree; nothing here blocks.

pub mod behavior;
pub mod color;
pub mod dispatcher;
pub mod error;
pub mod geometry;
pub mod input;
pub mod node;
pub mod resolver;
pub mod settings;
mod sizing;
mod touch;
pub mod tree;
mod widget;

pub use behavior::*;
pub use color::*;
pub use dispatcher::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use node::*;
pub use resolver::{PositionMode, SizeMode};
pub use settings::*;
pub use tree::*;
