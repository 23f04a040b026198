//! Concrete widgets built on `poise-core`, and the greyscale overlay.
//!
//! [`Layout`] is the clipping container, [`Button`] tracks its press state
//! from the focus changes the core drives, and [`GreyOverlay`] renders a
//! widget subtree as disabled without touching its own textures.

pub mod button;
pub mod grey;
pub mod layout;

pub use button::{Button, PressState};
pub use grey::{GreyOverlay, SpriteFrameSource};
pub use layout::{Layout, LayoutExt};
