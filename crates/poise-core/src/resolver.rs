//! Absolute / percent geometry policies.
//!
//! Both functions are pure: they look only at their arguments, so the tree can
//! call them from any mutation site and from the top-down cascade alike.

use crate::{Size, Vec2};

/// How a widget's size is defined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeMode {
    #[default]
    Absolute,
    /// Fraction of the parent's reference size.
    Percent,
}

/// How a widget's position is defined. Independent of [`SizeMode`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionMode {
    #[default]
    Absolute,
    Percent,
}

/// Size that should be applied to the content box.
pub fn resolve_size(
    mode: SizeMode,
    custom: Size,
    percent: Vec2,
    parent: Size,
    ignore_intrinsic: bool,
    intrinsic: Size,
) -> Size {
    if ignore_intrinsic {
        return intrinsic;
    }
    match mode {
        SizeMode::Absolute => custom,
        SizeMode::Percent => parent.scale_by(percent),
    }
}

/// Fraction of `parent` covered by `absolute`, per axis. An axis whose parent
/// extent is not positive yields 0.
pub fn derive_percent(absolute: Vec2, parent: Size) -> Vec2 {
    Vec2 {
        x: ratio(absolute.x, parent.width),
        y: ratio(absolute.y, parent.height),
    }
}

/// [`derive_percent`] for a size rather than a point.
pub fn derive_percent_from_absolute(custom: Size, parent: Size) -> Vec2 {
    derive_percent(Vec2::new(custom.width, custom.height), parent)
}

/// Absolute point for a percent position.
pub fn resolve_position(percent: Vec2, parent: Size) -> Vec2 {
    Vec2 {
        x: parent.width * percent.x,
        y: parent.height * percent.y,
    }
}

fn ratio(value: f32, extent: f32) -> f32 {
    if extent > 0.0 { value / extent } else { 0.0 }
}
