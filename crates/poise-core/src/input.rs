use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TouchId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Phase delivered by the input platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    /// Platform-forced abort (window lost focus, gesture stolen, ...).
    Cancelled,
}

/// A single-point event in world space.
#[derive(Clone, Debug)]
pub struct TouchEvent {
    pub id: TouchId,
    pub kind: PointerKind,
    pub phase: TouchPhase,
    pub position: Vec2,
}

impl TouchEvent {
    pub fn new(id: u64, phase: TouchPhase, position: Vec2) -> Self {
        Self {
            id: TouchId(id),
            kind: PointerKind::Touch,
            phase,
            position,
        }
    }
}

/// What a widget reports to its own registered callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEventType {
    Began,
    Moved,
    /// Finger lifted inside the hit area.
    Ended,
    /// Finger lifted outside, or the platform aborted the touch.
    Cancelled,
}

/// Phase relayed to widget ancestors so composites can observe descendants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildTouchPhase {
    Began,
    Moved,
    Ended,
}

impl ChildTouchPhase {
    /// Numeric state code: 0 began, 1 moved, 2 ended.
    pub fn code(self) -> i32 {
        match self {
            ChildTouchPhase::Began => 0,
            ChildTouchPhase::Moved => 1,
            ChildTouchPhase::Ended => 2,
        }
    }
}

/// Outcome of offering a touch-begin to one widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchResponse {
    /// Not hit; offer the point to the next candidate.
    Ignored,
    /// Hit. `swallow` stops lower-priority candidates from seeing the point.
    Claimed { swallow: bool },
}

impl TouchResponse {
    pub fn is_claimed(self) -> bool {
        matches!(self, TouchResponse::Claimed { .. })
    }
}
