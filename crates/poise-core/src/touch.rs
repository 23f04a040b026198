//! Per-widget touch state machine and the router that feeds it.
//!
//! A widget is `Idle` until a touch-begin lands inside its content box and
//! inside every clipping ancestor; it then tracks that touch until the end or
//! a cancel. Focus follows the live hit-test while tracking, and the phase of
//! the release decides between `Ended` and `Cancelled`.

use crate::{
    ChildTouch, ChildTouchPhase, NodeId, SceneTree, TouchEvent, TouchEventType, TouchId,
    TouchPhase, TouchResponse, TouchState, TrackingPhase, Vec2, WidgetFlags,
};

impl SceneTree {
    /// Register `id` with the dispatcher at its current priority. A previous
    /// registration is replaced, never duplicated.
    pub(crate) fn acquire_listener(&mut self, id: NodeId) {
        let Some(w) = self.arena.get_mut(id).and_then(|n| n.widget_mut()) else {
            return;
        };
        let priority = w.touch.priority;
        w.touch.listener = Some(match w.touch.listener.take() {
            Some(old) => self.dispatcher.reregister(old, id, priority),
            None => self.dispatcher.register(id, priority),
        });
    }

    pub(crate) fn release_listener(&mut self, id: NodeId) {
        let Some(w) = self.arena.get_mut(id).and_then(|n| n.widget_mut()) else {
            return;
        };
        if let Some(old) = w.touch.listener.take() {
            self.dispatcher.deregister(old);
        }
    }

    /// Touch-begin offered to one widget.
    pub fn on_touch_began(&mut self, id: NodeId, touch: TouchId, point: Vec2) -> TouchResponse {
        let Ok(w) = self.widget_mut(id) else {
            return TouchResponse::Ignored;
        };
        w.touch.hit_confirmed = false;
        if !w.is_enabled() || !w.touch.touch_enabled || w.touch.phase != TrackingPhase::Idle {
            return TouchResponse::Ignored;
        }
        w.touch.start_pos = point;

        let hit = self.hit_test(id, point) && self.clipping_parent_area_contains_point(id, point);
        if !hit {
            return TouchResponse::Ignored;
        }
        let Ok(w) = self.widget_mut(id) else {
            return TouchResponse::Ignored;
        };
        w.touch.hit_confirmed = true;
        w.touch.phase = TrackingPhase::Tracking(touch);
        let pass_through = w.flags.contains(WidgetFlags::TOUCH_PASS_THROUGH);

        let _ = self.set_focused(id, true);
        self.fire(id, TouchEventType::Began);
        self.relay_child_touch(id, ChildTouchPhase::Began, point);

        TouchResponse::Claimed {
            swallow: TouchState::SWALLOW && !pass_through,
        }
    }

    /// Focus becomes the live hit-test at `point`; tracking continues either way.
    pub fn on_touch_moved(&mut self, id: NodeId, touch: TouchId, point: Vec2) {
        let Ok(w) = self.widget_mut(id) else {
            return;
        };
        if w.touch.phase != TrackingPhase::Tracking(touch) {
            return;
        }
        w.touch.move_pos = point;
        let inside = self.hit_test(id, point);
        let _ = self.set_focused(id, inside);
        self.fire(id, TouchEventType::Moved);
        self.relay_child_touch(id, ChildTouchPhase::Moved, point);
    }

    /// Release: `Ended` if the finger is still over the widget, `Cancelled`
    /// if it wandered off after the begin.
    pub fn on_touch_ended(&mut self, id: NodeId, touch: TouchId, point: Vec2) {
        let Ok(w) = self.widget_mut(id) else {
            return;
        };
        if w.touch.phase != TrackingPhase::Tracking(touch) {
            return;
        }
        w.touch.end_pos = point;
        let was_focused = w.touch.focused;

        self.relay_child_touch(id, ChildTouchPhase::Ended, point);
        self.finish_tracking(id);
        self.fire(
            id,
            if was_focused {
                TouchEventType::Ended
            } else {
                TouchEventType::Cancelled
            },
        );
    }

    /// Platform-forced abort. A widget that is not tracking ignores it.
    pub fn on_touch_cancelled(&mut self, id: NodeId) {
        let Ok(w) = self.widget_mut(id) else {
            return;
        };
        if w.touch.phase == TrackingPhase::Idle {
            return;
        }
        self.finish_tracking(id);
        self.fire(id, TouchEventType::Cancelled);
    }

    fn finish_tracking(&mut self, id: NodeId) {
        let _ = self.set_focused(id, false);
        if let Ok(w) = self.widget_mut(id) {
            w.touch.phase = TrackingPhase::Idle;
            w.touch.hit_confirmed = false;
        }
    }

    fn fire(&self, id: NodeId, event: TouchEventType) {
        let callback = self.widget(id).ok().and_then(|w| w.callback.clone());
        if let Some(cb) = callback {
            cb(id, event);
        }
    }

    /// Is `point` accepted by the nearest clipping ancestor and, in turn, by
    /// the clipping ancestors above that one? No clipping ancestor accepts all.
    pub fn clipping_parent_area_contains_point(&mut self, id: NodeId, point: Vec2) -> bool {
        let mut clipper = None;
        let mut cursor = self.widget_parent(id);
        while let Some(p) = cursor {
            if self.arena[p]
                .widget()
                .is_some_and(|w| w.behavior.clipping_enabled())
            {
                clipper = Some(p);
                break;
            }
            cursor = self.widget_parent(p);
        }

        if let Some(w) = self.arena.get_mut(id).and_then(|n| n.widget_mut()) {
            w.touch.affected_by_clipping = clipper.is_some();
        }

        match clipper {
            None => true,
            Some(c) => self.hit_test(c, point) && self.clipping_parent_area_contains_point(c, point),
        }
    }

    /// Forward a touch phase to every widget ancestor of `sender`, nearest
    /// first, stopping at the first non-widget parent.
    pub fn relay_child_touch(&mut self, sender: NodeId, phase: ChildTouchPhase, point: Vec2) {
        let info = ChildTouch {
            phase,
            sender,
            point,
        };
        let mut cursor = self.widget_parent(sender);
        while let Some(p) = cursor {
            log::trace!("child touch {} from {sender:?} relayed to {p:?}", phase.code());
            if let Some(w) = self.arena[p].widget_mut() {
                w.behavior.observe_child_touch(info);
            }
            cursor = self.widget_parent(p);
        }
    }

    /// Route one platform event. Returns whether any listener consumed it.
    pub fn dispatch_touch(&mut self, event: &TouchEvent) -> bool {
        match event.phase {
            TouchPhase::Began => {
                let order = self.draw_order();
                let candidates = self
                    .dispatcher
                    .candidates(|n| order.get(&n).copied().unwrap_or(0));
                let mut consumed = false;
                for lid in candidates {
                    let Some(node) = self.dispatcher.node_of(lid) else {
                        continue;
                    };
                    match self.on_touch_began(node, event.id, event.position) {
                        TouchResponse::Ignored => {}
                        TouchResponse::Claimed { swallow } => {
                            self.dispatcher.claim(event.id, lid);
                            consumed = true;
                            if swallow {
                                log::debug!("{:?} swallowed by {node:?}", event.id);
                                break;
                            }
                        }
                    }
                }
                consumed
            }
            TouchPhase::Moved => {
                let claimers = self.dispatcher.claimers(event.id);
                for lid in &claimers {
                    if let Some(node) = self.dispatcher.node_of(*lid) {
                        self.on_touch_moved(node, event.id, event.position);
                    }
                }
                !claimers.is_empty()
            }
            TouchPhase::Ended => {
                let claimers = self.dispatcher.claimers(event.id);
                for lid in &claimers {
                    if let Some(node) = self.dispatcher.node_of(*lid) {
                        self.on_touch_ended(node, event.id, event.position);
                    }
                }
                self.dispatcher.release_touch(event.id);
                !claimers.is_empty()
            }
            TouchPhase::Cancelled => {
                let claimers = self.dispatcher.claimers(event.id);
                for lid in &claimers {
                    if let Some(node) = self.dispatcher.node_of(*lid) {
                        self.on_touch_cancelled(node);
                    }
                }
                self.dispatcher.release_touch(event.id);
                !claimers.is_empty()
            }
        }
    }
}
