//! Drag-to-reorder gesture state.
//!
//! The machine knows nothing about DOM events; the presentation layer feeds
//! it `drag_start` / `drag_over` / `drop_on` / `drag_end` and applies the
//! resulting [`ReorderRequest`] through the collection controller.

use crate::models::ItemId;
use wasm_bindgen::JsCast;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum DragPhase {
    #[default]
    Idle,
    Dragging {
        dragged: ItemId,
    },
    Hovering {
        dragged: ItemId,
        over: ItemId,
    },
}

/// When a collection may be rearranged at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArrangePolicy {
    Always,
    /// Only while the collection's edit mode is on.
    WhileEditing,
}

/// Where inside an item the gesture started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DragOrigin {
    Surface,
    /// A button/input/textarea embedded in the item; must stay clickable.
    Control,
}

impl DragOrigin {
    const CONTROL_SELECTOR: &'static str = "button, input, textarea, select";

    pub fn from_event(ev: &web_sys::Event) -> Self {
        let is_control = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(Self::CONTROL_SELECTOR).ok().flatten())
            .is_some();
        if is_control {
            DragOrigin::Control
        } else {
            DragOrigin::Surface
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ReorderRequest {
    pub moved: ItemId,
    pub target: ItemId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DragReorder {
    policy: ArrangePolicy,
    phase: DragPhase,
}

impl DragReorder {
    pub fn new(policy: ArrangePolicy) -> Self {
        Self {
            policy,
            phase: DragPhase::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    /// Returns `false` when the gesture must be cancelled (arranging is off,
    /// or it started on an inner control).
    pub fn drag_start(&mut self, id: ItemId, origin: DragOrigin, editing: bool) -> bool {
        let allowed = match self.policy {
            ArrangePolicy::Always => true,
            ArrangePolicy::WhileEditing => editing,
        };
        if !allowed || origin == DragOrigin::Control {
            return false;
        }

        self.phase = DragPhase::Dragging { dragged: id };
        true
    }

    /// Pointer entered `id`. Entering the dragged item itself is ignored.
    pub fn drag_over(&mut self, id: &ItemId) {
        let dragged = match &self.phase {
            DragPhase::Idle => return,
            DragPhase::Dragging { dragged } | DragPhase::Hovering { dragged, .. } => {
                dragged.clone()
            }
        };
        if &dragged == id {
            return;
        }

        self.phase = DragPhase::Hovering {
            dragged,
            over: id.clone(),
        };
    }

    /// Ends the gesture on the current drop target.
    pub fn drop(&mut self) -> Option<ReorderRequest> {
        match std::mem::take(&mut self.phase) {
            DragPhase::Hovering { dragged, over } => Some(ReorderRequest {
                moved: dragged,
                target: over,
            }),
            DragPhase::Idle | DragPhase::Dragging { .. } => None,
        }
    }

    /// Drop delivered to a specific item. Dropping onto the dragged item
    /// itself moves nothing.
    pub fn drop_on(&mut self, target: &ItemId) -> Option<ReorderRequest> {
        if self.dragged() == Some(target) {
            self.phase = DragPhase::Idle;
            return None;
        }
        self.drag_over(target);
        self.drop()
    }

    /// Gesture cancelled or finished; never mutates anything.
    pub fn drag_end(&mut self) {
        self.phase = DragPhase::Idle;
    }

    pub fn dragged(&self) -> Option<&ItemId> {
        match &self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging { dragged } | DragPhase::Hovering { dragged, .. } => Some(dragged),
        }
    }

    pub fn over(&self) -> Option<&ItemId> {
        match &self.phase {
            DragPhase::Hovering { over, .. } => Some(over),
            _ => None,
        }
    }

    /// Rendered faded.
    pub fn is_dragged(&self, id: &ItemId) -> bool {
        self.dragged() == Some(id)
    }

    /// Rendered with the drop-target ring.
    pub fn is_drop_target(&self, id: &ItemId) -> bool {
        self.over() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    #[test]
    fn test_start_over_over_drop_yields_single_request_to_last_target() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        assert!(d.drag_start(id("x"), DragOrigin::Surface, false));
        d.drag_over(&id("y"));
        d.drag_over(&id("z"));

        let req = d.drop();
        assert_eq!(
            req,
            Some(ReorderRequest {
                moved: id("x"),
                target: id("z")
            })
        );
        assert!(d.is_idle());
        assert_eq!(d.drop(), None);
    }

    #[test]
    fn test_start_then_end_yields_nothing() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        d.drag_start(id("x"), DragOrigin::Surface, false);
        d.drag_over(&id("y"));
        d.drag_end();
        assert!(d.is_idle());
        assert_eq!(d.drop(), None);
    }

    #[test]
    fn test_drop_without_target_yields_nothing() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        d.drag_start(id("x"), DragOrigin::Surface, false);
        assert_eq!(d.drop(), None);
        assert!(d.is_idle());
    }

    #[test]
    fn test_self_target_is_ignored() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        d.drag_start(id("x"), DragOrigin::Surface, false);
        d.drag_over(&id("x"));
        assert_eq!(d.phase, DragPhase::Dragging { dragged: id("x") });
        assert!(!d.is_drop_target(&id("x")));

        d.drag_over(&id("y"));
        d.drag_over(&id("x"));
        assert!(d.is_drop_target(&id("y")));
    }

    #[test]
    fn test_drop_on_dragged_item_moves_nothing() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        d.drag_start(id("x"), DragOrigin::Surface, false);
        d.drag_over(&id("y"));
        assert_eq!(d.drop_on(&id("x")), None);
        assert!(d.is_idle());
    }

    #[test]
    fn test_drop_on_uses_delivered_target() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        d.drag_start(id("x"), DragOrigin::Surface, false);
        d.drag_over(&id("y"));
        assert_eq!(
            d.drop_on(&id("z")),
            Some(ReorderRequest {
                moved: id("x"),
                target: id("z")
            })
        );
    }

    #[test]
    fn test_edit_mode_gates_link_dragging() {
        let mut d = DragReorder::new(ArrangePolicy::WhileEditing);
        assert!(!d.drag_start(id("x"), DragOrigin::Surface, false));
        assert!(d.is_idle());
        assert!(d.drag_start(id("x"), DragOrigin::Surface, true));
        assert!(d.is_dragged(&id("x")));
    }

    #[test]
    fn test_inner_controls_cancel_drag_start() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        assert!(!d.drag_start(id("x"), DragOrigin::Control, true));
        assert!(d.is_idle());
    }

    #[test]
    fn test_over_while_idle_is_ignored() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        d.drag_over(&id("y"));
        assert!(d.is_idle());
        assert_eq!(d.over(), None);
    }

    #[test]
    fn test_gestures_are_independent() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        d.drag_start(id("a"), DragOrigin::Surface, false);
        d.drag_over(&id("b"));
        d.drop();

        d.drag_start(id("c"), DragOrigin::Surface, false);
        assert_eq!(d.over(), None);
        assert_eq!(d.drop(), None);
    }

    #[test]
    fn test_visual_flags_follow_state() {
        let mut d = DragReorder::new(ArrangePolicy::Always);
        d.drag_start(id("a"), DragOrigin::Surface, false);
        d.drag_over(&id("b"));
        assert!(d.is_dragged(&id("a")));
        assert!(!d.is_dragged(&id("b")));
        assert!(d.is_drop_target(&id("b")));
        d.drag_end();
        assert!(!d.is_dragged(&id("a")));
        assert!(!d.is_drop_target(&id("b")));
    }
}
