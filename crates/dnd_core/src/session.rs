use crate::area::{AreaId, GroupId};
use crate::autoscroll::ScrollVector;
use crate::geometry::Rect;
use crate::item::ItemId;

/// The single active drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    /// Area currently holding the item. Changes on handoff.
    pub area: AreaId,
    /// Area the drag started in.
    pub origin_area: AreaId,
    pub item: ItemId,
    pub group: Option<GroupId>,
    /// Floating rect; the size is fixed for the whole session.
    pub floating: Rect,
}

/// Drag lifecycle.
///
/// ```text
/// Idle -> Armed -> Dragging -> Resolving -> Idle
///                     \-------(cancel)------> Idle
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Armed(DragSession),
    Dragging(DragSession),
    /// Released; waiting for in-flight transitions before dropping the overlay.
    Resolving(DragSession),
}

impl DragPhase {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragPhase::Idle => None,
            DragPhase::Armed(session)
            | DragPhase::Dragging(session)
            | DragPhase::Resolving(session) => Some(session),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragPhase::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DragPhase::Idle => "idle",
            DragPhase::Armed(_) => "armed",
            DragPhase::Dragging(_) => "dragging",
            DragPhase::Resolving(_) => "resolving",
        }
    }
}

/// Side effects the rendering layer has to carry out.
#[derive(Clone, Debug, PartialEq)]
pub enum DragEffect {
    MountOverlay {
        area: AreaId,
        item: ItemId,
        rect: Rect,
    },
    MoveOverlay {
        rect: Rect,
    },
    UnmountOverlay {
        item: ItemId,
    },
    Scroll {
        area: AreaId,
        vector: ScrollVector,
    },
    StopScroll {
        area: AreaId,
    },
    Reordered {
        area: AreaId,
        item: ItemId,
        from: usize,
        to: usize,
    },
    HandedOff {
        item: ItemId,
        from_area: AreaId,
        from_index: usize,
        to_area: AreaId,
        to_index: usize,
    },
}
