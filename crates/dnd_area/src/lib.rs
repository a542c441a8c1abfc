//! gpui drop areas backed by [`gpui_dnd_core`].
//!
//! A [`DndBoard`] entity owns the drag coordinator for one window. Each area
//! is rendered with [`dnd_area`]; items dragged out of it follow the pointer
//! as a floating copy, reorder their siblings, and hop into other areas that
//! share its group.

mod area;
mod board;
mod ghost;
mod layout;

pub use area::{DndArea, DndItemState, dnd_area};
pub use board::DndBoard;
pub use gpui_dnd_core::{
    AreaId, AreaKind, AutoScrollConfig, DndConfig, DragPhase, DropAreaConfig, GroupId, Item,
    ItemId, ItemsChange, Orientation, ScrollAxes, items_from,
};
