//! Headless drag-and-drop coordination.
//!
//! A [`DragCoordinator`] owns every [`DropArea`] and the single active
//! [`DragSession`]. The rendering layer feeds it measurements, pointer deltas
//! and frame ticks, and carries out the [`DragEffect`]s it returns.

mod area;
mod autoscroll;
mod config;
mod coordinator;
mod geometry;
mod item;
mod motion;
mod registry;
mod reorder;
mod session;
mod signal;

pub use area::{AreaId, AreaKind, DropArea, DropAreaConfig, GroupId, ItemsChange};
pub use autoscroll::{AutoScrollConfig, ScrollVector, advise};
pub use config::DndConfig;
pub use coordinator::DragCoordinator;
pub use geometry::{Measure, Orientation, Rect, ScrollAxes};
pub use item::{Item, ItemId, items_from};
pub use motion::InMotionSet;
pub use registry::ItemRegistry;
pub use reorder::{ReorderPlan, apply_reorder, plan_reorder};
pub use session::{DragEffect, DragPhase, DragSession};
pub use signal::DragSignals;
