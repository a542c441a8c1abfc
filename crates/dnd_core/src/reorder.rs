use crate::geometry::{Orientation, Rect};
use crate::item::ItemId;
use crate::motion::InMotionSet;
use crate::registry::ItemRegistry;

/// A reorder decision: the dragged item moves from `from` to `to`, displacing
/// `displaced` (nearest neighbor first).
#[derive(Clone, Debug, PartialEq)]
pub struct ReorderPlan {
    pub from: usize,
    pub to: usize,
    pub displaced: Vec<ItemId>,
}

/// Decide where the item currently at `from` belongs, given its floating rect.
///
/// Neighbors are evaluated strictly nearest-first. A neighbor that is in
/// motion or cannot be measured stops the scan in that direction, so an
/// item is never passed over without being evaluated. Returns `None` when the
/// item stays where it is.
pub fn plan_reorder<T>(
    registry: &ItemRegistry<T>,
    in_motion: &InMotionSet,
    from: usize,
    dragged: Rect,
    orientation: Orientation,
) -> Option<ReorderPlan> {
    let items = registry.items();
    if items.len() < 2 || from >= items.len() {
        return None;
    }

    let center = dragged.center(orientation);
    let dragged_extent = dragged.extent(orientation);
    let mut to = from;
    let mut displaced = Vec::new();

    while to > 0 {
        let neighbor = &items[to - 1].id;
        if in_motion.contains(neighbor) {
            break;
        }
        let Some(rect) = registry.measure(neighbor) else {
            break;
        };
        let threshold =
            rect.start(orientation) + (rect.extent(orientation) + dragged_extent) / 2.0;
        if center < threshold {
            to -= 1;
            displaced.push(neighbor.clone());
        } else {
            break;
        }
    }

    if to == from {
        while to + 1 < items.len() {
            let neighbor = &items[to + 1].id;
            if in_motion.contains(neighbor) {
                break;
            }
            let Some(rect) = registry.measure(neighbor) else {
                break;
            };
            let threshold =
                rect.start(orientation) + (rect.extent(orientation) - dragged_extent) / 2.0;
            if center > threshold {
                to += 1;
                displaced.push(neighbor.clone());
            } else {
                break;
            }
        }
    }

    let to = to.min(items.len() - 1);
    if to == from {
        return None;
    }

    log::trace!(
        "reorder plan {from} -> {to}, displacing {} item(s)",
        displaced.len()
    );
    Some(ReorderPlan {
        from,
        to,
        displaced,
    })
}

/// Commit `plan`: move the item and mark every displaced neighbor as in motion.
pub fn apply_reorder<T>(
    registry: &mut ItemRegistry<T>,
    in_motion: &mut InMotionSet,
    plan: ReorderPlan,
) -> bool {
    if !registry.move_committed(plan.from, plan.to) {
        return false;
    }
    for id in plan.displaced {
        in_motion.insert(id);
    }
    true
}
