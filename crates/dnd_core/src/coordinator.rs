use crate::area::{AreaId, DropArea, DropAreaConfig, GroupId, ItemsChange};
use crate::autoscroll::advise;
use crate::config::DndConfig;
use crate::geometry::{Measure, Rect};
use crate::item::{Item, ItemId};
use crate::session::{DragEffect, DragPhase, DragSession};
use crate::signal::{DragSignal, DragSignals, SignalQueue};

/// Owner of every drop area and of the (at most one) active drag session.
///
/// All mutation goes through `&mut self` requests; events produced on other
/// threads are delivered through [`DragSignals`] and applied on the next
/// [`tick`](Self::tick).
pub struct DragCoordinator<T> {
    config: DndConfig,
    areas: Vec<DropArea<T>>,
    next_area_id: u64,
    phase: DragPhase,
    scrolling: Vec<AreaId>,
    signals: SignalQueue,
}

impl<T> Default for DragCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DragCoordinator<T> {
    pub fn new() -> Self {
        Self::with_config(DndConfig::default())
    }

    pub fn with_config(config: DndConfig) -> Self {
        Self {
            config,
            areas: Vec::new(),
            next_area_id: 1,
            phase: DragPhase::Idle,
            scrolling: Vec::new(),
            signals: SignalQueue::default(),
        }
    }

    pub fn config(&self) -> &DndConfig {
        &self.config
    }

    pub fn signals(&self) -> DragSignals {
        self.signals.handle()
    }

    // Areas

    pub fn register_area(&mut self, config: DropAreaConfig, items: Vec<Item<T>>) -> AreaId {
        let id = AreaId(self.next_area_id);
        self.next_area_id += 1;
        log::debug!(
            "register {id} ({:?}, group {:?}) with {} item(s)",
            config.kind,
            config.group.as_ref().map(GroupId::as_str),
            items.len()
        );
        self.areas.push(DropArea::new(id, config, items));
        id
    }

    /// Remove an area. A drag living in it is cancelled.
    pub fn unregister_area(&mut self, id: AreaId) -> Vec<DragEffect> {
        let mut effects = Vec::new();
        if self.phase.session().is_some_and(|s| s.area == id) {
            effects.extend(self.cancel());
        }
        if let Some(ix) = self.area_index(id) {
            self.areas.remove(ix);
            if let Some(pos) = self.scrolling.iter().position(|a| *a == id) {
                self.scrolling.remove(pos);
                effects.push(DragEffect::StopScroll { area: id });
            }
            log::debug!("unregister {id}");
        }
        effects
    }

    pub fn area(&self, id: AreaId) -> Option<&DropArea<T>> {
        self.areas.iter().find(|area| area.id() == id)
    }

    /// Areas in registration order.
    pub fn areas(&self) -> impl Iterator<Item = &DropArea<T>> + '_ {
        self.areas.iter()
    }

    /// Items of `area`, empty when the area is unknown.
    pub fn items(&self, area: AreaId) -> &[Item<T>] {
        self.area(area).map(|a| a.items()).unwrap_or(&[])
    }

    /// Attach the container measurement handle of `area`.
    pub fn set_container(&mut self, area: AreaId, handle: impl Measure + 'static) -> bool {
        self.area_mut(area)
            .map(|a| a.set_container(Box::new(handle)))
            .is_some()
    }

    /// Install the change notifier of `area`, called once per committed mutation.
    pub fn on_change(
        &mut self,
        area: AreaId,
        on_change: impl FnMut(&[Item<T>], &ItemsChange) + 'static,
    ) -> bool {
        self.area_mut(area)
            .map(|a| a.set_on_change(Box::new(on_change)))
            .is_some()
    }

    pub fn register_item(
        &mut self,
        area: AreaId,
        id: impl Into<ItemId>,
        handle: impl Measure + 'static,
    ) -> bool {
        self.area_mut(area)
            .map(|a| a.registry_mut().register(id, handle))
            .is_some()
    }

    pub fn unregister_item(&mut self, area: AreaId, id: &ItemId) -> bool {
        self.area_mut(area)
            .is_some_and(|a| a.registry_mut().unregister(id))
    }

    /// Replace the list of `area`. A drag whose item disappears is cancelled.
    pub fn set_items(&mut self, area: AreaId, items: Vec<Item<T>>) -> Vec<DragEffect> {
        let mut effects = Vec::new();
        let Some(target) = self.area_mut(area) else {
            return effects;
        };
        target.replace_items(items);

        let lost = self
            .phase
            .session()
            .is_some_and(|s| s.area == area && !self.items_contain(area, &s.item));
        if lost {
            log::debug!("dragged item left {area} through set_items");
            effects.extend(self.cancel());
        }
        effects
    }

    // Session queries

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.phase.session()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Whether `item` of `area` is the one being dragged (or resolving).
    pub fn is_active_item(&self, area: AreaId, item: &ItemId) -> bool {
        self.phase
            .session()
            .is_some_and(|s| s.area == area && s.item == *item)
    }

    pub fn floating_rect(&self) -> Option<Rect> {
        self.phase.session().map(|s| s.floating)
    }

    /// Whether any area still has items waiting for their transition to end.
    ///
    /// Stays true after a cancel until the pending transitions are reported
    /// and applied by [`tick`](Self::tick).
    pub fn is_settling(&self) -> bool {
        self.areas.iter().any(|area| !area.in_motion().is_empty())
    }

    // Lifecycle

    /// Begin dragging `item` of `area`.
    ///
    /// Ignored unless idle. The item must be measurable: its current rect
    /// becomes the floating rect.
    pub fn start_drag(&mut self, area: AreaId, item: impl Into<ItemId>) -> Vec<DragEffect> {
        let item = item.into();
        let mut effects = Vec::new();
        if !self.phase.is_idle() {
            log::debug!("start_drag({item}) ignored while {}", self.phase.name());
            return effects;
        }
        let Some(source) = self.area(area) else {
            return effects;
        };
        if !source.registry().contains(&item) {
            return effects;
        }
        let Some(rect) = source.registry().measure(&item) else {
            log::debug!("start_drag({item}) ignored: item has no measurement yet");
            return effects;
        };

        let session = DragSession {
            area,
            origin_area: area,
            item: item.clone(),
            group: source.group().cloned(),
            floating: rect,
        };
        self.phase = DragPhase::Armed(session.clone());
        log::debug!("armed {item} in {area} at {rect:?}");

        self.phase = DragPhase::Dragging(session);
        effects.push(DragEffect::MountOverlay { area, item, rect });
        effects
    }

    /// Move the floating rect by a pointer delta.
    pub fn pointer_moved(&mut self, dx: f32, dy: f32) -> Vec<DragEffect> {
        let DragPhase::Dragging(session) = &mut self.phase else {
            return Vec::new();
        };
        session.floating = session.floating.offset(dx, dy);
        vec![DragEffect::MoveOverlay {
            rect: session.floating,
        }]
    }

    /// Per-frame evaluation.
    ///
    /// Pending signals are applied first, so a transition reported before
    /// this frame is already settled when the reorder engine runs.
    pub fn tick(&mut self) -> Vec<DragEffect> {
        let mut effects = Vec::new();
        self.drain_signals(&mut effects);

        let (area, item, group, floating) = match &self.phase {
            DragPhase::Dragging(s) => (s.area, s.item.clone(), s.group.clone(), s.floating),
            DragPhase::Resolving(_) => {
                self.try_finish(&mut effects);
                return effects;
            }
            DragPhase::Idle | DragPhase::Armed(_) => return effects,
        };

        self.advise_scroll(floating, &mut effects);

        let Some(owner) = self.owning_area(area, group.as_ref(), floating) else {
            log::trace!("no drop area owns {item} this frame");
            return effects;
        };

        if owner != area {
            self.handoff(area, owner, &item, floating, &mut effects);
        } else if let Some(ix) = self.area_index(owner)
            && let Some((from, to)) = self.areas[ix].reorder(&item, floating)
        {
            log::trace!("{item} moved {from} -> {to} in {owner}");
            effects.push(DragEffect::Reordered {
                area: owner,
                item,
                from,
                to,
            });
        }
        effects
    }

    /// Pointer released: stop scrolling and wait for pending transitions.
    pub fn release(&mut self) -> Vec<DragEffect> {
        let mut effects = Vec::new();
        let session = match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(session) => session,
            other => {
                self.phase = other;
                return effects;
            }
        };
        log::debug!("released {} in {}", session.item, session.area);
        self.stop_all_scrolling(&mut effects);
        self.phase = DragPhase::Resolving(session);
        self.try_finish(&mut effects);
        effects
    }

    /// Abort the drag immediately. Safe to call in any phase.
    pub fn cancel(&mut self) -> Vec<DragEffect> {
        let mut effects = Vec::new();
        let Some(session) = std::mem::take(&mut self.phase).session().cloned() else {
            return effects;
        };
        log::debug!("cancelled drag of {} in {}", session.item, session.area);
        self.stop_all_scrolling(&mut effects);
        effects.push(DragEffect::UnmountOverlay { item: session.item });
        effects
    }

    /// The layout transition of `item` in `area` finished.
    pub fn transition_done(&mut self, area: AreaId, item: &ItemId) -> Vec<DragEffect> {
        let mut effects = Vec::new();
        self.settle(area, item);
        self.try_finish(&mut effects);
        effects
    }

    // Internals

    fn area_index(&self, id: AreaId) -> Option<usize> {
        self.areas.iter().position(|area| area.id() == id)
    }

    fn area_mut(&mut self, id: AreaId) -> Option<&mut DropArea<T>> {
        self.areas.iter_mut().find(|area| area.id() == id)
    }

    fn items_contain(&self, area: AreaId, item: &ItemId) -> bool {
        self.area(area).is_some_and(|a| a.registry().contains(item))
    }

    fn settle(&mut self, area: AreaId, item: &ItemId) {
        if let Some(target) = self.area_mut(area)
            && target.settle(item)
        {
            log::trace!("{item} settled in {area}");
        }
    }

    fn drain_signals(&mut self, effects: &mut Vec<DragEffect>) {
        while let Some(signal) = self.signals.next() {
            match signal {
                DragSignal::TransitionDone { area, item } => self.settle(area, &item),
                DragSignal::Cancel => effects.extend(self.cancel()),
            }
        }
    }

    fn try_finish(&mut self, effects: &mut Vec<DragEffect>) {
        let DragPhase::Resolving(session) = &self.phase else {
            return;
        };
        let pending = self
            .area(session.area)
            .is_some_and(|a| !a.in_motion().is_empty());
        if pending {
            return;
        }
        let item = session.item.clone();
        log::debug!("drag of {item} finished in {}", session.area);
        self.phase = DragPhase::Idle;
        effects.push(DragEffect::UnmountOverlay { item });
    }

    fn advise_scroll(&mut self, floating: Rect, effects: &mut Vec<DragEffect>) {
        for area in &self.areas {
            let id = area.id();
            let vector = area
                .measure_container()
                .map(|viewport| {
                    advise(
                        floating,
                        viewport,
                        area.config().scroll_axes,
                        &self.config.auto_scroll,
                    )
                })
                .unwrap_or_default();
            let was_scrolling = self.scrolling.contains(&id);
            if !vector.is_zero() {
                if !was_scrolling {
                    self.scrolling.push(id);
                }
                effects.push(DragEffect::Scroll { area: id, vector });
            } else if was_scrolling {
                self.scrolling.retain(|a| *a != id);
                effects.push(DragEffect::StopScroll { area: id });
            }
        }
    }

    fn stop_all_scrolling(&mut self, effects: &mut Vec<DragEffect>) {
        effects.extend(
            self.scrolling
                .drain(..)
                .map(|area| DragEffect::StopScroll { area }),
        );
    }

    /// The eligible area with the largest share of the floating rect over its
    /// container. Ties go to the area registered first.
    fn owning_area(
        &self,
        current: AreaId,
        group: Option<&GroupId>,
        floating: Rect,
    ) -> Option<AreaId> {
        let mut best: Option<(AreaId, f32)> = None;
        for area in &self.areas {
            let eligible = match group {
                None => area.id() == current,
                Some(group) => area.group() == Some(group),
            };
            if !eligible {
                continue;
            }
            let Some(container) = area.measure_container() else {
                continue;
            };
            let fraction = floating.overlap_fraction(&container);
            if fraction <= 0.0 || fraction < self.config.min_owner_overlap {
                continue;
            }
            if best.is_none_or(|(_, top)| fraction > top) {
                best = Some((area.id(), fraction));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Move the dragged item from `source` into `target` as one step.
    ///
    /// The insertion index is resolved before anything is removed, so the
    /// item is never left in neither or both areas.
    fn handoff(
        &mut self,
        source: AreaId,
        target: AreaId,
        item: &ItemId,
        floating: Rect,
        effects: &mut Vec<DragEffect>,
    ) {
        let (Some(src_ix), Some(dst_ix)) = (self.area_index(source), self.area_index(target))
        else {
            return;
        };
        if self.areas[dst_ix].registry().contains(item) {
            log::warn!("{target} already holds {item}, handoff skipped");
            return;
        }
        let Some(index) = self.areas[dst_ix].insertion_index(floating) else {
            log::trace!("handoff of {item} to {target} deferred: no measured items");
            return;
        };
        let Some((from_index, entry)) = self.areas[src_ix].take_item(item) else {
            return;
        };
        let to_index = match self.areas[dst_ix].put_item(index, entry) {
            Ok(to_index) => to_index,
            Err(entry) => {
                // Unreachable after the contains check; put the item back where it was.
                let _ = self.areas[src_ix].put_item(from_index, entry);
                return;
            }
        };

        if let DragPhase::Dragging(session) = &mut self.phase {
            session.area = target;
        }
        log::debug!("handed off {item} from {source}[{from_index}] to {target}[{to_index}]");
        effects.push(DragEffect::HandedOff {
            item: item.clone(),
            from_area: source,
            from_index,
            to_area: target,
            to_index,
        });
    }
}
