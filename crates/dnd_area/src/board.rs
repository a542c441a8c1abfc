use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Instant};

use gpui::{Context, EntityId, Pixels, Point, ScrollHandle, Window, point, px};
use gpui_dnd_core::{
    AreaId, DndConfig, DragCoordinator, DragEffect, DragSignals, DropAreaConfig, Item, ItemId,
    ItemsChange, Rect, ScrollVector,
};

use crate::area::DndItemState;
use crate::layout::AreaLayout;

/// Upper bound for the frame delta used to advance auto-scroll.
const MAX_FRAME_SECS: f32 = 0.05;

/// Payload carried by gpui while an item is dragged.
#[derive(Clone, Debug)]
pub(crate) struct DndDrag {
    pub(crate) board: EntityId,
    pub(crate) area: AreaId,
    pub(crate) item: ItemId,
}

pub(crate) struct AreaView {
    pub(crate) scroll_handle: ScrollHandle,
    pub(crate) layout: Rc<RefCell<AreaLayout>>,
}

impl AreaView {
    fn new() -> Self {
        Self {
            scroll_handle: ScrollHandle::new(),
            layout: Rc::new(RefCell::new(AreaLayout::default())),
        }
    }
}

/// What an area element needs to draw itself for one frame.
pub(crate) struct AreaSnapshot<T> {
    pub(crate) config: DropAreaConfig,
    pub(crate) rows: Vec<(Item<T>, DndItemState)>,
    pub(crate) scroll_handle: ScrollHandle,
    pub(crate) layout: Rc<RefCell<AreaLayout>>,
    pub(crate) signals: DragSignals,
}

/// Shared state behind every drop area of one window.
///
/// Create it with `cx.new(|_| DndBoard::new())`, add areas, then render each
/// one with [`dnd_area`](crate::dnd_area). Items can only move between
/// areas of the same board.
pub struct DndBoard<T> {
    coordinator: DragCoordinator<T>,
    views: HashMap<AreaId, AreaView>,
    pointer: Option<Point<Pixels>>,
    velocities: HashMap<AreaId, ScrollVector>,
    last_frame: Option<Instant>,
    frame_scheduled: bool,
}

impl<T: Clone + 'static> Default for DndBoard<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> DndBoard<T> {
    pub fn new() -> Self {
        Self::with_config(DndConfig::default())
    }

    pub fn with_config(config: DndConfig) -> Self {
        Self {
            coordinator: DragCoordinator::with_config(config),
            views: HashMap::new(),
            pointer: None,
            velocities: HashMap::new(),
            last_frame: None,
            frame_scheduled: false,
        }
    }

    pub fn coordinator(&self) -> &DragCoordinator<T> {
        &self.coordinator
    }

    pub fn signals(&self) -> DragSignals {
        self.coordinator.signals()
    }

    pub fn items(&self, area: AreaId) -> &[Item<T>] {
        self.coordinator.items(area)
    }

    pub fn is_dragging(&self) -> bool {
        !self.coordinator.phase().is_idle()
    }

    pub fn add_area(
        &mut self,
        config: DropAreaConfig,
        items: impl Into<Vec<Item<T>>>,
        cx: &mut Context<Self>,
    ) -> AreaId {
        let area = self.coordinator.register_area(config, items.into());
        let view = AreaView::new();
        let layout = Rc::clone(&view.layout);
        self.coordinator
            .set_container(area, move || layout.borrow().container());
        self.views.insert(area, view);
        self.sync_handles(area);
        cx.notify();
        area
    }

    pub fn remove_area(&mut self, area: AreaId, cx: &mut Context<Self>) {
        let effects = self.coordinator.unregister_area(area);
        self.views.remove(&area);
        self.velocities.remove(&area);
        self.apply(effects, cx);
        cx.notify();
    }

    pub fn set_items(
        &mut self,
        area: AreaId,
        items: impl Into<Vec<Item<T>>>,
        cx: &mut Context<Self>,
    ) {
        let effects = self.coordinator.set_items(area, items.into());
        if let Some(view) = self.views.get(&area) {
            let registry = self.coordinator.area(area).map(|a| a.registry());
            view.layout
                .borrow_mut()
                .retain(|id| registry.is_some_and(|r| r.contains(id)));
        }
        self.sync_handles(area);
        self.apply(effects, cx);
        cx.notify();
    }

    /// Called once per committed change of `area`'s list.
    pub fn on_change(
        &mut self,
        area: AreaId,
        on_change: impl FnMut(&[Item<T>], &ItemsChange) + 'static,
    ) {
        self.coordinator.on_change(area, on_change);
    }

    /// Abort the current drag, if any.
    pub fn cancel(&mut self, cx: &mut Context<Self>) {
        let effects = self.coordinator.cancel();
        self.apply(effects, cx);
    }

    pub(crate) fn snapshot(&self, area: AreaId) -> Option<AreaSnapshot<T>> {
        let view = self.views.get(&area)?;
        let drop_area = self.coordinator.area(area)?;
        let rows = drop_area
            .items()
            .iter()
            .map(|item| {
                let state = DndItemState {
                    active: self.coordinator.is_active_item(area, &item.id),
                    settling: drop_area.in_motion().contains(&item.id),
                    floating: false,
                };
                (item.clone(), state)
            })
            .collect();
        Some(AreaSnapshot {
            config: drop_area.config().clone(),
            rows,
            scroll_handle: view.scroll_handle.clone(),
            layout: Rc::clone(&view.layout),
            signals: self.coordinator.signals(),
        })
    }

    pub(crate) fn item(&self, area: AreaId, id: &ItemId) -> Option<Item<T>> {
        self.coordinator
            .area(area)
            .and_then(|a| a.registry().get(id))
            .cloned()
    }

    pub(crate) fn begin(
        &mut self,
        drag: &DndDrag,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Option<Rect> {
        if !self.coordinator.phase().is_idle() {
            // Only transitions are pending; a new press takes over.
            let effects = self.coordinator.cancel();
            self.apply(effects, cx);
        }

        self.pointer = Some(window.mouse_position());
        let effects = self.coordinator.start_drag(drag.area, drag.item.clone());
        let floating = self.coordinator.floating_rect();
        self.apply(effects, cx);
        self.schedule_frame(window, cx);
        floating
    }

    pub(crate) fn drag_moved(
        &mut self,
        position: Point<Pixels>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(last) = self.pointer.replace(position) else {
            return;
        };
        let dx = f32::from(position.x - last.x);
        let dy = f32::from(position.y - last.y);
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let effects = self.coordinator.pointer_moved(dx, dy);
        self.apply(effects, cx);
        self.schedule_frame(window, cx);
    }

    pub(crate) fn dropped(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let effects = self.coordinator.release();
        self.apply(effects, cx);
        self.schedule_frame(window, cx);
    }

    fn schedule_frame(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.frame_scheduled {
            return;
        }
        self.frame_scheduled = true;
        let board = cx.entity().downgrade();
        window.on_next_frame(move |window, cx| {
            if board
                .update(cx, |board, cx| {
                    board.frame_scheduled = false;
                    board.on_frame(window, cx);
                })
                .is_err()
            {
                log::trace!("drop board is gone, frame loop stopped");
            }
        });
    }

    fn on_frame(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .replace(now)
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0)
            .min(MAX_FRAME_SECS);

        if self.coordinator.is_dragging() && !cx.has_active_drag() {
            log::debug!("pointer released outside every drop area");
            let effects = self.coordinator.release();
            self.apply(effects, cx);
        }

        let effects = self.coordinator.tick();
        self.apply(effects, cx);
        self.scroll_areas(dt);

        if !self.wants_frame() {
            self.last_frame = None;
            return;
        }
        cx.notify();
        self.schedule_frame(window, cx);
    }

    /// Displaced rows keep reporting their transitions after a drag ends, so
    /// the loop runs until they are applied.
    fn wants_frame(&self) -> bool {
        !self.coordinator.phase().is_idle()
            || self.coordinator.is_settling()
            || !self.velocities.is_empty()
    }

    fn scroll_areas(&self, dt: f32) {
        for (area, vector) in &self.velocities {
            let Some(view) = self.views.get(area) else {
                continue;
            };
            let Some((dx, dy)) = view.layout.borrow().scroll_step(*vector, dt) else {
                continue;
            };
            let offset = view.scroll_handle.offset();
            view.scroll_handle
                .set_offset(point(offset.x + px(dx), offset.y + px(dy)));
        }
    }

    fn apply(&mut self, effects: Vec<DragEffect>, cx: &mut Context<Self>) {
        if effects.is_empty() {
            return;
        }
        for effect in effects {
            match effect {
                DragEffect::MountOverlay { .. }
                | DragEffect::MoveOverlay { .. }
                | DragEffect::Reordered { .. } => {}
                DragEffect::UnmountOverlay { .. } => {
                    self.pointer = None;
                }
                DragEffect::Scroll { area, vector } => {
                    self.velocities.insert(area, vector);
                }
                DragEffect::StopScroll { area } => {
                    self.velocities.remove(&area);
                }
                DragEffect::HandedOff {
                    item,
                    from_area,
                    to_area,
                    ..
                } => {
                    if let Some(view) = self.views.get(&from_area) {
                        view.layout.borrow_mut().forget(&item);
                    }
                    self.sync_handles(to_area);
                }
            }
        }
        cx.notify();
    }

    /// Give every item of `area` without one a handle into the area's layout.
    fn sync_handles(&mut self, area: AreaId) {
        let Some(view) = self.views.get(&area) else {
            return;
        };
        let missing: Vec<ItemId> = self
            .coordinator
            .area(area)
            .map(|a| {
                a.items()
                    .iter()
                    .filter(|item| !a.registry().is_registered(&item.id))
                    .map(|item| item.id.clone())
                    .collect()
            })
            .unwrap_or_default();

        for id in missing {
            let layout = Rc::clone(&view.layout);
            let key = id.clone();
            self.coordinator
                .register_item(area, id, move || layout.borrow().item(&key));
        }
    }
}
