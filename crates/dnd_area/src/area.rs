use std::rc::Rc;

use gpui::{
    AnyElement, App, AppContext as _, CursorStyle, DragMoveEvent, ElementId, Entity,
    InteractiveElement as _, IntoElement, ParentElement as _, RenderOnce,
    StatefulInteractiveElement as _, StyleRefinement, Styled, Window, canvas, div,
    prelude::FluentBuilder as _,
};
use gpui_component::StyledExt as _;
use gpui_dnd_core::{AreaId, Item, Orientation};

use crate::board::{DndBoard, DndDrag};
use crate::ghost::DragGhost;

pub(crate) type RenderItem<T> =
    Rc<dyn Fn(&Item<T>, DndItemState, &mut Window, &mut App) -> AnyElement>;

/// Create a [`DndArea`] for `area` of `board`.
pub fn dnd_area<T, R, E>(board: &Entity<DndBoard<T>>, area: AreaId, render_item: R) -> DndArea<T>
where
    T: Clone + 'static,
    R: Fn(&Item<T>, DndItemState, &mut Window, &mut App) -> E + 'static,
    E: IntoElement,
{
    DndArea::new(board, area, render_item)
}

/// Per-item flags passed to the render callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DndItemState {
    /// The item is being dragged; its slot stays in the list as a placeholder.
    pub active: bool,
    /// The item was just displaced and has not been laid out at its new slot yet.
    pub settling: bool,
    /// Rendering the floating copy that follows the pointer.
    pub floating: bool,
}

/// One drop area: a list, scroll view or static view whose items can be
/// reordered by dragging, and moved to other areas of the same group.
#[derive(IntoElement)]
pub struct DndArea<T: Clone + 'static> {
    id: ElementId,
    board: Entity<DndBoard<T>>,
    area: AreaId,
    style: StyleRefinement,
    render_item: RenderItem<T>,
}

impl<T: Clone + 'static> DndArea<T> {
    pub fn new<R, E>(board: &Entity<DndBoard<T>>, area: AreaId, render_item: R) -> Self
    where
        R: Fn(&Item<T>, DndItemState, &mut Window, &mut App) -> E + 'static,
        E: IntoElement,
    {
        Self {
            id: ElementId::Name(
                format!("dnd-area-{}-{}", board.entity_id(), area.as_u64()).into(),
            ),
            board: board.clone(),
            area,
            style: StyleRefinement::default(),
            render_item: Rc::new(move |item, state, window, cx| {
                render_item(item, state, window, cx).into_any_element()
            }),
        }
    }
}

impl<T: Clone + 'static> Styled for DndArea<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: Clone + 'static> RenderOnce for DndArea<T> {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let board_id = self.board.entity_id();
        let area = self.area;
        let Some(snapshot) = self.board.read(cx).snapshot(area) else {
            log::debug!("{area} is not registered on board {board_id}");
            return div().id(self.id).refine_style(&self.style);
        };

        let axes = snapshot.config.scroll_axes;
        let orientation = snapshot.config.orientation;

        let mut rows = Vec::with_capacity(snapshot.rows.len());
        for (item, state) in snapshot.rows {
            let element = (self.render_item)(&item, state, window, cx);
            let id = item.id;
            let layout = Rc::clone(&snapshot.layout);
            let signals = snapshot.signals.clone();
            let board = self.board.clone();
            let render_item = Rc::clone(&self.render_item);
            let drag = DndDrag {
                board: board_id,
                area,
                item: id.clone(),
            };

            rows.push(
                div()
                    .id(ElementId::Name(format!("dnd-item-{}-{id}", area.as_u64()).into()))
                    .relative()
                    .flex_none()
                    .cursor(CursorStyle::OpenHand)
                    .when(state.active, |this| this.opacity(0.35))
                    .child(element)
                    .child(
                        canvas(
                            move |bounds, _, _| {
                                layout.borrow_mut().record_item(id.clone(), bounds);
                                if state.settling {
                                    signals.transition_done(area, id);
                                }
                            },
                            |_, _, _, _| {},
                        )
                        .absolute()
                        .top_0()
                        .left_0()
                        .size_full(),
                    )
                    .on_drag(drag, move |drag, _offset, window, cx| {
                        let floating =
                            board.update(cx, |board, cx| board.begin(drag, window, cx));
                        let item = board.read(cx).item(drag.area, &drag.item);
                        let render_item = Rc::clone(&render_item);
                        cx.new(|_| DragGhost::new(item, floating, render_item))
                    }),
            );
        }

        let container_layout = Rc::clone(&snapshot.layout);
        let move_board = self.board.clone();
        let drop_board = self.board.clone();

        div()
            .id(self.id)
            .relative()
            .size_full()
            .child(
                div()
                    .id("dnd-area-content")
                    .size_full()
                    .flex()
                    .map(|this| match orientation {
                        Orientation::Vertical => this.flex_col(),
                        Orientation::Horizontal => this.flex_row(),
                    })
                    .when(axes.vertical, |this| this.overflow_y_scroll())
                    .when(axes.horizontal, |this| this.overflow_x_scroll())
                    .when(!axes.is_none(), |this| {
                        this.track_scroll(&snapshot.scroll_handle)
                    })
                    .children(rows),
            )
            .child(
                canvas(
                    move |bounds, _, _| container_layout.borrow_mut().set_container(bounds),
                    |_, _, _, _| {},
                )
                .absolute()
                .top_0()
                .left_0()
                .size_full(),
            )
            .on_drag_move::<DndDrag>(
                move |event: &DragMoveEvent<DndDrag>, window: &mut Window, cx: &mut App| {
                    if event.drag(cx).board != board_id {
                        return;
                    }
                    let position = event.event.position;
                    move_board.update(cx, |board, cx| board.drag_moved(position, window, cx));
                },
            )
            .on_drop::<DndDrag>(move |drag: &DndDrag, window: &mut Window, cx: &mut App| {
                if drag.board != board_id {
                    return;
                }
                drop_board.update(cx, |board, cx| board.dropped(window, cx));
            })
            .refine_style(&self.style)
    }
}
