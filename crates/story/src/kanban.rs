use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{ActiveTheme as _, h_flex, v_flex};
use gpui_dnd_area::{
    AreaId, DndBoard, DndItemState, DropAreaConfig, Item, ItemsChange, Orientation, dnd_area,
    items_from,
};

const GROUP: &str = "kanban";
const LOG_LINES: usize = 8;

#[derive(Clone)]
pub struct Card {
    id: u32,
    title: SharedString,
}

impl Card {
    fn new(id: u32, title: &'static str) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

pub struct KanbanExample {
    board: Entity<DndBoard<Card>>,
    todo: AreaId,
    done: AreaId,
    tags: AreaId,
    log: Rc<RefCell<VecDeque<String>>>,
}

impl KanbanExample {
    pub fn view(_window: &mut Window, cx: &mut App) -> Entity<Self> {
        let log = Rc::new(RefCell::new(VecDeque::new()));

        let board = cx.new(|_| DndBoard::new());
        let (todo, done, tags) = board.update(cx, |board, cx| {
            let todo = board.add_area(
                DropAreaConfig::list().group(GROUP),
                items_from(todo_cards(), |card| card.id),
                cx,
            );
            let done = board.add_area(
                DropAreaConfig::list().group(GROUP),
                items_from(done_cards(), |card| card.id),
                cx,
            );
            let tags = board.add_area(
                DropAreaConfig::view().orientation(Orientation::Horizontal),
                items_from(tag_cards(), |card| card.id),
                cx,
            );
            for (area, name) in [(todo, "todo"), (done, "done"), (tags, "tags")] {
                let log = Rc::clone(&log);
                board.on_change(area, move |items: &[Item<Card>], change: &ItemsChange| {
                    push_log(&log, name, items, change);
                });
            }
            (todo, done, tags)
        });

        cx.new(|cx| {
            cx.observe(&board, |_, _, cx| cx.notify()).detach();
            Self {
                board,
                todo,
                done,
                tags,
                log,
            }
        })
    }
}

impl Render for KanbanExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let muted = theme.muted_foreground;
        let border = theme.border;
        let background = theme.background;
        let phase = self.board.read(cx).coordinator().phase().name();
        let log = self.log.borrow().iter().cloned().collect::<Vec<_>>();

        let column = |title: &'static str, area: AreaId| {
            v_flex()
                .flex_1()
                .min_w(px(0.))
                .h_full()
                .gap_y_2()
                .child(
                    div()
                        .text_sm()
                        .font_weight(FontWeight::MEDIUM)
                        .child(title),
                )
                .child(
                    div()
                        .flex_1()
                        .min_h(px(0.))
                        .p(px(6.))
                        .rounded(px(12.))
                        .border_1()
                        .border_color(border)
                        .bg(background)
                        .child(dnd_area(&self.board, area, render_card)),
                )
        };

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Drop areas"),
                    )
                    .child(div().text_sm().text_color(muted).child(
                        "Drag cards to reorder them. Cards move between the two columns; tags stay in their row.",
                    ))
                    .child(
                        div()
                            .text_sm()
                            .text_color(muted)
                            .child(format!("Drag phase: {phase}")),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(column("To do", self.todo))
                    .child(column("Done", self.done)),
            )
            .child(
                div()
                    .h(px(64.))
                    .p(px(6.))
                    .rounded(px(12.))
                    .border_1()
                    .border_color(border)
                    .bg(background)
                    .child(dnd_area(&self.board, self.tags, render_card)),
            )
            .child(
                v_flex()
                    .gap_y_0p5()
                    .children(log.into_iter().map(|line| {
                        div().text_xs().text_color(muted).child(line)
                    })),
            )
    }
}

fn render_card(
    item: &Item<Card>,
    state: DndItemState,
    _window: &mut Window,
    cx: &mut App,
) -> Div {
    let theme = cx.theme();
    h_flex()
        .m(px(4.))
        .px(px(10.))
        .py(px(6.))
        .rounded(px(8.))
        .border_1()
        .border_color(theme.border)
        .bg(theme.secondary)
        .text_sm()
        .when(state.floating, |this| this.m_0().border_0())
        .when(state.active, |this| this.border_color(theme.primary))
        .child(item.payload.title.clone())
}

fn push_log(
    log: &Rc<RefCell<VecDeque<String>>>,
    area: &str,
    items: &[Item<Card>],
    change: &ItemsChange,
) {
    let order = items
        .iter()
        .map(|item| item.payload.title.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let mut log = log.borrow_mut();
    log.push_front(format!("{area}: {change:?} -> [{order}]"));
    log.truncate(LOG_LINES);
}

fn todo_cards() -> Vec<Card> {
    vec![
        Card::new(1, "Write release notes"),
        Card::new(2, "Review drag thresholds"),
        Card::new(3, "Profile auto-scroll"),
        Card::new(4, "Fix overlay shadow"),
        Card::new(5, "Triage issues"),
        Card::new(6, "Update screenshots"),
        Card::new(7, "Bump gpui"),
        Card::new(8, "Tidy story"),
    ]
}

fn done_cards() -> Vec<Card> {
    vec![
        Card::new(20, "Set up workspace"),
        Card::new(21, "Measure items"),
    ]
}

fn tag_cards() -> Vec<Card> {
    vec![
        Card::new(40, "bug"),
        Card::new(41, "ui"),
        Card::new(42, "perf"),
        Card::new(43, "docs"),
    ]
}
