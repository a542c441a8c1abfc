use gpui::{
    Context, IntoElement, ParentElement as _, Render, Styled as _, Window, div,
    prelude::FluentBuilder as _, px,
};
use gpui_component::{ActiveTheme as _, StyledExt as _};
use gpui_dnd_core::{Item, Rect};

use crate::area::{DndItemState, RenderItem};

/// The floating copy of the dragged item.
///
/// gpui keeps it under the pointer at the offset the press happened at, so
/// it tracks the coordinator's floating rect without further bookkeeping.
pub(crate) struct DragGhost<T> {
    item: Option<Item<T>>,
    rect: Option<Rect>,
    render_item: RenderItem<T>,
}

impl<T> DragGhost<T> {
    pub(crate) fn new(
        item: Option<Item<T>>,
        rect: Option<Rect>,
        render_item: RenderItem<T>,
    ) -> Self {
        Self {
            item,
            rect,
            render_item,
        }
    }
}

impl<T: 'static> Render for DragGhost<T> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let (bg, border) = (theme.popover, theme.border);
        let state = DndItemState {
            floating: true,
            ..Default::default()
        };
        let content = self
            .item
            .as_ref()
            .map(|item| (self.render_item)(item, state, window, cx));

        div()
            .when_some(self.rect, |this, rect| {
                this.w(px(rect.width)).h(px(rect.height))
            })
            .overflow_hidden()
            .rounded(px(8.))
            .bg(bg)
            .border_1()
            .border_color(border)
            .shadow_md()
            .children(content)
    }
}
