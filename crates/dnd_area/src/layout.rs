use std::collections::HashMap;

use gpui::{Bounds, Pixels};
use gpui_dnd_core::{ItemId, Rect, ScrollVector};

pub(crate) fn to_rect(bounds: Bounds<Pixels>) -> Rect {
    Rect::new(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    )
}

/// Window-space bounds captured while painting one drop area.
///
/// The coordinator's measurement handles read from here, so a rect is always
/// the one from the most recent prepaint.
#[derive(Default)]
pub(crate) struct AreaLayout {
    container: Option<Rect>,
    items: HashMap<ItemId, Rect>,
}

impl AreaLayout {
    pub(crate) fn set_container(&mut self, bounds: Bounds<Pixels>) {
        self.container = Some(to_rect(bounds));
    }

    pub(crate) fn record_item(&mut self, id: ItemId, bounds: Bounds<Pixels>) {
        self.items.insert(id, to_rect(bounds));
    }

    pub(crate) fn forget(&mut self, id: &ItemId) {
        self.items.remove(id);
    }

    pub(crate) fn retain(&mut self, keep: impl Fn(&ItemId) -> bool) {
        self.items.retain(|id, _| keep(id));
    }

    pub(crate) fn container(&self) -> Option<Rect> {
        self.container
    }

    pub(crate) fn item(&self, id: &ItemId) -> Option<Rect> {
        self.items.get(id).copied()
    }

    fn content(&self) -> Option<Rect> {
        let mut rects = self.items.values();
        let first = *rects.next()?;
        let (mut left, mut top, mut right, mut bottom) =
            (first.x, first.y, first.right(), first.bottom());
        for rect in rects {
            left = left.min(rect.x);
            top = top.min(rect.y);
            right = right.max(rect.right());
            bottom = bottom.max(rect.bottom());
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Scroll-offset change for `vector` over `dt` seconds, limited to the
    /// content that is actually hidden past each edge.
    ///
    /// Offsets grow toward the start of the content, so a negative vector
    /// component yields a positive delta. `None` when nothing can move.
    pub(crate) fn scroll_step(&self, vector: ScrollVector, dt: f32) -> Option<(f32, f32)> {
        let viewport = self.container?;
        let content = self.content()?;

        let dx = clamp_step(
            -vector.dx * dt,
            viewport.x - content.x,
            content.right() - viewport.right(),
        );
        let dy = clamp_step(
            -vector.dy * dt,
            viewport.y - content.y,
            content.bottom() - viewport.bottom(),
        );
        (dx != 0.0 || dy != 0.0).then_some((dx, dy))
    }
}

fn clamp_step(delta: f32, hidden_before: f32, hidden_after: f32) -> f32 {
    if delta > 0.0 {
        delta.min(hidden_before.max(0.0))
    } else {
        delta.max(-hidden_after.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use gpui::{point, px, size};

    use super::*;

    fn bounds(x: f32, y: f32, w: f32, h: f32) -> Bounds<Pixels> {
        Bounds::new(point(px(x), px(y)), size(px(w), px(h)))
    }

    fn scrolled_list(scroll_top: f32) -> AreaLayout {
        let mut layout = AreaLayout::default();
        layout.set_container(bounds(0., 0., 200., 300.));
        for ix in 0..10 {
            let y = ix as f32 * 50. - scroll_top;
            layout.record_item(ItemId::from(ix), bounds(0., y, 200., 50.));
        }
        layout
    }

    #[test]
    fn converts_bounds_to_rect() {
        assert_eq!(
            to_rect(bounds(4., 8., 15., 16.)),
            Rect::new(4., 8., 15., 16.)
        );
    }

    #[test]
    fn scrolls_toward_end_until_content_runs_out() {
        let layout = scrolled_list(0.);
        let step = layout.scroll_step(ScrollVector { dx: 0., dy: 100. }, 0.5);
        assert_eq!(step, Some((0., -50.)));

        let layout = scrolled_list(180.);
        let step = layout.scroll_step(ScrollVector { dx: 0., dy: 100. }, 0.5);
        assert_eq!(step, Some((0., -20.)));

        let layout = scrolled_list(200.);
        assert_eq!(
            layout.scroll_step(ScrollVector { dx: 0., dy: 100. }, 0.5),
            None
        );
    }

    #[test]
    fn cannot_scroll_before_the_first_item() {
        let layout = scrolled_list(0.);
        assert_eq!(
            layout.scroll_step(ScrollVector { dx: 0., dy: -100. }, 0.5),
            None
        );

        let layout = scrolled_list(30.);
        let step = layout.scroll_step(ScrollVector { dx: 0., dy: -100. }, 0.5);
        assert_eq!(step, Some((0., 30.)));
    }

    #[test]
    fn needs_a_container() {
        let mut layout = AreaLayout::default();
        layout.record_item(ItemId::from("a"), bounds(0., 0., 10., 10.));
        assert_eq!(
            layout.scroll_step(ScrollVector { dx: 0., dy: 100. }, 1.),
            None
        );
    }

    #[test]
    fn forgotten_items_stop_measuring() {
        let mut layout = scrolled_list(0.);
        let id = ItemId::from(3);
        assert_eq!(layout.item(&id), Some(Rect::new(0., 150., 200., 50.)));
        layout.forget(&id);
        assert_eq!(layout.item(&id), None);
        layout.retain(|id| *id == ItemId::from(0));
        assert!(layout.item(&ItemId::from(1)).is_none());
        assert!(layout.item(&ItemId::from(0)).is_some());
    }
}
