use std::cell::RefCell;
use std::rc::Rc;

use gpui_dnd_core::{
    AreaId, DragCoordinator, DragEffect, DragPhase, DropAreaConfig, Item, ItemId, ItemsChange,
    Rect,
};

const ROW: f32 = 100.;

fn items(ids: &[&str]) -> Vec<Item<&'static str>> {
    ids.iter().map(|id| Item::new(*id, "payload")).collect()
}

fn ids(coordinator: &DragCoordinator<&'static str>, area: AreaId) -> Vec<String> {
    coordinator
        .items(area)
        .iter()
        .map(|item| item.id.to_string())
        .collect()
}

/// Give every item of `area` a fixed row at its current index and a tall container at `x`.
fn mount(coordinator: &mut DragCoordinator<&'static str>, area: AreaId, x: f32) {
    let ids: Vec<ItemId> = coordinator
        .items(area)
        .iter()
        .map(|item| item.id.clone())
        .collect();
    for (ix, id) in ids.into_iter().enumerate() {
        let rect = Rect::new(x, ix as f32 * ROW, 100., ROW);
        coordinator.register_item(area, id, move || Some(rect));
    }
    let container = Rect::new(x, 0., 100., 800.);
    coordinator.set_container(area, move || Some(container));
}

fn record_changes(
    coordinator: &mut DragCoordinator<&'static str>,
    area: AreaId,
) -> Rc<RefCell<Vec<(Vec<String>, ItemsChange)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    coordinator.on_change(area, move |items, change| {
        let ids = items.iter().map(|item| item.id.to_string()).collect();
        sink.borrow_mut().push((ids, *change));
    });
    log
}

#[test]
fn dragging_up_past_a_neighbor_reorders_once() {
    let mut coordinator = DragCoordinator::new();
    let area = coordinator.register_area(DropAreaConfig::list(), items(&["a", "b", "c"]));
    mount(&mut coordinator, area, 0.);
    let changes = record_changes(&mut coordinator, area);

    coordinator.start_drag(area, "b");
    // Center goes from 150 to 40, above a's threshold at 100.
    coordinator.pointer_moved(0., -110.);
    let effects = coordinator.tick();

    assert!(effects.contains(&DragEffect::Reordered {
        area,
        item: ItemId::from("b"),
        from: 1,
        to: 0,
    }));
    assert_eq!(ids(&coordinator, area), ["b", "a", "c"]);
    assert!(
        coordinator
            .area(area)
            .is_some_and(|a| a.in_motion().contains(&ItemId::from("a")))
    );
    assert_eq!(
        *changes.borrow(),
        vec![(
            vec!["b".to_string(), "a".to_string(), "c".to_string()],
            ItemsChange::Moved { from: 1, to: 0 }
        )]
    );

    // Nothing new crossed; the next frame is quiet.
    let effects = coordinator.tick();
    assert!(
        !effects
            .iter()
            .any(|e| matches!(e, DragEffect::Reordered { .. }))
    );
    assert_eq!(changes.borrow().len(), 1);
}

#[test]
fn dragging_short_of_a_threshold_changes_nothing() {
    let mut coordinator = DragCoordinator::new();
    let area = coordinator.register_area(DropAreaConfig::list(), items(&["a", "b", "c"]));
    mount(&mut coordinator, area, 0.);

    coordinator.start_drag(area, "b");
    // Center at 160: below a's threshold (100), above c's threshold (200).
    coordinator.pointer_moved(0., 10.);
    coordinator.tick();

    assert_eq!(ids(&coordinator, area), ["a", "b", "c"]);
    assert!(coordinator.area(area).is_some_and(|a| a.in_motion().is_empty()));
}

#[test]
fn grouped_areas_hand_off_the_dragged_item() {
    let mut coordinator = DragCoordinator::new();
    let left = coordinator.register_area(DropAreaConfig::list().group("g"), items(&["x"]));
    let right = coordinator.register_area(DropAreaConfig::list().group("g"), items(&[]));
    mount(&mut coordinator, left, 0.);
    mount(&mut coordinator, right, 200.);
    let left_changes = record_changes(&mut coordinator, left);
    let right_changes = record_changes(&mut coordinator, right);

    coordinator.start_drag(left, "x");
    coordinator.pointer_moved(200., 150.);
    let effects = coordinator.tick();

    assert!(effects.contains(&DragEffect::HandedOff {
        item: ItemId::from("x"),
        from_area: left,
        from_index: 0,
        to_area: right,
        to_index: 0,
    }));
    assert!(ids(&coordinator, left).is_empty());
    assert_eq!(ids(&coordinator, right), ["x"]);
    assert_eq!(
        *left_changes.borrow(),
        vec![(Vec::<String>::new(), ItemsChange::Removed { index: 0 })]
    );
    assert_eq!(
        *right_changes.borrow(),
        vec![(vec!["x".to_string()], ItemsChange::Inserted { index: 0 })]
    );
    assert_eq!(coordinator.session().map(|s| s.area), Some(right));
    assert_eq!(coordinator.session().map(|s| s.origin_area), Some(left));
    assert!(coordinator.is_active_item(right, &ItemId::from("x")));

    // Staying over the new owner does not hand the item back.
    coordinator.tick();
    assert_eq!(right_changes.borrow().len(), 1);

    let effects = coordinator.release();
    assert_eq!(
        effects,
        vec![DragEffect::UnmountOverlay {
            item: ItemId::from("x")
        }]
    );
    assert!(coordinator.phase().is_idle());
}

#[test]
fn handoff_into_a_populated_area_lands_between_neighbors() {
    let mut coordinator = DragCoordinator::new();
    let left = coordinator.register_area(DropAreaConfig::list().group("g"), items(&["x"]));
    let right =
        coordinator.register_area(DropAreaConfig::list().group("g"), items(&["p", "q", "r"]));
    mount(&mut coordinator, left, 0.);
    mount(&mut coordinator, right, 200.);

    coordinator.start_drag(left, "x");
    // Center lands at 160, after q's center (150) and before r's (250).
    coordinator.pointer_moved(200., 110.);
    coordinator.tick();

    assert_eq!(ids(&coordinator, right), ["p", "q", "x", "r"]);
}

#[test]
fn other_groups_are_not_eligible() {
    let mut coordinator = DragCoordinator::new();
    let left = coordinator.register_area(DropAreaConfig::list().group("g"), items(&["x"]));
    let right = coordinator.register_area(DropAreaConfig::list().group("h"), items(&[]));
    mount(&mut coordinator, left, 0.);
    mount(&mut coordinator, right, 200.);

    coordinator.start_drag(left, "x");
    coordinator.pointer_moved(200., 150.);
    coordinator.tick();

    assert_eq!(ids(&coordinator, left), ["x"]);
    assert!(ids(&coordinator, right).is_empty());
}

#[test]
fn moving_neighbor_blocks_until_its_transition_is_reported() {
    let mut coordinator = DragCoordinator::new();
    let area = coordinator.register_area(DropAreaConfig::list(), items(&["a", "b", "c"]));
    mount(&mut coordinator, area, 0.);
    let signals = coordinator.signals();

    coordinator.start_drag(area, "c");
    // Center 150: crosses b's threshold (200), not a's (100).
    coordinator.pointer_moved(0., -100.);
    coordinator.tick();
    assert_eq!(ids(&coordinator, area), ["a", "c", "b"]);

    // Back down past b while b is still moving: b is a boundary.
    coordinator.pointer_moved(0., 110.);
    let effects = coordinator.tick();
    assert!(
        !effects
            .iter()
            .any(|e| matches!(e, DragEffect::Reordered { .. }))
    );
    assert_eq!(ids(&coordinator, area), ["a", "c", "b"]);

    signals.transition_done(area, "b");
    let effects = coordinator.tick();
    assert!(effects.contains(&DragEffect::Reordered {
        area,
        item: ItemId::from("c"),
        from: 1,
        to: 2,
    }));
    assert_eq!(ids(&coordinator, area), ["a", "b", "c"]);
}

#[test]
fn release_resolves_after_pending_transitions() {
    let mut coordinator = DragCoordinator::new();
    let area = coordinator.register_area(DropAreaConfig::list(), items(&["a", "b"]));
    mount(&mut coordinator, area, 0.);
    let signals = coordinator.signals();

    coordinator.start_drag(area, "b");
    coordinator.pointer_moved(0., -100.);
    coordinator.tick();
    assert_eq!(ids(&coordinator, area), ["b", "a"]);

    coordinator.release();
    assert!(matches!(coordinator.phase(), DragPhase::Resolving(_)));
    assert!(coordinator.tick().is_empty());
    assert!(matches!(coordinator.phase(), DragPhase::Resolving(_)));
    // Pointer input after release is ignored.
    assert!(coordinator.pointer_moved(0., 50.).is_empty());

    signals.transition_done(area, "a");
    let effects = coordinator.tick();
    assert_eq!(
        effects,
        vec![DragEffect::UnmountOverlay {
            item: ItemId::from("b")
        }]
    );
    assert!(coordinator.phase().is_idle());
    assert!(coordinator.release().is_empty());
    assert!(coordinator.cancel().is_empty());
}

#[test]
fn cancel_during_resolving_forces_idle() {
    let mut coordinator = DragCoordinator::new();
    let area = coordinator.register_area(DropAreaConfig::list(), items(&["a", "b"]));
    mount(&mut coordinator, area, 0.);

    coordinator.start_drag(area, "b");
    coordinator.pointer_moved(0., -100.);
    coordinator.tick();
    coordinator.release();

    let effects = coordinator.cancel();
    assert_eq!(
        effects,
        vec![DragEffect::UnmountOverlay {
            item: ItemId::from("b")
        }]
    );
    assert!(coordinator.phase().is_idle());
    assert_eq!(ids(&coordinator, area), ["b", "a"]);
}

fn handed_off(effects: &[DragEffect]) -> bool {
    effects
        .iter()
        .any(|e| matches!(e, DragEffect::HandedOff { .. }))
}

#[test]
fn larger_overlap_takes_ownership() {
    let mut coordinator = DragCoordinator::new();
    let left = coordinator.register_area(DropAreaConfig::list().group("g"), items(&["x"]));
    let right = coordinator.register_area(DropAreaConfig::list().group("g"), items(&[]));
    mount(&mut coordinator, left, 0.);
    mount(&mut coordinator, right, 100.);

    coordinator.start_drag(left, "x");
    // 40% over the left container, 60% over the right one.
    coordinator.pointer_moved(60., 300.);
    let effects = coordinator.tick();

    assert!(effects.contains(&DragEffect::HandedOff {
        item: ItemId::from("x"),
        from_area: left,
        from_index: 0,
        to_area: right,
        to_index: 0,
    }));
    assert!(ids(&coordinator, left).is_empty());
    assert_eq!(ids(&coordinator, right), ["x"]);
}

#[test]
fn equal_overlap_goes_to_the_first_registered_area() {
    let mut coordinator = DragCoordinator::new();
    let left = coordinator.register_area(DropAreaConfig::list().group("g"), items(&["x"]));
    let right = coordinator.register_area(DropAreaConfig::list().group("g"), items(&["y"]));
    mount(&mut coordinator, left, 0.);
    mount(&mut coordinator, right, 100.);

    // Split evenly while already in the first area: it keeps the item.
    coordinator.start_drag(left, "x");
    coordinator.pointer_moved(50., 300.);
    assert!(!handed_off(&coordinator.tick()));
    assert_eq!(ids(&coordinator, left), ["x"]);
    coordinator.release();
    assert!(coordinator.phase().is_idle());

    // Split evenly while in the second area: the first one takes it.
    coordinator.start_drag(right, "y");
    coordinator.pointer_moved(-50., 300.);
    let effects = coordinator.tick();
    assert!(effects.contains(&DragEffect::HandedOff {
        item: ItemId::from("y"),
        from_area: right,
        from_index: 0,
        to_area: left,
        to_index: 1,
    }));
    assert_eq!(ids(&coordinator, left), ["x", "y"]);
    assert!(ids(&coordinator, right).is_empty());
}

#[test]
fn floating_outside_every_area_changes_nothing() {
    let mut coordinator = DragCoordinator::new();
    let area = coordinator.register_area(DropAreaConfig::list().group("g"), items(&["a", "b"]));
    let other = coordinator.register_area(DropAreaConfig::list().group("g"), items(&[]));
    mount(&mut coordinator, area, 0.);
    mount(&mut coordinator, other, 200.);
    let changes = record_changes(&mut coordinator, area);

    coordinator.start_drag(area, "b");
    // Past a's threshold on the main axis, but clear of both containers.
    coordinator.pointer_moved(500., -90.);
    let effects = coordinator.tick();

    assert!(!effects.iter().any(|e| matches!(
        e,
        DragEffect::Reordered { .. } | DragEffect::HandedOff { .. }
    )));
    assert_eq!(ids(&coordinator, area), ["a", "b"]);
    assert!(ids(&coordinator, other).is_empty());
    assert!(changes.borrow().is_empty());
    assert!(coordinator.is_dragging());

    // Coming back over the area resumes reordering.
    coordinator.pointer_moved(-500., 0.);
    let effects = coordinator.tick();
    assert!(effects.contains(&DragEffect::Reordered {
        area,
        item: ItemId::from("b"),
        from: 1,
        to: 0,
    }));
}

#[test]
fn overlapping_containers_scroll_independently() {
    let mut coordinator = DragCoordinator::new();
    let left = coordinator.register_area(DropAreaConfig::list(), items(&["x"]));
    let right = coordinator.register_area(DropAreaConfig::list(), items(&["y"]));
    mount(&mut coordinator, left, 0.);
    mount(&mut coordinator, right, 50.);

    // `x` sits on the top edge of both containers.
    coordinator.start_drag(left, "x");
    let effects = coordinator.tick();

    for area in [left, right] {
        assert!(
            effects.iter().any(|e| matches!(
                e,
                DragEffect::Scroll { area: a, vector } if *a == area && vector.dy < 0.0
            )),
            "{area} did not scroll"
        );
    }

    coordinator.pointer_moved(0., 300.);
    let effects = coordinator.tick();
    assert!(effects.contains(&DragEffect::StopScroll { area: left }));
    assert!(effects.contains(&DragEffect::StopScroll { area: right }));
}
