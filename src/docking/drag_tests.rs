use egui::pos2;

use super::test_support::{
    TestPane, assert_registry_ok, labels, manager, offset, slot, strip_point,
};
use super::{
    ActionOutcome, CaptionButton, ContainerId, DockManager, DockPos, DockRegion, DragPhase,
    DropOutcome, Page,
};

/// Manager with left-top = [Objects, Properties] (Properties selected) and center = [Viewport].
fn scene() -> (DockManager<TestPane>, ContainerId) {
    let mut docking = manager();
    for name in ["Objects", "Properties"] {
        docking
            .add_pane(TestPane::new(name), DockPos::LeftTop)
            .expect("add");
    }
    docking
        .add_pane(TestPane::new("Viewport"), DockPos::Center)
        .expect("add");
    let left_top = slot(&docking, DockPos::LeftTop);
    (docking, left_top)
}

fn selected_label(docking: &DockManager<TestPane>, id: ContainerId) -> Option<String> {
    let container = docking.container(id)?;
    let index = container.selection()?;
    container.tabs().page(index).map(|p| p.label.clone())
}

fn button_center(
    docking: &DockManager<TestPane>,
    id: ContainerId,
    button: CaptionButton,
) -> egui::Pos2 {
    docking
        .container(id)
        .and_then(|c| c.caption_buttons().into_iter().find(|(b, _)| *b == button))
        .map(|(_, rect)| rect.center())
        .expect("button")
}

#[test]
fn click_without_movement_changes_nothing() {
    let (mut docking, left_top) = scene();
    let press = strip_point(&docking, left_top, 150.0);

    assert!(docking.on_pointer_press(press));
    assert_eq!(docking.drag_phase(), DragPhase::PressedOnTab);
    docking.on_pointer_move(offset(press, 3.0, -5.0));
    assert_eq!(docking.drag_phase(), DragPhase::PressedOnTab);
    assert!(!docking.preview().is_visible());

    let outcome = docking.on_pointer_release(offset(press, 3.0, -5.0));

    assert!(matches!(outcome, DropOutcome::Click { container } if container == left_top));
    assert_eq!(labels(&docking, left_top), ["Objects", "Properties"]);
    assert_eq!(docking.drag_phase(), DragPhase::Idle);
}

#[test]
fn reorder_within_strip() {
    let (mut docking, left_top) = scene();
    assert_eq!(
        docking.container(left_top).map(|c| c.strip_rect().width()),
        Some(200.0)
    );

    docking.on_pointer_press(strip_point(&docking, left_top, 150.0));
    let target = strip_point(&docking, left_top, 80.0);
    docking.on_pointer_move(target);

    assert_eq!(docking.drag_phase(), DragPhase::Dragging);
    let caret = docking.preview().insertion.expect("caret");
    assert_eq!(caret.target, left_top);
    assert_eq!(caret.index, 0);
    assert_eq!(caret.caret_x, 12.0);
    assert_eq!(
        docking.preview().ghost.as_ref().map(|g| g.label.as_str()),
        Some("Properties")
    );

    let outcome = docking.on_pointer_release(target);

    assert!(matches!(
        outcome,
        DropOutcome::Reordered { from: 1, to: 0, .. }
    ));
    assert_eq!(labels(&docking, left_top), ["Properties", "Objects"]);
    assert_eq!(selected_label(&docking, left_top).as_deref(), Some("Properties"));
    assert!(!docking.preview().is_visible());
    assert_registry_ok(&docking);
}

#[test]
fn releasing_over_own_slot_changes_nothing() {
    let (mut docking, left_top) = scene();
    let press = strip_point(&docking, left_top, 150.0);
    docking.on_pointer_press(press);
    docking.on_pointer_move(pos2(150.0, 300.0));

    let outcome = docking.on_pointer_release(press);
    assert!(matches!(outcome, DropOutcome::Unchanged { .. }));

    docking.on_pointer_press(press);
    docking.on_pointer_move(pos2(100.0, 120.0));
    let outcome = docking.on_pointer_release(pos2(100.0, 120.0));
    assert!(matches!(outcome, DropOutcome::Unchanged { .. }));

    assert_eq!(labels(&docking, left_top), ["Objects", "Properties"]);
    assert_registry_ok(&docking);
}

#[test]
fn hovering_own_center_shows_no_region() {
    let (mut docking, left_top) = scene();
    let press = strip_point(&docking, left_top, 150.0);
    docking.on_pointer_press(press);

    docking.on_pointer_move(pos2(100.0, 120.0));
    assert_eq!(docking.preview().region, None);
    assert!(docking.preview().ghost.is_some());

    docking.on_pointer_move(pos2(950.0, 325.0));
    assert!(docking.preview().region.is_some());

    docking.on_pointer_move(pos2(100.0, 120.0));
    assert_eq!(docking.preview().region, None);
    let outcome = docking.on_pointer_release(pos2(100.0, 120.0));
    assert!(matches!(outcome, DropOutcome::Unchanged { .. }));
}

#[test]
fn floating_host_over_own_strip_takes_the_drop() {
    let (mut docking, left_top) = scene();
    // Host spans x 100..500, so its tab row overlaps the right half of left-top's.
    let floating = docking.float_page(
        Page::new(TestPane::new("Inspector"), "Inspector"),
        pos2(100.0, 0.0),
    );
    let container = docking.floating_host(floating).map(|h| h.container).expect("host");

    docking.on_pointer_press(strip_point(&docking, left_top, 50.0));
    let target = strip_point(&docking, left_top, 150.0);
    docking.on_pointer_move(target);

    let caret = docking.preview().insertion.expect("caret");
    assert_eq!((caret.target, caret.index), (container, 1));

    let outcome = docking.on_pointer_release(target);

    assert!(matches!(
        outcome,
        DropOutcome::Transferred { from, to } if from == left_top && to == container
    ));
    assert_eq!(labels(&docking, container), ["Inspector", "Properties"]);
    assert_eq!(labels(&docking, left_top), ["Objects"]);
    assert_registry_ok(&docking);
}

#[test]
fn release_on_right_region_splits_target() {
    let (mut docking, left_top) = scene();
    let center = slot(&docking, DockPos::Center);

    docking.on_pointer_press(strip_point(&docking, left_top, 150.0));
    let target = pos2(950.0, 325.0);
    docking.on_pointer_move(target);

    let region = docking.preview().region.expect("region preview");
    assert_eq!(region.target, center);
    assert_eq!(region.region, DockRegion::Right);
    assert_eq!(region.rect.left(), 600.0);
    assert_eq!(docking.preview().insertion, None);

    let outcome = docking.on_pointer_release(target);

    let DropOutcome::Docked { from, to, region } = outcome else {
        panic!("expected a region dock, got {}", outcome.name());
    };
    assert_eq!(from, left_top);
    assert_eq!(region, DockRegion::Right);
    assert_ne!(to, center);
    assert_eq!(labels(&docking, to), ["Properties"]);
    assert_eq!(labels(&docking, left_top), ["Objects"]);
    assert_eq!(labels(&docking, center), ["Viewport"]);

    let center_rect = docking.container(center).map(|c| c.rect()).expect("rect");
    let new_rect = docking.container(to).map(|c| c.rect()).expect("rect");
    assert!(center_rect.right() <= new_rect.left());
    assert!(!docking.preview().is_visible());
    assert_registry_ok(&docking);
}

#[test]
fn release_on_other_strip_transfers() {
    let (mut docking, left_top) = scene();
    let bottom = slot(&docking, DockPos::Bottom);
    docking
        .add_pane(TestPane::new("Log"), DockPos::Bottom)
        .expect("add");

    docking.on_pointer_press(strip_point(&docking, left_top, 150.0));
    let target = strip_point(&docking, bottom, 500.0);
    docking.on_pointer_move(target);

    let caret = docking.preview().insertion.expect("caret");
    assert_eq!((caret.target, caret.index), (bottom, 1));

    let outcome = docking.on_pointer_release(target);

    assert!(matches!(
        outcome,
        DropOutcome::Transferred { from, to } if from == left_top && to == bottom
    ));
    assert_eq!(labels(&docking, bottom), ["Log", "Properties"]);
    assert_eq!(selected_label(&docking, bottom).as_deref(), Some("Properties"));
    assert_eq!(labels(&docking, left_top), ["Objects"]);
    assert_eq!(selected_label(&docking, left_top).as_deref(), Some("Objects"));
    assert_registry_ok(&docking);
}

#[test]
fn release_outside_everything_floats() {
    let (mut docking, left_top) = scene();
    docking.on_pointer_press(strip_point(&docking, left_top, 150.0));
    let target = pos2(1200.0, 300.0);
    docking.on_pointer_move(target);
    assert_eq!(docking.preview().region, None);

    let DropOutcome::Floated { from, floating } = docking.on_pointer_release(target) else {
        panic!("expected float");
    };
    assert_eq!(from, left_top);
    let host = docking.floating_host(floating).expect("host");
    assert_eq!(host.rect.min, target);
    assert_eq!(labels(&docking, host.container), ["Properties"]);
    assert_eq!(labels(&docking, left_top), ["Objects"]);
    assert_registry_ok(&docking);
}

#[test]
fn docking_disabled_target_falls_back_to_center() {
    let (mut docking, left_top) = scene();
    let bottom = slot(&docking, DockPos::Bottom);
    let center = slot(&docking, DockPos::Center);
    if let Some(c) = docking.container_mut(bottom) {
        c.set_docking_enabled(false);
    }

    docking.on_pointer_press(strip_point(&docking, left_top, 150.0));
    let target = pos2(500.0, 760.0);
    docking.on_pointer_move(target);
    let preview = docking.preview().region.expect("fallback preview");
    assert_eq!((preview.target, preview.region), (center, DockRegion::Center));

    let outcome = docking.on_pointer_release(target);

    assert!(matches!(
        outcome,
        DropOutcome::Docked { to, region: DockRegion::Center, .. } if to == center
    ));
    assert_eq!(labels(&docking, center), ["Viewport", "Properties"]);
    assert!(labels(&docking, bottom).is_empty());
    assert_registry_ok(&docking);
}

#[test]
fn capture_loss_resolves_like_release() {
    let (mut docking, left_top) = scene();
    docking.on_pointer_press(strip_point(&docking, left_top, 150.0));
    docking.on_pointer_move(pos2(950.0, 325.0));
    assert!(docking.preview().is_visible());

    let outcome = docking.on_capture_lost();

    assert!(matches!(outcome, DropOutcome::Docked { region: DockRegion::Right, .. }));
    assert_eq!(docking.drag_phase(), DragPhase::Idle);
    assert!(!docking.preview().is_visible());
    assert_eq!(labels(&docking, left_top), ["Objects"]);
    assert!(matches!(docking.on_capture_lost(), DropOutcome::None));
}

#[test]
fn closing_source_container_cancels_drag() {
    let (mut docking, left_top) = scene();
    docking.on_pointer_press(strip_point(&docking, left_top, 150.0));
    docking.on_pointer_move(pos2(950.0, 325.0));

    let pages = docking.close_container(left_top).expect("close");

    assert_eq!(pages.len(), 2);
    assert_eq!(docking.drag_phase(), DragPhase::Idle);
    assert!(!docking.preview().is_visible());
    assert!(matches!(
        docking.on_pointer_release(pos2(950.0, 325.0)),
        DropOutcome::None
    ));
    assert_registry_ok(&docking);
}

#[test]
fn presses_that_do_not_start_a_session() {
    let (mut docking, left_top) = scene();
    let left_bottom = slot(&docking, DockPos::LeftBottom);

    // Empty strip: nothing to drag.
    assert!(!docking.on_pointer_press(strip_point(&docking, left_bottom, 50.0)));
    // Body, not strip.
    assert!(!docking.on_pointer_press(pos2(100.0, 150.0)));
    // Outside every container.
    assert!(!docking.on_pointer_press(pos2(1500.0, 10.0)));
    assert_eq!(docking.drag_phase(), DragPhase::Idle);

    docking.begin_teardown();
    assert!(!docking.on_pointer_press(strip_point(&docking, left_top, 150.0)));
}

#[test]
fn caption_button_fires_on_release_over_same_button() {
    let (mut docking, left_top) = scene();
    let close = button_center(&docking, left_top, CaptionButton::Close);

    // Released elsewhere: nothing happens.
    assert!(docking.on_pointer_press(close));
    assert!(matches!(
        docking.on_pointer_release(pos2(100.0, 150.0)),
        DropOutcome::None
    ));
    assert!(docking.container(left_top).is_some());

    assert!(docking.on_pointer_press(close));
    let DropOutcome::Button {
        container,
        button: CaptionButton::Close,
        outcome: ActionOutcome::Closed(pages),
    } = docking.on_pointer_release(close)
    else {
        panic!("expected close");
    };
    assert_eq!(container, left_top);
    assert_eq!(pages.len(), 2);
    assert!(docking.container(left_top).is_none());
    assert_registry_ok(&docking);
}

#[test]
fn maximize_button_toggles() {
    let (mut docking, _) = scene();
    let center = slot(&docking, DockPos::Center);
    let maximize = button_center(&docking, center, CaptionButton::MaximizeRestore);

    docking.on_pointer_press(maximize);
    let outcome = docking.on_pointer_release(maximize);
    assert!(matches!(
        outcome,
        DropOutcome::Button { outcome: ActionOutcome::Maximized(true), .. }
    ));
    assert_eq!(docking.maximized(), Some(center));

    // The button moved with the container.
    let restore = button_center(&docking, center, CaptionButton::MaximizeRestore);
    docking.on_pointer_press(restore);
    docking.on_pointer_release(restore);
    assert_eq!(docking.maximized(), None);
}

#[test]
fn capture_loss_disarms_caption_button() {
    let (mut docking, left_top) = scene();
    let close = button_center(&docking, left_top, CaptionButton::Close);
    docking.on_pointer_press(close);

    assert!(matches!(docking.on_capture_lost(), DropOutcome::None));
    assert!(docking.container(left_top).is_some());
}

#[test]
fn drag_out_of_floating_host_and_back() {
    let (mut docking, left_top) = scene();
    let floating = docking
        .float_selected(left_top, pos2(1100.0, 100.0))
        .expect("float");
    let container = docking.floating_host(floating).map(|h| h.container).expect("host");

    // Drag the page from the floating host onto the bottom strip.
    let bottom = slot(&docking, DockPos::Bottom);
    docking.on_pointer_press(strip_point(&docking, container, 20.0));
    let target = strip_point(&docking, bottom, 300.0);
    docking.on_pointer_move(target);
    let outcome = docking.on_pointer_release(target);

    assert!(matches!(outcome, DropOutcome::Transferred { .. }));
    assert_eq!(labels(&docking, bottom), ["Properties"]);
    // The emptied floating container stays until its host is closed.
    assert_eq!(docking.container(container).map(|c| c.page_count()), Some(0));
    assert_registry_ok(&docking);
}
