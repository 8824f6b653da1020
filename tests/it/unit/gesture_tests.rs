use std::rc::Rc;

use pull_refresh::state::{Gesture, Release, Start};
use pull_refresh::{Config, GestureSnapshot, GestureState, LabelKind, Resistance};

use crate::helpers::{FakeNode, FakeTouch, Page, Recorder, tunables};

fn gesture(page: &Page) -> Gesture<FakeNode> {
    let config = Config::new(|_| {}).with_tunables(tunables());
    Gesture::new(Rc::new(config), page.trigger.clone())
}

/// Resistance disabled, so the resisted distance equals the raw one (up to 150).
fn linear_gesture(page: &Page) -> Gesture<FakeNode> {
    let config = Config::new(|_| {})
        .with_tunables(tunables())
        .with_resistance(Resistance::new(|_| 1.0));
    Gesture::new(Rc::new(config), page.trigger.clone())
}

#[test]
fn start_arms_and_reaffirms_pending() {
    let page = Page::new();
    let mut g = gesture(&page);
    let rec = Recorder::default();
    let mut p = rec.presenter();

    assert_eq!(g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p), Start::Armed);
    assert_eq!(g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p), Start::Armed);

    let snap = g.snapshot();
    assert!(snap.enabled);
    assert_eq!(snap.origin.y, 100.0);
    assert_eq!(rec.states(), vec![GestureState::Pending, GestureState::Pending]);
    assert_eq!(rec.last().unwrap().label, Some(LabelKind::Pull));
}

#[test]
fn scenario_pull_to_200_clamps_and_arms_release() {
    let page = Page::new();
    let mut g = gesture(&page);
    let mut p = Recorder::default().presenter();

    g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p);
    let touch = FakeTouch::at(&page.item, 300.0);
    g.touch_move(&touch, &mut p);

    let snap = g.snapshot();
    assert_eq!(snap.distance, 200.0);
    assert_eq!(snap.resisted, 150.0);
    assert_eq!(snap.extent, 150.0);
    assert_eq!(snap.state, GestureState::ReleaseToRefresh);
    assert!(touch.was_prevented());
}

#[test]
fn touch_outside_trigger_never_enables() {
    let page = Page::new();
    let mut g = gesture(&page);
    let rec = Recorder::default();
    let mut p = rec.presenter();

    g.touch_start(&FakeTouch::at(&page.outside, 100.0), &mut p);
    let touch = FakeTouch::at(&page.outside, 200.0);
    g.touch_move(&touch, &mut p);

    assert_eq!(g.state(), GestureState::Pending);
    assert!(!g.snapshot().enabled);
    assert!(!touch.was_prevented());
    assert_eq!(rec.states(), vec![GestureState::Pending]);
}

#[test]
fn start_inside_scrolled_region_is_scrolling_until_release() {
    let page = Page::new();
    page.trigger.set_scroll_top(40.0);
    let mut g = gesture(&page);
    let mut p = Recorder::default().presenter();

    assert_eq!(g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p), Start::Scrolling);
    for y in [150.0, 250.0, 400.0] {
        let touch = FakeTouch::at(&page.item, y);
        g.touch_move(&touch, &mut p);
        assert!(!touch.was_prevented());
        assert_eq!(g.state(), GestureState::Scrolling);
    }
    // region scrolled back to the top mid-sequence: still owned by scrolling
    page.trigger.set_scroll_top(0.0);
    g.touch_move(&FakeTouch::at(&page.item, 500.0), &mut p);
    assert_eq!(g.state(), GestureState::Scrolling);

    assert_eq!(g.touch_end(&mut p), Release::Reset);
    assert_eq!(g.snapshot(), GestureSnapshot::default());
}

#[test]
fn hysteresis_excludes_exact_threshold() {
    let page = Page::new();
    let mut g = linear_gesture(&page);
    let mut p = Recorder::default().presenter();
    g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p);

    g.touch_move(&FakeTouch::at(&page.item, 180.0), &mut p);
    assert_eq!(g.snapshot().resisted, 80.0);
    assert_eq!(g.state(), GestureState::Pulling);

    g.touch_move(&FakeTouch::at(&page.item, 181.5), &mut p);
    assert_eq!(g.state(), GestureState::ReleaseToRefresh);

    g.touch_move(&FakeTouch::at(&page.item, 180.0), &mut p);
    assert_eq!(g.snapshot().resisted, 80.0);
    assert_eq!(g.state(), GestureState::ReleaseToRefresh);

    g.touch_move(&FakeTouch::at(&page.item, 178.0), &mut p);
    assert_eq!(g.state(), GestureState::Pulling);
}

#[test]
fn jitter_samples_are_dropped() {
    let page = Page::new();
    let mut g = linear_gesture(&page);
    let rec = Recorder::default();
    let mut p = rec.presenter();
    g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p);

    let first = FakeTouch::at(&page.item, 150.0);
    g.touch_move(&first, &mut p);
    assert!(first.was_prevented());
    let updates = rec.all().len();

    let jitter = FakeTouch::at(&page.item, 151.0);
    g.touch_move(&jitter, &mut p);
    assert!(!jitter.was_prevented());
    assert_eq!(g.snapshot().resisted, 50.0);
    assert_eq!(g.snapshot().distance, 51.0);
    assert_eq!(rec.all().len(), updates);

    let real = FakeTouch::at(&page.item, 151.5);
    g.touch_move(&real, &mut p);
    assert!(real.was_prevented());
    assert_eq!(g.snapshot().resisted, 51.5);
}

#[test]
fn pulling_back_above_origin_keeps_the_last_pull() {
    let page = Page::new();
    let mut g = gesture(&page);
    let rec = Recorder::default();
    let mut p = rec.presenter();
    g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p);
    g.touch_move(&FakeTouch::at(&page.item, 300.0), &mut p);
    assert_eq!(g.state(), GestureState::ReleaseToRefresh);
    let updates = rec.all().len();

    let up = FakeTouch::at(&page.item, 90.0);
    g.touch_move(&up, &mut p);
    assert!(!up.was_prevented());
    let snap = g.snapshot();
    assert_eq!(snap.distance, -10.0);
    assert_eq!(snap.resisted, 150.0);
    assert_eq!(snap.extent, 150.0);
    assert_eq!(snap.state, GestureState::ReleaseToRefresh);
    assert_eq!(rec.all().len(), updates);

    assert_eq!(g.touch_end(&mut p), Release::Refresh);
}

#[test]
fn pull_between_maximum_and_saturation_is_damped() {
    let page = Page::new();
    let mut g = gesture(&page);
    let mut p = Recorder::default().presenter();
    g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p);

    g.touch_move(&FakeTouch::at(&page.item, 280.0), &mut p);
    let snap = g.snapshot();
    assert_eq!(snap.distance, 180.0);
    assert_eq!(snap.resisted, 135.0);
    assert_eq!(snap.extent, 135.0);
    assert_eq!(snap.state, GestureState::ReleaseToRefresh);
}

#[test]
fn release_below_threshold_resets_without_refresh() {
    let page = Page::new();
    let mut g = gesture(&page);
    let mut p = Recorder::default().presenter();
    g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p);
    g.touch_move(&FakeTouch::at(&page.item, 200.0), &mut p);
    assert_eq!(g.state(), GestureState::Pulling);

    assert_eq!(g.touch_end(&mut p), Release::Reset);
    assert_eq!(g.snapshot(), GestureSnapshot::default());
}

#[test]
fn release_past_threshold_holds_reload_extent() {
    let page = Page::new();
    let mut g = gesture(&page);
    let rec = Recorder::default();
    let mut p = rec.presenter();
    g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p);
    g.touch_move(&FakeTouch::at(&page.item, 300.0), &mut p);

    assert_eq!(g.touch_end(&mut p), Release::Refresh);
    let last = rec.last().unwrap();
    assert_eq!(last.state, GestureState::Refreshing);
    assert_eq!(last.extent, 50.0);
    assert_eq!(last.text.as_deref(), Some("Refreshing"));

    // while refreshing nothing gets through
    assert_eq!(g.touch_end(&mut p), Release::Ignored);
    assert_eq!(g.touch_cancel(&mut p), Release::Ignored);
    assert_eq!(g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p), Start::Ignored);
    g.touch_move(&FakeTouch::at(&page.item, 400.0), &mut p);
    assert_eq!(g.snapshot().extent, 50.0);
    assert_eq!(g.state(), GestureState::Refreshing);

    g.reset(&mut p);
    assert_eq!(g.snapshot(), GestureSnapshot::default());
}

#[test]
fn end_without_start_is_a_quiet_reset() {
    let page = Page::new();
    let mut g = gesture(&page);
    let rec = Recorder::default();
    let mut p = rec.presenter();

    assert_eq!(g.touch_end(&mut p), Release::Reset);
    assert_eq!(g.state(), GestureState::Pending);
    assert!(rec.all().is_empty());
}

#[test]
fn start_without_touch_point_stays_disabled() {
    let page = Page::new();
    let mut g = gesture(&page);
    let mut p = Recorder::default().presenter();
    let touch = FakeTouch::pointless(&page.item);

    assert_eq!(g.touch_start(&touch, &mut p), Start::Armed);
    g.touch_move(&FakeTouch::at(&page.item, 300.0), &mut p);
    assert_eq!(g.state(), GestureState::Pending);
    assert!(!g.snapshot().enabled);
}

#[test]
fn non_decreasing_samples_give_non_decreasing_resisted_distance() {
    let page = Page::new();
    let mut g = gesture(&page);
    let mut p = Recorder::default().presenter();
    g.touch_start(&FakeTouch::at(&page.item, 100.0), &mut p);

    let mut previous = 0.0;
    for step in 0..200 {
        g.touch_move(&FakeTouch::at(&page.item, 100.0 + step as f64 * 1.7), &mut p);
        let resisted = g.snapshot().resisted;
        assert!(resisted >= previous);
        assert!(resisted <= 150.0);
        previous = resisted;
    }
    assert_eq!(previous, 150.0);
}
