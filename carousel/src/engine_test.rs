#![allow(clippy::float_cmp)]

use super::*;
use crate::layout::Page;

// =============================================================
// Helpers
// =============================================================

const DESKTOP: f64 = 1280.0;
const MOBILE: f64 = 375.0;

fn make_core(variant: Variant, items: usize, width: f64) -> CarouselCore {
    let mut core = CarouselCore::new(variant, items, width, CarouselConfig::default());
    core.initialize();
    core
}

fn settle_ticket(actions: &[Action]) -> Option<u64> {
    actions.iter().find_map(|a| match a {
        Action::ScheduleSettle { ticket, .. } => Some(*ticket),
        _ => None,
    })
}

fn settle_pending(core: &mut CarouselCore, actions: &[Action]) -> Vec<Action> {
    match settle_ticket(actions) {
        Some(ticket) => core.settle(ticket),
        None => Vec::new(),
    }
}

fn next_settled(core: &mut CarouselCore) {
    let actions = core.next();
    settle_pending(core, &actions);
}

fn prev_settled(core: &mut CarouselCore) {
    let actions = core.prev();
    settle_pending(core, &actions);
}

/// Instant move, settled.
fn jump(core: &mut CarouselCore, index: usize) {
    let actions = core.go_to_slide(index, false);
    settle_pending(core, &actions);
}

fn settle_count(actions: &[Action]) -> usize {
    actions.iter().filter(|a| matches!(a, Action::ScheduleSettle { .. })).count()
}

fn has_action(actions: &[Action], pred: impl Fn(&Action) -> bool) -> bool {
    actions.iter().any(pred)
}

fn page_lens(core: &CarouselCore) -> Vec<usize> {
    core.pages().iter().map(Page::len).collect()
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn wrapping_variants_gain_two_clones_and_start_at_one() {
    for variant in [Variant::Main, Variant::Image] {
        let core = make_core(variant, 3, DESKTOP);
        assert_eq!(core.slide_count(), 5, "{variant:?}");
        assert_eq!(core.current_index(), 1, "{variant:?}");
        assert_eq!(core.slots()[0], Slot::LeadClone);
        assert_eq!(core.slots()[4], Slot::TrailClone);
    }
}

#[test]
fn initialize_emits_layout_then_position() {
    let mut core = CarouselCore::new(Variant::Main, 3, DESKTOP, CarouselConfig::default());
    let actions = core.initialize();
    assert_eq!(
        actions,
        vec![
            Action::SetCursor(Cursor::Grab),
            Action::RenderSlides,
            Action::RenderDots { count: 3 },
            Action::Translate { percent: 100.0, animate: false },
            Action::SyncDots { active: Some(0) },
        ]
    );
    assert!(!core.is_animating());
}

#[test]
fn initialize_twice_is_noop() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    assert!(core.initialize().is_empty());
    assert_eq!(core.slide_count(), 5);
}

#[test]
fn single_slide_stays_static() {
    let mut core = make_core(Variant::Main, 1, DESKTOP);
    assert!(!core.is_initialized());
    assert_eq!(core.slide_count(), 0);
    assert!(core.next().is_empty());
    assert!(core.press(InputSource::Touch, 10.0).is_empty());
    assert_eq!(core.dot_count(), 0);
}

#[test]
fn image_variant_starts_autoplay() {
    let mut core = CarouselCore::new(Variant::Image, 3, DESKTOP, CarouselConfig::default());
    let actions = core.initialize();
    assert!(actions.contains(&Action::StartAutoplay { interval_ms: 3000 }));
    assert!(core.autoplay_running());
}

#[test]
fn main_variant_never_autoplays() {
    let mut core = CarouselCore::new(Variant::Main, 3, DESKTOP, CarouselConfig::default());
    let actions = core.initialize();
    assert!(!has_action(&actions, |a| matches!(a, Action::StartAutoplay { .. })));
    assert!(core.pointer_leave().is_empty());
}

#[test]
fn logo_does_not_wrap_and_sizes_slides() {
    let mut core = CarouselCore::new(Variant::Logo, 7, DESKTOP, CarouselConfig::default());
    let actions = core.initialize();
    assert!(actions.contains(&Action::SizeSlides { percent: 20.0 }));
    assert_eq!(core.slide_count(), 7);
    assert_eq!(core.current_index(), 0);
    assert_eq!(core.dot_count(), 7);
    assert!(core.slots().iter().all(|s| !s.is_clone()));
}

#[test]
fn repertory_pages_desktop() {
    let core = make_core(Variant::Repertory, 10, DESKTOP);
    assert_eq!(core.visible_items(), 6);
    assert_eq!(page_lens(&core), vec![6, 4]);
    assert_eq!(core.slide_count(), 2);
    assert_eq!(core.dot_count(), 2);
    assert_eq!(core.current_index(), 0);
}

#[test]
fn repertory_pages_mobile() {
    let core = make_core(Variant::Repertory, 10, MOBILE);
    assert_eq!(core.visible_items(), 4);
    assert_eq!(page_lens(&core), vec![4, 4, 2]);
    assert_eq!(core.slide_count(), 3);
}

#[test]
fn repertory_initializes_even_when_sparse() {
    let core = make_core(Variant::Repertory, 1, DESKTOP);
    assert!(core.is_initialized());
    assert_eq!(page_lens(&core), vec![1]);
    assert_eq!(core.active_dot(), Some(0));
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn animated_move_locks_and_schedules_settle() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    let actions = core.go_to_slide(2, true);
    assert!(core.is_animating());
    assert_eq!(core.current_index(), 2);
    assert_eq!(actions[0], Action::Translate { percent: 200.0, animate: true });
    assert_eq!(actions[1], Action::SyncDots { active: Some(1) });
    assert!(matches!(actions[2], Action::ScheduleSettle { delay_ms: 500, .. }));
}

#[test]
fn go_to_while_animating_is_noop() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.go_to_slide(2, true);
    assert!(core.go_to_slide(3, true).is_empty());
    assert!(core.go_to_slide(1, false).is_empty());
    assert!(core.next().is_empty());
    assert_eq!(core.current_index(), 2);
    assert!(core.is_animating());
}

#[test]
fn go_to_out_of_range_is_noop() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    assert!(core.go_to_slide(5, true).is_empty());
    assert_eq!(core.current_index(), 1);
    assert!(!core.is_animating());
}

#[test]
fn settle_releases_lock() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    let actions = core.go_to_slide(2, true);
    let settled = settle_pending(&mut core, &actions);
    assert!(settled.is_empty());
    assert!(!core.is_animating());
    assert_eq!(core.current_index(), 2);
}

#[test]
fn stale_settle_is_ignored() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    let actions = core.go_to_slide(2, true);
    let ticket = settle_ticket(&actions).unwrap();
    assert!(core.settle(ticket + 1).is_empty());
    assert!(core.is_animating());
}

#[test]
fn instant_move_still_holds_the_lock() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    let actions = core.go_to_slide(2, false);
    assert!(core.is_animating());
    assert_eq!(actions[0], Action::Translate { percent: 200.0, animate: false });
    assert!(matches!(actions[2], Action::ScheduleSettle { delay_ms: 500, .. }));

    assert!(core.go_to_slide(3, true).is_empty());
    assert!(core.next().is_empty());
    assert_eq!(core.current_index(), 2);

    settle_pending(&mut core, &actions);
    assert!(!core.is_animating());
    assert_eq!(core.go_to_slide(3, true).len(), 3);
}

#[test]
fn instant_move_to_clone_reanchors_on_settle() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    let actions = core.go_to_slide(0, false);
    assert_eq!(core.current_index(), 0);
    assert_eq!(actions[0], Action::Translate { percent: 0.0, animate: false });
    let settled = settle_pending(&mut core, &actions);
    assert_eq!(core.current_index(), 3);
    assert_eq!(settled[0], Action::Translate { percent: 300.0, animate: false });
}

#[test]
fn next_past_last_lands_on_trail_clone_then_reanchors() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    next_settled(&mut core);
    next_settled(&mut core);
    assert_eq!(core.current_index(), 3);

    let actions = core.next();
    assert_eq!(core.current_index(), 4);
    assert_eq!(core.active_dot(), Some(0));
    let settled = settle_pending(&mut core, &actions);
    assert_eq!(core.current_index(), 1);
    assert_eq!(settled[0], Action::Translate { percent: 100.0, animate: false });
}

#[test]
fn prev_from_first_lands_on_lead_clone_then_reanchors() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    let actions = core.prev();
    assert_eq!(core.current_index(), 0);
    assert_eq!(core.active_dot(), Some(2));
    settle_pending(&mut core, &actions);
    assert_eq!(core.current_index(), 3);
}

#[test]
fn index_always_settles_inside_real_range() {
    let mut core = make_core(Variant::Image, 4, DESKTOP);
    let len = core.slide_count();
    let mut seed: u32 = 7;
    for _ in 0..200 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        if seed % 3 == 0 {
            prev_settled(&mut core);
        } else {
            next_settled(&mut core);
        }
        let index = core.current_index();
        assert!((1..=len - 2).contains(&index), "rested on {index}");
        assert!(!core.is_animating());
    }
}

#[test]
fn next_then_prev_round_trips() {
    for start in 1..=3 {
        let mut core = make_core(Variant::Main, 3, DESKTOP);
        jump(&mut core, start);
        next_settled(&mut core);
        prev_settled(&mut core);
        assert_eq!(core.current_index(), start, "start {start}");
    }
}

#[test]
fn non_wrapping_next_cycles_modulo() {
    let mut core = make_core(Variant::Repertory, 10, MOBILE);
    next_settled(&mut core);
    next_settled(&mut core);
    assert_eq!(core.current_index(), 2);
    next_settled(&mut core);
    assert_eq!(core.current_index(), 0);
    prev_settled(&mut core);
    assert_eq!(core.current_index(), 2);
}

#[test]
fn logo_offsets_step_by_one_logo() {
    let core = make_core(Variant::Logo, 7, DESKTOP);
    assert_eq!(core.offset_percent(2), 40.0);
    let mobile = make_core(Variant::Logo, 7, MOBILE);
    assert!((mobile.offset_percent(3) - 100.0).abs() < 1e-9);
}

// =============================================================
// Dots
// =============================================================

#[test]
fn wrapping_dot_mapping() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    assert_eq!(core.slide_count(), 5);
    assert_eq!(core.active_dot(), Some(0));
    jump(&mut core, 3);
    assert_eq!(core.active_dot(), Some(2));
}

#[test]
fn repertory_dots_track_index_directly() {
    let mut core = make_core(Variant::Repertory, 10, MOBILE);
    jump(&mut core, 2);
    assert_eq!(core.active_dot(), Some(2));
}

#[test]
fn dot_click_targets_logical_page() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.go_to_dot(2);
    assert_eq!(core.current_index(), 3);

    let mut repertory = make_core(Variant::Repertory, 10, MOBILE);
    repertory.go_to_dot(1);
    assert_eq!(repertory.current_index(), 1);
}

#[test]
fn dot_out_of_range_is_noop() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    assert!(core.go_to_dot(3).is_empty());
    assert_eq!(core.current_index(), 1);
}

// =============================================================
// Gestures
// =============================================================

#[test]
fn swipe_left_past_threshold_triggers_one_next() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.press(InputSource::Touch, 200.0);
    core.drag(170.0);
    core.drag(140.0);
    let actions = core.release(Some(140.0), 1000.0);
    assert_eq!(settle_count(&actions), 1);
    assert_eq!(core.current_index(), 2);
    assert!(actions.contains(&Action::PreventDefault));
}

#[test]
fn short_swipe_does_not_navigate() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.press(InputSource::Touch, 200.0);
    core.drag(160.0);
    let actions = core.release(Some(160.0), 1000.0);
    assert_eq!(settle_count(&actions), 0);
    assert_eq!(core.current_index(), 1);
    assert!(!core.clicks_suppressed(1001.0));
}

#[test]
fn swipe_right_triggers_prev() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.press(InputSource::Pointer, 100.0);
    core.drag(180.0);
    core.release(Some(180.0), 1000.0);
    assert_eq!(core.current_index(), 0);
}

#[test]
fn release_without_moves_is_not_a_swipe() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.press(InputSource::Touch, 200.0);
    let actions = core.release(Some(20.0), 1000.0);
    assert!(actions.is_empty());
    assert_eq!(core.current_index(), 1);
}

#[test]
fn touch_jitter_does_not_prevent_scroll() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.press(InputSource::Touch, 200.0);
    assert!(core.drag(192.0).is_empty());
    assert_eq!(core.drag(185.0), vec![Action::PreventDefault]);
    assert!(core.gesture().is_swiping());
}

#[test]
fn pointer_jitter_is_tighter() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.press(InputSource::Pointer, 200.0);
    assert_eq!(core.drag(194.0), vec![Action::PreventDefault]);
}

#[test]
fn pointer_press_and_release_toggle_cursor() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    let pressed = core.press(InputSource::Pointer, 10.0);
    assert_eq!(pressed, vec![Action::SetCursor(Cursor::Grabbing), Action::PreventDefault]);
    let released = core.release(Some(10.0), 0.0);
    assert_eq!(released, vec![Action::SetCursor(Cursor::Grab)]);
    assert!(!core.gesture().is_pressed());
}

#[test]
fn drag_without_press_is_noop() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    assert!(core.drag(500.0).is_empty());
    assert!(core.release(Some(0.0), 0.0).is_empty());
}

#[test]
fn click_guard_lasts_three_hundred_ms() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.press(InputSource::Touch, 200.0);
    core.drag(120.0);
    core.release(Some(120.0), 1000.0);
    assert!(core.clicks_suppressed(1000.0));
    assert!(core.clicks_suppressed(1299.0));
    assert!(!core.clicks_suppressed(1300.0));
}

#[test]
fn swipe_during_transition_guards_clicks_without_navigating() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.next();
    core.press(InputSource::Touch, 200.0);
    core.drag(100.0);
    let actions = core.release(Some(100.0), 50.0);
    assert_eq!(settle_count(&actions), 0);
    assert_eq!(core.current_index(), 2);
    assert!(core.clicks_suppressed(60.0));
}

#[test]
fn leaving_mid_drag_releases_at_last_position() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.press(InputSource::Pointer, 300.0);
    core.drag(220.0);
    let actions = core.cancel(0.0);
    assert_eq!(settle_count(&actions), 1);
    assert_eq!(core.current_index(), 2);
}

// =============================================================
// Autoplay
// =============================================================

#[test]
fn hover_pauses_and_resumes_autoplay() {
    let mut core = make_core(Variant::Image, 3, DESKTOP);
    assert_eq!(core.pointer_enter(), vec![Action::StopAutoplay]);
    assert!(!core.autoplay_running());
    assert!(core.pointer_enter().is_empty());
    assert!(core.autoplay_tick().is_empty());
    assert_eq!(core.pointer_leave(), vec![Action::StartAutoplay { interval_ms: 3000 }]);
    assert!(core.pointer_leave().is_empty());
}

#[test]
fn autoplay_tick_advances() {
    let mut core = make_core(Variant::Image, 3, DESKTOP);
    let actions = core.autoplay_tick();
    assert_eq!(settle_count(&actions), 1);
    assert_eq!(core.current_index(), 2);
}

#[test]
fn autoplay_tick_loses_to_user_navigation() {
    let mut core = make_core(Variant::Image, 3, DESKTOP);
    core.next();
    assert!(core.autoplay_tick().is_empty());
    assert_eq!(core.current_index(), 2);
}

#[test]
fn custom_autoplay_interval() {
    let config = CarouselConfig { autoplay_ms: 5000, ..CarouselConfig::default() };
    let mut core = CarouselCore::new(Variant::Image, 3, DESKTOP, config);
    let actions = core.initialize();
    assert!(actions.contains(&Action::StartAutoplay { interval_ms: 5000 }));
}

// =============================================================
// Responsive
// =============================================================

#[test]
fn logo_resize_resizes_without_moving() {
    let mut core = make_core(Variant::Logo, 7, DESKTOP);
    next_settled(&mut core);
    next_settled(&mut core);
    assert_eq!(core.current_index(), 2);

    let actions = core.resize(MOBILE);
    assert_eq!(core.visible_items(), 3);
    assert_eq!(core.current_index(), 2);
    let Some(Action::SizeSlides { percent }) = actions.first() else {
        panic!("expected SizeSlides first, got {actions:?}");
    };
    assert!((percent - 33.33).abs() < 0.01);
    assert!(!has_action(&actions, |a| matches!(a, Action::RenderSlides)));
}

#[test]
fn resize_within_breakpoint_is_noop() {
    let mut core = make_core(Variant::Logo, 7, DESKTOP);
    assert!(core.resize(1024.0).is_empty());
    assert!(core.resize(1920.0).is_empty());
}

#[test]
fn main_never_relayouts_on_resize() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    assert!(core.resize(MOBILE).is_empty());
    assert_eq!(core.slide_count(), 5);
}

#[test]
fn repertory_resize_rechunks_and_keeps_page() {
    let mut core = make_core(Variant::Repertory, 10, DESKTOP);
    next_settled(&mut core);
    assert_eq!(core.current_index(), 1);

    let actions = core.resize(MOBILE);
    assert_eq!(page_lens(&core), vec![4, 4, 2]);
    assert_eq!(core.current_index(), 1);
    assert!(actions.contains(&Action::RenderSlides));
    assert!(actions.contains(&Action::RenderDots { count: 3 }));
}

#[test]
fn repertory_resize_clamps_index() {
    let mut core = make_core(Variant::Repertory, 10, MOBILE);
    jump(&mut core, 2);
    core.resize(DESKTOP);
    assert_eq!(page_lens(&core), vec![6, 4]);
    assert_eq!(core.current_index(), 1);
}

#[test]
fn resize_cancels_in_flight_transition() {
    let mut core = make_core(Variant::Repertory, 10, DESKTOP);
    let pending = core.next();
    core.resize(MOBILE);
    assert!(!core.is_animating());
    assert!(settle_pending(&mut core, &pending).is_empty());
    assert!(!core.next().is_empty());
}

#[test]
fn resize_before_initialize_only_records_count() {
    let mut core = CarouselCore::new(Variant::Logo, 7, DESKTOP, CarouselConfig::default());
    assert!(core.resize(MOBILE).is_empty());
    assert_eq!(core.visible_items(), 3);
}

// =============================================================
// Disposal
// =============================================================

#[test]
fn dispose_stops_autoplay() {
    let mut core = make_core(Variant::Image, 3, DESKTOP);
    core.next();
    assert_eq!(core.dispose(), vec![Action::StopAutoplay, Action::RestoreMarkup]);
    assert!(!core.is_animating());
    assert!(core.autoplay_tick().is_empty());
    assert!(core.dispose().is_empty());
}

#[test]
fn dispose_restores_markup_and_goes_inert() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    next_settled(&mut core);
    assert_eq!(core.dispose(), vec![Action::RestoreMarkup]);
    assert!(!core.is_initialized());
    assert_eq!(core.slide_count(), 0);
    assert_eq!(core.dot_count(), 0);
    assert!(core.next().is_empty());
    assert!(core.press(InputSource::Touch, 10.0).is_empty());
}

#[test]
fn dispose_then_initialize_rebuilds_from_original_count() {
    let mut core = make_core(Variant::Main, 3, DESKTOP);
    core.dispose();
    let actions = core.initialize();
    assert!(actions.contains(&Action::RenderDots { count: 3 }));
    assert_eq!(core.slide_count(), 5);
    assert_eq!(core.current_index(), 1);
}

#[test]
fn dispose_before_initialize_is_noop() {
    let mut core = CarouselCore::new(Variant::Main, 1, DESKTOP, CarouselConfig::default());
    core.initialize();
    assert!(core.dispose().is_empty());
}
