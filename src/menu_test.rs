use super::*;

fn core() -> MenuCore<&'static str> {
    MenuCore::new(MenuConfig::default())
}

// --- open / close ---

#[test]
fn starts_closed() {
    assert!(!core().is_open());
}

#[test]
fn close_restores_focus_from_before_open() {
    let mut menu = core();
    assert!(menu.open(Some("cta-button"), 0.0, 0.0));
    assert_eq!(menu.close(), Some("cta-button"));
}

#[test]
fn focus_restore_tracks_each_open() {
    let mut menu = core();
    for target in ["logo", "search", "footer-link"] {
        menu.open(Some(target), 0.0, 0.0);
        assert_eq!(menu.close(), Some(target));
    }
}

#[test]
fn reopening_while_open_keeps_original_focus() {
    let mut menu = core();
    menu.open(Some("first"), 0.0, 0.0);
    assert!(!menu.open(Some("nav-link"), 0.0, 10.0));
    assert_eq!(menu.close(), Some("first"));
}

#[test]
fn closing_twice_restores_only_once() {
    let mut menu = core();
    menu.open(Some("first"), 0.0, 0.0);
    assert_eq!(menu.close(), Some("first"));
    assert_eq!(menu.close(), None);
}

#[test]
fn open_without_prior_focus_restores_nothing() {
    let mut menu = core();
    menu.open(None, 0.0, 0.0);
    assert_eq!(menu.close(), None);
}

// --- scroll auto-close ---

#[test]
fn scroll_inside_guard_window_never_closes() {
    let mut menu = core();
    menu.open(None, 100.0, 1_000.0);
    assert!(!menu.should_close_on_scroll(500.0, 1_249.0));
}

#[test]
fn scroll_past_tolerance_closes_after_guard() {
    let mut menu = core();
    menu.open(None, 100.0, 1_000.0);
    assert!(menu.should_close_on_scroll(125.0, 1_250.0));
    assert!(menu.should_close_on_scroll(75.0, 2_000.0));
}

#[test]
fn small_scroll_is_tolerated() {
    let mut menu = core();
    menu.open(None, 100.0, 0.0);
    assert!(!menu.should_close_on_scroll(124.0, 10_000.0));
    assert!(!menu.should_close_on_scroll(76.0, 10_000.0));
}

#[test]
fn closed_menu_ignores_scroll() {
    let menu = core();
    assert!(!menu.should_close_on_scroll(9_999.0, 9_999.0));
}

#[test]
fn menu_open_at_load_closes_on_scroll_and_restores_nothing() {
    // A box already checked at install is opened with whatever held focus.
    let mut menu = core();
    assert!(menu.open(None, 10_000.0, 0.0));
    assert!(menu.is_open());
    assert!(!menu.should_close_on_scroll(10_000.0, 10_000.0));
    assert!(menu.should_close_on_scroll(10_100.0, 10_000.0));
    assert_eq!(menu.close(), None);
    assert!(!menu.is_open());
}

#[test]
fn custom_tolerance_is_honored() {
    let mut menu: MenuCore<()> = MenuCore::new(MenuConfig { close_delta_px: 100.0, open_guard_ms: 0.0 });
    menu.open(None, 0.0, 0.0);
    assert!(!menu.should_close_on_scroll(90.0, 0.0));
    assert!(menu.should_close_on_scroll(101.0, 0.0));
}

// --- focus trap ---

#[test]
fn tab_on_last_wraps_to_first() {
    assert_eq!(trap_target(4, Some(3), false), Some(0));
}

#[test]
fn shift_tab_on_first_wraps_to_last() {
    assert_eq!(trap_target(4, Some(0), true), Some(3));
}

#[test]
fn tab_in_middle_uses_default_move() {
    assert_eq!(trap_target(4, Some(1), false), None);
    assert_eq!(trap_target(4, Some(2), true), None);
}

#[test]
fn focus_outside_region_is_pulled_back() {
    assert_eq!(trap_target(3, None, false), Some(0));
    assert_eq!(trap_target(3, None, true), Some(2));
}

#[test]
fn single_focusable_stays_put() {
    assert_eq!(trap_target(1, Some(0), false), Some(0));
    assert_eq!(trap_target(1, Some(0), true), Some(0));
}

#[test]
fn empty_region_does_nothing() {
    assert_eq!(trap_target(0, None, false), None);
}

#[test]
fn tab_sequence_never_leaves_region() {
    let count = 5;
    let mut focus = 0;
    for _ in 0..20 {
        focus = trap_target(count, Some(focus), false).unwrap_or(focus + 1);
        assert!(focus < count);
    }
    for _ in 0..20 {
        focus = trap_target(count, Some(focus), true).unwrap_or_else(|| focus - 1);
        assert!(focus < count);
    }
}
