#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn spy() -> Scrollspy {
    Scrollspy::new(["inicio", "servicos", "equipe", "contato"])
}

// --- bounds ---

#[test]
fn bounds_contain_edges() {
    let b = SectionBounds::new(100.0, 300.0);
    assert!(b.contains(100.0));
    assert!(b.contains(300.0));
    assert!(!b.contains(300.5));
}

#[test]
fn distance_is_to_nearest_edge() {
    let b = SectionBounds::new(100.0, 300.0);
    assert_eq!(b.distance_to(200.0), 0.0);
    assert_eq!(b.distance_to(50.0), 50.0);
    assert_eq!(b.distance_to(340.0), 40.0);
}

// --- header height and activation line ---

#[test]
fn rendered_header_height_wins() {
    assert_eq!(resolve_header_height(72.0, Some("90px"), 84.0), 72.0);
}

#[test]
fn css_variable_used_before_layout() {
    assert_eq!(resolve_header_height(0.0, Some(" 90px"), 84.0), 90.0);
}

#[test]
fn fallback_when_variable_missing_or_bad() {
    assert_eq!(resolve_header_height(0.0, None, 84.0), 84.0);
    assert_eq!(resolve_header_height(0.0, Some("auto"), 84.0), 84.0);
}

#[test]
fn negative_height_clamps_to_zero() {
    assert_eq!(resolve_header_height(0.0, Some("-20px"), 84.0), 0.0);
}

#[test]
fn activation_line_sits_thirty_percent_below_header() {
    assert_eq!(activation_line(84.0, 1000.0, 0.3), 384.0);
    assert_eq!(activation_line(84.0, 815.0, 0.3), 329.0);
}

#[test]
fn root_margin_shifts_top_by_activation_line() {
    assert_eq!(root_margin(384.0, "-45%"), "-384px 0px -45% 0px");
}

// --- hybrid score ---

#[test]
fn non_intersecting_scores_zero() {
    let config = ScrollspyConfig::default();
    assert_eq!(hybrid_score(false, 1.0, 384.0, 384.0, &config), 0.0);
}

#[test]
fn score_blends_ratio_and_proximity() {
    let config = ScrollspyConfig::default();
    assert!(approx_eq(hybrid_score(true, 1.0, 384.0, 384.0, &config), 1.0));
    assert!(approx_eq(hybrid_score(true, 0.5, 384.0, 384.0, &config), 0.6));
    // One pixel away halves the proximity term.
    assert!(approx_eq(hybrid_score(true, 0.0, 385.0, 384.0, &config), 0.1));
}

#[test]
fn proximity_term_stays_within_unit_interval() {
    let config = ScrollspyConfig { ratio_weight: 0.0, proximity_weight: 1.0, ..ScrollspyConfig::default() };
    for top in [-5000.0, -1.0, 0.0, 383.0, 384.0, 9000.0] {
        let p = hybrid_score(true, 0.0, top, 384.0, &config);
        assert!(p > 0.0 && p <= 1.0, "proximity {p} out of range for top {top}");
    }
}

#[test]
fn visible_ratio_dominates_proximity() {
    let config = ScrollspyConfig::default();
    let near_but_thin = hybrid_score(true, 0.25, 384.0, 384.0, &config);
    let far_but_full = hybrid_score(true, 1.0, 900.0, 384.0, &config);
    assert!(far_but_full > near_but_thin);
}

// --- geometry ---

#[test]
fn containing_section_wins_regardless_of_neighbours() {
    let sections = [
        ("inicio", SectionBounds::new(-900.0, 383.0)),
        ("servicos", SectionBounds::new(-100.0, 2000.0)),
        ("equipe", SectionBounds::new(385.0, 900.0)),
    ];
    assert_eq!(closest_by_geometry(sections, 384.0), Some("servicos"));
}

#[test]
fn nearest_section_when_none_contains_line() {
    let sections = [
        ("inicio", SectionBounds::new(-900.0, -400.0)),
        ("servicos", SectionBounds::new(500.0, 900.0)),
    ];
    assert_eq!(closest_by_geometry(sections, 384.0), Some("servicos"));
}

#[test]
fn geometry_ties_go_to_first() {
    let sections = [
        ("inicio", SectionBounds::new(0.0, 284.0)),
        ("servicos", SectionBounds::new(484.0, 900.0)),
    ];
    assert_eq!(closest_by_geometry(sections, 384.0), Some("inicio"));
}

#[test]
fn overlapping_sections_pick_first_container() {
    let sections = [
        ("a", SectionBounds::new(0.0, 500.0)),
        ("b", SectionBounds::new(300.0, 600.0)),
    ];
    assert_eq!(closest_by_geometry(sections, 384.0), Some("a"));
}

#[test]
fn no_sections_no_pick() {
    let sections: [(&str, SectionBounds); 0] = [];
    assert_eq!(closest_by_geometry(sections, 384.0), None);
}

// --- score board ---

#[test]
fn best_score_wins() {
    let mut board = ScoreBoard::new();
    board.record("inicio", 0.2);
    board.record("servicos", 0.9);
    board.record("equipe", 0.4);
    assert_eq!(board.best(), Some("servicos"));
}

#[test]
fn latest_score_replaces_earlier_one() {
    let mut board = ScoreBoard::new();
    board.record("inicio", 0.9);
    board.record("servicos", 0.5);
    board.record("inicio", 0.0);
    assert_eq!(board.best(), Some("servicos"));
}

#[test]
fn score_ties_go_to_first_recorded() {
    let mut board = ScoreBoard::new();
    board.record("equipe", 0.5);
    board.record("inicio", 0.5);
    assert_eq!(board.best(), Some("equipe"));
}

#[test]
fn all_zero_scores_still_pick_a_section() {
    let mut board = ScoreBoard::new();
    board.record("inicio", 0.0);
    board.record("servicos", 0.0);
    assert_eq!(board.best(), Some("inicio"));
}

#[test]
fn cleared_board_is_empty() {
    let mut board = ScoreBoard::new();
    board.record("inicio", 1.0);
    board.clear();
    assert_eq!(board.best(), None);
}

// --- activation ---

#[test]
fn duplicate_links_are_tracked_once() {
    let spy = Scrollspy::new(["a", "b", "a"]);
    assert_eq!(spy.ids(), ["a".to_owned(), "b".to_owned()]);
}

#[test]
fn empty_map_is_inert() {
    let spy = Scrollspy::new(Vec::<String>::new());
    assert!(spy.is_empty());
    assert_eq!(spy.active(), None);
}

#[test]
fn activation_is_exclusive() {
    let mut spy = spy();
    assert!(spy.activate("servicos"));
    assert!(spy.activate("equipe"));
    assert_eq!(spy.active(), Some("equipe"));
}

#[test]
fn reactivating_same_section_is_no_change() {
    let mut spy = spy();
    spy.activate("equipe");
    assert!(!spy.activate("equipe"));
}

#[test]
fn untracked_id_keeps_current_highlight() {
    let mut spy = spy();
    spy.activate("contato");
    assert!(!spy.activate("blog"));
    assert_eq!(spy.active(), Some("contato"));
}

#[test]
fn exactly_one_active_after_any_sequence() {
    let mut spy = spy();
    for id in ["equipe", "inicio", "nope", "contato", "contato", "servicos"] {
        spy.activate(id);
        let active = spy.active().map(str::to_owned);
        let count = spy.ids().iter().filter(|id| Some(id.as_str()) == active.as_deref()).count();
        assert_eq!(count, 1);
    }
}

// --- initial state ---

#[test]
fn initial_prefers_tracked_hash() {
    let spy = spy();
    assert_eq!(spy.initial("#equipe", Some("inicio")), Some("equipe"));
}

#[test]
fn initial_falls_back_to_geometry() {
    let spy = spy();
    assert_eq!(spy.initial("", Some("inicio")), Some("inicio"));
    assert_eq!(spy.initial("#", Some("inicio")), Some("inicio"));
}

#[test]
fn untracked_hash_falls_back_to_geometry() {
    let spy = spy();
    assert_eq!(spy.initial("#blog", Some("servicos")), Some("servicos"));
}

#[test]
fn initial_may_be_unresolved() {
    let spy = spy();
    assert_eq!(spy.initial("", None), None);
}
