use super::*;

fn words() -> Vec<String> {
    ["Fisioterapia", "Pilates", "Reabilitação"].iter().map(|w| (*w).to_owned()).collect()
}

fn rotator() -> RotatorCore {
    match RotatorCore::new(words(), 3) {
        Some(core) => core,
        None => panic!("default words should build a rotator"),
    }
}

#[test]
fn starts_on_first_word_with_one_dot() {
    let core = rotator();
    assert_eq!(core.text(), "Fisioterapia.");
}

#[test]
fn dots_cycle_one_to_three() {
    let mut core = rotator();
    let mut seen = Vec::new();
    for _ in 0..6 {
        core.tick_dots();
        seen.push(core.dots());
    }
    assert_eq!(seen, vec![2, 3, 1, 2, 3, 1]);
}

#[test]
fn dot_count_stays_in_range() {
    let mut core = rotator();
    for step in 0..100 {
        if step % 7 == 0 {
            core.advance_word();
        } else {
            core.tick_dots();
        }
        assert!((1..=3).contains(&core.dots()));
    }
}

#[test]
fn word_change_resets_dots() {
    let mut core = rotator();
    core.tick_dots();
    core.tick_dots();
    core.advance_word();
    assert_eq!(core.text(), "Pilates.");
}

#[test]
fn after_n_periods_word_is_n_mod_len() {
    let list = words();
    let mut core = rotator();
    for n in 1..=10 {
        core.advance_word();
        assert_eq!(core.word(), list[n % list.len()]);
    }
}

#[test]
fn single_word_rotates_onto_itself() {
    let Some(mut core) = RotatorCore::new(vec!["Pilates".into()], 2) else {
        panic!("single word should build");
    };
    core.tick_dots();
    core.advance_word();
    assert_eq!(core.text(), "Pilates.");
}

#[test]
fn empty_word_list_is_rejected() {
    assert!(RotatorCore::new(Vec::new(), 3).is_none());
}

#[test]
fn zero_dot_limit_is_rejected() {
    assert!(RotatorCore::new(words(), 0).is_none());
}

#[test]
fn one_dot_limit_stays_at_one() {
    let Some(mut core) = RotatorCore::new(words(), 1) else {
        panic!("one dot should build");
    };
    core.tick_dots();
    assert_eq!(core.dots(), 1);
}
