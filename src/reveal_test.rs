use super::*;

fn config() -> RevealConfig {
    RevealConfig::default()
}

// --- stagger ---

#[test]
fn default_stagger_steps_by_index() {
    assert_eq!(stagger_delay(0, None, &config()), 0);
    assert_eq!(stagger_delay(1, None, &config()), 60);
    assert_eq!(stagger_delay(5, None, &config()), 300);
}

#[test]
fn default_stagger_is_capped() {
    assert_eq!(stagger_delay(6, None, &config()), 360);
    assert_eq!(stagger_delay(100, None, &config()), 360);
}

#[test]
fn explicit_delay_overrides_index() {
    assert_eq!(stagger_delay(10, Some("120"), &config()), 120);
    assert_eq!(stagger_delay(0, Some("0"), &config()), 0);
}

#[test]
fn explicit_delay_may_exceed_cap() {
    assert_eq!(stagger_delay(0, Some("900"), &config()), 900);
}

#[test]
fn unparseable_delay_falls_back_to_index() {
    assert_eq!(stagger_delay(2, Some("soon"), &config()), 120);
    assert_eq!(stagger_delay(2, Some(""), &config()), 120);
}

// --- integer prefix parsing ---

#[test]
fn parses_plain_and_signed_integers() {
    assert_eq!(parse_leading_int("42"), Some(42));
    assert_eq!(parse_leading_int("-15"), Some(-15));
    assert_eq!(parse_leading_int("+7"), Some(7));
}

#[test]
fn ignores_leading_space_and_trailing_units() {
    assert_eq!(parse_leading_int("  200ms"), Some(200));
    assert_eq!(parse_leading_int("3.9"), Some(3));
}

#[test]
fn rejects_non_numeric_prefix() {
    assert_eq!(parse_leading_int("ms200"), None);
    assert_eq!(parse_leading_int("-"), None);
    assert_eq!(parse_leading_int(""), None);
}

// --- ledger ---

#[test]
fn element_is_revealed_at_most_once() {
    let mut ledger = RevealLedger::new(3);
    assert!(ledger.mark(1));
    assert!(!ledger.mark(1));
    assert!(ledger.is_revealed(1));
    assert_eq!(ledger.remaining(), 2);
}

#[test]
fn reveal_is_never_undone() {
    let mut ledger = RevealLedger::new(2);
    ledger.mark(0);
    ledger.mark_all();
    ledger.mark(0);
    assert!(ledger.is_revealed(0));
    assert!(ledger.is_revealed(1));
}

#[test]
fn mark_all_reports_only_hidden_elements() {
    let mut ledger = RevealLedger::new(4);
    ledger.mark(2);
    assert_eq!(ledger.mark_all(), vec![0, 1, 3]);
    assert_eq!(ledger.remaining(), 0);
    assert!(ledger.mark_all().is_empty());
}

#[test]
fn out_of_range_index_is_ignored() {
    let mut ledger = RevealLedger::new(1);
    assert!(!ledger.mark(5));
    assert!(!ledger.is_revealed(5));
}
