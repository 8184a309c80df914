use super::*;

#[test]
fn missing_delay_uses_stagger() {
    assert_eq!(stagger_delay(None, 0), 0);
    assert_eq!(stagger_delay(None, 1), 80);
    assert_eq!(stagger_delay(None, 5), 400);
}

#[test]
fn explicit_delay_wins() {
    assert_eq!(stagger_delay(Some("250"), 3), 250);
    assert_eq!(stagger_delay(Some(" 120 "), 0), 120);
    assert_eq!(stagger_delay(Some("99.7"), 0), 99);
}

#[test]
fn zero_or_garbage_delay_falls_back() {
    assert_eq!(stagger_delay(Some("0"), 2), 160);
    assert_eq!(stagger_delay(Some(""), 2), 160);
    assert_eq!(stagger_delay(Some("soon"), 2), 160);
    assert_eq!(stagger_delay(Some("-40"), 2), 160);
    assert_eq!(stagger_delay(Some("NaN"), 2), 160);
}

#[test]
fn huge_values_saturate() {
    assert_eq!(stagger_delay(Some("1e12"), 0), u32::MAX);
    assert_eq!(stagger_delay(None, usize::MAX), u32::MAX);
}
