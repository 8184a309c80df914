use super::*;

// =============================================================
// MenuCore
// =============================================================

#[test]
fn menu_starts_closed() {
    let menu = MenuCore::new(3);
    assert_eq!(menu.len(), 3);
    assert!(!menu.is_empty());
    assert_eq!(menu.open_items().count(), 0);
}

#[test]
fn toggle_twice_restores_closed_item() {
    let mut menu = MenuCore::new(3);
    let before = menu.clone();
    assert!(menu.toggle(1));
    assert!(!menu.toggle(1));
    assert_eq!(menu, before);
}

#[test]
fn toggle_twice_restores_open_item() {
    let mut menu = MenuCore::new(3);
    menu.toggle(2);
    let before = menu.clone();
    menu.toggle(2);
    menu.toggle(2);
    assert_eq!(menu, before);
}

#[test]
fn opening_one_item_closes_the_others() {
    let mut menu = MenuCore::new(3);
    menu.toggle(0);
    menu.toggle(2);
    assert!(!menu.is_open(0));
    assert!(menu.is_open(2));
    assert_eq!(menu.open_items().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn open_only_is_idempotent() {
    let mut menu = MenuCore::new(2);
    menu.open_only(1);
    menu.open_only(1);
    assert!(menu.is_open(1));
    assert!(!menu.is_open(0));
}

#[test]
fn close_all_closes_everything() {
    let mut menu = MenuCore::new(4);
    menu.open_only(3);
    menu.close_all();
    assert_eq!(menu.open_items().count(), 0);
}

#[test]
fn out_of_range_index_is_ignored() {
    let mut menu = MenuCore::new(1);
    assert!(!menu.toggle(5));
    menu.open_only(5);
    menu.close(5);
    assert!(!menu.is_open(5));
    assert_eq!(menu.open_items().count(), 0);
}

#[test]
fn empty_menu_reports_empty() {
    assert!(MenuCore::new(0).is_empty());
}

// =============================================================
// OverlayState
// =============================================================

#[test]
fn overlay_toggle_twice_returns_to_closed() {
    let mut overlay = OverlayState::default();
    assert!(overlay.toggle());
    assert!(!overlay.toggle());
    assert_eq!(overlay, OverlayState::default());
}

// =============================================================
// Layout and styling
// =============================================================

#[test]
fn layout_breakpoint_is_inclusive() {
    assert_eq!(NavLayout::for_width(900.0, 900.0), NavLayout::Mobile);
    assert_eq!(NavLayout::for_width(320.0, 900.0), NavLayout::Mobile);
    assert_eq!(NavLayout::for_width(901.0, 900.0), NavLayout::Desktop);
}

#[test]
fn hamburger_bars_form_an_x() {
    assert_eq!(hamburger_bar_style(0), (Some("translateY(7px) rotate(45deg)".to_owned()), None));
    assert_eq!(hamburger_bar_style(1), (None, Some("0")));
    assert_eq!(hamburger_bar_style(2), (Some("translateY(-7px) rotate(-45deg)".to_owned()), None));
    assert_eq!(hamburger_bar_style(3), (None, None));
}

#[test]
fn open_keys() {
    assert!(is_open_key("ArrowDown"));
    assert!(is_open_key("Enter"));
    assert!(is_open_key(" "));
    assert!(!is_open_key("ArrowUp"));
    assert!(!is_open_key("Escape"));
}
