use super::*;

const HERO: Bounds = Bounds { left: 100.0, top: 50.0, width: 400.0, height: 300.0 };

#[test]
fn centre_has_no_offset() {
    assert_eq!(parallax_offset(300.0, 200.0, HERO), (0.0, 0.0));
}

#[test]
fn corners_reach_half_the_range() {
    assert_eq!(parallax_offset(100.0, 50.0, HERO), (-20.0, -15.0));
    assert_eq!(parallax_offset(500.0, 350.0, HERO), (20.0, 15.0));
}

#[test]
fn offset_is_relative_to_the_box() {
    let shifted = Bounds { left: 0.0, top: 0.0, ..HERO };
    assert_eq!(parallax_offset(200.0, 150.0, shifted), (0.0, 0.0));
}

#[test]
fn degenerate_box_yields_no_offset() {
    let flat = Bounds { height: 0.0, ..HERO };
    assert_eq!(parallax_offset(120.0, 60.0, flat), (0.0, 0.0));
    let thin = Bounds { width: 0.0, ..HERO };
    assert_eq!(parallax_offset(120.0, 60.0, thin), (0.0, 0.0));
}

#[test]
fn translate_formats_pixels() {
    assert_eq!(translate(-20.0, 15.0), "translate(-20px, 15px)");
    assert_eq!(translate(2.5, 0.0), "translate(2.5px, 0px)");
}
