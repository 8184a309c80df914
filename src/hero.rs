//! Hero section: pointer parallax on the light and the "view projects" jump.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, Window};

use crate::consts::{PARALLAX_RANGE_X_PX, PARALLAX_RANGE_Y_PX};
use crate::dom;
use crate::error::{SiteError, report, tolerate_missing};

#[cfg(test)]
#[path = "hero_test.rs"]
mod hero_test;

/// An axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Offset of the hero light for a pointer at (`x`, `y`) over `bounds`.
///
/// The light travels half the range either side of centre; a zero-size box
/// yields no offset.
#[must_use]
pub fn parallax_offset(x: f64, y: f64, bounds: Bounds) -> (f64, f64) {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return (0.0, 0.0);
    }
    let px = (x - bounds.left) / bounds.width;
    let py = (y - bounds.top) / bounds.height;
    ((px - 0.5) * PARALLAX_RANGE_X_PX, (py - 0.5) * PARALLAX_RANGE_Y_PX)
}

#[must_use]
pub fn translate(tx: f64, ty: f64) -> String {
    format!("translate({tx}px, {ty}px)")
}

fn mount_parallax(window: &Window, doc: &Document) -> Result<(), SiteError> {
    if dom::window_has(window, "ontouchstart") {
        return Ok(());
    }
    let light = dom::query_html(doc, ".hero-light")?;
    let hero = dom::query(doc, ".hero-section")?;

    let (h, l) = (hero.clone(), light.clone());
    dom::listen(&hero, "mousemove", move |e: Event| {
        let Some(mouse) = e.dyn_ref::<MouseEvent>() else { return };
        let rect = h.get_bounding_client_rect();
        let bounds = Bounds { left: rect.left(), top: rect.top(), width: rect.width(), height: rect.height() };
        let (tx, ty) = parallax_offset(f64::from(mouse.client_x()), f64::from(mouse.client_y()), bounds);
        report("hero parallax", dom::set_style(&l, "transform", &translate(tx, ty)));
    })?;
    dom::listen(&hero, "mouseleave", move |_| {
        report("hero parallax", dom::set_style(&light, "transform", "translate(0,0)"));
    })
}

fn mount_view_projects(doc: &Document) -> Result<(), SiteError> {
    let button: HtmlElement = dom::by_id(doc, "heroViewProjects")?;
    let d = doc.clone();
    dom::listen(&button, "click", move |_| {
        if let Some(section) = d.get_element_by_id("projects") {
            scroll_smooth(&section);
        }
    })
}

fn scroll_smooth(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Wire the hero parallax and buttons.
///
/// # Errors
///
/// Returns listener failures; absent hero parts are skipped.
pub fn mount(window: &Window, doc: &Document) -> Result<(), SiteError> {
    tolerate_missing(mount_parallax(window, doc))?;
    tolerate_missing(mount_view_projects(doc))?;
    Ok(())
}
