//! Scroll and load reveals: about hero, service cards, product images, and
//! the keyboard focus ring on `.btn`.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, Window};

use crate::consts::{
    ABOUT_BG_DELAY_MS, ABOUT_REVEAL_THRESHOLD, PRODUCT_IMAGE_THRESHOLD, SERVICE_CARD_STAGGER_MS,
};
use crate::dom;
use crate::error::{SiteError, report, tolerate_missing};

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

const IN_VIEW: &str = "inview";

/// Delay before service card `index` becomes visible.
///
/// A positive `data-delay` wins; anything else falls back to the stagger.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn stagger_delay(data_delay: Option<&str>, index: usize) -> u32 {
    let explicit = data_delay.and_then(|v| v.trim().parse::<f64>().ok()).filter(|d| d.is_finite() && *d > 0.0);
    match explicit {
        Some(delay) => delay.min(f64::from(u32::MAX)) as u32,
        None => u32::try_from(index).map_or(u32::MAX, |i| i.saturating_mul(SERVICE_CARD_STAGGER_MS)),
    }
}

// =============================================================================
// ABOUT HERO
// =============================================================================

fn reveal_about(parts: &[Element]) -> Result<(), SiteError> {
    for part in parts {
        dom::set_class(part, IN_VIEW, true)?;
    }
    Ok(())
}

fn mount_about(window: &Window, doc: &Document) -> Result<(), SiteError> {
    let hero = dom::query(doc, ".about-hero")?;
    let mut parts = vec![dom::query(doc, ".about-inner")?];
    for selector in [".about-box", ".about-us"] {
        if let Some(el) = doc.query_selector(selector)? {
            parts.push(el);
        }
    }

    if dom::prefers_reduced_motion(window) {
        return reveal_about(&parts);
    }

    if !dom::window_has(window, "IntersectionObserver") {
        return dom::on_ready(doc, move || {
            report("about reveal", reveal_about(&parts).and_then(|()| dom::set_class(&hero, "animate-bg", true)));
        });
    }

    let target = hero.clone();
    let observer = dom::intersection_observer(ABOUT_REVEAL_THRESHOLD, move |_, observer| {
        report("about reveal", reveal_about(&parts));
        let hero = hero.clone();
        Timeout::new(ABOUT_BG_DELAY_MS, move || {
            report("about background", dom::set_class(&hero, "animate-bg", true));
        })
        .forget();
        observer.disconnect();
    })?;
    observer.observe(&target);
    Ok(())
}

// =============================================================================
// SERVICE CARDS
// =============================================================================

/// Swap in `data-src` once the real image has loaded.
fn lazy_load(img: &Element) -> Result<(), SiteError> {
    let Some(real) = img.get_attribute("data-src") else {
        return Ok(());
    };
    let Some(img) = img.dyn_ref::<HtmlImageElement>().cloned() else {
        return Ok(());
    };
    let src = real.clone();
    dom::preload_image(&real, move || img.set_src(&src))
}

fn reveal_cards(cards: &[Element]) -> Result<(), SiteError> {
    for (i, card) in cards.iter().enumerate() {
        let delay = stagger_delay(card.get_attribute("data-delay").as_deref(), i);
        let c = card.clone();
        Timeout::new(delay, move || report("service card", dom::set_class(&c, "visible", true))).forget();
        if let Some(img) = card.query_selector("img[data-src]")? {
            lazy_load(&img)?;
        }
    }
    Ok(())
}

fn mount_service_cards(doc: &Document) -> Result<(), SiteError> {
    let cards = dom::query_all(doc, ".service-card")?;
    if cards.is_empty() {
        return Err(SiteError::MissingElement(".service-card"));
    }
    dom::on_ready(doc, move || report("service cards", reveal_cards(&cards)))
}

// =============================================================================
// PRODUCT IMAGES AND BUTTONS
// =============================================================================

fn mount_product_images(doc: &Document) -> Result<(), SiteError> {
    let images: Vec<_> = dom::query_all(doc, ".product-card .media img")?.into_iter().filter_map(dom::into_html).collect();
    if images.is_empty() {
        return Err(SiteError::MissingElement(".product-card .media img"));
    }
    let observer = dom::intersection_observer(PRODUCT_IMAGE_THRESHOLD, |target, observer| {
        if let Some(img) = dom::into_html(target) {
            let shown = dom::set_style(&img, "transition", "opacity 700ms ease, transform 700ms ease")
                .and_then(|()| dom::set_style(&img, "opacity", "1"));
            report("product image", shown);
            observer.unobserve(&img);
        }
    })?;
    for img in &images {
        dom::set_style(img, "opacity", "0")?;
        observer.observe(img);
    }
    Ok(())
}

fn mount_button_focus(doc: &Document) -> Result<(), SiteError> {
    for button in dom::query_all(doc, ".btn")? {
        for (event, on) in [("focus", true), ("blur", false)] {
            let b = button.clone();
            dom::listen(&button, event, move |_| report("button focus", dom::set_class(&b, "focus", on)))?;
        }
    }
    Ok(())
}

/// Wire every reveal present on the page.
///
/// # Errors
///
/// Returns observer or listener failures; absent sections are skipped.
pub fn mount(window: &Window, doc: &Document) -> Result<(), SiteError> {
    tolerate_missing(mount_about(window, doc))?;
    tolerate_missing(mount_service_cards(doc))?;
    tolerate_missing(mount_product_images(doc))?;
    mount_button_focus(doc)
}
