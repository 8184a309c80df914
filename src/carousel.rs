//! Testimonial carousel.
//!
//! Slides sit side by side in `#testimonialTrack`, which is translated one
//! slide width per tick. A copy of the first slide is appended so the last
//! move lands on something that looks like slide 0; once that transition ends
//! the track snaps back to the real slide 0 with transitions disabled.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, TransitionEvent};

use crate::config::SiteConfig;
use crate::consts::CAROUSEL_TRANSITION;
use crate::dom;
use crate::error::{SiteError, report};

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

/// Index arithmetic for a looping track with one trailing clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselCore {
    index: usize,
    slide_count: usize,
    hovered: bool,
    hidden: bool,
}

impl CarouselCore {
    /// `slide_count` excludes the clone.
    #[must_use]
    pub fn new(slide_count: usize) -> Self {
        Self { index: 0, slide_count, hovered: false, hidden: false }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Whether the clone is on screen and a snap back is due.
    #[must_use]
    pub fn on_clone(&self) -> bool {
        self.slide_count > 0 && self.index == self.slide_count
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.hovered || self.hidden
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Advance one slide. Returns the new index, or `None` when the tick is
    /// skipped (paused, empty, or still waiting for the snap back).
    pub fn tick(&mut self) -> Option<usize> {
        if self.is_paused() || self.slide_count == 0 || self.on_clone() {
            return None;
        }
        self.index += 1;
        Some(self.index)
    }

    /// A slide transition finished. Returns `true` when the track must snap
    /// back to slide 0.
    pub fn transition_ended(&mut self) -> bool {
        if !self.on_clone() {
            return false;
        }
        self.index = 0;
        true
    }
}

/// Whether a `transitionend` is the track's own slide finishing, rather than
/// one bubbling up from a slide's hover styles.
#[must_use]
pub fn is_slide_end(on_track: bool, property: &str) -> bool {
    on_track && property == "transform"
}

/// CSS transform showing slide `index`.
#[must_use]
pub fn track_transform(index: usize) -> String {
    if index == 0 { "translateX(0)".to_owned() } else { format!("translateX(-{}%)", index * 100) }
}

struct Carousel {
    track: HtmlElement,
    core: RefCell<CarouselCore>,
    interval: RefCell<Option<Interval>>,
}

impl Carousel {
    fn advance(&self) -> Result<(), SiteError> {
        let Some(index) = self.core.borrow_mut().tick() else {
            return Ok(());
        };
        dom::set_style(&self.track, "transition", CAROUSEL_TRANSITION)?;
        dom::set_style(&self.track, "transform", &track_transform(index))
    }

    fn snap_back(&self) -> Result<(), SiteError> {
        if !self.core.borrow_mut().transition_ended() {
            return Ok(());
        }
        dom::set_style(&self.track, "transition", "none")?;
        dom::set_style(&self.track, "transform", &track_transform(0))?;
        // Reading layout flushes the style change before the transition returns.
        self.track.offset_width();
        dom::set_style(&self.track, "transition", CAROUSEL_TRANSITION)
    }
}

/// Start the testimonial autoplay.
///
/// # Errors
///
/// [`SiteError::MissingElement`] when the track or its slides are absent.
pub fn mount(doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let track: HtmlElement = dom::by_id(doc, "testimonialTrack")?;
    let slides = track.children();
    let first = slides.item(0).ok_or(SiteError::MissingElement("#testimonialTrack > *"))?;
    let slide_count = slides.length() as usize;
    let viewport = dom::query(doc, ".testimonial-viewport")?;

    let clone = first.clone_node_with_deep(true)?;
    if let Some(el) = clone.dyn_ref::<Element>() {
        dom::set_class(el, "clone", true)?;
    }
    track.append_child(&clone)?;

    let carousel = Rc::new(Carousel {
        track,
        core: RefCell::new(CarouselCore::new(slide_count)),
        interval: RefCell::new(None),
    });

    let c = Rc::clone(&carousel);
    dom::listen(&carousel.track, "transitionend", move |e: Event| {
        let on_track = dom::event_element(&e).is_some_and(|t| t == *c.track);
        let property = e.dyn_ref::<TransitionEvent>().map(TransitionEvent::property_name).unwrap_or_default();
        if is_slide_end(on_track, &property) {
            report("carousel snap", c.snap_back());
        }
    })?;

    for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
        let c = Rc::clone(&carousel);
        dom::listen(&viewport, event, move |_| c.core.borrow_mut().set_hovered(hovered))?;
    }

    let c = Rc::clone(&carousel);
    let d = doc.clone();
    dom::listen(doc, "visibilitychange", move |_| c.core.borrow_mut().set_hidden(d.hidden()))?;

    let c = Rc::clone(&carousel);
    let interval = Interval::new(config.carousel_interval_ms, move || report("carousel advance", c.advance()));
    *carousel.interval.borrow_mut() = Some(interval);
    log::debug!("carousel started with {slide_count} slides");
    Ok(())
}
