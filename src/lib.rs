//! Interactive behaviour for the Stackly marketing site.
//!
//! This crate is compiled to WebAssembly and loaded by the site's static
//! pages. The markup is already rendered; [`start`] finds each widget's
//! elements and attaches listeners. Widgets are independent: a page that lacks
//! one simply skips it, and a failure in one never stops the others.
//!
//! Each widget keeps its state machine in a DOM-free core so the arithmetic
//! and bookkeeping can be tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`nav`] | Mobile overlay, mobile accordion, desktop dropdowns |
//! | [`panel`] | Slide-in sample request panel with focus trap |
//! | [`hero`] | Hero parallax and scroll-to-projects |
//! | [`video`] | Background video autoplay |
//! | [`reveal`] | Scroll/load reveal animations |
//! | [`carousel`] | Testimonial carousel |
//! | [`accordion`] | FAQ accordion |
//! | [`contact`] | Contact form, JSON POST and mailto fallback |
//! | [`config`] | Page-level configuration |
//! | [`dom`] | `web-sys` helpers |
//! | [`error`] | Crate error type |
//! | [`consts`] | Timings, sizes, and default strings |

pub mod accordion;
pub mod carousel;
pub mod config;
pub mod consts;
pub mod contact;
pub mod dom;
pub mod error;
pub mod hero;
pub mod nav;
pub mod panel;
pub mod reveal;
pub mod video;

use wasm_bindgen::prelude::*;

use crate::config::SiteConfig;
use crate::error::SiteError;

fn init_logging() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already set: {err}")));
    }
}

fn mount_widget(name: &str, result: Result<(), SiteError>) {
    match result {
        Ok(()) => log::debug!("{name} mounted"),
        Err(err) if err.is_ignorable() => log::debug!("{name} skipped: {err}"),
        Err(err) => log::warn!("{name} failed to mount: {err}"),
    }
}

/// Entry point: wire every widget present on the page.
#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    let (window, doc) = match dom::window().and_then(|w| dom::document().map(|d| (w, d))) {
        Ok(pair) => pair,
        Err(err) => {
            log::warn!("no browser document: {err}");
            return;
        }
    };
    let config = SiteConfig::load(&doc);

    mount_widget("nav", nav::mount(&window, &doc, &config));
    mount_widget("video", video::mount(&window, &doc, &config));
    mount_widget("reveal", reveal::mount(&window, &doc));
    mount_widget("carousel", carousel::mount(&doc, &config));
    mount_widget("contact", contact::mount(&window, &doc, &config));
    mount_widget("hero", hero::mount(&window, &doc));
    mount_widget("panel", panel::mount(&doc));
    mount_widget("faq", accordion::mount(&window, &doc, &config));
}
