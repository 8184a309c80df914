//! Background video autoplay.
//!
//! Autoplay is attempted only when the visitor has not asked for reduced
//! motion and the screen is not phone-sized. A blocked `play()` is logged and
//! the poster stays up. Once playing, the video pauses while scrolled more
//! than a viewport away and resumes on the way back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlVideoElement, Window};

use crate::config::SiteConfig;
use crate::consts::{VIDEO_PLAY_FALLBACK_MS, VIDEO_READY_STATE};
use crate::dom;
use crate::error::{SiteError, report};

#[cfg(test)]
#[path = "video_test.rs"]
mod video_test;

/// What to do with the video at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayPlan {
    /// Keep the poster. Reduced motion also drops the `autoplay` attribute.
    StayPaused { remove_autoplay: bool },
    Attempt,
}

#[must_use]
pub fn autoplay_plan(reduced_motion: bool, small_device: bool) -> AutoplayPlan {
    if reduced_motion {
        AutoplayPlan::StayPaused { remove_autoplay: true }
    } else if small_device {
        AutoplayPlan::StayPaused { remove_autoplay: false }
    } else {
        AutoplayPlan::Attempt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    Pause,
    Resume,
    Nothing,
}

/// React to the page scrolling to `scroll_y` with a `viewport_height` window.
#[must_use]
pub fn scroll_action(scroll_y: f64, viewport_height: f64, paused: bool) -> ScrollAction {
    let away = scroll_y > viewport_height;
    match (away, paused) {
        (true, false) => ScrollAction::Pause,
        (false, true) => ScrollAction::Resume,
        _ => ScrollAction::Nothing,
    }
}

/// At most one scroll check per animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: Cell<bool>,
}

impl FrameThrottle {
    /// Run `schedule` unless a frame is already queued. A failed schedule
    /// leaves the throttle free so later scrolls try again.
    ///
    /// # Errors
    ///
    /// Whatever `schedule` returns.
    pub fn run<E>(&self, schedule: impl FnOnce() -> Result<(), E>) -> Result<(), E> {
        if self.pending.replace(true) {
            return Ok(());
        }
        schedule().inspect_err(|_| self.pending.set(false))
    }

    /// The queued frame ran.
    pub fn release(&self) {
        self.pending.set(false);
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

struct BackgroundVideo {
    window: Window,
    video: HtmlVideoElement,
    throttle: FrameThrottle,
    fallback: RefCell<Option<Timeout>>,
}

impl BackgroundVideo {
    fn try_play(&self) {
        let video = self.video.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match play(&video).await {
                Ok(()) => log::info!("background video playing"),
                Err(err) => log::warn!("autoplay blocked: {err}"),
            }
        });
    }

    fn play_when_ready(self: &Rc<Self>) -> Result<(), SiteError> {
        if self.video.ready_state() >= VIDEO_READY_STATE {
            self.try_play();
            return Ok(());
        }
        let v = Rc::clone(self);
        dom::listen_once(&self.video, "loadedmetadata", move |_| v.try_play())?;
        let v = Rc::clone(self);
        let fallback = Timeout::new(VIDEO_PLAY_FALLBACK_MS, move || {
            if v.video.paused() {
                v.try_play();
            }
        });
        *self.fallback.borrow_mut() = Some(fallback);
        Ok(())
    }

    fn on_scroll(self: &Rc<Self>) -> Result<(), SiteError> {
        let v = Rc::clone(self);
        self.throttle.run(|| dom::next_frame(&self.window, move || {
            let scroll_y = v.window.scroll_y().unwrap_or(0.0);
            match scroll_action(scroll_y, dom::inner_height(&v.window), v.video.paused()) {
                ScrollAction::Pause => match v.video.pause() {
                    Ok(()) => log::debug!("background video paused while scrolled away"),
                    Err(err) => log::warn!("pause failed: {}", SiteError::from(err)),
                },
                ScrollAction::Resume => v.try_play(),
                ScrollAction::Nothing => {}
            }
            v.throttle.release();
        }))
    }
}

async fn play(video: &HtmlVideoElement) -> Result<(), SiteError> {
    JsFuture::from(video.play()?).await?;
    Ok(())
}

/// Start `#bgVideo` if the visitor's settings allow it.
///
/// # Errors
///
/// [`SiteError::MissingElement`] when the page has no background video.
pub fn mount(window: &Window, doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let Ok(video) = dom::by_id::<HtmlVideoElement>(doc, "bgVideo") else {
        log::warn!("bgVideo element not found");
        return Err(SiteError::MissingElement("#bgVideo"));
    };

    let reduced = dom::prefers_reduced_motion(window);
    let small = dom::media_matches(window, &config.small_device_query());
    match autoplay_plan(reduced, small) {
        AutoplayPlan::StayPaused { remove_autoplay } => {
            video.pause()?;
            if remove_autoplay {
                video.remove_attribute("autoplay")?;
                log::info!("reduced motion requested, background video stays paused");
            } else {
                log::info!("small device, background video paused to save bandwidth");
            }
            return Ok(());
        }
        AutoplayPlan::Attempt => {}
    }

    let bg = Rc::new(BackgroundVideo {
        window: window.clone(),
        video,
        throttle: FrameThrottle::default(),
        fallback: RefCell::new(None),
    });

    let b = Rc::clone(&bg);
    dom::on_ready(doc, move || report("background video", b.play_when_ready()))?;

    dom::listen(&bg.video, "error", |e| log::error!("background video error: {:?}", e.type_()))?;

    let b = Rc::clone(&bg);
    dom::listen(window, "scroll", move |_| report("background video scroll", b.on_scroll()))
}
