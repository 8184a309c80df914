use super::*;

#[test]
fn reduced_motion_wins_and_drops_autoplay() {
    assert_eq!(autoplay_plan(true, false), AutoplayPlan::StayPaused { remove_autoplay: true });
    assert_eq!(autoplay_plan(true, true), AutoplayPlan::StayPaused { remove_autoplay: true });
}

#[test]
fn small_device_pauses_but_keeps_autoplay() {
    assert_eq!(autoplay_plan(false, true), AutoplayPlan::StayPaused { remove_autoplay: false });
}

#[test]
fn desktop_attempts_playback() {
    assert_eq!(autoplay_plan(false, false), AutoplayPlan::Attempt);
}

#[test]
fn scrolling_away_pauses_a_playing_video() {
    assert_eq!(scroll_action(1200.0, 800.0, false), ScrollAction::Pause);
}

#[test]
fn scrolling_back_resumes_a_paused_video() {
    assert_eq!(scroll_action(200.0, 800.0, true), ScrollAction::Resume);
}

#[test]
fn exactly_one_viewport_down_still_counts_as_near() {
    assert_eq!(scroll_action(800.0, 800.0, true), ScrollAction::Resume);
    assert_eq!(scroll_action(800.0, 800.0, false), ScrollAction::Nothing);
}

#[test]
fn steady_states_do_nothing() {
    assert_eq!(scroll_action(1200.0, 800.0, true), ScrollAction::Nothing);
    assert_eq!(scroll_action(0.0, 800.0, false), ScrollAction::Nothing);
}

// =============================================================
// Frame throttle
// =============================================================

#[test]
fn throttle_skips_while_a_frame_is_queued() {
    let throttle = FrameThrottle::default();
    let mut scheduled = 0;
    for _ in 0..3 {
        throttle.run(|| -> Result<(), ()> {
            scheduled += 1;
            Ok(())
        })
        .unwrap();
    }
    assert_eq!(scheduled, 1);
    assert!(throttle.is_pending());
    throttle.release();
    assert!(!throttle.is_pending());
}

#[test]
fn failed_schedule_frees_the_throttle() {
    let throttle = FrameThrottle::default();
    assert_eq!(throttle.run(|| Err("no frame")), Err("no frame"));
    assert!(!throttle.is_pending());

    let mut scheduled = false;
    throttle.run(|| -> Result<(), ()> {
        scheduled = true;
        Ok(())
    })
    .unwrap();
    assert!(scheduled);
}
