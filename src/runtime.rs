//! Tokio frame driver for hosts without a display loop of their own
//!
//! A browser calls back on every display frame; a headless host (a server rendering snapshots,
//! a scripted session, a test) can instead let a tokio interval stand in for it.

use crate::core::map::MapPane;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Display frame interval of a 60 Hz screen
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Calls [`MapPane::on_frame`] every `frame_interval` until the pane stops asking for frames.
///
/// Returns the number of frames driven. Late ticks are skipped rather than bunched up, the
/// animation is time-based so a skipped frame only lowers the frame rate.
pub async fn drive_until_idle(pane: &mut MapPane, frame_interval: Duration) -> usize {
    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0;
    while pane.wants_frame() {
        ticker.tick().await;
        pane.on_frame();
        frames += 1;
    }
    log::trace!("frame driver idle after {} frames", frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ViewerConfig;
    use crate::animation::clock::SystemClock;

    #[tokio::test]
    async fn test_idle_pane_needs_no_frames() {
        let mut pane = MapPane::default();
        assert_eq!(drive_until_idle(&mut pane, DEFAULT_FRAME_INTERVAL).await, 0);
    }

    #[tokio::test]
    async fn test_drives_a_move_to_completion() {
        let mut pane = MapPane::new(ViewerConfig::default(), Box::new(SystemClock::new()))
            .with_size(800.0, 600.0);
        let start = pane.coordinates();
        pane.move_to(17, start.lat, start.lon + 0.0005);
        let frames = drive_until_idle(&mut pane, Duration::from_millis(5)).await;
        assert!(frames > 0);
        assert!(!pane.is_animating());
        let events = pane.process_events();
        assert_eq!(events.len(), 1);
    }
}
