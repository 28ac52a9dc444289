//! Pacing of the carving animation.
//!
//! The generator itself has no notion of time. This clock decides how many carving steps the app
//! loop performs on each pass, so the maze appears at a watchable speed whatever the input rate.

use std::time::{Duration, Instant};

/// Frame timer for the carving animation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AnimationClock {
    /// Minimum time between two animation frames.
    frame_delay: Duration,
    /// Carving steps performed on each frame.
    steps_per_frame: u16,
    /// Time of the last animation frame.
    last_update_time: Instant,
}

impl AnimationClock {
    /// Creates a clock whose first frame is due after one frame delay.
    pub(crate) fn new(frame_delay: Duration, steps_per_frame: u16) -> Self {
        Self {
            frame_delay,
            steps_per_frame: steps_per_frame.max(1),
            last_update_time: Instant::now(),
        }
    }

    /// Restarts the frame timer, used whenever a new maze starts.
    pub(crate) const fn reset(&mut self, now: Instant) {
        self.last_update_time = now;
    }

    /// Returns how many carving steps are due at `now`.
    ///
    /// This is zero until the frame delay has elapsed since the previous frame, after which the
    /// frame is consumed and the configured number of steps is returned.
    pub(crate) fn due_steps(&mut self, now: Instant) -> u16 {
        if now.saturating_duration_since(self.last_update_time) < self.frame_delay {
            return 0;
        }

        self.last_update_time = now;
        self.steps_per_frame
    }

    /// Returns how long input polling may block before the next frame is due.
    pub(crate) fn poll_timeout(&self, now: Instant) -> Duration {
        self.frame_delay
            .saturating_sub(now.saturating_duration_since(self.last_update_time))
    }
}
