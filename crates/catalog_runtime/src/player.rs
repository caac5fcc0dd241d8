//! Stand-in playback for content without a video URL.

/// Final position of a simulated playback, in percent.
pub const SIMULATED_DURATION: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Timer-driven progress simulator.
///
/// The host calls [`PlaybackSimulator::tick`] once per second while mounted; each tick during
/// playback advances one percent and returns the new progress for the watch history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSimulator {
    status: PlaybackStatus,
    position: u32,
}

impl PlaybackSimulator {
    /// Creates an idle simulator resuming at `progress` percent.
    pub fn resume_from(progress: f64) -> Self {
        let position = if progress.is_finite() {
            progress.clamp(0.0, f64::from(SIMULATED_DURATION)) as u32
        } else {
            0
        };
        Self {
            status: PlaybackStatus::Idle,
            position,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Current position in percent.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Starts or resumes playback. A finished playback restarts from zero.
    pub fn play(&mut self) {
        if self.status == PlaybackStatus::Finished || self.position >= SIMULATED_DURATION {
            self.position = 0;
        }
        self.status = PlaybackStatus::Playing;
    }

    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Play/pause toggle bound to the player controls.
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Moves to `position` percent, clamped to the simulated duration.
    pub fn seek(&mut self, position: u32) {
        self.position = position.min(SIMULATED_DURATION);
        if self.position < SIMULATED_DURATION && self.status == PlaybackStatus::Finished {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Advances one step while playing and returns the new progress percentage.
    ///
    /// Reaching the end reports `100` once and stops playback.
    pub fn tick(&mut self) -> Option<f64> {
        if !self.is_playing() {
            return None;
        }
        self.position = (self.position + 1).min(SIMULATED_DURATION);
        if self.position == SIMULATED_DURATION {
            self.status = PlaybackStatus::Finished;
        }
        Some(f64::from(self.position))
    }
}

/// Formats seconds as `m:ss`, or `h:mm:ss` past an hour.
pub fn format_time(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn idle_and_paused_ticks_do_nothing() {
        let mut player = PlaybackSimulator::default();
        assert_eq!(player.tick(), None);
        player.play();
        assert_eq!(player.tick(), Some(1.0));
        player.pause();
        assert_eq!(player.tick(), None);
        assert_eq!(player.position(), 1);
    }

    #[test]
    fn playback_stops_at_end_after_reporting_full_progress() {
        let mut player = PlaybackSimulator::resume_from(98.0);
        player.play();
        assert_eq!(player.tick(), Some(99.0));
        assert_eq!(player.tick(), Some(100.0));
        assert_eq!(player.status(), PlaybackStatus::Finished);
        assert_eq!(player.tick(), None);
    }

    #[test]
    fn replay_after_finish_restarts() {
        let mut player = PlaybackSimulator::resume_from(100.0);
        player.toggle();
        assert!(player.is_playing());
        assert_eq!(player.tick(), Some(1.0));
    }

    #[test]
    fn resume_clamps_stored_progress() {
        assert_eq!(PlaybackSimulator::resume_from(140.0).position(), 100);
        assert_eq!(PlaybackSimulator::resume_from(-3.0).position(), 0);
        assert_eq!(PlaybackSimulator::resume_from(f64::NAN).position(), 0);
        assert_eq!(PlaybackSimulator::resume_from(42.7).position(), 42);
    }

    #[test]
    fn seek_out_of_finished_pauses() {
        let mut player = PlaybackSimulator::resume_from(99.0);
        player.play();
        player.tick();
        player.seek(10);
        assert_eq!(player.status(), PlaybackStatus::Paused);
        assert_eq!(player.position(), 10);
    }

    #[test]
    fn seek_while_playing_continues_from_new_position() {
        let mut player = PlaybackSimulator::default();
        player.play();
        player.seek(40);
        assert!(player.is_playing());
        assert_eq!(player.tick(), Some(41.0));

        player.seek(250);
        assert_eq!(player.position(), SIMULATED_DURATION);
        assert_eq!(player.tick(), Some(100.0));
        assert_eq!(player.status(), PlaybackStatus::Finished);
    }

    #[test]
    fn formats_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(75), "1:15");
        assert_eq!(format_time(3725), "1:02:05");
    }
}
