//! Reveal animation as an explicit state machine.
//!
//! Every `play` hands out a [`FrameToken`]; `pause` and `reset` retire it, so
//! a frame callback that was already scheduled becomes a no-op when it fires.

use derive_more::Display;

/// Seconds a full reveal takes at speed 1.0.
pub const BASE_REVEAL_SECONDS: f64 = 3.0;
/// Largest frame delta honoured; longer gaps (background tabs) are capped.
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AnimationPhase {
    Idle,
    Running,
    Paused,
}

/// Identifies the play session a scheduled frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    phase: AnimationPhase,
    progress: f64,
    speed: f64,
    generation: u64,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Animation {
    /// Idle and fully revealed.
    pub fn new(speed: f64) -> Self {
        Self { phase: AnimationPhase::Idle, progress: 1.0, speed: sanitize_speed(speed), generation: 0 }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.phase == AnimationPhase::Running
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = sanitize_speed(speed);
    }

    /// Starts or resumes. A finished reveal restarts from zero.
    pub fn play(&mut self) -> FrameToken {
        if self.progress >= 1.0 {
            self.progress = 0.0;
        }
        self.phase = AnimationPhase::Running;
        self.generation += 1;
        FrameToken(self.generation)
    }

    pub fn pause(&mut self) {
        if self.phase == AnimationPhase::Running {
            self.phase = AnimationPhase::Paused;
        }
        self.generation += 1;
    }

    /// Back to an empty reveal, waiting for `play`.
    pub fn reset(&mut self) {
        self.phase = AnimationPhase::Idle;
        self.progress = 0.0;
        self.generation += 1;
    }

    /// Advances by `dt_ms`. Returns `true` while another frame is wanted;
    /// stale tokens and non-running phases change nothing.
    pub fn tick(&mut self, token: FrameToken, dt_ms: f64) -> bool {
        if token.0 != self.generation || self.phase != AnimationPhase::Running {
            return false;
        }
        let dt = dt_ms.clamp(0.0, MAX_FRAME_DELTA_MS) / 1000.0;
        self.progress = (self.progress + dt * self.speed / BASE_REVEAL_SECONDS).min(1.0);
        if self.progress >= 1.0 {
            self.phase = AnimationPhase::Idle;
            self.generation += 1;
            return false;
        }
        true
    }

    /// Leading samples currently revealed: `floor(progress * count)`.
    pub fn visible_count(&self, count: usize) -> usize {
        ((self.progress * count as f64).floor() as usize).min(count)
    }
}

fn sanitize_speed(speed: f64) -> f64 {
    if speed.is_finite() && speed > 0.0 { speed } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_animation_shows_everything() {
        let animation = Animation::default();
        assert_eq!(animation.visible_count(40), 40);
    }

    #[test]
    fn play_restarts_a_finished_reveal() {
        let mut animation = Animation::new(1.0);
        let token = animation.play();
        assert_eq!(animation.progress(), 0.0);
        assert!(animation.tick(token, 50.0));
        assert!(animation.progress() > 0.0);
    }

    #[test]
    fn reaching_the_end_stops_running() {
        let mut animation = Animation::new(10.0);
        let token = animation.play();
        let mut frames = 0;
        while animation.tick(token, 16.0) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(animation.phase(), AnimationPhase::Idle);
        assert_eq!(animation.progress(), 1.0);
        assert!(!animation.tick(token, 16.0));
    }

    #[test]
    fn pause_invalidates_scheduled_frames() {
        let mut animation = Animation::new(1.0);
        let token = animation.play();
        animation.tick(token, 30.0);
        let before = animation.progress();
        animation.pause();
        animation.pause();
        assert!(!animation.tick(token, 30.0));
        assert_eq!(animation.progress(), before);

        let resumed = animation.play();
        assert_ne!(resumed, token);
        assert_eq!(animation.progress(), before);
        assert!(animation.tick(resumed, 30.0));
    }

    #[test]
    fn reset_clears_progress_and_cancels() {
        let mut animation = Animation::new(1.0);
        let token = animation.play();
        animation.tick(token, 60.0);
        animation.reset();
        assert_eq!(animation.visible_count(10), 0);
        assert!(!animation.tick(token, 60.0));
        assert_eq!(animation.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn visible_count_floors() {
        let mut animation = Animation::new(1.0);
        let token = animation.play();
        // 1.5s at speed 1 over a 3s reveal
        for _ in 0..15 {
            animation.tick(token, 100.0);
        }
        assert_eq!(animation.visible_count(9), 4);
    }
}
