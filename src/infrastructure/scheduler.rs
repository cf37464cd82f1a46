//! `requestAnimationFrame` loop driving the reveal animation.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};

use crate::domain::logging::LogComponent;
use crate::log_debug;

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Holds at most one pending frame. Dropping the handle cancels it, so
/// `stop` and a new `start` both retire whatever was scheduled before.
#[derive(Default)]
pub struct FrameLoop {
    pending: FrameSlot,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `on_frame(dt_ms)` every frame until it returns `false`.
    /// The first call sees a zero delta.
    pub fn start<F>(&self, on_frame: F)
    where
        F: FnMut(f64) -> bool + 'static,
    {
        self.stop();
        log_debug!(LogComponent::Infrastructure("FrameLoop"), "Frame loop started");
        schedule(self.pending.clone(), on_frame, None);
    }

    pub fn stop(&self) {
        if self.pending.borrow_mut().take().is_some() {
            log_debug!(LogComponent::Infrastructure("FrameLoop"), "Pending frame cancelled");
        }
    }
}

fn schedule<F>(slot: FrameSlot, mut on_frame: F, last_timestamp: Option<f64>)
where
    F: FnMut(f64) -> bool + 'static,
{
    let next_slot = slot.clone();
    let frame = request_animation_frame(move |timestamp| {
        let dt_ms = last_timestamp.map_or(0.0, |prev| (timestamp - prev).max(0.0));
        if on_frame(dt_ms) {
            schedule(next_slot, on_frame, Some(timestamp));
        } else {
            next_slot.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(frame);
}
