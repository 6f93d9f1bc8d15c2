//! Frame scheduling abstraction.
//!
//! An animator asks its scheduler for exactly one pending frame at a time.
//! The host honours a request by calling [`crate::CountUp::count`] with the
//! frame timestamp (milliseconds) unless the request was cancelled first.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Opaque id of a pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub i32);

/// "Request next frame" / "cancel pending frame" pair.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    /// Best-effort; a frame that fires anyway is ignored by the animator.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Which host mechanism delivers frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameSource {
    /// Native per-repaint callbacks.
    AnimationFrame,
    /// Timer polyfill at roughly 60fps.
    Timer,
}

/// Target spacing of polyfilled frames.
pub const FALLBACK_FRAME_MS: f64 = 16.0;

/// Timing math of the timer polyfill.
///
/// Each request is delayed so consecutive frames land about 16ms apart; the
/// frame timestamp handed to the callback is the scheduled firing time.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackClock {
    last_time: f64,
}

impl FallbackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(delay_ms, frame_timestamp)` for a request made at `now`.
    pub fn next_frame(&mut self, now: f64) -> (f64, f64) {
        let delay = (FALLBACK_FRAME_MS - (now - self.last_time)).max(0.0);
        let at = now + delay;
        self.last_time = at;
        (delay, at)
    }
}

#[derive(Debug, Default)]
struct ManualQueue {
    next_id: i32,
    pending: Option<FrameHandle>,
    requests: usize,
    cancels: usize,
}

/// Deterministic scheduler for tests and native frame loops.
///
/// Clones share one queue, so the host keeps a clone to see whether the
/// animator wants another frame.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending request, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.queue.borrow().pending
    }

    /// Consume the pending request. Returns false when nothing was queued.
    pub fn take_pending(&self) -> bool {
        self.queue.borrow_mut().pending.take().is_some()
    }

    pub fn request_count(&self) -> usize {
        self.queue.borrow().requests
    }

    pub fn cancel_count(&self) -> usize {
        self.queue.borrow().cancels
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut q = self.queue.borrow_mut();
        q.next_id += 1;
        q.requests += 1;
        let handle = FrameHandle(q.next_id);
        q.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut q = self.queue.borrow_mut();
        q.cancels += 1;
        if q.pending == Some(handle) {
            q.pending = None;
        }
    }
}
