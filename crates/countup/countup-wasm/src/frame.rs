//! `requestAnimationFrame` scheduler with a timer polyfill.
//!
//! The frame API is detected once per page (native, vendor prefixed, or a
//! ~16ms `setTimeout` fallback) and handed to each scheduler, so nothing on
//! `window` is patched.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use countup_core::{FallbackClock, FrameHandle, FrameScheduler, FrameSource};
use js_sys::{Function, Reflect};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Closure invoked with the frame timestamp. Filled in after the animator
/// it drives has been created.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

const VENDORS: [&str; 4] = ["webkit", "moz", "ms", "o"];

/// Request/cancel functions selected for this page.
#[derive(Clone, Debug)]
pub struct FrameApi {
    pub source: FrameSource,
    request: Option<Function>,
    cancel: Option<Function>,
}

thread_local! {
    static FRAME_API: OnceCell<FrameApi> = const { OnceCell::new() };
}

/// Detect the frame API on first use; later calls reuse the result.
pub fn frame_api(window: &Window) -> FrameApi {
    FRAME_API.with(|cell| cell.get_or_init(|| detect(window)).clone())
}

fn lookup(window: &Window, name: &str) -> Option<Function> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn detect(window: &Window) -> FrameApi {
    let mut request = lookup(window, "requestAnimationFrame");
    let mut cancel = lookup(window, "cancelAnimationFrame");
    for vendor in VENDORS {
        if request.is_some() {
            break;
        }
        request = lookup(window, &format!("{vendor}RequestAnimationFrame"));
        cancel = lookup(window, &format!("{vendor}CancelAnimationFrame"))
            .or_else(|| lookup(window, &format!("{vendor}CancelRequestAnimationFrame")));
    }

    match request {
        Some(request) => {
            debug!("[CountUp] using native animation frames");
            FrameApi {
                source: FrameSource::AnimationFrame,
                request: Some(request),
                cancel,
            }
        }
        None => {
            debug!("[CountUp] animation frames unavailable, using timer fallback");
            FrameApi {
                source: FrameSource::Timer,
                request: None,
                cancel: None,
            }
        }
    }
}

/// Browser frame scheduler for one animator.
pub struct RafScheduler {
    window: Window,
    api: FrameApi,
    callback: FrameCallback,
    clock: FallbackClock,
}

impl RafScheduler {
    pub fn new(window: Window, api: FrameApi, callback: FrameCallback) -> Self {
        Self {
            window,
            api,
            callback,
            clock: FallbackClock::new(),
        }
    }

    fn request_with(&mut self, f: &Function) -> Result<i32, JsValue> {
        match (self.api.source, &self.api.request) {
            (FrameSource::AnimationFrame, Some(request)) => {
                let id = request.call1(&self.window, f)?;
                Ok(id.as_f64().unwrap_or_default() as i32)
            }
            _ => {
                let (delay, at) = self.clock.next_frame(js_sys::Date::now());
                self.window
                    .set_timeout_with_callback_and_timeout_and_arguments_1(
                        f,
                        delay as i32,
                        &JsValue::from_f64(at),
                    )
            }
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let callback = Rc::clone(&self.callback);
        let slot = callback.borrow();
        let Some(closure) = slot.as_ref() else {
            warn!("[CountUp] frame requested before the callback was bound");
            return FrameHandle(0);
        };
        match self.request_with(closure.as_ref().unchecked_ref()) {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                warn!("[CountUp] frame request failed: {e:?}");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        match &self.api.cancel {
            Some(cancel) => {
                if let Err(e) = cancel.call1(&self.window, &JsValue::from(handle.0)) {
                    warn!("[CountUp] frame cancel failed: {e:?}");
                }
            }
            // the fallback hands out timer ids
            None => self.window.clear_timeout_with_handle(handle.0),
        }
    }
}
