//! wasm-bindgen interface for the count-up value animator.
//!
//! ```javascript
//! const counter = new CountUp("total", 0, 1234.5, 1, 2.5, { prefix: "$" });
//! counter.start(() => console.log("done"));
//! counter.update(2000);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use countup_core::{AnimationSpec, CountUpOptions, FrameStep, OptionOverrides};
use js_sys::Function;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

pub mod console;
pub mod demo;
pub mod dom;
pub mod frame;
pub mod options;

use dom::{DomDocument, DomTarget};
use frame::{frame_api, FrameCallback, RafScheduler};

type Animator = countup_core::CountUp<DomDocument>;

/// One animated number on the page.
#[wasm_bindgen]
pub struct CountUp {
    inner: Rc<RefCell<Animator>>,
    on_complete: Rc<RefCell<Option<Function>>>,
    _frame: FrameCallback,
}

fn frame_closure(
    inner: Weak<RefCell<Animator>>,
    on_complete: Rc<RefCell<Option<Function>>>,
) -> Closure<dyn FnMut(f64)> {
    Closure::new(move |timestamp: f64| {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let step = inner.borrow_mut().count(timestamp);
        // invoked after the borrow ends so the callback may drive the animator
        if step == FrameStep::Completed {
            let callback = on_complete.borrow_mut().take();
            if let Some(f) = callback {
                if let Err(e) = f.call0(&JsValue::NULL) {
                    log::error!("[CountUp] completion callback threw: {e:?}");
                }
            }
        }
    })
}

impl CountUp {
    /// Build from already-converted parts.
    pub fn from_parts(
        spec: AnimationSpec<DomTarget>,
        overrides: &OptionOverrides,
    ) -> Result<CountUp, JsError> {
        console_error_panic_hook::set_once();
        console::init();

        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler::new(window.clone(), frame_api(&window), Rc::clone(&frame));
        let animator = Animator::new(
            spec,
            CountUpOptions::from_overrides(overrides),
            DomDocument::new(window.document()),
            scheduler,
        );

        let inner = Rc::new(RefCell::new(animator));
        let on_complete = Rc::new(RefCell::new(None));
        *frame.borrow_mut() = Some(frame_closure(
            Rc::downgrade(&inner),
            Rc::clone(&on_complete),
        ));

        Ok(CountUp {
            inner,
            on_complete,
            _frame: frame,
        })
    }
}

#[wasm_bindgen]
impl CountUp {
    /// `target` is an element or an element id; `duration` is in seconds.
    /// `options` is an object or undefined/null for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        target: JsValue,
        start_val: JsValue,
        end_val: JsValue,
        decimals: JsValue,
        duration: JsValue,
        options: JsValue,
    ) -> Result<CountUp, JsError> {
        let overrides = options::parse_overrides(&options);
        let spec = AnimationSpec {
            target: dom::target_ref(&target),
            start_val: dom::number_input(&start_val),
            end_val: dom::number_input(&end_val),
            decimals: dom::decimals_from(&decimals),
            duration: dom::number_input(&duration),
        };
        Self::from_parts(spec, &overrides)
    }

    /// Resolve the target and validate the numbers. Failures are logged.
    pub fn initialize(&self) -> bool {
        self.inner.borrow_mut().initialize().is_ok()
    }

    /// Start counting; `callback` runs once when the duration elapses.
    pub fn start(&self, callback: Option<Function>) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.initialize().is_err() {
            return false;
        }
        *self.on_complete.borrow_mut() = callback;
        inner.start().is_ok()
    }

    /// Toggle pause. Returns true when paused afterwards.
    #[wasm_bindgen(js_name = pauseResume)]
    pub fn pause_resume(&self) -> bool {
        self.inner.borrow_mut().pause_resume();
        self.inner.borrow().is_paused()
    }

    pub fn reset(&self) -> bool {
        self.inner.borrow_mut().reset().is_ok()
    }

    /// Animate from the current value to `new_end_val`.
    pub fn update(&self, new_end_val: JsValue) -> bool {
        self.inner
            .borrow_mut()
            .update(dom::number_input(&new_end_val))
            .is_ok()
    }

    #[wasm_bindgen(js_name = printValue)]
    pub fn print_value(&self, value: f64) {
        self.inner.borrow_mut().print_value(value);
    }

    #[wasm_bindgen(getter, js_name = frameVal)]
    pub fn frame_val(&self) -> f64 {
        self.inner.borrow().frame_value()
    }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool {
        self.inner.borrow().is_paused()
    }

    #[wasm_bindgen(getter, js_name = countDown)]
    pub fn count_down(&self) -> bool {
        self.inner.borrow().is_count_down()
    }

    #[wasm_bindgen(getter)]
    pub fn initialized(&self) -> bool {
        self.inner.borrow().is_initialized()
    }

    /// Run state snapshot as a plain object.
    pub fn state(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.inner.borrow().snapshot())
            .map_err(|e| JsError::new(&format!("state error: {e}")))
    }

    pub fn version(&self) -> String {
        version()
    }
}

impl Drop for CountUp {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.cancel_frame();
        }
    }
}

/// Library version.
#[wasm_bindgen]
pub fn version() -> String {
    countup_core::version().to_string()
}
