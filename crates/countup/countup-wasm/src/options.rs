//! Script options object -> [`OptionOverrides`].
//!
//! Fields are read one at a time. A value of the wrong type is logged and
//! left at its default; construction never fails over options.

use std::rc::Rc;

use countup_core::OptionOverrides;
use js_sys::{Array, Function, Reflect};
use serde::de::DeserializeOwned;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn js_field(obj: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined())
}

fn js_function(obj: &JsValue, key: &str) -> Option<Function> {
    js_field(obj, key)?.dyn_into::<Function>().ok()
}

fn field<T: DeserializeOwned>(obj: &JsValue, key: &str) -> Option<T> {
    let value = js_field(obj, key)?;
    match swb::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[CountUp] option {key} ignored: {e}");
            None
        }
    }
}

/// Read plain fields with serde and pick up `easingFn` / `formattingFn`.
pub fn parse_overrides(options: &JsValue) -> OptionOverrides {
    if !options.is_object() {
        return OptionOverrides::default();
    }
    let mut overrides = OptionOverrides {
        use_easing: field(options, "useEasing"),
        use_grouping: field(options, "useGrouping"),
        separator: field(options, "separator"),
        decimal: field(options, "decimal"),
        easing: field(options, "easing"),
        prefix: field(options, "prefix"),
        suffix: field(options, "suffix"),
        merge_policy: field(options, "mergePolicy").unwrap_or_default(),
        ..Default::default()
    };

    if let Some(f) = js_function(options, "easingFn") {
        overrides.easing_fn = Some(Rc::new(move |t: f64, b: f64, c: f64, d: f64| {
            let args = Array::of4(&t.into(), &b.into(), &c.into(), &d.into());
            f.apply(&JsValue::NULL, &args)
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(f64::NAN)
        }));
    }
    if let Some(f) = js_function(options, "formattingFn") {
        overrides.formatter_fn = Some(Rc::new(move |value: f64| {
            f.call1(&JsValue::NULL, &JsValue::from_f64(value))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default()
        }));
    }
    overrides
}
