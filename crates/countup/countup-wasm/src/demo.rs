//! Demo page wiring: four counters switched between yearly figures.
//!
//! Markup: `<span id="firstNr" rel="3">` style counters and radio inputs
//! named `switch` whose values are years.

use std::cell::RefCell;
use std::collections::HashMap;

use countup_core::{AnimationSpec, EasingKind, NumberInput, OptionOverrides, TargetRef};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement};

use crate::CountUp;

/// Counter element ids and their decimal places.
const COUNTERS: [(&str, i32); 4] = [
    ("firstNr", 1),
    ("secondNr", 1),
    ("thirdNr", 0),
    ("fourthNr", 0),
];

const DURATION_S: f64 = 2.0;

thread_local! {
    static ACTIVE: RefCell<HashMap<&'static str, CountUp>> = RefCell::new(HashMap::new());
}

/// Figures shown for a year, in `COUNTERS` order.
pub fn year_values(year: &str) -> Option<[f64; 4]> {
    match year {
        "2015" => Some([3.0, 2.0, 3.0, 71.0]),
        "2016" => Some([4.0, 2.0, 3.0, 85.0]),
        "2017" => Some([3.0, 4.0, 3.0, 86.0]),
        _ => None,
    }
}

/// A missing `rel` is undefined rather than null, so the counter stays
/// uninitialized instead of animating from 0.
fn rel_value(attr: Option<String>) -> NumberInput {
    attr.map_or(NumberInput::Undefined, NumberInput::from)
}

fn demo_options() -> OptionOverrides {
    OptionOverrides {
        use_easing: Some(true),
        easing: Some(EasingKind::OutQuint),
        use_grouping: Some(true),
        separator: Some(".".into()),
        decimal: Some(".".into()),
        prefix: Some(String::new()),
        suffix: Some(String::new()),
        ..Default::default()
    }
}

fn switch_year(document: &Document, year: &str) -> Result<(), JsError> {
    let Some(values) = year_values(year) else {
        log::warn!("[CountUp] no figures for year {year}");
        return Ok(());
    };
    let overrides = demo_options();

    for ((id, decimals), value) in COUNTERS.into_iter().zip(values) {
        let Some(el) = document.get_element_by_id(id) else {
            continue;
        };
        let current = rel_value(el.get_attribute("rel"));
        let spec = AnimationSpec::new(TargetRef::Id(id.to_string()), current, 0)
            .with_decimals(decimals)
            .with_duration(DURATION_S);
        let counter = CountUp::from_parts(spec, &overrides)?;

        el.set_attribute("rel", &value.to_string())
            .map_err(|e| JsError::new(&format!("rel update failed: {e:?}")))?;
        counter.update(JsValue::from_f64(value));

        // replacing the previous counter cancels its pending frame
        ACTIVE.with(|active| active.borrow_mut().insert(id, counter));
    }
    Ok(())
}

/// Bind the year radio buttons to the four counters.
#[wasm_bindgen(js_name = initYearSwitch)]
pub fn init_year_switch() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let radios = document.query_selector_all("input[type=radio][name=switch]")?;
    for i in 0..radios.length() {
        let Some(radio) = radios.item(i) else {
            continue;
        };
        let doc = document.clone();
        let closure = Closure::wrap(Box::new(move |e: Event| {
            let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            if let Err(err) = switch_year(&doc, &input.value()) {
                log::error!("[CountUp] year switch failed: {:?}", JsValue::from(err));
            }
        }) as Box<dyn FnMut(_)>);

        radio.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}
