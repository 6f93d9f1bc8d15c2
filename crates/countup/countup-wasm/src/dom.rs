//! DOM display targets and document lookup.

use countup_core::{DisplayTarget, NumberInput, TargetKind, TargetRef, TargetResolver};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

/// An element the animator writes into.
#[derive(Clone, Debug)]
pub struct DomTarget {
    el: Element,
    kind: TargetKind,
}

impl DomTarget {
    pub fn new(el: Element) -> Self {
        let kind = TargetKind::from_tag_name(&el.tag_name());
        Self { el, kind }
    }
}

impl DisplayTarget for DomTarget {
    fn kind(&self) -> TargetKind {
        self.kind
    }

    fn set_value(&mut self, text: &str) {
        if let Some(input) = self.el.dyn_ref::<HtmlInputElement>() {
            input.set_value(text);
        } else {
            let _ = js_sys::Reflect::set(&self.el, &JsValue::from_str("value"), &text.into());
        }
    }

    fn set_text_content(&mut self, text: &str) {
        self.el.set_text_content(Some(text));
    }

    fn set_inner_html(&mut self, text: &str) {
        self.el.set_inner_html(text);
    }
}

/// `getElementById` lookup.
#[derive(Clone, Debug)]
pub struct DomDocument {
    document: Option<Document>,
}

impl DomDocument {
    pub fn new(document: Option<Document>) -> Self {
        Self { document }
    }
}

impl TargetResolver for DomDocument {
    type Target = DomTarget;

    fn resolve(&mut self, id: &str) -> Option<DomTarget> {
        self.document
            .as_ref()?
            .get_element_by_id(id)
            .map(DomTarget::new)
    }
}

/// A string is an element id; an element is used directly.
pub fn target_ref(target: &JsValue) -> TargetRef<DomTarget> {
    if let Some(id) = target.as_string() {
        TargetRef::Id(id)
    } else if let Some(el) = target.dyn_ref::<Element>() {
        TargetRef::Element(DomTarget::new(el.clone()))
    } else {
        TargetRef::Missing
    }
}

/// Carry a script value over to the core's numeric coercion.
pub fn number_input(v: &JsValue) -> NumberInput {
    if v.is_undefined() {
        NumberInput::Undefined
    } else if v.is_null() {
        NumberInput::Null
    } else if let Some(n) = v.as_f64() {
        NumberInput::Number(n)
    } else if let Some(s) = v.as_string() {
        NumberInput::Text(s)
    } else if let Some(b) = v.as_bool() {
        NumberInput::Bool(b)
    } else {
        // objects: let the host's own Number() coercion decide
        NumberInput::Number(js_sys::Number::new(v).value_of())
    }
}

/// `max(0, decimals || 0)`, truncated to an integer.
pub fn decimals_from(v: &JsValue) -> i32 {
    let n = number_input(v).to_number();
    if n.is_nan() {
        0
    } else {
        n.trunc().clamp(0.0, countup_core::animator::MAX_DECIMALS as f64) as i32
    }
}
