//! Bindings to the Bootstrap 5 bundle loaded by the page templates.
//!
//! Every constructor is `catch`: when the bundle is missing the call yields a
//! `ReferenceError` instead of aborting the module.

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Tooltip;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap)]
    pub fn new(element: &Element) -> Result<Tooltip, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Popover;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap)]
    pub fn new(element: &Element) -> Result<Popover, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Alert;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap)]
    pub fn new(element: &Element) -> Result<Alert, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn close(this: &Alert) -> Result<(), JsValue>;
}
