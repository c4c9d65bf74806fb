use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Failures while wiring page behaviors to the DOM.
///
/// Routines return these to `PageBehaviors`, which logs them and keeps the
/// remaining routines running.
#[derive(Error, Debug)]
pub enum BehaviorError {
    #[error("no global `window`")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("localStorage is unavailable")]
    NoStorage,

    #[error("no element matches {0:?}")]
    MissingElement(String),

    #[error("element {0:?} is not {1}")]
    UnexpectedElement(String, &'static str),

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error(transparent)]
    Common(#[from] pos_common::Error),
}

impl From<JsValue> for BehaviorError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<serde_wasm_bindgen::Error> for BehaviorError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::Js(err.to_string())
    }
}
