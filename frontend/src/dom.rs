//! Small lookups shared by the behavior routines.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList, Window};

use crate::error::BehaviorError;

pub fn window() -> Result<Window, BehaviorError> {
    web_sys::window().ok_or(BehaviorError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, BehaviorError> {
    window.document().ok_or(BehaviorError::NoDocument)
}

/// Every element of `document` matching `selector`, in document order.
pub fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, BehaviorError> {
    Ok(elements(document.query_selector_all(selector)?))
}

/// Every descendant of `root` matching `selector`, in document order.
pub fn select_within(root: &Element, selector: &str) -> Result<Vec<Element>, BehaviorError> {
    Ok(elements(root.query_selector_all(selector)?))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
