use gloo_console::warn;
use pos_common::config::PageConfig;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::bootstrap::{Popover, Tooltip};
use crate::dom::select_all;
use crate::error::BehaviorError;

/// Creates a Bootstrap tooltip and popover for every flagged element.
///
/// Returns how many widgets were created. A constructor that throws (usually
/// because the Bootstrap bundle is not on the page) is reported once per
/// widget kind and the remaining elements are still tried.
pub fn activate(document: &Document, config: &PageConfig) -> Result<usize, BehaviorError> {
    let tooltips = instantiate(document, &config.tooltip_selector, "tooltip", |el| {
        Tooltip::new(el).map(drop)
    })?;
    let popovers = instantiate(document, &config.popover_selector, "popover", |el| {
        Popover::new(el).map(drop)
    })?;
    Ok(tooltips + popovers)
}

fn instantiate<F>(
    document: &Document,
    selector: &str,
    kind: &str,
    create: F,
) -> Result<usize, BehaviorError>
where
    F: Fn(&Element) -> Result<(), JsValue>,
{
    let mut created = 0;
    let mut reported = false;
    for element in select_all(document, selector)? {
        match create(&element) {
            Ok(()) => created += 1,
            Err(err) if !reported => {
                reported = true;
                warn!(format!("could not create {kind}: {}", BehaviorError::from(err)));
            }
            Err(_) => {}
        }
    }
    Ok(created)
}
