use gloo_console::warn;
use pos_common::config::PageConfig;
use pos_common::currency::{CurrencyField, RAW_VALUE_ATTRIBUTE};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::dom::select_all;
use crate::error::BehaviorError;
use crate::listener::EventListener;

/// Attaches input/focus/blur formatting to every currency input.
///
/// Matches that are not `<input>` elements are skipped with a warning.
pub fn bind(document: &Document, config: &PageConfig) -> Result<Vec<EventListener>, BehaviorError> {
    let mut listeners = Vec::new();
    for element in select_all(document, &config.currency_input_selector)? {
        let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
            warn!(format!(
                "{} matched a non-input element",
                config.currency_input_selector
            ));
            continue;
        };
        listeners.extend(bind_input(input)?);
    }
    Ok(listeners)
}

fn bind_input(input: HtmlInputElement) -> Result<[EventListener; 3], BehaviorError> {
    let on_input = {
        let field = input.clone();
        EventListener::new(&input, "input", move |_| {
            store(&field, CurrencyField::on_input(&field.value()));
        })?
    };

    let on_focus = {
        let field = input.clone();
        EventListener::new(&input, "focus", move |_| {
            let stored = field.get_attribute(RAW_VALUE_ATTRIBUTE);
            field.set_value(&CurrencyField::on_focus(stored.as_deref()));
        })?
    };

    let on_blur = {
        let field = input.clone();
        EventListener::new(&input, "blur", move |_| {
            store(&field, CurrencyField::on_blur(&field.value()));
        })?
    };

    Ok([on_input, on_focus, on_blur])
}

fn store(input: &HtmlInputElement, field: CurrencyField) {
    if let Err(err) = input.set_attribute(RAW_VALUE_ATTRIBUTE, &field.raw) {
        warn!(format!("could not store currency value: {}", BehaviorError::from(err)));
    }
    input.set_value(&field.display);
}
