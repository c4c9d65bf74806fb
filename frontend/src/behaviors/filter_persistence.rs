//! Remembers the values of a page's filter form between visits.
//!
//! On load the saved [`FilterSet`] for the form is written back into its
//! controls; on submit the current values replace whatever was saved. The
//! entry lives in `localStorage` under `filters_<data-form-id>`.

use gloo_console::{log, warn};
use pos_common::config::PageConfig;
use pos_common::model::filter_set::{storage_key, FilterSet};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, Storage, Window};

use crate::dom::select_within;
use crate::error::BehaviorError;
use crate::listener::EventListener;

/// Attribute on the filter form naming its storage entry.
pub const FORM_ID_ATTRIBUTE: &str = "data-form-id";

/// Returns `None` when the page has no filter form, or the form carries no
/// identifier to store its filters under.
pub fn bind(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<Option<EventListener>, BehaviorError> {
    let Some(form) = document.get_element_by_id(&config.filter_form_id) else {
        return Ok(None);
    };
    let Some(form_id) = form.get_attribute(FORM_ID_ATTRIBUTE) else {
        warn!(format!("#{} has no {FORM_ID_ATTRIBUTE}; filters are not saved", config.filter_form_id));
        return Ok(None);
    };
    let storage = window.local_storage()?.ok_or(BehaviorError::NoStorage)?;
    let key = storage_key(&form_id);

    match load(&storage, &key) {
        Ok(Some(filters)) => restore(&form, &key, &filters)?,
        Ok(None) => {}
        // A corrupted entry is ignored; the next submit overwrites it.
        Err(err) => warn!(format!("ignoring saved filters in {key}: {err}")),
    }

    let target = form.clone();
    let listener = EventListener::new(&form, "submit", move |_| {
        if let Err(err) = save(&storage, &key, &target) {
            warn!(format!("could not save filters to {key}: {err}"));
        }
    })?;
    Ok(Some(listener))
}

fn load(storage: &Storage, key: &str) -> Result<Option<FilterSet>, BehaviorError> {
    match storage.get_item(key)? {
        Some(blob) => Ok(Some(FilterSet::from_json(&blob)?)),
        None => Ok(None),
    }
}

/// Writes every saved value into the first control with that `name`. Saved
/// names without a control are skipped and controls without a saved value
/// keep what the server rendered.
fn restore(form: &Element, key: &str, filters: &FilterSet) -> Result<(), BehaviorError> {
    if filters.is_empty() {
        return Ok(());
    }
    let controls = select_within(form, "[name]")?;
    let names: Vec<String> = controls
        .iter()
        .map(|control| control.get_attribute("name").unwrap_or_default())
        .collect();

    let plan = filters.restore_plan(&names);
    for &(index, value) in &plan {
        set_control_value(&controls[index], value)?;
    }
    log!(format!("{key}: restored {} of {} saved filters", plan.len(), filters.len()));
    Ok(())
}

fn save(storage: &Storage, key: &str, form: &Element) -> Result<(), BehaviorError> {
    let filters: FilterSet = select_within(form, "input, select")?
        .iter()
        .filter_map(control_entry)
        .collect();
    storage.set_item(key, &filters.to_json()?)?;
    Ok(())
}

/// `name`/`value` of an input or select; an unnamed control is keyed by `""`.
fn control_entry(control: &Element) -> Option<(String, String)> {
    let name = control.get_attribute("name").unwrap_or_default();
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        return Some((name, input.value()));
    }
    control
        .dyn_ref::<HtmlSelectElement>()
        .map(|select| (name, select.value()))
}

/// Assigns `value` the way page script would, so any named control that
/// exposes a `value` property (input, select, textarea, output, button...)
/// is filled.
fn set_control_value(control: &Element, value: &str) -> Result<(), BehaviorError> {
    js_sys::Reflect::set(control, &JsValue::from_str("value"), &JsValue::from_str(value))?;
    Ok(())
}
