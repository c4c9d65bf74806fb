use gloo_console::warn;
use pos_common::config::PageConfig;
use pos_common::search::{display_for, normalize_query, row_matches};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::dom::select_within;
use crate::error::BehaviorError;
use crate::listener::EventListener;

/// Attribute on the search box holding the CSS selector of its table.
pub const TABLE_ATTRIBUTE: &str = "data-table";

/// Filters the target table's body rows on every keystroke in the search box.
///
/// Returns `None` when the page has no search box.
pub fn bind(document: &Document, config: &PageConfig) -> Result<Option<EventListener>, BehaviorError> {
    let Some(element) = document.get_element_by_id(&config.table_search_id) else {
        return Ok(None);
    };
    let search = element
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| BehaviorError::UnexpectedElement(config.table_search_id.clone(), "an <input>"))?;

    let document = document.clone();
    let input = search.clone();
    let listener = EventListener::new(&search, "input", move |_| {
        let query = normalize_query(&input.value());
        let Some(selector) = input.get_attribute(TABLE_ATTRIBUTE) else {
            warn!(format!("search box has no {TABLE_ATTRIBUTE} attribute"));
            return;
        };
        if let Err(err) = filter_rows(&document, &selector, &query) {
            warn!(format!("table search failed: {err}"));
        }
    })?;
    Ok(Some(listener))
}

/// Shows the rows with a cell containing `query` and hides the others.
/// Rows are only hidden, never removed.
fn filter_rows(document: &Document, selector: &str, query: &str) -> Result<(), BehaviorError> {
    let table = document
        .query_selector(selector)?
        .ok_or_else(|| BehaviorError::MissingElement(selector.to_string()))?;

    for row in select_within(&table, "tbody tr")? {
        let cells = select_within(&row, "td")?
            .into_iter()
            .map(|cell| cell.text_content().unwrap_or_default());
        let visible = row_matches(cells, query);
        if let Some(row) = row.dyn_ref::<HtmlElement>() {
            row.style().set_property("display", display_for(visible))?;
        }
    }
    Ok(())
}
