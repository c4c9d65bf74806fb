//! Case-insensitive row filtering for the table search box.

/// Lowercases the query once per keystroke so each row test is a plain
/// substring check.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// A row matches when at least one of its cells contains `query`.
///
/// `query` must already be lowercased (see [`normalize_query`]). An empty query
/// matches every row that has at least one cell; a row without cells never
/// matches.
pub fn row_matches<I, S>(cells: I, query: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .any(|cell| cell.as_ref().to_lowercase().contains(query))
}

/// CSS `display` value for a row: empty restores the stylesheet default.
pub fn display_for(visible: bool) -> &'static str {
    if visible { "" } else { "none" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["1001", "Coca-Cola 600ml", "$18.00"],
            vec!["1002", "Pan Bimbo", "$45.50"],
            vec!["1003", "Leche LALA", "$27.00"],
        ]
    }

    fn visible(query: &str) -> Vec<bool> {
        let query = normalize_query(query);
        rows()
            .into_iter()
            .map(|cells| row_matches(cells, &query))
            .collect()
    }

    #[test]
    fn matches_any_cell_ignoring_case() {
        assert_eq!(visible("lala"), vec![false, false, true]);
        assert_eq!(visible("BIMBO"), vec![false, true, false]);
        assert_eq!(visible("100"), vec![true, true, true]);
    }

    #[test]
    fn empty_query_shows_everything() {
        assert_eq!(visible(""), vec![true, true, true]);
    }

    #[test]
    fn no_match_hides_everything() {
        assert_eq!(visible("tortilla"), vec![false, false, false]);
    }

    #[test]
    fn substring_spans_a_single_cell_only() {
        // "1001 coca" would need to span two cells.
        assert_eq!(visible("1001 coca"), vec![false, false, false]);
    }

    #[test]
    fn row_without_cells_never_matches() {
        assert!(!row_matches(Vec::<String>::new(), ""));
    }

    #[test]
    fn display_values() {
        assert_eq!(display_for(true), "");
        assert_eq!(display_for(false), "none");
    }
}
