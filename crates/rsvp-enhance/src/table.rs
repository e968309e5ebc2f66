//! Guest table search
//!
//! Case-insensitive substring filter over row text, with a live count and a
//! single no-results row.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestRow {
    pub cells: Vec<String>,
    /// Lowercased text content of the whole row
    #[serde(skip)]
    text: String,
    /// Empty-state row spanning the table
    pub placeholder: bool,
}

impl GuestRow {
    pub fn matches(&self, term: &str) -> bool {
        self.text.contains(term)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestTable {
    pub headers: Vec<String>,
    pub rows: Vec<GuestRow>,
}

impl GuestTable {
    /// The first `.table` in `fragment`.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let doc = Html::parse_fragment(fragment);

        let table_sel = Selector::parse(".table").ok()?;
        let header_sel = Selector::parse("thead th").ok()?;
        let row_sel = Selector::parse("tbody tr").ok()?;
        let cell_sel = Selector::parse("td").ok()?;

        let table = doc.select(&table_sel).next()?;

        let headers = table
            .select(&header_sel)
            .map(|th| normalize_whitespace(&element_text(&th)))
            .collect();

        let rows = table
            .select(&row_sel)
            .map(|tr| {
                let cells: Vec<ElementRef<'_>> = tr.select(&cell_sel).collect();
                GuestRow {
                    placeholder: cells.iter().any(|td| td.value().attr("colspan").is_some()),
                    cells: cells
                        .iter()
                        .map(|td| normalize_whitespace(&element_text(td)))
                        .collect(),
                    text: element_text(&tr).to_lowercase(),
                }
            })
            .collect();

        Some(Self { headers, rows })
    }

    /// No guests to search: no rows, or only the placeholder row.
    pub fn is_empty_state(&self) -> bool {
        match self.rows.as_slice() {
            [] => true,
            [only] => only.placeholder,
            _ => false,
        }
    }
}

/// What the renderer shows for the current search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterView {
    pub visible_rows: Vec<usize>,
    pub stats: String,
    pub no_results: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TableSearch {
    table: GuestTable,
    visible: Vec<bool>,
    term: String,
}

impl TableSearch {
    /// Bind to the guest table in `fragment`. There is nothing to search in
    /// an empty-state table.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let table = GuestTable::from_fragment(fragment)?;
        if table.is_empty_state() {
            return None;
        }

        let visible = vec![true; table.rows.len()];
        Some(Self {
            table,
            visible,
            term: String::new(),
        })
    }

    pub fn table(&self) -> &GuestTable {
        &self.table
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn total(&self) -> usize {
        self.table.rows.len()
    }

    pub fn showing(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    pub fn filter(&mut self, input: &str) -> FilterView {
        self.term = input.trim().to_lowercase();
        for (row, visible) in self.table.rows.iter().zip(self.visible.iter_mut()) {
            *visible = row.matches(&self.term);
        }
        self.view()
    }

    pub fn view(&self) -> FilterView {
        FilterView {
            visible_rows: self
                .visible
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.then_some(i))
                .collect(),
            stats: self.stats_text(),
            no_results: self.no_results_text(),
        }
    }

    pub fn stats_text(&self) -> String {
        let total = self.total();
        let showing = self.showing();
        let noun = if total == 1 { "Guest" } else { "Guests" };

        if showing == total {
            format!("{total} {noun} Attending")
        } else {
            format!("Showing {showing} of {total} {noun}")
        }
    }

    fn no_results_text(&self) -> Option<String> {
        (self.showing() == 0 && !self.term.is_empty())
            .then(|| format!("No guests found matching \"{}\"", self.term))
    }
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUESTS: &str = r#"
        <table class="table">
          <thead><tr><th>Name</th><th>Email</th><th>Phone</th></tr></thead>
          <tbody>
            <tr><td>Alice Smith</td><td>alice@example.com</td><td>555-123-4567</td></tr>
            <tr><td>Bob Jones</td><td>bob@example.com</td><td>555-987-6543</td></tr>
          </tbody>
        </table>"#;

    #[test]
    fn test_parse_table() {
        let table = GuestTable::from_fragment(GUESTS).unwrap();
        assert_eq!(table.headers, vec!["Name", "Email", "Phone"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].cells[0], "Bob Jones");
        assert!(!table.is_empty_state());
    }

    #[test]
    fn test_initial_stats() {
        let search = TableSearch::from_fragment(GUESTS).unwrap();
        assert_eq!(search.stats_text(), "2 Guests Attending");
        assert_eq!(search.view().visible_rows, vec![0, 1]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut search = TableSearch::from_fragment(GUESTS).unwrap();

        let view = search.filter("  SMITH ");
        assert_eq!(view.visible_rows, vec![0]);
        assert_eq!(view.stats, "Showing 1 of 2 Guests");
        assert!(view.no_results.is_none());

        let view = search.filter("");
        assert_eq!(view.visible_rows, vec![0, 1]);
        assert_eq!(view.stats, "2 Guests Attending");
    }

    #[test]
    fn test_no_results_row() {
        let mut search = TableSearch::from_fragment(GUESTS).unwrap();

        let view = search.filter("zed");
        assert!(view.visible_rows.is_empty());
        assert_eq!(view.stats, "Showing 0 of 2 Guests");
        assert_eq!(view.no_results.as_deref(), Some("No guests found matching \"zed\""));

        // Filtering again keeps a single message
        let view = search.filter("zedd");
        assert_eq!(view.no_results.as_deref(), Some("No guests found matching \"zedd\""));

        let view = search.filter("bob");
        assert!(view.no_results.is_none());
    }

    #[test]
    fn test_single_guest_stats() {
        let search = TableSearch::from_fragment(
            "<table class=\"table\"><tbody><tr><td>Alice</td></tr></tbody></table>",
        )
        .unwrap();
        assert_eq!(search.stats_text(), "1 Guest Attending");
    }

    #[test]
    fn test_empty_state_not_searchable() {
        let empty = "<table class=\"table\"><thead><tr><th>Name</th></tr></thead>\
                     <tbody><tr><td colspan=\"3\">No RSVPs yet</td></tr></tbody></table>";
        assert!(GuestTable::from_fragment(empty).unwrap().is_empty_state());
        assert!(TableSearch::from_fragment(empty).is_none());
        assert!(TableSearch::from_fragment("<table class=\"table\"><tbody></tbody></table>").is_none());
        assert!(TableSearch::from_fragment("<p>no table</p>").is_none());
    }
}
