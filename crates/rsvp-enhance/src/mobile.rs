//! Narrow-screen table layout: each body cell carries its column header as
//! a `data-label`.

use serde::Serialize;

use crate::table::GuestTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellLabel {
    pub row: usize,
    pub column: usize,
    pub label: String,
}

pub fn mobile_labels(fragment: &str) -> Vec<CellLabel> {
    let Some(table) = GuestTable::from_fragment(fragment) else {
        return Vec::new();
    };

    let mut labels = Vec::new();
    for (row, guest) in table.rows.iter().enumerate() {
        for column in 0..guest.cells.len() {
            match table.headers.get(column) {
                Some(header) if !header.is_empty() => labels.push(CellLabel {
                    row,
                    column,
                    label: header.clone(),
                }),
                _ => {}
            }
        }
    }
    labels
}
