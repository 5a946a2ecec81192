//! Table and CSV rendering for list output

use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

use super::common::escape_csv;

/// A resource that can be printed as one row of a table
pub trait Tabular: Serialize {
    /// Column titles, in row order
    const HEADERS: &'static [&'static str];

    /// Cell values, in the order of `HEADERS`
    fn row(&self) -> Vec<String>;
}

/// Column title as a CSV header field ("Feature ID" -> "feature_id")
fn csv_header(title: &str) -> String {
    title.to_lowercase().replace(' ', "_")
}

pub fn render_table<T: Tabular>(items: &[T], no_header: bool) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(T::HEADERS.to_vec());
    }
    for item in items {
        table.add_row(item.row());
    }
    table.to_string()
}

pub fn render_csv<T: Tabular>(items: &[T], no_header: bool) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if !no_header {
        let header: Vec<String> = T::HEADERS.iter().map(|h| csv_header(h)).collect();
        lines.push(header.join(","));
    }
    for item in items {
        let cells: Vec<String> = item.row().iter().map(|c| escape_csv(c)).collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: String,
        note: String,
    }

    impl Tabular for Row {
        const HEADERS: &'static [&'static str] = &["Name", "Release Note"];

        fn row(&self) -> Vec<String> {
            vec![self.name.clone(), self.note.clone()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "dark-mode".to_string(),
                note: "ui, beta".to_string(),
            },
            Row {
                name: "checkout".to_string(),
                note: String::new(),
            },
        ]
    }

    #[test]
    fn test_csv_header_names() {
        assert_eq!(csv_header("Feature ID"), "feature_id");
    }

    #[test]
    fn test_render_csv() {
        let csv = render_csv(&rows(), false);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "name,release_note");
        assert_eq!(lines[1], "dark-mode,\"ui, beta\"");
        assert_eq!(lines[2], "checkout,");
    }

    #[test]
    fn test_render_csv_no_header() {
        let csv = render_csv(&rows(), true);
        assert!(csv.starts_with("dark-mode"));
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&rows(), false);
        assert!(table.contains("Release Note"));
        assert!(table.contains("checkout"));

        let bare = render_table(&rows(), true);
        assert!(!bare.contains("Release Note"));
    }

    #[test]
    fn test_render_table_empty() {
        let table = render_table::<Row>(&[], true);
        assert!(table.trim().is_empty());
    }
}
