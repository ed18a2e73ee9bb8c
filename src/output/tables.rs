use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};
use reqwest::header::HeaderMap;

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per header; values that are not UTF-8 are shown as `<binary>`.
pub fn headers_table(headers: &HeaderMap) -> Table {
    let mut table = create_table();
    table.set_header(vec![
        Cell::new("Header").fg(TableColor::Cyan),
        Cell::new("Value").fg(TableColor::Cyan),
    ]);

    let mut rows: Vec<(&str, &str)> = headers
        .iter()
        .map(|(name, value)| (name.as_str(), value.to_str().unwrap_or("<binary>")))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    table
}
