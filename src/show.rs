use crate::config::AppConfig;
use crate::history::History;
use crate::store::JsonFileStore;
use anyhow::Result;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};

/// Renders the stored history as a table, newest snapshot first.
pub fn run(config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    let store = JsonFileStore::new(&config.data_file);
    let history = store.load();

    if history.is_empty() {
        println!("No snapshots recorded yet. Run `nkt update` on a business day.");
        return Ok(());
    }

    display_history(&history);
    Ok(())
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn change_cell(change: f64) -> Cell {
    let color = if change >= 0.0 { Color::Green } else { Color::Red };
    Cell::new(format!("{change:+.2}"))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

fn display_history(history: &History) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        header_cell("Date"),
        header_cell("Close"),
        header_cell("Change"),
        header_cell("Volume (M)"),
        header_cell("JGB 10Y"),
        header_cell("PER"),
        header_cell("PBR"),
        header_cell("Div. Yield"),
    ]);

    for entry in history.entries() {
        table.add_row(vec![
            Cell::new(entry.date.to_string()),
            value_cell(format!("{:.2}", entry.price)),
            change_cell(entry.change),
            value_cell(entry.volume.to_string()),
            value_cell(format!("{:.3}", entry.bond_yield)),
            value_cell(format!("{:.2}", entry.per)),
            value_cell(format!("{:.2}", entry.pbr)),
            value_cell(format!("{:.2}%", entry.dividend_yield)),
        ]);
    }

    println!("{table}");
}
