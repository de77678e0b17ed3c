use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dx_cli::pipeline::ExtractResult;
use dx_dictionary::LoadedDictionary;

pub fn print_extract_summary(result: &ExtractResult) {
    let summary = &result.summary;
    println!("Dictionary: {} ({} drugs)", result.dictionary.origin, result.dictionary.dictionary.len());
    println!("Output: {}", result.output.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Drug"),
        header_cell("Matches"),
        header_cell("Tags"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in &result.dictionary.dictionary {
        let hits = summary.hits_for(entry.name());
        if hits == 0 {
            continue;
        }
        table.add_row(vec![
            Cell::new(entry.name()).fg(Color::Green),
            Cell::new(hits),
            dim_cell(join_tags(entry.tags())),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.hits).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    println!(
        "Records: {} scanned, {} with matches, {} blank ({:.2}s)",
        summary.records,
        summary.records_with_hit,
        result.blank_records,
        summary.duration.as_secs_f64()
    );
}

pub fn print_dictionary(loaded: &LoadedDictionary) {
    println!("Dictionary: {}", loaded.origin);
    println!("SHA-256: {}", loaded.sha256);
    let mut table = Table::new();
    table.set_header(vec!["Drug", "Search terms", "Tags"]);
    apply_table_style(&mut table);
    for entry in &loaded.dictionary {
        let terms: Vec<&str> = entry
            .search_terms()
            .iter()
            .map(|term| term.text.as_str())
            .collect();
        table.add_row(vec![
            entry.name().to_string(),
            terms.join(", "),
            join_tags(entry.tags()),
        ]);
    }
    println!("{table}");
}

fn join_tags<'a>(tags: impl IntoIterator<Item = &'a String>) -> String {
    tags.into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
