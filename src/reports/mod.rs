use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use groupforge::roster::AttributeStats;

/// Prints the population breakdown per attribute: value, head count,
/// share of the population, and the ideal average per group.
pub fn print_attribute_stats(stats: &[AttributeStats]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Attribute").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Share"),
        Cell::new("Ideal / group").fg(Color::Cyan),
    ]);

    for attr in stats {
        for entry in &attr.entries {
            table.add_row(vec![
                Cell::new(&attr.attribute),
                Cell::new(&entry.value),
                Cell::new(entry.count),
                Cell::new(format!("{:.0}%", entry.share * 100.0)),
                Cell::new(format!("{:.1}", entry.ideal_per_group)),
            ]);
        }
    }

    for i in 2..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    println!("{}", table);
}

/// Prints one row per group: label, size and diversity score, with the
/// aggregate underneath.
pub fn print_group_table(rows: &[(String, usize, i64)], aggregate: f64) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new("Size"),
        Cell::new("Score").fg(Color::Cyan),
    ]);

    for (label, size, score) in rows {
        let score_cell = if *score == 0 {
            Cell::new(score).fg(Color::Green)
        } else {
            Cell::new(score)
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(size).set_alignment(CellAlignment::Right),
            score_cell.set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("mean").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(format!("{:.2}", aggregate))
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    println!("{}", table);
}
