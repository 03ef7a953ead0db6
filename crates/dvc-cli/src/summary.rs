use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dvc_cli::pipeline::ResolveReport;
use dvc_model::{DEFAULT_BUCKET, Layer, LayerMode};
use dvc_store::LayerStore;

use crate::commands::ValidateReport;

pub fn print_resolution(report: &ResolveReport, layers: &[Layer]) {
    println!(
        "Policy: {:?}, z-order: {:?}, filters: {:?}",
        report.options.policy, report.options.z_order, report.options.filter_combination
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Layer"),
        header_cell("Name"),
        header_cell("zIndex"),
        header_cell("Mode"),
        header_cell("Active"),
        header_cell("Claimed"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);

    for layer in layers {
        let claimed = report.element_ids_per_layer.layer(&layer.id).len();
        table.add_row(vec![
            Cell::new(&layer.id).fg(Color::Blue),
            Cell::new(&layer.name),
            Cell::new(layer.z_index),
            mode_cell(layer.mode),
            active_cell(layer.active),
            Cell::new(claimed),
        ]);
    }
    table.add_row(vec![
        Cell::new(DEFAULT_BUCKET).fg(Color::DarkGrey),
        Cell::new("unclaimed").fg(Color::DarkGrey),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(report.element_ids_per_layer.default.len()),
    ]);
    println!("{table}");

    let label = if report.with_ancestors {
        "Visible (with ancestors)"
    } else {
        "Visible"
    };
    println!("{label}: {} of {}", report.visible.len(), report.total());
    if !report.visible.is_empty() {
        println!("  {}", report.visible.join(", "));
    }
    if !report.hidden.is_empty() {
        println!("Hidden: {}", report.hidden.join(", "));
    }
}

pub fn print_layers(store: &LayerStore) {
    if store.layers().is_empty() {
        println!("No layers.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Layer"),
        header_cell("Name"),
        header_cell("zIndex"),
        header_cell("Mode"),
        header_cell("Active"),
        header_cell("Filters"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);

    for (index, layer) in store.layers().iter().enumerate() {
        let filters = layer
            .filters
            .iter()
            .map(|filter| format!("{} ({})", filter.name(), filter.kind()))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(index),
            Cell::new(&layer.id).fg(Color::Blue),
            Cell::new(&layer.name),
            Cell::new(layer.z_index),
            mode_cell(layer.mode),
            active_cell(layer.active),
            Cell::new(filters),
        ]);
    }
    println!("{table}");
}

pub fn print_validation(report: &ValidateReport) {
    match &report.error {
        None => println!("Valid: {} layer(s)", report.layers),
        Some(error) if error.issues().is_empty() => println!("Invalid: {error}"),
        Some(error) => {
            println!("Invalid: {} issue(s)", error.issues().len());
            let mut table = Table::new();
            table.set_header(vec![header_cell("Path"), header_cell("Problem")]);
            apply_table_style(&mut table);
            for issue in error.issues() {
                let path = if issue.path.is_empty() {
                    "(root)"
                } else {
                    issue.path.as_str()
                };
                table.add_row(vec![
                    Cell::new(path).fg(Color::Yellow),
                    Cell::new(&issue.message),
                ]);
            }
            println!("{table}");
        }
    }
    for warning in &report.pattern_warnings {
        println!(
            "warning: layer '{}' filter '{}': pattern {} matches nothing ({})",
            warning.layer_id, warning.filter_id, warning.pattern, warning.error
        );
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn mode_cell(mode: LayerMode) -> Cell {
    match mode {
        LayerMode::Show => Cell::new("show").fg(Color::Green),
        LayerMode::Hide => Cell::new("hide").fg(Color::Red),
    }
}

fn active_cell(active: bool) -> Cell {
    if active {
        Cell::new("yes")
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    }
}
