//! Implementation of `quire labels`.

use std::process::ExitCode;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use quire_cache::CellRenderer;

use crate::cli::{context::CommandContext, output::dim};

/// Lists every known entity label with its display name and color.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let renderer = CellRenderer::from_config(&ctx.config);
    let labels = renderer.labels();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Label", "Name", "Color"]);

    for (label, style) in labels.entries() {
        let mut color_cell = Cell::new(&style.color);
        if let Some(fg) = rgb(&style.color) {
            color_cell = color_cell.fg(fg);
        }
        table.add_row(vec![Cell::new(label), Cell::new(&style.name), color_cell]);
    }

    println!("{table}");
    println!(
        "{}",
        dim(&format!("other labels: {}", labels.default_color()))
    );
    ExitCode::SUCCESS
}

/// Parses `#rrggbb` into a table color.
fn rgb(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_parses_hex_triplets() {
        assert_eq!(
            rgb("#ff8000"),
            Some(Color::Rgb {
                r: 255,
                g: 128,
                b: 0
            })
        );
        assert_eq!(rgb("ff8000"), None);
        assert_eq!(rgb("#ff80"), None);
        assert_eq!(rgb("#gg0000"), None);
    }
}
