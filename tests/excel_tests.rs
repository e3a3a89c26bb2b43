//! Excel writer package tests: sheet layout and style sharing in the written .xlsx

mod common;

use common::read_package_part;
use pixcel::excel::FillWriter;
use pixcel::{FillGrid, Rgb};
use pretty_assertions::assert_eq;
use roxmltree::Document;
use std::path::Path;
use tempfile::TempDir;

fn attr_u32(node: &roxmltree::Node, name: &str) -> Option<u32> {
    node.attribute(name).and_then(|v| v.parse().ok())
}

/// Columns (1-based) covered by a `<col customWidth="1">` entry
fn custom_width_columns(sheet_xml: &str) -> Vec<u32> {
    let doc = Document::parse(sheet_xml).unwrap();
    let mut columns: Vec<u32> = doc
        .descendants()
        .filter(|n| n.has_tag_name("col") && n.attribute("customWidth") == Some("1"))
        .flat_map(|col| {
            let min = attr_u32(&col, "min").unwrap();
            let max = attr_u32(&col, "max").unwrap();
            min..=max
        })
        .collect();
    columns.sort_unstable();
    columns.dedup();
    columns
}

/// Rows (1-based) with an explicit `ht` and `customHeight="1"`
fn custom_height_rows(sheet_xml: &str) -> Vec<u32> {
    let doc = Document::parse(sheet_xml).unwrap();
    doc.descendants()
        .filter(|n| {
            n.has_tag_name("row")
                && n.attribute("ht").is_some()
                && n.attribute("customHeight") == Some("1")
        })
        .map(|row| attr_u32(&row, "r").unwrap())
        .collect()
}

fn solid_fill_colors(styles_xml: &str) -> Vec<String> {
    let doc = Document::parse(styles_xml).unwrap();
    doc.descendants()
        .filter(|n| n.has_tag_name("patternFill") && n.attribute("patternType") == Some("solid"))
        .filter_map(|p| {
            p.children()
                .find(|c| c.has_tag_name("fgColor"))
                .and_then(|c| c.attribute("rgb"))
                .map(str::to_string)
        })
        .collect()
}

fn cell_xf_count(styles_xml: &str) -> usize {
    let doc = Document::parse(styles_xml).unwrap();
    doc.descendants()
        .find(|n| n.has_tag_name("cellXfs"))
        .map(|xfs| xfs.children().filter(|n| n.has_tag_name("xf")).count())
        .unwrap()
}

fn checkerboard(rows: u32, columns: u32, colors: &[Rgb]) -> FillGrid {
    let mut grid = FillGrid::new(rows, columns).unwrap();
    for row in 1..=rows {
        for column in 1..=columns {
            let color = colors[((row + column) as usize) % colors.len()];
            grid.set(row, column, Some(color)).unwrap();
        }
    }
    grid
}

fn write(grid: &FillGrid, cell_size: Option<u16>, path: &Path) {
    FillWriter::new()
        .with_cell_size(cell_size)
        .write(grid, path)
        .unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// SQUARE CELLS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cell_size_sets_every_column_width_and_row_height() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("square.xlsx");

    // Sparse grid: the last row and column carry no fill but must still be sized
    let mut grid = FillGrid::new(4, 5).unwrap();
    grid.set(1, 1, Some(Rgb::BLACK)).unwrap();
    write(&grid, Some(16), &path);

    let sheet = read_package_part(&path, "xl/worksheets/sheet1.xml");
    assert_eq!(custom_width_columns(&sheet), vec![1, 2, 3, 4, 5]);
    assert_eq!(custom_height_rows(&sheet), vec![1, 2, 3, 4]);
}

#[test]
fn test_no_cell_size_keeps_default_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("plain.xlsx");

    write(&checkerboard(3, 3, &[Rgb::BLACK, Rgb::WHITE]), None, &path);

    let sheet = read_package_part(&path, "xl/worksheets/sheet1.xml");
    assert!(custom_width_columns(&sheet).is_empty());
    assert!(custom_height_rows(&sheet).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMAT SHARING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_one_fill_per_distinct_color() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("palette.xlsx");

    let palette = [
        Rgb::new(255, 0, 0),
        Rgb::new(0, 255, 0),
        Rgb::new(0, 0, 255),
    ];
    write(&checkerboard(6, 7, &palette), None, &path);

    let styles = read_package_part(&path, "xl/styles.xml");
    let mut fills = solid_fill_colors(&styles);
    fills.sort();
    assert_eq!(fills, vec!["FF0000FF", "FF00FF00", "FFFF0000"]);
    // Default xf plus one per color
    assert_eq!(cell_xf_count(&styles), palette.len() + 1);
}

#[test]
fn test_unfilled_grid_adds_no_fills() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.xlsx");

    write(&FillGrid::new(2, 2).unwrap(), Some(10), &path);

    let styles = read_package_part(&path, "xl/styles.xml");
    assert!(solid_fill_colors(&styles).is_empty());
    assert_eq!(cell_xf_count(&styles), 1);
}
