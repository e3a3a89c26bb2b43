//! Excel reader implementation - cell fills (.xlsx) → FillGrid
//!
//! Fills aren't exposed by the usual cell-value readers, so the package is
//! opened directly: `workbook.xml` picks the sheet, the relationships part
//! locates it, and `styles.xml` maps each cell's style index to its fill.

use crate::color::Rgb;
use crate::error::{PixcelError, PixcelResult};
use crate::grid::FillGrid;
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

/// Reads the fill colors of one worksheet into a [`FillGrid`]
pub struct FillReader {
    path: PathBuf,
    sheet: Option<String>,
}

impl FillReader {
    /// Create a reader for the workbook's active sheet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: None,
        }
    }

    /// Read the named sheet instead of the active one
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    /// Read the top-left `rows` × `columns` region.
    ///
    /// Cells outside the populated part of the sheet come back unfilled.
    pub fn read(&self, rows: u32, columns: u32) -> PixcelResult<FillGrid> {
        crate::grid::validate_dimensions(rows, columns)?;
        let file = File::open(&self.path)?;
        let mut package = Package::new(ZipArchive::new(file)?);
        read_fills(&mut package, self.sheet.as_deref(), rows, columns)
    }
}

/// Thin wrapper over the zip archive addressing parts by OPC name
struct Package<R> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    fn new(archive: ZipArchive<R>) -> Self {
        Self { archive }
    }

    fn part(&mut self, name: &str) -> PixcelResult<Option<String>> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut text = String::new();
        entry.read_to_string(&mut text)?;
        Ok(Some(text))
    }

    fn required_part(&mut self, name: &str) -> PixcelResult<String> {
        self.part(name)?
            .ok_or_else(|| PixcelError::Workbook(format!("missing part '{}'", name)))
    }

    /// Relationships of `part`, keyed by id: (type, resolved target)
    fn relationships(&mut self, part: &str) -> PixcelResult<HashMap<String, (String, String)>> {
        let Some(xml) = self.part(&rels_path_for(part))? else {
            return Ok(HashMap::new());
        };
        let doc = Document::parse(&xml)?;
        let base = parent_dir(part);

        Ok(doc
            .root_element()
            .children()
            .filter(|n| n.has_tag_name("Relationship"))
            .filter_map(|rel| {
                let id = rel.attribute("Id")?;
                let target = rel.attribute("Target")?;
                let kind = rel.attribute("Type").unwrap_or_default();
                Some((
                    id.to_string(),
                    (kind.to_string(), resolve_target(base, target)),
                ))
            })
            .collect())
    }
}

fn read_fills<R: Read + Seek>(
    package: &mut Package<R>,
    sheet: Option<&str>,
    rows: u32,
    columns: u32,
) -> PixcelResult<FillGrid> {
    let mut grid = FillGrid::new(rows, columns)?;

    let workbook_part = package
        .relationships("")?
        .into_values()
        .find(|(kind, _)| kind == REL_OFFICE_DOCUMENT)
        .map(|(_, target)| target)
        .unwrap_or_else(|| "xl/workbook.xml".to_string());
    debug!(part = %workbook_part, "Reading workbook");

    let workbook_rels = package.relationships(&workbook_part)?;
    let workbook_xml = package.required_part(&workbook_part)?;
    let sheet_rel_id = select_sheet(&workbook_xml, sheet)?;
    let sheet_part = workbook_rels
        .get(&sheet_rel_id)
        .map(|(_, target)| target.clone())
        .ok_or_else(|| {
            PixcelError::Workbook(format!("no relationship for sheet id '{}'", sheet_rel_id))
        })?;
    debug!(part = %sheet_part, "Selected worksheet");

    let styles_part = workbook_rels
        .values()
        .find(|(kind, _)| kind == REL_STYLES)
        .map(|(_, target)| target.clone())
        .unwrap_or_else(|| "xl/styles.xml".to_string());
    let styles = match package.part(&styles_part)? {
        Some(xml) => StyleFills::parse(&xml)?,
        None => {
            warn!(part = %styles_part, "Workbook has no styles part; every cell reads as unfilled");
            StyleFills::default()
        }
    };

    let sheet_xml = package.required_part(&sheet_part)?;
    let doc = Document::parse(&sheet_xml)?;
    let Some(sheet_data) = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("sheetData"))
    else {
        return Ok(grid);
    };

    let mut extent = (0u32, 0u32);
    let mut row_num = 0u32;
    for row in sheet_data.children().filter(|n| n.has_tag_name("row")) {
        row_num = match row.attribute("r") {
            Some(r) => r
                .parse()
                .map_err(|_| PixcelError::Workbook(format!("invalid row number '{}'", r)))?,
            None => row_num
                .checked_add(1)
                .ok_or_else(|| PixcelError::Workbook("row number overflows".to_string()))?,
        };

        let mut col_num = 0u32;
        for cell in row.children().filter(|n| n.has_tag_name("c")) {
            let (r, c) = match cell.attribute("r") {
                Some(reference) => parse_cell_ref(reference).ok_or_else(|| {
                    PixcelError::Workbook(format!("invalid cell reference '{}'", reference))
                })?,
                None => (
                    row_num,
                    col_num.checked_add(1).ok_or_else(|| {
                        PixcelError::Workbook("column number overflows".to_string())
                    })?,
                ),
            };
            col_num = c;
            extent = (extent.0.max(r), extent.1.max(c));

            if r > rows || c > columns {
                continue;
            }
            let style = style_index(&cell)?;
            grid.set(r, c, styles.fill_for_style(style)?)?;
        }
    }

    debug!(
        populated_rows = extent.0,
        populated_columns = extent.1,
        requested_rows = rows,
        requested_columns = columns,
        filled = grid.filled_count(),
        "Read cell fills"
    );
    Ok(grid)
}

/// Relationship id of the requested sheet, or of the active one
fn select_sheet(workbook_xml: &str, name: Option<&str>) -> PixcelResult<String> {
    let doc = Document::parse(workbook_xml)?;
    let root = doc.root_element();

    let sheets: Vec<Node> = root
        .children()
        .find(|n| n.has_tag_name("sheets"))
        .map(|s| s.children().filter(|n| n.has_tag_name("sheet")).collect())
        .unwrap_or_default();

    let sheet = match name {
        Some(name) => sheets
            .iter()
            .find(|s| s.attribute("name") == Some(name))
            .ok_or_else(|| PixcelError::Workbook(format!("no sheet named '{}'", name)))?,
        None => {
            let active = root
                .descendants()
                .find(|n| n.has_tag_name("workbookView"))
                .and_then(|v| v.attribute("activeTab"))
                .and_then(|t| t.parse::<usize>().ok())
                .unwrap_or(0);
            sheets
                .get(active)
                .or_else(|| sheets.first())
                .ok_or_else(|| PixcelError::Workbook("workbook has no sheets".to_string()))?
        }
    };

    sheet
        .attribute((NS_REL, "id"))
        .map(str::to_string)
        .ok_or_else(|| PixcelError::Workbook("sheet entry without relationship id".to_string()))
}

fn style_index(cell: &Node) -> PixcelResult<usize> {
    match cell.attribute("s") {
        Some(s) => s
            .parse()
            .map_err(|_| PixcelError::Workbook(format!("invalid style index '{}'", s))),
        None => Ok(0),
    }
}

/// The slice of `styles.xml` needed to resolve a cell's fill
#[derive(Debug, Default)]
struct StyleFills {
    /// `cellXfs` entry → `fillId`
    xf_fills: Vec<usize>,
    /// `fills` entry → raw RGB string when the fill is solid with an explicit RGB color
    fills: Vec<Option<String>>,
}

impl StyleFills {
    fn parse(xml: &str) -> PixcelResult<Self> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        let child = |name: &str| root.children().find(|n| n.has_tag_name(name));

        let fills = child("fills")
            .map(|fills| {
                fills
                    .children()
                    .filter(|n| n.has_tag_name("fill"))
                    .map(|fill| solid_rgb(&fill))
                    .collect()
            })
            .unwrap_or_default();

        let xf_fills = child("cellXfs")
            .map(|xfs| {
                xfs.children()
                    .filter(|n| n.has_tag_name("xf"))
                    .map(|xf| {
                        xf.attribute("fillId")
                            .and_then(|id| id.parse().ok())
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { xf_fills, fills })
    }

    fn fill_for_style(&self, style: usize) -> PixcelResult<Option<Rgb>> {
        let Some(&fill_id) = self.xf_fills.get(style) else {
            return Ok(None);
        };
        match self.fills.get(fill_id) {
            Some(Some(rgb)) => Rgb::from_hex(rgb).map(Some),
            _ => Ok(None),
        }
    }
}

/// `fgColor@rgb` of a solid pattern fill; theme/indexed colors don't count
fn solid_rgb(fill: &Node) -> Option<String> {
    let pattern = fill.children().find(|n| n.has_tag_name("patternFill"))?;
    if pattern.attribute("patternType") != Some("solid") {
        return None;
    }
    pattern
        .children()
        .find(|n| n.has_tag_name("fgColor"))?
        .attribute("rgb")
        .map(str::to_string)
}

/// "B12" → (12, 2)
fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let column = letters.chars().try_fold(0u32, |acc, ch| {
        let ch = ch.to_ascii_uppercase();
        ch.is_ascii_uppercase()
            .then(|| acc * 26 + (ch as u32 - 'A' as u32 + 1))
    })?;
    let row = digits.parse::<u32>().ok().filter(|&r| r > 0)?;
    Some((row, column))
}

fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

fn parent_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a relationship target against the source part's directory
fn resolve_target(base: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
