//////////////////////////////////////////////////////////////////////////////////////////////////
//////////////////////////////////////////////////////////////////////////////////////////////////
// Imports
//////////////////////////////////////////////////////////////////////////////////////////////////

use std::fmt;
use std::path::Path;
use itertools::Itertools;
use serde::Serialize;

use crate::errors::OutputError;
use crate::records::YearRecords;

//////////////////////////////////////////////////////////////////////////////////////////////////
//////////////////////////////////////////////////////////////////////////////////////////////////
// Structs
//////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_CHART_NAME: &str = "Chart1";
const CATEGORY_HEADER: &str = "Type";

/// One table cell, written as `{"string": ..}` or `{"number": ..}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    String(String),
    Number(f64),
}

/// Header row, blank spacer row, then one row per category.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ChartTable {
    rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Chart {
    pub name: String,
    pub table: ChartTable,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartDocument {
    pub template: String,
    pub data: Vec<Chart>,
}

/// Contents of a `.ppttc` file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PpttcFile {
    documents: Vec<ChartDocument>,
}

//////////////////////////////////////////////////////////////////////////////////////////////////
//////////////////////////////////////////////////////////////////////////////////////////////////
// Implementations
//////////////////////////////////////////////////////////////////////////////////////////////////

impl Cell {
    pub fn label(text: impl Into<String>) -> Self {
        Cell::String(text.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s.as_str()),
            Cell::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::String(_) => None,
            Cell::Number(n) => Some(*n),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{}", s),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

impl ChartTable {
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in every row.
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or_default()
    }

    pub fn years(&self) -> Vec<&str> {
        self.rows.first()
            .map(|header| header.iter().skip(1).filter_map(Cell::as_str).collect_vec())
            .unwrap_or_default()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.rows.iter()
            .skip(2)
            .filter_map(|row| row.first().and_then(Cell::as_str))
            .collect_vec()
    }

    pub fn value(&self, category: &str, year: &str) -> Option<f64> {
        let column = self.years().iter().position(|y| *y == year)? + 1;
        self.rows.iter()
            .skip(2)
            .find(|row| row.first().and_then(Cell::as_str) == Some(category))?
            .get(column)?
            .as_number()
    }
}

impl ChartDocument {
    pub fn new(template: impl Into<String>, chart: Chart) -> Self {
        Self { template: template.into(), data: vec![chart] }
    }
}

impl PpttcFile {
    pub fn new(documents: Vec<ChartDocument>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[ChartDocument] {
        &self.documents
    }
}

impl From<ChartDocument> for PpttcFile {
    fn from(document: ChartDocument) -> Self {
        Self::new(vec![document])
    }
}

//////////////////////////////////////////////////////////////////////////////////////////////////
//////////////////////////////////////////////////////////////////////////////////////////////////
// Building
//////////////////////////////////////////////////////////////////////////////////////////////////

pub fn build_chart_table(records: &YearRecords) -> ChartTable {
    let years = records.years();
    let categories = records.categories();

    let mut header = vec![Cell::label(CATEGORY_HEADER)];
    header.extend(years.iter().map(|year| Cell::label(*year)));
    let spacer = vec![Cell::label(""); years.len() + 1];

    let mut rows = vec![header, spacer];
    for category in categories {
        let mut row = vec![Cell::label(category)];
        // A category missing from a year is a true zero for that year.
        row.extend(years.iter().map(|year| {
            Cell::Number(records.value(year, category).unwrap_or(0.0))
        }));
        rows.push(row);
    }
    ChartTable { rows }
}

pub fn build_chart_document(records: &YearRecords,
                            template: &str,
                            chart_name: &str) -> ChartDocument {
    let table = build_chart_table(records);
    log::debug!(
        "Built chart '{}' with {} rows and {} columns",
        chart_name,
        table.height(),
        table.width()
    );
    ChartDocument::new(template, Chart { name: chart_name.to_string(), table })
}

//////////////////////////////////////////////////////////////////////////////////////////////////
//////////////////////////////////////////////////////////////////////////////////////////////////
// Serialization
//////////////////////////////////////////////////////////////////////////////////////////////////

/// Pretty JSON with four-space indentation.
pub fn to_ppttc_json(file: &PpttcFile) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    file.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn write_ppttc_file(path: impl AsRef<Path>, file: &PpttcFile) -> Result<(), OutputError> {
    let path = path.as_ref();
    let unwritable = |reason: String| OutputError::OutputUnwritable {
        path: path.display().to_string(),
        reason,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| unwritable(e.to_string()))?;
        }
    }
    let json = to_ppttc_json(file).map_err(|e| unwritable(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| unwritable(e.to_string()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> YearRecords {
        let mut records = YearRecords::new();
        records.insert("2021", "Suffolk", 7.0);
        records.insert("2020", "Merino", 10.0);
        records.insert("2020", "Suffolk", 5.0);
        records.insert("2021", "Merino", 12.0);
        records.insert("2021", "Dorper", 0.25);
        records
    }

    #[test]
    fn cells_serialize_with_type_tags() {
        let json = serde_json::to_string(&vec![Cell::label("Type"), Cell::Number(5.0)]).unwrap();
        assert_eq!(json, r#"[{"string":"Type"},{"number":5.0}]"#);
    }

    #[test]
    fn table_has_header_spacer_and_category_rows() {
        let table = build_chart_table(&sample_records());
        assert_eq!(table.height(), 3 + 2);
        assert!(table.rows().iter().all(|row| row.len() == 3));
        assert_eq!(table.rows()[0], vec![Cell::label("Type"), Cell::label("2020"), Cell::label("2021")]);
        assert_eq!(table.rows()[1], vec![Cell::label(""); 3]);
        assert_eq!(table.categories(), vec!["Dorper", "Merino", "Suffolk"]);
        assert_eq!(table.value("Merino", "2021"), Some(12.0));
        assert_eq!(table.value("Dorper", "2021"), Some(0.25));
    }

    #[test]
    fn absent_category_is_zero() {
        let table = build_chart_table(&sample_records());
        assert_eq!(table.value("Dorper", "2020"), Some(0.0));
    }

    #[test]
    fn years_sort_numerically() {
        let mut records = YearRecords::new();
        records.insert("10", "Merino", 1.0);
        records.insert("9", "Merino", 2.0);
        let table = build_chart_table(&records);
        assert_eq!(table.years(), vec!["9", "10"]);
        assert_eq!(table.rows()[2], vec![Cell::label("Merino"), Cell::Number(2.0), Cell::Number(1.0)]);
    }

    #[test]
    fn empty_records_give_header_and_spacer_only() {
        let table = build_chart_table(&YearRecords::new());
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 1);
        assert_eq!(table.rows()[0], vec![Cell::label("Type")]);
        assert_eq!(table.rows()[1], vec![Cell::label("")]);
    }

    #[test]
    fn document_json_matches_ppttc_layout() {
        let mut records = YearRecords::new();
        records.insert("2020", "Merino", 10.0);
        let file = PpttcFile::from(build_chart_document(&records, "Herd_Growth.pptx", DEFAULT_CHART_NAME));
        let value: serde_json::Value = serde_json::from_str(&to_ppttc_json(&file).unwrap()).unwrap();
        let expected = serde_json::json!([
            {
                "template": "Herd_Growth.pptx",
                "data": [
                    {
                        "name": "Chart1",
                        "table": [
                            [{"string": "Type"}, {"string": "2020"}],
                            [{"string": ""}, {"string": ""}],
                            [{"string": "Merino"}, {"number": 10.0}]
                        ]
                    }
                ]
            }
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn json_uses_four_space_indent() {
        let file = PpttcFile::from(build_chart_document(&YearRecords::new(), "t.pptx", "Chart1"));
        let json = to_ppttc_json(&file).unwrap();
        assert!(json.starts_with("[\n    {\n        \"template\": \"t.pptx\""));
    }

    #[test]
    fn serialization_is_deterministic() {
        let first = to_ppttc_json(&PpttcFile::from(build_chart_document(&sample_records(), "t.pptx", "Chart1")));
        let second = to_ppttc_json(&PpttcFile::from(build_chart_document(&sample_records(), "t.pptx", "Chart1")));
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.ppttc");
        let file = PpttcFile::from(build_chart_document(&sample_records(), "t.pptx", "Chart1"));
        write_ppttc_file(&path, &file).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_ppttc_json(&file).unwrap());
    }
}
