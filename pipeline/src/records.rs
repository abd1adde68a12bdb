use std::collections::HashMap;
use std::path::Path;
use itertools::Itertools;

use crate::errors::InputError;
use crate::utils::years::cmp_year_labels;

const YEAR_COLUMN: &str = "Year";

/// What to do with an empty category field in the input CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BlankCellPolicy {
    /// Treat the field as an invalid number.
    #[default]
    Reject,
    /// Leave the category out for that year; it is charted as zero.
    Zero,
}

/// Category values per year label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearRecords {
    by_year: HashMap<String, HashMap<String, f64>>,
}

impl YearRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single value, creating the year if needed.
    pub fn insert(&mut self, year: impl Into<String>, category: impl Into<String>, value: f64) {
        self.by_year.entry(year.into())
            .or_default()
            .insert(category.into(), value);
    }

    /// Replaces all values of a year. Returns the previous values, if any.
    pub fn insert_year(&mut self,
                       year: impl Into<String>,
                       values: HashMap<String, f64>) -> Option<HashMap<String, f64>> {
        self.by_year.insert(year.into(), values)
    }

    pub fn value(&self, year: &str, category: &str) -> Option<f64> {
        self.by_year.get(year)?.get(category).copied()
    }

    /// Year labels in chart order.
    pub fn years(&self) -> Vec<&str> {
        self.by_year.keys()
            .map(String::as_str)
            .sorted_by(|a, b| cmp_year_labels(a, b))
            .collect_vec()
    }

    /// Union of the categories of all years, sorted lexicographically.
    pub fn categories(&self) -> Vec<&str> {
        self.by_year.values()
            .flat_map(|values| values.keys())
            .map(String::as_str)
            .unique()
            .sorted()
            .collect_vec()
    }

    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}


pub fn load_year_records(path: impl AsRef<Path>,
                         blank_cells: BlankCellPolicy) -> Result<YearRecords, InputError> {
    let path = path.as_ref();
    log::info!("Reading year records from {}", path.display());
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InputError::InputNotFound {
            path: path.display().to_string()
        },
        _ => unreadable(path, e)
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(std::io::BufReader::new(file));
    let headers = reader.headers()
        .map_err(|e| unreadable(path, e))?
        .clone();
    let year_index = headers.iter()
        .position(|h| h == YEAR_COLUMN)
        .ok_or_else(|| InputError::MissingYearColumn { path: path.display().to_string() })?;
    for repeated in headers.iter().duplicates() {
        log::warn!("Column {} appears more than once; keeping the last value per row", repeated);
    }

    let mut records = YearRecords::new();
    for result in reader.records() {
        let record = result.map_err(|e| unreadable(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let year = record.get(year_index).unwrap_or_default().to_string();
        let mut values = HashMap::new();
        for (index, (column, field)) in headers.iter().zip(record.iter()).enumerate() {
            if index == year_index {
                continue;
            }
            if field.is_empty() && blank_cells == BlankCellPolicy::Zero {
                continue;
            }
            let value = parse_value(field).ok_or_else(|| InputError::InvalidNumber {
                path: path.display().to_string(),
                line,
                column: column.to_string(),
                value: field.to_string(),
            })?;
            values.insert(column.to_string(), value);
        }
        if records.insert_year(year.clone(), values).is_some() {
            log::warn!("Year {} appears more than once (line {}); keeping the last row", year, line);
        }
    }

    log::info!(
        "Loaded {} years and {} categories",
        records.len(),
        records.categories().len()
    );
    Ok(records)
}

fn parse_value(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn unreadable(path: &Path, error: impl std::fmt::Display) -> InputError {
    InputError::InputUnreadable {
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}
