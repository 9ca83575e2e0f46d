//! Format-neutral tabular input.
//!
//! CSV files and spreadsheet workbooks are both read into a [`RawTable`]
//! of header names and cell rows, so validation only has to be written once.

use calamine::{Data, Reader, open_workbook_auto};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PayslipError, PayslipResult};

/// A single input cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value.
    Empty,
    /// A textual value, as typed.
    Text(String),
    /// A numeric value from a spreadsheet.
    Number(f64),
}

impl Cell {
    /// Returns the cell as display text.
    ///
    /// Integral numbers print without a fractional part, so a numeric
    /// employee id of `1001.0` reads back as `1001`.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }

    /// Coerces the cell to a decimal amount, if possible.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Decimal::from_str(s.trim())
                .or_else(|_| Decimal::from_scientific(s.trim()))
                .ok(),
            Cell::Number(n) => Decimal::from_f64(*n),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

/// Header names plus data rows, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names from the first row, whitespace-trimmed.
    pub headers: Vec<String>,
    /// Data rows; each row is padded to the header width.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Builds a table, trimming headers, padding short rows with
    /// [`Cell::Empty`] and dropping rows that are entirely blank.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .filter(|row| !row.iter().all(Cell::is_blank))
            .map(|mut row| {
                row.resize(width.max(row.len()), Cell::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Returns the index of the named column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Reads a CSV file with a header row.
pub fn read_csv(path: &Path) -> PayslipResult<RawTable> {
    let unreadable = |e: csv::Error| PayslipError::InputUnreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_path(path)
        .map_err(unreadable)?;

    let headers = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(unreadable)?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}

/// Reads the first worksheet of an Excel or OpenDocument workbook.
pub fn read_spreadsheet(path: &Path) -> PayslipResult<RawTable> {
    let path_str = path.display().to_string();

    let mut workbook = open_workbook_auto(path).map_err(|e| PayslipError::InputUnreadable {
        path: path_str.clone(),
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PayslipError::InputUnreadable {
            path: path_str.clone(),
            message: "workbook has no worksheets".to_string(),
        })?
        .map_err(|e| PayslipError::InputUnreadable {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| spreadsheet_cell(c).as_text()).collect(),
        None => Vec::new(),
    };
    let rows = rows
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn spreadsheet_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        other => Cell::Text(other.to_string()),
    }
}
