//! Employee roster loading and validation.

use std::path::Path;
use tracing::{debug, info};

use crate::error::{PayslipError, PayslipResult};
use crate::models::{EmployeeRecord, REQUIRED_COLUMNS};

use super::table::{RawTable, read_csv, read_spreadsheet};

/// Amount columns, in the order they are validated.
pub const AMOUNT_COLUMNS: [&str; 3] = ["Basic Salary", "Allowances", "Deductions"];

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loads every employee record from a CSV file or spreadsheet.
///
/// The format is chosen from the file extension. The load is
/// all-or-nothing: a missing column or any non-numeric amount rejects the
/// whole input.
///
/// # Errors
///
/// - [`PayslipError::UnsupportedInput`] for an unknown extension
/// - [`PayslipError::InputUnreadable`] if the file cannot be read
/// - [`PayslipError::MissingColumns`] naming every absent required column
/// - [`PayslipError::InvalidValues`] for the first amount column holding
///   blank or non-numeric cells, with the number of such cells
pub fn load_employees<P: AsRef<Path>>(path: P) -> PayslipResult<Vec<EmployeeRecord>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let table = if extension == "csv" {
        read_csv(path)?
    } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        read_spreadsheet(path)?
    } else {
        return Err(PayslipError::UnsupportedInput {
            path: path.display().to_string(),
        });
    };

    let records = employees_from_table(&table)?;
    info!(path = %path.display(), records = records.len(), "Loaded employee data");
    Ok(records)
}

/// Validates a raw table and converts its rows to employee records.
///
/// # Example
///
/// ```
/// use payslip_mailer::roster::{Cell, RawTable, employees_from_table};
/// use payslip_mailer::error::PayslipError;
///
/// let table = RawTable::new(
///     vec!["Employee ID".into(), "Name".into(), "Email".into()],
///     vec![vec![Cell::Text("E1".into()), Cell::Text("Jane".into()), Cell::Empty]],
/// );
///
/// match employees_from_table(&table) {
///     Err(PayslipError::MissingColumns { columns }) => {
///         assert_eq!(columns, vec!["Basic Salary", "Allowances", "Deductions"]);
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
pub fn employees_from_table(table: &RawTable) -> PayslipResult<Vec<EmployeeRecord>> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PayslipError::MissingColumns { columns: missing });
    }

    // Every required column is present past this point.
    let index = |name: &str| table.column(name).unwrap_or_default();
    let (id_col, name_col, email_col) = (index("Employee ID"), index("Name"), index("Email"));
    let amount_cols = AMOUNT_COLUMNS.map(index);

    let mut amounts = vec![[rust_decimal::Decimal::ZERO; 3]; table.rows.len()];
    for (slot, (&column, &col_idx)) in AMOUNT_COLUMNS.iter().zip(amount_cols.iter()).enumerate() {
        let mut invalid = 0;
        for (row_idx, row) in table.rows.iter().enumerate() {
            match row[col_idx].as_decimal() {
                Some(value) => amounts[row_idx][slot] = value,
                None => invalid += 1,
            }
        }
        if invalid > 0 {
            return Err(PayslipError::InvalidValues {
                column: column.to_string(),
                count: invalid,
            });
        }
        debug!(column, "Validated amount column");
    }

    Ok(table
        .rows
        .iter()
        .zip(amounts)
        .map(|(row, [basic_salary, allowances, deductions])| EmployeeRecord {
            employee_id: row[id_col].as_text(),
            name: row[name_col].as_text(),
            email: row[email_col].as_text(),
            basic_salary,
            allowances,
            deductions,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Cell;
    use rust_decimal::Decimal;
    use std::io::Write;

    fn text(s: &str) -> Cell {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|c| text(c)).collect()).collect(),
        )
    }

    const HEADERS: [&str; 6] = REQUIRED_COLUMNS;

    #[test]
    fn test_valid_table_loads_in_order() {
        let t = table(
            &HEADERS,
            &[
                &["E1", "Jane", "jane@example.com", "5000", "250", "120.50"],
                &["E2", "John", "john@example.com", "4000", "0", "0"],
            ],
        );

        let records = employees_from_table(&t).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id, "E1");
        assert_eq!(records[0].deductions, Decimal::new(12050, 2));
        assert_eq!(records[1].name, "John");
    }

    #[test]
    fn test_column_order_and_extra_columns_do_not_matter() {
        let t = table(
            &["Deductions", "Department", "Email", "Name", "Allowances", "Employee ID", "Basic Salary"],
            &[&["10", "Ops", "a@example.com", "Ann", "5", "E9", "100"]],
        );

        let records = employees_from_table(&t).unwrap();
        assert_eq!(records[0].employee_id, "E9");
        assert_eq!(records[0].basic_salary, Decimal::from(100));
        assert_eq!(records[0].deductions, Decimal::from(10));
    }

    #[test]
    fn test_missing_columns_are_named_exactly() {
        let t = table(&["Employee ID", "Name", "Basic Salary", "Deductions"], &[]);

        match employees_from_table(&t) {
            Err(PayslipError::MissingColumns { columns }) => {
                assert_eq!(columns, vec!["Email", "Allowances"]);
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_amounts_are_counted() {
        let t = table(
            &HEADERS,
            &[
                &["E1", "Jane", "jane@example.com", "5000", "abc", "0"],
                &["E2", "John", "john@example.com", "4000", "", "0"],
                &["E3", "Jo", "jo@example.com", "4000", "12", "0"],
            ],
        );

        match employees_from_table(&t) {
            Err(PayslipError::InvalidValues { column, count }) => {
                assert_eq!(column, "Allowances");
                assert_eq!(count, 2);
            }
            other => panic!("Expected InvalidValues, got {:?}", other),
        }
    }

    #[test]
    fn test_first_invalid_column_is_reported() {
        let t = table(
            &HEADERS,
            &[&["E1", "Jane", "jane@example.com", "x", "y", "z"]],
        );

        match employees_from_table(&t) {
            Err(PayslipError::InvalidValues { column, count }) => {
                assert_eq!(column, "Basic Salary");
                assert_eq!(count, 1);
            }
            other => panic!("Expected InvalidValues, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_email_is_kept_for_per_record_handling() {
        let t = table(&HEADERS, &[&["E1", "Jane", "", "5000", "0", "0"]]);

        let records = employees_from_table(&t).unwrap();
        assert!(!records[0].has_email());
    }

    #[test]
    fn test_load_employees_from_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "Employee ID,Name,Email,Basic Salary,Allowances,Deductions\n\
             E1,Jane Doe,jane@example.com,5000.00,250.00,120.50"
        )
        .unwrap();

        let records = load_employees(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jane Doe");
    }

    #[test]
    fn test_load_employees_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let result = load_employees(file.path());
        assert!(matches!(result, Err(PayslipError::UnsupportedInput { .. })));
    }
}
