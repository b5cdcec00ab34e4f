use crate::cell::{date_time_from_serial, CellValue, SheetData};
use crate::error::{ExcelError, Result};
use crate::schema::{Column, ColumnType, DateKind};
use calamine::{Reader, Xls, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use sheetmap_record::{FieldError, FieldValue, RecordFields, DATE_PATTERN, DATE_TIME_PATTERN};
use std::io::{Read, Seek};
use std::path::Path;
use tracing::error;

/// Decode an uploaded workbook into records.
///
/// The concrete format is resolved from the file extension: `.xlsx` takes
/// the modern path, `.xls` the legacy path, anything else fails with
/// [`ExcelError::FileNotExcel`]. Only the first sheet is read and its
/// header row is skipped.
pub fn read<R, RS>(file_name: &str, source: RS, columns: &[Column<R>]) -> Result<Vec<R>>
where
    R: RecordFields + Default,
    RS: Read + Seek,
{
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let sheet = match extension.as_deref() {
        Some("xlsx") => {
            let workbook = Xlsx::new(source).map_err(into_io)?;
            first_sheet(workbook)?
        }
        Some("xls") => {
            let workbook = Xls::new(source).map_err(into_io)?;
            first_sheet(workbook)?
        }
        _ => {
            error!(file_name, "refusing to decode a non-Excel file");
            return Err(ExcelError::FileNotExcel {
                file_name: file_name.to_string(),
            });
        }
    };

    read_sheet(&sheet, columns)
}

/// Decode an already-loaded sheet into records, one per data row.
///
/// The first stored row is the header and is always skipped; rows in error
/// reports are absolute sheet indexes. Decoding is fail-fast: the first
/// violated constraint aborts the whole call and no partial list is
/// returned.
pub fn read_sheet<R>(sheet: &SheetData, columns: &[Column<R>]) -> Result<Vec<R>>
where
    R: RecordFields + Default,
{
    if columns.is_empty() {
        return Err(ExcelError::NoColumns);
    }

    let mut records = Vec::new();
    for (row_index, cells) in sheet.rows().iter().enumerate().skip(1) {
        records.push(decode_row(cells, sheet.first_row() + row_index, columns)?);
    }

    Ok(records)
}

/// Wrap a backend open/read failure the way an I/O fault is reported.
fn into_io<E: std::error::Error>(e: E) -> ExcelError {
    ExcelError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

/// Pull the first sheet out of an opened workbook, whichever format it is.
fn first_sheet<RS, WB>(mut workbook: WB) -> Result<SheetData>
where
    RS: Read + Seek,
    WB: Reader<RS>,
    WB::Error: std::error::Error,
{
    match workbook.worksheet_range_at(0) {
        Some(range) => Ok(SheetData::from_range(&range.map_err(into_io)?)),
        None => Err(ExcelError::Internal("workbook has no sheets".to_string())),
    }
}

fn decode_row<R>(cells: &[CellValue], row: usize, columns: &[Column<R>]) -> Result<R>
where
    R: RecordFields + Default,
{
    let mut record = R::default();

    for (index, column) in columns.iter().enumerate() {
        let title = column.title();
        let cell = cells.get(index).unwrap_or(&CellValue::Null);

        if cell.is_null() {
            if column.is_nullable() {
                continue;
            }

            error!(row, title, "required cell is empty");
            return Err(ExcelError::ValueNull {
                row,
                column: title.to_string(),
            });
        }

        if let Some(handler) = column.data_handler() {
            handler(&mut record, cell)?;
            continue;
        }

        let value = decode_cell(cell, row, column)?;
        set_field(&mut record, column.property(), value)?;
    }

    Ok(record)
}

/// Type-directed parse of one cell, a closed match over the column type.
fn decode_cell<R>(cell: &CellValue, row: usize, column: &Column<R>) -> Result<FieldValue> {
    match column.column_type() {
        ColumnType::Boolean => Ok(FieldValue::Bool(parse_bool(cell))),
        ColumnType::Number(width) => {
            let value = bounded_number(cell, row, column)?;
            Ok(width.narrow(value))
        }
        ColumnType::Decimal(width) => {
            let value = bounded_number(cell, row, column)?;
            Ok(width.narrow(value))
        }
        ColumnType::Text => {
            let text = cell.to_text();
            if let Some(max) = column.max() {
                if text.chars().count() as i64 > max {
                    error!(row, title = column.title(), max, "text value too long");
                    return Err(ExcelError::ValueTooLong {
                        row,
                        column: column.title().to_string(),
                        max,
                    });
                }
            }
            Ok(FieldValue::Text(text))
        }
        ColumnType::Date(kind) => {
            let date_time = parse_date_time(cell, row, column)?;
            Ok(match kind {
                DateKind::Timestamp => FieldValue::DateTime(date_time),
                DateKind::Day => FieldValue::Date(date_time.date()),
            })
        }
    }
}

/// True iff the cell is a boolean cell holding true, or a string equal to
/// an affirmative token or literal `true`.
fn parse_bool(cell: &CellValue) -> bool {
    match cell {
        CellValue::Bool(b) => *b,
        other => {
            let text = other.to_text();
            text == "true" || text == "yes"
        }
    }
}

/// Read a numeric cell value and enforce the column's min/max bounds.
fn bounded_number<R>(cell: &CellValue, row: usize, column: &Column<R>) -> Result<f64> {
    let value = match cell {
        CellValue::Int(i) => *i as f64,
        CellValue::Float(f) => *f,
        CellValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            error!(row, title = column.title(), "cell is not a number");
            ExcelError::ReadNumber {
                row,
                column: column.title().to_string(),
            }
        })?,
        _ => {
            error!(row, title = column.title(), "cell is not a number");
            return Err(ExcelError::ReadNumber {
                row,
                column: column.title().to_string(),
            });
        }
    };

    if let Some(max) = column.max() {
        if value > max as f64 {
            return Err(ExcelError::NumberTooLarge {
                row,
                column: column.title().to_string(),
                max,
            });
        }
    }

    if let Some(min) = column.min() {
        if value < min as f64 {
            return Err(ExcelError::NumberTooSmall {
                row,
                column: column.title().to_string(),
                min,
            });
        }
    }

    Ok(value)
}

/// Read a date cell: a native date, a raw serial number, or a string in
/// one of the two fixed patterns.
fn parse_date_time<R>(cell: &CellValue, row: usize, column: &Column<R>) -> Result<NaiveDateTime> {
    let parsed = match cell {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Float(f) => date_time_from_serial(*f),
        CellValue::Int(i) => date_time_from_serial(*i as f64),
        CellValue::Text(s) => {
            let s = s.trim();
            NaiveDateTime::parse_from_str(s, DATE_TIME_PATTERN)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(s, DATE_PATTERN)
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
        }
        _ => None,
    };

    parsed.ok_or_else(|| {
        error!(row, title = column.title(), "cell is not a date");
        ExcelError::ReadDate {
            row,
            column: column.title().to_string(),
        }
    })
}

/// Write the decoded value back into the record, mapping accessor failures
/// onto the error taxonomy.
fn set_field<R: RecordFields>(record: &mut R, property: &str, value: FieldValue) -> Result<()> {
    record.set_field(property, value).map_err(|e| {
        error!(property, "failed to set record field: {e}");
        match e {
            FieldError::NotFound(_) => ExcelError::FieldNotFound {
                property: property.to_string(),
            },
            FieldError::Incompatible { .. } => ExcelError::SetField {
                property: property.to_string(),
                detail: e.to_string(),
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IntWidth;
    use indexmap::IndexMap;

    type MapRecord = IndexMap<String, FieldValue>;

    fn text_cell(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_error_rows_are_absolute_when_used_range_starts_low() {
        let columns: Vec<Column<MapRecord>> = vec![Column::new("Name", "name")];

        // Used range starts at sheet row 3; row 5 is empty inside it.
        let mut range: calamine::Range<calamine::Data> = calamine::Range::new((3, 0), (5, 0));
        range.set_value((3, 0), calamine::Data::String("Name".to_string()));
        range.set_value((4, 0), calamine::Data::String("Alice".to_string()));

        let sheet = SheetData::from_range(&range);
        let err = read_sheet::<MapRecord>(&sheet, &columns).unwrap_err();

        assert!(matches!(err, ExcelError::ValueNull { row: 5, .. }));
    }

    #[test]
    fn test_parse_bool_tokens() {
        assert!(parse_bool(&CellValue::Bool(true)));
        assert!(parse_bool(&text_cell("true")));
        assert!(parse_bool(&text_cell("yes")));
        assert!(!parse_bool(&text_cell("no")));
        assert!(!parse_bool(&text_cell("TRUE")));
        assert!(!parse_bool(&CellValue::Null));
    }

    #[test]
    fn test_bounded_number_sources() {
        let column: Column<MapRecord> =
            Column::new("Age", "age").with_type(ColumnType::Number(IntWidth::I32));

        assert_eq!(bounded_number(&CellValue::Int(7), 1, &column).unwrap(), 7.0);
        assert_eq!(
            bounded_number(&CellValue::Float(2.5), 1, &column).unwrap(),
            2.5
        );
        assert_eq!(
            bounded_number(&text_cell(" 42 "), 1, &column).unwrap(),
            42.0
        );

        let err = bounded_number(&text_cell("abc"), 3, &column).unwrap_err();
        assert!(matches!(err, ExcelError::ReadNumber { row: 3, .. }));
    }

    #[test]
    fn test_date_sources() {
        let column: Column<MapRecord> =
            Column::new("Born", "born").with_type(ColumnType::Date(DateKind::Day));

        let from_text = parse_date_time(&text_cell("2024-03-01"), 1, &column).unwrap();
        assert_eq!(from_text.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let from_stamp = parse_date_time(&text_cell("2024-03-01 13:45:09"), 1, &column).unwrap();
        assert_eq!(from_stamp.time(), chrono::NaiveTime::from_hms_opt(13, 45, 9).unwrap());

        let from_serial = parse_date_time(&CellValue::Float(45352.0), 1, &column).unwrap();
        assert_eq!(from_serial.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let err = parse_date_time(&text_cell("not a date"), 2, &column).unwrap_err();
        assert!(matches!(err, ExcelError::ReadDate { row: 2, .. }));
    }

    #[test]
    fn test_text_length_enforced() {
        let column: Column<MapRecord> = Column::new("Code", "code").with_max(3);

        assert_eq!(
            decode_cell(&text_cell("abc"), 1, &column).unwrap(),
            FieldValue::Text("abc".to_string())
        );

        let err = decode_cell(&text_cell("abcd"), 1, &column).unwrap_err();
        assert!(matches!(err, ExcelError::ValueTooLong { max: 3, .. }));
    }
}
