use calamine::{Data, Range};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A decoded cell value, normalized from either spreadsheet format.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Check if the cell holds no value
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The cell content as a string
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::DateTime(dt) => dt.to_string(),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Null,
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                CellValue::Text(s.clone())
            }
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => CellValue::DateTime(naive),
                // A serial the backend cannot place on the calendar;
                // keep the raw number so the caller sees something.
                None => CellValue::Float(dt.as_f64()),
            },
            Data::Error(e) => CellValue::Text(format!("#ERROR: {e:?}")),
        }
    }
}

/// Convert an Excel serial date (days since 1899-12-30) to a date-time.
#[must_use]
pub(crate) fn date_time_from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let days = serial.trunc() as i64;
    let secs = ((serial - serial.trunc()) * 86_400.0).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    epoch
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(secs))
}

/// One sheet's worth of decoded cells, row-major, with the first stored row
/// being the header row. `first_row` records where on the sheet the stored
/// rows start, so row numbers in error reports stay absolute.
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    rows: Vec<Vec<CellValue>>,
    first_row: usize,
}

impl SheetData {
    /// Create a sheet from already-decoded rows starting at sheet row 0
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        SheetData { rows, first_row: 0 }
    }

    /// Build a sheet from a calamine cell range, re-applying the range's
    /// column offset so schema indexes stay zero-based, and keeping its row
    /// offset so error reports use absolute sheet rows.
    #[must_use]
    pub(crate) fn from_range(range: &Range<Data>) -> Self {
        let (start_row, start_col) = range
            .start()
            .map_or((0, 0), |(row, col)| (row as usize, col as usize));

        let rows = range
            .rows()
            .map(|row| {
                let mut cells = vec![CellValue::Null; start_col];
                cells.extend(row.iter().map(CellValue::from));
                cells
            })
            .collect();

        SheetData {
            rows,
            first_row: start_row,
        }
    }

    /// All rows, header row included
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Absolute sheet index of the first stored row
    #[must_use]
    pub fn first_row(&self) -> usize {
        self.first_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_conversion() {
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Null);
        assert_eq!(CellValue::from(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(CellValue::from(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(
            CellValue::from(&Data::String("hi".to_string())),
            CellValue::Text("hi".to_string())
        );
    }

    #[test]
    fn test_serial_conversion() {
        // 2024-03-01 is serial 45352 in the 1900 date system
        let dt = date_time_from_serial(45352.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let noon = date_time_from_serial(45352.5).unwrap();
        assert_eq!(noon.time(), chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        assert!(date_time_from_serial(-1.0).is_none());
        assert!(date_time_from_serial(f64::NAN).is_none());
    }

    #[test]
    fn test_range_offsets_are_reapplied() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 1));
        range.set_value((2, 1), Data::String("Name".to_string()));
        range.set_value((3, 1), Data::String("Alice".to_string()));

        let sheet = SheetData::from_range(&range);

        assert_eq!(sheet.first_row(), 2);
        assert_eq!(sheet.rows()[0][0], CellValue::Null);
        assert_eq!(sheet.rows()[0][1], CellValue::Text("Name".to_string()));
        assert_eq!(sheet.rows()[1][1], CellValue::Text("Alice".to_string()));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(CellValue::Null.to_text(), "");
        assert_eq!(CellValue::Int(42).to_text(), "42");
        assert_eq!(CellValue::Text("x".to_string()).to_text(), "x");
    }
}
