use thiserror::Error;

/// Errors that can occur while encoding or decoding a workbook.
///
/// Every variant carries a stable error code (see [`ExcelError::code`]) so
/// callers at the system boundary can translate failures into user-facing
/// responses without matching on variants.
#[derive(Error, Debug)]
pub enum ExcelError {
    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row}: cannot read '{column}' as a date")]
    ReadDate { row: usize, column: String },

    #[error("row {row}: '{column}' must not be empty")]
    ValueNull { row: usize, column: String },

    #[error("row {row}: '{column}' must be at most {max} characters")]
    ValueTooLong { row: usize, column: String, max: i64 },

    #[error("row {row}: cannot read '{column}' as a number")]
    ReadNumber { row: usize, column: String },

    #[error("row {row}: '{column}' must be at most {max}")]
    NumberTooLarge { row: usize, column: String, max: i64 },

    #[error("row {row}: '{column}' must be at least {min}")]
    NumberTooSmall { row: usize, column: String, min: i64 },

    #[error("cannot set field '{property}': {detail}")]
    SetField { property: String, detail: String },

    #[error("cannot read field '{property}': {detail}")]
    GetField { property: String, detail: String },

    #[error("'{file_name}' is not an Excel file")]
    FileNotExcel { file_name: String },

    #[error("field '{property}' does not exist")]
    FieldNotFound { property: String },

    #[error("no columns defined")]
    NoColumns,
}

impl ExcelError {
    /// The stable code identifying this failure category.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ExcelError::Internal(_) => "01000",
            ExcelError::Io(_) => "01001",
            ExcelError::ReadDate { .. } => "01002",
            ExcelError::ValueNull { .. } => "01003",
            ExcelError::ValueTooLong { .. } => "01004",
            ExcelError::ReadNumber { .. } => "01005",
            ExcelError::NumberTooLarge { .. } => "01006",
            ExcelError::NumberTooSmall { .. } => "01007",
            ExcelError::SetField { .. } => "01008",
            ExcelError::GetField { .. } => "01009",
            ExcelError::FileNotExcel { .. } => "01010",
            ExcelError::FieldNotFound { .. } => "01011",
            ExcelError::NoColumns => "01012",
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExcelError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ExcelError::Internal(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExcelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExcelError::Internal(String::new()).code(), "01000");
        assert_eq!(
            ExcelError::ValueNull {
                row: 1,
                column: "Name".to_string()
            }
            .code(),
            "01003"
        );
        assert_eq!(
            ExcelError::FileNotExcel {
                file_name: "a.txt".to_string()
            }
            .code(),
            "01010"
        );
        assert_eq!(ExcelError::NoColumns.code(), "01012");
    }

    #[test]
    fn test_messages_carry_context() {
        let err = ExcelError::NumberTooSmall {
            row: 4,
            column: "Age".to_string(),
            min: 1,
        };
        assert_eq!(err.to_string(), "row 4: 'Age' must be at least 1");
    }
}
