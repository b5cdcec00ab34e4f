//! Schema-driven spreadsheet codec
//!
//! One declarative list of [`Column`]s drives both directions of the
//! mapping between records and binary workbooks:
//!
//! - [`create_template`] builds a workbook with styled headers and live
//!   data-validation constraints (drop-down lists, length/numeric/date
//!   range checks), ready to be filled in by hand.
//! - [`export`] additionally writes one data row per record.
//! - [`read`] / [`read_sheet`] decode a user-edited workbook back into
//!   typed records with type-directed cell parsing and fail-fast
//!   validation.
//!
//! Records are addressed only through the
//! [`RecordFields`](sheetmap_record::RecordFields) capability, so the
//! codec works with map-shaped and struct-shaped records alike.
//!
//! # Examples
//!
//! ```
//! use indexmap::IndexMap;
//! use sheetmap_codec::{export, read, Column, ColumnType, IntWidth};
//! use sheetmap_record::{FieldValue, RecordFields};
//! use std::io::Cursor;
//!
//! type MapRecord = IndexMap<String, FieldValue>;
//!
//! let columns: Vec<Column<MapRecord>> = vec![
//!     Column::new("Name", "name"),
//!     Column::new("Age", "age").with_type(ColumnType::Number(IntWidth::I32)),
//! ];
//!
//! let mut alice = MapRecord::new();
//! alice.set_field("name", FieldValue::from("Alice")).unwrap();
//! alice.set_field("age", FieldValue::I32(30)).unwrap();
//!
//! let bytes = export(&[alice], &columns, None).unwrap();
//! let decoded: Vec<MapRecord> = read("people.xlsx", Cursor::new(bytes), &columns).unwrap();
//!
//! assert_eq!(decoded.len(), 1);
//! assert_eq!(
//!     decoded[0].get_field("age").unwrap().and_then(|v| v.as_i64()),
//!     Some(30)
//! );
//! ```

mod cell;
mod decode;
mod encode;
mod error;
mod schema;
mod style;
mod validation;

/// Re-export the decoded cell and sheet types.
pub use cell::{CellValue, SheetData};
/// Re-export the decoder entry points.
pub use decode::{read, read_sheet};
/// Re-export the encoder entry points and attachment helpers.
pub use encode::{
    content_disposition, create_template, export, write_attachment, CONTENT_TYPE, SHEET_NAME,
};
/// Re-export the error taxonomy.
pub use error::{ExcelError, Result};
/// Re-export the column schema types.
pub use schema::{Column, ColumnType, DataHandler, DateKind, FloatWidth, IntWidth};
/// Re-export the validation region ceiling.
pub use validation::ROW_CEILING;
