//! Record model for sheetmap
//!
//! A record is any value whose named fields can be read and written through
//! the [`RecordFields`] capability. The codec crate never assumes a concrete
//! record representation: map-shaped records get a ready-made implementation
//! on [`IndexMap`](indexmap::IndexMap), and struct-shaped records implement
//! the trait by hand, matching each property path to a field.
//!
//! # Examples
//!
//! ## Map-shaped records
//!
//! ```
//! use indexmap::IndexMap;
//! use sheetmap_record::{FieldValue, RecordFields};
//!
//! let mut record: IndexMap<String, FieldValue> = IndexMap::new();
//! record.set_field("name", FieldValue::from("Alice")).unwrap();
//! record.set_field("age", FieldValue::I32(30)).unwrap();
//!
//! let age = record.get_field("age").unwrap();
//! assert_eq!(age.and_then(|v| v.as_i64()), Some(30));
//! assert!(record.get_field("missing").unwrap().is_none());
//! ```
//!
//! ## Struct-shaped records
//!
//! ```
//! use sheetmap_record::{FieldError, FieldValue, RecordFields};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl RecordFields for Person {
//!     fn get_field(&self, path: &str) -> Result<Option<FieldValue>, FieldError> {
//!         match path {
//!             "name" => Ok(Some(FieldValue::from(self.name.as_str()))),
//!             "age" => Ok(Some(FieldValue::I32(self.age))),
//!             _ => Err(FieldError::NotFound(path.to_string())),
//!         }
//!     }
//!
//!     fn set_field(&mut self, path: &str, value: FieldValue) -> Result<(), FieldError> {
//!         match path {
//!             "name" => self.name = value.to_string(),
//!             "age" => self.age = value.as_i64().ok_or_else(|| FieldError::Incompatible {
//!                 field: path.to_string(),
//!                 detail: "expected a number".to_string(),
//!             })? as i32,
//!             _ => return Err(FieldError::NotFound(path.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod access;
mod value;

/// Re-export the accessor capability and its error type.
pub use access::{FieldError, RecordFields};
/// Re-export the dynamic field value type and its fixed date patterns.
pub use value::{FieldValue, DATE_PATTERN, DATE_TIME_PATTERN};
