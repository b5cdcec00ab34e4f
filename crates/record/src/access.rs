use crate::value::FieldValue;
use indexmap::IndexMap;
use thiserror::Error;

/// Errors reported by a record accessor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("no field named '{0}'")]
    NotFound(String),

    #[error("field '{field}' cannot hold this value: {detail}")]
    Incompatible { field: String, detail: String },
}

/// Get/set capability over the named fields of a record.
///
/// Property paths are passed through verbatim; an implementation decides
/// whether a dotted path selects a nested value or is just an opaque key,
/// the way a map-shaped record treats it.
///
/// An absent value (`Ok(None)`) is not an error: it is a field the record
/// knows about but currently holds nothing for. [`FieldError::NotFound`] is
/// reserved for paths the record shape has no field for at all.
pub trait RecordFields {
    /// Read the field at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NotFound`] for a path the record shape does not
    /// have.
    fn get_field(&self, path: &str) -> Result<Option<FieldValue>, FieldError>;

    /// Write `value` into the field at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NotFound`] for an unknown path and
    /// [`FieldError::Incompatible`] when the field cannot hold the value.
    fn set_field(&mut self, path: &str, value: FieldValue) -> Result<(), FieldError>;
}

/// Map-shaped records: any path is a valid key, so a missing key is an
/// absent value and writes never fail.
impl RecordFields for IndexMap<String, FieldValue> {
    fn get_field(&self, path: &str) -> Result<Option<FieldValue>, FieldError> {
        Ok(self.get(path).cloned())
    }

    fn set_field(&mut self, path: &str, value: FieldValue) -> Result<(), FieldError> {
        self.insert(path.to_string(), value);
        Ok(())
    }
}
