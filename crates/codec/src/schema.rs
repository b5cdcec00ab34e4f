use crate::cell::CellValue;
use crate::error::Result;
use sheetmap_record::FieldValue;
use std::fmt;
use std::sync::Arc;

/// Exact integer width a `Number` column narrows to on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
}

impl IntWidth {
    /// Narrow a raw cell number to this width. Out-of-range values saturate,
    /// a defined narrowing rather than an error.
    #[must_use]
    pub fn narrow(self, value: f64) -> FieldValue {
        match self {
            IntWidth::I8 => FieldValue::I8(value as i8),
            IntWidth::I16 => FieldValue::I16(value as i16),
            IntWidth::I32 => FieldValue::I32(value as i32),
            IntWidth::I64 => FieldValue::I64(value as i64),
        }
    }
}

/// Exact floating width a `Decimal` column narrows to on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    /// Narrow a raw cell number to this width.
    #[must_use]
    pub fn narrow(self, value: f64) -> FieldValue {
        match self {
            FloatWidth::F32 => FieldValue::F32(value as f32),
            FloatWidth::F64 => FieldValue::F64(value),
        }
    }
}

/// Whether a `Date` column decodes to a calendar date or a full date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    /// Truncate to the calendar date, dropping time-of-day.
    Day,
    /// Keep the full date-time.
    Timestamp,
}

/// Logical type of a column.
///
/// Dispatch during decode is a closed match over this enumeration; the
/// concrete numeric/date subtype is declared here rather than inferred from
/// the target record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Number(IntWidth),
    Decimal(FloatWidth),
    Date(DateKind),
    Boolean,
}

/// Custom per-cell decoder. When a column carries one, it replaces all
/// type-directed parsing for that column.
pub type DataHandler<R> = Arc<dyn Fn(&mut R, &CellValue) -> Result<()> + Send + Sync>;

/// Declarative description of one spreadsheet column bound to a record
/// field.
///
/// Column order in a schema list is column order on the sheet, zero-based.
/// No validation happens at construction time; everything is checked during
/// encode/decode where row and title context is available for error
/// messages.
pub struct Column<R> {
    title: String,
    property: String,
    ty: ColumnType,
    max: Option<i64>,
    min: Option<i64>,
    nullable: bool,
    direct_value: Option<FieldValue>,
    choices: Vec<String>,
    data_handler: Option<DataHandler<R>>,
}

impl<R> Column<R> {
    /// Create a text column with the default 255-character cap.
    #[must_use]
    pub fn new(title: &str, property: &str) -> Self {
        Column {
            title: title.to_string(),
            property: property.to_string(),
            ty: ColumnType::Text,
            max: Some(255),
            min: None,
            nullable: false,
            direct_value: None,
            choices: Vec::new(),
            data_handler: None,
        }
    }

    /// Set the logical type
    #[must_use]
    pub fn with_type(mut self, ty: ColumnType) -> Self {
        self.ty = ty;
        self
    }

    /// Set the upper bound (numeric value or text length)
    #[must_use]
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the lower bound
    #[must_use]
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Allow the cell to be empty on decode
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Use `value` for every data row instead of reading the record
    #[must_use]
    pub fn with_direct_value(mut self, value: FieldValue) -> Self {
        self.direct_value = Some(value);
        self
    }

    /// Restrict manual entry to an explicit drop-down list. A non-empty
    /// list replaces any range/length constraint for this column.
    #[must_use]
    pub fn with_choices<S: Into<String>>(mut self, choices: Vec<S>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Install a custom cell decoder, bypassing type-directed parsing
    #[must_use]
    pub fn with_data_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut R, &CellValue) -> Result<()> + Send + Sync + 'static,
    {
        self.data_handler = Some(Arc::new(handler));
        self
    }

    /// The header title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The property path resolved through the record accessor
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The logical type
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.ty
    }

    /// The upper bound, if any
    #[must_use]
    pub fn max(&self) -> Option<i64> {
        self.max
    }

    /// The lower bound, if any
    #[must_use]
    pub fn min(&self) -> Option<i64> {
        self.min
    }

    /// Whether an empty cell is allowed on decode
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The fixed per-row value override, if any
    #[must_use]
    pub fn direct_value(&self) -> Option<&FieldValue> {
        self.direct_value.as_ref()
    }

    /// The drop-down list values
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// The custom cell decoder, if any
    #[must_use]
    pub fn data_handler(&self) -> Option<&DataHandler<R>> {
        self.data_handler.as_ref()
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .field("property", &self.property)
            .field("ty", &self.ty)
            .field("max", &self.max)
            .field("min", &self.min)
            .field("nullable", &self.nullable)
            .field("direct_value", &self.direct_value)
            .field("choices", &self.choices)
            .field("data_handler", &self.data_handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    type MapRecord = IndexMap<String, FieldValue>;

    #[test]
    fn test_defaults() {
        let column: Column<MapRecord> = Column::new("Name", "name");
        assert_eq!(column.column_type(), ColumnType::Text);
        assert_eq!(column.max(), Some(255));
        assert_eq!(column.min(), None);
        assert!(!column.is_nullable());
        assert!(column.choices().is_empty());
        assert!(column.data_handler().is_none());
    }

    #[test]
    fn test_fluent_builders() {
        let column: Column<MapRecord> = Column::new("Age", "age")
            .with_type(ColumnType::Number(IntWidth::I32))
            .with_min(1)
            .with_max(120)
            .with_nullable(true);

        assert_eq!(column.column_type(), ColumnType::Number(IntWidth::I32));
        assert_eq!(column.min(), Some(1));
        assert_eq!(column.max(), Some(120));
        assert!(column.is_nullable());
    }

    #[test]
    fn test_narrowing_saturates() {
        assert_eq!(IntWidth::I8.narrow(300.0), FieldValue::I8(i8::MAX));
        assert_eq!(IntWidth::I8.narrow(-300.0), FieldValue::I8(i8::MIN));
        assert_eq!(IntWidth::I32.narrow(42.9), FieldValue::I32(42));
        assert_eq!(FloatWidth::F32.narrow(2.5), FieldValue::F32(2.5));
    }
}
