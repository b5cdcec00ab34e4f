use crate::error::Result;
use crate::schema::{Column, ColumnType};
use rust_xlsxwriter::{DataValidation, DataValidationRule, ExcelDateTime, Worksheet};

/// Highest row index covered by a validation region, so rules apply to
/// every future data row regardless of how many rows exist at generation
/// time.
pub const ROW_CEILING: u32 = 10_000;

/// Fixed bounds for numeric columns; not schema-configurable.
const NUMBER_RANGE: (i32, i32) = (1, 65_535);
/// Fixed bounds for date columns; not schema-configurable.
const DATE_RANGE: ((u16, u8, u8), (u16, u8, u8)) = ((2000, 1, 1), (2999, 1, 1));

/// The validation rule a column asks for. An explicit choice list takes
/// precedence over every range/length constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintPlan {
    Choices(Vec<String>),
    TextLength { max: u32 },
    NumberRange,
    DateRange,
}

/// Decide which constraint (if any) a column gets.
pub(crate) fn plan<R>(column: &Column<R>) -> Option<ConstraintPlan> {
    if !column.choices().is_empty() {
        return Some(ConstraintPlan::Choices(column.choices().to_vec()));
    }

    match column.column_type() {
        ColumnType::Text => {
            let max = column.max().unwrap_or(255).clamp(1, i64::from(u32::MAX));
            Some(ConstraintPlan::TextLength { max: max as u32 })
        }
        ColumnType::Number(_) => Some(ConstraintPlan::NumberRange),
        ColumnType::Date(_) => Some(ConstraintPlan::DateRange),
        ColumnType::Decimal(_) | ColumnType::Boolean => None,
    }
}

/// The prompt tooltip text attached to a column's rule.
pub(crate) fn prompt_for(title: &str, plan: &ConstraintPlan) -> String {
    match plan {
        ConstraintPlan::Choices(_) => format!("{title} must be chosen from the list"),
        ConstraintPlan::TextLength { max } => {
            format!("{title} must be at most {max} characters")
        }
        ConstraintPlan::NumberRange => format!("{title} must be a number"),
        ConstraintPlan::DateRange => format!("{title} must be a date"),
    }
}

/// Install a validation rule over `first_data_row..=ROW_CEILING` of one
/// column. Backend errors propagate unchanged.
pub(crate) fn install(
    worksheet: &mut Worksheet,
    col: u16,
    first_data_row: u32,
    plan: &ConstraintPlan,
    prompt: &str,
) -> Result<()> {
    let validation = match plan {
        ConstraintPlan::Choices(values) => {
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            DataValidation::new().allow_list_strings(&values)?
        }
        ConstraintPlan::TextLength { max } => {
            DataValidation::new().allow_text_length(DataValidationRule::Between(1, *max))
        }
        ConstraintPlan::NumberRange => DataValidation::new()
            .allow_whole_number(DataValidationRule::Between(NUMBER_RANGE.0, NUMBER_RANGE.1)),
        ConstraintPlan::DateRange => {
            let ((y1, m1, d1), (y2, m2, d2)) = DATE_RANGE;
            DataValidation::new().allow_date(DataValidationRule::Between(
                ExcelDateTime::from_ymd(y1, m1, d1)?,
                ExcelDateTime::from_ymd(y2, m2, d2)?,
            ))
        }
    };

    let validation = validation
        .set_input_title("Tip")?
        .set_input_message(prompt)?;

    worksheet.add_data_validation(first_data_row, col, ROW_CEILING, col, &validation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DateKind, FloatWidth, IntWidth};
    use indexmap::IndexMap;
    use sheetmap_record::FieldValue;

    type MapRecord = IndexMap<String, FieldValue>;

    #[test]
    fn test_choices_take_precedence_over_text_length() {
        let column: Column<MapRecord> = Column::new("State", "state")
            .with_max(10)
            .with_choices(vec!["open", "closed"]);

        assert_eq!(
            plan(&column),
            Some(ConstraintPlan::Choices(vec![
                "open".to_string(),
                "closed".to_string()
            ]))
        );
    }

    #[test]
    fn test_type_constraints() {
        let text: Column<MapRecord> = Column::new("Name", "name").with_max(64);
        assert_eq!(plan(&text), Some(ConstraintPlan::TextLength { max: 64 }));

        let number: Column<MapRecord> = Column::new("Age", "age")
            .with_type(ColumnType::Number(IntWidth::I32));
        assert_eq!(plan(&number), Some(ConstraintPlan::NumberRange));

        let date: Column<MapRecord> =
            Column::new("Born", "born").with_type(ColumnType::Date(DateKind::Day));
        assert_eq!(plan(&date), Some(ConstraintPlan::DateRange));
    }

    #[test]
    fn test_decimal_and_boolean_get_no_constraint() {
        let decimal: Column<MapRecord> =
            Column::new("Score", "score").with_type(ColumnType::Decimal(FloatWidth::F64));
        assert_eq!(plan(&decimal), None);

        let boolean: Column<MapRecord> =
            Column::new("Active", "active").with_type(ColumnType::Boolean);
        assert_eq!(plan(&boolean), None);
    }

    #[test]
    fn test_text_length_defaults_to_255() {
        let column: Column<MapRecord> = Column::new("Note", "note");
        assert_eq!(plan(&column), Some(ConstraintPlan::TextLength { max: 255 }));
    }
}
