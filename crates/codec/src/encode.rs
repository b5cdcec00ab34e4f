use crate::error::{ExcelError, Result};
use crate::schema::{Column, ColumnType};
use crate::style::Styles;
use crate::validation;
use rust_xlsxwriter::{Workbook, Worksheet};
use sheetmap_record::RecordFields;
use std::io::Write;
use tracing::error;

/// Name of the single sheet every encoded workbook contains.
pub const SHEET_NAME: &str = "Sheet1";

/// MIME type for a workbook served as a download.
pub const CONTENT_TYPE: &str = "application/vnd.ms-excel";

/// Build a header-only workbook: titles, styles, and data-validation
/// constraints, ready to be filled in by hand and decoded back.
pub fn create_template<R>(columns: &[Column<R>]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    write_header(worksheet, columns, &Styles::new(), 0)?;

    Ok(workbook.save_to_buffer()?)
}

/// Build a workbook holding `records`, one data row each, beneath the
/// header row (and an optional merged main-title row above it).
pub fn export<R: RecordFields>(
    records: &[R],
    columns: &[Column<R>],
    main_title: Option<&str>,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let styles = Styles::new();

    let header_row = match main_title {
        Some(title) if !title.trim().is_empty() => {
            write_main_title(worksheet, title, columns.len(), &styles)?;
            1
        }
        _ => 0,
    };

    write_header(worksheet, columns, &styles, header_row)?;

    for (index, record) in records.iter().enumerate() {
        let row = header_row + 1 + index as u32;
        write_record(worksheet, record, columns, &styles, row)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Stream workbook bytes to a sink, e.g. an HTTP response body. The caller
/// applies [`CONTENT_TYPE`] and [`content_disposition`] as headers.
pub fn write_attachment<W: Write>(bytes: &[u8], sink: &mut W) -> Result<()> {
    sink.write_all(bytes)?;
    sink.flush()?;
    Ok(())
}

/// The `Content-Disposition` header value for a workbook download.
#[must_use]
pub fn content_disposition(file_name: &str) -> String {
    format!("attachment; filename={file_name}")
}

/// Merged, centered, bold title cell spanning every column of row 0.
fn write_main_title(
    worksheet: &mut Worksheet,
    title: &str,
    column_count: usize,
    styles: &Styles,
) -> Result<()> {
    if column_count > 1 {
        worksheet.merge_range(0, 0, 0, (column_count - 1) as u16, title, &styles.main_title)?;
    } else {
        worksheet.write_string_with_format(0, 0, title, &styles.main_title)?;
    }
    Ok(())
}

/// Write the header row and install the per-column validation constraints
/// over the full data region.
fn write_header<R>(
    worksheet: &mut Worksheet,
    columns: &[Column<R>],
    styles: &Styles,
    header_row: u32,
) -> Result<()> {
    if columns.is_empty() {
        error!("refusing to build a workbook without columns");
        return Err(ExcelError::NoColumns);
    }

    for (index, column) in columns.iter().enumerate() {
        let col = index as u16;
        worksheet.write_string_with_format(header_row, col, column.title(), &styles.header)?;

        if column.column_type() == ColumnType::Text && column.choices().is_empty() {
            worksheet.set_column_format(col, &styles.text_column)?;
        }

        if let Some(plan) = validation::plan(column) {
            let prompt = validation::prompt_for(column.title(), &plan);
            validation::install(worksheet, col, header_row + 1, &plan, &prompt)?;
        }
    }

    Ok(())
}

/// Write one record as one data row; every cell gets the content style,
/// blank cells included.
fn write_record<R: RecordFields>(
    worksheet: &mut Worksheet,
    record: &R,
    columns: &[Column<R>],
    styles: &Styles,
    row: u32,
) -> Result<()> {
    for (index, column) in columns.iter().enumerate() {
        let col = index as u16;
        let property = column.property();

        if property.is_empty() {
            worksheet.write_blank(row, col, &styles.content)?;
            continue;
        }

        let value = match column.direct_value() {
            Some(value) => Some(value.clone()),
            None => record.get_field(property).map_err(|e| {
                error!(property, "failed to read record field: {e}");
                ExcelError::GetField {
                    property: property.to_string(),
                    detail: e.to_string(),
                }
            })?,
        };

        match value {
            Some(value) => {
                worksheet.write_string_with_format(row, col, value.to_string(), &styles.content)?;
            }
            None => {
                worksheet.write_blank(row, col, &styles.content)?;
            }
        }
    }

    Ok(())
}
