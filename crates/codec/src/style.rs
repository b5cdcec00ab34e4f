use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};

/// Reusable cell styles, built once per encode call.
pub(crate) struct Styles {
    /// Header row: solid gray fill, white font, centered, thin gray border.
    pub header: Format,
    /// Main title row: bold, centered, bordered, no fill.
    pub main_title: Format,
    /// Data cells: bordered only.
    pub content: Format,
    /// Column default for text columns, forcing the `@` text format.
    pub text_column: Format,
}

impl Styles {
    pub(crate) fn new() -> Self {
        Styles {
            header: bordered(
                Format::new()
                    .set_background_color(Color::Gray)
                    .set_pattern(FormatPattern::Solid)
                    .set_font_color(Color::White)
                    .set_align(FormatAlign::Center),
            ),
            main_title: bordered(Format::new().set_bold().set_align(FormatAlign::Center)),
            content: bordered(Format::new()),
            text_column: Format::new().set_num_format("@"),
        }
    }
}

fn bordered(format: Format) -> Format {
    format
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::Gray)
}
