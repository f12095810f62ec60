//! Fixed page geometry of the statement document, in millimetres.

use serde::{Deserialize, Serialize};

/// Millimetres per typographic point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self(255, 255, 255);
}

/// Horizontal alignment inside a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    /// Flush left after padding.
    Left,
    /// Flush right before padding.
    Right,
}

/// Page geometry and table styling. Fixed configuration, never derived from content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLayout {
    /// Page width.
    pub page_width: f64,
    /// Page height.
    pub page_height: f64,
    /// Left edge of the header block.
    pub header_x: f64,
    /// Baseline of the first header line.
    pub header_y: f64,
    /// Header line spacing unit.
    pub line_spacing: f64,
    /// Extra indent of the summary lines.
    pub summary_indent: f64,
    /// Title font size, points.
    pub title_font_size: f64,
    /// Header body font size, points.
    pub header_font_size: f64,
    /// Gap between the last header line and the table.
    pub table_gap: f64,
    /// Left page margin of the table.
    pub margin_left: f64,
    /// Right page margin of the table.
    pub margin_right: f64,
    /// Table column widths: receipt, date, type, detail, amount.
    pub column_widths: [f64; 5],
    /// Table column alignment.
    pub column_align: [Align; 5],
    /// Table font size, points.
    pub table_font_size: f64,
    /// Cell padding on every side.
    pub cell_padding: f64,
    /// Line height as a multiple of the font size.
    pub line_height_factor: f64,
    /// Header row fill.
    pub head_fill: Rgb,
    /// Header row text colour.
    pub head_text: Rgb,
    /// Body text colour.
    pub body_text: Rgb,
    /// Grid line colour.
    pub grid_color: Rgb,
    /// Grid line width.
    pub grid_line_width: f64,
    /// Top of the table on continuation pages.
    pub continuation_top: f64,
    /// Lowest point rows may reach, measured from the page bottom.
    pub bottom_margin: f64,
}

impl ExportLayout {
    /// US Letter portrait with the statement's table geometry.
    #[must_use]
    pub fn letter() -> Self {
        Self {
            page_width: 215.9,
            page_height: 279.4,
            header_x: 35.0,
            header_y: 115.0,
            line_spacing: 5.0,
            summary_indent: 2.0,
            title_font_size: 12.0,
            header_font_size: 10.0,
            table_gap: 10.0,
            margin_left: 30.0,
            margin_right: 30.0,
            column_widths: [15.0, 20.0, 15.0, 85.0, 20.0],
            column_align: [Align::Left, Align::Left, Align::Left, Align::Left, Align::Right],
            table_font_size: 8.0,
            cell_padding: 1.5,
            line_height_factor: 1.15,
            head_fill: Rgb(7, 107, 140),
            head_text: Rgb::WHITE,
            body_text: Rgb(20, 20, 20),
            grid_color: Rgb(200, 200, 200),
            grid_line_width: 0.1,
            continuation_top: 15.0,
            bottom_margin: 15.0,
        }
    }

    /// Height of one text line in a table cell.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.table_font_size * self.line_height_factor * MM_PER_PT
    }

    /// Height of a row holding `lines` lines of text.
    #[must_use]
    pub fn row_height(&self, lines: usize) -> f64 {
        let lines = u32::try_from(lines.max(1)).unwrap_or(u32::MAX);
        f64::from(lines) * self.line_height() + 2.0 * self.cell_padding
    }

    /// Usable text width inside a column.
    #[must_use]
    pub fn text_width(&self, column: usize) -> f64 {
        self.column_widths[column] - 2.0 * self.cell_padding
    }

    /// Left edge of a column.
    #[must_use]
    pub fn column_left(&self, column: usize) -> f64 {
        self.margin_left + self.column_widths[..column].iter().sum::<f64>()
    }

    /// Total table width.
    #[must_use]
    pub fn table_width(&self) -> f64 {
        self.column_widths.iter().sum()
    }

    /// Lowest y a row may extend to.
    #[must_use]
    pub fn body_bottom(&self) -> f64 {
        self.page_height - self.bottom_margin
    }

    /// Offset from a line's top to its baseline.
    #[must_use]
    pub fn baseline_offset(&self) -> f64 {
        self.line_height() * 0.78
    }
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self::letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_fits_between_margins() {
        let layout = ExportLayout::letter();
        assert!(layout.table_width() <= layout.page_width - layout.margin_left - layout.margin_right);
        assert!((layout.margin_left - layout.margin_right).abs() < f64::EPSILON);
    }

    #[test]
    fn test_column_geometry() {
        let layout = ExportLayout::letter();
        assert!((layout.column_left(3) - 80.0).abs() < 1e-9);
        assert!((layout.text_width(3) - 82.0).abs() < 1e-9);
    }

    #[test]
    fn test_row_height_grows_with_lines() {
        let layout = ExportLayout::letter();
        assert!(layout.row_height(3) > layout.row_height(1));
        assert!((layout.row_height(0) - layout.row_height(1)).abs() < f64::EPSILON);
    }
}
