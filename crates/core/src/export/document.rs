//! Export projection: ledger computation to laid-out pages.

use statement_shared::types::format_amount;

use super::error::ExportError;
use super::layout::{Align, ExportLayout, Rgb};
use super::metrics::text_width_mm;
use super::wrap::wrap_text;
use crate::assets::TemplateImage;
use crate::ledger::LedgerComputation;
use crate::statement::{NOT_AVAILABLE, StatementPeriod, SummaryBlock, format_date};

/// Table header labels.
pub const TABLE_HEAD: [&str; 5] = ["Receipt", "Date", "Type", "Detail", "Amount"];

/// Font face of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

/// A drawing operation, coordinates in millimetres from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// The background template, stretched over the given box.
    Template {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Box width.
        width: f64,
        /// Box height.
        height: f64,
    },
    /// A single line of text.
    Text {
        /// Left edge of the run.
        x: f64,
        /// Baseline.
        baseline: f64,
        /// Font size, points.
        size: f64,
        /// Font face.
        face: FontFace,
        /// Fill colour.
        color: Rgb,
        /// The text.
        text: String,
    },
    /// A filled rectangle.
    FillRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill colour.
        color: Rgb,
    },
    /// A stroked rectangle.
    StrokeRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Stroke colour.
        color: Rgb,
        /// Line width.
        line_width: f64,
    },
}

/// One page of drawing operations, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Operations in paint order.
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// All text runs on the page.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A table row with every cell already wrapped to its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// Wrapped lines per column: receipt, date, type, detail, amount.
    pub cells: [Vec<String>; 5],
}

impl ExportRow {
    /// Wrapped detail lines.
    #[must_use]
    pub fn detail_lines(&self) -> &[String] {
        &self.cells[3]
    }

    /// Number of text lines the row needs.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(1)
    }
}

/// The laid-out statement document.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementDocument {
    /// Geometry used for layout.
    pub layout: ExportLayout,
    /// Document title, used as PDF metadata.
    pub title: String,
    /// Header lines in print order.
    pub header_lines: Vec<String>,
    /// Summary figures, shared with the interactive table.
    pub summary: SummaryBlock,
    /// Table rows in display order.
    pub rows: Vec<ExportRow>,
    /// Pages in order.
    pub pages: Vec<Page>,
    /// Background template drawn on the first page, if it was available.
    pub template: Option<TemplateImage>,
}

/// Input to the export projector.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// Member name as displayed.
    pub member_name: &'a str,
    /// Statement period.
    pub period: StatementPeriod,
    /// Ledger accumulated in the current display direction.
    pub computation: &'a LedgerComputation,
}

/// Projects a ledger computation into a paginated document.
#[derive(Debug, Clone)]
pub struct ExportProjector {
    layout: ExportLayout,
    date_format: String,
}

impl ExportProjector {
    /// Creates a projector on Letter pages.
    #[must_use]
    pub fn new(date_format: impl Into<String>) -> Self {
        Self::with_layout(ExportLayout::letter(), date_format)
    }

    /// Creates a projector with a custom layout.
    #[must_use]
    pub fn with_layout(layout: ExportLayout, date_format: impl Into<String>) -> Self {
        Self {
            layout,
            date_format: date_format.into(),
        }
    }

    /// Lays out the document.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyLedger`] when there is nothing to export.
    pub fn project(
        &self,
        request: &ExportRequest<'_>,
        template: Option<TemplateImage>,
    ) -> Result<StatementDocument, ExportError> {
        if request.computation.is_empty() {
            return Err(ExportError::EmptyLedger);
        }

        let summary = SummaryBlock::from(&request.computation.summary);
        let header_lines = vec![
            format!("Statement for: {}", request.member_name),
            format!("Period: {}", request.period.label()),
            "Summary:".to_string(),
            format!("- Total Payments: {}", summary.total_payments_display),
            format!("- Final Balance: {}", summary.final_balance_display),
        ];
        let rows: Vec<ExportRow> = request
            .computation
            .entries
            .iter()
            .map(|entry| {
                let tx = &entry.transaction;
                let receipt = tx
                    .receipt_number
                    .as_ref()
                    .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string);
                self.row([
                    receipt,
                    format_date(tx.date, &self.date_format),
                    tx.kind.label().to_string(),
                    tx.detail.clone(),
                    format_amount(entry.signed_amount),
                ])
            })
            .collect();

        let mut pages = vec![Page::default()];
        if template.is_some() {
            pages[0].ops.push(DrawOp::Template {
                x: 0.0,
                y: 0.0,
                width: self.layout.page_width,
                height: self.layout.page_height,
            });
        }
        let header_bottom = self.draw_header(&mut pages[0], &header_lines);
        self.draw_table(&mut pages, &rows, header_bottom + self.layout.table_gap);

        Ok(StatementDocument {
            layout: self.layout.clone(),
            title: format!("Statement - {}", request.member_name),
            header_lines,
            summary,
            rows,
            pages,
            template,
        })
    }

    fn row(&self, cells: [String; 5]) -> ExportRow {
        let font_size = self.layout.table_font_size;
        let mut column = 0;
        ExportRow {
            cells: cells.map(|text| {
                let lines = wrap_text(&text, self.layout.text_width(column), font_size);
                column += 1;
                lines
            }),
        }
    }

    /// Draws the header block; returns the baseline of its last line.
    fn draw_header(&self, page: &mut Page, lines: &[String]) -> f64 {
        let layout = &self.layout;
        let mut y = layout.header_y;

        for (idx, line) in lines.iter().enumerate() {
            let (size, indent) = match idx {
                0 => (layout.title_font_size, 0.0),
                1 | 2 => (layout.header_font_size, 0.0),
                _ => (layout.header_font_size, layout.summary_indent),
            };
            page.ops.push(DrawOp::Text {
                x: layout.header_x + indent,
                baseline: y,
                size,
                face: FontFace::Regular,
                color: Rgb::BLACK,
                text: line.clone(),
            });
            y += match idx {
                0 => layout.line_spacing * 2.0,
                1 => layout.line_spacing * 1.5,
                _ => layout.line_spacing,
            };
        }

        y - layout.line_spacing
    }

    /// Flows rows across pages, repeating the header row on every page.
    /// A row taller than a whole page is split between pages by line.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw_table(&self, pages: &mut Vec<Page>, rows: &[ExportRow], top: f64) {
        let layout = &self.layout;
        let line_height = layout.line_height();
        let head = self.row(TABLE_HEAD.map(String::from));

        let mut y = top;
        self.draw_row(last_page(pages), &head, 0, 1, y, true);
        y += layout.row_height(1);
        let mut rows_on_page = 0usize;

        for row in rows {
            let total = row.line_count();
            let mut offset = 0;

            while offset < total {
                let remaining = total - offset;
                let room = layout.body_bottom() - y - 2.0 * layout.cell_padding;
                let fit = if room > 0.0 {
                    (room / line_height).floor() as usize
                } else {
                    0
                };

                if remaining <= fit {
                    self.draw_row(last_page(pages), row, offset, remaining, y, false);
                    y += layout.row_height(remaining);
                    rows_on_page += 1;
                    break;
                }

                if rows_on_page == 0 {
                    let take = fit.max(1);
                    self.draw_row(last_page(pages), row, offset, take, y, false);
                    offset += take;
                }

                pages.push(Page::default());
                y = layout.continuation_top;
                self.draw_row(last_page(pages), &head, 0, 1, y, true);
                y += layout.row_height(1);
                rows_on_page = 0;
            }
        }
    }

    /// Draws `count` lines of a row starting at line `offset`, as one grid row at `top`.
    fn draw_row(&self, page: &mut Page, row: &ExportRow, offset: usize, count: usize, top: f64, head: bool) {
        let layout = &self.layout;
        let height = layout.row_height(count);
        let (face, color) = if head {
            (FontFace::Bold, layout.head_text)
        } else {
            (FontFace::Regular, layout.body_text)
        };

        for (column, lines) in row.cells.iter().enumerate() {
            let left = layout.column_left(column);
            let width = layout.column_widths[column];

            if head {
                page.ops.push(DrawOp::FillRect {
                    x: left,
                    y: top,
                    width,
                    height,
                    color: layout.head_fill,
                });
            }
            page.ops.push(DrawOp::StrokeRect {
                x: left,
                y: top,
                width,
                height,
                color: layout.grid_color,
                line_width: layout.grid_line_width,
            });

            let mut baseline = top + layout.cell_padding + layout.baseline_offset();
            for line in lines.iter().skip(offset).take(count) {
                let x = match (layout.column_align[column], head) {
                    (Align::Right, false) => {
                        left + width
                            - layout.cell_padding
                            - text_width_mm(line, layout.table_font_size)
                    }
                    _ => left + layout.cell_padding,
                };
                page.ops.push(DrawOp::Text {
                    x,
                    baseline,
                    size: layout.table_font_size,
                    face,
                    color,
                    text: line.clone(),
                });
                baseline += layout.line_height();
            }
        }
    }
}

fn last_page(pages: &mut [Page]) -> &mut Page {
    let idx = pages.len() - 1;
    &mut pages[idx]
}
