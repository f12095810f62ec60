//! Minimal PDF 1.4 serializer for laid-out statement documents.
//!
//! Uses the standard Helvetica faces, so no font data is embedded. Text is
//! encoded as WinAnsi; characters outside Latin-1 are written as `?`.

use std::fmt::Write as _;

use tracing::debug;

use super::document::{DrawOp, FontFace, Page, StatementDocument};
use super::layout::{MM_PER_PT, Rgb};
use crate::assets::{ImageEncoding, TemplateImage};

const CATALOG: usize = 1;
const PAGES: usize = 2;
const FONT_REGULAR: usize = 3;
const FONT_BOLD: usize = 4;
const IMAGE: usize = 5;

/// Serializes a [`StatementDocument`] into PDF bytes.
#[derive(Debug, Default)]
pub struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    /// Renders the document.
    #[must_use]
    pub fn render(document: &StatementDocument) -> Vec<u8> {
        let mut writer = Self::default();
        writer.write_document(document);
        writer.buf
    }

    fn write_document(&mut self, document: &StatementDocument) {
        let page_w = document.layout.page_width / MM_PER_PT;
        let page_h = document.layout.page_height / MM_PER_PT;
        let first_page = if document.template.is_some() { IMAGE + 1 } else { IMAGE };
        let page_ids: Vec<usize> = (0..document.pages.len()).map(|i| first_page + 2 * i).collect();
        let info = first_page + 2 * document.pages.len();

        self.buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        self.object(CATALOG, format!("<< /Type /Catalog /Pages {PAGES} 0 R >>").as_bytes());
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        self.object(
            PAGES,
            format!(
                "<< /Type /Pages /Kids [{kids}] /Count {} /MediaBox [0 0 {page_w:.2} {page_h:.2}] >>",
                page_ids.len()
            )
            .as_bytes(),
        );
        self.object(
            FONT_REGULAR,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        );
        self.object(
            FONT_BOLD,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
        );
        if let Some(image) = &document.template {
            self.image(image);
        }

        let mut resources = format!("/Font << /F1 {FONT_REGULAR} 0 R /F2 {FONT_BOLD} 0 R >>");
        if document.template.is_some() {
            let _ = write!(resources, " /XObject << /Im1 {IMAGE} 0 R >>");
        }

        for (page, &id) in document.pages.iter().zip(&page_ids) {
            self.object(
                id,
                format!(
                    "<< /Type /Page /Parent {PAGES} 0 R /Resources << {resources} >> /Contents {} 0 R >>",
                    id + 1
                )
                .as_bytes(),
            );
            let content = content_stream(page, page_h);
            self.stream(id + 1, "", &content);
        }

        self.object(
            info,
            format!("<< /Title ({}) /Producer (statement) >>", escape_text(&document.title)).as_bytes(),
        );
        self.trailer(info);
    }

    fn image(&mut self, image: &TemplateImage) {
        let components = image.color.components();
        let filter = match image.encoding {
            ImageEncoding::Jpeg => "/Filter /DCTDecode".to_string(),
            ImageEncoding::PngFlate => format!(
                "/Filter /FlateDecode /DecodeParms << /Predictor 15 /Colors {components} /BitsPerComponent 8 /Columns {} >>",
                image.width
            ),
        };
        let dict = format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /{} /BitsPerComponent 8 {filter}",
            image.width,
            image.height,
            image.color.pdf_name()
        );
        self.stream(IMAGE, &dict, &image.data);
    }

    fn begin(&mut self, id: usize) {
        if self.offsets.len() < id {
            self.offsets.resize(id, 0);
        }
        self.offsets[id - 1] = self.buf.len();
        self.buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.begin(id);
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, dict: &str, data: &[u8]) {
        self.begin(id);
        let sep = if dict.is_empty() { "" } else { " " };
        self.buf
            .extend_from_slice(format!("<< {dict}{sep}/Length {} >>\nstream\n", data.len()).as_bytes());
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn trailer(&mut self, info: usize) {
        let xref = self.buf.len();
        let mut table = format!("xref\n0 {}\n0000000000 65535 f \n", self.offsets.len() + 1);
        for offset in &self.offsets {
            let _ = write!(table, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {} /Root {CATALOG} 0 R /Info {info} 0 R >>\nstartxref\n{xref}\n%%EOF\n",
            self.offsets.len() + 1
        );
        self.buf.extend_from_slice(table.as_bytes());
    }
}

/// Builds a page's content stream. Millimetre coordinates from the top-left
/// become points from the bottom-left.
fn content_stream(page: &Page, page_h: f64) -> Vec<u8> {
    let pt = |mm: f64| mm / MM_PER_PT;
    let mut out = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Template { x, y, width, height } => {
                let line = format!(
                    "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im1 Do Q\n",
                    pt(*width),
                    pt(*height),
                    pt(*x),
                    page_h - pt(*y + *height)
                );
                out.extend_from_slice(line.as_bytes());
            }
            DrawOp::FillRect { x, y, width, height, color } => {
                let line = format!(
                    "{} rg {:.2} {:.2} {:.2} {:.2} re f\n",
                    color_op(*color),
                    pt(*x),
                    page_h - pt(*y + *height),
                    pt(*width),
                    pt(*height)
                );
                out.extend_from_slice(line.as_bytes());
            }
            DrawOp::StrokeRect { x, y, width, height, color, line_width } => {
                let line = format!(
                    "{} RG {:.2} w {:.2} {:.2} {:.2} {:.2} re S\n",
                    color_op(*color),
                    pt(*line_width),
                    pt(*x),
                    page_h - pt(*y + *height),
                    pt(*width),
                    pt(*height)
                );
                out.extend_from_slice(line.as_bytes());
            }
            DrawOp::Text { x, baseline, size, face, color, text } => {
                let font = match face {
                    FontFace::Regular => "F1",
                    FontFace::Bold => "F2",
                };
                let line = format!(
                    "BT /{font} {size:.1} Tf {} rg {:.2} {:.2} Td ({}) Tj ET\n",
                    color_op(*color),
                    pt(*x),
                    page_h - pt(*baseline),
                    escape_text(text)
                );
                out.extend_from_slice(line.as_bytes());
            }
        }
    }
    out
}

fn color_op(Rgb(r, g, b): Rgb) -> String {
    let c = |v: u8| f64::from(v) / 255.0;
    format!("{:.3} {:.3} {:.3}", c(r), c(g), c(b))
}

/// Escapes a string for a PDF literal, encoding Latin-1 bytes as octal.
///
/// Characters outside Latin-1 have no glyph in the standard fonts and are
/// written as `?`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut replaced = 0usize;
    for c in text.chars() {
        let byte = u8::try_from(u32::from(c)).unwrap_or_else(|_| {
            replaced += 1;
            b'?'
        });
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(char::from(byte));
            }
            0x20..=0x7E => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    if replaced > 0 {
        debug!(replaced, text, "Replaced characters outside Latin-1");
    }
    out
}
