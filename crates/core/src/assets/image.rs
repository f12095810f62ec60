//! Decoding just enough of JPEG and PNG files to embed them in a PDF.
//!
//! JPEG data is embedded as-is (`DCTDecode`). PNG image data is already a
//! zlib stream with per-row predictors, so the concatenated `IDAT` chunks are
//! embedded as `FlateDecode` with PNG predictor parameters. Only 8-bit,
//! non-interlaced grayscale and RGB PNGs qualify.

use super::error::AssetError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Colour space of the decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageColor {
    /// One component.
    Gray,
    /// Three components.
    Rgb,
    /// Four components (JPEG only).
    Cmyk,
}

impl ImageColor {
    /// Number of colour components.
    #[must_use]
    pub const fn components(self) -> u8 {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Cmyk => 4,
        }
    }

    /// PDF colour space name.
    #[must_use]
    pub const fn pdf_name(self) -> &'static str {
        match self {
            Self::Gray => "DeviceGray",
            Self::Rgb => "DeviceRGB",
            Self::Cmyk => "DeviceCMYK",
        }
    }
}

/// How the image data is compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// Baseline or progressive JPEG.
    Jpeg,
    /// zlib stream with PNG row predictors.
    PngFlate,
}

/// A background template ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateImage {
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Colour space.
    pub color: ImageColor,
    /// Data compression.
    pub encoding: ImageEncoding,
    /// Encoded image data.
    pub data: Vec<u8>,
}

impl TemplateImage {
    /// Decodes a JPEG or PNG file.
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.starts_with(&[0xFF, 0xD8]) {
            decode_jpeg(bytes)
        } else if bytes.starts_with(&PNG_SIGNATURE) {
            decode_png(bytes)
        } else {
            Err(AssetError::unsupported("not a JPEG or PNG file"))
        }
    }
}

fn be_u16(bytes: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_be_bytes([*bytes.get(at)?, *bytes.get(at + 1)?]))
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let slice = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

fn decode_jpeg(bytes: &[u8]) -> Result<TemplateImage, AssetError> {
    let truncated = || AssetError::unsupported("truncated JPEG");
    let mut pos = 2;

    loop {
        if *bytes.get(pos).ok_or_else(truncated)? != 0xFF {
            return Err(AssetError::unsupported("corrupt JPEG marker"));
        }
        while bytes.get(pos) == Some(&0xFF) {
            pos += 1;
        }
        let marker = *bytes.get(pos).ok_or_else(truncated)?;
        pos += 1;

        // Standalone markers carry no length.
        if marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            continue;
        }

        let length = usize::from(be_u16(bytes, pos).ok_or_else(truncated)?);
        let is_frame = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame {
            let height = be_u16(bytes, pos + 3).ok_or_else(truncated)?;
            let width = be_u16(bytes, pos + 5).ok_or_else(truncated)?;
            let color = match bytes.get(pos + 7).ok_or_else(truncated)? {
                1 => ImageColor::Gray,
                3 => ImageColor::Rgb,
                4 => ImageColor::Cmyk,
                n => return Err(AssetError::unsupported(format!("{n} JPEG components"))),
            };
            return Ok(TemplateImage {
                width: u32::from(width),
                height: u32::from(height),
                color,
                encoding: ImageEncoding::Jpeg,
                data: bytes.to_vec(),
            });
        }
        pos += length;
    }
}

fn decode_png(bytes: &[u8]) -> Result<TemplateImage, AssetError> {
    let truncated = || AssetError::unsupported("truncated PNG");
    let mut pos = PNG_SIGNATURE.len();
    let mut header: Option<(u32, u32, ImageColor)> = None;
    let mut data = Vec::new();

    while pos < bytes.len() {
        let length = usize::try_from(be_u32(bytes, pos).ok_or_else(truncated)?)
            .map_err(|_| truncated())?;
        let kind = bytes.get(pos + 4..pos + 8).ok_or_else(truncated)?;
        let body = bytes
            .get(pos + 8..pos + 8 + length)
            .ok_or_else(truncated)?;

        match kind {
            b"IHDR" => {
                let width = be_u32(body, 0).ok_or_else(truncated)?;
                let height = be_u32(body, 4).ok_or_else(truncated)?;
                let (depth, color_type, interlace) = (
                    *body.get(8).ok_or_else(truncated)?,
                    *body.get(9).ok_or_else(truncated)?,
                    *body.get(12).ok_or_else(truncated)?,
                );
                if depth != 8 {
                    return Err(AssetError::unsupported(format!("{depth}-bit PNG")));
                }
                if interlace != 0 {
                    return Err(AssetError::unsupported("interlaced PNG"));
                }
                let color = match color_type {
                    0 => ImageColor::Gray,
                    2 => ImageColor::Rgb,
                    other => {
                        return Err(AssetError::unsupported(format!("PNG color type {other}")));
                    }
                };
                header = Some((width, height, color));
            }
            b"IDAT" => data.extend_from_slice(body),
            b"IEND" => break,
            _ => {}
        }

        // length + type + body + crc
        pos += 12 + length;
    }

    let (width, height, color) = header.ok_or_else(|| AssetError::unsupported("PNG without IHDR"))?;
    if data.is_empty() {
        return Err(AssetError::unsupported("PNG without image data"));
    }

    Ok(TemplateImage {
        width,
        height,
        color,
        encoding: ImageEncoding::PngFlate,
        data,
    })
}
