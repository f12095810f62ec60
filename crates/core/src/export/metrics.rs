//! Helvetica glyph advance widths for text measurement.
//!
//! Widths are in 1/1000 em from the standard Helvetica AFM. Characters outside
//! printable ASCII are measured as their WinAnsi stand-ins.

use super::layout::MM_PER_PT;

/// Advance widths for `' '..='~'`.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Width of a character in 1/1000 em.
#[must_use]
pub fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_ASCII[c as usize - 0x20],
        '\u{C0}'..='\u{DE}' => 667,
        '\u{DF}'..='\u{FF}' => 556,
        '\u{A0}'..='\u{BF}' => 400,
        _ => HELVETICA_ASCII[usize::from(b'?') - 0x20],
    }
}

/// Width of a string at `font_size` points, in millimetres.
#[must_use]
pub fn text_width_mm(text: &str, font_size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    f64::from(units) / 1000.0 * font_size * MM_PER_PT
}
