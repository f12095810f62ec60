//! Word wrapping to a measured column width.

use super::metrics::text_width_mm;

/// Wraps `text` into lines no wider than `max_width` millimetres at `font_size`.
///
/// Words are packed greedily; a word wider than the column is broken between
/// characters. Explicit newlines start a new line. Nothing is dropped: the
/// non-whitespace characters of the output equal those of the input. Always
/// returns at least one line.
#[must_use]
pub fn wrap_text(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, font_size) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
                continue;
            }

            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }

        lines.push(current);
    }

    lines
}
