//! Reduce content lines to the alphabetic character stream the classifier reads.

use crate::source::ContentFormat;

/// Keep the alphabetic characters that sit outside of markup tags.
///
/// The scan has a single `in_text` flag that persists across lines: `<` clears
/// it, `>` sets it. Tags are not parsed, so attributes never leak into the
/// stream and unbalanced brackets simply leave the flag where the last one put
/// it. Text before the first tag is ignored.
#[must_use]
pub fn strip_markup<S: AsRef<str>>(lines: &[S]) -> Vec<char> {
    let mut text = Vec::new();
    let mut in_text = false;
    for line in lines {
        for c in line.as_ref().chars() {
            if c == '<' {
                in_text = false;
            }
            if in_text && c.is_alphabetic() {
                text.push(c);
            }
            if c == '>' {
                in_text = true;
            }
        }
    }
    text
}

/// Keep every alphabetic character of free prose, ignoring line boundaries.
#[must_use]
pub fn flatten_plain<S: AsRef<str>>(lines: &[S]) -> Vec<char> {
    lines
        .iter()
        .flat_map(|line| line.as_ref().chars())
        .filter(|c| c.is_alphabetic())
        .collect()
}

/// Extract the character stream for content of the given format.
#[must_use]
pub fn extract<S: AsRef<str>>(format: ContentFormat, lines: &[S]) -> Vec<char> {
    match format {
        ContentFormat::Markup => strip_markup(lines),
        ContentFormat::Plain => flatten_plain(lines),
    }
}
