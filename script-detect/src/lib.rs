//! Dominant-script detection and catalog script matching.
//!
//! This crate is the single source of truth for deciding which writing system a
//! text sample is written in, and whether that agrees with the script label the
//! LPTS catalog declares for a fileset. It performs no I/O.
//!
//! The script of a letter is approximated by the first word of its Unicode
//! character name (`LATIN SMALL LETTER A` is `LATIN`). This is not the Unicode
//! `Script` property, and a handful of letters do not round-trip through it
//! (`FEMININE ORDINAL INDICATOR` counts as `FEMININE`). Catalog matching depends
//! on this exact behavior, so it must not be replaced by a property lookup.
//!
//! `unicode_names2` carries no names for the Tangut ideograph ranges, whose
//! names are derived from the code point (`TANGUT IDEOGRAPH-17000`). Those
//! ranges are listed in [`DERIVED_NAME_RANGES`] so the letters still count.

use std::borrow::Cow;

use serde::Serialize;
use unicode_general_category::{GeneralCategory, get_general_category};

/// Unicode name tokens that differ from the catalog's script vocabulary,
/// paired with the catalog spelling.
pub const CANONICAL_SCRIPT_NAMES: &[(&str, &str)] = &[("CJK", "HAN"), ("MYANMAR", "BURMESE")];

/// Letter ranges with code-point-derived names missing from `unicode_names2`,
/// with the first word of those names.
pub const DERIVED_NAME_RANGES: &[(char, char, &str)] = &[
    ('\u{17000}', '\u{187f7}', "TANGUT"),
    ('\u{18d00}', '\u{18d08}', "TANGUT"),
];

/// Per-script letter counts, kept in order of first occurrence.
///
/// Insertion order is part of the contract: when two scripts tie, the one seen
/// first in the sample is dominant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptCounts {
    entries: Vec<(String, usize)>,
}

impl ScriptCounts {
    fn add(&mut self, token: &str, count: usize) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == token) {
            entry.1 += count;
        } else {
            self.entries.push((token.to_owned(), count));
        }
    }

    /// Add another sample's counts as if its letters followed this sample's.
    ///
    /// Tokens new to `self` are appended in `other`'s order, so merging
    /// per-file counts in listing order gives the same tie order as counting
    /// the concatenated text.
    pub fn merge(&mut self, other: &Self) {
        for (name, count) in other.iter() {
            self.add(name, count);
        }
    }

    /// Count recorded for a raw (non-canonical) script token.
    #[must_use]
    pub fn get(&self, token: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == token)
            .map_or(0, |(_, count)| *count)
    }

    /// Total number of classified letters.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct script tokens seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(token, count)` pairs in order of first occurrence.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// The token with the strictly highest count (first seen wins ties).
    #[must_use]
    pub fn dominant(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (name, count) in self.iter() {
            if best.is_none_or(|(_, most)| count > most) {
                best = Some((name, count));
            }
        }
        best
    }

    /// Render the breakdown as `LATIN=12, GREEK=3` for diagnostics.
    #[must_use]
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(name, count)| format!("{name}={count}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Outcome of classifying a character stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptResult {
    /// Canonical dominant script token, `None` when no letter was classified.
    pub script: Option<String>,
    /// Share of classified letters belonging to the dominant script, rounded down.
    pub confidence: u8,
}

/// Whether a character takes part in classification.
///
/// Only uppercase, lowercase and other letters count. Titlecase and modifier
/// letters, marks, digits, punctuation and symbols are ignored.
#[inline]
#[must_use]
pub fn is_classifiable(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::OtherLetter
    )
}

/// The raw script token for a character: the first word of its Unicode name.
///
/// Returns `None` for characters that are not classifiable or have no name.
/// The token borrows from the name tables unless the first word is split
/// across several name pieces.
#[must_use]
pub fn script_token(c: char) -> Option<Cow<'static, str>> {
    if !is_classifiable(c) {
        return None;
    }
    match unicode_names2::name(c) {
        Some(name) => first_word(name),
        None => derived_name_token(c).map(Cow::Borrowed),
    }
}

fn first_word(mut pieces: unicode_names2::Name) -> Option<Cow<'static, str>> {
    let first = pieces.next()?;
    if let Some((word, _)) = first.split_once(' ') {
        return Some(Cow::Borrowed(word));
    }
    // A hyphen joins pieces without a space, so the word may continue.
    let mut word = Cow::Borrowed(first);
    for piece in pieces {
        let (head, done) = piece.split_once(' ').map_or((piece, false), |(head, _)| (head, true));
        if !head.is_empty() {
            word.to_mut().push_str(head);
        }
        if done {
            break;
        }
    }
    Some(word)
}

fn derived_name_token(c: char) -> Option<&'static str> {
    DERIVED_NAME_RANGES
        .iter()
        .find(|(first, last, _)| (*first..=*last).contains(&c))
        .map(|(_, _, token)| *token)
}

/// Map a raw Unicode name token onto the catalog's spelling.
#[must_use]
pub fn canonical_script(token: &str) -> &str {
    CANONICAL_SCRIPT_NAMES
        .iter()
        .find(|(raw, _)| *raw == token)
        .map_or(token, |(_, canonical)| canonical)
}

/// Count classifiable letters per script token.
#[must_use]
pub fn count_scripts<I>(chars: I) -> ScriptCounts
where
    I: IntoIterator<Item = char>,
{
    let mut counts = ScriptCounts::default();
    for c in chars {
        if let Some(token) = script_token(c) {
            counts.add(&token, 1);
        }
    }
    counts
}

/// Reduce script counts to the dominant canonical script and its confidence.
#[must_use]
pub fn summarize(counts: &ScriptCounts) -> ScriptResult {
    let Some((token, most)) = counts.dominant() else {
        return ScriptResult::default();
    };
    let percent = (most * 100).checked_div(counts.total()).unwrap_or(0);
    ScriptResult {
        script: Some(canonical_script(token).to_owned()),
        confidence: u8::try_from(percent).unwrap_or(100),
    }
}

/// Classify a character stream and report its dominant script.
#[must_use]
pub fn classify<I>(chars: I) -> ScriptResult
where
    I: IntoIterator<Item = char>,
{
    summarize(&count_scripts(chars))
}

/// Normalize a catalog script label for comparison: uppercase, first word only.
///
/// `"Thai Traditional"` becomes `"THAI"`.
#[must_use]
pub fn normalize_declared(declared: &str) -> String {
    declared
        .to_uppercase()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_owned()
}

/// Compare a detected script against the catalog's declared script label.
///
/// A missing detection never matches, and neither does a missing declaration.
#[must_use]
pub fn matches_declared(detected: Option<&str>, declared: Option<&str>) -> bool {
    let Some(detected) = detected else {
        return false;
    };
    declared.is_some_and(|label| normalize_declared(label) == detected)
}

/// Title-case an uppercase script token for display (`CYRILLIC` becomes `Cyrillic`).
#[must_use]
pub fn display_script(script: Option<&str>) -> String {
    let Some(script) = script else {
        return String::new();
    };
    let mut chars = script.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
