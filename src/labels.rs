//! Parsing of the icon-prefixed labels under each story title.
//!
//! The front page renders the publication date and byline as text preceded
//! by an icon-font glyph, e.g. `"\u{e802}Mar 05, 2024\u{e804}The Hacker News"`.
//! Rather than slicing at fixed byte offsets, glyphs are recognised by their
//! code point (the Unicode private use areas) and the date by its pattern.

use crate::error::LabelError;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.? \d{1,2}, \d{4}\b")
        .expect("date pattern is valid")
});

/// Icon fonts map their glyphs into the private use areas.
fn is_icon_glyph(c: char) -> bool {
    matches!(c, '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}')
}

/// Remove any leading icon glyphs and surrounding whitespace.
pub fn strip_icon_prefix(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| is_icon_glyph(c) || c.is_whitespace())
        .trim_end()
}

/// Extract the publication date shown in a raw `.item-label` text.
///
/// Labels that are empty, consist only of an icon, or carry no
/// `Mon DD, YYYY` date are rejected instead of being sliced blindly.
pub fn parse_published_label(raw: &str) -> Result<String, LabelError> {
    let text = strip_icon_prefix(raw);
    if text.is_empty() {
        return Err(LabelError::Empty);
    }

    DATE_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| LabelError::NoDate(text.to_string()))
}

/// Pick the byline out of the label's `<span>` texts.
///
/// The first span whose text is not just the date is taken as the author.
pub fn parse_author<'a, I>(spans: I) -> Result<String, LabelError>
where
    I: IntoIterator<Item = &'a str>,
{
    spans
        .into_iter()
        .map(strip_icon_prefix)
        // a glyph may also separate the author from trailing text
        .map(|text| text.split(is_icon_glyph).next().unwrap_or_default().trim())
        .find(|text| !text.is_empty() && !is_only_date(text))
        .map(str::to_string)
        .ok_or(LabelError::Empty)
}

fn is_only_date(text: &str) -> bool {
    DATE_PATTERN
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}
