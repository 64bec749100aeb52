//! Comparison string normalization.
//!
//! Catalog sites disagree with filenames about case, quote glyphs, dash
//! variants, accents and sequel numbering. Everything that compares two
//! titles or studios goes through [`normalize`] first so those differences
//! never count as mismatches. The normalized form is lossy and is used only
//! for comparison, never for display.

use deunicode::deunicode;

/// Typographic quote variants folded to a straight apostrophe.
///
/// Ordered rule table: each entry is applied in sequence before the
/// whitespace collapse, so individual rules stay unit-testable.
const QUOTE_CHARS: &[char] = &[
    '\u{2018}', // left single quote
    '\u{2019}', // right single quote
    '\u{201C}', // left double quote
    '\u{201D}', // right double quote
    '`',
];

/// Dash-family and list-separator characters replaced with a space.
const SPACE_CHARS: &[char] = &[
    ',',
    ';',
    ':',
    '-',
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
];

/// Leading characters web search engines choke on. Dropped when preparing
/// a *search* string only; comparison strings keep the full text.
pub const BAD_LEADING_CHARS: &[char] = &['\'', '"', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Determinate articles recognized in sort-order suffixes.
const ARTICLES: &[&str] = &["The", "An", "A"];

/// Canonicalize a title or studio string for comparison.
///
/// Steps, in order: case-fold, fold quote variants to `'`, replace
/// dash-family and separator punctuation with spaces, collapse whitespace,
/// strip diacritics. Total over any Unicode input and idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if QUOTE_CHARS.contains(&ch) {
            out.push('\'');
        } else if SPACE_CHARS.contains(&ch) {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }

    let collapsed = out.split_whitespace().collect::<Vec<_>>().join(" ");

    // Lossy one-way accent strip; "Café" and "Cafe" must compare equal.
    deunicode(&collapsed).to_lowercase()
}

/// Re-order a library sort-order title to natural order.
///
/// Some sites display titles with a trailing determinate, e.g.
/// `"Best of Zak, The"`. Returns `"The Best of Zak"`; titles without a
/// recognized suffix come back unchanged.
pub fn reorder_sort_article(title: &str) -> String {
    let trimmed = title.trim_end();
    for article in ARTICLES {
        let suffix = format!(", {article}");
        if let Some(stem) = strip_suffix_ignore_case(trimmed, &suffix) {
            return format!("{} {}", article, stem.trim_end());
        }
    }
    trimmed.to_string()
}

/// Inverse of [`reorder_sort_article`]: move a leading article to a
/// trailing `", The"` style suffix, recovering the sort form.
pub fn to_sort_order(title: &str) -> String {
    let trimmed = title.trim();
    for article in ARTICLES {
        let prefix = format!("{article} ");
        if let Some(stem) = strip_prefix_ignore_case(trimmed, &prefix) {
            if !stem.is_empty() {
                return format!("{stem}, {article}");
            }
        }
    }
    trimmed.to_string()
}

// The article prefixes/suffixes are ASCII, but the surrounding title is
// arbitrary Unicode: splitting at a fixed byte offset can land inside a
// multibyte character, so both helpers verify the boundary first.

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() <= prefix.len() || !s.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, stem) = s.split_at(prefix.len());
    head.eq_ignore_ascii_case(prefix).then_some(stem)
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    if s.len() < suffix.len() || !s.is_char_boundary(s.len() - suffix.len()) {
        return None;
    }
    let (stem, tail) = s.split_at(s.len() - suffix.len());
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

/// Convert a trailing Roman-numeral sequence token to Arabic digits so
/// `"Film II"` and `"Film 2"` compare equal. Only the last whitespace token
/// is considered; interior numerals are part of the title proper.
pub fn arabicize_sequence(title: &str) -> String {
    let trimmed = title.trim_end();
    match trimmed.rsplit_once(' ') {
        Some((stem, last)) => match roman_to_arabic(last) {
            Some(n) => format!("{stem} {n}"),
            None => trimmed.to_string(),
        },
        None => trimmed.to_string(),
    }
}

/// Parse a Roman numeral in the sequel range I..=XXXIX.
///
/// Case-insensitive. Single "i" is accepted ("Film I" restarts do exist);
/// anything with characters outside `ivx` is rejected.
pub fn roman_to_arabic(token: &str) -> Option<u32> {
    if token.is_empty() || token.len() > 7 {
        return None;
    }
    let values: Vec<i64> = token
        .chars()
        .map(|c| match c.to_ascii_lowercase() {
            'i' => Some(1),
            'v' => Some(5),
            'x' => Some(10),
            _ => None,
        })
        .collect::<Option<Vec<i64>>>()?;

    let mut total: i64 = 0;
    for (i, &v) in values.iter().enumerate() {
        if values.get(i + 1).is_some_and(|&next| next > v) {
            total -= v;
        } else {
            total += v;
        }
    }
    if !(1..=39).contains(&total) {
        return None;
    }
    let total = total as u32;
    // reject malformed strings like "iiv" that survive the subtraction walk
    if arabic_to_roman(total).map(|r| r.to_lowercase()) != Some(token.to_lowercase()) {
        return None;
    }
    Some(total)
}

/// Render 1..=39 as a Roman numeral. Used to validate parses and to build
/// the alternate compare form for sites that display Roman sequels.
pub fn arabic_to_roman(mut n: u32) -> Option<String> {
    if n == 0 || n > 39 {
        return None;
    }
    let mut out = String::new();
    for (value, glyph) in [(10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")] {
        while n >= value {
            out.push_str(glyph);
            n -= value;
        }
    }
    Some(out)
}

/// Full comparison key for a title: sort-article reorder, then base
/// normalization, then trailing Roman-numeral reconciliation.
pub fn compare_title(title: &str) -> String {
    arabicize_sequence(&normalize(&reorder_sort_article(title)))
}

/// Internet domain suffixes stripped from studio names before comparison.
/// Sites list "StudioX.com" where filenames say "StudioX".
const DOMAIN_SUFFIXES: &[&str] = &[".com", ".net", ".tv"];

/// Comparison key for a studio name: domain suffix stripped, then the
/// base normalization.
pub fn compare_studio(studio: &str) -> String {
    let mut s = studio.trim().to_lowercase();
    for suffix in DOMAIN_SUFFIXES {
        if let Some(stem) = s.strip_suffix(suffix) {
            s = stem.to_string();
            break;
        }
    }
    normalize(&s)
}
