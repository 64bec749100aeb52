//! Search query builder.
//!
//! Turns a search title into the URL fragment a site's search engine will
//! accept. The algorithm shape is shared; the punctuation sets, quote
//! handling and length cap come from the [`SiteProfile`].

use crate::core::normalize::BAD_LEADING_CHARS;
use crate::sites::SiteProfile;
use deunicode::deunicode;

/// Typographic quotes folded to a straight apostrophe before the
/// site-specific character sets are applied.
const QUOTE_VARIANTS: &[char] = &['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Build a URL-safe, length-bounded search string. Pure and total.
pub fn build_query(search_title: &str, site: &SiteProfile) -> String {
    let mut s = search_title.trim().to_lowercase();

    s = s
        .chars()
        .map(|c| if QUOTE_VARIANTS.contains(&c) { '\'' } else { c })
        .filter(|c| !site.query_null_chars.contains(c))
        .map(|c| if site.query_space_chars.contains(&c) { ' ' } else { c })
        .collect();
    s = s.split_whitespace().collect::<Vec<_>>().join(" ");

    if site.truncate_at_quote {
        // a leading quote is dropped rather than truncated to nothing
        if s.starts_with(BAD_LEADING_CHARS) {
            s.remove(0);
        }
        if let Some(pos) = s.find(BAD_LEADING_CHARS) {
            s.truncate(pos);
        }
    }

    s = deunicode(s.trim());
    let mut encoded = urlencoding::encode(&s).into_owned();

    // undo double-encoding artifacts (%26 arriving as %2526) and stray
    // asterisks some encoders introduce
    encoded = encoded.replace("%25", "%").replace('*', "");

    truncate_encoded(&mut encoded, site.max_query_len);
    encoded
}

/// Truncate a percent-encoded string without splitting an escape
/// sequence: the result never ends in `%` or `%X`.
fn truncate_encoded(encoded: &mut String, max_len: usize) {
    if encoded.len() > max_len {
        encoded.truncate(max_len);
    }
    while encoded.ends_with('%') {
        encoded.pop();
    }
    let bytes = encoded.as_bytes();
    if bytes.len() >= 2 && bytes[bytes.len() - 2] == b'%' {
        encoded.pop();
        encoded.pop();
    }
    while encoded.ends_with(' ') || encoded.ends_with('%') {
        encoded.pop();
    }
}
