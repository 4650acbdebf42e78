//! String helpers used around classification and by metadata writers.
//!
//! The XML helpers operate on text that is embedded in already-escaped
//! DIDL-Lite fragments, which is why [`escape_tag`] emits a double-escaped
//! ampersand (`&amp;amp;`) while [`unescape_tag`] only undoes a single level.

use std::borrow::Cow;

/// Replacement table for [`escape_tag`], applied in order.
const ESCAPES: [(&str, &str); 4] = [
    ("&", "&amp;amp;"),
    ("<", "&amp;lt;"),
    (">", "&amp;gt;"),
    ("\"", "&amp;quot;"),
];

/// Replacement table for [`unescape_tag`], applied in order.
const UNESCAPES: [(&str, &str); 5] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// Whitespace as the C locale's `isspace` sees it (includes vertical tab).
fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Strip surrounding whitespace, then one layer of double quotes.
///
/// ```
/// use mediasift_core::text::trim;
///
/// assert_eq!(trim(" \"hello\" "), "hello");
/// assert_eq!(trim("   "), "");
/// ```
pub fn trim(s: &str) -> &str {
    let s = s.trim_end_matches(is_c_space).trim_start_matches(is_c_space);
    if s.starts_with('"') && s.ends_with('"') {
        // A lone quote is both the opening and the closing one.
        if s.len() == 1 { "" } else { &s[1..s.len() - 1] }
    } else {
        s
    }
}

/// Replace every occurrence of `before` with `after`.
///
/// The buffer is consumed and handed back. Shrinking or same-length
/// replacements happen in place. A growing replacement reserves exactly the
/// extra bytes it needs first, unless `no_grow` is set, in which case the
/// buffer is returned untouched.
pub fn modify_string(mut buffer: String, before: &str, after: &str, no_grow: bool) -> String {
    if before.is_empty() {
        return buffer;
    }
    let Some(first) = buffer.find(before) else {
        return buffer;
    };

    if after.len() > before.len() {
        if no_grow {
            return buffer;
        }
        let count = buffer[first..].matches(before).count();
        buffer.reserve_exact(count * (after.len() - before.len()));
    }

    let mut from = first;
    while let Some(offset) = buffer[from..].find(before) {
        let at = from + offset;
        buffer.replace_range(at..at + before.len(), after);
        from = at + after.len();
    }
    buffer
}

/// Escape XML-special characters for embedding in a DIDL-Lite fragment.
///
/// Text needing no escaping is borrowed unless `force_alloc` asks for an
/// owned copy.
pub fn escape_tag(tag: &str, force_alloc: bool) -> Cow<'_, str> {
    if tag.contains(['&', '<', '>', '"']) {
        let escaped = ESCAPES
            .iter()
            .fold(tag.to_owned(), |buf, (from, to)| modify_string(buf, from, to, false));
        Cow::Owned(escaped)
    } else if force_alloc {
        Cow::Owned(tag.to_owned())
    } else {
        Cow::Borrowed(tag)
    }
}

/// Undo one level of XML entity escaping (`&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`).
///
/// Text without a known entity is borrowed unless `force_alloc` is set.
pub fn unescape_tag(tag: &str, force_alloc: bool) -> Cow<'_, str> {
    let has_entity = tag.contains('&') && UNESCAPES.iter().any(|(entity, _)| tag.contains(entity));
    if has_entity {
        let unescaped = UNESCAPES
            .iter()
            .fold(tag.to_owned(), |buf, (from, to)| modify_string(buf, from, to, true));
        Cow::Owned(unescaped)
    } else if force_alloc {
        Cow::Owned(tag.to_owned())
    } else {
        Cow::Borrowed(tag)
    }
}

/// ASCII case-insensitive suffix test over raw bytes.
pub fn ends_with(haystack: impl AsRef<[u8]>, needle: impl AsRef<[u8]>) -> bool {
    let (haystack, needle) = (haystack.as_ref(), needle.as_ref());
    haystack.len() >= needle.len()
        && haystack[haystack.len() - needle.len()..].eq_ignore_ascii_case(needle)
}

/// Find `pat` in the part of `s` before the first `term`.
///
/// Searches the whole string when `term` does not occur.
pub fn find_before(s: &str, pat: &str, term: char) -> Option<usize> {
    let end = s.find(term).unwrap_or(s.len());
    s[..end].find(pat)
}

/// ASCII case-insensitive variant of [`find_before`].
pub fn find_before_ignore_case(s: &str, pat: &str, term: char) -> Option<usize> {
    let end = s.find(term).unwrap_or(s.len());
    let (hay, pat) = (&s.as_bytes()[..end], pat.as_bytes());
    if pat.is_empty() {
        return Some(0);
    }
    hay.windows(pat.len())
        .position(|window| window.eq_ignore_ascii_case(pat))
}

/// Text before the last `c`, or `None` if `c` does not occur.
pub fn strip_char(name: &str, c: char) -> Option<&str> {
    name.rfind(c).map(|at| &name[..at])
}

/// File name without its last extension.
pub fn strip_ext(name: &str) -> Option<&str> {
    strip_char(name, '.')
}

/// Daniel J. Bernstein's `h * 33 + b` hash.
pub fn djb_hash(data: &[u8]) -> u32 {
    data.iter().fold(5381u32, |hash, &byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(u32::from(byte))
    })
}
