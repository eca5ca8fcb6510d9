//! Pure text helpers: string-literal quoting and HTML escaping.

use std::borrow::Cow;

/// Strip the surrounding quotes from a string literal and unescape it.
///
/// Only `\"` and `\\` are escape sequences; any other backslash is kept
/// verbatim together with the character after it. Input that is not
/// wrapped in quotes is returned unchanged.
///
/// ```rust
/// use quizdoc_core::text::unquote;
///
/// assert_eq!(unquote(r#""say \"hi\"""#), r#"say "hi""#);
/// assert_eq!(unquote(r#""a\nb""#), r"a\nb");
/// ```
pub fn unquote(literal: &str) -> Cow<'_, str> {
    let inner = match literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner,
        None => return Cow::Borrowed(literal),
    };

    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// Wrap text in quotes, escaping `\` and `"`. [`unquote`] reverses it.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[inline]
fn html_entity(b: u8) -> Option<&'static str> {
    match b {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'"' => Some("&quot;"),
        b'\'' => Some("&#39;"),
        _ => None,
    }
}

/// Append `text` to `out`, escaping `& < > " '`. Nothing else is changed.
pub fn push_escaped(out: &mut String, text: &str) {
    let mut last = 0;
    for (i, b) in text.bytes().enumerate() {
        if let Some(entity) = html_entity(b) {
            out.push_str(&text[last..i]);
            out.push_str(entity);
            last = i + 1;
        }
    }
    out.push_str(&text[last..]);
}

/// Escape text for use as HTML element content or attribute value.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.bytes().any(|b| html_entity(b).is_some()) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    push_escaped(&mut out, text);
    Cow::Owned(out)
}
