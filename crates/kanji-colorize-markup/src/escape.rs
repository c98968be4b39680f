//! Entity decoding for attribute values and escaping for output.

use std::borrow::Cow;

/// Decodes the predefined entities and numeric character references.
///
/// Unknown or malformed references are kept as written.
pub fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let reference = rest
            .find(';')
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));
        match reference {
            Some((c, semi)) => {
                decoded.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

fn decode_reference(reference: &str) -> Option<char> {
    match reference {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = reference.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Escapes a value for a double-quoted attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '"']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("plain"), "plain");
        assert_eq!(unescape("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(unescape("&#23383;&#x5b57;"), "字字");
        assert_eq!(unescape("&quot;&apos;"), "\"'");
    }

    #[test]
    fn test_unescape_keeps_unknown_references() {
        assert_eq!(unescape("&nbsp;"), "&nbsp;");
        assert_eq!(unescape("a & b"), "a & b");
        assert_eq!(unescape("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn test_escape_attribute() {
        assert!(matches!(escape_attribute("kvg:Stroke"), Cow::Borrowed(_)));
        assert_eq!(escape_attribute("say \"a\" & <b>"), "say &quot;a&quot; &amp; &lt;b>");
    }
}
