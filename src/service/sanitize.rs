//! Input cleaning applied to query parameters and filter values.

const LF_MARK: &str = "{#CHR10#}";
const CR_MARK: &str = "{#CHR13#}";

/// Remove `<...>` tags. A `<` followed by whitespace or the end of input is kept
/// as text; an unterminated tag swallows the rest of the input.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(next) if !next.is_whitespace() => {
                for skipped in chars.by_ref() {
                    if skipped == '>' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Keep only ASCII alphanumerics and underscore.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Clean a filter value: strip tags and every character outside 0x20..=0x7E,
/// keeping quotes verbatim. CR and LF are swapped out for markers first and
/// restored afterwards so multi-line values survive.
pub fn sanitize_value(raw: &str) -> String {
    let swapped = raw.replace('\n', LF_MARK).replace('\r', CR_MARK);
    let filtered: String = strip_tags(&swapped)
        .chars()
        .filter(|c| (' '..='~').contains(c))
        .collect();
    filtered.replace(LF_MARK, "\n").replace(CR_MARK, "\r")
}

/// Leading-integer parse: optional whitespace and sign, then digits. Anything
/// unparsable yields 0.
pub fn leading_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut n: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        n = n.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        -n
    } else {
        n
    }
}

/// Decimal number test: optional surrounding whitespace, sign, digits with an
/// optional fraction, optional exponent.
pub fn is_numeric(raw: &str) -> bool {
    let s = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    let s = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }
    match exponent {
        None => true,
        Some(e) => {
            let e = e.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(e);
            !e.is_empty() && all_digits(e)
        }
    }
}

/// Integer id for a numeric segment, truncated toward zero.
pub fn numeric_id(raw: &str) -> Option<i64> {
    if !is_numeric(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().map(|f| f.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_removed() {
        assert_eq!(strip_tags("a<b>bold</b>c"), "aboldc");
        assert_eq!(strip_tags("1 < 2"), "1 < 2");
        assert_eq!(strip_tags("title<script"), "title");
    }

    #[test]
    fn identifiers_keep_word_characters() {
        assert_eq!(sanitize_identifier("auth-or; DROP"), "authorDROP");
        assert_eq!(sanitize_identifier("created_at"), "created_at");
    }

    #[test]
    fn value_keeps_line_breaks_and_quotes() {
        let raw = "line one\r\nit's \"two\"\x01\x7f\u{e9}";
        assert_eq!(sanitize_value(raw), "line one\r\nit's \"two\"");
    }

    #[test]
    fn value_strips_other_control_bytes() {
        assert_eq!(sanitize_value("a\tb\x00c\x1bd"), "abcd");
        assert_eq!(sanitize_value("alice"), "alice");
    }

    #[test]
    fn leading_int_behaves_like_intval() {
        assert_eq!(leading_int("10"), 10);
        assert_eq!(leading_int(" 10abc"), 10);
        assert_eq!(leading_int("-5"), -5);
        assert_eq!(leading_int("abc"), 0);
        assert_eq!(leading_int(""), 0);
    }

    #[test]
    fn numeric_detection() {
        for s in ["5", "-3", "+7", "1.5", ".5", "5.", "1e3", " 12"] {
            assert!(is_numeric(s), "{s}");
        }
        for s in ["", "abc", "12abc", "0x1A", "1e", ".", "author"] {
            assert!(!is_numeric(s), "{s}");
        }
    }

    #[test]
    fn numeric_ids_truncate() {
        assert_eq!(numeric_id("7"), Some(7));
        assert_eq!(numeric_id("7.9"), Some(7));
        assert_eq!(numeric_id("1e3"), Some(1000));
        assert_eq!(numeric_id("author"), None);
    }
}
