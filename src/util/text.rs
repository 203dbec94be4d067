use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns.
///
/// CJK characters and most emoji count as 2 columns, combining marks as 0.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` so it fits in `max_width` columns.
///
/// When the string is cut and there is room, "..." is appended. Widths of 3
/// or less never get an ellipsis; the result is just the characters that fit.
/// Returns `Cow::Borrowed` when nothing had to be cut.
///
/// ```
/// use aisle::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Electronics", 8), "Elect...");
/// assert_eq!(truncate_to_width("Shoes", 2), "Sh");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width > ELLIPSIS_WIDTH {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    } else {
        (max_width, "")
    };

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &s[..end], suffix))
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Category names and slugs come straight from a third-party API and are
/// written to the terminal, so ESC-initiated sequences (CSI `ESC [ ... final`,
/// OSC `ESC ] ... BEL|ST`) and C0/DEL bytes are removed. Tabs become spaces
/// and newlines are kept.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let dirty = s
        .chars()
        .any(|c| c == '\x1b' || c == '\x7f' || c == '\t' || (c < ' ' && c != '\n'));
    if !dirty {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\x1b' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    // CSI: parameters until a final byte in @..~
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    // OSC: until BEL or ESC \
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\t' => out.push(' '),
            '\n' => out.push('\n'),
            c if c < ' ' || c == '\x7f' => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Upper-case the first character and lower-case the rest.
///
/// ```
/// use aisle::util::capitalize_name;
///
/// assert_eq!(capitalize_name("shoes"), "Shoes");
/// assert_eq!(capitalize_name("MISCELLANEOUS"), "Miscellaneous");
/// assert_eq!(capitalize_name(""), "");
/// ```
pub fn capitalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
